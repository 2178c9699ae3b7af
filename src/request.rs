//! A single type covering every request packet.

use crate::ack::Ack;
use crate::connect::Connect;
use crate::control::{Disconnect, PingReq};
use crate::encode::Encode;
use crate::error::Result;
use crate::fields::Writer;
use crate::header::FixedHeader;
use crate::publish::Publish;
use crate::subscribe::{Subscribe, Unsubscribe};

/// Any client-to-server request this crate can encode.
///
/// Handy for outgoing queues that hold mixed packet types.
///
/// # Examples
///
/// ```rust
/// use mqttpack::{Ack, Encode, PingReq, Request};
///
/// let queue = [Request::from(PingReq), Request::from(Ack::puback(3))];
/// let mut buf = [0u8; 16];
/// let mut used = 0;
/// for request in &queue {
///     used += request.encode(&mut buf[used..]).unwrap();
/// }
/// assert_eq!(&buf[..used], &[0xC0, 0x00, 0x40, 0x02, 0x00, 0x03]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Request<'a> {
    /// CONNECT
    Connect(Connect<'a>),
    /// PUBLISH
    Publish(Publish<'a>),
    /// PUBACK, PUBREC, PUBREL or PUBCOMP
    Ack(Ack),
    /// SUBSCRIBE
    Subscribe(Subscribe<'a>),
    /// UNSUBSCRIBE
    Unsubscribe(Unsubscribe<'a>),
    /// PINGREQ
    PingReq,
    /// DISCONNECT
    Disconnect,
}

impl Request<'_> {
    fn as_encode(&self) -> &dyn Encode {
        match self {
            Request::Connect(p) => p,
            Request::Publish(p) => p,
            Request::Ack(p) => p,
            Request::Subscribe(p) => p,
            Request::Unsubscribe(p) => p,
            Request::PingReq => &PingReq,
            Request::Disconnect => &Disconnect,
        }
    }
}

impl Encode for Request<'_> {
    fn validate(&self) -> Result<()> {
        self.as_encode().validate()
    }

    fn fixed_header(&self) -> Result<FixedHeader> {
        self.as_encode().fixed_header()
    }

    fn remaining_length(&self) -> Result<usize> {
        self.as_encode().remaining_length()
    }

    fn encode_body(&self, writer: &mut Writer<'_>) -> Result<()> {
        self.as_encode().encode_body(writer)
    }
}

impl<'a> From<Connect<'a>> for Request<'a> {
    fn from(p: Connect<'a>) -> Self {
        Request::Connect(p)
    }
}

impl<'a> From<Publish<'a>> for Request<'a> {
    fn from(p: Publish<'a>) -> Self {
        Request::Publish(p)
    }
}

impl From<Ack> for Request<'_> {
    fn from(p: Ack) -> Self {
        Request::Ack(p)
    }
}

impl<'a> From<Subscribe<'a>> for Request<'a> {
    fn from(p: Subscribe<'a>) -> Self {
        Request::Subscribe(p)
    }
}

impl<'a> From<Unsubscribe<'a>> for Request<'a> {
    fn from(p: Unsubscribe<'a>) -> Self {
        Request::Unsubscribe(p)
    }
}

impl From<PingReq> for Request<'_> {
    fn from(_: PingReq) -> Self {
        Request::PingReq
    }
}

impl From<Disconnect> for Request<'_> {
    fn from(_: Disconnect) -> Self {
        Request::Disconnect
    }
}

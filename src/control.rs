//! PINGREQ and DISCONNECT.
//!
//! Both packets are a bare fixed header with a remaining length of zero.

use crate::encode::Encode;
use crate::error::Result;
use crate::fields::Writer;
use crate::header::{ControlType, FixedHeader};

/// A PINGREQ, sent to keep the connection alive.
///
/// ```rust
/// use mqttpack::{Encode, PingReq};
///
/// let mut buf = [0u8; 2];
/// assert_eq!(PingReq.encode(&mut buf), Ok(2));
/// assert_eq!(buf, [0xC0, 0x00]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PingReq;

/// A DISCONNECT, the last packet of a clean shutdown.
///
/// ```rust
/// use mqttpack::{Disconnect, Encode};
///
/// let mut buf = [0u8; 2];
/// assert_eq!(Disconnect.encode(&mut buf), Ok(2));
/// assert_eq!(buf, [0xE0, 0x00]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Disconnect;

impl Encode for PingReq {
    fn fixed_header(&self) -> Result<FixedHeader> {
        FixedHeader::new(ControlType::PingReq, 0)
    }

    fn remaining_length(&self) -> Result<usize> {
        Ok(0)
    }

    fn encode_body(&self, _writer: &mut Writer<'_>) -> Result<()> {
        Ok(())
    }
}

impl Encode for Disconnect {
    fn fixed_header(&self) -> Result<FixedHeader> {
        FixedHeader::new(ControlType::Disconnect, 0)
    }

    fn remaining_length(&self) -> Result<usize> {
        Ok(0)
    }

    fn encode_body(&self, _writer: &mut Writer<'_>) -> Result<()> {
        Ok(())
    }
}

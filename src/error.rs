//! Error types for packet encoding.
//!
//! Encoding can fail in exactly two ways, and callers are expected to branch on
//! which one happened:
//!
//! - [`Error::BufferTooSmall`]: the request is legal but the destination buffer
//!   cannot hold the whole packet. Retrying with a larger buffer will succeed.
//! - [`Error::ProtocolViolation`]: the request itself breaks an MQTT v3.1.1 wire
//!   rule. No buffer size will fix it; the inputs must change.
//!
//! In both cases nothing has been written to the destination buffer.

use core::fmt;

/// Result type returned by every encoder in this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// The reason a request cannot be encoded as a legal MQTT v3.1.1 packet.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Violation {
    /// The packet body would exceed 268,435,455 bytes.
    RemainingLengthTooLarge,
    /// Fixed-header flags are wider than 4 bits or do not match the packet type.
    InvalidFlags,
    /// A QoS value of 3 (or higher) was supplied.
    InvalidQoS,
    /// A length-prefixed string is longer than 65,535 bytes.
    StringTooLong,
    /// A length-prefixed binary field is longer than 65,535 bytes.
    BinaryTooLong,
    /// A topic name or topic filter is empty.
    EmptyTopic,
    /// Only one of will topic and will message was supplied.
    IncompleteWill,
    /// A password was supplied without a user name.
    PasswordWithoutUserName,
    /// Connect flags outside the caller-writable bits were set.
    InvalidConnectFlags,
    /// Will QoS or will retain was set but no will was supplied.
    WillFlagsWithoutWill,
    /// The control type is not valid for the requested packet.
    InvalidControlType,
    /// A SUBSCRIBE or UNSUBSCRIBE request carried no topics.
    NoTopics,
    /// A SUBSCRIBE or UNSUBSCRIBE request carried more than eight topics.
    TooManyTopics,
}

impl Violation {
    /// Stable positive code for this violation.
    ///
    /// [`signed_size`] reports a violation as the negated code.
    pub const fn code(self) -> i16 {
        match self {
            Violation::RemainingLengthTooLarge => 1,
            Violation::InvalidFlags => 2,
            Violation::InvalidQoS => 3,
            Violation::StringTooLong => 4,
            Violation::BinaryTooLong => 5,
            Violation::EmptyTopic => 6,
            Violation::IncompleteWill => 7,
            Violation::PasswordWithoutUserName => 8,
            Violation::InvalidConnectFlags => 9,
            Violation::WillFlagsWithoutWill => 10,
            Violation::InvalidControlType => 11,
            Violation::NoTopics => 12,
            Violation::TooManyTopics => 13,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Violation::RemainingLengthTooLarge => "remaining length exceeds 268435455",
            Violation::InvalidFlags => "invalid fixed header flags",
            Violation::InvalidQoS => "invalid QoS level",
            Violation::StringTooLong => "string longer than 65535 bytes",
            Violation::BinaryTooLong => "binary field longer than 65535 bytes",
            Violation::EmptyTopic => "empty topic",
            Violation::IncompleteWill => "will topic and will message must be given together",
            Violation::PasswordWithoutUserName => "password given without user name",
            Violation::InvalidConnectFlags => "connect flags outside writable bits",
            Violation::WillFlagsWithoutWill => "will QoS or retain set without a will",
            Violation::InvalidControlType => "invalid control type for this packet",
            Violation::NoTopics => "no topics given",
            Violation::TooManyTopics => "more than 8 topics given",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An encoding failure.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The destination buffer cannot hold the complete packet.
    BufferTooSmall,
    /// The request breaks an MQTT v3.1.1 wire rule.
    ProtocolViolation(Violation),
}

impl Error {
    /// Returns `true` if a larger buffer would let the same request succeed.
    pub fn is_retriable(&self) -> bool {
        matches!(self, Error::BufferTooSmall)
    }

    /// The violation behind this error, if it is one.
    pub fn violation(&self) -> Option<Violation> {
        match self {
            Error::ProtocolViolation(v) => Some(*v),
            Error::BufferTooSmall => None,
        }
    }
}

impl From<Violation> for Error {
    fn from(v: Violation) -> Self {
        Error::ProtocolViolation(v)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BufferTooSmall => f.write_str("buffer too small"),
            Error::ProtocolViolation(v) => write!(f, "protocol violation: {}", v),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "defmt")]
impl defmt::Format for Violation {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::BufferTooSmall => defmt::write!(f, "BufferTooSmall"),
            Error::ProtocolViolation(v) => defmt::write!(f, "ProtocolViolation({})", v),
        }
    }
}

/// Collapse an encode result into the signed-size convention.
///
/// A positive value is the number of bytes written, `0` means the buffer was
/// too small, and a negative value is `-code` of the [`Violation`].
///
/// ```rust
/// use mqttpack::{Encode, PingReq, signed_size};
///
/// let mut buf = [0u8; 2];
/// assert_eq!(signed_size(PingReq.encode(&mut buf)), 2);
/// assert_eq!(signed_size(PingReq.encode(&mut buf[..1])), 0);
/// ```
pub fn signed_size(result: Result<usize>) -> isize {
    match result {
        Ok(n) => n as isize,
        Err(Error::BufferTooSmall) => 0,
        Err(Error::ProtocolViolation(v)) => -(v.code() as isize),
    }
}

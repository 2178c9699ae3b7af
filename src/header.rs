//! Fixed header and remaining-length encoding.
//!
//! Every MQTT control packet starts with a fixed header:
//!
//! ```text
//!  bit    7   6   5   4   3   2   1   0
//!       +---------------+---------------+
//! byte 1| control type  |     flags     |
//!       +---------------+---------------+
//! byte 2| remaining length (1-4 bytes)   |
//!  ...  |                               |
//!       +-------------------------------+
//! ```
//!
//! The remaining length counts the bytes after the fixed header. It is encoded
//! 7 bits at a time, least significant group first, with bit 7 set on every
//! byte except the last. Four bytes cap the value at 268,435,455.
//!
//! | Value range             | Bytes |
//! |-------------------------|-------|
//! | 0 - 127                 | 1     |
//! | 128 - 16,383            | 2     |
//! | 16,384 - 2,097,151      | 3     |
//! | 2,097,152 - 268,435,455 | 4     |

use crate::error::{Error, Result, Violation};
use crate::fields::Writer;

/// Largest value the remaining-length field can carry.
pub const MAX_REMAINING_LENGTH: usize = 268_435_455;

/// Longest possible fixed header: one control byte and four length bytes.
pub const MAX_FIXED_HEADER_LEN: usize = 5;

/// MQTT control packet types, as carried in bits 7-4 of the control byte.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ControlType {
    /// Client request to connect to a server.
    Connect = 1,
    /// Connect acknowledgment.
    ConnAck = 2,
    /// Publish message.
    Publish = 3,
    /// Publish acknowledgment (QoS 1).
    PubAck = 4,
    /// Publish received (QoS 2, part 1).
    PubRec = 5,
    /// Publish release (QoS 2, part 2).
    PubRel = 6,
    /// Publish complete (QoS 2, part 3).
    PubComp = 7,
    /// Subscribe request.
    Subscribe = 8,
    /// Subscribe acknowledgment.
    SubAck = 9,
    /// Unsubscribe request.
    Unsubscribe = 10,
    /// Unsubscribe acknowledgment.
    UnsubAck = 11,
    /// Ping request.
    PingReq = 12,
    /// Ping response.
    PingResp = 13,
    /// Client is disconnecting.
    Disconnect = 14,
}

impl ControlType {
    /// The flags value MQTT v3.1.1 mandates for this type.
    ///
    /// `None` for PUBLISH, whose flags carry dup, QoS and retain.
    pub const fn required_flags(self) -> Option<u8> {
        match self {
            ControlType::Publish => None,
            ControlType::PubRel | ControlType::Subscribe | ControlType::Unsubscribe => Some(0x02),
            _ => Some(0x00),
        }
    }
}

/// The control byte of a fixed header.
///
/// The remaining length is not stored here: it is always derived from the
/// packet body and supplied when the header is written.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FixedHeader {
    control_type: ControlType,
    flags: u8,
}

impl FixedHeader {
    /// Build a header, checking `flags` against the rules for `control_type`.
    ///
    /// # Errors
    ///
    /// * [`Violation::InvalidFlags`] - flags wider than 4 bits, or not the
    ///   value required for this type
    /// * [`Violation::InvalidQoS`] - a PUBLISH header with QoS 3
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mqttpack::{ControlType, FixedHeader};
    ///
    /// assert!(FixedHeader::new(ControlType::Subscribe, 0x02).is_ok());
    /// assert!(FixedHeader::new(ControlType::Subscribe, 0x00).is_err());
    /// assert!(FixedHeader::new(ControlType::Publish, 0x06).is_err());
    /// ```
    pub fn new(control_type: ControlType, flags: u8) -> Result<Self> {
        if flags > 0x0F {
            return Err(Violation::InvalidFlags.into());
        }
        match control_type.required_flags() {
            Some(required) if flags != required => return Err(Violation::InvalidFlags.into()),
            Some(_) => {}
            None => {
                if (flags >> 1) & 0x03 == 0x03 {
                    return Err(Violation::InvalidQoS.into());
                }
            }
        }
        Ok(Self {
            control_type,
            flags,
        })
    }

    /// The packet type.
    pub fn control_type(&self) -> ControlType {
        self.control_type
    }

    /// The 4-bit flags value.
    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// The first byte on the wire.
    pub fn control_byte(&self) -> u8 {
        ((self.control_type as u8) << 4) | self.flags
    }

    /// Total packet size for a body of `remaining_length` bytes.
    pub fn packet_len(&self, remaining_length: usize) -> Result<usize> {
        Ok(1 + remaining_length_len(remaining_length)? + remaining_length)
    }

    /// Write the fixed header for a body of `remaining_length` bytes.
    ///
    /// Returns the header size. The call fails with [`Error::BufferTooSmall`]
    /// unless `buf` can hold the header *and* the whole body, so a successful
    /// return guarantees the rest of the packet will fit.
    pub fn encode(&self, buf: &mut [u8], remaining_length: usize) -> Result<usize> {
        let total = self.packet_len(remaining_length)?;
        if buf.len() < total {
            return Err(Error::BufferTooSmall);
        }
        buf[0] = self.control_byte();
        let n = encode_remaining_length(&mut buf[1..], remaining_length)?;
        Ok(1 + n)
    }

    pub(crate) fn write(&self, writer: &mut Writer<'_>, remaining_length: usize) -> Result<()> {
        writer.put_with(|buf| self.encode(buf, remaining_length))
    }
}

/// Number of bytes needed to encode `value` as a remaining length.
///
/// # Errors
///
/// [`Violation::RemainingLengthTooLarge`] if `value` exceeds
/// [`MAX_REMAINING_LENGTH`].
pub fn remaining_length_len(value: usize) -> Result<usize> {
    match value {
        0..=127 => Ok(1),
        128..=16_383 => Ok(2),
        16_384..=2_097_151 => Ok(3),
        2_097_152..=MAX_REMAINING_LENGTH => Ok(4),
        _ => Err(Violation::RemainingLengthTooLarge.into()),
    }
}

/// Encode `value` as a remaining length into `buf`.
///
/// Returns the number of bytes written (1 to 4). Nothing is written when the
/// value is out of range or `buf` is too short.
///
/// ```rust
/// use mqttpack::header::encode_remaining_length;
///
/// let mut buf = [0u8; 4];
/// assert_eq!(encode_remaining_length(&mut buf, 321), Ok(2));
/// assert_eq!(&buf[..2], &[0xC1, 0x02]);
/// ```
pub fn encode_remaining_length(buf: &mut [u8], mut value: usize) -> Result<usize> {
    let len = remaining_length_len(value)?;
    if buf.len() < len {
        return Err(Error::BufferTooSmall);
    }
    for slot in buf.iter_mut().take(len) {
        let mut byte = (value % 128) as u8;
        value /= 128;
        if value > 0 {
            byte |= 0x80;
        }
        *slot = byte;
    }
    Ok(len)
}

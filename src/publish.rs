//! PUBLISH request.
//!
//! The variable header is the topic name, followed by a packet identifier only
//! when QoS is above 0. The application message runs to the end of the packet
//! with no length prefix of its own; its size is implied by the remaining
//! length.

use crate::encode::Encode;
use crate::error::{Result, Violation};
use crate::fields::{Writer, string_len};
use crate::header::{ControlType, FixedHeader, MAX_REMAINING_LENGTH};
use crate::qos::QoS;

/// Flags carried in the low nibble of a PUBLISH control byte.
///
/// # Examples
///
/// ```rust
/// use mqttpack::{PublishFlags, QoS};
///
/// let flags = PublishFlags { dup: true, qos: QoS::ExactlyOnce, retain: true };
/// assert_eq!(flags.bits(), 0x0D);
/// assert_eq!(PublishFlags::from_bits(0x0D), Ok(flags));
/// ```
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PublishFlags {
    /// This is a re-delivery of an earlier attempt.
    pub dup: bool,
    /// Delivery guarantee.
    pub qos: QoS,
    /// The broker should retain the message.
    pub retain: bool,
}

impl PublishFlags {
    /// Duplicate delivery bit.
    pub const DUP: u8 = 0x08;
    /// Two-bit QoS field.
    pub const QOS_MASK: u8 = 0x06;
    /// Retain bit.
    pub const RETAIN: u8 = 0x01;

    /// The 4-bit flags value.
    pub fn bits(&self) -> u8 {
        let mut bits = (self.qos as u8) << 1;
        if self.dup {
            bits |= Self::DUP;
        }
        if self.retain {
            bits |= Self::RETAIN;
        }
        bits
    }

    /// Parse a raw 4-bit flags value.
    ///
    /// # Errors
    ///
    /// * [`Violation::InvalidFlags`] - bits above the low nibble are set
    /// * [`Violation::InvalidQoS`] - the QoS field is 3
    pub fn from_bits(bits: u8) -> Result<Self> {
        if bits > 0x0F {
            return Err(Violation::InvalidFlags.into());
        }
        Ok(Self {
            dup: bits & Self::DUP != 0,
            qos: QoS::try_from((bits & Self::QOS_MASK) >> 1)?,
            retain: bits & Self::RETAIN != 0,
        })
    }
}

/// A PUBLISH request.
///
/// The packet identifier is written only when `flags.qos` is above 0. Keeping
/// it consistent with the chosen QoS is up to the caller.
///
/// # Examples
///
/// ```rust
/// use mqttpack::{Encode, Publish, QoS};
///
/// let publish = Publish::new("a/b", b"hi").with_qos(QoS::AtLeastOnce, 10);
/// let mut buf = [0u8; 16];
/// let n = publish.encode(&mut buf).unwrap();
/// assert_eq!(&buf[..n], &[0x32, 9, 0, 3, b'a', b'/', b'b', 0, 10, b'h', b'i']);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Publish<'a> {
    /// Topic the message is published to. Must not be empty.
    pub topic_name: &'a str,
    /// Packet identifier, used for QoS 1 and 2 only.
    pub packet_id: u16,
    /// The application message. May be empty.
    pub message: &'a [u8],
    /// Dup, QoS and retain.
    pub flags: PublishFlags,
}

impl<'a> Publish<'a> {
    /// A QoS 0, non-retained publish.
    pub fn new(topic_name: &'a str, message: &'a [u8]) -> Self {
        Self {
            topic_name,
            packet_id: 0,
            message,
            flags: PublishFlags::default(),
        }
    }

    /// Set the QoS level and the packet identifier that goes with it.
    pub fn with_qos(mut self, qos: QoS, packet_id: u16) -> Self {
        self.flags.qos = qos;
        self.packet_id = packet_id;
        self
    }

    /// Ask the broker to retain the message.
    pub fn retained(mut self) -> Self {
        self.flags.retain = true;
        self
    }

    /// Mark the packet as a re-delivery.
    pub fn duplicate(mut self) -> Self {
        self.flags.dup = true;
        self
    }
}

impl Encode for Publish<'_> {
    fn validate(&self) -> Result<()> {
        if self.topic_name.is_empty() {
            return Err(Violation::EmptyTopic.into());
        }
        Ok(())
    }

    fn fixed_header(&self) -> Result<FixedHeader> {
        FixedHeader::new(ControlType::Publish, self.flags.bits())
    }

    fn remaining_length(&self) -> Result<usize> {
        let mut len = string_len(self.topic_name)?;
        if self.flags.qos.needs_packet_id() {
            len += 2;
        }
        len.checked_add(self.message.len())
            .filter(|len| *len <= MAX_REMAINING_LENGTH)
            .ok_or_else(|| Violation::RemainingLengthTooLarge.into())
    }

    fn encode_body(&self, writer: &mut Writer<'_>) -> Result<()> {
        writer.put_str(self.topic_name)?;
        if self.flags.qos.needs_packet_id() {
            writer.put_u16(self.packet_id)?;
        }
        writer.put_slice(self.message)
    }
}

//! PUBACK, PUBREC, PUBREL and PUBCOMP.
//!
//! All four share one layout: a fixed header with a remaining length of 2,
//! then the packet identifier being acknowledged. PUBREL is the only one with
//! non-zero flags (0x02).

use crate::encode::Encode;
use crate::error::{Result, Violation};
use crate::fields::Writer;
use crate::header::{ControlType, FixedHeader};

/// An acknowledgement in the QoS 1 / QoS 2 publish handshake.
///
/// # Examples
///
/// ```rust
/// use mqttpack::{Ack, ControlType, Encode};
///
/// let mut buf = [0u8; 4];
/// Ack::new(ControlType::PubRel, 0x1234).encode(&mut buf).unwrap();
/// assert_eq!(buf, [0x62, 0x02, 0x12, 0x34]);
///
/// assert!(Ack::new(ControlType::Connect, 1).encode(&mut buf).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ack {
    /// One of PUBACK, PUBREC, PUBREL or PUBCOMP.
    pub control_type: ControlType,
    /// Identifier of the packet being acknowledged.
    pub packet_id: u16,
}

impl Ack {
    /// An acknowledgement of `control_type` for `packet_id`.
    ///
    /// The type is checked when the packet is encoded.
    pub fn new(control_type: ControlType, packet_id: u16) -> Self {
        Self {
            control_type,
            packet_id,
        }
    }

    /// A PUBACK for `packet_id`.
    pub fn puback(packet_id: u16) -> Self {
        Self::new(ControlType::PubAck, packet_id)
    }

    /// A PUBREC for `packet_id`.
    pub fn pubrec(packet_id: u16) -> Self {
        Self::new(ControlType::PubRec, packet_id)
    }

    /// A PUBREL for `packet_id`.
    pub fn pubrel(packet_id: u16) -> Self {
        Self::new(ControlType::PubRel, packet_id)
    }

    /// A PUBCOMP for `packet_id`.
    pub fn pubcomp(packet_id: u16) -> Self {
        Self::new(ControlType::PubComp, packet_id)
    }
}

impl Encode for Ack {
    fn validate(&self) -> Result<()> {
        match self.control_type {
            ControlType::PubAck
            | ControlType::PubRec
            | ControlType::PubRel
            | ControlType::PubComp => Ok(()),
            _ => Err(Violation::InvalidControlType.into()),
        }
    }

    fn fixed_header(&self) -> Result<FixedHeader> {
        let flags = self
            .control_type
            .required_flags()
            .ok_or(Violation::InvalidControlType)?;
        FixedHeader::new(self.control_type, flags)
    }

    fn remaining_length(&self) -> Result<usize> {
        Ok(2)
    }

    fn encode_body(&self, writer: &mut Writer<'_>) -> Result<()> {
        writer.put_u16(self.packet_id)
    }
}

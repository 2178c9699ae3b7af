//! Quality of Service levels.

use crate::error::{Error, Violation};

/// Quality of Service levels for MQTT messages.
///
/// QoS defines the delivery guarantee for a message. Anything above
/// QoS 0 needs a packet identifier on the wire.
///
/// # Examples
///
/// ```rust
/// use mqttpack::QoS;
///
/// assert_eq!(QoS::AtMostOnce as u8, 0);
/// assert_eq!(QoS::try_from(2), Ok(QoS::ExactlyOnce));
/// assert!(QoS::try_from(3).is_err());
/// ```
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum QoS {
    /// **QoS 0**: At most once delivery.
    #[default]
    AtMostOnce = 0,
    /// **QoS 1**: At least once delivery.
    AtLeastOnce = 1,
    /// **QoS 2**: Exactly once delivery.
    ExactlyOnce = 2,
}

impl QoS {
    /// Returns `true` if messages at this level carry a packet identifier.
    pub fn needs_packet_id(self) -> bool {
        self != QoS::AtMostOnce
    }
}

impl TryFrom<u8> for QoS {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(QoS::AtMostOnce),
            1 => Ok(QoS::AtLeastOnce),
            2 => Ok(QoS::ExactlyOnce),
            _ => Err(Violation::InvalidQoS.into()),
        }
    }
}

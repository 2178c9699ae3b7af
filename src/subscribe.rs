//! SUBSCRIBE and UNSUBSCRIBE requests.
//!
//! Both carry a packet identifier followed by a list of topic filters, and
//! both use the fixed flags value 0x02. A SUBSCRIBE entry adds one byte for
//! the requested maximum QoS. Entries go on the wire in the order given; the
//! broker's SUBACK return codes are matched against that order.

use crate::encode::Encode;
use crate::error::{Result, Violation};
use crate::fields::{Writer, string_len};
use crate::header::{ControlType, FixedHeader};
use crate::qos::QoS;
use heapless::Vec;

/// Most topics a single SUBSCRIBE or UNSUBSCRIBE may carry.
pub const MAX_TOPICS: usize = 8;

/// A topic filter and the maximum QoS to receive it at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Subscription<'a> {
    /// The topic filter, wildcards allowed.
    pub topic_filter: &'a str,
    /// Highest QoS the broker may use when forwarding matches.
    pub max_qos: QoS,
}

impl<'a> Subscription<'a> {
    /// Subscribe to `topic_filter` at up to `max_qos`.
    pub fn new(topic_filter: &'a str, max_qos: QoS) -> Self {
        Self {
            topic_filter,
            max_qos,
        }
    }
}

/// A bounded list of subscriptions, sized for one SUBSCRIBE.
pub type SubscriptionList<'a> = Vec<Subscription<'a>, MAX_TOPICS>;

/// A bounded list of topic filters, sized for one UNSUBSCRIBE.
pub type TopicList<'a> = Vec<&'a str, MAX_TOPICS>;

fn check_count(count: usize) -> Result<()> {
    match count {
        0 => Err(Violation::NoTopics.into()),
        1..=MAX_TOPICS => Ok(()),
        _ => Err(Violation::TooManyTopics.into()),
    }
}

fn filter_len(topic_filter: &str) -> Result<usize> {
    if topic_filter.is_empty() {
        return Err(Violation::EmptyTopic.into());
    }
    string_len(topic_filter)
}

/// A SUBSCRIBE request.
///
/// # Examples
///
/// ```rust
/// use mqttpack::{Encode, QoS, Subscribe, Subscription};
///
/// let topics = [
///     Subscription::new("sensors/+/temperature", QoS::AtLeastOnce),
///     Subscription::new("commands/#", QoS::ExactlyOnce),
/// ];
/// let mut buf = [0u8; 64];
/// let n = Subscribe::new(42, &topics).encode(&mut buf).unwrap();
/// assert_eq!(buf[0], 0x82);
/// assert_eq!(n, 2 + 2 + (2 + 21 + 1) + (2 + 10 + 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Subscribe<'a> {
    /// Packet identifier echoed back in the SUBACK.
    pub packet_id: u16,
    /// One to eight subscriptions, in wire order.
    pub subscriptions: &'a [Subscription<'a>],
}

impl<'a> Subscribe<'a> {
    /// Subscribe to `subscriptions` under `packet_id`.
    pub fn new(packet_id: u16, subscriptions: &'a [Subscription<'a>]) -> Self {
        Self {
            packet_id,
            subscriptions,
        }
    }
}

impl Encode for Subscribe<'_> {
    fn validate(&self) -> Result<()> {
        check_count(self.subscriptions.len())
    }

    fn fixed_header(&self) -> Result<FixedHeader> {
        FixedHeader::new(ControlType::Subscribe, 0x02)
    }

    fn remaining_length(&self) -> Result<usize> {
        self.subscriptions
            .iter()
            .try_fold(2, |len, sub| -> Result<usize> {
                Ok(len + filter_len(sub.topic_filter)? + 1)
            })
    }

    fn encode_body(&self, writer: &mut Writer<'_>) -> Result<()> {
        writer.put_u16(self.packet_id)?;
        for sub in self.subscriptions {
            writer.put_str(sub.topic_filter)?;
            writer.put_u8(sub.max_qos as u8)?;
        }
        Ok(())
    }
}

/// An UNSUBSCRIBE request.
///
/// # Examples
///
/// ```rust
/// use mqttpack::{Encode, Unsubscribe};
///
/// let mut buf = [0u8; 16];
/// let n = Unsubscribe::new(7, &["a/b"]).encode(&mut buf).unwrap();
/// assert_eq!(&buf[..n], &[0xA2, 7, 0, 7, 0, 3, b'a', b'/', b'b']);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Unsubscribe<'a> {
    /// Packet identifier echoed back in the UNSUBACK.
    pub packet_id: u16,
    /// One to eight topic filters, in wire order.
    pub topic_filters: &'a [&'a str],
}

impl<'a> Unsubscribe<'a> {
    /// Unsubscribe from `topic_filters` under `packet_id`.
    pub fn new(packet_id: u16, topic_filters: &'a [&'a str]) -> Self {
        Self {
            packet_id,
            topic_filters,
        }
    }
}

impl Encode for Unsubscribe<'_> {
    fn validate(&self) -> Result<()> {
        check_count(self.topic_filters.len())
    }

    fn fixed_header(&self) -> Result<FixedHeader> {
        FixedHeader::new(ControlType::Unsubscribe, 0x02)
    }

    fn remaining_length(&self) -> Result<usize> {
        self.topic_filters
            .iter()
            .try_fold(2, |len, filter| -> Result<usize> {
                Ok(len + filter_len(filter)?)
            })
    }

    fn encode_body(&self, writer: &mut Writer<'_>) -> Result<()> {
        writer.put_u16(self.packet_id)?;
        for filter in self.topic_filters {
            writer.put_str(filter)?;
        }
        Ok(())
    }
}

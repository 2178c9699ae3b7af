//! # mqttpack - MQTT v3.1.1 request encoder
//!
//! Packs MQTT v3.1.1 client requests into caller-owned byte buffers. There is
//! no network I/O, no session state and no allocation: give the encoder a
//! request and a buffer, and it either writes the complete packet or tells you
//! why it could not.
//!
//! ## Supported packets
//!
//! - **CONNECT** ([`Connect`]) with will, user name and password
//! - **PUBLISH** ([`Publish`]) at QoS 0, 1 and 2
//! - **PUBACK / PUBREC / PUBREL / PUBCOMP** ([`Ack`])
//! - **SUBSCRIBE / UNSUBSCRIBE** ([`Subscribe`], [`Unsubscribe`]), up to 8 topics
//! - **PINGREQ / DISCONNECT** ([`PingReq`], [`Disconnect`])
//!
//! ## Outcomes
//!
//! Every encoder returns [`Result<usize>`](Result):
//!
//! - `Ok(n)`: `n` bytes of `buf` now hold the packet.
//! - `Err(Error::BufferTooSmall)`: retry with a bigger buffer.
//!   [`Encode::encoded_len`] tells you exactly how big.
//! - `Err(Error::ProtocolViolation(_))`: the request is not a legal packet.
//!
//! On any error the buffer is left untouched. [`signed_size`] folds the
//! result into a single `isize` for callers that prefer a C-style contract.
//!
//! ## Usage
//!
//! ```rust
//! use mqttpack::{Connect, ConnectFlags, Encode, Error, Publish, QoS};
//!
//! let mut buf = [0u8; 256];
//!
//! let connect = Connect::new("weather_station")
//!     .with_flags(ConnectFlags::new().clean_session())
//!     .with_keep_alive(60);
//! let n = connect.encode(&mut buf).unwrap();
//! // transport.write(&buf[..n])?;
//! # assert_eq!(n, 29);
//!
//! let publish = Publish::new("sensors/temperature", b"23.5").with_qos(QoS::AtLeastOnce, 1);
//! let n = publish.encode(&mut buf).unwrap();
//! // transport.write(&buf[..n])?;
//! # assert_eq!(n, 29);
//!
//! let mut tiny = [0u8; 4];
//! assert_eq!(publish.encode(&mut tiny), Err(Error::BufferTooSmall));
//! ```
//!
//! ## Argument classes
//!
//! Required inputs (client identifier, topic names, messages) are plain
//! references and cannot be missing. Optional inputs are `Option`s where
//! `None` means the field is absent from the packet. Nothing in this crate
//! panics on caller input.
//!
//! ## Optional Features
//!
//! - `std`: implement `std::error::Error` for [`Error`]
//! - `defmt`: `defmt::Format` for public types, plus trace/debug records for
//!   every encode call

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

mod ack;
mod connect;
mod control;
mod encode;
mod publish;
mod qos;
mod request;
mod subscribe;

/// Loading CONNECT settings from JSON.
pub mod config;

/// Encoding errors and the signed-size convention.
pub mod error;

/// Primitive field encoders: integers, strings and binary data.
pub mod fields;

/// Fixed header and remaining-length encoding.
pub mod header;

pub use ack::Ack;
pub use connect::{Connect, ConnectFlags, PROTOCOL_LEVEL, PROTOCOL_NAME};
pub use control::{Disconnect, PingReq};
pub use encode::Encode;
pub use error::{Error, Result, Violation, signed_size};
pub use header::{ControlType, FixedHeader, MAX_REMAINING_LENGTH};
pub use publish::{Publish, PublishFlags};
pub use qos::QoS;
pub use request::Request;
pub use subscribe::{MAX_TOPICS, Subscribe, SubscriptionList, Subscription, TopicList, Unsubscribe};

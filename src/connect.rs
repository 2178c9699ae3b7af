//! CONNECT request.
//!
//! The first packet a client sends. Its variable header is always ten bytes:
//!
//! ```text
//! 00 04 'M' 'Q' 'T' 'T'   protocol name
//! 04                      protocol level (3.1.1)
//! flags                   connect flags
//! keep-alive (2 bytes)
//! ```
//!
//! The payload follows in a fixed order: client identifier, will topic, will
//! message, user name, password. Absent optional fields are skipped entirely.

use crate::encode::Encode;
use crate::error::{Result, Violation};
use crate::fields::{Writer, binary_len, string_len};
use crate::header::{ControlType, FixedHeader};
use crate::qos::QoS;

/// Protocol name carried in every CONNECT variable header.
pub const PROTOCOL_NAME: &str = "MQTT";
/// MQTT protocol level for version 3.1.1.
pub const PROTOCOL_LEVEL: u8 = 4;

const VARIABLE_HEADER_LEN: usize = 10;

/// The connect flags byte.
///
/// Only clean session, will QoS and will retain are caller-writable. The
/// will, user name and password presence bits are derived from the request
/// when it is encoded, and the reserved bit is always zero.
///
/// # Examples
///
/// ```rust
/// use mqttpack::{ConnectFlags, QoS};
///
/// let flags = ConnectFlags::new()
///     .clean_session()
///     .will_qos(QoS::AtLeastOnce)
///     .will_retain();
/// assert_eq!(flags.bits(), 0x02 | 0x08 | 0x20);
/// ```
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnectFlags(u8);

impl ConnectFlags {
    /// Reserved bit; must be zero.
    pub const RESERVED: u8 = 0x01;
    /// Discard any previous session state.
    pub const CLEAN_SESSION: u8 = 0x02;
    /// A will topic and message are present. Derived.
    pub const WILL_FLAG: u8 = 0x04;
    /// Two-bit will QoS field.
    pub const WILL_QOS_MASK: u8 = 0x18;
    /// Retain the will message.
    pub const WILL_RETAIN: u8 = 0x20;
    /// A password is present. Derived.
    pub const PASSWORD: u8 = 0x40;
    /// A user name is present. Derived.
    pub const USER_NAME: u8 = 0x80;
    /// Bits a caller may set.
    pub const WRITABLE: u8 = Self::CLEAN_SESSION | Self::WILL_QOS_MASK | Self::WILL_RETAIN;

    /// No flags: persistent session, will at QoS 0, will not retained.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Take a raw flags byte as-is. It is checked when the request is encoded.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// The raw caller-supplied bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Request a clean session.
    pub const fn clean_session(self) -> Self {
        Self(self.0 | Self::CLEAN_SESSION)
    }

    /// Publish the will at `qos`.
    pub const fn will_qos(self, qos: QoS) -> Self {
        Self((self.0 & !Self::WILL_QOS_MASK) | ((qos as u8) << 3))
    }

    /// Retain the will message.
    pub const fn will_retain(self) -> Self {
        Self(self.0 | Self::WILL_RETAIN)
    }

    /// Whether a clean session is requested.
    pub const fn is_clean_session(self) -> bool {
        self.0 & Self::CLEAN_SESSION != 0
    }

    fn validate(self, has_will: bool) -> Result<()> {
        if self.0 & !Self::WRITABLE != 0 {
            return Err(Violation::InvalidConnectFlags.into());
        }
        if (self.0 & Self::WILL_QOS_MASK) >> 3 == 0x03 {
            return Err(Violation::InvalidQoS.into());
        }
        if !has_will && self.0 & (Self::WILL_QOS_MASK | Self::WILL_RETAIN) != 0 {
            return Err(Violation::WillFlagsWithoutWill.into());
        }
        Ok(())
    }
}

/// A CONNECT request.
///
/// # Examples
///
/// ```rust
/// use mqttpack::{Connect, ConnectFlags, Encode, QoS};
///
/// let connect = Connect::new("sensor_node_1")
///     .with_flags(ConnectFlags::new().clean_session().will_qos(QoS::AtLeastOnce))
///     .with_will("devices/sensor_node_1/status", b"offline")
///     .with_keep_alive(120);
///
/// let mut buf = [0u8; 128];
/// let n = connect.encode(&mut buf).unwrap();
/// assert_eq!(buf[0], 0x10);
/// assert_eq!(&buf[4..8], b"MQTT");
/// assert_eq!(buf[9], 0x02 | 0x04 | 0x08);
/// # assert_eq!(n, connect.encoded_len().unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Connect<'a> {
    /// The client identifier.
    ///
    /// May be empty. A broker only accepts an empty identifier together with
    /// a clean session, but that is its decision to make.
    pub client_id: &'a str,
    /// Topic the will message is published under. Requires `will_message`.
    pub will_topic: Option<&'a str>,
    /// Will message. Requires `will_topic`.
    pub will_message: Option<&'a [u8]>,
    /// User name for authentication.
    pub user_name: Option<&'a str>,
    /// Password for authentication. Requires `user_name`.
    pub password: Option<&'a [u8]>,
    /// Caller-writable connect flags.
    pub flags: ConnectFlags,
    /// Keep-alive interval in seconds; 0 disables keep-alive.
    pub keep_alive: u16,
}

impl<'a> Connect<'a> {
    /// A request with only a client identifier and no keep-alive.
    pub fn new(client_id: &'a str) -> Self {
        Self {
            client_id,
            will_topic: None,
            will_message: None,
            user_name: None,
            password: None,
            flags: ConnectFlags::new(),
            keep_alive: 0,
        }
    }

    /// Set the caller-writable flags.
    pub fn with_flags(mut self, flags: ConnectFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the keep-alive interval in seconds.
    pub fn with_keep_alive(mut self, seconds: u16) -> Self {
        self.keep_alive = seconds;
        self
    }

    /// Attach a will.
    pub fn with_will(mut self, topic: &'a str, message: &'a [u8]) -> Self {
        self.will_topic = Some(topic);
        self.will_message = Some(message);
        self
    }

    /// Attach a user name and optional password.
    pub fn with_credentials(mut self, user_name: &'a str, password: Option<&'a [u8]>) -> Self {
        self.user_name = Some(user_name);
        self.password = password;
        self
    }

    /// The flags byte as it goes on the wire, presence bits included.
    pub fn wire_flags(&self) -> Result<u8> {
        self.validate()?;
        let mut bits = self.flags.bits();
        if self.will_topic.is_some() {
            bits |= ConnectFlags::WILL_FLAG;
        }
        if self.user_name.is_some() {
            bits |= ConnectFlags::USER_NAME;
        }
        if self.password.is_some() {
            bits |= ConnectFlags::PASSWORD;
        }
        Ok(bits)
    }

    fn payload_len(&self) -> Result<usize> {
        let mut len = string_len(self.client_id)?;
        if let (Some(topic), Some(message)) = (self.will_topic, self.will_message) {
            len += string_len(topic)? + binary_len(message)?;
        }
        if let Some(user_name) = self.user_name {
            len += string_len(user_name)?;
        }
        if let Some(password) = self.password {
            len += binary_len(password)?;
        }
        Ok(len)
    }
}

impl Encode for Connect<'_> {
    fn validate(&self) -> Result<()> {
        if self.will_topic.is_some() != self.will_message.is_some() {
            return Err(Violation::IncompleteWill.into());
        }
        if self.password.is_some() && self.user_name.is_none() {
            return Err(Violation::PasswordWithoutUserName.into());
        }
        self.flags.validate(self.will_topic.is_some())
    }

    fn fixed_header(&self) -> Result<FixedHeader> {
        FixedHeader::new(ControlType::Connect, 0)
    }

    fn remaining_length(&self) -> Result<usize> {
        Ok(VARIABLE_HEADER_LEN + self.payload_len()?)
    }

    fn encode_body(&self, writer: &mut Writer<'_>) -> Result<()> {
        writer.put_str(PROTOCOL_NAME)?;
        writer.put_u8(PROTOCOL_LEVEL)?;
        writer.put_u8(self.wire_flags()?)?;
        writer.put_u16(self.keep_alive)?;

        writer.put_str(self.client_id)?;
        if let (Some(topic), Some(message)) = (self.will_topic, self.will_message) {
            writer.put_str(topic)?;
            writer.put_binary(message)?;
        }
        if let Some(user_name) = self.user_name {
            writer.put_str(user_name)?;
        }
        if let Some(password) = self.password {
            writer.put_binary(password)?;
        }
        Ok(())
    }
}

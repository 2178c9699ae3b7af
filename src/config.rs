//! CONNECT settings loaded from JSON.
//!
//! Devices usually ship their broker credentials and will configuration as a
//! small JSON document in flash. [`ConnectConfig`] deserializes that document
//! without allocating (strings borrow from the input) and turns it into a
//! [`Connect`] request.
//!
//! ```json
//! {
//!   "client_id": "sensor_node_1",
//!   "keep_alive": 120,
//!   "clean_session": true,
//!   "will": { "topic": "devices/sensor_node_1/status", "message": "offline", "qos": 1 },
//!   "user_name": "device",
//!   "password": "secret"
//! }
//! ```

use crate::connect::{Connect, ConnectFlags};
use crate::error::Result;
use crate::qos::QoS;
use serde::Deserialize;

/// Keep-alive used when the document does not set one.
pub const DEFAULT_KEEP_ALIVE: u16 = 60;

/// Errors that can occur while loading a configuration document.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ConfigError {
    /// The document is not valid JSON or does not match the expected shape.
    Parse,
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ConfigError::Parse => defmt::write!(f, "Parse"),
        }
    }
}

fn default_keep_alive() -> u16 {
    DEFAULT_KEEP_ALIVE
}

fn default_clean_session() -> bool {
    true
}

/// Will settings inside a [`ConnectConfig`].
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct WillConfig<'a> {
    /// Topic the will is published to.
    #[serde(borrow)]
    pub topic: &'a str,
    /// Will message text.
    #[serde(borrow)]
    pub message: &'a str,
    /// Will QoS, 0 to 2.
    #[serde(default)]
    pub qos: u8,
    /// Retain the will message.
    #[serde(default)]
    pub retain: bool,
}

/// CONNECT settings as stored on the device.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ConnectConfig<'a> {
    /// The client identifier.
    #[serde(borrow)]
    pub client_id: &'a str,
    /// Keep-alive interval in seconds.
    #[serde(default = "default_keep_alive")]
    pub keep_alive: u16,
    /// Whether to request a clean session.
    #[serde(default = "default_clean_session")]
    pub clean_session: bool,
    /// Optional will.
    #[serde(borrow, default)]
    pub will: Option<WillConfig<'a>>,
    /// Optional user name.
    #[serde(borrow, default)]
    pub user_name: Option<&'a str>,
    /// Optional password.
    #[serde(borrow, default)]
    pub password: Option<&'a str>,
}

impl<'a> ConnectConfig<'a> {
    /// Parse a configuration document.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mqttpack::config::ConnectConfig;
    ///
    /// let config = ConnectConfig::from_json(r#"{"client_id":"node-7"}"#).unwrap();
    /// assert_eq!(config.client_id, "node-7");
    /// assert_eq!(config.keep_alive, 60);
    /// assert!(config.clean_session);
    /// ```
    pub fn from_json(json: &'a str) -> core::result::Result<Self, ConfigError> {
        let (config, _) = serde_json_core::from_str(json).map_err(|_| ConfigError::Parse)?;
        Ok(config)
    }

    /// Build the CONNECT request these settings describe.
    ///
    /// # Errors
    ///
    /// [`Violation::InvalidQoS`](crate::Violation::InvalidQoS) if the will QoS
    /// is above 2. All other checks happen when the request is encoded.
    pub fn to_connect(&self) -> Result<Connect<'a>> {
        let mut flags = ConnectFlags::new();
        if self.clean_session {
            flags = flags.clean_session();
        }

        let mut connect = Connect::new(self.client_id).with_keep_alive(self.keep_alive);
        if let Some(will) = &self.will {
            flags = flags.will_qos(QoS::try_from(will.qos)?);
            if will.retain {
                flags = flags.will_retain();
            }
            connect = connect.with_will(will.topic, will.message.as_bytes());
        }
        connect.user_name = self.user_name;
        connect.password = self.password.map(str::as_bytes);
        Ok(connect.with_flags(flags))
    }
}

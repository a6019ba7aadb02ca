//! Loading a session identity from JSON.

use std::path::Path;

use osistack_protocol::Credentials;
use osistack_session::SessionConfig;
use osistack_transport::Port;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Identity and port a session is built from.
///
/// ```json
/// { "user": "abcd", "pass": "1234", "port": 7 }
/// ```
///
/// `port` defaults to 0 when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityConfig {
    pub user: String,
    pub pass: String,
    #[serde(default)]
    pub port: u8,
}

impl IdentityConfig {
    /// Parses and validates a JSON document.
    ///
    /// # Errors
    /// [`ConfigError::Parse`] for malformed JSON,
    /// [`ConfigError::EmptyUser`] for an empty user name.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON file.
    ///
    /// # Errors
    /// [`ConfigError::Read`] if the file cannot be read, plus everything
    /// [`from_json_str`](Self::from_json_str) returns.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| {
            ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), port = config.port, "identity loaded");
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.user.is_empty() {
            return Err(ConfigError::EmptyUser);
        }
        Ok(())
    }

    /// Splits into the pieces [`Session::new`](osistack_session::Session::new)
    /// takes. The login callback is left at its no-op default.
    pub fn into_parts(self) -> (Credentials, SessionConfig) {
        let config = SessionConfig::default().with_port(Port(self.port));
        (Credentials::new(self.user, self.pass), config)
    }
}

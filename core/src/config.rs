//! Client configuration, usually shipped with the application branding.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::session::ConnectionValidator;

pub const DEFAULT_ACCOUNT_TYPE: &str = "owncloud";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings used by the [`ClientManager`](crate::ClientManager) when it builds sessions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Only accounts of this type are considered when resolving the current account.
    pub account_type: String,
    pub connection_validator: ConnectionValidator,
    pub connect_timeout_secs: u64,
    /// Upper bound for a whole request, response body included.
    pub request_timeout_secs: u64,
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            account_type: DEFAULT_ACCOUNT_TYPE.to_string(),
            connection_validator: ConnectionValidator::default(),
            connect_timeout_secs: 10,
            request_timeout_secs: 60,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

//! Client configuration, loaded once at startup.

use std::path::Path;

use infinite_core::{ConfigError, ConfigResult};
use infinite_shared::STANDING_EYE_HEIGHT;
use serde::{Deserialize, Serialize};

/// Client facade configuration.
///
/// Every field is optional in TOML; missing ones keep their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Event channel capacity.
    pub event_capacity: usize,
    /// Eye height used when the host reports none.
    pub eye_height: f64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            event_capacity: 1024,
            eye_height: STANDING_EYE_HEIGHT,
        }
    }
}

impl ClientConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML or mistyped fields.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`ClientConfig::from_toml_str`].
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

//! # Registry Error Types
//!
//! Errors exist only at the configuration-tooling boundary. Decision points
//! never see them: every read path degrades to a default instead.

use std::path::PathBuf;

use thiserror::Error;

use crate::setting::SettingType;

/// A value was rejected by a setting.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingError {
    /// The value has a different variant than the setting.
    #[error("setting {setting}: expected {expected} value, got {found}")]
    TypeMismatch {
        /// Setting name.
        setting: String,
        /// Variant the setting holds.
        expected: SettingType,
        /// What was supplied.
        found: String,
    },

    /// A number fell outside the setting's bounds.
    #[error("setting {setting}: {value} is outside {min}..={max}")]
    OutOfRange {
        /// Setting name.
        setting: String,
        /// Rejected value.
        value: String,
        /// Lower bound.
        min: String,
        /// Upper bound.
        max: String,
    },

    /// A float was NaN or infinite.
    #[error("setting {setting}: value is not a finite number")]
    NotFinite {
        /// Setting name.
        setting: String,
    },

    /// A choice value is not among the allowed options.
    #[error("setting {setting}: {value:?} is not one of {options:?}")]
    UnknownOption {
        /// Setting name.
        setting: String,
        /// Rejected value.
        value: String,
        /// Allowed options.
        options: Vec<String>,
    },
}

/// Errors from registry mutation and tooling lookups.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// No feature is registered under this id.
    #[error("unknown feature: {0}")]
    UnknownFeature(String),

    /// The feature has no setting with this name.
    #[error("feature {feature} has no setting {setting}")]
    UnknownSetting {
        /// Feature id.
        feature: String,
        /// Setting name.
        setting: String,
    },

    /// A feature with this id is already registered.
    #[error("feature already registered: {0}")]
    DuplicateFeature(String),

    /// Two settings of one feature share a name.
    #[error("feature {feature} declares setting {setting} twice")]
    DuplicateSetting {
        /// Feature id.
        feature: String,
        /// Setting name.
        setting: String,
    },

    /// The setting rejected the value.
    #[error("feature {feature}: {source}")]
    InvalidValue {
        /// Feature id.
        feature: String,
        /// Why the value was rejected.
        #[source]
        source: SettingError,
    },
}

/// Errors while reading or writing profiles.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The document is not valid TOML or does not match the profile shape.
    #[error("invalid profile: {0}")]
    Parse(#[from] toml::de::Error),

    /// The profile could not be rendered as TOML.
    #[error("cannot serialize profile: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The profile file could not be read or written.
    #[error("profile io {}: {source}", .path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for setting validation.
pub type SettingResult<T> = Result<T, SettingError>;

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Result type for profile operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

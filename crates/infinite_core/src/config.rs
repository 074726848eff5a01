//! # Profiles
//!
//! TOML persistence of feature enablement and setting values.
//!
//! ```toml
//! [features.XRay]
//! enabled = true
//! [features.XRay.settings]
//! Opacity = 0.4
//! BlockList = ["diamond_ore", "ancient_debris"]
//! ```
//!
//! Loading is the one place where a stringly-typed value meets a typed
//! setting. Bad entries never abort a load: they are skipped, logged and
//! returned in the [`ProfileReport`].

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, RegistryError, SettingError};
use crate::registry::{FeatureRegistry, FeatureSnapshot, ToggleOutcome};
use crate::setting::{SettingType, SettingValue};

/// A persisted set of feature states.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Feature id -> persisted state.
    #[serde(default)]
    pub features: BTreeMap<String, FeatureProfile>,
}

/// Persisted state of one feature. Absent fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureProfile {
    /// Desired enablement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Setting name -> raw value.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub settings: BTreeMap<String, toml::Value>,
}

impl Profile {
    /// Parses a profile document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] if the text is not a valid profile.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a profile file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`Profile::from_toml_str`].
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let profile = Self::from_toml_str(&text)?;
        tracing::info!(path = %path.display(), features = profile.features.len(), "profile loaded");
        Ok(profile)
    }

    /// Renders the profile as TOML.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Serialize`] if a value cannot be represented.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Writes the profile to a file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] on write failure, otherwise as
    /// [`Profile::to_toml_string`].
    pub fn write_to(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        let text = self.to_toml_string()?;
        std::fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Builds a profile from a registry snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &[FeatureSnapshot]) -> Self {
        let features = snapshot
            .iter()
            .map(|feature| {
                let settings = feature
                    .settings
                    .iter()
                    .map(|(name, value)| (name.clone(), to_toml(value)))
                    .collect();
                (
                    feature.id.clone(),
                    FeatureProfile {
                        enabled: Some(feature.enabled),
                        settings,
                    },
                )
            })
            .collect();
        Self { features }
    }
}

/// One skipped profile entry.
#[derive(Clone, Debug, PartialEq)]
pub struct ProfileIssue {
    /// Feature id as written in the profile.
    pub feature: String,
    /// Setting name, when the issue concerns a setting.
    pub setting: Option<String>,
    /// Why the entry was skipped.
    pub error: RegistryError,
}

/// Result of applying a profile.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileReport {
    /// Enablement changes, including cascades.
    pub toggles: ToggleOutcome,
    /// Number of settings whose value changed.
    pub settings_changed: usize,
    /// Entries that were skipped.
    pub issues: Vec<ProfileIssue>,
}

impl ProfileReport {
    /// Whether every entry applied cleanly.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    fn skip(&mut self, feature: &str, setting: Option<&str>, error: RegistryError) {
        tracing::warn!(feature, setting, %error, "skipping profile entry");
        self.issues.push(ProfileIssue {
            feature: feature.to_owned(),
            setting: setting.map(str::to_owned),
            error,
        });
    }
}

impl FeatureRegistry {
    /// Applies a profile: settings first, then disables, then enables.
    ///
    /// Unknown features or settings and ill-typed or out-of-range values are
    /// skipped and reported; everything else is applied.
    pub fn apply_profile(&mut self, profile: &Profile) -> ProfileReport {
        let mut report = ProfileReport::default();

        for (id, entry) in &profile.features {
            if self.feature(id).is_none() {
                report.skip(id, None, RegistryError::UnknownFeature(id.clone()));
                continue;
            }
            for (name, raw) in &entry.settings {
                let value = match self.get_setting(id, name) {
                    Ok(current) => from_toml(name, current.setting_type(), raw),
                    Err(error) => {
                        report.skip(id, Some(name), error);
                        continue;
                    }
                };
                let result = value
                    .map_err(|source| RegistryError::InvalidValue {
                        feature: id.clone(),
                        source,
                    })
                    .and_then(|value| self.set_setting(id, name, value));
                match result {
                    Ok(true) => report.settings_changed += 1,
                    Ok(false) => {}
                    Err(error) => report.skip(id, Some(name), error),
                }
            }
        }

        let wanted = |enabled: bool| {
            profile
                .features
                .iter()
                .filter(move |(_, entry)| entry.enabled == Some(enabled))
                .map(|(id, _)| id.as_str())
        };
        for id in wanted(false) {
            if let Ok(outcome) = self.disable(id) {
                report.toggles.merge(outcome);
            }
        }
        for id in wanted(true) {
            if let Ok(outcome) = self.enable(id) {
                report.toggles.merge(outcome);
            }
        }

        tracing::info!(
            toggles = report.toggles.changes.len(),
            settings = report.settings_changed,
            skipped = report.issues.len(),
            "profile applied"
        );
        report
    }
}

fn to_toml(value: &SettingValue) -> toml::Value {
    match value {
        SettingValue::Bool(v) => toml::Value::Boolean(*v),
        SettingValue::Int(v) => toml::Value::Integer(*v),
        SettingValue::Float(v) => toml::Value::Float(*v),
        SettingValue::Text(v) | SettingValue::Choice(v) => toml::Value::String(v.clone()),
        SettingValue::IdentifierList(ids) => {
            toml::Value::Array(ids.iter().cloned().map(toml::Value::String).collect())
        }
    }
}

/// Converts a raw TOML value into the variant a setting declares.
#[allow(clippy::cast_precision_loss)]
fn from_toml(setting: &str, expected: SettingType, raw: &toml::Value) -> Result<SettingValue, SettingError> {
    let value = match (expected, raw) {
        (SettingType::Bool, toml::Value::Boolean(v)) => Some(SettingValue::Bool(*v)),
        (SettingType::Int, toml::Value::Integer(v)) => Some(SettingValue::Int(*v)),
        (SettingType::Float, toml::Value::Float(v)) => Some(SettingValue::Float(*v)),
        (SettingType::Float, toml::Value::Integer(v)) => Some(SettingValue::Float(*v as f64)),
        (SettingType::Text, toml::Value::String(v)) => Some(SettingValue::Text(v.clone())),
        (SettingType::Choice, toml::Value::String(v)) => Some(SettingValue::Choice(v.clone())),
        (SettingType::IdentifierList, toml::Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_owned))
            .collect::<Option<_>>()
            .map(SettingValue::IdentifierList),
        _ => None,
    };
    value.ok_or_else(|| SettingError::TypeMismatch {
        setting: setting.to_owned(),
        expected,
        found: raw.type_str().to_owned(),
    })
}

//! # Features
//!
//! A feature is an independently toggleable capability owning its settings.
//! Features are built once, handed to the
//! [`FeatureRegistry`](crate::registry::FeatureRegistry), and from then on
//! change state only through it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::setting::{Setting, SettingDescriptor};

/// Grouping shown by configuration tooling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Movement assists.
    Movement,
    /// Render overrides.
    Rendering,
    /// Combat automation.
    Fighting,
    /// Automated tasks.
    Automatic,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 4] = [Self::Movement, Self::Rendering, Self::Fighting, Self::Automatic];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Movement => "Movement",
            Self::Rendering => "Rendering",
            Self::Fighting => "Fighting",
            Self::Automatic => "Automatic",
        }
    }

    /// Case-insensitive lookup by display name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a feature relates to other features.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Relations {
    /// Every one of these is enabled along with this feature, and disabling
    /// any of them disables this feature.
    pub depends: Vec<String>,
    /// At least one of these must be enabled for this feature to be enabled.
    pub depends_one_of: Vec<String>,
    /// Enabling this feature disables these, and vice versa.
    pub conflicts: Vec<String>,
}

/// A named toggle with its settings.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    id: String,
    category: Category,
    description: String,
    initial_enabled: bool,
    enabled: bool,
    settings: Vec<Setting>,
    relations: Relations,
}

impl Feature {
    /// Creates a disabled feature with no settings.
    #[must_use]
    pub fn new(id: &str, category: Category, description: &str) -> Self {
        Self {
            id: id.to_owned(),
            category,
            description: description.to_owned(),
            initial_enabled: false,
            enabled: false,
            settings: Vec::new(),
            relations: Relations::default(),
        }
    }

    /// Sets the state the feature starts in and returns to on reset.
    #[must_use]
    pub fn enabled_by_default(mut self, enabled: bool) -> Self {
        self.initial_enabled = enabled;
        self.enabled = enabled;
        self
    }

    /// Appends a setting.
    #[must_use]
    pub fn with_setting(mut self, setting: Setting) -> Self {
        self.settings.push(setting);
        self
    }

    /// Declares features that must all be enabled alongside this one.
    #[must_use]
    pub fn depends_on(mut self, ids: &[&str]) -> Self {
        self.relations.depends.extend(ids.iter().map(|id| (*id).to_owned()));
        self
    }

    /// Declares features of which at least one must be enabled.
    #[must_use]
    pub fn depends_on_one_of(mut self, ids: &[&str]) -> Self {
        self.relations
            .depends_one_of
            .extend(ids.iter().map(|id| (*id).to_owned()));
        self
    }

    /// Declares features that cannot be enabled at the same time.
    #[must_use]
    pub fn conflicts_with(mut self, ids: &[&str]) -> Self {
        self.relations.conflicts.extend(ids.iter().map(|id| (*id).to_owned()));
        self
    }

    /// Feature id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Category.
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the feature is currently enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Settings in declaration order.
    #[must_use]
    pub fn settings(&self) -> &[Setting] {
        &self.settings
    }

    /// Setting by exact name.
    #[must_use]
    pub fn setting(&self, name: &str) -> Option<&Setting> {
        self.settings.iter().find(|s| s.name() == name)
    }

    /// Relations to other features.
    #[must_use]
    pub fn relations(&self) -> &Relations {
        &self.relations
    }

    /// Descriptors of every setting, for tooling.
    #[must_use]
    pub fn descriptors(&self) -> Vec<SettingDescriptor> {
        self.settings.iter().map(Setting::descriptor).collect()
    }

    /// First setting name that appears twice, if any.
    pub(crate) fn duplicate_setting(&self) -> Option<&str> {
        self.settings.iter().enumerate().find_map(|(i, s)| {
            self.settings[..i]
                .iter()
                .any(|earlier| earlier.name() == s.name())
                .then(|| s.name())
        })
    }

    pub(crate) fn setting_mut(&mut self, name: &str) -> Option<&mut Setting> {
        self.settings.iter_mut().find(|s| s.name() == name)
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Restores initial enablement and every setting default.
    pub(crate) fn reset(&mut self) {
        self.enabled = self.initial_enabled;
        for setting in &mut self.settings {
            setting.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_lookup_ignores_case() {
        assert_eq!(Category::from_name("rendering"), Some(Category::Rendering));
        assert_eq!(Category::from_name("FIGHTING"), Some(Category::Fighting));
        assert_eq!(Category::from_name("Chat"), None);
    }

    #[test]
    fn test_duplicate_setting_detected() {
        let feature = Feature::new("Step", Category::Movement, "")
            .with_setting(Setting::boolean("AutoJumpAllowed", "", true))
            .with_setting(Setting::boolean("AutoJumpAllowed", "", false));
        assert_eq!(feature.duplicate_setting(), Some("AutoJumpAllowed"));
    }

    #[test]
    fn test_builder_records_relations() {
        let feature = Feature::new("WoodCutter", Category::Automatic, "")
            .depends_on(&["AIMode"])
            .conflicts_with(&["VeinMiner"]);
        assert_eq!(feature.relations().depends, vec!["AIMode".to_owned()]);
        assert_eq!(feature.relations().conflicts, vec!["VeinMiner".to_owned()]);
        assert!(!feature.is_enabled());
    }
}

//! # Feature Registry
//!
//! The catalog of every feature, and the single source of truth for "is X
//! enabled" and "what is setting Y of X".
//!
//! ## Read paths
//!
//! Decision points use exactly these shapes, none of which can fail:
//!
//! | call | degrades to |
//! |---|---|
//! | [`is_enabled`](FeatureRegistry::is_enabled) | `false` |
//! | [`is_setting_enabled`](FeatureRegistry::is_setting_enabled) | `false` |
//! | [`get_float_setting`](FeatureRegistry::get_float_setting) | caller default |
//! | [`setting`](FeatureRegistry::setting) / [`value_or`](FeatureRegistry::value_or) | `None` / caller default |
//!
//! An unknown feature behaves exactly like a disabled one.
//!
//! ## Write paths
//!
//! Enable/disable and setting updates come from configuration tooling and
//! return [`RegistryResult`]. Toggling cascades through [`Relations`]; the
//! returned [`ToggleOutcome`] lists every state change in the order applied.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, RegistryResult};
use crate::feature::{Category, Feature};
use crate::setting::{BoolKind, FloatKind, SettingDescriptor, SettingKey, SettingKind, SettingValue};

/// One feature flipping state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureChange {
    /// Feature id.
    pub id: String,
    /// New state.
    pub enabled: bool,
}

/// Everything a toggle request changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// State changes in the order they were applied; the requested feature
    /// comes first when it changed at all.
    pub changes: Vec<FeatureChange>,
    /// Features whose enablement was refused because none of their
    /// `depends_one_of` features was enabled.
    pub refused: Vec<String>,
}

impl ToggleOutcome {
    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Final state of `id` if this outcome changed it.
    #[must_use]
    pub fn state_of(&self, id: &str) -> Option<bool> {
        self.changes.iter().rev().find(|c| c.id == id).map(|c| c.enabled)
    }

    /// Appends another outcome.
    pub fn merge(&mut self, other: Self) {
        self.changes.extend(other.changes);
        self.refused.extend(other.refused);
    }
}

/// Persisted form of one feature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureSnapshot {
    /// Feature id.
    pub id: String,
    /// Enablement.
    pub enabled: bool,
    /// Current value of every setting.
    pub settings: BTreeMap<String, SettingValue>,
}

/// Catalog of every feature.
#[derive(Clone, Debug, Default)]
pub struct FeatureRegistry {
    /// Features in registration order.
    features: Vec<Feature>,
    /// Feature id -> index into `features`.
    index: HashMap<String, usize>,
}

impl FeatureRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a feature.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateFeature`] if the id is taken,
    /// [`RegistryError::DuplicateSetting`] if two settings share a name.
    pub fn register(&mut self, feature: Feature) -> RegistryResult<()> {
        if self.index.contains_key(feature.id()) {
            return Err(RegistryError::DuplicateFeature(feature.id().to_owned()));
        }
        if let Some(setting) = feature.duplicate_setting() {
            return Err(RegistryError::DuplicateSetting {
                feature: feature.id().to_owned(),
                setting: setting.to_owned(),
            });
        }
        self.index.insert(feature.id().to_owned(), self.features.len());
        self.features.push(feature);
        Ok(())
    }

    /// Number of registered features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether no feature is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    // =========================================================================
    // DECISION-POINT READS
    // =========================================================================

    /// Whether `id` is registered and enabled.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self, id: &str) -> bool {
        self.feature(id).is_some_and(Feature::is_enabled)
    }

    /// Feature by exact id.
    #[inline]
    #[must_use]
    pub fn feature(&self, id: &str) -> Option<&Feature> {
        self.index.get(id).map(|&i| &self.features[i])
    }

    /// True only if the feature is enabled and `setting` exists, is a
    /// boolean, and is `true`.
    #[must_use]
    pub fn is_setting_enabled(&self, id: &str, setting: &str) -> bool {
        self.enabled_view::<BoolKind>(id, setting)
            .copied()
            .unwrap_or(false)
    }

    /// The float `setting` of an enabled feature, or `default`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn get_float_setting(&self, id: &str, setting: &str, default: f32) -> f32 {
        self.enabled_view::<FloatKind>(id, setting)
            .map_or(default, |v| *v as f32)
    }

    /// Typed view of a setting of an enabled feature.
    ///
    /// `None` when the feature is unknown or disabled, the setting is
    /// missing, or it holds another variant.
    #[inline]
    #[must_use]
    pub fn setting<K: SettingKind>(&self, id: &str, key: SettingKey<K>) -> Option<&K::Value> {
        self.enabled_view::<K>(id, key.name())
    }

    /// Copy of a setting of an enabled feature, or `default`.
    #[must_use]
    pub fn value_or<K>(&self, id: &str, key: SettingKey<K>, default: K::Value) -> K::Value
    where
        K: SettingKind,
        K::Value: Copy,
    {
        self.setting(id, key).copied().unwrap_or(default)
    }

    fn enabled_view<K: SettingKind>(&self, id: &str, setting: &str) -> Option<&K::Value> {
        let feature = self.feature(id).filter(|f| f.is_enabled())?;
        let value = feature.setting(setting)?.view::<K>();
        if value.is_none() {
            tracing::debug!(feature = id, setting, expected = %K::TYPE, "setting read degraded to default");
        }
        value
    }

    // =========================================================================
    // CATALOG QUERIES
    // =========================================================================

    /// Every feature in registration order.
    pub fn features(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    /// Features of one category in registration order.
    pub fn features_in(&self, category: Category) -> impl Iterator<Item = &Feature> {
        self.features.iter().filter(move |f| f.category() == category)
    }

    /// Case-insensitive lookup by category and feature name.
    #[must_use]
    pub fn search(&self, category: &str, name: &str) -> Option<&Feature> {
        let category = Category::from_name(category)?;
        self.features_in(category)
            .find(|f| f.id().eq_ignore_ascii_case(name))
    }

    // =========================================================================
    // TOOLING BOUNDARY
    // =========================================================================

    /// Current value of a setting, regardless of enablement.
    ///
    /// # Errors
    ///
    /// Unknown feature or setting.
    pub fn get_setting(&self, id: &str, setting: &str) -> RegistryResult<&SettingValue> {
        let feature = self
            .feature(id)
            .ok_or_else(|| RegistryError::UnknownFeature(id.to_owned()))?;
        feature
            .setting(setting)
            .map(|s| s.value())
            .ok_or_else(|| RegistryError::UnknownSetting {
                feature: id.to_owned(),
                setting: setting.to_owned(),
            })
    }

    /// Validates and stores a setting value. Returns whether it changed.
    ///
    /// # Errors
    ///
    /// Unknown feature or setting, or [`RegistryError::InvalidValue`] when
    /// the setting rejects the value.
    pub fn set_setting(&mut self, id: &str, setting: &str, value: SettingValue) -> RegistryResult<bool> {
        let index = self.index_of(id)?;
        let target = self.features[index]
            .setting_mut(setting)
            .ok_or_else(|| RegistryError::UnknownSetting {
                feature: id.to_owned(),
                setting: setting.to_owned(),
            })?;
        let changed = target.set(value).map_err(|source| RegistryError::InvalidValue {
            feature: id.to_owned(),
            source,
        })?;
        if changed {
            tracing::debug!(feature = id, setting, "setting updated");
        }
        Ok(changed)
    }

    /// Descriptors of every setting of a feature.
    ///
    /// # Errors
    ///
    /// Unknown feature.
    pub fn descriptors(&self, id: &str) -> RegistryResult<Vec<SettingDescriptor>> {
        self.feature(id)
            .map(Feature::descriptors)
            .ok_or_else(|| RegistryError::UnknownFeature(id.to_owned()))
    }

    /// Enablement and every setting value, for persistence.
    #[must_use]
    pub fn snapshot(&self) -> Vec<FeatureSnapshot> {
        self.features
            .iter()
            .map(|f| FeatureSnapshot {
                id: f.id().to_owned(),
                enabled: f.is_enabled(),
                settings: f
                    .settings()
                    .iter()
                    .map(|s| (s.name().to_owned(), s.value().clone()))
                    .collect(),
            })
            .collect()
    }

    /// Restores every feature's initial state and setting defaults.
    pub fn reset_all(&mut self) {
        for feature in &mut self.features {
            feature.reset();
        }
        tracing::info!(features = self.features.len(), "registry reset to defaults");
    }

    /// Enables a feature and resolves its relations.
    ///
    /// # Errors
    ///
    /// Unknown feature.
    pub fn enable(&mut self, id: &str) -> RegistryResult<ToggleOutcome> {
        let index = self.index_of(id)?;
        let mut cascade = Cascade::new(self.features.len());
        self.enable_at(index, &mut cascade);
        Ok(cascade.finish(id, true))
    }

    /// Disables a feature and every feature that can no longer stay enabled.
    ///
    /// # Errors
    ///
    /// Unknown feature.
    pub fn disable(&mut self, id: &str) -> RegistryResult<ToggleOutcome> {
        let index = self.index_of(id)?;
        let mut cascade = Cascade::new(self.features.len());
        self.disable_at(index, &mut cascade);
        Ok(cascade.finish(id, false))
    }

    /// Flips a feature.
    ///
    /// # Errors
    ///
    /// Unknown feature.
    pub fn toggle(&mut self, id: &str) -> RegistryResult<ToggleOutcome> {
        if self.is_enabled(id) {
            self.disable(id)
        } else {
            self.enable(id)
        }
    }

    fn index_of(&self, id: &str) -> RegistryResult<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| RegistryError::UnknownFeature(id.to_owned()))
    }

    fn indices_of<'a>(&'a self, ids: &'a [String]) -> impl Iterator<Item = usize> + 'a {
        ids.iter().filter_map(|id| self.index.get(id.as_str()).copied())
    }

    fn one_of_satisfied(&self, index: usize) -> bool {
        let one_of = &self.features[index].relations().depends_one_of;
        one_of.is_empty() || one_of.iter().any(|id| self.is_enabled(id))
    }

    fn enable_at(&mut self, index: usize, cascade: &mut Cascade) {
        if self.features[index].is_enabled() || cascade.touched[index] {
            return;
        }
        if !self.one_of_satisfied(index) {
            cascade.refused.push(self.features[index].id().to_owned());
            return;
        }

        cascade.touched[index] = true;
        cascade.apply(&mut self.features[index], true);
        let id = self.features[index].id().to_owned();

        let relations = self.features[index].relations().clone();
        let depends: Vec<usize> = self.indices_of(&relations.depends).collect();
        for dep in depends {
            self.enable_at(dep, cascade);
        }
        let conflicts: Vec<usize> = self.indices_of(&relations.conflicts).collect();
        for conflict in conflicts {
            self.disable_at(conflict, cascade);
        }

        // Features that declared a conflict with this one step aside as well.
        let rivals: Vec<usize> = (0..self.features.len())
            .filter(|&i| i != index && self.features[i].is_enabled())
            .filter(|&i| self.features[i].relations().conflicts.contains(&id))
            .collect();
        for rival in rivals {
            self.disable_at(rival, cascade);
        }
    }

    fn disable_at(&mut self, index: usize, cascade: &mut Cascade) {
        if !self.features[index].is_enabled() || cascade.touched[index] {
            return;
        }

        cascade.touched[index] = true;
        cascade.apply(&mut self.features[index], false);
        let id = self.features[index].id().to_owned();

        for i in 0..self.features.len() {
            if i == index || !self.features[i].is_enabled() {
                continue;
            }
            let relations = self.features[i].relations();
            let orphaned = relations.depends.contains(&id)
                || (relations.depends_one_of.contains(&id) && !self.one_of_satisfied(i));
            if orphaned {
                self.disable_at(i, cascade);
            }
        }
    }
}

/// Bookkeeping for one enable/disable request.
struct Cascade {
    touched: Vec<bool>,
    changes: Vec<FeatureChange>,
    refused: Vec<String>,
}

impl Cascade {
    fn new(len: usize) -> Self {
        Self {
            touched: vec![false; len],
            changes: Vec::new(),
            refused: Vec::new(),
        }
    }

    fn apply(&mut self, feature: &mut Feature, enabled: bool) {
        feature.set_enabled(enabled);
        self.changes.push(FeatureChange {
            id: feature.id().to_owned(),
            enabled,
        });
    }

    fn finish(self, id: &str, requested: bool) -> ToggleOutcome {
        if !self.changes.is_empty() {
            let cascaded: Vec<(&str, bool)> = self
                .changes
                .iter()
                .skip(1)
                .map(|c| (c.id.as_str(), c.enabled))
                .collect();
            tracing::info!(feature = id, enabled = requested, cascade = ?cascaded, "feature toggled");
        }
        if !self.refused.is_empty() {
            tracing::info!(feature = id, refused = ?self.refused, "enable refused: no alternative dependency enabled");
        }
        ToggleOutcome {
            changes: self.changes,
            refused: self.refused,
        }
    }
}

// =============================================================================
// SHARED HANDLE
// =============================================================================

/// Cloneable handle to a registry shared by many decision points.
///
/// Readers take short read locks; only configuration tooling writes.
#[derive(Clone, Debug, Default)]
pub struct RegistryHandle {
    inner: Arc<RwLock<FeatureRegistry>>,
}

impl RegistryHandle {
    /// Wraps a registry.
    #[must_use]
    pub fn new(registry: FeatureRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    /// Shared read access.
    #[inline]
    pub fn read(&self) -> RwLockReadGuard<'_, FeatureRegistry> {
        self.inner.read()
    }

    /// Exclusive write access.
    #[inline]
    pub fn write(&self) -> RwLockWriteGuard<'_, FeatureRegistry> {
        self.inner.write()
    }
}

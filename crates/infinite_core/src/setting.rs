//! # Settings
//!
//! A setting is a named, typed configuration value owned by one feature.
//!
//! Values are a tagged union ([`SettingValue`]); each setting also carries
//! bounds that every write is validated against. Engines read settings
//! through [`SettingKey`], whose kind parameter fixes the expected variant at
//! compile time. The stringly-typed path ([`Setting::set`] with a raw
//! [`SettingValue`]) exists for configuration tooling and persisted profiles
//! only.

use std::collections::BTreeSet;
use std::fmt;
use std::marker::PhantomData;

use infinite_shared::normalize_identifier;
use serde::{Deserialize, Serialize};

use crate::error::{SettingError, SettingResult};

/// Discriminant of a [`SettingValue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettingType {
    /// `true` / `false`.
    Bool,
    /// Bounded integer.
    Int,
    /// Bounded float.
    Float,
    /// Free text.
    Text,
    /// Set of identifiers (block ids, entity type ids, player names).
    IdentifierList,
    /// One of a fixed list of options.
    Choice,
}

impl SettingType {
    /// Lower-case name used in messages and tooling.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Text => "text",
            Self::IdentifierList => "identifier list",
            Self::Choice => "choice",
        }
    }
}

impl fmt::Display for SettingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A setting value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SettingValue {
    /// Boolean toggle.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Free text.
    Text(String),
    /// Identifier set.
    IdentifierList(BTreeSet<String>),
    /// Selected option of a choice.
    Choice(String),
}

impl SettingValue {
    /// The variant of this value.
    #[must_use]
    pub const fn setting_type(&self) -> SettingType {
        match self {
            Self::Bool(_) => SettingType::Bool,
            Self::Int(_) => SettingType::Int,
            Self::Float(_) => SettingType::Float,
            Self::Text(_) => SettingType::Text,
            Self::IdentifierList(_) => SettingType::IdentifierList,
            Self::Choice(_) => SettingType::Choice,
        }
    }

    /// Builds an identifier list from any iterator of strings.
    pub fn identifiers<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::IdentifierList(ids.into_iter().map(|s| s.as_ref().to_owned()).collect())
    }
}

/// Constraints a setting's value must satisfy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Bounds {
    /// Any value of the right variant.
    Unbounded,
    /// Inclusive integer range.
    Int {
        /// Smallest allowed value.
        min: i64,
        /// Largest allowed value.
        max: i64,
    },
    /// Inclusive float range.
    Float {
        /// Smallest allowed value.
        min: f64,
        /// Largest allowed value.
        max: f64,
    },
    /// Allowed choice options.
    Options(Vec<String>),
    /// Identifier list entries.
    Identifiers {
        /// Entries are `namespace:path` ids and get normalized on write.
        namespaced: bool,
    },
}

/// Everything tooling needs to render or validate a setting.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SettingDescriptor {
    /// Setting name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Variant.
    pub setting_type: SettingType,
    /// Default value.
    pub default: SettingValue,
    /// Constraints.
    pub bounds: Bounds,
}

/// A named, typed, bounded configuration value.
#[derive(Clone, Debug, PartialEq)]
pub struct Setting {
    name: String,
    description: String,
    default: SettingValue,
    value: SettingValue,
    bounds: Bounds,
}

impl Setting {
    /// Boolean setting.
    #[must_use]
    pub fn boolean(name: &str, description: &str, default: bool) -> Self {
        Self::with_bounds(name, description, SettingValue::Bool(default), Bounds::Unbounded)
    }

    /// Integer setting bounded to `min..=max`.
    #[must_use]
    pub fn integer(name: &str, description: &str, default: i64, min: i64, max: i64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self::with_bounds(
            name,
            description,
            SettingValue::Int(default.clamp(min, max)),
            Bounds::Int { min, max },
        )
    }

    /// Float setting bounded to `min..=max`.
    #[must_use]
    pub fn float(name: &str, description: &str, default: f64, min: f64, max: f64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let default = if default.is_finite() { default.clamp(min, max) } else { min };
        Self::with_bounds(
            name,
            description,
            SettingValue::Float(default),
            Bounds::Float { min, max },
        )
    }

    /// Free-text setting.
    #[must_use]
    pub fn text(name: &str, description: &str, default: &str) -> Self {
        Self::with_bounds(
            name,
            description,
            SettingValue::Text(default.to_owned()),
            Bounds::Unbounded,
        )
    }

    /// List of `namespace:path` identifiers (blocks, entity types).
    ///
    /// Bare ids get the default namespace.
    #[must_use]
    pub fn identifiers<I, S>(name: &str, description: &str, defaults: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_bounds(
            name,
            description,
            SettingValue::identifiers(defaults),
            Bounds::Identifiers { namespaced: true },
        )
    }

    /// List of plain names (player names); entries are only trimmed.
    #[must_use]
    pub fn names<I, S>(name: &str, description: &str, defaults: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_bounds(
            name,
            description,
            SettingValue::identifiers(defaults),
            Bounds::Identifiers { namespaced: false },
        )
    }

    /// One-of-many setting. An unknown `selected` falls back to the first option.
    #[must_use]
    pub fn choice(name: &str, description: &str, selected: &str, options: &[&str]) -> Self {
        let options: Vec<String> = options.iter().map(|o| (*o).to_owned()).collect();
        let selected = if options.iter().any(|o| o == selected) {
            selected.to_owned()
        } else {
            options.first().cloned().unwrap_or_default()
        };
        Self::with_bounds(
            name,
            description,
            SettingValue::Choice(selected),
            Bounds::Options(options),
        )
    }

    fn with_bounds(name: &str, description: &str, default: SettingValue, bounds: Bounds) -> Self {
        let default = match (&bounds, default) {
            (Bounds::Identifiers { namespaced }, SettingValue::IdentifierList(ids)) => {
                SettingValue::IdentifierList(clean_identifiers(ids, *namespaced))
            }
            (_, default) => default,
        };
        Self {
            name: name.to_owned(),
            description: description.to_owned(),
            value: default.clone(),
            default,
            bounds,
        }
    }

    /// Setting name, unique within its feature.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> &SettingValue {
        &self.value
    }

    /// Default value.
    #[must_use]
    pub fn default_value(&self) -> &SettingValue {
        &self.default
    }

    /// Constraints.
    #[must_use]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Variant this setting holds.
    #[must_use]
    pub fn setting_type(&self) -> SettingType {
        self.default.setting_type()
    }

    /// Typed view of the current value; `None` on variant mismatch.
    #[must_use]
    pub fn view<K: SettingKind>(&self) -> Option<&K::Value> {
        K::view(&self.value)
    }

    /// Checks `value` against variant and bounds, returning the stored form.
    ///
    /// # Errors
    ///
    /// Returns a [`SettingError`] when the variant differs, a number is out of
    /// range or not finite, or a choice is not among the options.
    pub fn validate(&self, value: SettingValue) -> SettingResult<SettingValue> {
        let expected = self.setting_type();
        if value.setting_type() != expected {
            return Err(SettingError::TypeMismatch {
                setting: self.name.clone(),
                expected,
                found: value.setting_type().to_string(),
            });
        }

        match (&self.bounds, value) {
            (Bounds::Int { min, max }, SettingValue::Int(v)) => {
                if v < *min || v > *max {
                    return Err(self.out_of_range(v, min, max));
                }
                Ok(SettingValue::Int(v))
            }
            (Bounds::Float { min, max }, SettingValue::Float(v)) => {
                if !v.is_finite() {
                    return Err(SettingError::NotFinite {
                        setting: self.name.clone(),
                    });
                }
                if v < *min || v > *max {
                    return Err(self.out_of_range(v, min, max));
                }
                Ok(SettingValue::Float(v))
            }
            (Bounds::Options(options), SettingValue::Choice(v)) => {
                if options.iter().any(|o| *o == v) {
                    Ok(SettingValue::Choice(v))
                } else {
                    Err(SettingError::UnknownOption {
                        setting: self.name.clone(),
                        value: v,
                        options: options.clone(),
                    })
                }
            }
            (Bounds::Identifiers { namespaced }, SettingValue::IdentifierList(ids)) => {
                Ok(SettingValue::IdentifierList(clean_identifiers(ids, *namespaced)))
            }
            (_, value) => Ok(value),
        }
    }

    /// Validates and stores `value`. Returns whether the value changed.
    ///
    /// # Errors
    ///
    /// See [`Setting::validate`]; the current value is kept on error.
    pub fn set(&mut self, value: SettingValue) -> SettingResult<bool> {
        let value = self.validate(value)?;
        if value == self.value {
            return Ok(false);
        }
        self.value = value;
        Ok(true)
    }

    /// Restores the default value.
    pub fn reset(&mut self) {
        self.value = self.default.clone();
    }

    /// Tooling descriptor for this setting.
    #[must_use]
    pub fn descriptor(&self) -> SettingDescriptor {
        SettingDescriptor {
            name: self.name.clone(),
            description: self.description.clone(),
            setting_type: self.setting_type(),
            default: self.default.clone(),
            bounds: self.bounds.clone(),
        }
    }

    fn out_of_range<T: fmt::Display>(&self, value: T, min: &T, max: &T) -> SettingError {
        SettingError::OutOfRange {
            setting: self.name.clone(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }
}

fn clean_identifiers(ids: BTreeSet<String>, namespaced: bool) -> BTreeSet<String> {
    ids.iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .map(|id| {
            if namespaced {
                normalize_identifier(id).into_owned()
            } else {
                id.to_owned()
            }
        })
        .collect()
}

// =============================================================================
// TYPED ACCESS
// =============================================================================

/// Compile-time tag for one [`SettingValue`] variant.
pub trait SettingKind {
    /// Borrowed form of the value.
    type Value: ?Sized;

    /// Variant this kind reads.
    const TYPE: SettingType;

    /// Borrows the value if `value` is of this kind.
    fn view(value: &SettingValue) -> Option<&Self::Value>;
}

/// Reads [`SettingValue::Bool`].
#[derive(Debug)]
pub enum BoolKind {}

/// Reads [`SettingValue::Int`].
#[derive(Debug)]
pub enum IntKind {}

/// Reads [`SettingValue::Float`].
#[derive(Debug)]
pub enum FloatKind {}

/// Reads [`SettingValue::Text`].
#[derive(Debug)]
pub enum TextKind {}

/// Reads [`SettingValue::IdentifierList`].
#[derive(Debug)]
pub enum IdentifierListKind {}

/// Reads [`SettingValue::Choice`].
#[derive(Debug)]
pub enum ChoiceKind {}

impl SettingKind for BoolKind {
    type Value = bool;
    const TYPE: SettingType = SettingType::Bool;

    fn view(value: &SettingValue) -> Option<&bool> {
        match value {
            SettingValue::Bool(v) => Some(v),
            _ => None,
        }
    }
}

impl SettingKind for IntKind {
    type Value = i64;
    const TYPE: SettingType = SettingType::Int;

    fn view(value: &SettingValue) -> Option<&i64> {
        match value {
            SettingValue::Int(v) => Some(v),
            _ => None,
        }
    }
}

impl SettingKind for FloatKind {
    type Value = f64;
    const TYPE: SettingType = SettingType::Float;

    fn view(value: &SettingValue) -> Option<&f64> {
        match value {
            SettingValue::Float(v) => Some(v),
            _ => None,
        }
    }
}

impl SettingKind for TextKind {
    type Value = str;
    const TYPE: SettingType = SettingType::Text;

    fn view(value: &SettingValue) -> Option<&str> {
        match value {
            SettingValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl SettingKind for IdentifierListKind {
    type Value = BTreeSet<String>;
    const TYPE: SettingType = SettingType::IdentifierList;

    fn view(value: &SettingValue) -> Option<&BTreeSet<String>> {
        match value {
            SettingValue::IdentifierList(v) => Some(v),
            _ => None,
        }
    }
}

impl SettingKind for ChoiceKind {
    type Value = str;
    const TYPE: SettingType = SettingType::Choice;

    fn view(value: &SettingValue) -> Option<&str> {
        match value {
            SettingValue::Choice(v) => Some(v),
            _ => None,
        }
    }
}

/// Typed handle to a setting by name.
///
/// Declared once per setting next to its feature definition, so engines
/// never spell a setting name or assert a variant at the call site.
pub struct SettingKey<K: SettingKind> {
    name: &'static str,
    kind: PhantomData<fn() -> K>,
}

impl<K: SettingKind> SettingKey<K> {
    /// Creates a key for the setting called `name`.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            kind: PhantomData,
        }
    }

    /// Setting name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<K: SettingKind> Clone for SettingKey<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: SettingKind> Copy for SettingKey<K> {}

impl<K: SettingKind> fmt::Debug for SettingKey<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingKey")
            .field("name", &self.name)
            .field("type", &K::TYPE)
            .finish()
    }
}

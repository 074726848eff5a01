//! # Infinite Core
//!
//! Feature and settings registry shared by every decision point.
//!
//! ## Design Principles
//!
//! 1. **Reads never fail** - unknown features read as disabled, missing or
//!    ill-typed settings read as the caller's default
//! 2. **Typed access** - engines read settings through [`SettingKey`] so the
//!    expected variant is fixed at compile time
//! 3. **Explicit handles** - engines borrow a [`FeatureRegistry`] or hold a
//!    [`RegistryHandle`]; there is no global lookup
//!
//! ## Example
//!
//! ```rust
//! use infinite_core::{Category, Feature, FeatureRegistry, FloatKind, Setting, SettingKey};
//!
//! const OPACITY: SettingKey<FloatKind> = SettingKey::new("Opacity");
//!
//! let mut registry = FeatureRegistry::new();
//! registry.register(
//!     Feature::new("XRay", Category::Rendering, "See through terrain")
//!         .with_setting(Setting::float("Opacity", "Alpha of hidden blocks", 0.0, 0.0, 0.99)),
//! )?;
//!
//! assert_eq!(registry.value_or("XRay", OPACITY, 1.0), 1.0);
//! registry.enable("XRay")?;
//! assert_eq!(registry.value_or("XRay", OPACITY, 1.0), 0.0);
//! # Ok::<(), infinite_core::RegistryError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod feature;
pub mod registry;
pub mod setting;

pub use config::{FeatureProfile, Profile, ProfileIssue, ProfileReport};
pub use error::{ConfigError, ConfigResult, RegistryError, RegistryResult, SettingError, SettingResult};
pub use feature::{Category, Feature, Relations};
pub use registry::{FeatureChange, FeatureRegistry, FeatureSnapshot, RegistryHandle, ToggleOutcome};
pub use setting::{
    BoolKind, Bounds, ChoiceKind, FloatKind, IdentifierListKind, IntKind, Setting, SettingDescriptor,
    SettingKey, SettingKind, SettingType, SettingValue, TextKind,
};

//! # Infinite Shared
//!
//! Common types used by every unit of the client core.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on another workspace crate. The registry,
//! the visibility resolver and the target selector all build on it.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod ident;
pub mod math;

pub use constants::{ALPHA_MAX, DEFAULT_NAMESPACE, OPAQUE, RGB_MASK, STANDING_EYE_HEIGHT, TICK_RATE};
pub use ident::normalize_identifier;
pub use math::{BlockPos, Direction, Vec3};

//! # Infinite Render
//!
//! X-Ray visibility decisions for block, fluid and block-entity decision
//! points.
//!
//! The resolver borrows a [`FeatureRegistry`](infinite_core::FeatureRegistry)
//! and holds no state of its own; the host may call it from any number of
//! render callbacks.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod face;
pub mod visibility;
pub mod xray;

pub use face::{skip_fluid_face, FacePass};
pub use visibility::{
    BlockView, BlockVisibilityQuery, Neighbor, RenderLayer, VisibilityDecision, VisibilityKind,
    VisibilityResolver,
};

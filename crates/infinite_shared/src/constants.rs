//! # Client Constants
//!
//! Values fixed by the host game. Changing them desynchronizes the core from
//! the client it runs inside.

/// Simulation steps per second.
pub const TICK_RATE: u32 = 20;

/// Largest value of an 8-bit colour channel.
pub const ALPHA_MAX: u8 = u8::MAX;

/// Opacity of a fully visible surface.
pub const OPAQUE: f32 = 1.0;

/// RGB bits of a packed ARGB colour.
pub const RGB_MASK: u32 = 0x00FF_FFFF;

/// Namespace assumed for identifiers written without one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Eye height of a standing player, used when the host does not report one.
pub const STANDING_EYE_HEIGHT: f64 = 1.62;

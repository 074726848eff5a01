//! Yaw/pitch needed to face a point.

use infinite_shared::Vec3;
use serde::{Deserialize, Serialize};

/// View angles in degrees, in the host's convention: yaw 0 faces +Z,
/// negative pitch looks up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AimAngles {
    /// Rotation around the vertical axis.
    pub yaw: f32,
    /// Rotation above/below the horizon.
    pub pitch: f32,
}

impl AimAngles {
    /// Angles that point from `eye` at `target`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn facing(eye: Vec3, target: Vec3) -> Self {
        let delta = target - eye;
        let yaw = delta.z.atan2(delta.x).to_degrees() as f32 - 90.0;
        let pitch = -(delta.y.atan2(delta.horizontal_length()).to_degrees()) as f32;
        Self { yaw, pitch }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_facing_cardinal_directions() {
        let eye = Vec3::ZERO;
        assert!(close(AimAngles::facing(eye, Vec3::new(0.0, 0.0, 1.0)).yaw, 0.0));
        assert!(close(AimAngles::facing(eye, Vec3::new(-1.0, 0.0, 0.0)).yaw, 90.0));
        assert!(close(AimAngles::facing(eye, Vec3::new(1.0, 0.0, 0.0)).yaw, -90.0));
    }

    #[test]
    fn test_pitch_is_negative_when_looking_up() {
        let aim = AimAngles::facing(Vec3::ZERO, Vec3::new(0.0, 1.0, 1.0));
        assert!(close(aim.pitch, -45.0));
        let aim = AimAngles::facing(Vec3::new(0.0, 1.62, 0.0), Vec3::new(3.0, 1.62, 0.0));
        assert!(close(aim.pitch, 0.0));
    }
}

//! # Face Pass
//!
//! Some host pipelines decide a face in one callback and colour its vertices
//! in another. A [`FacePass`] carries the decision between the two: it is
//! created by [`FacePass::begin`] at the decide site and consulted by
//! [`FacePass::tint`] at the colour site. Every pass starts opaque, so a
//! previous face's opacity can never leak into the next one.

use infinite_shared::OPAQUE;

use crate::visibility::{BlockVisibilityQuery, VisibilityDecision, VisibilityKind, VisibilityResolver};

/// Decision and opacity for one face, from decide site to colour site.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FacePass {
    decision: VisibilityDecision,
}

impl FacePass {
    /// Resolves a face and starts its pass.
    #[must_use]
    pub fn begin(resolver: &VisibilityResolver<'_>, query: &BlockVisibilityQuery<'_>) -> Self {
        Self {
            decision: resolver.resolve_side(query),
        }
    }

    /// The resolved decision.
    #[must_use]
    pub const fn decision(&self) -> VisibilityDecision {
        self.decision
    }

    /// Whether to draw, falling back to `host_default` on defer.
    #[inline]
    #[must_use]
    pub fn should_draw(&self, host_default: bool) -> bool {
        self.decision.should_draw().unwrap_or(host_default)
    }

    /// Vertex alpha multiplier; `1.0` unless drawing translucent.
    #[inline]
    #[must_use]
    pub fn opacity(&self) -> f32 {
        match self.decision.kind {
            VisibilityKind::Draw => self.decision.opacity,
            VisibilityKind::Hide | VisibilityKind::Defer => OPAQUE,
        }
    }

    /// Applies the pass's alpha mask to a packed ARGB colour.
    #[inline]
    #[must_use]
    pub fn tint(&self, argb: u32) -> u32 {
        if self.opacity() >= OPAQUE {
            return argb;
        }
        argb & VisibilityDecision::draw_with_opacity(self.opacity()).color_mask()
    }
}

/// Fluid renderers ask "skip this side?" instead of "draw this side?".
#[inline]
#[must_use]
pub fn skip_fluid_face(
    resolver: &VisibilityResolver<'_>,
    query: &BlockVisibilityQuery<'_>,
    host_default: bool,
) -> bool {
    resolver
        .resolve_side(query)
        .should_draw()
        .map_or(host_default, |draw| !draw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visibility::Neighbor;
    use crate::xray::{BLOCK_LIST, OPACITY, XRAY};
    use infinite_core::{FeatureRegistry, SettingValue};
    use infinite_shared::{BlockPos, Direction};

    fn xray(opacity: f64) -> FeatureRegistry {
        let mut registry = FeatureRegistry::new();
        registry.register(crate::xray::feature()).unwrap();
        registry
            .set_setting(XRAY, BLOCK_LIST.name(), SettingValue::identifiers(["water"]))
            .unwrap();
        registry
            .set_setting(XRAY, OPACITY.name(), SettingValue::Float(opacity))
            .unwrap();
        registry.enable(XRAY).unwrap();
        registry
    }

    fn face<'a>(block: &'a str, neighbor: Neighbor<'a>) -> BlockVisibilityQuery<'a> {
        BlockVisibilityQuery::new(block, BlockPos::new(1, 64, 1), Direction::Up).with_neighbor(neighbor)
    }

    #[test]
    fn test_new_pass_is_opaque() {
        let pass = FacePass::default();
        assert_eq!(pass.opacity(), 1.0);
        assert_eq!(pass.tint(0xFF12_3456), 0xFF12_3456);
        assert!(pass.should_draw(true));
        assert!(!pass.should_draw(false));
    }

    #[test]
    fn test_tint_applies_alpha() {
        let registry = xray(0.5);
        let resolver = VisibilityResolver::new(&registry);
        let pass = FacePass::begin(&resolver, &face("stone", Neighbor::Air));
        assert_eq!(pass.tint(0xFF12_3456), 0x7F12_3456);
    }

    #[test]
    fn test_opacity_does_not_leak_between_faces() {
        let registry = xray(0.4);
        let resolver = VisibilityResolver::new(&registry);
        let translucent = FacePass::begin(&resolver, &face("stone", Neighbor::Air));
        assert!(translucent.opacity() < 1.0);

        let listed = FacePass::begin(&resolver, &face("water", Neighbor::Air));
        assert_eq!(listed.opacity(), 1.0);
    }

    #[test]
    fn test_fluid_skip_is_inverse_of_draw() {
        let registry = xray(0.0);
        let resolver = VisibilityResolver::new(&registry);
        assert!(!skip_fluid_face(&resolver, &face("water", Neighbor::Block("stone")), true));
        assert!(skip_fluid_face(&resolver, &face("lava", Neighbor::Block("stone")), false));

        let idle = FeatureRegistry::new();
        let resolver = VisibilityResolver::new(&idle);
        assert!(skip_fluid_face(&resolver, &face("water", Neighbor::Air), true));
    }
}

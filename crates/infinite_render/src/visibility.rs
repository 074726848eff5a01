//! # Visibility Resolver
//!
//! Answers "should this block face be drawn" for every face decision point.
//!
//! ## Policies
//!
//! With X-Ray enabled, a listed block is always drawn opaque. A non-listed
//! block follows one of two mutually exclusive policies selected by the
//! `Opacity` setting:
//!
//! - **hide mode** (`Opacity == 0`): a face is drawn only when it borders air,
//!   the chunk edge, or a listed block, so listed blocks stay visible through
//!   the gap and interior faces between two hidden blocks are pruned
//! - **opacity mode** (`Opacity > 0`): every face is drawn, tagged with the
//!   opacity for the caller to blend in a translucent pass
//!
//! Anything the resolver cannot decide is [`VisibilityKind::Defer`]: the host
//! applies its own default.

use infinite_core::FeatureRegistry;
use infinite_shared::{normalize_identifier, BlockPos, Direction, ALPHA_MAX, OPAQUE, RGB_MASK};

use crate::xray::{BLOCK_LIST, ONLY_EXPOSED, OPACITY, XRAY};

/// Tri-state face decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VisibilityKind {
    /// Render the face.
    Draw,
    /// Skip the face.
    Hide,
    /// Let the host apply its own default.
    Defer,
}

/// A face decision with the opacity to draw it at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityDecision {
    /// What to do with the face.
    pub kind: VisibilityKind,
    /// Opacity in `[0, 1]`; `1.0` unless drawing in opacity mode.
    pub opacity: f32,
}

impl VisibilityDecision {
    /// Host default, fully opaque.
    pub const DEFER: Self = Self {
        kind: VisibilityKind::Defer,
        opacity: OPAQUE,
    };

    /// Skip the face.
    pub const HIDE: Self = Self {
        kind: VisibilityKind::Hide,
        opacity: OPAQUE,
    };

    /// Draw fully opaque.
    pub const DRAW: Self = Self {
        kind: VisibilityKind::Draw,
        opacity: OPAQUE,
    };

    /// Draw at `opacity`, clamped to `[0, 1]`. NaN draws fully transparent.
    #[must_use]
    pub fn draw_with_opacity(opacity: f32) -> Self {
        let opacity = if opacity.is_nan() { 0.0 } else { opacity.clamp(0.0, OPAQUE) };
        Self {
            kind: VisibilityKind::Draw,
            opacity,
        }
    }

    /// `Some(true)` to draw, `Some(false)` to hide, `None` to defer.
    #[inline]
    #[must_use]
    pub fn should_draw(self) -> Option<bool> {
        match self.kind {
            VisibilityKind::Draw => Some(true),
            VisibilityKind::Hide => Some(false),
            VisibilityKind::Defer => None,
        }
    }

    /// Opacity as an 8-bit alpha channel.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn alpha(self) -> u8 {
        // Float-to-int casts saturate, so the result is already in 0..=255.
        (self.opacity * f32::from(ALPHA_MAX)) as u8
    }

    /// ARGB mask keeping RGB and replacing alpha.
    #[inline]
    #[must_use]
    pub fn color_mask(self) -> u32 {
        (u32::from(self.alpha()) << 24) | RGB_MASK
    }
}

impl Default for VisibilityDecision {
    fn default() -> Self {
        Self::DEFER
    }
}

/// What lies across the face being decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Neighbor<'a> {
    /// An air block.
    Air,
    /// Nothing loaded (chunk boundary). Treated like air.
    Absent,
    /// A solid or fluid block with this id.
    Block(&'a str),
}

/// Input of one face decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockVisibilityQuery<'a> {
    /// Id of the block owning the face.
    pub block_id: &'a str,
    /// Position of that block.
    pub pos: BlockPos,
    /// Side of the block the face is on.
    pub side: Direction,
    /// Block across the face.
    pub neighbor: Neighbor<'a>,
}

impl<'a> BlockVisibilityQuery<'a> {
    /// Query with an unknown neighbour.
    #[must_use]
    pub const fn new(block_id: &'a str, pos: BlockPos, side: Direction) -> Self {
        Self {
            block_id,
            pos,
            side,
            neighbor: Neighbor::Absent,
        }
    }

    /// Sets the neighbour across the face.
    #[must_use]
    pub fn with_neighbor(mut self, neighbor: Neighbor<'a>) -> Self {
        self.neighbor = neighbor;
        self
    }
}

/// Render pass a block or fluid is drawn in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderLayer {
    /// Opaque geometry.
    Solid,
    /// Alpha-tested geometry.
    Cutout,
    /// Blended geometry.
    Translucent,
}

/// Host world lookups needed for exposure checks.
pub trait BlockView {
    /// Whether the block at `pos` is air. Unloaded positions are not air.
    fn is_air(&self, pos: BlockPos) -> bool;
}

impl<F> BlockView for F
where
    F: Fn(BlockPos) -> bool,
{
    fn is_air(&self, pos: BlockPos) -> bool {
        self(pos)
    }
}

/// Read-only face decisions over a borrowed registry.
#[derive(Clone, Copy, Debug)]
pub struct VisibilityResolver<'a> {
    registry: &'a FeatureRegistry,
}

impl<'a> VisibilityResolver<'a> {
    /// Creates a resolver reading `registry`.
    #[must_use]
    pub const fn new(registry: &'a FeatureRegistry) -> Self {
        Self { registry }
    }

    /// Whether X-Ray is enabled.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.registry.is_enabled(XRAY)
    }

    /// Configured opacity of non-listed blocks; `0.0` while disabled.
    #[inline]
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.registry.get_float_setting(XRAY, OPACITY.name(), 0.0)
    }

    /// Whether non-listed blocks are drawn translucent.
    #[inline]
    #[must_use]
    pub fn is_opacity_mode(&self) -> bool {
        self.opacity() > 0.0
    }

    /// Whether `block_id` is listed. `None` while disabled or when the
    /// include list is missing.
    #[inline]
    #[must_use]
    pub fn is_included(&self, block_id: &str) -> Option<bool> {
        let list = self.registry.setting(XRAY, BLOCK_LIST)?;
        Some(list.contains(normalize_identifier(block_id).as_ref()))
    }

    /// Decides one face.
    #[must_use]
    pub fn resolve_side(&self, query: &BlockVisibilityQuery<'_>) -> VisibilityDecision {
        let Some(list) = self.registry.setting(XRAY, BLOCK_LIST) else {
            return VisibilityDecision::DEFER;
        };
        let listed = |id: &str| list.contains(normalize_identifier(id).as_ref());

        if listed(query.block_id) {
            return VisibilityDecision::DRAW;
        }

        let opacity = self.opacity();
        if opacity > 0.0 {
            return VisibilityDecision::draw_with_opacity(opacity);
        }

        match query.neighbor {
            Neighbor::Air | Neighbor::Absent => VisibilityDecision::DRAW,
            Neighbor::Block(id) if listed(id) => VisibilityDecision::DRAW,
            Neighbor::Block(_) => VisibilityDecision::HIDE,
        }
    }

    /// Forced render layer for every block and fluid.
    ///
    /// Translucent while opacity mode is active, otherwise `None` so the host
    /// keeps its static classification.
    #[must_use]
    pub fn block_layer(&self) -> Option<RenderLayer> {
        self.is_opacity_mode().then_some(RenderLayer::Translucent)
    }

    /// Decision for block entities (chests, signs, banners).
    ///
    /// Listed entities draw, all others are hidden regardless of mode.
    #[must_use]
    pub fn block_entity_decision(&self, block_id: &str) -> VisibilityDecision {
        match self.is_included(block_id) {
            None => VisibilityDecision::DEFER,
            Some(true) => VisibilityDecision::DRAW,
            Some(false) => VisibilityDecision::HIDE,
        }
    }

    /// Whether a block is shown by the include list or, with `OnlyExposed`,
    /// by touching air on any side. `false` while disabled.
    #[must_use]
    pub fn is_exposed_visible(&self, block_id: &str, pos: BlockPos, world: &impl BlockView) -> bool {
        match self.is_included(block_id) {
            None => false,
            Some(true) => true,
            Some(false) => {
                self.registry.is_setting_enabled(XRAY, ONLY_EXPOSED.name())
                    && Direction::ALL.iter().any(|&side| world.is_air(pos.offset(side)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use infinite_core::SettingValue;

    fn xray_registry(enabled: bool, list: &[&str], opacity: f64) -> FeatureRegistry {
        let mut registry = FeatureRegistry::new();
        registry.register(crate::xray::feature()).unwrap();
        registry
            .set_setting(XRAY, BLOCK_LIST.name(), SettingValue::identifiers(list))
            .unwrap();
        registry
            .set_setting(XRAY, OPACITY.name(), SettingValue::Float(opacity))
            .unwrap();
        if enabled {
            registry.enable(XRAY).unwrap();
        }
        registry
    }

    fn query<'a>(block: &'a str, neighbor: Neighbor<'a>) -> BlockVisibilityQuery<'a> {
        BlockVisibilityQuery::new(block, BlockPos::new(4, 12, -3), Direction::North).with_neighbor(neighbor)
    }

    #[test]
    fn test_disabled_defers_everything() {
        let registry = xray_registry(false, &["diamond_ore"], 0.5);
        let resolver = VisibilityResolver::new(&registry);
        for neighbor in [Neighbor::Air, Neighbor::Absent, Neighbor::Block("stone")] {
            assert_eq!(resolver.resolve_side(&query("diamond_ore", neighbor)), VisibilityDecision::DEFER);
            assert_eq!(resolver.resolve_side(&query("stone", neighbor)), VisibilityDecision::DEFER);
        }
        assert_eq!(resolver.block_layer(), None);
    }

    #[test]
    fn test_included_always_draws_opaque() {
        let registry = xray_registry(true, &["diamond_ore"], 0.5);
        let resolver = VisibilityResolver::new(&registry);
        let decision = resolver.resolve_side(&query("minecraft:diamond_ore", Neighbor::Block("stone")));
        assert_eq!(decision, VisibilityDecision::DRAW);
        assert_eq!(decision.opacity, 1.0);
    }

    #[test]
    fn test_hide_mode_prunes_interior_faces() {
        let registry = xray_registry(true, &["ore"], 0.0);
        let resolver = VisibilityResolver::new(&registry);
        assert_eq!(resolver.resolve_side(&query("stone", Neighbor::Air)).kind, VisibilityKind::Draw);
        assert_eq!(resolver.resolve_side(&query("stone", Neighbor::Absent)).kind, VisibilityKind::Draw);
        assert_eq!(resolver.resolve_side(&query("stone", Neighbor::Block("ore"))).kind, VisibilityKind::Draw);
        assert_eq!(resolver.resolve_side(&query("stone", Neighbor::Block("dirt"))).kind, VisibilityKind::Hide);
    }

    #[test]
    fn test_opacity_mode_never_hides() {
        let registry = xray_registry(true, &[], 0.5);
        let resolver = VisibilityResolver::new(&registry);
        let decision = resolver.resolve_side(&query("stone", Neighbor::Block("dirt")));
        assert_eq!(decision.kind, VisibilityKind::Draw);
        assert_eq!(decision.opacity, 0.5);
        assert_eq!(resolver.block_layer(), Some(RenderLayer::Translucent));
    }

    #[test]
    fn test_opacity_is_clamped() {
        assert_eq!(VisibilityDecision::draw_with_opacity(1.7).opacity, 1.0);
        assert_eq!(VisibilityDecision::draw_with_opacity(-0.2).opacity, 0.0);
        assert_eq!(VisibilityDecision::draw_with_opacity(f32::NAN).opacity, 0.0);
    }

    #[test]
    fn test_alpha_and_mask() {
        let decision = VisibilityDecision::draw_with_opacity(0.5);
        assert_eq!(decision.alpha(), 127);
        assert_eq!(decision.color_mask(), 0x7FFF_FFFF);
        assert_eq!(VisibilityDecision::DRAW.color_mask(), 0xFFFF_FFFF);
    }

    #[test]
    fn test_block_entities_follow_list() {
        let registry = xray_registry(true, &["chest"], 0.3);
        let resolver = VisibilityResolver::new(&registry);
        assert_eq!(resolver.block_entity_decision("minecraft:chest"), VisibilityDecision::DRAW);
        assert_eq!(resolver.block_entity_decision("minecraft:sign"), VisibilityDecision::HIDE);

        let disabled = xray_registry(false, &["chest"], 0.0);
        assert_eq!(
            VisibilityResolver::new(&disabled).block_entity_decision("minecraft:sign"),
            VisibilityDecision::DEFER
        );
    }

    #[test]
    fn test_only_exposed_needs_air_neighbor() {
        let mut registry = xray_registry(true, &["diamond_ore"], 0.0);
        let resolver = VisibilityResolver::new(&registry);
        let air_above = |pos: BlockPos| pos == BlockPos::new(0, 1, 0);
        let buried = |_: BlockPos| false;

        assert!(resolver.is_exposed_visible("diamond_ore", BlockPos::ORIGIN, &buried));
        assert!(!resolver.is_exposed_visible("stone", BlockPos::ORIGIN, &air_above));

        registry
            .set_setting(XRAY, ONLY_EXPOSED.name(), SettingValue::Bool(true))
            .unwrap();
        let resolver = VisibilityResolver::new(&registry);
        assert!(resolver.is_exposed_visible("stone", BlockPos::ORIGIN, &air_above));
        assert!(!resolver.is_exposed_visible("stone", BlockPos::ORIGIN, &buried));
    }
}

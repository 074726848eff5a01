//! # Built-in Feature Catalog
//!
//! Every feature the client ships, grouped by category, with its settings,
//! defaults and relations. X-Ray and the combat features are defined next to
//! the engines that read them and only collected here.

use infinite_combat::kill_aura;
use infinite_core::{Category, Feature, FeatureRegistry, RegistryResult, Setting};
use infinite_render::xray;

pub use infinite_combat::kill_aura::{KILL_AURA, NO_ATTACK, PLAYER_MANAGER};
pub use infinite_render::xray::XRAY;

// Movement
/// Sprint assists.
pub const SUPER_SPRINT: &str = "SuperSprint";
/// Faster ground movement.
pub const FAST_MOVE: &str = "FastMove";
/// Never walk off edges.
pub const SAFE_WALK: &str = "SafeWalk";
/// Holds position packets.
pub const FREEZE: &str = "Freeze";
/// Detached camera; needs [`FREEZE`].
pub const FREE_CAMERA: &str = "FreeCamera";
/// Walks forward on its own.
pub const AUTO_WALK: &str = "AutoWalk";
/// Mines the targeted block continuously.
pub const AUTO_MINE: &str = "AutoMine";
/// Shorter block-break delay.
pub const FAST_BREAK: &str = "FastBreak";
/// Taller step height.
pub const STEP: &str = "Step";
/// Ignores slowdown sources.
pub const ANTI_SLOW_DOWN: &str = "AntiSlowDown";

// Rendering
/// Removes screen overlays.
pub const ANTI_OVERLAY: &str = "AntiOverlay";
/// ESP and brightness.
pub const SUPER_SIGHT: &str = "SuperSight";
/// Third-person camera tweaks.
pub const CAMERA_CONFIG: &str = "CameraConfig";

// Fighting
/// Longer reach.
pub const REACH: &str = "Reach";
/// Automatic critical hits.
pub const SUPER_ATTACK: &str = "SuperAttack";
/// Strikes back when hit.
pub const COUNTER_ATTACK: &str = "CounterAttack";
/// Repeated hits on one target.
pub const IMPACT_ATTACK: &str = "ImpactAttack";

// Automatic
/// Lets automated tasks drive the player.
pub const AI_MODE: &str = "AIMode";
/// Mines whole ore veins.
pub const VEIN_MINER: &str = "VeinMiner";
/// Fells whole trees; needs [`AI_MODE`], conflicts with [`VEIN_MINER`].
pub const WOOD_CUTTER: &str = "WoodCutter";

/// Critical-hit methods of [`SUPER_ATTACK`].
pub const SUPER_ATTACK_METHODS: &[&str] = &["PACKET", "MINI_JUMP", "FULL_JUMP"];

/// Every built-in feature in registration order.
#[must_use]
pub fn builtin_features() -> Vec<Feature> {
    let mut features = movement();
    features.extend(rendering());
    features.extend(fighting());
    features.extend(automatic());
    features
}

/// A registry holding every built-in feature.
///
/// # Errors
///
/// Only if two built-in definitions collide.
pub fn builtin_registry() -> RegistryResult<FeatureRegistry> {
    let mut registry = FeatureRegistry::new();
    for feature in builtin_features() {
        registry.register(feature)?;
    }
    tracing::debug!(features = registry.len(), "built-in catalog registered");
    Ok(registry)
}

fn movement() -> Vec<Feature> {
    vec![
        Feature::new(SUPER_SPRINT, Category::Movement, "Sprint assists")
            .with_setting(Setting::boolean("OnlyWhenForward", "Sprint only while moving forward", true))
            .with_setting(Setting::boolean("EvenIfHungry", "Sprint regardless of hunger", false))
            .with_setting(Setting::float("BoostSprint", "Sprint speed multiplier", 1.0, 1.0, 1.4)),
        Feature::new(FAST_MOVE, Category::Movement, "Faster ground movement"),
        Feature::new(SAFE_WALK, Category::Movement, "Stops at block edges"),
        Feature::new(FREEZE, Category::Movement, "Holds position updates")
            .with_setting(Setting::float("Duration", "Seconds to hold; 0 is until disabled", 0.0, 0.0, 600.0)),
        Feature::new(FREE_CAMERA, Category::Movement, "Moves the camera away from the player")
            .with_setting(Setting::float("Speed", "Camera speed", 1.0, 0.1, 5.0))
            .depends_on(&[FREEZE]),
        Feature::new(AUTO_WALK, Category::Movement, "Walks forward automatically"),
        Feature::new(AUTO_MINE, Category::Movement, "Mines the targeted block"),
        Feature::new(FAST_BREAK, Category::Movement, "Removes the delay between block breaks"),
        Feature::new(STEP, Category::Movement, "Steps up taller blocks")
            .with_setting(Setting::float("AdjustStepHeight", "Step height in blocks", 1.0, 0.6, 2.0))
            .with_setting(Setting::boolean("AutoJumpAllowed", "Keep auto-jump enabled", true)),
        Feature::new(ANTI_SLOW_DOWN, Category::Movement, "Ignores slowdown sources")
            .with_setting(Setting::boolean("Item", "While using items", true))
            .with_setting(Setting::boolean("Cobweb", "Inside cobwebs", false)),
    ]
}

fn rendering() -> Vec<Feature> {
    vec![
        Feature::new(ANTI_OVERLAY, Category::Rendering, "Removes screen overlays")
            .with_setting(Setting::boolean("NoPumpkinOverlay", "Hide the pumpkin overlay", true))
            .with_setting(Setting::boolean("NoDarknessOverlay", "Hide darkness", true))
            .with_setting(Setting::boolean("NoLiquidOverlay", "Hide underwater and lava tint", true))
            .with_setting(Setting::boolean("NoFogOverlay", "Hide fog", true)),
        Feature::new(SUPER_SIGHT, Category::Rendering, "Highlights entities and blocks")
            .with_setting(Setting::boolean("PlayerESP", "Outline players", true))
            .with_setting(Setting::boolean("ChestESP", "Outline chests", true))
            .with_setting(Setting::boolean("MobESP", "Outline mobs", true))
            .with_setting(Setting::boolean("PortalESP", "Outline portals", true))
            .with_setting(Setting::float("VisibleRange", "ESP range in blocks", 16.0, 8.0, 256.0))
            .with_setting(Setting::boolean("FullBright", "Maximum brightness", true))
            .with_setting(Setting::boolean("AntiBlind", "Ignore blindness", true)),
        xray::feature(),
        Feature::new(CAMERA_CONFIG, Category::Rendering, "Third-person camera tweaks")
            .with_setting(Setting::float("CameraDistance", "Distance behind the player", 8.0, -1.0, 15.0))
            .with_setting(Setting::boolean("ClipBlock", "Camera passes through blocks", true))
            .with_setting(Setting::boolean("AntiHurtTilt", "No tilt when hurt", true)),
    ]
}

fn fighting() -> Vec<Feature> {
    vec![
        kill_aura::kill_aura(),
        Feature::new(REACH, Category::Fighting, "Longer interaction reach")
            .with_setting(Setting::float("ReachDistance", "Reach in blocks", 4.5, 3.0, 7.0)),
        kill_aura::no_attack(),
        kill_aura::player_manager(),
        Feature::new(SUPER_ATTACK, Category::Fighting, "Lands critical hits automatically").with_setting(
            Setting::choice("Method", "How to trigger the critical", "MINI_JUMP", SUPER_ATTACK_METHODS),
        ),
        Feature::new(COUNTER_ATTACK, Category::Fighting, "Strikes back when attacked"),
        Feature::new(IMPACT_ATTACK, Category::Fighting, "Hits one target repeatedly"),
    ]
}

fn automatic() -> Vec<Feature> {
    vec![
        Feature::new(AI_MODE, Category::Automatic, "Lets automated tasks control the player")
            .with_setting(Setting::boolean("AllowPlayerInput", "Keep player input active", false))
            .with_setting(Setting::boolean("CancelOnDamaged", "Stop tasks when damaged", false)),
        Feature::new(VEIN_MINER, Category::Automatic, "Mines connected ore veins"),
        Feature::new(WOOD_CUTTER, Category::Automatic, "Fells whole trees")
            .with_setting(Setting::float("Range", "Search radius", 32.0, 5.0, 64.0))
            .with_setting(Setting::identifiers(
                "LogBlocks",
                "Blocks treated as logs",
                ["oak_log", "spruce_log", "birch_log"],
            ))
            .with_setting(Setting::identifiers(
                "LeavesBlocks",
                "Blocks treated as leaves",
                ["oak_leaves", "spruce_leaves", "birch_leaves"],
            ))
            .with_setting(Setting::boolean("CollectItems", "Pick up drops", true))
            .depends_on(&[AI_MODE])
            .conflicts_with(&[VEIN_MINER]),
    ]
}

//! X-Ray feature definition and its setting keys.

use infinite_core::{BoolKind, Category, Feature, FloatKind, IdentifierListKind, Setting, SettingKey};

/// Feature id.
pub const XRAY: &str = "XRay";

/// Blocks that stay fully visible.
pub const BLOCK_LIST: SettingKey<IdentifierListKind> = SettingKey::new("BlockList");

/// Also show non-listed blocks that touch air.
pub const ONLY_EXPOSED: SettingKey<BoolKind> = SettingKey::new("OnlyExposed");

/// Alpha of non-listed blocks; `0` hides them instead.
pub const OPACITY: SettingKey<FloatKind> = SettingKey::new("Opacity");

/// Largest configurable opacity. Fully opaque would make the feature a no-op.
pub const MAX_OPACITY: f64 = 0.99;

/// Default include list: ores, utility blocks, portals and fluids.
pub const DEFAULT_BLOCK_LIST: &[&str] = &[
    "minecraft:ancient_debris",
    "minecraft:anvil",
    "minecraft:beacon",
    "minecraft:bone_block",
    "minecraft:bookshelf",
    "minecraft:brewing_stand",
    "minecraft:chain_command_block",
    "minecraft:chest",
    "minecraft:clay",
    "minecraft:coal_block",
    "minecraft:coal_ore",
    "minecraft:command_block",
    "minecraft:copper_ore",
    "minecraft:crafting_table",
    "minecraft:deepslate_coal_ore",
    "minecraft:deepslate_copper_ore",
    "minecraft:deepslate_diamond_ore",
    "minecraft:deepslate_emerald_ore",
    "minecraft:deepslate_gold_ore",
    "minecraft:deepslate_iron_ore",
    "minecraft:deepslate_lapis_ore",
    "minecraft:deepslate_redstone_ore",
    "minecraft:diamond_block",
    "minecraft:diamond_ore",
    "minecraft:dispenser",
    "minecraft:dropper",
    "minecraft:emerald_block",
    "minecraft:emerald_ore",
    "minecraft:enchanting_table",
    "minecraft:end_portal",
    "minecraft:end_portal_frame",
    "minecraft:ender_chest",
    "minecraft:furnace",
    "minecraft:glowstone",
    "minecraft:gold_block",
    "minecraft:gold_ore",
    "minecraft:hopper",
    "minecraft:iron_block",
    "minecraft:iron_ore",
    "minecraft:ladder",
    "minecraft:lapis_block",
    "minecraft:lapis_ore",
    "minecraft:lava",
    "minecraft:lodestone",
    "minecraft:mossy_cobblestone",
    "minecraft:nether_gold_ore",
    "minecraft:nether_portal",
    "minecraft:nether_quartz_ore",
    "minecraft:raw_copper_block",
    "minecraft:raw_gold_block",
    "minecraft:raw_iron_block",
    "minecraft:redstone_block",
    "minecraft:redstone_ore",
    "minecraft:repeating_command_block",
    "minecraft:spawner",
    "minecraft:suspicious_sand",
    "minecraft:tnt",
    "minecraft:torch",
    "minecraft:trapped_chest",
    "minecraft:water",
];

/// The X-Ray feature with its default settings.
#[must_use]
pub fn feature() -> Feature {
    Feature::new(XRAY, Category::Rendering, "Shows listed blocks through terrain")
        .with_setting(Setting::identifiers(
            BLOCK_LIST.name(),
            "Blocks that stay visible",
            DEFAULT_BLOCK_LIST,
        ))
        .with_setting(Setting::boolean(
            ONLY_EXPOSED.name(),
            "Also show blocks touching air",
            false,
        ))
        .with_setting(Setting::float(
            OPACITY.name(),
            "Opacity of other blocks; 0 hides them",
            0.0,
            0.0,
            MAX_OPACITY,
        ))
}

//! Kill-aura and classifier feature definitions, their setting keys, and the
//! per-step settings read.

use infinite_core::{
    BoolKind, Category, Feature, FeatureRegistry, FloatKind, IdentifierListKind, IntKind, Setting, SettingKey,
};

/// Kill-aura feature id.
pub const KILL_AURA: &str = "KillAura";
/// Friend-list feature id.
pub const PLAYER_MANAGER: &str = "PlayerManager";
/// Protected-entity feature id.
pub const NO_ATTACK: &str = "NoAttack";

/// Attack radius in blocks.
pub const RANGE: SettingKey<FloatKind> = SettingKey::new("Range");
/// Non-zero: at most one attack per step.
pub const ATTACK_DELAY: SettingKey<IntKind> = SettingKey::new("AttackDelay");
/// Target players.
pub const PLAYERS: SettingKey<BoolKind> = SettingKey::new("Players");
/// Target mobs.
pub const MOBS: SettingKey<BoolKind> = SettingKey::new("Mobs");
/// Candidates per step; `0` means unlimited.
pub const MAX_TARGETS: SettingKey<IntKind> = SettingKey::new("MaxTargets");
/// Ticks between attacks; `0` derives it from the weapon cooldown.
pub const ATTACK_FREQUENCY: SettingKey<IntKind> = SettingKey::new("AttackFrequency");
/// Turn to face each target before attacking.
pub const CHANGE_ANGLE: SettingKey<BoolKind> = SettingKey::new("ChangeAngle");

/// Player names never attacked.
pub const FRIENDS: SettingKey<IdentifierListKind> = SettingKey::new("Friends");
/// Player names marked hostile.
pub const ENEMIES: SettingKey<IdentifierListKind> = SettingKey::new("Enemies");
/// Entity types never attacked.
pub const PROTECTED_ENTITIES: SettingKey<IdentifierListKind> = SettingKey::new("ProtectedEntities");

const DEFAULT_RANGE: f64 = 4.2;
const DEFAULT_ATTACK_DELAY: i64 = 1;
const DEFAULT_MAX_TARGETS: i64 = 1;

/// The kill-aura feature with its default settings.
#[must_use]
pub fn kill_aura() -> Feature {
    Feature::new(KILL_AURA, Category::Fighting, "Attacks nearby entities automatically")
        .with_setting(Setting::float(RANGE.name(), "Attack radius", DEFAULT_RANGE, 3.0, 7.0))
        .with_setting(Setting::integer(
            ATTACK_DELAY.name(),
            "Non-zero attacks one target per tick",
            DEFAULT_ATTACK_DELAY,
            0,
            20,
        ))
        .with_setting(Setting::boolean(PLAYERS.name(), "Attack players", true))
        .with_setting(Setting::boolean(MOBS.name(), "Attack mobs", false))
        .with_setting(Setting::integer(
            MAX_TARGETS.name(),
            "Targets per tick; 0 is unlimited",
            DEFAULT_MAX_TARGETS,
            0,
            10,
        ))
        .with_setting(Setting::integer(
            ATTACK_FREQUENCY.name(),
            "Ticks between attacks; 0 follows the weapon cooldown",
            0,
            0,
            20,
        ))
        .with_setting(Setting::boolean(CHANGE_ANGLE.name(), "Face the target", false))
}

/// The player-list feature.
#[must_use]
pub fn player_manager() -> Feature {
    Feature::new(PLAYER_MANAGER, Category::Fighting, "Friend and enemy lists")
        .with_setting(Setting::names(FRIENDS.name(), "Players treated as friends", std::iter::empty::<&str>()))
        .with_setting(Setting::names(ENEMIES.name(), "Players treated as enemies", std::iter::empty::<&str>()))
}

/// The protected-entity feature.
#[must_use]
pub fn no_attack() -> Feature {
    Feature::new(NO_ATTACK, Category::Fighting, "Entity types that are never attacked").with_setting(
        Setting::identifiers(PROTECTED_ENTITIES.name(), "Protected entity types", std::iter::empty::<&str>()),
    )
}

/// Kill-aura settings resolved once per step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KillAuraSettings {
    /// Attack radius.
    pub range: f64,
    /// Non-zero: stop after the first attack of a step.
    pub attack_delay: i64,
    /// Target players.
    pub target_players: bool,
    /// Target mobs.
    pub target_mobs: bool,
    /// Candidates per step; `0` is unlimited.
    pub max_targets: i64,
    /// Fixed cooldown in ticks; `0` derives it from the weapon.
    pub attack_frequency: i64,
    /// Face each target.
    pub change_angle: bool,
}

impl Default for KillAuraSettings {
    fn default() -> Self {
        Self {
            range: DEFAULT_RANGE,
            attack_delay: DEFAULT_ATTACK_DELAY,
            target_players: true,
            target_mobs: false,
            max_targets: DEFAULT_MAX_TARGETS,
            attack_frequency: 0,
            change_angle: false,
        }
    }
}

impl KillAuraSettings {
    /// Current settings, or `None` while kill-aura is disabled.
    ///
    /// Missing or ill-typed settings fall back to their defaults.
    #[must_use]
    pub fn read(registry: &FeatureRegistry) -> Option<Self> {
        if !registry.is_enabled(KILL_AURA) {
            return None;
        }
        let d = Self::default();
        Some(Self {
            range: registry.value_or(KILL_AURA, RANGE, d.range),
            attack_delay: registry.value_or(KILL_AURA, ATTACK_DELAY, d.attack_delay),
            target_players: registry.value_or(KILL_AURA, PLAYERS, d.target_players),
            target_mobs: registry.value_or(KILL_AURA, MOBS, d.target_mobs),
            max_targets: registry.value_or(KILL_AURA, MAX_TARGETS, d.max_targets),
            attack_frequency: registry.value_or(KILL_AURA, ATTACK_FREQUENCY, d.attack_frequency),
            change_angle: registry.value_or(KILL_AURA, CHANGE_ANGLE, d.change_angle),
        })
    }

    /// Candidate cap, `None` when unlimited.
    #[must_use]
    pub fn target_cap(&self) -> Option<usize> {
        usize::try_from(self.max_targets).ok().filter(|&cap| cap > 0)
    }
}

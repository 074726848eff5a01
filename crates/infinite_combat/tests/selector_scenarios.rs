//! Integration tests for the kill-aura step through the public API.

use infinite_combat::kill_aura::{self, ATTACK_DELAY, FRIENDS, KILL_AURA, MAX_TARGETS, MOBS, PLAYER_MANAGER, RANGE};
use infinite_combat::{
    effective_delay, Attacker, CombatWorld, EntityId, EntitySnapshot, StepPhase, TargetSelector,
};
use infinite_core::{FeatureRegistry, SettingValue};
use infinite_shared::Vec3;

fn registry() -> FeatureRegistry {
    let mut registry = FeatureRegistry::new();
    registry.register(kill_aura::kill_aura()).unwrap();
    registry.register(kill_aura::player_manager()).unwrap();
    registry.register(kill_aura::no_attack()).unwrap();
    registry.enable(KILL_AURA).unwrap();
    registry
}

fn set(registry: &mut FeatureRegistry, setting: &str, value: SettingValue) {
    registry.set_setting(KILL_AURA, setting, value).unwrap();
}

#[test]
fn test_nearest_single_target_sets_cooldown() {
    let mut registry = registry();
    set(&mut registry, RANGE.name(), SettingValue::Float(5.0));
    set(&mut registry, MAX_TARGETS.name(), SettingValue::Int(1));
    set(&mut registry, ATTACK_DELAY.name(), SettingValue::Int(1));

    let entities = [
        EntitySnapshot::player(10, "Far", Vec3::new(0.0, 0.0, 4.0)),
        EntitySnapshot::player(11, "Near", Vec3::new(2.0, 0.0, 0.0)),
    ];
    let mut attacker = Attacker::new(EntityId(1), Vec3::ZERO);
    attacker.cooldown_progress = 0.5;
    let world = CombatWorld { attacker, entities: &entities, tick: 40 };

    let mut selector = TargetSelector::new();
    let outcome = selector.step(&registry, Some(&world));

    assert_eq!(outcome.phase, StepPhase::Ready);
    assert_eq!(outcome.commands.len(), 1);
    assert_eq!(outcome.commands[0].target, EntityId(11));
    assert_eq!(outcome.cooldown_ticks, effective_delay(0, 0.5));
    assert_eq!(selector.state().cooldown_ticks, 2);
}

#[test]
fn test_unlimited_targets_in_distance_order() {
    let mut registry = registry();
    set(&mut registry, MOBS.name(), SettingValue::Bool(true));
    set(&mut registry, MAX_TARGETS.name(), SettingValue::Int(0));
    set(&mut registry, ATTACK_DELAY.name(), SettingValue::Int(0));
    set(&mut registry, RANGE.name(), SettingValue::Float(7.0));

    let entities: Vec<EntitySnapshot> = [6.5, 0.5, 3.0, 8.0, 1.5, 5.0]
        .iter()
        .zip(100..)
        .map(|(&x, id)| EntitySnapshot::mob(id, "minecraft:skeleton", Vec3::new(x, 0.0, 0.0)))
        .collect();
    let world = CombatWorld {
        attacker: Attacker::new(EntityId(1), Vec3::ZERO),
        entities: &entities,
        tick: 0,
    };

    let outcome = TargetSelector::new().step(&registry, Some(&world));
    assert_eq!(outcome.commands.len(), 5);
    assert!(outcome
        .commands
        .windows(2)
        .all(|pair| pair[0].distance <= pair[1].distance));
}

#[test]
fn test_friends_spared_only_while_player_manager_enabled() {
    let mut registry = registry();
    registry
        .set_setting(PLAYER_MANAGER, FRIENDS.name(), SettingValue::identifiers(["Alex"]))
        .unwrap();
    let entities = [EntitySnapshot::player(2, "Alex", Vec3::new(1.0, 0.0, 0.0))];
    let world = CombatWorld {
        attacker: Attacker::new(EntityId(1), Vec3::ZERO),
        entities: &entities,
        tick: 0,
    };

    assert_eq!(TargetSelector::new().step(&registry, Some(&world)).commands.len(), 1);

    registry.enable(PLAYER_MANAGER).unwrap();
    assert!(TargetSelector::new().step(&registry, Some(&world)).commands.is_empty());
}

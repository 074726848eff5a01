//! End-to-end scenarios through the client facade.

use infinite::catalog::{self, KILL_AURA, PLAYER_MANAGER, XRAY};
use infinite::{ClientConfig, ClientEvent, InfiniteClient};
use infinite_combat::kill_aura::{ATTACK_DELAY, FRIENDS, MAX_TARGETS, RANGE};
use infinite_combat::{effective_delay, Attacker, CombatWorld, EntityId, EntitySnapshot, StepPhase};
use infinite_core::{Profile, SettingValue};
use infinite_render::xray::{BLOCK_LIST, OPACITY};
use infinite_render::{BlockVisibilityQuery, Neighbor, RenderLayer, VisibilityDecision, VisibilityKind};
use infinite_shared::{BlockPos, Direction, Vec3};

fn client() -> InfiniteClient {
    InfiniteClient::new(ClientConfig::default()).unwrap()
}

fn query<'a>(block: &'a str, neighbor: Neighbor<'a>) -> BlockVisibilityQuery<'a> {
    BlockVisibilityQuery::new(block, BlockPos::new(0, 12, 0), Direction::Up).with_neighbor(neighbor)
}

#[test]
fn test_disabled_xray_defers_everything() {
    let client = client();
    for neighbor in [Neighbor::Air, Neighbor::Absent, Neighbor::Block("minecraft:diamond_ore")] {
        assert_eq!(client.resolve_face(&query("minecraft:stone", neighbor)), VisibilityDecision::DEFER);
    }
    assert_eq!(client.block_layer(), None);
    assert_eq!(client.block_entity_decision("minecraft:chest"), VisibilityDecision::DEFER);
}

#[test]
fn test_stone_next_to_listed_ore_draws() {
    let client = client();
    client
        .set_setting(XRAY, BLOCK_LIST.name(), SettingValue::identifiers(["ore"]))
        .unwrap();
    client.enable(XRAY).unwrap();

    let decision = client.resolve_face(&query("stone", Neighbor::Block("ore")));
    assert_eq!(decision.kind, VisibilityKind::Draw);

    let hidden = client.resolve_face(&query("stone", Neighbor::Block("dirt")));
    assert_eq!(hidden, VisibilityDecision::HIDE);
}

#[test]
fn test_opacity_mode_draws_translucent() {
    let client = client();
    client
        .set_setting(XRAY, BLOCK_LIST.name(), SettingValue::identifiers(std::iter::empty::<&str>()))
        .unwrap();
    client.set_setting(XRAY, OPACITY.name(), SettingValue::Float(0.5)).unwrap();
    client.enable(XRAY).unwrap();

    let pass = client.face_pass(&query("minecraft:stone", Neighbor::Block("minecraft:dirt")));
    assert_eq!(pass.decision().kind, VisibilityKind::Draw);
    assert!((pass.opacity() - 0.5).abs() < f32::EPSILON);
    assert_eq!(client.block_layer(), Some(RenderLayer::Translucent));
    assert!(!client.skip_fluid_face(&query("minecraft:water", Neighbor::Air), true));
}

#[test]
fn test_nearest_target_through_tick() {
    let client = client();
    let events = client.events();
    client.enable(KILL_AURA).unwrap();
    client.set_setting(KILL_AURA, RANGE.name(), SettingValue::Float(5.0)).unwrap();
    client.set_setting(KILL_AURA, MAX_TARGETS.name(), SettingValue::Int(1)).unwrap();
    client.set_setting(KILL_AURA, ATTACK_DELAY.name(), SettingValue::Int(3)).unwrap();
    events.drain();

    let entities = [
        EntitySnapshot::player(20, "Far", Vec3::new(4.0, 0.0, 0.0)),
        EntitySnapshot::player(21, "Near", Vec3::new(0.0, 0.0, 2.0)),
    ];
    let world = CombatWorld {
        attacker: Attacker::new(EntityId(1), Vec3::ZERO),
        entities: &entities,
        tick: 99,
    };

    let outcome = client.tick(Some(&world));
    assert_eq!(outcome.phase, StepPhase::Ready);
    assert_eq!(outcome.commands.len(), 1);
    assert_eq!(outcome.commands[0].target, EntityId(21));
    assert_eq!(outcome.cooldown_ticks, effective_delay(0, 1.0));

    let published = events.drain();
    assert_eq!(published.len(), 1);
    assert!(matches!(
        published[0],
        ClientEvent::AttackIssued { target: EntityId(21), tick: 99, .. }
    ));

    let cooling = client.tick(Some(&world));
    assert_eq!(cooling.phase, StepPhase::Cooling);
    assert!(cooling.commands.is_empty());
}

#[test]
fn test_disabling_kill_aura_resets_cooldown() {
    let client = client();
    client.enable(KILL_AURA).unwrap();
    let entities = [EntitySnapshot::player(5, "Steve", Vec3::new(1.0, 0.0, 0.0))];
    let mut attacker = Attacker::new(EntityId(1), Vec3::ZERO);
    attacker.cooldown_progress = 0.25;
    let world = CombatWorld {
        attacker,
        entities: &entities,
        tick: 0,
    };

    assert_eq!(client.tick(Some(&world)).phase, StepPhase::Ready);
    assert_eq!(client.tick(Some(&world)).phase, StepPhase::Cooling);

    client.disable(KILL_AURA).unwrap();
    client.enable(KILL_AURA).unwrap();
    assert_eq!(client.tick(Some(&world)).phase, StepPhase::Ready);
}

#[test]
fn test_friends_survive_through_facade() {
    let client = client();
    client.enable(KILL_AURA).unwrap();
    client.enable(PLAYER_MANAGER).unwrap();
    client
        .set_setting(PLAYER_MANAGER, FRIENDS.name(), SettingValue::identifiers(["Alex"]))
        .unwrap();

    let entities = [EntitySnapshot::player(3, "Alex", Vec3::new(1.0, 0.0, 0.0))];
    let world = CombatWorld {
        attacker: Attacker::new(EntityId(1), Vec3::ZERO),
        entities: &entities,
        tick: 0,
    };
    assert!(client.tick(Some(&world)).commands.is_empty());
}

#[test]
fn test_cascade_publishes_every_change() {
    let client = client();
    let events = client.events();
    client.enable(catalog::FREE_CAMERA).unwrap();

    let toggled: Vec<_> = events
        .drain()
        .into_iter()
        .filter_map(|event| match event {
            ClientEvent::FeatureToggled { id, enabled } => Some((id, enabled)),
            _ => None,
        })
        .collect();
    assert!(toggled.contains(&(catalog::FREE_CAMERA.to_owned(), true)));
    assert!(toggled.contains(&(catalog::FREEZE.to_owned(), true)));
    assert_eq!(toggled.len(), 2);
}

#[test]
fn test_profile_round_trip_through_facade() {
    let client = client();
    let events = client.events();
    let profile = Profile::from_toml_str(
        r#"
        [features.XRay]
        enabled = true
        [features.XRay.settings]
        Opacity = 0.4
        BlockList = ["diamond_ore", "ancient_debris"]

        [features.KillAura.settings]
        Range = 9.0
        "#,
    )
    .unwrap();

    let report = client.apply_profile(&profile);
    assert_eq!(report.issues.len(), 1);
    assert!(client.is_feature_enabled(XRAY));
    assert!((client.get_setting_float(XRAY, OPACITY.name(), 0.0) - 0.4).abs() < 1e-6);
    assert!(events.drain().contains(&ClientEvent::ReloadWorldRenderer));

    let saved = Profile::from_snapshot(&client.snapshot()).to_toml_string().unwrap();
    let restored = client_from(&saved);
    assert_eq!(restored.snapshot(), client.snapshot());
}

fn client_from(profile: &str) -> InfiniteClient {
    let client = client();
    let report = client.apply_profile(&Profile::from_toml_str(profile).unwrap());
    assert!(report.is_clean());
    client
}

#[test]
fn test_reset_restores_defaults_and_reloads() {
    let client = client();
    let events = client.events();
    client.enable(XRAY).unwrap();
    client.enable(catalog::STEP).unwrap();
    events.drain();

    client.reset_all();
    assert!(!client.is_feature_enabled(XRAY));
    assert!(!client.is_feature_enabled(catalog::STEP));
    let published = events.drain();
    assert!(published.contains(&ClientEvent::ReloadWorldRenderer));
    assert_eq!(
        published
            .iter()
            .filter(|event| matches!(event, ClientEvent::FeatureToggled { .. }))
            .count(),
        2
    );
}

#[test]
fn test_attack_distance_is_measured_from_the_feet() {
    let client = client();
    let events = client.events();
    client.enable(KILL_AURA).unwrap();
    events.drain();

    let entities = [EntitySnapshot::player(8, "Steve", Vec3::new(3.0, 0.0, 4.0))];
    let world = CombatWorld {
        attacker: Attacker::new(EntityId(1), Vec3::new(0.0, 0.0, 0.0)),
        entities: &entities,
        tick: 3,
    };
    client.set_setting(KILL_AURA, RANGE.name(), SettingValue::Float(6.0)).unwrap();
    client.tick(Some(&world));

    match events.try_recv() {
        Some(ClientEvent::AttackIssued { target, distance, .. }) => {
            assert_eq!(target, EntityId(8));
            assert!((distance - 5.0).abs() < 1e-9);
        }
        other => panic!("expected an attack, got {other:?}"),
    }
}

//! # Target Selector
//!
//! Drives kill-aura once per simulation step.
//!
//! ## State machine
//!
//! ```text
//!   Ready (cooldown == 0) --attack--> Cooling (cooldown = delay)
//!   Cooling --step--> cooldown - 1 --> ... --> Ready
//! ```
//!
//! A cooling step only decrements. A ready step scans the world, filters and
//! ranks candidates, and emits attack commands nearest first. Every attack
//! sets the cooldown to the effective delay.

use infinite_core::FeatureRegistry;
use infinite_shared::TICK_RATE;

use crate::aim::AimAngles;
use crate::classify::{FriendList, ProtectedList, RegistryFriends, RegistryProtected};
use crate::entity::{CombatWorld, EntityId, EntityKind, EntityRef};
use crate::kill_aura::KillAuraSettings;

/// The only state that survives between steps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttackState {
    /// Steps left before the next attack.
    pub cooldown_ticks: u32,
}

impl AttackState {
    /// Whether an attack may fire this step.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.cooldown_ticks == 0
    }
}

/// Phase a step ended in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepPhase {
    /// Disabled, no world, or dead: nothing happened.
    Idle,
    /// The cooldown was decremented.
    Cooling,
    /// Candidates were scanned; commands may be empty.
    Ready,
}

/// One attack for the host's interaction layer to execute.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackCommand {
    /// Target.
    pub target: EntityId,
    /// Distance from the player's feet to the target when selected.
    pub distance: f64,
    /// Orientation to apply before attacking, when angle changes are on.
    pub aim: Option<AimAngles>,
}

/// Result of one step.
#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome {
    /// Phase of this step.
    pub phase: StepPhase,
    /// Attacks in emission order, nearest first.
    pub commands: Vec<AttackCommand>,
    /// Cooldown after the step.
    pub cooldown_ticks: u32,
}

impl StepOutcome {
    fn without_attack(phase: StepPhase, state: AttackState) -> Self {
        Self {
            phase,
            commands: Vec::new(),
            cooldown_ticks: state.cooldown_ticks,
        }
    }

    /// Orientation the player ends the step with, if any command turned it.
    #[must_use]
    pub fn last_aim(&self) -> Option<AimAngles> {
        self.commands.iter().rev().find_map(|command| command.aim)
    }
}

/// Ticks between attacks.
///
/// A fixed `attack_frequency` is used as is. Zero derives the delay from the
/// weapon: `20 / (progress * 20)` truncated, and never below one tick.
/// An uncharged weapon (`progress == 0`) yields the longest possible delay.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn effective_delay(attack_frequency: i64, cooldown_progress: f32) -> u32 {
    if let Ok(fixed) = u32::try_from(attack_frequency) {
        if fixed > 0 {
            return fixed;
        }
    }
    let ticks = f64::from(TICK_RATE);
    let derived = (ticks / (f64::from(cooldown_progress) * ticks)) as u32;
    derived.max(1)
}

/// Kill-aura targeting with its cooldown.
#[derive(Clone, Debug, Default)]
pub struct TargetSelector {
    state: AttackState,
}

impl TargetSelector {
    /// A ready selector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> AttackState {
        self.state
    }

    /// Returns to ready.
    pub fn reset(&mut self) {
        self.state = AttackState::default();
    }

    /// Advances one step with the registry's friend and protected lists.
    pub fn step<E: EntityRef>(
        &mut self,
        registry: &FeatureRegistry,
        world: Option<&CombatWorld<'_, E>>,
    ) -> StepOutcome {
        self.step_with(
            registry,
            world,
            &RegistryFriends(registry),
            &RegistryProtected(registry),
        )
    }

    /// Advances one step with caller-supplied classifiers.
    pub fn step_with<E: EntityRef>(
        &mut self,
        registry: &FeatureRegistry,
        world: Option<&CombatWorld<'_, E>>,
        friends: &impl FriendList,
        protected: &impl ProtectedList,
    ) -> StepOutcome {
        let (Some(settings), Some(world)) = (KillAuraSettings::read(registry), world) else {
            return StepOutcome::without_attack(StepPhase::Idle, self.state);
        };
        if !world.attacker.alive {
            return StepOutcome::without_attack(StepPhase::Idle, self.state);
        }

        let delay = effective_delay(settings.attack_frequency, world.attacker.cooldown_progress);

        if self.state.cooldown_ticks > 0 {
            self.state.cooldown_ticks -= 1;
            return StepOutcome::without_attack(StepPhase::Cooling, self.state);
        }

        let candidates = rank_candidates(&settings, world, friends, protected);
        let eye = world.attacker.eye();
        let mut commands = Vec::with_capacity(candidates.len());

        for (index, distance) in candidates {
            let target = &world.entities[index];
            let aim = settings
                .change_angle
                .then(|| AimAngles::facing(eye, target.position()));
            commands.push(AttackCommand {
                target: target.id(),
                distance,
                aim,
            });
            self.state.cooldown_ticks = delay;
            tracing::debug!(
                target = target.id().0,
                distance,
                cooldown = delay,
                tick = world.tick,
                "kill-aura attack"
            );
            if settings.attack_delay != 0 {
                break;
            }
        }

        StepOutcome {
            phase: StepPhase::Ready,
            commands,
            cooldown_ticks: self.state.cooldown_ticks,
        }
    }
}

/// Indices and distances of admissible entities, nearest first, capped.
fn rank_candidates<E: EntityRef>(
    settings: &KillAuraSettings,
    world: &CombatWorld<'_, E>,
    friends: &impl FriendList,
    protected: &impl ProtectedList,
) -> Vec<(usize, f64)> {
    let origin = world.attacker.position;
    let mut candidates: Vec<(usize, f64)> = world
        .entities
        .iter()
        .enumerate()
        .filter(|(_, entity)| entity.id() != world.attacker.id && entity.is_alive())
        .filter(|(_, entity)| match entity.kind() {
            EntityKind::Player => settings.target_players && !friends.is_friend(entity.name()),
            EntityKind::Mob => settings.target_mobs && !protected.is_protected(entity.type_id()),
            EntityKind::Other => false,
        })
        .map(|(index, entity)| (index, origin.distance(entity.position())))
        .filter(|&(_, distance)| distance <= settings.range)
        .collect();

    // Stable: equal distances keep host iteration order.
    candidates.sort_by(|a, b| a.1.total_cmp(&b.1));
    if let Some(cap) = settings.target_cap() {
        candidates.truncate(cap);
    }
    candidates
}

//! Entity boundary: what the selector needs to know about the host's world.

use bytemuck::{Pod, Zeroable};
use infinite_shared::{Vec3, STANDING_EYE_HEIGHT};
use serde::{Deserialize, Serialize};

/// Host entity id.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Pod, Zeroable, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// Coarse entity classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Another player.
    Player,
    /// Any other living entity.
    Mob,
    /// Items, projectiles, vehicles. Never targeted.
    Other,
}

/// A live entity as seen by the selector.
pub trait EntityRef {
    /// Host id.
    fn id(&self) -> EntityId;

    /// Classification.
    fn kind(&self) -> EntityKind;

    /// Display name; matched against the friend list for players.
    fn name(&self) -> &str;

    /// Entity type identifier (`minecraft:villager`); matched against the
    /// protected list for mobs.
    fn type_id(&self) -> &str;

    /// Feet position.
    fn position(&self) -> Vec3;

    /// Whether the entity is alive.
    fn is_alive(&self) -> bool;
}

/// The local player at the time of a step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attacker {
    /// Own entity id, excluded from the scan.
    pub id: EntityId,
    /// Feet position.
    pub position: Vec3,
    /// Eye height above the feet for the current pose.
    pub eye_height: f64,
    /// Whether the local player is alive.
    pub alive: bool,
    /// Weapon cooldown progress in `[0, 1]`; `1` means fully charged.
    pub cooldown_progress: f32,
}

impl Attacker {
    /// A living, standing, fully charged player at `position`.
    #[must_use]
    pub const fn new(id: EntityId, position: Vec3) -> Self {
        Self {
            id,
            position,
            eye_height: STANDING_EYE_HEIGHT,
            alive: true,
            cooldown_progress: 1.0,
        }
    }

    /// Eye position.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        self.position.raised(self.eye_height)
    }
}

/// World context of one step: the local player and the loaded entities.
#[derive(Clone, Copy, Debug)]
pub struct CombatWorld<'w, E> {
    /// Local player.
    pub attacker: Attacker,
    /// Loaded entities in host iteration order.
    pub entities: &'w [E],
    /// Host tick counter.
    pub tick: u64,
}

/// Owned entity record, for hosts that copy their entity table and for tests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    /// Host id.
    pub id: EntityId,
    /// Classification.
    pub kind: EntityKind,
    /// Display name.
    pub name: String,
    /// Entity type identifier.
    pub type_id: String,
    /// Feet position.
    pub position: Vec3,
    /// Whether the entity is alive.
    pub alive: bool,
}

impl EntitySnapshot {
    /// A living player.
    #[must_use]
    pub fn player(id: u64, name: &str, position: Vec3) -> Self {
        Self {
            id: EntityId(id),
            kind: EntityKind::Player,
            name: name.to_owned(),
            type_id: "minecraft:player".to_owned(),
            position,
            alive: true,
        }
    }

    /// A living mob of `type_id`.
    #[must_use]
    pub fn mob(id: u64, type_id: &str, position: Vec3) -> Self {
        Self {
            id: EntityId(id),
            kind: EntityKind::Mob,
            name: type_id.to_owned(),
            type_id: type_id.to_owned(),
            position,
            alive: true,
        }
    }
}

impl EntityRef for EntitySnapshot {
    fn id(&self) -> EntityId {
        self.id
    }

    fn kind(&self) -> EntityKind {
        self.kind
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn type_id(&self) -> &str {
        &self.type_id
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

//! # Infinite Combat
//!
//! Kill-aura target selection.
//!
//! Each simulation step the host hands the [`TargetSelector`] the local
//! player and the loaded entities. The selector filters them against the
//! kill-aura settings and the friend/protected lists, ranks them by
//! distance, and returns the attacks to perform. The host executes the
//! returned [`AttackCommand`]s with its own interaction layer.
//!
//! ## Example
//!
//! ```rust
//! use infinite_combat::kill_aura::{self, KILL_AURA};
//! use infinite_combat::{Attacker, CombatWorld, EntityId, EntitySnapshot, TargetSelector};
//! use infinite_core::FeatureRegistry;
//! use infinite_shared::Vec3;
//!
//! let mut registry = FeatureRegistry::new();
//! registry.register(kill_aura::kill_aura())?;
//! registry.enable(KILL_AURA)?;
//!
//! let entities = [EntitySnapshot::player(7, "Steve", Vec3::new(2.0, 0.0, 0.0))];
//! let world = CombatWorld {
//!     attacker: Attacker::new(EntityId(1), Vec3::ZERO),
//!     entities: &entities,
//!     tick: 0,
//! };
//!
//! let mut selector = TargetSelector::new();
//! let outcome = selector.step(&registry, Some(&world));
//! assert_eq!(outcome.commands[0].target, EntityId(7));
//! # Ok::<(), infinite_core::RegistryError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod aim;
pub mod classify;
pub mod entity;
pub mod kill_aura;
pub mod selector;

pub use aim::AimAngles;
pub use classify::{FriendList, NoExclusions, ProtectedList, RegistryFriends, RegistryProtected};
pub use entity::{Attacker, CombatWorld, EntityId, EntityKind, EntityRef, EntitySnapshot};
pub use kill_aura::KillAuraSettings;
pub use selector::{effective_delay, AttackCommand, AttackState, StepOutcome, StepPhase, TargetSelector};

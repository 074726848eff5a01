//! # Target Classifiers
//!
//! Deny lists consulted while filtering candidates. Both are traits so hosts
//! and tests can supply their own; the registry-backed implementations read
//! `PlayerManager.Friends` and `NoAttack.ProtectedEntities`, each only while
//! its feature is enabled.

use infinite_core::FeatureRegistry;
use infinite_shared::normalize_identifier;

use crate::kill_aura::{FRIENDS, NO_ATTACK, PLAYER_MANAGER, PROTECTED_ENTITIES};

/// Players that must never be attacked.
pub trait FriendList {
    /// Whether the player called `name` is a friend.
    fn is_friend(&self, name: &str) -> bool;
}

/// Entity types that must never be attacked.
pub trait ProtectedList {
    /// Whether entities of `type_id` are protected.
    fn is_protected(&self, type_id: &str) -> bool;
}

/// Nobody is a friend, nothing is protected.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoExclusions;

impl FriendList for NoExclusions {
    fn is_friend(&self, _name: &str) -> bool {
        false
    }
}

impl ProtectedList for NoExclusions {
    fn is_protected(&self, _type_id: &str) -> bool {
        false
    }
}

/// Friend list stored in the PlayerManager feature.
#[derive(Clone, Copy, Debug)]
pub struct RegistryFriends<'a>(pub &'a FeatureRegistry);

impl FriendList for RegistryFriends<'_> {
    fn is_friend(&self, name: &str) -> bool {
        self.0
            .setting(PLAYER_MANAGER, FRIENDS)
            .is_some_and(|friends| friends.contains(name))
    }
}

/// Protected entity types stored in the NoAttack feature.
#[derive(Clone, Copy, Debug)]
pub struct RegistryProtected<'a>(pub &'a FeatureRegistry);

impl ProtectedList for RegistryProtected<'_> {
    fn is_protected(&self, type_id: &str) -> bool {
        self.0
            .setting(NO_ATTACK, PROTECTED_ENTITIES)
            .is_some_and(|protected| protected.contains(normalize_identifier(type_id).as_ref()))
    }
}

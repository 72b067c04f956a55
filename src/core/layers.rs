//! Physics collision layers.

use bevy_rapier2d::prelude::{CollisionGroups, Group};

pub const PLAYER: Group = Group::GROUP_1;
/// Bosses and anything else projectiles are thrown back at
pub const EMITTER: Group = Group::GROUP_2;
pub const ENEMY: Group = Group::GROUP_3;
pub const ENEMY_PROJECTILE: Group = Group::GROUP_4;
pub const PLAYER_PROJECTILE: Group = Group::GROUP_5;
pub const TERRAIN: Group = Group::GROUP_6;

pub fn player_groups() -> CollisionGroups {
    CollisionGroups::new(PLAYER, TERRAIN.union(ENEMY).union(ENEMY_PROJECTILE))
}

pub fn emitter_groups() -> CollisionGroups {
    CollisionGroups::new(EMITTER, TERRAIN.union(PLAYER_PROJECTILE))
}

pub fn enemy_groups() -> CollisionGroups {
    CollisionGroups::new(ENEMY, TERRAIN.union(PLAYER))
}

pub fn terrain_groups() -> CollisionGroups {
    CollisionGroups::new(TERRAIN, Group::ALL)
}

/// Thrown at the player; only the player and terrain stop it.
pub fn enemy_projectile_groups() -> CollisionGroups {
    CollisionGroups::new(ENEMY_PROJECTILE, PLAYER.union(TERRAIN))
}

/// Redirected back; only the emitter layer and terrain stop it.
pub fn player_projectile_groups() -> CollisionGroups {
    CollisionGroups::new(PLAYER_PROJECTILE, EMITTER.union(TERRAIN))
}

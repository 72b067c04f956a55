//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::ai;
use crate::core::GameplaySet;

/// Enemy plugin - handles enemy AI, parry reactions and death.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                ai::react_to_parry,
                ai::ai_chase,
                ai::contact_damage,
                ai::handle_enemy_death,
                ai::despawn_dead_enemies,
            )
                .chain()
                .in_set(GameplaySet::Actors),
        );
    }
}

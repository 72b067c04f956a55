//! Parry plugin - the aim, dash and cooldown state machine.

use bevy::prelude::*;

use super::config::ParryConfig;
use super::input::read_parry_input;
use super::systems;
use crate::core::{init_tuning, GameplaySet};

/// Parry plugin - drives every [`ParryActor`](super::ParryActor).
pub struct ParryPlugin;

impl Plugin for ParryPlugin {
    fn build(&self, app: &mut App) {
        init_tuning::<ParryConfig>(app);

        systems::setup_parry_systems(app);

        // Device input only exists in the windowed game
        app.add_systems(
            Update,
            read_parry_input
                .in_set(GameplaySet::Input)
                .run_if(resource_exists::<ButtonInput<MouseButton>>)
                .run_if(resource_exists::<ButtonInput<KeyCode>>),
        );
    }
}

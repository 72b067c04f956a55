//! World plugin - arena setup.

use bevy::prelude::*;

use super::arena::setup_arena;

/// World plugin - spawns the demo arena with its camera and cast.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_arena);
    }
}

//! Game state definitions that gate when gameplay systems run.

use bevy::prelude::*;

/// Top-level flow of a run.
///
/// Menus and scene loading live outside this crate, so the game boots
/// straight into `InGame`:
/// - `InGame`: the simulation ticks
/// - `Paused`: the world stays visible but nothing advances
/// - `GameOver`: the player died; the clock is restored to full speed
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    #[default]
    InGame,
    Paused,
    GameOver,
}

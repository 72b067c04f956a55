//! Enemies module - ground enemies that chase the player and can be parried.

mod ai;
mod components;
mod plugin;

pub use ai::spawn_enemy;
pub use components::*;
pub use plugin::EnemyPlugin;

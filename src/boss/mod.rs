//! Boss module - a flying emitter that fires parryable projectiles.

mod components;
mod config;
mod plugin;
mod systems;

pub use components::*;
pub use config::BossConfig;
pub use plugin::BossPlugin;
pub use systems::spawn_boss;

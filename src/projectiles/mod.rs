//! Projectiles module - hazards that fly back at whoever threw them.

mod components;
mod plugin;
mod systems;

pub use components::*;
pub use plugin::ProjectilePlugin;
pub use systems::spawn_projectile;

//! Hazards module - the parry capability any enemy, projectile or prop can carry.

mod components;
mod plugin;
mod systems;

pub use components::*;
pub use plugin::HazardPlugin;

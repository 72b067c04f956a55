//! Combat module - health, damage and death bookkeeping.

mod components;
mod melee;
mod plugin;
mod systems;

pub use components::*;
pub use plugin::CombatPlugin;

//! World module - the demo arena.

mod arena;
mod components;
mod plugin;

pub use arena::setup_arena;
pub use components::*;
pub use plugin::WorldPlugin;

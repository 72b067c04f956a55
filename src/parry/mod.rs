//! Parry module - lock onto a hazard, aim in frozen time, dash and knock it back.

mod components;
mod config;
pub mod dash;
mod input;
mod plugin;
mod systems;

pub use components::*;
pub use config::{ParryConfig, TriggerMode};
pub use plugin::ParryPlugin;
pub use systems::ParrySet;

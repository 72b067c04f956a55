//! Core game module - states, events, tuning data and the time dilation
//! service every other plugin builds upon.

mod data;
mod error;
mod events;
pub mod layers;
mod plugin;
mod states;
mod time_dilation;
mod tween;

pub use data::*;
pub use error::ConfigError;
pub use events::*;
pub use plugin::{CorePlugin, GameplaySet, TimelineSet};
pub use states::*;
pub use time_dilation::*;
pub use tween::*;

//! Feedback module - beams, outline pulse, hazard blink and sound cues.
//!
//! Gameplay code only fires [`ParryVfx`] and [`ParrySfx`] events or swaps the
//! [`ParryOutline`] mode; everything here reacts to that.

mod audio;
mod components;
mod plugin;
mod systems;

pub use audio::{FeedbackAudioPlugin, ParrySounds};
pub use components::*;
pub use plugin::{FeedbackPlugin, FeedbackVisualsPlugin};

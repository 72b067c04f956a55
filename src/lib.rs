//! Parry Dash - a side-view arena built around a time-freezing parry.
//!
//! Press parry near a hazard to jump onto it; gameplay slows to a crawl while
//! you aim, and letting go dashes you out (never through walls) and knocks
//! the hazard the other way. Boss projectiles fly back at the boss.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, time dilation, tuning files
//! - **Combat**: Health, invincibility windows, damage and deaths
//! - **Hazards**: The `Parryable` capability: knockback, stun, notifications
//! - **Parry**: The player's aim/dash/cooldown state machine
//! - **Projectiles**: Shots that redirect toward their emitter when parried
//! - **Enemies**: Ground enemies that chase and get stunned
//! - **Boss**: The flying emitter with health phases
//! - **Feedback**: Beams, outline pulse, hazard blink, sound cues
//! - **Player**: Side-view movement and spawning
//! - **World**: The demo arena

pub mod boss;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod feedback;
pub mod hazards;
pub mod parry;
pub mod player;
pub mod projectiles;
pub mod world;

use bevy::app::PluginGroupBuilder;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

/// Frame length used by [`create_headless_app`].
pub const HEADLESS_FRAME: Duration = Duration::from_millis(16);

/// Simulation plugins that need neither a window, a renderer nor physics.
pub struct GameplayPlugins;

impl PluginGroup for GameplayPlugins {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            // Core systems (must be first)
            .add(core::CorePlugin)
            .add(combat::CombatPlugin)
            .add(hazards::HazardPlugin)
            .add(parry::ParryPlugin)
            .add(projectiles::ProjectilePlugin)
            .add(enemies::EnemyPlugin)
            .add(boss::BossPlugin)
            .add(feedback::FeedbackPlugin)
            .add(player::PlayerPlugin)
    }
}

/// Main game plugin that adds all sub-plugins.
pub struct ParryDashPlugin;

impl Plugin for ParryDashPlugin {
    fn build(&self, app: &mut App) {
        app
            .add_plugins(GameplayPlugins)

            // Presentation
            .add_plugins(feedback::FeedbackVisualsPlugin)
            .add_plugins(feedback::FeedbackAudioPlugin)

            // World systems
            .add_plugins(world::WorldPlugin);
    }
}

/// App with the full simulation and a manual clock, for tests and tools.
///
/// Every `update()` advances real time by [`HEADLESS_FRAME`]; virtual time
/// advances by that much times the current dilation.
pub fn create_headless_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(HEADLESS_FRAME))
        .add_plugins(GameplayPlugins);
    app
}

//! Parry Dash - Entry Point
//!
//! Controls:
//! - A/D: Move
//! - Space or W: Jump
//! - Left mouse or K: Hold near a hazard to aim, release to dash
//! - Mouse or arrow keys: Aim
//! - Right mouse or J: Melee swing
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_kira_audio::AudioPlugin;
use bevy_rapier2d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins; kira replaces the built-in audio
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Parry Dash".to_string(),
                        resolution: (1280.0, 720.0).into(),
                        ..default()
                    }),
                    ..default()
                })
                .disable::<bevy::audio::AudioPlugin>(),
        )

        // Audio
        .add_plugins(AudioPlugin)

        // Our game plugin
        .add_plugins(parry_dash::ParryDashPlugin)

        // Physics; after the game so collision events are already registered for per-frame updates
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        .run();
}

//! Feedback plugins.

use bevy::prelude::*;

use super::components::*;
use super::systems::*;
use crate::core::GameplaySet;

/// Event plumbing and effect lifetimes. Safe to run without a renderer.
pub struct FeedbackPlugin;

impl Plugin for FeedbackPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ParryVfx>()
            .add_event::<ParrySfx>()
            .add_systems(
                Update,
                (cue_hazard_parried, spawn_beams, animate_beams, tick_outlines)
                    .in_set(GameplaySet::Feedback),
            );
    }
}

/// Gizmo drawing and sprite tinting for the windowed game.
pub struct FeedbackVisualsPlugin;

impl Plugin for FeedbackVisualsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (draw_beams, draw_outlines, tint_stunned_hazards).after(GameplaySet::Feedback),
        );
    }
}

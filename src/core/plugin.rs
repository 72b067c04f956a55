//! Core plugin that sets up game states, events, system ordering and the
//! time dilation service.

use bevy::prelude::*;
use bevy_rapier2d::prelude::CollisionEvent;

use super::events::*;
use super::states::*;
use super::time_dilation::*;

/// Ordering of gameplay work within one frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    /// Device input is sampled into intent components
    Input,
    /// Parry actors advance their state machines
    Parry,
    /// Hazards resolve strikes and tick stun windows
    Hazards,
    /// Projectiles redirect, collide and expire
    Projectiles,
    /// Enemy and boss behaviour
    Actors,
    /// Damage and death bookkeeping
    Damage,
    /// Feedback sinks and per-frame cleanup
    Feedback,
}

/// Time dilation commit, run once per frame after all gameplay.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimelineSet;

/// Core plugin - must be added first as other plugins depend on it.
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            .init_state::<GameState>()
            .init_resource::<TimeDilation>()

            // Register global events
            .add_event::<DamageEvent>()
            .add_event::<DeathEvent>()
            .add_event::<ParryStrike>()
            .add_event::<Parried>()
            .add_event::<ParryEffectEnded>()
            .add_event::<ParryExecuted>()
            .add_event::<CancelParry>()
            // Registered here too so contact systems run without the physics plugin
            .add_event::<CollisionEvent>()

            .configure_sets(
                Update,
                (
                    GameplaySet::Input,
                    GameplaySet::Parry,
                    GameplaySet::Hazards,
                    GameplaySet::Projectiles,
                    GameplaySet::Actors,
                    GameplaySet::Damage,
                    GameplaySet::Feedback,
                )
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )

            // Ramp samples real time, so it keeps running while paused
            .add_systems(
                Last,
                (advance_time_ramp, commit_time_dilation)
                    .chain()
                    .in_set(TimelineSet),
            )
            .add_systems(OnEnter(GameState::GameOver), reset_time_dilation)

            .add_systems(
                Update,
                handle_pause_input.run_if(resource_exists::<ButtonInput<KeyCode>>),
            );
    }
}

/// Handle Escape key to pause/unpause the game.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            GameState::InGame => next_state.set(GameState::Paused),
            GameState::Paused => next_state.set(GameState::InGame),
            _ => {}
        }
    }
}

//! Combat systems - invincibility, damage and death handling.

use bevy::prelude::*;
use std::collections::HashSet;

use super::components::*;
use super::melee::{execute_melee, read_attack_input};
use crate::boss::Boss;
use crate::core::{GameState, GameplaySet};
use crate::enemies::Enemy;
use crate::player::Player;

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app.add_systems(
        Update,
        read_attack_input
            .in_set(GameplaySet::Input)
            .run_if(resource_exists::<ButtonInput<MouseButton>>)
            .run_if(resource_exists::<ButtonInput<KeyCode>>),
    )
    .add_systems(Update, execute_melee.in_set(GameplaySet::Actors))
    .add_systems(
        Update,
        (tick_invincibility, apply_damage, handle_deaths)
            .chain()
            .in_set(GameplaySet::Damage),
    );
}

/// Count down invincibility windows on gameplay time.
fn tick_invincibility(time: Res<Time>, mut query: Query<&mut Health>) {
    for mut health in query.iter_mut() {
        health.tick(time.delta_secs());
    }
}

/// Apply damage to entities.
fn apply_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageEvent>,
    mut health_query: Query<(&mut Health, Option<&Dead>)>,
    mut death_events: EventWriter<DeathEvent>,
) {
    // Track entities that died this frame to avoid duplicate death events
    let mut died_this_frame = HashSet::new();

    for event in damage_events.read() {
        if died_this_frame.contains(&event.target) {
            continue;
        }

        let Ok((mut health, dead)) = health_query.get_mut(event.target) else {
            continue;
        };

        // Skip if already dead (from previous frames)
        if dead.is_some() {
            continue;
        }

        let taken = health.take_damage(event.amount);
        if taken == 0 {
            debug!("{:?} ignored {} damage", event.target, event.amount);
            continue;
        }

        info!(
            "{:?} took {} damage ({}/{})",
            event.target, taken, health.current, health.maximum
        );

        if health.is_dead() {
            died_this_frame.insert(event.target);
            commands.entity(event.target).insert(Dead);
            death_events.send(DeathEvent {
                entity: event.target,
                killed_by: event.source,
            });
        }
    }
}

/// Route deaths to whoever owns the dying entity's teardown.
fn handle_deaths(
    mut commands: Commands,
    mut death_events: EventReader<DeathEvent>,
    player_query: Query<(), With<Player>>,
    owned_query: Query<(), Or<(With<Enemy>, With<Boss>)>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for event in death_events.read() {
        if player_query.get(event.entity).is_ok() {
            info!("Player died! Transitioning to Game Over...");
            next_state.set(GameState::GameOver);
        } else if owned_query.get(event.entity).is_ok() {
            // Enemy and boss plugins run their own death sequences
        } else if let Some(entity) = commands.get_entity(event.entity) {
            entity.despawn_recursive();
        }
    }
}

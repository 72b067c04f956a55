//! Enemy AI behavior systems.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{AiState, AttackTimer, DeathTimer, Enemy, EnemyStats};
use crate::combat::Health;
use crate::core::{layers, DamageEvent, DeathEvent, Parried, ParryEffectEnded};
use crate::feedback::HazardTint;
use crate::hazards::Parryable;
use crate::player::Player;

/// Stop chasing while parried and resume once the stun wears off.
pub fn react_to_parry(
    mut parried: EventReader<Parried>,
    mut recovered: EventReader<ParryEffectEnded>,
    mut enemies: Query<&mut AiState, With<Enemy>>,
) {
    for event in parried.read() {
        if let Ok(mut state) = enemies.get_mut(event.entity) {
            if *state != AiState::Dying {
                *state = AiState::Stunned;
            }
        }
    }

    for event in recovered.read() {
        if let Ok(mut state) = enemies.get_mut(event.entity) {
            if *state == AiState::Stunned {
                *state = AiState::Idle;
            }
        }
    }
}

/// Run along the ground toward the player while they are in range.
pub fn ai_chase(
    player_query: Query<&Transform, (With<Player>, Without<Enemy>)>,
    mut enemy_query: Query<
        (&Transform, &EnemyStats, &mut AiState, &mut Velocity, Option<&mut Sprite>),
        (With<Enemy>, Without<Player>),
    >,
) {
    let Ok(player_transform) = player_query.get_single() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();

    for (transform, stats, mut ai_state, mut velocity, sprite) in enemy_query.iter_mut() {
        if matches!(*ai_state, AiState::Stunned | AiState::Dying) {
            continue;
        }

        let to_player = player_pos - transform.translation.truncate();
        let distance = to_player.length();

        if distance > stats.detection_range {
            *ai_state = AiState::Idle;
            velocity.linvel.x = 0.0;
            continue;
        }

        *ai_state = AiState::Chasing;
        if distance <= stats.stopping_distance {
            velocity.linvel.x = 0.0;
            continue;
        }

        let direction = to_player / distance;
        velocity.linvel.x = direction.x * stats.move_speed;

        if let Some(mut sprite) = sprite {
            if direction.x > 0.01 {
                sprite.flip_x = false;
            } else if direction.x < -0.01 {
                sprite.flip_x = true;
            }
        }
    }
}

/// Hurt the player on touch, at most once per cooldown.
pub fn contact_damage(
    time: Res<Time>,
    mut collisions: EventReader<CollisionEvent>,
    players: Query<(), With<Player>>,
    mut enemies: Query<(&EnemyStats, &AiState, &mut AttackTimer), With<Enemy>>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    for (_, _, mut timer) in enemies.iter_mut() {
        timer.0.tick(time.delta());
    }

    for event in collisions.read() {
        let CollisionEvent::Started(a, b, _) = event else {
            continue;
        };

        for (enemy, other) in [(*a, *b), (*b, *a)] {
            if !players.contains(other) {
                continue;
            }
            let Ok((stats, state, mut timer)) = enemies.get_mut(enemy) else {
                continue;
            };
            if matches!(*state, AiState::Stunned | AiState::Dying) || !timer.0.finished() {
                continue;
            }

            damage_events.send(DamageEvent {
                target: other,
                source: Some(enemy),
                amount: stats.contact_damage,
            });
            timer.0.reset();
        }
    }
}

/// Handle enemy death transition.
pub fn handle_enemy_death(
    mut commands: Commands,
    mut deaths: EventReader<DeathEvent>,
    mut enemy_query: Query<(&mut AiState, Option<&mut Parryable>, Option<&mut Velocity>), With<Enemy>>,
) {
    for event in deaths.read() {
        let Ok((mut ai_state, parryable, velocity)) = enemy_query.get_mut(event.entity) else {
            continue;
        };
        if *ai_state == AiState::Dying {
            continue;
        }

        *ai_state = AiState::Dying;
        if let Some(mut parryable) = parryable {
            parryable.force_end_effect();
            parryable.set_parryable(false);
        }
        if let Some(mut velocity) = velocity {
            velocity.linvel = Vec2::ZERO;
        }
        commands.entity(event.entity).insert(DeathTimer::default());
        info!("Enemy {:?} died", event.entity);
    }
}

/// Despawn enemies after the death delay.
pub fn despawn_dead_enemies(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut DeathTimer)>,
) {
    for (entity, mut death_timer) in query.iter_mut() {
        death_timer.0.tick(time.delta());

        if death_timer.0.finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Spawn a parryable ground enemy.
pub fn spawn_enemy(commands: &mut Commands, position: Vec2, stats: EnemyStats) -> Entity {
    let color = Color::srgb(0.7, 0.2, 0.25);
    commands
        .spawn((
            Name::new("Enemy"),
            Enemy,
            AiState::default(),
            AttackTimer::ready(stats.attack_cooldown),
            Health::new(stats.max_health),
            Parryable::default(),
            HazardTint::new(color),
            Sprite::from_color(color, stats.half_extents * 2.0),
            Transform::from_translation(position.extend(1.0)),
        ))
        .insert((
            RigidBody::Dynamic,
            Collider::cuboid(stats.half_extents.x, stats.half_extents.y),
            LockedAxes::ROTATION_LOCKED,
            Velocity::zero(),
            ExternalImpulse::default(),
            layers::enemy_groups(),
            ActiveEvents::COLLISION_EVENTS,
            stats,
        ))
        .id()
}

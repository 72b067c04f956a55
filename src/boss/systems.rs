//! Boss behavior systems.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;
use std::time::Duration;

use super::components::*;
use super::config::BossConfig;
use crate::combat::Health;
use crate::core::{layers, DeathEvent};
use crate::player::Player;
use crate::projectiles::{spawn_projectile, EmitterLayer};

fn roll_seconds(rng: &mut impl Rng, (min, max): (f32, f32)) -> f32 {
    rng.gen_range(min..=max)
}

fn random_heading(rng: &mut impl Rng) -> Vec2 {
    Vec2::from_angle(rng.gen_range(0.0..TAU))
}

/// Move to the phase matching current health.
pub fn track_phase(
    config: Res<BossConfig>,
    mut bosses: Query<(Entity, &Health, &mut BossPhase), (With<Boss>, Changed<Health>)>,
) {
    for (entity, health, mut phase) in bosses.iter_mut() {
        let next = BossPhase::from_health(health.current(), &config);
        if next != *phase {
            info!("Boss {:?} entered phase {:?} at {} hp", entity, next, health.current());
            *phase = next;
        }
    }
}

/// Pick a new random heading whenever the change timer runs out.
pub fn steer(
    time: Res<Time>,
    config: Res<BossConfig>,
    mut rng: ResMut<BossRng>,
    mut bosses: Query<&mut BossMotion, With<Boss>>,
) {
    for mut motion in bosses.iter_mut() {
        if !motion.change_timer.tick(time.delta()).finished() {
            continue;
        }
        motion.direction = random_heading(&mut rng.0);
        let next = roll_seconds(&mut rng.0, config.direction_change);
        motion.change_timer.set_duration(Duration::from_secs_f32(next));
        motion.change_timer.reset();
    }
}

/// Fly along the heading, bouncing off the edges of the flight area.
pub fn fly(
    config: Res<BossConfig>,
    mut bosses: Query<(&mut Transform, &mut BossMotion, &BossPhase, &mut Velocity), With<Boss>>,
) {
    let area = config.flight_area();
    for (mut transform, mut motion, phase, mut velocity) in bosses.iter_mut() {
        let (position, direction) =
            bounce_in_bounds(transform.translation.truncate(), motion.direction, area);
        motion.direction = direction;
        transform.translation = position.extend(transform.translation.z);
        velocity.linvel = direction * config.move_speed * phase.speed_multiplier(&config);
    }
}

/// Fire at the player's current position when the gun timer runs out.
pub fn shoot(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<BossConfig>,
    mut rng: ResMut<BossRng>,
    players: Query<&Transform, (With<Player>, Without<Boss>)>,
    mut bosses: Query<(Entity, &Transform, &BossPhase, &mut BossGun), With<Boss>>,
) {
    let target = players.get_single().ok().map(|t| t.translation.truncate());

    for (entity, transform, phase, mut gun) in bosses.iter_mut() {
        if !gun.timer.tick(time.delta()).finished() {
            continue;
        }

        if let Some(target) = target {
            let origin = transform.translation.truncate();
            spawn_projectile(&mut commands, origin, target, entity, &config.projectile_spec());
            debug!("Boss fired at {:?}", target);
        }

        let next = roll_seconds(&mut rng.0, config.shoot_interval) * phase.shoot_multiplier(&config);
        gun.timer.set_duration(Duration::from_secs_f32(next));
        gun.timer.reset();
    }
}

/// Stop flying and shooting once defeated.
pub fn handle_boss_death(
    mut commands: Commands,
    config: Res<BossConfig>,
    mut deaths: EventReader<DeathEvent>,
    mut bosses: Query<&mut Velocity, (With<Boss>, Without<BossDeathTimer>)>,
) {
    for event in deaths.read() {
        let Ok(mut velocity) = bosses.get_mut(event.entity) else {
            continue;
        };
        velocity.linvel = Vec2::ZERO;
        commands
            .entity(event.entity)
            .remove::<(BossGun, BossMotion)>()
            .insert(BossDeathTimer(Timer::from_seconds(config.death_delay, TimerMode::Once)));
        info!("Boss defeated");
    }
}

pub fn despawn_dead_bosses(
    mut commands: Commands,
    time: Res<Time>,
    mut bosses: Query<(Entity, &mut BossDeathTimer)>,
) {
    for (entity, mut timer) in bosses.iter_mut() {
        if timer.0.tick(time.delta()).finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Spawn the boss at `position`.
pub fn spawn_boss(
    commands: &mut Commands,
    position: Vec2,
    config: &BossConfig,
    rng: &mut BossRng,
) -> Entity {
    let change = roll_seconds(&mut rng.0, config.direction_change);
    let first_shot = roll_seconds(&mut rng.0, config.shoot_interval);

    commands
        .spawn((
            Name::new("Boss"),
            Boss,
            BossPhase::One,
            BossMotion {
                direction: random_heading(&mut rng.0),
                change_timer: Timer::from_seconds(change, TimerMode::Once),
            },
            BossGun {
                timer: Timer::from_seconds(first_shot, TimerMode::Once),
            },
            Health::new(config.max_health),
            EmitterLayer,
            Sprite::from_color(Color::srgb(0.8, 0.1, 0.1), Vec2::splat(1.6)),
            Transform::from_translation(position.extend(1.0)),
        ))
        .insert((
            RigidBody::KinematicVelocityBased,
            Collider::ball(0.8),
            Velocity::zero(),
            layers::emitter_groups(),
            ActiveEvents::COLLISION_EVENTS,
        ))
        .id()
}

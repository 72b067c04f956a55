//! Projectile systems.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use std::collections::HashSet;

use super::components::*;
use crate::core::{layers, DamageEvent, GameplaySet, Parried};
use crate::hazards::Parryable;
use crate::player::Player;
use crate::world::Terrain;

/// Configure projectile systems.
pub fn setup_projectile_systems(app: &mut App) {
    app.add_systems(
        Update,
        (
            redirect_parried_projectiles,
            resolve_projectile_contacts,
            expire_projectiles,
            orient_projectiles,
        )
            .chain()
            .in_set(GameplaySet::Projectiles),
    );
}

/// Spawn a projectile at `position` flying toward `target`.
pub fn spawn_projectile(
    commands: &mut Commands,
    position: Vec2,
    target: Vec2,
    emitter: Entity,
    spec: &ProjectileSpec,
) -> Entity {
    let projectile = RedirectableProjectile::new(emitter, target - position, spec);
    let velocity = projectile.velocity();

    commands
        .spawn((
            Name::new("Boss Projectile"),
            projectile,
            // Redirect takes over the motion, so the knockback is never pinned
            Parryable::default().movable(),
            Sprite::from_color(
                Color::srgb(0.9, 0.3, 0.2),
                Vec2::splat(spec.radius * 2.0),
            ),
            Transform::from_translation(position.extend(1.0)),
            RigidBody::KinematicVelocityBased,
            Collider::ball(spec.radius),
            Sensor,
            Velocity::linear(velocity),
            layers::enemy_projectile_groups(),
            ActiveEvents::COLLISION_EVENTS,
            ActiveCollisionTypes::all(),
        ))
        .id()
}

/// Turn parried projectiles around toward their emitter.
fn redirect_parried_projectiles(
    mut parried: EventReader<Parried>,
    emitters: Query<&Transform, Without<RedirectableProjectile>>,
    mut projectiles: Query<(
        &mut RedirectableProjectile,
        &Transform,
        Option<&mut Velocity>,
        Option<&mut Parryable>,
        Option<&mut CollisionGroups>,
    )>,
) {
    for event in parried.read() {
        let Ok((mut projectile, transform, velocity, parryable, groups)) =
            projectiles.get_mut(event.entity)
        else {
            continue;
        };

        let emitter_position = emitters
            .get(projectile.emitter)
            .ok()
            .map(|emitter| emitter.translation.truncate());
        let Some(new_velocity) =
            projectile.redirect(transform.translation.truncate(), emitter_position)
        else {
            continue;
        };

        if let Some(mut velocity) = velocity {
            velocity.linvel = new_velocity;
        }
        // One redirect per projectile, even after its stun runs out
        if let Some(mut parryable) = parryable {
            parryable.set_parryable(false);
        }
        if let Some(mut groups) = groups {
            *groups = layers::player_projectile_groups();
        }

        info!("{:?} redirected toward emitter {:?}", event.entity, projectile.emitter);
    }
}

/// Apply projectile hits and break projectiles on contact.
fn resolve_projectile_contacts(
    mut commands: Commands,
    mut collisions: EventReader<CollisionEvent>,
    projectiles: Query<&RedirectableProjectile>,
    players: Query<(), With<Player>>,
    emitters: Query<(), With<EmitterLayer>>,
    terrain: Query<(), With<Terrain>>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let mut spent = HashSet::new();

    for event in collisions.read() {
        let CollisionEvent::Started(a, b, _) = event else {
            continue;
        };

        for (shot, other) in [(*a, *b), (*b, *a)] {
            if spent.contains(&shot) {
                continue;
            }
            let Ok(projectile) = projectiles.get(shot) else {
                continue;
            };

            let kind = if players.contains(other) {
                ContactKind::Player
            } else if emitters.contains(other) {
                ContactKind::Emitter
            } else if terrain.contains(other) {
                ContactKind::Terrain
            } else {
                ContactKind::Other
            };

            let outcome = contact_outcome(projectile.heading, kind, projectile.damage);
            if let Some(amount) = outcome.damage {
                damage_events.send(DamageEvent {
                    target: other,
                    source: Some(shot),
                    amount,
                });
            }
            if outcome.despawn {
                spent.insert(shot);
                commands.entity(shot).despawn_recursive();
            }
        }
    }
}

/// Projectiles that never hit anything despawn after their lifetime.
fn expire_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    mut projectiles: Query<(Entity, &mut RedirectableProjectile)>,
) {
    for (entity, mut projectile) in projectiles.iter_mut() {
        if projectile.lifetime.tick(time.delta()).just_finished() {
            debug!("{:?} expired", entity);
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Point projectiles along their travel direction.
fn orient_projectiles(
    mut projectiles: Query<(&RedirectableProjectile, &mut Transform), Changed<RedirectableProjectile>>,
) {
    for (projectile, mut transform) in projectiles.iter_mut() {
        transform.rotation = Quat::from_rotation_z(projectile.direction.to_angle());
    }
}

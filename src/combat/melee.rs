//! Player melee: a short swing that hurts enemies in front of the player.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{DamageEvent, MeleeAttack};
use crate::enemies::Enemy;
use crate::parry::ParryActor;
use crate::player::{Facing, Player};

const ATTACK_KEY: KeyCode = KeyCode::KeyJ;
const ATTACK_BUTTON: MouseButton = MouseButton::Right;

/// Right mouse button or `J` queues a swing.
pub fn read_attack_input(
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut query: Query<&mut MeleeAttack, With<Player>>,
) {
    let Ok(mut melee) = query.get_single_mut() else {
        return;
    };

    if mouse.just_pressed(ATTACK_BUTTON) || keyboard.just_pressed(ATTACK_KEY) {
        melee.requested = true;
    }
}

/// Resolve queued swings against enemies inside the hit circle.
pub fn execute_melee(
    time: Res<Time>,
    rapier_context: Query<&RapierContext>,
    mut attackers: Query<(
        Entity,
        &Transform,
        &mut MeleeAttack,
        Option<&Facing>,
        Option<&ParryActor>,
    )>,
    enemies: Query<(Entity, &Transform), With<Enemy>>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    for (attacker, transform, mut melee, facing, parry) in attackers.iter_mut() {
        melee.tick(time.delta_secs());

        // No swinging mid-aim
        if parry.is_some_and(|parry| parry.is_aiming()) {
            melee.requested = false;
            continue;
        }
        if !melee.try_swing() {
            continue;
        }

        let facing = facing.map_or(Vec2::X, |f| f.0);
        let center = melee.hit_center(transform.translation.truncate(), facing);
        let mut hits = Vec::new();

        if let Ok(context) = rapier_context.get_single() {
            let shape = Collider::ball(melee.range);
            context.intersections_with_shape(
                center,
                0.0,
                &shape,
                QueryFilter::default()
                    .exclude_sensors()
                    .exclude_collider(attacker),
                |hit_entity| {
                    if enemies.contains(hit_entity) {
                        hits.push(hit_entity);
                    }
                    true // Continue checking other entities
                },
            );
        } else {
            // No physics world, so test enemy centers against the circle
            hits.extend(
                enemies
                    .iter()
                    .filter(|(_, t)| t.translation.truncate().distance(center) <= melee.range)
                    .map(|(enemy, _)| enemy),
            );
        }

        debug!("{:?} swung at {:?}, {} hit(s)", attacker, center, hits.len());
        for target in hits {
            damage_events.send(DamageEvent {
                target,
                source: Some(attacker),
                amount: melee.damage,
            });
        }
    }
}

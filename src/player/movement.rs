//! Side-view player movement.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::*;
use crate::combat::{Health, MeleeAttack};
use crate::core::{layers, GameplaySet};
use crate::feedback::ParryOutline;
use crate::parry::{ParryActor, ParryIntent};

/// Set up movement systems.
pub fn setup_movement_systems(app: &mut App) {
    app.init_resource::<PlayerConfig>().add_systems(
        Update,
        player_movement
            .in_set(GameplaySet::Input)
            .run_if(resource_exists::<ButtonInput<KeyCode>>),
    );
}

/// Handle A/D running and jumping.
///
/// Uses Rapier's KinematicCharacterController for collision detection.
/// Movement is suspended while the parry actor is aiming.
pub fn player_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    config: Res<PlayerConfig>,
    rapier_context: Query<&RapierContext>,
    mut player_query: Query<
        (
            Entity,
            &Transform,
            &ParryActor,
            &mut Facing,
            &mut MovementState,
            &mut KinematicCharacterController,
        ),
        With<Player>,
    >,
) {
    let Ok((player_entity, transform, parry, mut facing, mut movement_state, mut controller)) =
        player_query.get_single_mut()
    else {
        return;
    };

    if parry.is_aiming() {
        movement_state.vertical_velocity = 0.0;
        controller.translation = None;
        return;
    }

    // Ground check using raycast just below the body
    let is_grounded = if let Ok(context) = rapier_context.get_single() {
        let ray_origin = transform.translation.truncate() - Vec2::Y * (config.half_extents.y - 0.05);
        context
            .cast_ray(
                ray_origin,
                Vec2::NEG_Y,
                0.15,
                true,
                QueryFilter::only_fixed().exclude_collider(player_entity),
            )
            .is_some()
    } else {
        // Fallback: assume grounded if no physics context
        true
    };
    movement_state.is_grounded = is_grounded;

    if is_grounded {
        if movement_state.vertical_velocity < 0.0 {
            movement_state.vertical_velocity = 0.0;
        }
        if keyboard.just_pressed(KeyCode::Space) || keyboard.just_pressed(KeyCode::KeyW) {
            movement_state.vertical_velocity = config.jump_force;
        }
    } else {
        movement_state.vertical_velocity -= config.gravity * time.delta_secs();
    }

    let mut direction = 0.0;
    if keyboard.pressed(KeyCode::KeyA) {
        direction -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        direction += 1.0;
    }
    if direction != 0.0 {
        facing.0 = Vec2::new(direction, 0.0);
    }

    let horizontal = direction * config.move_speed * time.delta_secs();
    let vertical = movement_state.vertical_velocity * time.delta_secs();
    controller.translation = Some(Vec2::new(horizontal, vertical));
}

/// Spawn the player: body, health and parry actor.
pub fn spawn_player(commands: &mut Commands, position: Vec2, config: &PlayerConfig) -> Entity {
    commands
        .spawn((
            Name::new("Player"),
            Player,
            Facing::default(),
            MovementState::default(),
            Health::new(config.max_health).with_post_hit_invincibility(config.hit_invincibility),
            ParryActor::new(config.half_extents),
            ParryIntent::default(),
            ParryOutline::default(),
            MeleeAttack::default(),
            Sprite::from_color(Color::srgb(0.85, 0.85, 0.95), config.half_extents * 2.0),
            Transform::from_translation(position.extend(2.0)),
        ))
        .insert((
            RigidBody::KinematicPositionBased,
            Collider::cuboid(config.half_extents.x, config.half_extents.y),
            KinematicCharacterController {
                offset: CharacterLength::Absolute(0.01),
                snap_to_ground: Some(CharacterLength::Absolute(0.2)),
                ..default()
            },
            layers::player_groups(),
            ActiveEvents::COLLISION_EVENTS,
        ))
        .id()
}

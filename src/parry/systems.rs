//! Parry state machine systems.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::*;
use super::config::{ParryConfig, TriggerMode};
use super::dash;
use crate::combat::Health;
use crate::core::{
    CancelParry, DeathEvent, GameState, GameplaySet, ParryExecuted, ParryStrike, TimeDilation,
};
use crate::feedback::{ParryOutline, ParrySfx, ParryVfx};
use crate::hazards::Parryable;
use crate::player::Facing;

/// Ordering inside [`GameplaySet::Parry`].
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParrySet {
    Cancel,
    Cooldown,
    Aim,
    Execute,
    Engage,
}

/// Configure parry systems.
pub fn setup_parry_systems(app: &mut App) {
    app.configure_sets(
        Update,
        (
            ParrySet::Cancel,
            ParrySet::Cooldown,
            ParrySet::Aim,
            ParrySet::Execute,
            ParrySet::Engage,
        )
            .chain()
            .in_set(GameplaySet::Parry),
    )
    .add_systems(Update, cancel_on_request.in_set(ParrySet::Cancel))
    .add_systems(Update, end_cooldowns.in_set(ParrySet::Cooldown))
    .add_systems(Update, update_aim.in_set(ParrySet::Aim))
    .add_systems(Update, execute_parry.in_set(ParrySet::Execute))
    // Engaging last means a fresh aim always gets one full frame before it can fire
    .add_systems(Update, engage_nearest_hazard.in_set(ParrySet::Engage))
    .add_systems(Update, clear_intent_edges.after(GameplaySet::Feedback))
    .add_systems(OnEnter(GameState::GameOver), cancel_all_on_game_over)
    .add_observer(restore_time_on_actor_removed);
}

/// Abort one actor's parry and hand the clock back. Returns false when
/// there was nothing to cancel.
fn cancel_actor(
    commands: &mut Commands,
    dilation: &mut TimeDilation,
    entity: Entity,
    actor: &mut ParryActor,
    outline: Option<Mut<ParryOutline>>,
) -> bool {
    let was_aiming = actor.is_aiming();
    let Some(episode) = actor.cancel() else {
        return false;
    };

    dilation.force_restore(episode);
    if let Some(mut outline) = outline {
        outline.off();
    }
    if was_aiming {
        commands.entity(entity).remove::<ColliderDisabled>();
    }
    true
}

/// Abort parries for explicit requests and for actors that died.
fn cancel_on_request(
    mut commands: Commands,
    mut cancels: EventReader<CancelParry>,
    mut deaths: EventReader<DeathEvent>,
    mut dilation: ResMut<TimeDilation>,
    mut actors: Query<(&mut ParryActor, Option<&mut ParryOutline>)>,
) {
    let requested = cancels
        .read()
        .map(|event| event.actor)
        .chain(deaths.read().map(|event| event.entity));

    for entity in requested {
        let Ok((mut actor, outline)) = actors.get_mut(entity) else {
            continue;
        };

        if cancel_actor(&mut commands, &mut dilation, entity, &mut actor, outline) {
            info!("Parry cancelled for {:?}", entity);
        } else {
            debug!("Cancel on {:?} ignored: nothing in progress", entity);
        }
    }
}

/// Gameplay systems stop once the run is over, so a death that ends the run
/// never reaches [`cancel_on_request`]. Abort every open aim here instead.
fn cancel_all_on_game_over(
    mut commands: Commands,
    mut dilation: ResMut<TimeDilation>,
    mut actors: Query<(Entity, &mut ParryActor, Option<&mut ParryOutline>)>,
) {
    for (entity, mut actor, outline) in actors.iter_mut() {
        if actor.is_aiming()
            && cancel_actor(&mut commands, &mut dilation, entity, &mut actor, outline)
        {
            info!("Parry on {:?} cancelled by game over", entity);
        }
    }
}

/// Cooldown -> Ready on the real clock.
fn end_cooldowns(real_time: Res<Time<Real>>, mut actors: Query<(Entity, &mut ParryActor)>) {
    let now = real_time.elapsed_secs_f64();
    for (entity, mut actor) in actors.iter_mut() {
        if actor.recover(now) {
            debug!("{:?} parry ready", entity);
        }
    }
}

/// Follow the locked target and resolve the aim every frame while aiming.
fn update_aim(
    config: Res<ParryConfig>,
    targets: Query<&Transform, (With<Parryable>, Without<ParryActor>)>,
    mut actors: Query<(&mut ParryActor, &ParryIntent, &Transform, Option<&Facing>)>,
) {
    for (mut actor, intent, transform, facing) in actors.iter_mut() {
        if !actor.is_aiming() {
            continue;
        }

        let target_position = actor
            .locked_target()
            .and_then(|target| targets.get(target).ok())
            .map(|target| target.translation.truncate());
        if let Some(position) = target_position {
            actor.track_target(position);
        }

        let facing = facing.map_or(Vec2::X, |f| f.0);
        let aim = resolve_aim(
            intent.aim,
            config.input_deadzone,
            transform.translation.truncate(),
            Some(actor.target_position()),
            facing,
        );
        actor.set_aim(aim);
    }
}

fn trigger_fired(mode: TriggerMode, intent: &ParryIntent) -> bool {
    match mode {
        TriggerMode::HoldRelease => intent.released || !intent.held,
        TriggerMode::PressTwice => intent.pressed,
    }
}

/// Aiming -> Cooldown: dash, strike the target, start restoring time.
#[allow(clippy::too_many_arguments)]
fn execute_parry(
    mut commands: Commands,
    real_time: Res<Time<Real>>,
    config: Res<ParryConfig>,
    mut dilation: ResMut<TimeDilation>,
    rapier_context: Query<&RapierContext>,
    hazards: Query<(), With<Parryable>>,
    mut actors: Query<(
        Entity,
        &mut ParryActor,
        &ParryIntent,
        &mut Transform,
        Option<&mut Velocity>,
        Option<&mut Health>,
        Option<&mut ParryOutline>,
    )>,
    mut strikes: EventWriter<ParryStrike>,
    mut executed: EventWriter<ParryExecuted>,
    mut vfx: EventWriter<ParryVfx>,
    mut sfx: EventWriter<ParrySfx>,
) {
    for (entity, mut actor, intent, mut transform, velocity, health, outline) in actors.iter_mut() {
        if !actor.is_aiming() || !trigger_fired(config.trigger, intent) {
            continue;
        }

        let origin = transform.translation.truncate();
        let aim = actor.aim_direction();
        let nominal = config.dash_distance;

        let distance = if aim == Vec2::ZERO {
            0.0
        } else if let Ok(context) = rapier_context.get_single() {
            let origins = dash::ray_origins(
                origin,
                actor.body_half_extents,
                aim,
                config.ray_count,
                config.skin_width,
            );
            let filter = QueryFilter::only_fixed()
                .exclude_sensors()
                .exclude_collider(entity);
            dash::safe_dash_distance(&origins, nominal, config.skin_width, |ray_origin| {
                context
                    .cast_ray(ray_origin, aim, nominal, true, filter)
                    .map(|(_, toi)| toi)
            })
        } else {
            // No physics world: nothing to collide with
            nominal
        };

        let destination = dash::dash_destination(origin, aim, distance);
        transform.translation = destination.extend(transform.translation.z);
        if let Some(mut velocity) = velocity {
            velocity.linvel = Vec2::ZERO;
        }

        commands.entity(entity).remove::<ColliderDisabled>();
        if let Some(mut health) = health {
            health.grant_invincibility(config.dash_invulnerability);
        }

        let target = actor
            .locked_target()
            .filter(|target| hazards.get(*target).is_ok());
        match target {
            Some(target) => {
                strikes.send(ParryStrike {
                    source: entity,
                    target,
                    direction: -aim,
                    force: config.knockback_force,
                });
            }
            None => info!("Locked target gone; dashing without a strike"),
        }

        if let Some(episode) = actor.episode() {
            dilation.restore_over_time(episode, config.restore_duration, config.restore_easing);
        }
        if let Some(mut outline) = outline {
            outline.fade(config.restore_duration);
        }

        let cooldown_until = real_time.elapsed_secs_f64() + config.cooldown as f64;
        actor.finish_aim(cooldown_until);

        vfx.send(ParryVfx::Dash {
            from: origin,
            to: destination,
            timing: config.dash_beam,
        });
        sfx.send(ParrySfx::Dash);
        executed.send(ParryExecuted {
            actor: entity,
            target,
            origin,
            destination,
            direction: aim,
        });

        info!(
            "Parry executed toward {:?}, dashed {:.2} of {:.2}",
            aim, distance, nominal
        );
    }
}

/// Ready -> Aiming: lock the nearest hazard, jump onto it and freeze time.
#[allow(clippy::too_many_arguments)]
fn engage_nearest_hazard(
    mut commands: Commands,
    config: Res<ParryConfig>,
    mut dilation: ResMut<TimeDilation>,
    hazards: Query<(Entity, &Transform, &Parryable), Without<ParryActor>>,
    mut actors: Query<(
        Entity,
        &mut ParryActor,
        &ParryIntent,
        &mut Transform,
        Option<&mut Velocity>,
        Option<&mut Health>,
        Option<&mut ParryOutline>,
    )>,
    mut vfx: EventWriter<ParryVfx>,
    mut sfx: EventWriter<ParrySfx>,
) {
    for (entity, mut actor, intent, mut transform, velocity, health, outline) in actors.iter_mut() {
        if !intent.pressed || !actor.can_act() {
            continue;
        }

        let origin = transform.translation.truncate();
        let nearest = hazards
            .iter()
            .filter(|(_, _, parryable)| parryable.enabled)
            .map(|(hazard, hazard_transform, _)| {
                let position = hazard_transform.translation.truncate();
                (hazard, position, origin.distance(position))
            })
            .filter(|(_, _, distance)| *distance <= config.detection_range)
            .min_by(|a, b| a.2.total_cmp(&b.2));

        let Some((target, target_position, _)) = nearest else {
            debug!("No hazard within {:.1} to parry", config.detection_range);
            continue;
        };

        let episode = dilation.freeze(config.frozen_scale);
        actor.begin_aim(target, target_position, episode);

        transform.translation = target_position.extend(transform.translation.z);
        if let Some(mut velocity) = velocity {
            velocity.linvel = Vec2::ZERO;
        }

        commands.entity(entity).insert(ColliderDisabled);
        if let Some(mut health) = health {
            health.grant_invincibility(config.aim_invulnerability);
        }
        if let Some(mut outline) = outline {
            outline.pulse(config.outline_flash_interval, config.outline_intensity);
        }

        vfx.send(ParryVfx::Teleport {
            from: origin,
            to: target_position,
            timing: config.teleport_beam,
        });
        sfx.send(ParrySfx::Lock);

        info!("Parry aiming: locked {:?} at {:?}", target, target_position);
    }
}

fn clear_intent_edges(mut intents: Query<&mut ParryIntent>) {
    for mut intent in intents.iter_mut() {
        intent.clear_edges();
    }
}

/// A despawned actor must not leave the clock slowed.
fn restore_time_on_actor_removed(
    trigger: Trigger<OnRemove, ParryActor>,
    actors: Query<&ParryActor>,
    mut dilation: ResMut<TimeDilation>,
) {
    let Ok(actor) = actors.get(trigger.entity()) else {
        return;
    };
    if let Some(episode) = actor.episode() {
        if dilation.force_restore(episode) {
            info!("Parry actor removed mid-episode; time restored");
        }
    }
}

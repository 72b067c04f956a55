//! Hazard systems - strike resolution, grace freeze and stun recovery.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::*;
use crate::core::{GameplaySet, Parried, ParryEffectEnded, ParryStrike};

/// Configure hazard systems.
pub fn setup_hazard_systems(app: &mut App) {
    app.add_systems(
        Update,
        (resolve_parry_strikes, apply_grace_freeze, tick_stun)
            .chain()
            .in_set(GameplaySet::Hazards),
    );
}

/// Apply accepted strikes: zero velocity, push, stun, notify.
fn resolve_parry_strikes(
    mut commands: Commands,
    mut strikes: EventReader<ParryStrike>,
    mut parried: EventWriter<Parried>,
    mut hazards: Query<(
        &mut Parryable,
        Option<&mut Velocity>,
        Option<&mut ExternalImpulse>,
        Option<&ReadMassProperties>,
    )>,
) {
    for strike in strikes.read() {
        let Ok((mut parryable, velocity, impulse, mass)) = hazards.get_mut(strike.target) else {
            debug!("Parry strike on {:?} ignored: not a hazard", strike.target);
            continue;
        };

        let mut linvel = velocity.as_ref().map_or(Vec2::ZERO, |v| v.linvel);
        if !parryable.on_parry(strike.direction, strike.force, &mut linvel) {
            debug!("Parry strike on {:?} rejected", strike.target);
            continue;
        }

        let knockback = strike.direction * strike.force;
        match (velocity, impulse) {
            (Some(mut velocity), Some(mut impulse)) => {
                velocity.linvel = linvel;
                velocity.angvel = 0.0;
                impulse.impulse += knockback;
            }
            (Some(mut velocity), None) => {
                // No dynamic body to take the impulse, so apply it as a velocity change
                let mass = mass
                    .map(|m| m.get().mass)
                    .filter(|m| *m > 0.0)
                    .unwrap_or(1.0);
                velocity.linvel = knockback / mass;
                velocity.angvel = 0.0;
            }
            (None, Some(mut impulse)) => impulse.impulse += knockback,
            (None, None) => {}
        }

        if !parryable.can_move_when_parried {
            commands
                .entity(strike.target)
                .insert(ParryGraceFreeze::new(parryable.stun_generation));
        }

        info!("{:?} parried by {:?}", strike.target, strike.source);
        parried.send(Parried {
            entity: strike.target,
            source: strike.source,
            knockback: strike.direction,
            force: strike.force,
        });
    }
}

/// Pin hazards in place once their knockback has had time to show.
fn apply_grace_freeze(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut ParryGraceFreeze, &Parryable, Option<&mut Velocity>)>,
) {
    for (entity, mut grace, parryable, velocity) in query.iter_mut() {
        if !grace.timer.tick(time.delta()).finished() {
            continue;
        }

        let current = parryable.is_stunned() && parryable.stun_generation == grace.stun_generation;
        if current {
            if let Some(mut velocity) = velocity {
                velocity.linvel = Vec2::ZERO;
                velocity.angvel = 0.0;
            }
        }
        commands.entity(entity).remove::<ParryGraceFreeze>();
    }
}

/// Count stuns down on gameplay time and announce recoveries.
fn tick_stun(
    time: Res<Time>,
    mut query: Query<(Entity, &mut Parryable)>,
    mut ended: EventWriter<ParryEffectEnded>,
) {
    for (entity, mut parryable) in query.iter_mut() {
        if parryable.tick(time.delta_secs()) {
            debug!("{:?} recovered from parry", entity);
            ended.send(ParryEffectEnded { entity });
        }
    }
}

//! Global events used for cross-system communication.
//!
//! The parry actor, hazards and projectiles never call into each other
//! directly. They exchange these events, which keeps each plugin usable on its
//! own and lets collaborators (enemy AI, boss logic, feedback sinks) subscribe
//! without the sender knowing about them.

use bevy::prelude::*;

/// Sent when an entity should lose health.
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage, if it still matters
    pub source: Option<Entity>,
    pub amount: i32,
}

/// Sent when an entity's health reaches zero.
#[derive(Event, Debug, Clone, Copy)]
pub struct DeathEvent {
    pub entity: Entity,
    pub killed_by: Option<Entity>,
}

/// A parry actor asks a hazard to react to a parry.
///
/// The hazard decides whether it can be parried; a rejected strike is a
/// silent no-op.
#[derive(Event, Debug, Clone, Copy)]
pub struct ParryStrike {
    pub source: Entity,
    pub target: Entity,
    /// Unit direction the hazard is pushed along
    pub direction: Vec2,
    pub force: f32,
}

/// A hazard accepted a parry and entered its stun window.
#[derive(Event, Debug, Clone, Copy)]
pub struct Parried {
    pub entity: Entity,
    pub source: Entity,
    pub knockback: Vec2,
    pub force: f32,
}

/// A hazard's stun window ran out (or was ended early).
#[derive(Event, Debug, Clone, Copy)]
pub struct ParryEffectEnded {
    pub entity: Entity,
}

/// Outcome of a completed parry dash, for UI and analytics collaborators.
#[derive(Event, Debug, Clone, Copy)]
pub struct ParryExecuted {
    pub actor: Entity,
    /// Locked target, `None` if it was destroyed while aiming
    pub target: Option<Entity>,
    pub origin: Vec2,
    pub destination: Vec2,
    pub direction: Vec2,
}

/// Abort an actor's parry without dashing.
#[derive(Event, Debug, Clone, Copy)]
pub struct CancelParry {
    pub actor: Entity,
}

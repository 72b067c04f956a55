//! Enemy-related components.

use bevy::prelude::*;

/// Marker component for all enemies.
#[derive(Component)]
pub struct Enemy;

/// AI state machine for enemy behavior.
#[derive(Component, Default, PartialEq, Clone, Copy, Debug)]
pub enum AiState {
    /// Waiting for the player to enter detection range.
    #[default]
    Idle,
    /// Running toward the player.
    Chasing,
    /// Knocked back by a parry; movement is left to physics.
    Stunned,
    /// Waiting out the death delay before despawn.
    Dying,
}

/// Enemy tuning.
#[derive(Component, Clone, Debug)]
pub struct EnemyStats {
    pub max_health: i32,
    pub contact_damage: i32,
    pub move_speed: f32,
    /// Stop closing in once this near
    pub stopping_distance: f32,
    pub detection_range: f32,
    /// Seconds between contact hits
    pub attack_cooldown: f32,
    pub half_extents: Vec2,
}

impl Default for EnemyStats {
    fn default() -> Self {
        Self {
            max_health: 3,
            contact_damage: 1,
            move_speed: 3.0,
            stopping_distance: 1.5,
            detection_range: 10.0,
            attack_cooldown: 1.0,
            half_extents: Vec2::new(0.4, 0.4),
        }
    }
}

/// Time until this enemy may hurt the player on contact again.
#[derive(Component)]
pub struct AttackTimer(pub Timer);

impl AttackTimer {
    /// Starts finished so the first touch always lands.
    pub fn ready(cooldown: f32) -> Self {
        let mut timer = Timer::from_seconds(cooldown, TimerMode::Once);
        timer.tick(timer.duration());
        Self(timer)
    }
}

/// Timer for the death delay before despawn.
#[derive(Component)]
pub struct DeathTimer(pub Timer);

impl Default for DeathTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(1.0, TimerMode::Once))
    }
}

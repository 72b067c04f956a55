//! Boss components.

use bevy::prelude::*;
use rand::rngs::StdRng;

use super::config::BossConfig;

/// Marker component for the boss.
#[derive(Component)]
pub struct Boss;

/// Health band the boss is fighting in.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BossPhase {
    #[default]
    One,
    Two,
    Three,
}

impl BossPhase {
    pub fn from_health(health: i32, config: &BossConfig) -> Self {
        if health <= config.phase3_threshold {
            BossPhase::Three
        } else if health <= config.phase2_threshold {
            BossPhase::Two
        } else {
            BossPhase::One
        }
    }

    /// Scale applied to the rolled shot interval.
    pub fn shoot_multiplier(self, config: &BossConfig) -> f32 {
        match self {
            BossPhase::One => 1.0,
            BossPhase::Two => config.phase_shoot_multipliers.0,
            BossPhase::Three => config.phase_shoot_multipliers.1,
        }
    }

    /// Speed bonus accumulated by the time this phase is reached.
    pub fn speed_multiplier(self, config: &BossConfig) -> f32 {
        let (two, three) = config.phase_speed_multipliers;
        match self {
            BossPhase::One => 1.0,
            BossPhase::Two => two,
            BossPhase::Three => two * three,
        }
    }
}

/// Current flight heading and when to pick a new one.
#[derive(Component, Debug)]
pub struct BossMotion {
    pub direction: Vec2,
    pub change_timer: Timer,
}

/// Time until the next volley.
#[derive(Component, Debug)]
pub struct BossGun {
    pub timer: Timer,
}

/// Delay between defeat and despawn.
#[derive(Component)]
pub struct BossDeathTimer(pub Timer);

/// Random source for flight and volley timing.
#[derive(Resource)]
pub struct BossRng(pub StdRng);

/// Reflect `direction` off the walls of `area` and pull `position` back inside.
pub fn bounce_in_bounds(position: Vec2, direction: Vec2, area: Rect) -> (Vec2, Vec2) {
    let mut direction = direction;
    if position.x < area.min.x || position.x > area.max.x {
        direction.x = -direction.x;
    }
    if position.y < area.min.y || position.y > area.max.y {
        direction.y = -direction.y;
    }
    (position.clamp(area.min, area.max), direction)
}

//! Boss tuning loaded from `assets/data/boss.ron`.

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::{ConfigError, TuningData};
use crate::projectiles::{DamageProfile, ProjectileSpec};

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BossConfig {
    pub max_health: i32,
    pub move_speed: f32,
    /// Seconds between heading changes, (min, max)
    pub direction_change: (f32, f32),
    /// Seconds between shots before phase scaling, (min, max)
    pub shoot_interval: (f32, f32),
    /// Health at or below which phase two starts
    pub phase2_threshold: i32,
    pub phase3_threshold: i32,
    /// Shot interval multipliers for phases two and three
    pub phase_shoot_multipliers: (f32, f32),
    /// Move speed multipliers applied on entering phases two and three
    pub phase_speed_multipliers: (f32, f32),
    pub flight_center: (f32, f32),
    pub flight_size: (f32, f32),
    pub projectile_speed: f32,
    pub projectile_damage_to_player: i32,
    pub projectile_damage_to_boss: i32,
    pub projectile_lifetime: f32,
    pub redirect_multiplier: f32,
    pub projectile_radius: f32,
    /// Seconds the defeated boss lingers before despawning
    pub death_delay: f32,
    /// Fixed seed for reproducible flight and volleys
    pub seed: Option<u64>,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            max_health: 10,
            move_speed: 3.0,
            direction_change: (2.0, 5.0),
            shoot_interval: (2.0, 4.0),
            phase2_threshold: 6,
            phase3_threshold: 3,
            phase_shoot_multipliers: (0.7, 0.4),
            phase_speed_multipliers: (1.2, 1.3),
            flight_center: (0.0, 6.5),
            flight_size: (20.0, 10.0),
            projectile_speed: 8.0,
            projectile_damage_to_player: 999,
            projectile_damage_to_boss: 1,
            projectile_lifetime: 10.0,
            redirect_multiplier: 1.5,
            projectile_radius: 0.25,
            death_delay: 2.0,
            seed: None,
        }
    }
}

impl BossConfig {
    pub fn projectile_spec(&self) -> ProjectileSpec {
        ProjectileSpec {
            speed: self.projectile_speed,
            damage: DamageProfile {
                lethal_to_player: self.projectile_damage_to_player,
                to_emitter: self.projectile_damage_to_boss,
            },
            lifetime: self.projectile_lifetime,
            redirect_multiplier: self.redirect_multiplier,
            radius: self.projectile_radius,
        }
    }

    pub fn flight_area(&self) -> Rect {
        Rect::from_center_size(
            Vec2::new(self.flight_center.0, self.flight_center.1),
            Vec2::new(self.flight_size.0, self.flight_size.1),
        )
    }
}

fn check_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::Invalid {
            field,
            details: format!("{value} must be a positive number"),
        });
    }
    Ok(())
}

fn check_range(field: &'static str, (min, max): (f32, f32)) -> Result<(), ConfigError> {
    if !min.is_finite() || !max.is_finite() || min <= 0.0 || max < min {
        return Err(ConfigError::Invalid {
            field,
            details: format!("({min}, {max}) is not a positive ascending range"),
        });
    }
    Ok(())
}

impl TuningData for BossConfig {
    const PATH: &'static str = "assets/data/boss.ron";

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_health <= 0 {
            return Err(ConfigError::Invalid {
                field: "max_health",
                details: format!("{} must be positive", self.max_health),
            });
        }
        if self.phase3_threshold > self.phase2_threshold {
            return Err(ConfigError::Invalid {
                field: "phase3_threshold",
                details: format!(
                    "{} is above phase2_threshold {}",
                    self.phase3_threshold, self.phase2_threshold
                ),
            });
        }
        check_positive("move_speed", self.move_speed)?;
        check_positive("projectile_speed", self.projectile_speed)?;
        check_positive("redirect_multiplier", self.redirect_multiplier)?;
        check_positive("projectile_lifetime", self.projectile_lifetime)?;
        check_positive("projectile_radius", self.projectile_radius)?;
        check_positive("death_delay", self.death_delay)?;
        check_positive("phase_shoot_multipliers", self.phase_shoot_multipliers.0)?;
        check_positive("phase_shoot_multipliers", self.phase_shoot_multipliers.1)?;
        check_positive("phase_speed_multipliers", self.phase_speed_multipliers.0)?;
        check_positive("phase_speed_multipliers", self.phase_speed_multipliers.1)?;
        check_positive("flight_size", self.flight_size.0)?;
        check_positive("flight_size", self.flight_size.1)?;
        check_range("direction_change", self.direction_change)?;
        check_range("shoot_interval", self.shoot_interval)
    }
}

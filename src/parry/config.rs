//! Parry tuning loaded from `assets/data/parry.ron`.

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::{ConfigError, Easing, TuningData, MIN_TIME_SCALE};
use crate::feedback::BeamTiming;

/// What ends an aim and fires the dash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum TriggerMode {
    /// Hold the parry button to aim, let go to dash
    #[default]
    HoldRelease,
    /// Press once to aim, press again to dash
    PressTwice,
}

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParryConfig {
    /// Hazards further than this are never locked
    pub detection_range: f32,
    /// Nominal dash length before obstacle clamping
    pub dash_distance: f32,
    pub knockback_force: f32,
    /// Real seconds between a dash and the next aim
    pub cooldown: f32,
    pub frozen_scale: f32,
    /// Real seconds for time to ramp back to full speed
    pub restore_duration: f32,
    pub restore_easing: Easing,
    pub ray_count: usize,
    pub skin_width: f32,
    pub aim_invulnerability: f32,
    pub dash_invulnerability: f32,
    pub trigger: TriggerMode,
    /// Aim inputs shorter than this fall back to the default direction
    pub input_deadzone: f32,
    pub outline_flash_interval: f32,
    pub outline_intensity: f32,
    pub teleport_beam: BeamTiming,
    pub dash_beam: BeamTiming,
}

impl Default for ParryConfig {
    fn default() -> Self {
        Self {
            detection_range: 2.5,
            dash_distance: 5.0,
            knockback_force: 10.0,
            cooldown: 0.5,
            frozen_scale: 0.05,
            restore_duration: 0.2,
            restore_easing: Easing::Linear,
            ray_count: 3,
            skin_width: 0.1,
            aim_invulnerability: 0.2,
            dash_invulnerability: 0.5,
            trigger: TriggerMode::HoldRelease,
            input_deadzone: 0.1,
            outline_flash_interval: 0.1,
            outline_intensity: 1.5,
            teleport_beam: BeamTiming::TELEPORT,
            dash_beam: BeamTiming::DASH,
        }
    }
}

fn invalid(field: &'static str, details: String) -> ConfigError {
    ConfigError::Invalid { field, details }
}

impl TuningData for ParryConfig {
    const PATH: &'static str = "assets/data/parry.ron";

    fn validate(&self) -> Result<(), ConfigError> {
        if self.detection_range <= 0.0 {
            return Err(invalid("detection_range", format!("{} must be positive", self.detection_range)));
        }
        if self.dash_distance < 0.0 {
            return Err(invalid("dash_distance", format!("{} is negative", self.dash_distance)));
        }
        if !(MIN_TIME_SCALE..=1.0).contains(&self.frozen_scale) {
            return Err(invalid(
                "frozen_scale",
                format!("{} outside {}..=1.0", self.frozen_scale, MIN_TIME_SCALE),
            ));
        }
        if !(3..=7).contains(&self.ray_count) {
            return Err(invalid("ray_count", format!("{} outside 3..=7", self.ray_count)));
        }
        if !(0.05..=0.3).contains(&self.skin_width) {
            return Err(invalid("skin_width", format!("{} outside 0.05..=0.3", self.skin_width)));
        }
        for (field, value) in [
            ("cooldown", self.cooldown),
            ("restore_duration", self.restore_duration),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, format!("{value} is not a valid duration")));
            }
        }
        if !(0.0..1.0).contains(&self.input_deadzone) {
            return Err(invalid("input_deadzone", format!("{} outside 0..1", self.input_deadzone)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parse_ron;

    #[test]
    fn defaults_are_valid() {
        assert!(ParryConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let config: ParryConfig =
            parse_ron("parry.ron", "(detection_range: 4.0, trigger: PressTwice)").unwrap();
        assert_eq!(config.detection_range, 4.0);
        assert_eq!(config.trigger, TriggerMode::PressTwice);
        assert_eq!(config.ray_count, 3);
        assert_eq!(config.dash_beam, BeamTiming::DASH);
    }

    #[test]
    fn rejects_out_of_range_rays_and_skin() {
        let err = parse_ron::<ParryConfig>("parry.ron", "(ray_count: 9)").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "ray_count", .. }));

        let err = parse_ron::<ParryConfig>("parry.ron", "(skin_width: 0.5)").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "skin_width", .. }));
    }
}

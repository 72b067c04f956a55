//! Feedback components and events.

use bevy::prelude::*;
use serde::Deserialize;

/// Fade-in, hold and fade-out of a beam, in real seconds.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BeamTiming {
    pub fade_in: f32,
    pub hold: f32,
    pub fade_out: f32,
}

impl BeamTiming {
    pub const TELEPORT: Self = Self {
        fade_in: 0.1,
        hold: 0.5,
        fade_out: 0.5,
    };

    pub const DASH: Self = Self {
        fade_in: 0.05,
        hold: 0.3,
        fade_out: 0.3,
    };

    pub fn total(&self) -> f32 {
        self.fade_in + self.hold + self.fade_out
    }

    /// Opacity in [0, 1] at `elapsed` seconds into the beam's life.
    pub fn alpha_at(&self, elapsed: f32) -> f32 {
        if elapsed < 0.0 {
            return 0.0;
        }
        if elapsed < self.fade_in {
            return elapsed / self.fade_in;
        }
        let fading = elapsed - self.fade_in - self.hold;
        if fading <= 0.0 {
            return 1.0;
        }
        if self.fade_out <= 0.0 {
            return 0.0;
        }
        (1.0 - fading / self.fade_out).max(0.0)
    }
}

/// Line effects requested by the parry actor.
#[derive(Event, Debug, Clone, Copy)]
pub enum ParryVfx {
    /// Lock-on jump from the actor's old position onto the target
    Teleport { from: Vec2, to: Vec2, timing: BeamTiming },
    /// The dash itself
    Dash { from: Vec2, to: Vec2, timing: BeamTiming },
}

/// One-shot sound cues.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParrySfx {
    Lock,
    Dash,
    HazardParried,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeamKind {
    Teleport,
    Dash,
}

/// A fading line between two points. Despawns itself when its timing runs out.
#[derive(Component, Debug, Clone)]
pub struct Beam {
    pub kind: BeamKind,
    pub from: Vec2,
    pub to: Vec2,
    pub timing: BeamTiming,
    pub elapsed: f32,
}

impl Beam {
    pub fn alpha(&self) -> f32 {
        self.timing.alpha_at(self.elapsed)
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.timing.total()
    }
}

/// How the actor's outline is currently animating.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OutlineMode {
    #[default]
    Off,
    /// Toggle between full and half intensity every `interval` real seconds
    Pulsing { interval: f32, since_toggle: f32, bright: bool },
    /// Fade from the pulse level to nothing alongside the time restore
    Fading { duration: f32, elapsed: f32 },
}

/// Outline glow shown on the actor while it aims.
#[derive(Component, Debug, Clone, Default)]
pub struct ParryOutline {
    pub mode: OutlineMode,
    /// Peak intensity used by pulses and fades
    pub peak: f32,
    pub intensity: f32,
    pub alpha: f32,
}

impl ParryOutline {
    /// Restart the pulse, discarding whatever was animating before.
    pub fn pulse(&mut self, interval: f32, peak: f32) {
        self.peak = peak;
        self.mode = OutlineMode::Pulsing {
            interval,
            since_toggle: 0.0,
            bright: true,
        };
        self.intensity = peak;
        self.alpha = 0.8;
    }

    pub fn fade(&mut self, duration: f32) {
        if duration <= 0.0 {
            self.off();
            return;
        }
        self.mode = OutlineMode::Fading {
            duration,
            elapsed: 0.0,
        };
        self.intensity = self.peak;
        self.alpha = 0.8;
    }

    pub fn off(&mut self) {
        self.mode = OutlineMode::Off;
        self.intensity = 0.0;
        self.alpha = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.mode != OutlineMode::Off
    }

    /// Advance by `real_delta` seconds.
    pub fn tick(&mut self, real_delta: f32) {
        let mut faded_out = false;
        match &mut self.mode {
            OutlineMode::Off => {}
            OutlineMode::Pulsing {
                interval,
                since_toggle,
                bright,
            } => {
                *since_toggle += real_delta;
                while *interval > 0.0 && *since_toggle >= *interval {
                    *since_toggle -= *interval;
                    *bright = !*bright;
                }
                let (intensity, alpha) = if *bright {
                    (self.peak, 0.8)
                } else {
                    (self.peak * 0.5, 0.3)
                };
                self.intensity = intensity;
                self.alpha = alpha;
            }
            OutlineMode::Fading { duration, elapsed } => {
                *elapsed += real_delta;
                let t = (*elapsed / *duration).min(1.0);
                self.intensity = self.peak * (1.0 - t);
                self.alpha = 0.8 * (1.0 - t);
                faded_out = t >= 1.0;
            }
        }

        if faded_out {
            self.off();
        }
    }
}

/// Sprite color to return to when a hazard stops blinking.
#[derive(Component, Debug, Clone, Copy)]
pub struct HazardTint {
    pub base: Color,
    pub parried: Color,
}

impl HazardTint {
    pub fn new(base: Color) -> Self {
        Self {
            base,
            parried: Color::srgb(1.0, 0.92, 0.016),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beam_alpha_follows_fade_envelope() {
        let timing = BeamTiming::TELEPORT;
        assert_eq!(timing.alpha_at(0.0), 0.0);
        assert!((timing.alpha_at(0.05) - 0.5).abs() < 1e-5);
        assert_eq!(timing.alpha_at(0.3), 1.0);
        assert!((timing.alpha_at(0.85) - 0.5).abs() < 1e-5);
        assert_eq!(timing.alpha_at(1.2), 0.0);
    }

    #[test]
    fn pulse_toggles_on_interval() {
        let mut outline = ParryOutline::default();
        outline.pulse(0.1, 1.5);
        assert_eq!(outline.intensity, 1.5);

        outline.tick(0.12);
        assert_eq!(outline.intensity, 0.75);
        assert_eq!(outline.alpha, 0.3);

        outline.tick(0.1);
        assert_eq!(outline.intensity, 1.5);
    }

    #[test]
    fn fade_runs_out_and_switches_off() {
        let mut outline = ParryOutline::default();
        outline.pulse(0.1, 1.5);
        outline.fade(0.2);

        outline.tick(0.1);
        assert!((outline.intensity - 0.75).abs() < 1e-5);
        outline.tick(0.15);
        assert!(!outline.is_active());
        assert_eq!(outline.intensity, 0.0);
    }

    #[test]
    fn restarting_pulse_replaces_fade() {
        let mut outline = ParryOutline::default();
        outline.pulse(0.1, 1.0);
        outline.fade(0.2);
        outline.pulse(0.1, 1.0);
        assert!(matches!(outline.mode, OutlineMode::Pulsing { bright: true, .. }));
    }
}

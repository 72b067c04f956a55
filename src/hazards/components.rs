//! Hazard components.

use bevy::prelude::*;

use crate::core::ping_pong;

/// Stun window in gameplay seconds used when nothing else is configured.
pub const DEFAULT_EFFECT_DURATION: f32 = 1.5;

/// Gameplay seconds the knockback stays visible before a pinned hazard is stopped.
pub const KNOCKBACK_GRACE: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StunState {
    #[default]
    Normal,
    Stunned,
}

/// Makes an entity a valid parry target.
///
/// Host AI does not need to know about parries: it listens for
/// [`Parried`](crate::core::Parried) and
/// [`ParryEffectEnded`](crate::core::ParryEffectEnded) instead.
#[derive(Component, Debug, Clone)]
pub struct Parryable {
    /// Capability flag; a disabled hazard is also skipped by targeting
    pub enabled: bool,
    pub stun: StunState,
    /// Gameplay seconds left in the current stun
    pub stun_remaining: f32,
    /// Velocity the hazard had when it was last parried
    pub velocity_before_parry: Vec2,
    pub effect_duration: f32,
    /// When false, velocity is zeroed again shortly after the knockback
    pub can_move_when_parried: bool,
    /// Tint oscillations per second while stunned
    pub blink_speed: f32,
    /// Bumped on every accepted parry so delayed work can detect a newer stun
    pub stun_generation: u64,
}

impl Default for Parryable {
    fn default() -> Self {
        Self {
            enabled: true,
            stun: StunState::Normal,
            stun_remaining: 0.0,
            velocity_before_parry: Vec2::ZERO,
            effect_duration: DEFAULT_EFFECT_DURATION,
            can_move_when_parried: false,
            blink_speed: 4.0,
            stun_generation: 0,
        }
    }
}

impl Parryable {
    pub fn new(effect_duration: f32) -> Self {
        Self {
            effect_duration,
            ..default()
        }
    }

    pub fn movable(mut self) -> Self {
        self.can_move_when_parried = true;
        self
    }

    pub fn can_be_parried(&self) -> bool {
        self.enabled && self.stun == StunState::Normal
    }

    pub fn is_stunned(&self) -> bool {
        self.stun == StunState::Stunned
    }

    /// Enter the stun window.
    ///
    /// Snapshots and zeroes `velocity`; the caller applies the knockback
    /// impulse `knockback_dir * force` afterwards. Returns `false` and changes
    /// nothing when the hazard cannot be parried right now.
    pub fn on_parry(&mut self, knockback_dir: Vec2, force: f32, velocity: &mut Vec2) -> bool {
        if !self.can_be_parried() {
            return false;
        }

        self.velocity_before_parry = *velocity;
        *velocity = Vec2::ZERO;
        self.stun = StunState::Stunned;
        self.stun_remaining = self.effect_duration;
        self.stun_generation += 1;

        debug!(
            "Hazard parried: knockback {:?} x {:.1}, stunned for {:.2}s",
            knockback_dir, force, self.effect_duration
        );
        true
    }

    /// Advance the stun by `delta` gameplay seconds. Returns true when it ends.
    pub fn tick(&mut self, delta: f32) -> bool {
        if !self.is_stunned() {
            return false;
        }

        self.stun_remaining -= delta;
        if self.stun_remaining <= 0.0 {
            self.stun_remaining = 0.0;
            self.stun = StunState::Normal;
            return true;
        }
        false
    }

    /// Cut the stun short; it ends on the next stun tick, which still
    /// notifies listeners.
    pub fn force_end_effect(&mut self) {
        if self.is_stunned() {
            self.stun_remaining = 0.0;
        }
    }

    /// Lengthen an active stun. No effect on a hazard that is not stunned.
    pub fn extend_effect(&mut self, additional: f32) {
        if self.is_stunned() {
            self.stun_remaining += additional;
        }
    }

    pub fn set_parryable(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn time_remaining(&self) -> f32 {
        if self.is_stunned() {
            self.stun_remaining
        } else {
            0.0
        }
    }

    /// Tint weight in [0, 1] for the stun blink; 0 when not stunned.
    pub fn blink_factor(&self) -> f32 {
        if !self.is_stunned() {
            return 0.0;
        }
        let elapsed = self.effect_duration - self.stun_remaining;
        ping_pong(elapsed * self.blink_speed)
    }
}

/// Stops a pinned hazard once the knockback grace delay has elapsed.
#[derive(Component, Debug)]
pub struct ParryGraceFreeze {
    pub timer: Timer,
    /// Stun this freeze belongs to; a newer stun makes it stale
    pub stun_generation: u64,
}

impl ParryGraceFreeze {
    pub fn new(stun_generation: u64) -> Self {
        Self {
            timer: Timer::from_seconds(KNOCKBACK_GRACE, TimerMode::Once),
            stun_generation,
        }
    }
}

//! Combat-related components.

use bevy::prelude::*;

// Re-export from core to avoid duplication
pub use crate::core::{DamageEvent, DeathEvent};

/// Integer hit points plus the invincibility window that follows a hit.
#[derive(Component, Debug, Clone)]
pub struct Health {
    pub current: i32,
    pub maximum: i32,
    /// Gameplay seconds during which damage is ignored
    pub invincible_for: f32,
    /// Window granted automatically after every landed hit (0 disables it)
    pub post_hit_invincibility: f32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self {
            current: max,
            maximum: max,
            invincible_for: 0.0,
            post_hit_invincibility: 0.0,
        }
    }

    pub fn with_post_hit_invincibility(mut self, seconds: f32) -> Self {
        self.post_hit_invincibility = seconds.max(0.0);
        self
    }

    /// Apply `amount` damage and return how much was actually taken.
    ///
    /// Ignored while invincible or already dead.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        if amount <= 0 || self.is_invincible() || self.is_dead() {
            return 0;
        }

        let actual = amount.min(self.current);
        self.current -= actual;
        if !self.is_dead() && self.post_hit_invincibility > 0.0 {
            self.grant_invincibility(self.post_hit_invincibility);
        }
        actual
    }

    /// Ignore damage for `duration` seconds. Never shortens a longer window.
    pub fn grant_invincibility(&mut self, duration: f32) {
        self.invincible_for = self.invincible_for.max(duration);
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_for > 0.0
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    pub fn tick(&mut self, delta: f32) {
        if self.invincible_for > 0.0 {
            self.invincible_for = (self.invincible_for - delta).max(0.0);
        }
    }
}

/// Marker component for entities that have died (prevents multiple death events).
#[derive(Component)]
pub struct Dead;

/// Short-range swing in front of the attacker.
#[derive(Component, Debug, Clone)]
pub struct MeleeAttack {
    pub damage: i32,
    /// Radius of the hit circle
    pub range: f32,
    /// How far ahead of the body the hit circle sits
    pub reach: f32,
    /// Gameplay seconds between swings
    pub cooldown: f32,
    pub cooldown_remaining: f32,
    /// Set by input, consumed by the next swing
    pub requested: bool,
}

impl Default for MeleeAttack {
    fn default() -> Self {
        Self {
            damage: 1,
            range: 0.5,
            reach: 0.6,
            // Two swings per second
            cooldown: 0.5,
            cooldown_remaining: 0.0,
            requested: false,
        }
    }
}

impl MeleeAttack {
    pub fn can_attack(&self) -> bool {
        self.cooldown_remaining <= 0.0
    }

    pub fn tick(&mut self, delta: f32) {
        if self.cooldown_remaining > 0.0 {
            self.cooldown_remaining = (self.cooldown_remaining - delta).max(0.0);
        }
    }

    /// Consume a pending request. Returns true when a swing should happen now.
    pub fn try_swing(&mut self) -> bool {
        let requested = std::mem::take(&mut self.requested);
        if !requested || !self.can_attack() {
            return false;
        }
        self.cooldown_remaining = self.cooldown;
        true
    }

    /// Center of the hit circle for an attacker at `position` facing `facing`.
    pub fn hit_center(&self, position: Vec2, facing: Vec2) -> Vec2 {
        position + facing.normalize_or(Vec2::X) * self.reach
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_is_clamped_to_remaining_health() {
        let mut health = Health::new(3);
        assert_eq!(health.take_damage(999), 3);
        assert_eq!(health.current(), 0);
        assert!(health.is_dead());
        assert_eq!(health.take_damage(1), 0);
    }

    #[test]
    fn post_hit_window_blocks_follow_up_hits() {
        let mut health = Health::new(3).with_post_hit_invincibility(1.0);
        assert_eq!(health.take_damage(1), 1);
        assert_eq!(health.take_damage(1), 0);

        health.tick(0.6);
        assert_eq!(health.take_damage(1), 0);
        health.tick(0.6);
        assert_eq!(health.take_damage(1), 1);
        assert_eq!(health.current(), 1);
    }

    #[test]
    fn swings_are_rate_limited() {
        let mut melee = MeleeAttack::default();
        melee.requested = true;
        assert!(melee.try_swing());

        melee.requested = true;
        assert!(!melee.try_swing());
        assert!(!melee.requested, "a blocked request is dropped, not queued");

        melee.tick(0.5);
        melee.requested = true;
        assert!(melee.try_swing());
    }

    #[test]
    fn hit_circle_sits_ahead_of_facing() {
        let melee = MeleeAttack::default();
        let center = melee.hit_center(Vec2::new(1.0, 2.0), Vec2::new(-3.0, 0.0));
        assert!((center - Vec2::new(0.4, 2.0)).length() < 1e-6);
    }

    #[test]
    fn granting_a_shorter_window_keeps_the_longer_one() {
        let mut health = Health::new(5);
        health.grant_invincibility(0.5);
        health.grant_invincibility(0.2);
        assert_eq!(health.invincible_for, 0.5);
    }
}

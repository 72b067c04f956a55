//! Projectile components and contact rules.

use bevy::prelude::*;

/// Who the projectile is currently trying to hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heading {
    #[default]
    TowardPlayer,
    TowardEmitter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageProfile {
    /// Dealt to the player before a redirect
    pub lethal_to_player: i32,
    /// Dealt to the emitter layer after a redirect
    pub to_emitter: i32,
}

impl Default for DamageProfile {
    fn default() -> Self {
        Self {
            lethal_to_player: 999,
            to_emitter: 1,
        }
    }
}

/// Launch parameters shared by every projectile an emitter fires.
#[derive(Debug, Clone, Copy)]
pub struct ProjectileSpec {
    pub speed: f32,
    pub damage: DamageProfile,
    pub lifetime: f32,
    pub redirect_multiplier: f32,
    pub radius: f32,
}

impl Default for ProjectileSpec {
    fn default() -> Self {
        Self {
            speed: 8.0,
            damage: DamageProfile::default(),
            lifetime: 10.0,
            redirect_multiplier: 1.5,
            radius: 0.25,
        }
    }
}

/// A parryable projectile that reverses toward its emitter when parried.
#[derive(Component, Debug, Clone)]
pub struct RedirectableProjectile {
    pub heading: Heading,
    /// Back-reference only; the emitter may be gone by the time it matters
    pub emitter: Entity,
    pub damage: DamageProfile,
    pub speed: f32,
    pub redirect_multiplier: f32,
    /// Current unit travel direction
    pub direction: Vec2,
    pub lifetime: Timer,
}

impl RedirectableProjectile {
    pub fn new(emitter: Entity, direction: Vec2, spec: &ProjectileSpec) -> Self {
        Self {
            heading: Heading::TowardPlayer,
            emitter,
            damage: spec.damage,
            speed: spec.speed,
            redirect_multiplier: spec.redirect_multiplier,
            direction: direction.normalize_or(Vec2::NEG_X),
            lifetime: Timer::from_seconds(spec.lifetime, TimerMode::Once),
        }
    }

    pub fn velocity(&self) -> Vec2 {
        let multiplier = match self.heading {
            Heading::TowardPlayer => 1.0,
            Heading::TowardEmitter => self.redirect_multiplier,
        };
        self.direction * self.speed * multiplier
    }

    /// Turn toward the emitter. Only the first call does anything; it returns
    /// the new velocity.
    ///
    /// Without a known emitter position the projectile reverses along its
    /// own path.
    pub fn redirect(&mut self, position: Vec2, emitter_position: Option<Vec2>) -> Option<Vec2> {
        if self.heading == Heading::TowardEmitter {
            return None;
        }

        let reversed = -self.direction;
        self.direction = emitter_position
            .and_then(|target| (target - position).try_normalize())
            .unwrap_or(reversed);
        self.heading = Heading::TowardEmitter;
        Some(self.velocity())
    }
}

/// Marks entities on the emitter layer (the boss, turrets).
#[derive(Component, Debug, Default)]
pub struct EmitterLayer;

/// What a projectile touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Player,
    Emitter,
    Terrain,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContactOutcome {
    /// Damage for the touched entity
    pub damage: Option<i32>,
    pub despawn: bool,
}

/// Contact rules. A redirected projectile never damages the player.
pub fn contact_outcome(heading: Heading, kind: ContactKind, damage: DamageProfile) -> ContactOutcome {
    match (heading, kind) {
        (_, ContactKind::Terrain) => ContactOutcome {
            damage: None,
            despawn: true,
        },
        (Heading::TowardPlayer, ContactKind::Player) => ContactOutcome {
            damage: Some(damage.lethal_to_player),
            despawn: true,
        },
        (Heading::TowardEmitter, ContactKind::Emitter) => ContactOutcome {
            damage: Some(damage.to_emitter),
            despawn: true,
        },
        _ => ContactOutcome::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projectile() -> RedirectableProjectile {
        RedirectableProjectile::new(Entity::from_raw(1), Vec2::NEG_X, &ProjectileSpec::default())
    }

    #[test]
    fn redirect_aims_at_emitter_faster() {
        let mut shot = projectile();
        let velocity = shot.redirect(Vec2::ZERO, Some(Vec2::new(0.0, 4.0))).unwrap();
        assert_eq!(shot.heading, Heading::TowardEmitter);
        assert!((velocity - Vec2::new(0.0, 12.0)).length() < 1e-5);
    }

    #[test]
    fn redirect_happens_once() {
        let mut shot = projectile();
        shot.redirect(Vec2::ZERO, Some(Vec2::new(5.0, 0.0)));
        assert!(shot.redirect(Vec2::ZERO, Some(Vec2::new(-5.0, 0.0))).is_none());
        assert_eq!(shot.direction, Vec2::X);
    }

    #[test]
    fn missing_emitter_reverses_path() {
        let mut shot = projectile();
        shot.redirect(Vec2::ZERO, None);
        assert_eq!(shot.direction, Vec2::X);
    }

    #[test]
    fn redirected_projectile_only_hurts_emitter_layer() {
        let damage = DamageProfile::default();
        for kind in [ContactKind::Player, ContactKind::Other] {
            assert_eq!(
                contact_outcome(Heading::TowardEmitter, kind, damage),
                ContactOutcome::default()
            );
        }
        assert_eq!(
            contact_outcome(Heading::TowardEmitter, ContactKind::Emitter, damage),
            ContactOutcome {
                damage: Some(1),
                despawn: true
            }
        );
    }

    #[test]
    fn incoming_projectile_kills_player_and_breaks_on_terrain() {
        let damage = DamageProfile::default();
        assert_eq!(
            contact_outcome(Heading::TowardPlayer, ContactKind::Player, damage).damage,
            Some(999)
        );
        assert_eq!(
            contact_outcome(Heading::TowardPlayer, ContactKind::Emitter, damage),
            ContactOutcome::default()
        );
        assert!(contact_outcome(Heading::TowardPlayer, ContactKind::Terrain, damage).despawn);
    }
}

//! Projectile plugin - redirect, contact resolution and expiry.

use bevy::prelude::*;

use super::systems;

/// Projectile plugin - drives every [`RedirectableProjectile`](super::RedirectableProjectile).
pub struct ProjectilePlugin;

impl Plugin for ProjectilePlugin {
    fn build(&self, app: &mut App) {
        systems::setup_projectile_systems(app);
    }
}

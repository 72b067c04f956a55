//! Hazard plugin - strike resolution and stun windows.

use bevy::prelude::*;

use super::systems;

/// Hazard plugin - reacts to parry strikes on `Parryable` entities.
pub struct HazardPlugin;

impl Plugin for HazardPlugin {
    fn build(&self, app: &mut App) {
        systems::setup_hazard_systems(app);
    }
}

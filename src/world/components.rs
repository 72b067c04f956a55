//! World components.

use bevy::prelude::*;

/// Static geometry: stops projectiles and dashes.
#[derive(Component, Debug, Default)]
pub struct Terrain;

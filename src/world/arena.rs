//! Demo arena: floor, walls, two ledges, a pair of enemies and the boss.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::Terrain;
use crate::boss::{spawn_boss, BossConfig, BossRng};
use crate::core::layers;
use crate::enemies::{spawn_enemy, EnemyStats};
use crate::player::{spawn_player, PlayerConfig};

/// World units are meters; 40 pixels each on screen.
const PIXELS_PER_UNIT: f32 = 40.0;

/// (center, half size) of every static block.
const BLOCKS: [(Vec2, Vec2); 5] = [
    // Floor
    (Vec2::new(0.0, -0.5), Vec2::new(15.0, 0.5)),
    // Walls
    (Vec2::new(-15.5, 7.0), Vec2::new(0.5, 8.0)),
    (Vec2::new(15.5, 7.0), Vec2::new(0.5, 8.0)),
    // Ledges
    (Vec2::new(-6.0, 2.5), Vec2::new(2.0, 0.25)),
    (Vec2::new(6.0, 2.5), Vec2::new(2.0, 0.25)),
];

fn spawn_block(commands: &mut Commands, center: Vec2, half_size: Vec2) {
    commands.spawn((
        Name::new("Terrain"),
        Terrain,
        Sprite::from_color(Color::srgb(0.25, 0.24, 0.28), half_size * 2.0),
        Transform::from_translation(center.extend(0.0)),
        RigidBody::Fixed,
        Collider::cuboid(half_size.x, half_size.y),
        layers::terrain_groups(),
    ));
}

/// Spawn the arena, its camera and everyone in it.
pub fn setup_arena(
    mut commands: Commands,
    player_config: Res<PlayerConfig>,
    boss_config: Res<BossConfig>,
    mut boss_rng: ResMut<BossRng>,
) {
    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scale: 1.0 / PIXELS_PER_UNIT,
            ..OrthographicProjection::default_2d()
        },
        Transform::from_xyz(0.0, 5.0, 0.0),
    ));

    for (center, half_size) in BLOCKS {
        spawn_block(&mut commands, center, half_size);
    }

    spawn_player(&mut commands, Vec2::new(-8.0, 0.6), &player_config);

    for x in [3.0, 9.0] {
        spawn_enemy(&mut commands, Vec2::new(x, 0.5), EnemyStats::default());
    }

    let boss_start = boss_config.flight_area().center();
    spawn_boss(&mut commands, boss_start, &boss_config, &mut boss_rng);

    info!("Arena ready: {} terrain blocks, 2 enemies, boss at {:?}", BLOCKS.len(), boss_start);
}

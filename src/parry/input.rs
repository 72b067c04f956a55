//! Device input mapped onto [`ParryIntent`].
//!
//! Left mouse button (or `K`) is the parry button. Aim comes from the
//! arrow keys when any are held, otherwise from the cursor's offset to the
//! player in world space.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::components::ParryIntent;
use crate::player::Player;

const PARRY_BUTTON: MouseButton = MouseButton::Left;
const PARRY_KEY: KeyCode = KeyCode::KeyK;

fn aim_from_keys(keyboard: &ButtonInput<KeyCode>) -> Vec2 {
    let mut axis = Vec2::ZERO;
    if keyboard.pressed(KeyCode::ArrowUp) {
        axis.y += 1.0;
    }
    if keyboard.pressed(KeyCode::ArrowDown) {
        axis.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::ArrowLeft) {
        axis.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::ArrowRight) {
        axis.x += 1.0;
    }
    axis
}

/// Sample buttons and aim for the player once per frame.
pub fn read_parry_input(
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    mut players: Query<(&Transform, &mut ParryIntent), With<Player>>,
) {
    let Ok((transform, mut intent)) = players.get_single_mut() else {
        return;
    };

    let pressed = mouse.just_pressed(PARRY_BUTTON) || keyboard.just_pressed(PARRY_KEY);
    let released = mouse.just_released(PARRY_BUTTON) || keyboard.just_released(PARRY_KEY);
    intent.pressed |= pressed;
    intent.released |= released;
    intent.held = mouse.pressed(PARRY_BUTTON) || keyboard.pressed(PARRY_KEY);

    let keys = aim_from_keys(&keyboard);
    if keys != Vec2::ZERO {
        intent.aim = keys;
        return;
    }

    let cursor_world = windows
        .get_single()
        .ok()
        .and_then(|window| window.cursor_position())
        .and_then(|cursor| {
            let (camera, camera_transform) = cameras.get_single().ok()?;
            camera.viewport_to_world_2d(camera_transform, cursor).ok()
        });

    intent.aim = match cursor_world {
        Some(point) => point - transform.translation.truncate(),
        None => Vec2::ZERO,
    };
}

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use crate::shared::*;

/// Pixel-unit scroll events (touchpads) are converted to lines at this rate.
const PIXELS_PER_LINE: f32 = 20.0;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreUpdate, read_frame_input);
    }
}

/// The single point where hardware input becomes game intent.
fn read_frame_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut wheel_events: EventReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    mut input: ResMut<FrameInput>,
) {
    *input = FrameInput::default();

    input.move_axis = movement_axis(
        keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp),
        keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown),
        keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft),
        keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight),
    );

    for event in wheel_events.read() {
        input.wheel += match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y / PIXELS_PER_LINE,
        };
    }
    input.zoom_modifier =
        keys.pressed(KeyCode::ControlLeft) || keys.pressed(KeyCode::ControlRight);

    input.tool_use = mouse.just_pressed(MouseButton::Left);
    input.harvest = mouse.just_pressed(MouseButton::Right);

    for (i, key) in [
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
        KeyCode::Digit5,
    ]
    .iter()
    .enumerate()
    {
        if keys.just_pressed(*key) {
            input.hotbar_slot = Some(i);
            break;
        }
    }

    input.pause = keys.just_pressed(KeyCode::Escape);
    input.toggle_stats = keys.just_pressed(KeyCode::F3);
    input.dump_snapshot = keys.just_pressed(KeyCode::F4);

    // Screen → world through the camera's inverse view transform.
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.get_single() else {
        return;
    };
    input.cursor_world = window
        .cursor_position()
        .and_then(|cursor| camera.viewport_to_world_2d(camera_transform, cursor).ok());
}

/// Sum the four direction keys into a unit vector (or zero).
pub fn movement_axis(up: bool, down: bool, left: bool, right: bool) -> Vec2 {
    let mut axis = Vec2::ZERO;
    if up {
        axis.y += 1.0;
    }
    if down {
        axis.y -= 1.0;
    }
    if left {
        axis.x -= 1.0;
    }
    if right {
        axis.x += 1.0;
    }
    axis.normalize_or_zero()
}

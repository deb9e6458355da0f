use bevy::prelude::*;
use crate::shared::*;

/// Lerp the camera target toward the player by `rate * dt` (capped at 1.0).
/// Like the movement smoothing this depends on frame rate.
pub fn follow(target: Vec2, player: Vec2, rate: f32, dt: f32) -> Vec2 {
    target.lerp(player, (rate * dt).min(1.0))
}

/// Zoom by whole wheel notches of `ZOOM_STEP`, kept within [3, 8].
pub fn apply_zoom(zoom: f32, wheel: f32) -> f32 {
    (zoom + wheel * ZOOM_STEP).clamp(ZOOM_MIN, ZOOM_MAX)
}

pub fn camera_follow_player(
    time: Res<Time>,
    config: Res<FarmConfig>,
    player_query: Query<&Transform, With<Player>>,
    mut rig: ResMut<CameraRig>,
) {
    let Ok(transform) = player_query.get_single() else {
        return;
    };
    let player = transform.translation.truncate();
    rig.target = follow(rig.target, player, config.camera_follow_rate, time.delta_secs());
}

/// Ctrl + wheel zooms. Without Ctrl the wheel belongs to the hotbar.
pub fn camera_zoom(input: Res<FrameInput>, mut rig: ResMut<CameraRig>) {
    if !input.zoom_modifier || input.wheel == 0.0 {
        return;
    }
    let zoom = apply_zoom(rig.zoom(), input.wheel);
    rig.set_zoom(zoom);
}

/// Write the rig onto the 2D camera: translation = target, scale = 1 / zoom.
pub fn sync_camera_transform(
    rig: Res<CameraRig>,
    mut camera_query: Query<&mut Transform, (With<Camera2d>, Without<Player>)>,
) {
    let Ok(mut cam_tf) = camera_query.get_single_mut() else {
        return;
    };
    cam_tf.translation.x = rig.target.x;
    cam_tf.translation.y = rig.target.y;
    cam_tf.scale = Vec3::splat(1.0 / rig.zoom());
}

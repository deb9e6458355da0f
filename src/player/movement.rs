use bevy::prelude::*;
use crate::shared::*;

/// Blend the velocity toward the input direction.
///
/// The blend factor is `acceleration * dt` while a key is held and
/// `deceleration * dt` when idle, so the feel depends on frame rate. For
/// frames shorter than `1 / rate` the factor is exactly that product. Longer
/// frames would push it past 1.0 and overshoot, so it is capped there and
/// such a frame lands on the target. This is the one place the blend departs
/// from a plain `rate * dt` lerp.
pub fn step_velocity(
    velocity: Vec2,
    input_dir: Vec2,
    speed: f32,
    acceleration: f32,
    deceleration: f32,
    dt: f32,
) -> Vec2 {
    let dir = input_dir.normalize_or_zero();
    if dir != Vec2::ZERO {
        velocity.lerp(dir * speed, (acceleration * dt).min(1.0))
    } else {
        velocity.lerp(Vec2::ZERO, (deceleration * dt).min(1.0))
    }
}

/// Keep the player's centre at least half a tile inside the world.
pub fn clamp_to_world(pos: Vec2, world_size: Vec2) -> Vec2 {
    let min = Vec2::splat(TILE_SIZE * 0.5);
    let max = (world_size - min).max(min);
    pos.clamp(min, max)
}

/// Face along the dominant input axis; vertical wins ties.
pub fn facing_from_axis(axis: Vec2, current: Facing) -> Facing {
    if axis == Vec2::ZERO {
        return current;
    }
    if axis.y.abs() >= axis.x.abs() {
        if axis.y > 0.0 { Facing::Up } else { Facing::Down }
    } else if axis.x > 0.0 {
        Facing::Right
    } else {
        Facing::Left
    }
}

/// Core movement system: smooths velocity toward the input, integrates
/// position and clamps it to the grid's extents.
pub fn player_movement(
    time: Res<Time>,
    input: Res<FrameInput>,
    grid: Res<WorldGrid>,
    mut query: Query<(&mut Transform, &mut PlayerMotion), With<Player>>,
) {
    let Ok((mut transform, mut motion)) = query.get_single_mut() else {
        return;
    };
    let dt = time.delta_secs();

    motion.velocity = step_velocity(
        motion.velocity,
        input.move_axis,
        motion.speed,
        motion.acceleration,
        motion.deceleration,
        dt,
    );
    motion.facing = facing_from_axis(input.move_axis, motion.facing);

    let next = transform.translation.truncate() + motion.velocity * dt;
    let clamped = clamp_to_world(next, grid.pixel_size());
    transform.translation.x = clamped.x;
    transform.translation.y = clamped.y;
}

pub fn flip_player_sprite(mut query: Query<(&PlayerMotion, &mut Sprite), Changed<PlayerMotion>>) {
    for (motion, mut sprite) in &mut query {
        match motion.facing {
            Facing::Left => sprite.flip_x = true,
            Facing::Right => sprite.flip_x = false,
            Facing::Up | Facing::Down => {}
        }
    }
}

use bevy::prelude::*;
use crate::shared::*;
use crate::world::{atlas_sprite, TileAtlas, PLAYER_SPRITE_CELL};

/// Starting grid cell, kept inside small worlds.
const SPAWN_GRID_X: i32 = 3;
const SPAWN_GRID_Y: i32 = 3;

/// Spawn the player entity and point the camera at it.
/// Runs once in PostStartup, after the world grid has been generated.
pub fn spawn_player(
    mut commands: Commands,
    grid: Res<WorldGrid>,
    config: Res<FarmConfig>,
    atlas: Res<TileAtlas>,
    mut rig: ResMut<CameraRig>,
    existing: Query<Entity, With<Player>>,
) {
    // Guard: don't double-spawn.
    if !existing.is_empty() {
        return;
    }

    let gx = SPAWN_GRID_X.min(grid.width() - 1).max(0);
    let gy = SPAWN_GRID_Y.min(grid.height() - 1).max(0);
    let position = grid_to_world(gx, gy);

    commands.spawn((
        Player,
        PlayerMotion {
            speed: config.player_speed,
            ..default()
        },
        // Placeholder colour is a blue square when the atlas is missing.
        atlas_sprite(&atlas, PLAYER_SPRITE_CELL, (0.2, 0.5, 0.8)),
        // Z = 10 so the player draws above terrain.
        Transform::from_translation(position.extend(10.0)),
    ));

    *rig = CameraRig::new(position, ZOOM_MIN);
    info!("[Player] Spawned at tile ({}, {})", gx, gy);
}

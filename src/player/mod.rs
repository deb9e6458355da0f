pub mod movement;
pub mod tools;
pub mod camera;
pub mod spawn;

use bevy::prelude::*;
use bevy::transform::TransformSystem;
use crate::shared::*;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        // -- Spawn once the world grid exists --
        app.add_systems(PostStartup, spawn::spawn_player);

        // -- Systems that run every frame while Playing --
        app.add_systems(
            Update,
            (
                movement::player_movement,
                camera::camera_follow_player,
                camera::camera_zoom,
                tools::tool_intent,
            )
                .chain()
                .run_if(in_state(GameState::Playing)),
        );

        // -- Presentation runs in every state so a paused frame still draws --
        app.add_systems(
            PostUpdate,
            (
                movement::flip_player_sprite,
                camera::sync_camera_transform.before(TransformSystem::TransformPropagate),
            ),
        );
    }
}

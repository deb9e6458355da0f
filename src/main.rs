mod shared;
mod input;
mod calendar;
mod player;
mod farming;
mod world;
mod ui;
mod data;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use shared::*;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Farm Sim".into(),
                        resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                        present_mode: PresentMode::AutoVsync,
                        resizable: true,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        // Game state
        .init_state::<GameState>()
        // Shared resources
        .init_resource::<FarmConfig>()
        .init_resource::<WorldGrid>()
        .init_resource::<Inventory>()
        .init_resource::<DayClock>()
        .init_resource::<DayNightTint>()
        .init_resource::<CameraRig>()
        .init_resource::<FrameInput>()
        // Events
        .add_event::<ToolUseEvent>()
        .add_event::<HarvestAttemptEvent>()
        .add_event::<CropHarvestedEvent>()
        .add_event::<NewDayEvent>()
        // Data loading
        .add_plugins(data::DataPlugin)
        // Domain plugins
        .add_plugins(input::InputPlugin)
        .add_plugins(calendar::CalendarPlugin)
        .add_plugins(player::PlayerPlugin)
        .add_plugins(farming::FarmingPlugin)
        .add_plugins(world::WorldPlugin)
        .add_plugins(ui::UiPlugin)
        // Camera
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Transform::from_scale(Vec3::splat(1.0 / ZOOM_MIN)),
    ));
}

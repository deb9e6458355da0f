//! Headless integration tests for Farmsim.
//!
//! These tests exercise the game's ECS logic without a window or GPU.
//! They use Bevy's `MinimalPlugins` to tick the app, register only the
//! pure-logic plugins and systems (skipping all rendering/UI), and verify
//! that the core game loops work correctly.
//!
//! Run with: `cargo test --test headless`

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use bevy::transform::TransformPlugin;
use farmsim::calendar::CalendarPlugin;
use farmsim::data::DataPlugin;
use farmsim::farming::FarmingPlugin;
use farmsim::player::movement::player_movement;
use farmsim::player::tools::tool_intent;
use farmsim::player::PlayerPlugin;
use farmsim::shared::*;
use farmsim::ui::input::{hotbar_selection, toggle_pause};
use farmsim::world::TileAtlas;

/// Seconds of game time per `app.update()`.
const STEP: f32 = 0.1;

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Builds a minimal Bevy app with all shared resources and events registered
/// but NO rendering, windowing, or asset loading. Each update advances time
/// by exactly `STEP` seconds. Plugins and systems are added per-test.
fn build_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
        STEP,
    )));

    // ── Game State ───────────────────────────────────────────────────────
    app.init_state::<GameState>();

    // ── Shared Resources (mirrors main.rs) ───────────────────────────────
    app.init_resource::<FarmConfig>()
        .insert_resource(WorldGrid::new(WORLD_WIDTH, WORLD_HEIGHT))
        .insert_resource(Inventory::with_loadout(DEFAULT_STARTING_SEEDS))
        .init_resource::<DayClock>()
        .init_resource::<DayNightTint>()
        .init_resource::<CameraRig>()
        .init_resource::<FrameInput>();

    // ── Shared Events (mirrors main.rs) ──────────────────────────────────
    app.add_event::<ToolUseEvent>()
        .add_event::<HarvestAttemptEvent>()
        .add_event::<CropHarvestedEvent>()
        .add_event::<NewDayEvent>();

    app
}

fn set_state(app: &mut App, state: GameState) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(state);
    app.update(); // process state transition
}

fn use_item(app: &mut App, item: ItemKind, x: i32, y: i32) {
    app.world_mut().send_event(ToolUseEvent {
        item,
        grid_x: x,
        grid_y: y,
    });
    app.update();
}

fn tile_kind(app: &App, x: i32, y: i32) -> Option<TileKind> {
    app.world().resource::<WorldGrid>().get(x, y).map(|t| t.kind)
}

fn spawn_test_player(app: &mut App, position: Vec2) -> Entity {
    app.world_mut()
        .spawn((
            Player,
            PlayerMotion::default(),
            Transform::from_translation(position.extend(10.0)),
        ))
        .id()
}

// ─────────────────────────────────────────────────────────────────────────────
// Boot
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_headless_boot_loads_config_and_seeds_session() {
    let mut app = build_test_app();
    app.insert_resource(Inventory::default());
    app.add_plugins(DataPlugin);

    app.update();

    // The shipped config mirrors the built-in defaults.
    assert_eq!(*app.world().resource::<FarmConfig>(), FarmConfig::default());

    let inventory = app.world().resource::<Inventory>();
    assert_eq!(inventory.count(ItemKind::Seed), DEFAULT_STARTING_SEEDS);
    assert_eq!(inventory.slot(0).map(|s| s.item), Some(ItemKind::Hoe));
    assert_eq!(inventory.slot(1).map(|s| s.item), Some(ItemKind::WateringCan));
    assert_eq!(inventory.slot(3).map(|s| s.item), Some(ItemKind::Wheat));

    let clock = app.world().resource::<DayClock>();
    assert_eq!(clock.hour(), 8);
    assert_eq!(clock.day, 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Tile state machine driven by events
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_till_water_plant_consumes_one_seed() {
    let mut app = build_test_app();
    app.add_plugins(FarmingPlugin);
    app.update();

    use_item(&mut app, ItemKind::Hoe, 3, 3);
    assert_eq!(tile_kind(&app, 3, 3), Some(TileKind::TilledSoil));

    use_item(&mut app, ItemKind::WateringCan, 3, 3);
    assert_eq!(tile_kind(&app, 3, 3), Some(TileKind::WateredSoil));

    app.world_mut().resource_mut::<Inventory>().select(2);
    use_item(&mut app, ItemKind::Seed, 3, 3);

    let kind = tile_kind(&app, 3, 3);
    assert!(
        matches!(kind, Some(TileKind::SeedPlanted)),
        "Fresh seed should still be a seed after one frame, got {:?}",
        kind
    );
    assert_eq!(app.world().resource::<Inventory>().count(ItemKind::Seed), 4);

    // Neighbours are untouched.
    assert_eq!(tile_kind(&app, 4, 3), Some(TileKind::Dirt));
}

#[test]
fn test_out_of_bounds_tool_use_is_ignored() {
    let mut app = build_test_app();
    app.add_plugins(FarmingPlugin);
    app.update();

    use_item(&mut app, ItemKind::Hoe, -1, 0);
    use_item(&mut app, ItemKind::Hoe, WORLD_WIDTH, 0);

    let grid = app.world().resource::<WorldGrid>();
    assert_eq!(grid.count(TileKind::Dirt), (WORLD_WIDTH * WORLD_HEIGHT) as usize);
}

#[test]
fn test_planted_seed_ripens_over_time() {
    let mut app = build_test_app();
    app.add_plugins(FarmingPlugin);
    app.update();

    use_item(&mut app, ItemKind::Hoe, 5, 5);
    use_item(&mut app, ItemKind::WateringCan, 5, 5);
    app.world_mut().resource_mut::<Inventory>().select(2);
    use_item(&mut app, ItemKind::Seed, 5, 5);

    // Default rate 0.1/s needs 10 s to ripen: 100 frames of 0.1 s.
    let mut saw_growing = false;
    for _ in 0..120 {
        app.update();
        if tile_kind(&app, 5, 5) == Some(TileKind::CropGrowing) {
            saw_growing = true;
        }
    }
    assert!(saw_growing, "Crop should pass through CropGrowing");
    assert_eq!(tile_kind(&app, 5, 5), Some(TileKind::CropReady));

    // Ripe crops stop accumulating.
    let growth = app.world().resource::<WorldGrid>().get(5, 5).map(|t| t.growth_time);
    app.update();
    let after = app.world().resource::<WorldGrid>().get(5, 5).map(|t| t.growth_time);
    assert_eq!(growth, after);
}

#[test]
fn test_harvest_without_wheat_slot_loses_the_crop() {
    let mut app = build_test_app();
    app.add_plugins(FarmingPlugin);
    {
        let mut inventory = app.world_mut().resource_mut::<Inventory>();
        inventory.set_slot(3, InventorySlot::EMPTY);
    }
    {
        let mut grid = app.world_mut().resource_mut::<WorldGrid>();
        if let Some(tile) = grid.get_mut(7, 2) {
            tile.kind = TileKind::CropReady;
            tile.growth_time = 1.2;
        }
    }
    app.update();
    let before: Vec<InventorySlot> = app.world().resource::<Inventory>().slots().to_vec();

    app.world_mut().send_event(HarvestAttemptEvent { grid_x: 7, grid_y: 2 });
    app.update();

    assert_eq!(tile_kind(&app, 7, 2), Some(TileKind::Dirt));
    assert_eq!(app.world().resource::<Inventory>().slots(), before.as_slice());

    let events = app.world().resource::<Events<CropHarvestedEvent>>();
    let harvested: Vec<&CropHarvestedEvent> = events.iter_current_update_events().collect();
    assert_eq!(harvested.len(), 1);
    assert!(!harvested[0].granted);
}

#[test]
fn test_harvest_adds_wheat_to_existing_slot() {
    let mut app = build_test_app();
    app.add_plugins(FarmingPlugin);
    {
        let mut grid = app.world_mut().resource_mut::<WorldGrid>();
        if let Some(tile) = grid.get_mut(0, 0) {
            tile.kind = TileKind::CropReady;
        }
    }
    app.update();

    app.world_mut().send_event(HarvestAttemptEvent { grid_x: 0, grid_y: 0 });
    app.update();

    assert_eq!(tile_kind(&app, 0, 0), Some(TileKind::Dirt));
    assert_eq!(app.world().resource::<Inventory>().count(ItemKind::Wheat), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Clock and pause
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_clock_advances_while_playing_and_stops_while_paused() {
    let mut app = build_test_app();
    app.add_plugins(CalendarPlugin);

    // The first frame has no delta.
    app.update();
    let start = app.world().resource::<DayClock>().day_time;
    for _ in 0..10 {
        app.update();
    }
    let played = app.world().resource::<DayClock>().day_time;
    // 10 frames × 0.1 s × 0.2 h/s = 0.2 h
    assert!(
        (played - start - 0.2).abs() < 1e-3,
        "Expected 0.2h to pass, got {}",
        played - start
    );

    set_state(&mut app, GameState::Paused);
    let paused_at = app.world().resource::<DayClock>().day_time;
    for _ in 0..10 {
        app.update();
    }
    assert_eq!(app.world().resource::<DayClock>().day_time, paused_at);

    set_state(&mut app, GameState::Playing);
    app.update();
    assert!(app.world().resource::<DayClock>().day_time > paused_at);
}

#[test]
fn test_clock_wraps_at_midnight_and_starts_a_new_day() {
    let mut app = build_test_app();
    app.insert_resource(DayClock::new(23.9, 2.0));
    app.add_plugins(CalendarPlugin);

    let mut new_days = Vec::new();
    for _ in 0..5 {
        app.update();
        let events = app.world().resource::<Events<NewDayEvent>>();
        new_days.extend(events.iter_current_update_events().map(|e| e.day));
    }

    // A frame's events can be seen twice before the buffers swap.
    new_days.dedup();

    let clock = app.world().resource::<DayClock>();
    assert_eq!(clock.day, 2);
    assert!((0.0..HOURS_PER_DAY).contains(&clock.day_time));
    assert!(clock.day_time < 1.0);
    assert_eq!(new_days, vec![2]);
}

#[test]
fn test_clock_stays_in_range_over_many_days() {
    let mut clock = DayClock::new(DEFAULT_START_HOUR, 3.7);
    for i in 0..5_000 {
        clock.advance(0.016 + (i % 7) as f32 * 0.05);
        assert!((0.0..HOURS_PER_DAY).contains(&clock.day_time));
        assert_eq!(
            clock.is_night(),
            clock.day_time > NIGHT_START_HOUR || clock.day_time < NIGHT_END_HOUR
        );
    }
    assert!(clock.day > 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Player and camera
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_player_spawns_with_camera_centred_on_it() {
    let mut app = build_test_app();
    app.init_resource::<TileAtlas>();
    app.add_plugins(PlayerPlugin);

    app.update();

    let mut query = app.world_mut().query_filtered::<&Transform, With<Player>>();
    let positions: Vec<Vec2> = query
        .iter(app.world())
        .map(|t| t.translation.truncate())
        .collect();
    assert_eq!(positions.len(), 1);
    assert_eq!(positions[0], grid_to_world(3, 3));

    let rig = app.world().resource::<CameraRig>();
    assert_eq!(rig.target, grid_to_world(3, 3));
    assert_eq!(rig.zoom(), ZOOM_MIN);
}

#[test]
fn test_player_stays_inside_the_world() {
    let mut app = build_test_app();
    app.add_systems(Update, player_movement);
    let player = spawn_test_player(&mut app, grid_to_world(1, 1));

    app.world_mut().resource_mut::<FrameInput>().move_axis = Vec2::new(-1.0, -1.0).normalize();
    for _ in 0..60 {
        app.update();
    }

    let pos = app.world().get::<Transform>(player).map(|t| t.translation.truncate());
    assert_eq!(pos, Some(Vec2::splat(TILE_SIZE * 0.5)));

    app.world_mut().resource_mut::<FrameInput>().move_axis = Vec2::new(1.0, 0.0);
    for _ in 0..200 {
        app.update();
    }
    let pos = app
        .world()
        .get::<Transform>(player)
        .map(|t| t.translation.truncate())
        .unwrap_or_default();
    let max = WORLD_WIDTH as f32 * TILE_SIZE - TILE_SIZE * 0.5;
    assert_eq!(pos.x, max);
    assert!(pos.y >= TILE_SIZE * 0.5 && pos.y <= max);
}

#[test]
fn test_velocity_approaches_speed_then_decays() {
    let mut app = build_test_app();
    app.add_systems(Update, player_movement);
    let player = spawn_test_player(&mut app, grid_to_world(10, 10));

    app.world_mut().resource_mut::<FrameInput>().move_axis = Vec2::Y;
    for _ in 0..20 {
        app.update();
    }
    let speed = app
        .world()
        .get::<PlayerMotion>(player)
        .map(|m| m.velocity.length())
        .unwrap_or_default();
    assert!((speed - PLAYER_SPEED).abs() < 0.5, "speed was {}", speed);

    app.world_mut().resource_mut::<FrameInput>().move_axis = Vec2::ZERO;
    for _ in 0..20 {
        app.update();
    }
    let speed = app
        .world()
        .get::<PlayerMotion>(player)
        .map(|m| m.velocity.length())
        .unwrap_or(f32::MAX);
    assert!(speed < 0.01, "speed was {}", speed);
}

#[test]
fn test_ctrl_wheel_zoom_is_clamped() {
    let mut app = build_test_app();
    app.init_resource::<TileAtlas>();
    app.add_plugins(PlayerPlugin);
    app.update();

    {
        let mut input = app.world_mut().resource_mut::<FrameInput>();
        input.zoom_modifier = true;
        input.wheel = 100.0;
    }
    app.update();
    assert_eq!(app.world().resource::<CameraRig>().zoom(), ZOOM_MAX);

    app.world_mut().resource_mut::<FrameInput>().wheel = -3.0;
    app.update();
    assert_eq!(app.world().resource::<CameraRig>().zoom(), ZOOM_MAX - 3.0 * ZOOM_STEP);

    // Without Ctrl the wheel leaves the zoom alone.
    {
        let mut input = app.world_mut().resource_mut::<FrameInput>();
        input.zoom_modifier = false;
        input.wheel = -50.0;
    }
    app.update();
    assert_eq!(app.world().resource::<CameraRig>().zoom(), ZOOM_MAX - 3.0 * ZOOM_STEP);
}

#[test]
fn test_click_on_tile_emits_tool_event_for_selected_item() {
    let mut app = build_test_app();
    app.init_resource::<TileAtlas>();
    app.add_plugins(PlayerPlugin);
    app.add_plugins(FarmingPlugin);
    app.update();

    {
        let mut input = app.world_mut().resource_mut::<FrameInput>();
        input.cursor_world = Some(grid_to_world(6, 4));
        input.tool_use = true;
    }
    app.update();

    // Slot 0 is the hoe; the click lands in the frame it was made.
    assert_eq!(tile_kind(&app, 6, 4), Some(TileKind::TilledSoil));
}

#[test]
fn test_hotbar_key_and_click_in_one_frame_plant_a_seed() {
    let mut app = build_test_app();
    app.init_resource::<TileAtlas>();
    app.add_plugins(PlayerPlugin);
    app.add_plugins(FarmingPlugin);
    app.add_systems(Update, hotbar_selection.before(tool_intent));
    {
        let mut grid = app.world_mut().resource_mut::<WorldGrid>();
        if let Some(tile) = grid.get_mut(8, 8) {
            tile.kind = TileKind::WateredSoil;
        }
    }
    app.update();

    {
        let mut input = app.world_mut().resource_mut::<FrameInput>();
        input.hotbar_slot = Some(2);
        input.cursor_world = Some(grid_to_world(8, 8));
        input.tool_use = true;
    }
    app.update();

    assert_eq!(tile_kind(&app, 8, 8), Some(TileKind::SeedPlanted));
    assert_eq!(app.world().resource::<Inventory>().count(ItemKind::Seed), 4);
}

#[test]
fn test_camera_global_transform_follows_rig_in_the_same_frame() {
    let mut app = build_test_app();
    app.add_plugins(TransformPlugin);
    app.init_resource::<TileAtlas>();
    app.add_plugins(PlayerPlugin);
    let camera = app.world_mut().spawn((Camera2d, Transform::default())).id();

    app.update();

    let global = app
        .world()
        .get::<GlobalTransform>(camera)
        .map(|g| g.compute_transform());
    let Some(global) = global else {
        panic!("camera has no GlobalTransform");
    };
    assert_eq!(global.translation.truncate(), grid_to_world(3, 3));
    assert!((global.scale.x - 1.0 / ZOOM_MIN).abs() < 1e-6);
}

// ─────────────────────────────────────────────────────────────────────────────
// Pause
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_crops_do_not_grow_while_paused() {
    let mut app = build_test_app();
    app.add_plugins(FarmingPlugin);
    {
        let mut grid = app.world_mut().resource_mut::<WorldGrid>();
        if let Some(tile) = grid.get_mut(2, 2) {
            tile.kind = TileKind::SeedPlanted;
        }
    }
    app.update();
    app.update();
    let growing = app.world().resource::<WorldGrid>().get(2, 2).map(|t| t.growth_time);
    assert!(growing.is_some_and(|g| g > 0.0), "seed should grow while playing");

    set_state(&mut app, GameState::Paused);
    let frozen = app.world().resource::<WorldGrid>().get(2, 2).map(|t| t.growth_time);
    for _ in 0..20 {
        app.update();
    }
    let after = app.world().resource::<WorldGrid>().get(2, 2).map(|t| t.growth_time);
    assert_eq!(after, frozen);
    assert_eq!(tile_kind(&app, 2, 2), Some(TileKind::SeedPlanted));
}

#[test]
fn test_player_does_not_move_while_paused() {
    let mut app = build_test_app();
    app.init_resource::<TileAtlas>();
    app.add_plugins(PlayerPlugin);
    app.update();

    set_state(&mut app, GameState::Paused);
    app.world_mut().resource_mut::<FrameInput>().move_axis = Vec2::X;

    let mut query = app.world_mut().query_filtered::<&Transform, With<Player>>();
    let before: Vec<Vec3> = query.iter(app.world()).map(|t| t.translation).collect();
    for _ in 0..20 {
        app.update();
    }
    let after: Vec<Vec3> = query.iter(app.world()).map(|t| t.translation).collect();
    assert_eq!(before.len(), 1);
    assert_eq!(before, after);

    // Resuming picks the movement back up.
    set_state(&mut app, GameState::Playing);
    app.update();
    let resumed: Vec<Vec3> = query.iter(app.world()).map(|t| t.translation).collect();
    assert!(resumed[0].x > before[0].x);
}

fn press_escape(app: &mut App) -> GameState {
    app.world_mut().resource_mut::<FrameInput>().pause = true;
    app.update();
    app.world_mut().resource_mut::<FrameInput>().pause = false;
    app.update(); // apply NextState
    *app.world().resource::<State<GameState>>().get()
}

#[test]
fn test_escape_toggles_pause() {
    let mut app = build_test_app();
    app.add_systems(Update, toggle_pause);
    app.update();

    assert_eq!(press_escape(&mut app), GameState::Paused);
    assert_eq!(press_escape(&mut app), GameState::Playing);
}

#[test]
fn test_hotbar_keys_and_wheel_select_slots() {
    let mut app = build_test_app();
    app.add_systems(Update, hotbar_selection);
    app.update();

    app.world_mut().resource_mut::<FrameInput>().hotbar_slot = Some(2);
    app.update();
    assert_eq!(app.world().resource::<Inventory>().selected(), 2);

    // Ctrl held: the wheel zooms and leaves the hotbar alone.
    {
        let mut input = app.world_mut().resource_mut::<FrameInput>();
        input.hotbar_slot = None;
        input.zoom_modifier = true;
        input.wheel = -3.0;
    }
    app.update();
    assert_eq!(app.world().resource::<Inventory>().selected(), 2);

    // Without Ctrl one notch down is the next slot.
    {
        let mut input = app.world_mut().resource_mut::<FrameInput>();
        input.zoom_modifier = false;
        input.wheel = -1.0;
    }
    app.update();
    assert_eq!(app.world().resource::<Inventory>().selected(), 3);

    // Keys past the hotbar are ignored.
    {
        let mut input = app.world_mut().resource_mut::<FrameInput>();
        input.wheel = 0.0;
        input.hotbar_slot = Some(7);
    }
    app.update();
    assert_eq!(app.world().resource::<Inventory>().selected(), 3);
}

// ─────────────────────────────────────────────────────────────────────────────
// Inventory and snapshot
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_slots_always_hold_zero() {
    let mut inventory = Inventory::with_loadout(DEFAULT_STARTING_SEEDS);
    inventory.set_slot(6, InventorySlot { item: ItemKind::None, count: 9 });
    inventory.select(2);
    for _ in 0..10 {
        inventory.consume_selected();
    }
    inventory.add_to_existing(ItemKind::None);
    inventory.add_to_existing(ItemKind::Wheat);

    for slot in inventory.slots() {
        if slot.item == ItemKind::None {
            assert_eq!(slot.count, 0);
        }
    }
    assert_eq!(inventory.count(ItemKind::Seed), 0);
    assert_eq!(inventory.count(ItemKind::Wheat), 1);
}

#[test]
fn test_snapshot_serializes_to_json() {
    let grid = WorldGrid::new(4, 3);
    let inventory = Inventory::with_loadout(5);
    let clock = DayClock::new(21.0, 0.2);
    let rig = CameraRig::new(Vec2::new(56.0, 56.0), 4.0);
    let snapshot = FarmSnapshot::capture(
        &grid,
        Vec2::new(56.0, 56.0),
        Vec2::ZERO,
        &inventory,
        &clock,
        &rig,
    );

    let json = serde_json::to_string(&snapshot).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["night"], serde_json::Value::Bool(true));
    assert_eq!(value["camera_zoom"].as_f64(), Some(4.0));
    assert_eq!(value["grid"]["tiles"].as_array().map(|t| t.len()), Some(12));
    assert_eq!(value["inventory"]["slots"][2]["item"], "Seed");
    assert_eq!(value["inventory"]["slots"][2]["count"], 5);
}

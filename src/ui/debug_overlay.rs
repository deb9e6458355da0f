use bevy::prelude::*;
use crate::shared::*;

/// Whether the stats panel is shown. F3 toggles it.
#[derive(Resource, Debug)]
pub struct StatsPanelState {
    pub visible: bool,
}

impl Default for StatsPanelState {
    fn default() -> Self {
        Self { visible: true }
    }
}

/// Crops harvested this session, and how many of them found a wheat slot.
#[derive(Resource, Debug, Default)]
pub struct HarvestTally {
    pub harvested: u32,
    pub granted: u32,
}

/// Marker for the stats panel root node.
#[derive(Component)]
pub struct StatsPanelRoot;

/// Marker for the stats text.
#[derive(Component)]
pub struct StatsPanelText;

/// Spawn the stats panel UI (runs once at startup).
pub fn spawn_stats_panel(mut commands: Commands) {
    commands
        .spawn((
            StatsPanelRoot,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(8.0),
                top: Val::Px(8.0),
                padding: UiRect::all(Val::Px(6.0)),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.3, 0.8, 0.3)),
            BorderColor(Color::srgba(0.0, 0.2, 0.6, 0.8)),
            ZIndex(1000),
        ))
        .with_children(|parent| {
            parent.spawn((
                StatsPanelText,
                Text::new("Camera"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(Color::srgb(0.05, 0.1, 0.3)),
            ));
        });
}

pub fn toggle_stats_panel(input: Res<FrameInput>, mut panel: ResMut<StatsPanelState>) {
    if input.toggle_stats {
        panel.visible = !panel.visible;
    }
}

pub fn count_harvests(mut events: EventReader<CropHarvestedEvent>, mut tally: ResMut<HarvestTally>) {
    for event in events.read() {
        tally.harvested += 1;
        if event.granted {
            tally.granted += 1;
        }
    }
}

/// Build the panel lines from the current state.
pub fn stats_lines(
    grid: &WorldGrid,
    rig: &CameraRig,
    player_pos: Option<Vec2>,
    clock: &DayClock,
    inventory: &Inventory,
    tally: &HarvestTally,
) -> Vec<String> {
    let mut lines = vec![
        format!("Camera Target: ({:.2}, {:.2})", rig.target.x, rig.target.y),
        format!("Camera Zoom: {:.2}", rig.zoom()),
    ];
    if let Some(pos) = player_pos {
        let (gx, gy) = world_to_grid(pos);
        let under = grid.get(gx, gy).map_or("-", |t| t.kind.label());
        lines.push(format!("Player Tile: ({}, {}) {}", gx, gy, under));
    }
    lines.push(format!(
        "Time: {:.2}h {}",
        clock.day_time,
        if clock.is_night() { "(night)" } else { "(day)" }
    ));
    let selected = inventory.selected_item();
    lines.push(format!(
        "Selected: {}",
        if selected == ItemKind::None { "-" } else { selected.name() }
    ));
    lines.push(format!("Harvested: {} ({} kept)", tally.harvested, tally.granted));
    lines
}

/// Update stats panel content and visibility.
pub fn update_stats_panel(
    panel: Res<StatsPanelState>,
    grid: Res<WorldGrid>,
    rig: Res<CameraRig>,
    clock: Res<DayClock>,
    inventory: Res<Inventory>,
    tally: Res<HarvestTally>,
    mut root_query: Query<&mut Visibility, With<StatsPanelRoot>>,
    mut text_query: Query<&mut Text, With<StatsPanelText>>,
    player_query: Query<&Transform, With<Player>>,
) {
    let Ok(mut vis) = root_query.get_single_mut() else { return };

    if !panel.visible {
        *vis = Visibility::Hidden;
        return;
    }
    *vis = Visibility::Inherited;

    let Ok(mut text) = text_query.get_single_mut() else { return };
    let player_pos = player_query.get_single().ok().map(|t| t.translation.truncate());

    **text = stats_lines(&grid, &rig, player_pos, &clock, &inventory, &tally).join("\n");
}

/// F4: log the whole session as one JSON line.
pub fn dump_snapshot(
    input: Res<FrameInput>,
    grid: Res<WorldGrid>,
    inventory: Res<Inventory>,
    clock: Res<DayClock>,
    rig: Res<CameraRig>,
    player_query: Query<(&Transform, &PlayerMotion), With<Player>>,
) {
    if !input.dump_snapshot {
        return;
    }
    let (pos, vel) = match player_query.get_single() {
        Ok((transform, motion)) => (transform.translation.truncate(), motion.velocity),
        Err(_) => (Vec2::ZERO, Vec2::ZERO),
    };
    let snapshot = FarmSnapshot::capture(&grid, pos, vel, &inventory, &clock, &rig);
    match serde_json::to_string(&snapshot) {
        Ok(json) => info!("[Debug] Snapshot: {}", json),
        Err(e) => warn!("[Debug] Failed to serialize snapshot: {}", e),
    }
}

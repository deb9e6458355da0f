use bevy::prelude::*;
use crate::shared::*;

/// The grid cell under a world-space cursor, if it lies on the farm.
pub fn cursor_cell(cursor: Vec2, grid: &WorldGrid) -> Option<(i32, i32)> {
    let (x, y) = world_to_grid(cursor);
    grid.in_bounds(x, y).then_some((x, y))
}

/// Turn clicks into farming events: left click uses the selected item,
/// right click tries to harvest. Clicks off the grid are dropped.
pub fn tool_intent(
    input: Res<FrameInput>,
    grid: Res<WorldGrid>,
    inventory: Res<Inventory>,
    mut tool_events: EventWriter<ToolUseEvent>,
    mut harvest_events: EventWriter<HarvestAttemptEvent>,
) {
    if !input.tool_use && !input.harvest {
        return;
    }
    let Some(cursor) = input.cursor_world else {
        return;
    };
    let Some((grid_x, grid_y)) = cursor_cell(cursor, &grid) else {
        return;
    };

    if input.tool_use {
        tool_events.send(ToolUseEvent {
            item: inventory.selected_item(),
            grid_x,
            grid_y,
        });
    }
    if input.harvest {
        harvest_events.send(HarvestAttemptEvent { grid_x, grid_y });
    }
}

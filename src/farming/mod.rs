//! Farming domain: the tile state machine.
//!
//! Dirt/Grass → TilledSoil → WateredSoil → SeedPlanted → CropGrowing →
//! CropReady → (harvest) → Dirt. The transitions are plain functions over
//! `Tile` and `Inventory` so they can be driven from systems and tests alike.
//!
//! Communicates with other domains exclusively through crate::shared events/resources.

use bevy::prelude::*;
use crate::shared::*;

pub mod soil;
pub mod crops;
pub mod harvest;

pub use crops::{advance_growth, plant_seed};
pub use harvest::harvest;
pub use soil::{till, water};

pub struct FarmingPlugin;

impl Plugin for FarmingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                handle_tool_use,
                harvest::handle_harvest_attempt,
                crops::tick_crop_growth,
            )
                .chain()
                .after(crate::player::tools::tool_intent)
                .run_if(in_state(GameState::Playing)),
        );
    }
}

/// Apply `item` to `tile`. Returns true if the tile changed.
///
/// Hoe tills, the watering can waters, seeds are planted from the selected
/// slot. Wheat and empty hands do nothing.
pub fn use_item_on_tile(item: ItemKind, tile: &mut Tile, inventory: &mut Inventory) -> bool {
    match item {
        ItemKind::Hoe => till(tile),
        ItemKind::WateringCan => water(tile),
        ItemKind::Seed => plant_seed(tile, inventory),
        ItemKind::Wheat | ItemKind::None => false,
    }
}

/// Resolve left-click tool events against the grid.
pub fn handle_tool_use(
    mut tool_events: EventReader<ToolUseEvent>,
    mut grid: ResMut<WorldGrid>,
    mut inventory: ResMut<Inventory>,
) {
    for event in tool_events.read() {
        let Some(tile) = grid.get_mut(event.grid_x, event.grid_y) else {
            continue;
        };
        let before = tile.kind;
        if use_item_on_tile(event.item, tile, &mut inventory) {
            debug!(
                "[Farming] {} on ({}, {}): {:?} -> {:?}",
                event.item.name(),
                event.grid_x,
                event.grid_y,
                before,
                tile.kind
            );
        }
    }
}

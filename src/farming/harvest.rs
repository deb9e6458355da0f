//! Harvest: picking ripe wheat.

use bevy::prelude::*;
use crate::shared::*;

/// Harvest a ripe crop.
///
/// Returns `None` if the tile is not ripe. Otherwise the tile goes back to
/// bare dirt and the result says whether a wheat slot received the crop.
/// Harvesting never creates a wheat slot; without one the crop is lost.
pub fn harvest(tile: &mut Tile, inventory: &mut Inventory) -> Option<bool> {
    if tile.kind != TileKind::CropReady {
        return None;
    }
    tile.kind = TileKind::Dirt;
    tile.growth_time = 0.0;
    Some(inventory.add_to_existing(ItemKind::Wheat))
}

pub fn handle_harvest_attempt(
    mut harvest_events: EventReader<HarvestAttemptEvent>,
    mut grid: ResMut<WorldGrid>,
    mut inventory: ResMut<Inventory>,
    mut harvested_events: EventWriter<CropHarvestedEvent>,
) {
    for event in harvest_events.read() {
        let Some(tile) = grid.get_mut(event.grid_x, event.grid_y) else {
            continue;
        };
        let Some(granted) = harvest(tile, &mut inventory) else {
            continue;
        };

        if granted {
            info!(
                "[Farming] Harvested wheat at ({}, {}), now holding {}",
                event.grid_x,
                event.grid_y,
                inventory.count(ItemKind::Wheat)
            );
        } else {
            warn!(
                "[Farming] Harvested ({}, {}) but there is no wheat slot to keep it",
                event.grid_x, event.grid_y
            );
        }

        harvested_events.send(CropHarvestedEvent {
            x: event.grid_x,
            y: event.grid_y,
            granted,
        });
    }
}

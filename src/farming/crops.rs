//! Planting and crop growth.

use bevy::prelude::*;
use crate::shared::*;

/// Plant one seed from the selected slot into watered soil.
///
/// Nothing is consumed unless the tile is watered and the selected slot
/// holds at least one seed.
pub fn plant_seed(tile: &mut Tile, inventory: &mut Inventory) -> bool {
    if tile.kind != TileKind::WateredSoil {
        return false;
    }
    if inventory.selected_item() != ItemKind::Seed || !inventory.consume_selected() {
        return false;
    }
    tile.kind = TileKind::SeedPlanted;
    tile.growth_time = 0.0;
    true
}

/// Advance every planted tile by `growth_rate * dt`.
///
/// Seeds sprout at `SEED_SPROUT_TIME` and ripen at `CROP_READY_TIME`; both
/// thresholds are checked in the same tick so a long frame can skip straight
/// to ripe. Ripe crops stop accumulating. Returns the cells whose kind
/// changed.
pub fn advance_growth(grid: &mut WorldGrid, dt: f32, growth_rate: f32) -> Vec<(i32, i32)> {
    let step = growth_rate * dt;
    if step <= 0.0 {
        return Vec::new();
    }

    let mut changed = Vec::new();
    for tile in grid.tiles_mut() {
        if !tile.kind.is_growing() {
            continue;
        }
        tile.growth_time += step;

        let before = tile.kind;
        if tile.kind == TileKind::SeedPlanted && tile.growth_time >= SEED_SPROUT_TIME {
            tile.kind = TileKind::CropGrowing;
        }
        if tile.kind == TileKind::CropGrowing && tile.growth_time >= CROP_READY_TIME {
            tile.kind = TileKind::CropReady;
        }
        if tile.kind != before {
            changed.push((tile.x, tile.y));
        }
    }
    changed
}

pub fn tick_crop_growth(
    time: Res<Time>,
    config: Res<FarmConfig>,
    mut grid: ResMut<WorldGrid>,
) {
    // Skip the mutable borrow on frames where nothing is planted so change
    // detection on the grid stays quiet.
    if !grid.tiles().iter().any(|t| t.kind.is_growing()) {
        return;
    }
    for (x, y) in advance_growth(&mut grid, time.delta_secs(), config.growth_rate) {
        if let Some(tile) = grid.get(x, y) {
            debug!("[Farming] Crop at ({}, {}) is now {:?}", x, y, tile.kind);
        }
    }
}

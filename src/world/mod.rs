//! World domain plugin.
//!
//! Responsible for:
//! - Generating the farm grid (dirt with scattered grass and pebbles)
//! - Loading the tile atlas and drawing one sprite per grid cell
//! - Keeping tile sprites in sync with the tile state machine
//! - The day/night lighting overlay (see `lighting`)

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::shared::*;

pub mod lighting;

/// Packed 16×16 tileset: 12 columns × 11 rows.
pub const TILESET_PATH: &str = "tilemap_packed.png";
pub const ATLAS_COLUMNS: u32 = 12;
pub const ATLAS_ROWS: u32 = 11;

/// Atlas cell of the player character.
pub const PLAYER_SPRITE_CELL: UVec2 = UVec2::new(6, 7);

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TileAtlas>()
            .add_systems(
                Startup,
                (
                    (load_tile_atlas, generate_world),
                    spawn_tile_sprites,
                    lighting::spawn_day_night_overlay,
                )
                    .chain(),
            )
            .add_systems(Update, lighting::update_day_night_tint)
            .add_systems(
                PostUpdate,
                (sync_tile_sprites, lighting::paint_day_night_overlay),
            );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// RESOURCES & COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

/// Handles for the shared tileset. When the image is not shipped the world
/// falls back to flat placeholder colours.
#[derive(Resource, Default)]
pub struct TileAtlas {
    pub available: bool,
    pub image: Handle<Image>,
    pub layout: Handle<TextureAtlasLayout>,
}

/// Marker on every tile sprite, pointing back at its grid cell.
#[derive(Component, Debug, Clone, Copy)]
pub struct TileSprite {
    pub x: i32,
    pub y: i32,
}

// ═══════════════════════════════════════════════════════════════════════
// SPRITE TABLE
// ═══════════════════════════════════════════════════════════════════════

/// How one tile kind is drawn: an atlas cell plus a placeholder colour.
#[derive(Debug, Clone, Copy)]
pub struct TileLook {
    pub cell: UVec2,
    pub color: (f32, f32, f32),
}

/// Indexed by `TileKind::index()`, in `TileKind::ALL` order.
pub const TILE_LOOKS: [TileLook; 9] = [
    // Dirt
    TileLook { cell: UVec2::new(1, 0), color: (0.60, 0.45, 0.30) },
    // Grass
    TileLook { cell: UVec2::new(0, 0), color: (0.30, 0.72, 0.32) },
    // Pebble1
    TileLook { cell: UVec2::new(2, 0), color: (0.55, 0.52, 0.48) },
    // Pebble2
    TileLook { cell: UVec2::new(3, 0), color: (0.48, 0.46, 0.44) },
    // TilledSoil
    TileLook { cell: UVec2::new(0, 2), color: (0.45, 0.32, 0.20) },
    // WateredSoil
    TileLook { cell: UVec2::new(1, 2), color: (0.30, 0.22, 0.15) },
    // SeedPlanted
    TileLook { cell: UVec2::new(2, 2), color: (0.42, 0.40, 0.18) },
    // CropGrowing
    TileLook { cell: UVec2::new(3, 2), color: (0.35, 0.62, 0.22) },
    // CropReady
    TileLook { cell: UVec2::new(4, 2), color: (0.88, 0.74, 0.25) },
];

pub fn tile_look(kind: TileKind) -> TileLook {
    TILE_LOOKS[kind.index()]
}

/// Linear atlas index of a (column, row) cell.
pub fn atlas_index(cell: UVec2) -> usize {
    (cell.y * ATLAS_COLUMNS + cell.x) as usize
}

/// Build the sprite for an atlas cell, or a flat square when the atlas is missing.
pub fn atlas_sprite(atlas: &TileAtlas, cell: UVec2, fallback: (f32, f32, f32)) -> Sprite {
    if atlas.available {
        let mut sprite = Sprite::from_atlas_image(
            atlas.image.clone(),
            TextureAtlas {
                layout: atlas.layout.clone(),
                index: atlas_index(cell),
            },
        );
        sprite.custom_size = Some(Vec2::splat(TILE_SIZE));
        sprite
    } else {
        Sprite {
            color: Color::srgb(fallback.0, fallback.1, fallback.2),
            custom_size: Some(Vec2::splat(TILE_SIZE)),
            ..default()
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// GENERATION
// ═══════════════════════════════════════════════════════════════════════

/// Fill a dirt grid, turning roughly `decoration_chance` of the cells into
/// grass or one of the two pebble variants.
pub fn generate_grid(
    width: i32,
    height: i32,
    decoration_chance: f64,
    rng: &mut impl Rng,
) -> WorldGrid {
    let mut grid = WorldGrid::new(width, height);
    let chance = decoration_chance.clamp(0.0, 1.0);
    for tile in grid.tiles_mut() {
        if !rng.gen_bool(chance) {
            continue;
        }
        tile.kind = match rng.gen_range(0..4) {
            0 => TileKind::Pebble1,
            1 => TileKind::Pebble2,
            _ => TileKind::Grass,
        };
    }
    grid
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

fn load_tile_atlas(
    asset_server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
    mut atlas: ResMut<TileAtlas>,
) {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let on_disk = std::path::Path::new("assets").join(TILESET_PATH);
        if !on_disk.exists() {
            warn!(
                "[World] {} not found, drawing placeholder colours",
                on_disk.display()
            );
            return;
        }
    }

    atlas.image = asset_server.load(TILESET_PATH);
    atlas.layout = layouts.add(TextureAtlasLayout::from_grid(
        UVec2::splat(TILE_SIZE as u32),
        ATLAS_COLUMNS,
        ATLAS_ROWS,
        None,
        None,
    ));
    atlas.available = true;
}

fn generate_world(config: Res<FarmConfig>, mut grid: ResMut<WorldGrid>) {
    let seed = config.world_seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = StdRng::seed_from_u64(seed);
    *grid = generate_grid(
        config.world_width,
        config.world_height,
        config.decoration_chance,
        &mut rng,
    );
    info!(
        "[World] Generated {}x{} farm (seed {}): {} grass, {} pebbles",
        grid.width(),
        grid.height(),
        seed,
        grid.count(TileKind::Grass),
        grid.count(TileKind::Pebble1) + grid.count(TileKind::Pebble2)
    );
}

fn spawn_tile_sprites(mut commands: Commands, grid: Res<WorldGrid>, atlas: Res<TileAtlas>) {
    for tile in grid.tiles() {
        let look = tile_look(tile.kind);
        commands.spawn((
            atlas_sprite(&atlas, look.cell, look.color),
            Transform::from_translation(grid_to_world(tile.x, tile.y).extend(0.0)),
            TileSprite { x: tile.x, y: tile.y },
        ));
    }
}

/// Re-skin tile sprites after the grid changed. Cheap enough to walk every
/// tile: the farm is a few hundred cells.
fn sync_tile_sprites(
    grid: Res<WorldGrid>,
    atlas: Res<TileAtlas>,
    mut query: Query<(&TileSprite, &mut Sprite)>,
) {
    if !grid.is_changed() {
        return;
    }
    for (marker, mut sprite) in &mut query {
        let Some(tile) = grid.get(marker.x, marker.y) else {
            continue;
        };
        let look = tile_look(tile.kind);
        if atlas.available {
            if let Some(ref mut texture_atlas) = sprite.texture_atlas {
                texture_atlas.index = atlas_index(look.cell);
            }
        } else {
            sprite.color = Color::srgb(look.color.0, look.color.1, look.color.2);
        }
    }
}

//! Shared components, resources, events, and states for the farm.
//!
//! This is the type contract. Every domain plugin imports from here.
//! Domains talk to each other through these types and events.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE: top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Playing,
    Paused,
}

// ═══════════════════════════════════════════════════════════════════════
// WORLD GRID
// ═══════════════════════════════════════════════════════════════════════

/// Every state a grid cell can be in. Grass and the pebbles are static
/// decoration; the rest form the farming chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TileKind {
    #[default]
    Dirt,
    Grass,
    Pebble1,
    Pebble2,
    TilledSoil,
    WateredSoil,
    SeedPlanted,
    CropGrowing,
    CropReady,
}

impl TileKind {
    pub const ALL: [TileKind; 9] = [
        TileKind::Dirt,
        TileKind::Grass,
        TileKind::Pebble1,
        TileKind::Pebble2,
        TileKind::TilledSoil,
        TileKind::WateredSoil,
        TileKind::SeedPlanted,
        TileKind::CropGrowing,
        TileKind::CropReady,
    ];

    /// Position of this kind in `ALL`; used to index lookup tables.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_decoration(self) -> bool {
        matches!(self, TileKind::Grass | TileKind::Pebble1 | TileKind::Pebble2)
    }

    /// Kinds whose growth timer runs every tick.
    pub fn is_growing(self) -> bool {
        matches!(self, TileKind::SeedPlanted | TileKind::CropGrowing)
    }

    pub fn label(self) -> &'static str {
        match self {
            TileKind::Dirt => "Dirt",
            TileKind::Grass => "Grass",
            TileKind::Pebble1 | TileKind::Pebble2 => "Pebbles",
            TileKind::TilledSoil => "Tilled soil",
            TileKind::WateredSoil => "Watered soil",
            TileKind::SeedPlanted => "Seeds",
            TileKind::CropGrowing => "Sprouts",
            TileKind::CropReady => "Wheat (ripe)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
    pub kind: TileKind,
    /// Accumulated growth, 0.0 = just planted, 1.0 = ripe.
    pub growth_time: f32,
}

impl Tile {
    pub fn new(x: i32, y: i32, kind: TileKind) -> Self {
        Self {
            x,
            y,
            kind,
            growth_time: 0.0,
        }
    }
}

/// The farm itself: a fixed rectangle of tiles stored row-major.
/// All access goes through the bounds-checked accessors.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldGrid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl WorldGrid {
    /// A grid of plain dirt. Negative sizes collapse to an empty grid.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let mut tiles = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                tiles.push(Tile::new(x, y, TileKind::Dirt));
            }
        }
        Self { width, height, tiles }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some((y * self.width + x) as usize)
        } else {
            None
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Tile> {
        self.index_of(x, y).and_then(|i| self.tiles.get(i))
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        let i = self.index_of(x, y)?;
        self.tiles.get_mut(i)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tiles_mut(&mut self) -> std::slice::IterMut<'_, Tile> {
        self.tiles.iter_mut()
    }

    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|t| t.kind == kind).count()
    }

    /// Size of the whole grid in world pixels.
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(self.width as f32 * TILE_SIZE, self.height as f32 * TILE_SIZE)
    }
}

/// Convert a world-space position to the grid cell containing it.
pub fn world_to_grid(pos: Vec2) -> (i32, i32) {
    (
        (pos.x / TILE_SIZE).floor() as i32,
        (pos.y / TILE_SIZE).floor() as i32,
    )
}

/// World-space centre of a grid cell.
pub fn grid_to_world(x: i32, y: i32) -> Vec2 {
    Vec2::new(
        (x as f32 + 0.5) * TILE_SIZE,
        (y as f32 + 0.5) * TILE_SIZE,
    )
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

#[derive(Component, Debug, Clone, Default)]
pub struct Player;

/// Smoothed movement state. Position lives in the entity's `Transform`.
#[derive(Component, Debug, Clone)]
pub struct PlayerMotion {
    pub velocity: Vec2,
    pub speed: f32,
    pub acceleration: f32,
    pub deceleration: f32,
    pub facing: Facing,
}

impl Default for PlayerMotion {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            speed: PLAYER_SPEED,
            acceleration: PLAYER_ACCELERATION,
            deceleration: PLAYER_DECELERATION,
            facing: Facing::Down,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INVENTORY
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ItemKind {
    #[default]
    None,
    Hoe,
    WateringCan,
    Seed,
    Wheat,
}

impl ItemKind {
    pub fn name(self) -> &'static str {
        match self {
            ItemKind::None => "",
            ItemKind::Hoe => "Hoe",
            ItemKind::WateringCan => "Watering Can",
            ItemKind::Seed => "Seeds",
            ItemKind::Wheat => "Wheat",
        }
    }

    /// Tools are never consumed and show no count.
    pub fn is_tool(self) -> bool {
        matches!(self, ItemKind::Hoe | ItemKind::WateringCan)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InventorySlot {
    pub item: ItemKind,
    pub count: u32,
}

impl InventorySlot {
    pub const EMPTY: InventorySlot = InventorySlot {
        item: ItemKind::None,
        count: 0,
    };

    /// Builds a slot; an empty item kind always carries a zero count.
    pub fn new(item: ItemKind, count: u32) -> Self {
        if item == ItemKind::None {
            Self::EMPTY
        } else {
            Self { item, count }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.item == ItemKind::None
    }
}

/// Fixed slot array; `0..HOTBAR_SLOTS` is the hotbar, the rest is backpack.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    slots: [InventorySlot; INVENTORY_SLOTS],
    selected: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            slots: [InventorySlot::EMPTY; INVENTORY_SLOTS],
            selected: 0,
        }
    }
}

impl Inventory {
    /// The starting kit: both tools, a bag of seeds and an empty wheat slot.
    pub fn with_loadout(seeds: u32) -> Self {
        let mut inventory = Self::default();
        inventory.set_slot(0, InventorySlot::new(ItemKind::Hoe, 1));
        inventory.set_slot(1, InventorySlot::new(ItemKind::WateringCan, 1));
        inventory.set_slot(2, InventorySlot::new(ItemKind::Seed, seeds));
        inventory.set_slot(3, InventorySlot::new(ItemKind::Wheat, 0));
        inventory
    }

    pub fn slots(&self) -> &[InventorySlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&InventorySlot> {
        self.slots.get(index)
    }

    /// Overwrite a slot. Returns false if the index is out of range.
    pub fn set_slot(&mut self, index: usize, slot: InventorySlot) -> bool {
        match self.slots.get_mut(index) {
            Some(s) => {
                *s = InventorySlot::new(slot.item, slot.count);
                true
            }
            None => false,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_slot(&self) -> &InventorySlot {
        &self.slots[self.selected]
    }

    pub fn selected_item(&self) -> ItemKind {
        self.selected_slot().item
    }

    /// Select a hotbar slot directly. Indices past the hotbar are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index < HOTBAR_SLOTS {
            self.selected = index;
            true
        } else {
            false
        }
    }

    /// Move the selection by `steps`, wrapping around the hotbar.
    pub fn scroll(&mut self, steps: i32) {
        let hotbar = HOTBAR_SLOTS as i32;
        let offset = steps.rem_euclid(hotbar);
        self.selected = ((self.selected as i32 + offset) % hotbar) as usize;
    }

    /// Take one unit from the selected slot. Fails on an empty stack.
    pub fn consume_selected(&mut self) -> bool {
        let slot = &mut self.slots[self.selected];
        if slot.is_empty() || slot.count == 0 {
            return false;
        }
        slot.count -= 1;
        true
    }

    /// Add one unit to the first slot already holding `item`.
    /// Never creates a new slot; returns false when none exists.
    pub fn add_to_existing(&mut self, item: ItemKind) -> bool {
        if item == ItemKind::None {
            return false;
        }
        match self.slots.iter_mut().find(|s| s.item == item) {
            Some(slot) => {
                slot.count = slot.count.saturating_add(1);
                true
            }
            None => false,
        }
    }

    pub fn count(&self, item: ItemKind) -> u32 {
        self.slots
            .iter()
            .filter(|s| s.item == item)
            .map(|s| s.count)
            .sum()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// DAY / NIGHT
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct DayClock {
    /// Hour of day in [0, 24).
    pub day_time: f32,
    /// In-game hours per real second.
    pub time_speed: f32,
    /// Days started since the session began, starting at 1.
    pub day: u32,
}

impl Default for DayClock {
    fn default() -> Self {
        Self::new(DEFAULT_START_HOUR, DEFAULT_TIME_SPEED)
    }
}

impl DayClock {
    pub fn new(start_hour: f32, time_speed: f32) -> Self {
        Self {
            day_time: start_hour.rem_euclid(HOURS_PER_DAY),
            time_speed: time_speed.max(0.0),
            day: 1,
        }
    }

    /// Advance by `dt` real seconds. Returns how many midnights were crossed.
    pub fn advance(&mut self, dt: f32) -> u32 {
        let advanced = self.day_time + self.time_speed.max(0.0) * dt.max(0.0);
        let wraps = (advanced / HOURS_PER_DAY).floor() as u32;
        self.day_time = advanced.rem_euclid(HOURS_PER_DAY);
        if self.day_time >= HOURS_PER_DAY {
            self.day_time = 0.0;
        }
        self.day = self.day.saturating_add(wraps);
        wraps
    }

    pub fn is_night(&self) -> bool {
        is_night_hour(self.day_time)
    }

    pub fn hour(&self) -> u32 {
        self.day_time.floor() as u32
    }

    pub fn minute(&self) -> u32 {
        ((self.day_time.fract() * 60.0).floor() as u32).min(59)
    }
}

pub fn is_night_hour(hour: f32) -> bool {
    hour > NIGHT_START_HOUR || hour < NIGHT_END_HOUR
}

/// Current ambient light, recomputed from the clock every frame.
#[derive(Resource, Debug, Clone)]
pub struct DayNightTint {
    pub tint: (f32, f32, f32),
    pub alpha: f32,
    pub night: bool,
}

impl Default for DayNightTint {
    fn default() -> Self {
        Self {
            tint: DAY_TINT.0,
            alpha: DAY_TINT.1,
            night: false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CAMERA
// ═══════════════════════════════════════════════════════════════════════

/// Where the camera looks and how far it is zoomed in. Written onto the
/// `Camera2d` transform after gameplay systems run.
#[derive(Resource, Debug, Clone)]
pub struct CameraRig {
    pub target: Vec2,
    zoom: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            target: Vec2::ZERO,
            zoom: ZOOM_MIN,
        }
    }
}

impl CameraRig {
    pub fn new(target: Vec2, zoom: f32) -> Self {
        Self {
            target,
            zoom: zoom.clamp(ZOOM_MIN, ZOOM_MAX),
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INPUT: the one place hardware state becomes game intent
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, Default)]
pub struct FrameInput {
    /// Normalized sum of the four movement keys.
    pub move_axis: Vec2,
    /// Mouse wheel lines scrolled this frame (positive = up).
    pub wheel: f32,
    /// Ctrl held: the wheel zooms instead of scrolling the hotbar.
    pub zoom_modifier: bool,
    /// Cursor position mapped through the camera into world space.
    pub cursor_world: Option<Vec2>,
    pub tool_use: bool,
    pub harvest: bool,
    pub hotbar_slot: Option<usize>,
    pub pause: bool,
    pub toggle_stats: bool,
    pub dump_snapshot: bool,
}

// ═══════════════════════════════════════════════════════════════════════
// CONFIGURATION
// ═══════════════════════════════════════════════════════════════════════

/// Tunables read from `assets/config/farm.ron` at startup.
/// Missing fields fall back to the defaults below.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FarmConfig {
    pub world_width: i32,
    pub world_height: i32,
    pub player_speed: f32,
    pub camera_follow_rate: f32,
    pub start_hour: f32,
    pub time_speed: f32,
    /// Growth units per real second; a crop ripens at 1.0.
    pub growth_rate: f32,
    pub starting_seeds: u32,
    /// Chance that a generated tile is grass or pebbles instead of dirt.
    pub decoration_chance: f64,
    pub world_seed: Option<u64>,
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            player_speed: PLAYER_SPEED,
            camera_follow_rate: CAMERA_FOLLOW_RATE,
            start_hour: DEFAULT_START_HOUR,
            time_speed: DEFAULT_TIME_SPEED,
            growth_rate: DEFAULT_GROWTH_RATE,
            starting_seeds: DEFAULT_STARTING_SEEDS,
            decoration_chance: 0.3,
            world_seed: None,
        }
    }
}

impl FarmConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.world_width <= 0 || self.world_height <= 0 {
            return Err(format!(
                "world size must be positive, got {}x{}",
                self.world_width, self.world_height
            ));
        }
        if self.world_width > MAX_WORLD_SIDE || self.world_height > MAX_WORLD_SIDE {
            return Err(format!(
                "world size must be at most {}x{}, got {}x{}",
                MAX_WORLD_SIDE, MAX_WORLD_SIDE, self.world_width, self.world_height
            ));
        }
        if !(self.player_speed > 0.0) {
            return Err(format!("player_speed must be positive, got {}", self.player_speed));
        }
        if !(self.camera_follow_rate > 0.0) {
            return Err(format!(
                "camera_follow_rate must be positive, got {}",
                self.camera_follow_rate
            ));
        }
        if !(0.0..HOURS_PER_DAY).contains(&self.start_hour) {
            return Err(format!("start_hour must be in [0, 24), got {}", self.start_hour));
        }
        if !(self.time_speed >= 0.0) {
            return Err(format!("time_speed must not be negative, got {}", self.time_speed));
        }
        if !(self.growth_rate > 0.0) {
            return Err(format!("growth_rate must be positive, got {}", self.growth_rate));
        }
        if !(0.0..=1.0).contains(&self.decoration_chance) {
            return Err(format!(
                "decoration_chance must be in [0, 1], got {}",
                self.decoration_chance
            ));
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS: cross-domain communication
// ═══════════════════════════════════════════════════════════════════════

/// Left click on a grid cell with the selected item.
#[derive(Event, Debug, Clone)]
pub struct ToolUseEvent {
    pub item: ItemKind,
    pub grid_x: i32,
    pub grid_y: i32,
}

/// Right click on a grid cell.
#[derive(Event, Debug, Clone)]
pub struct HarvestAttemptEvent {
    pub grid_x: i32,
    pub grid_y: i32,
}

#[derive(Event, Debug, Clone)]
pub struct CropHarvestedEvent {
    pub x: i32,
    pub y: i32,
    /// False when there was no wheat slot to receive the crop.
    pub granted: bool,
}

#[derive(Event, Debug, Clone)]
pub struct NewDayEvent {
    pub day: u32,
}

// ═══════════════════════════════════════════════════════════════════════
// SNAPSHOT: read-only view of the session for drawing and debugging
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct FarmSnapshot {
    pub grid: WorldGrid,
    pub player_position: (f32, f32),
    pub player_velocity: (f32, f32),
    pub inventory: Inventory,
    pub clock: DayClock,
    pub night: bool,
    pub camera_target: (f32, f32),
    pub camera_zoom: f32,
}

impl FarmSnapshot {
    pub fn capture(
        grid: &WorldGrid,
        player_position: Vec2,
        player_velocity: Vec2,
        inventory: &Inventory,
        clock: &DayClock,
        camera: &CameraRig,
    ) -> Self {
        Self {
            grid: grid.clone(),
            player_position: (player_position.x, player_position.y),
            player_velocity: (player_velocity.x, player_velocity.y),
            inventory: inventory.clone(),
            clock: clock.clone(),
            night: clock.is_night(),
            camera_target: (camera.target.x, camera.target.y),
            camera_zoom: camera.zoom(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const TILE_SIZE: f32 = 16.0;
pub const SCREEN_WIDTH: f32 = 800.0;
pub const SCREEN_HEIGHT: f32 = 600.0;

pub const WORLD_WIDTH: i32 = 20;
pub const WORLD_HEIGHT: i32 = 20;
/// Largest accepted side of a configured world, in tiles.
pub const MAX_WORLD_SIDE: i32 = 1024;

pub const INVENTORY_SLOTS: usize = 10;
pub const HOTBAR_SLOTS: usize = 5;
pub const DEFAULT_STARTING_SEEDS: u32 = 5;

pub const PLAYER_SPEED: f32 = 80.0;
pub const PLAYER_ACCELERATION: f32 = 10.0;
pub const PLAYER_DECELERATION: f32 = 15.0;

pub const CAMERA_FOLLOW_RATE: f32 = 5.0;
pub const ZOOM_MIN: f32 = 3.0;
pub const ZOOM_MAX: f32 = 8.0;
pub const ZOOM_STEP: f32 = 0.125;

pub const SEED_SPROUT_TIME: f32 = 0.5;
pub const CROP_READY_TIME: f32 = 1.0;
pub const DEFAULT_GROWTH_RATE: f32 = 0.1;

pub const HOURS_PER_DAY: f32 = 24.0;
pub const DEFAULT_START_HOUR: f32 = 8.0;
pub const DEFAULT_TIME_SPEED: f32 = 0.2;
pub const NIGHT_START_HOUR: f32 = 20.0;
pub const NIGHT_END_HOUR: f32 = 6.0;
pub const DAWN_WINDOW: (f32, f32) = (4.0, 6.0);
pub const DUSK_WINDOW: (f32, f32) = (17.0, 19.0);

/// (rgb, overlay alpha) for full daylight and deep night.
pub const DAY_TINT: ((f32, f32, f32), f32) = ((1.0, 0.96, 0.86), 0.04);
pub const NIGHT_TINT: ((f32, f32, f32), f32) = ((0.08, 0.10, 0.32), 0.45);

//! Data layer: loads the farm configuration and seeds the session.
//!
//! Runs in PreStartup so every other domain's Startup systems can read a
//! final `FarmConfig`, a stocked `Inventory` and a `DayClock` set to the
//! configured hour. A missing or broken config file never stops the game;
//! it falls back to the built-in defaults.

use bevy::prelude::*;
#[cfg(not(target_arch = "wasm32"))]
use std::fs;
#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

use crate::shared::*;

pub const CONFIG_PATH: &str = "assets/config/farm.ron";

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, (load_farm_config, seed_session).chain());
    }
}

/// Parse and validate a RON config document.
pub fn parse_config(text: &str) -> Result<FarmConfig, String> {
    let config: FarmConfig =
        ron::from_str(text).map_err(|e| format!("RON parse failed: {}", e))?;
    config.validate()?;
    Ok(config)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn read_config(path: &Path) -> Result<FarmConfig, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
    parse_config(&text)
}

#[cfg(not(target_arch = "wasm32"))]
fn load_farm_config(mut config: ResMut<FarmConfig>) {
    let path = Path::new(CONFIG_PATH);
    if !path.exists() {
        info!("[Data] No config at {}, using defaults", CONFIG_PATH);
        return;
    }
    match read_config(path) {
        Ok(loaded) => {
            info!(
                "[Data] Loaded {}: world {}x{}, time speed {:.2} h/s",
                CONFIG_PATH, loaded.world_width, loaded.world_height, loaded.time_speed
            );
            *config = loaded;
        }
        Err(e) => {
            warn!("[Data] Ignoring {}: {}", CONFIG_PATH, e);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn load_farm_config(_config: ResMut<FarmConfig>) {
    info!("[Data] Config files are not read on the web, using defaults");
}

/// Stock the inventory and set the clock from the config.
pub fn seed_session(
    config: Res<FarmConfig>,
    mut inventory: ResMut<Inventory>,
    mut clock: ResMut<DayClock>,
) {
    *inventory = Inventory::with_loadout(config.starting_seeds);
    *clock = DayClock::new(config.start_hour, config.time_speed);
    info!(
        "[Data] Session ready: {} seeds, clock at {:02}:{:02}",
        inventory.count(ItemKind::Seed),
        clock.hour(),
        clock.minute()
    );
}

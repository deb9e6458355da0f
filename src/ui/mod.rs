mod hud;
pub mod input;
mod debug_overlay;

use bevy::prelude::*;
use crate::shared::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<debug_overlay::StatsPanelState>()
            .init_resource::<debug_overlay::HarvestTally>();

        // ─── HUD + STATS PANEL: spawned once, live for the whole session ───
        app.add_systems(
            Startup,
            (hud::spawn_hud, debug_overlay::spawn_stats_panel),
        );

        // ─── HOTBAR INPUT: before the click is turned into a tool event ───
        app.add_systems(
            Update,
            input::hotbar_selection
                .before(crate::player::tools::tool_intent)
                .run_if(in_state(GameState::Playing)),
        );

        // ─── GLOBAL INPUT: Escape must work while paused too ───
        app.add_systems(
            Update,
            (
                input::toggle_pause,
                debug_overlay::toggle_stats_panel,
                debug_overlay::dump_snapshot,
                debug_overlay::count_harvests,
            ),
        );

        // ─── PAUSE BANNER ───
        app.add_systems(OnEnter(GameState::Paused), hud::spawn_pause_banner);
        app.add_systems(OnExit(GameState::Paused), hud::despawn_pause_banner);

        // ─── DATA BINDING: draw from read-only state ───
        app.add_systems(
            PostUpdate,
            (
                hud::update_clock_display,
                hud::update_hotbar,
                debug_overlay::update_stats_panel,
            ),
        );
    }
}

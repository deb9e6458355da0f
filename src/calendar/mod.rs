//! Calendar domain: the heartbeat of the farm.
//!
//! Responsible for:
//! - Advancing the time of day by `time_speed` in-game hours per real second
//! - Wrapping past midnight and counting days (sends NewDayEvent)
//! - Freezing the clock whenever the game leaves the Playing state

use bevy::prelude::*;

use crate::shared::*;

pub struct CalendarPlugin;

impl Plugin for CalendarPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), resume_time)
            .add_systems(OnExit(GameState::Playing), pause_time)
            .add_systems(
                Update,
                (tick_clock, log_new_day)
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

// ─── State transition hooks ───────────────────────────────────────────────────

fn resume_time(clock: Res<DayClock>) {
    info!(
        "[Calendar] Time resumed: Day {} {:02}:{:02}",
        clock.day,
        clock.hour(),
        clock.minute()
    );
}

fn pause_time(clock: Res<DayClock>) {
    info!(
        "[Calendar] Time paused: Day {} {:02}:{:02}",
        clock.day,
        clock.hour(),
        clock.minute()
    );
}

// ─── Main time-tick system ────────────────────────────────────────────────────

/// Moves the clock forward by the frame's delta. At the default 0.2 h/s a
/// full day takes two real minutes.
pub fn tick_clock(
    time: Res<Time>,
    mut clock: ResMut<DayClock>,
    mut new_day_events: EventWriter<NewDayEvent>,
) {
    let wraps = clock.advance(time.delta_secs());
    if wraps > 0 {
        new_day_events.send(NewDayEvent { day: clock.day });
    }
}

fn log_new_day(mut events: EventReader<NewDayEvent>) {
    for event in events.read() {
        info!("[Calendar] Day {} begins", event.day);
    }
}

use bevy::prelude::*;
use crate::shared::*;

/// Add this frame's wheel lines to `pending` and take out whole hotbar
/// steps. The fractional rest carries over, so slow touchpad scrolling still
/// moves the selection. Scrolling down (negative wheel) moves to the next slot.
pub fn take_wheel_steps(pending: &mut f32, wheel: f32) -> i32 {
    *pending += wheel;
    let whole = pending.trunc();
    *pending -= whole;
    // Float-to-int casts saturate; negating i32::MIN must not overflow.
    (whole as i32).saturating_neg()
}

/// Hotbar selection from number keys 1-5 and, when Ctrl is not held, the
/// mouse wheel.
pub fn hotbar_selection(
    input: Res<FrameInput>,
    mut pending: Local<f32>,
    mut inventory: ResMut<Inventory>,
) {
    if let Some(slot) = input.hotbar_slot {
        inventory.select(slot);
        *pending = 0.0;
        return;
    }

    if input.zoom_modifier {
        *pending = 0.0;
        return;
    }
    let steps = take_wheel_steps(&mut pending, input.wheel);
    if steps != 0 {
        inventory.scroll(steps);
    }
}

/// Escape toggles Playing <-> Paused.
pub fn toggle_pause(
    input: Res<FrameInput>,
    current_state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !input.pause {
        return;
    }
    match current_state.get() {
        GameState::Playing => next_state.set(GameState::Paused),
        GameState::Paused => next_state.set(GameState::Playing),
    }
}

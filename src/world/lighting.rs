//! Day/night ambient tint overlay.
//!
//! The light colour is flat Day between dawn and dusk, flat Night outside
//! them, and smoothstepped across the dawn window [4, 6] and the dusk window
//! [17, 19]. It is drawn as a full-screen vertical gradient (strongest at the
//! top) plus a plain darkening layer that only shows while it is night.

use bevy::prelude::*;

use crate::shared::*;

/// Horizontal bands used to fake the gradient.
pub const GRADIENT_BANDS: usize = 12;
/// How much weaker the bottom band is than the top one.
const GRADIENT_FALLOFF: f32 = 0.6;
const NIGHT_SHADE_ALPHA: f32 = 0.25;

// ═══════════════════════════════════════════════════════════════════════
// COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

/// Marker component for the full-screen day/night overlay root.
#[derive(Component, Debug)]
pub struct DayNightOverlay;

/// One horizontal strip of the tint gradient, 0 = top.
#[derive(Component, Debug)]
pub struct TintBand {
    pub index: usize,
}

/// Plain darkening layer shown at night.
#[derive(Component, Debug)]
pub struct NightShade;

// ═══════════════════════════════════════════════════════════════════════
// COLOUR MATH
// ═══════════════════════════════════════════════════════════════════════

/// Hermite smoothstep of `x` between `edge0` and `edge1`, clamped to [0, 1].
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn mix(
    from: ((f32, f32, f32), f32),
    to: ((f32, f32, f32), f32),
    t: f32,
) -> ((f32, f32, f32), f32) {
    (
        (
            lerp_f32(from.0 .0, to.0 .0, t),
            lerp_f32(from.0 .1, to.0 .1, t),
            lerp_f32(from.0 .2, to.0 .2, t),
        ),
        lerp_f32(from.1, to.1, t),
    )
}

/// Light colour and overlay alpha at `hour` (0.0 - 24.0).
pub fn light_tint(hour: f32) -> ((f32, f32, f32), f32) {
    let (dawn_start, dawn_end) = DAWN_WINDOW;
    let (dusk_start, dusk_end) = DUSK_WINDOW;

    if (dawn_start..=dawn_end).contains(&hour) {
        mix(NIGHT_TINT, DAY_TINT, smoothstep(dawn_start, dawn_end, hour))
    } else if (dusk_start..=dusk_end).contains(&hour) {
        mix(DAY_TINT, NIGHT_TINT, smoothstep(dusk_start, dusk_end, hour))
    } else if hour > dawn_end && hour < dusk_start {
        DAY_TINT
    } else {
        NIGHT_TINT
    }
}

/// Alpha of gradient band `index` out of `bands` for a base alpha.
pub fn band_alpha(alpha: f32, index: usize, bands: usize) -> f32 {
    if bands <= 1 {
        return alpha;
    }
    let depth = index as f32 / (bands - 1) as f32;
    alpha * (1.0 - GRADIENT_FALLOFF * depth)
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

/// Spawn the gradient overlay and the night shade. Runs once at startup.
pub fn spawn_day_night_overlay(mut commands: Commands) {
    commands
        .spawn((
            DayNightOverlay,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            // Very high z-index so it draws over the world but under the HUD
            ZIndex(900),
        ))
        .with_children(|overlay| {
            for index in 0..GRADIENT_BANDS {
                overlay.spawn((
                    TintBand { index },
                    Node {
                        width: Val::Percent(100.0),
                        flex_grow: 1.0,
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.0)),
                ));
            }
        });

    commands.spawn((
        NightShade,
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(0.0),
            top: Val::Px(0.0),
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.03, NIGHT_SHADE_ALPHA)),
        ZIndex(901),
        Visibility::Hidden,
    ));
}

/// Recompute the shared tint from the clock.
pub fn update_day_night_tint(clock: Res<DayClock>, mut day_night_tint: ResMut<DayNightTint>) {
    let (tint, alpha) = light_tint(clock.day_time);
    day_night_tint.tint = tint;
    day_night_tint.alpha = alpha;
    day_night_tint.night = clock.is_night();
}

/// Paint the overlay bands and toggle the night shade.
pub fn paint_day_night_overlay(
    day_night_tint: Res<DayNightTint>,
    mut bands: Query<(&TintBand, &mut BackgroundColor)>,
    mut shade: Query<&mut Visibility, With<NightShade>>,
) {
    if !day_night_tint.is_changed() {
        return;
    }
    let (r, g, b) = day_night_tint.tint;
    for (band, mut bg) in &mut bands {
        let a = band_alpha(day_night_tint.alpha, band.index, GRADIENT_BANDS);
        *bg = BackgroundColor(Color::srgba(r, g, b, a));
    }
    for mut visibility in &mut shade {
        *visibility = if day_night_tint.night {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

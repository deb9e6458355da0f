use bevy::prelude::*;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS: used to query and update HUD elements
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct HudRoot;

#[derive(Component)]
pub struct HudClockText;

#[derive(Component)]
pub struct HotbarSlot {
    pub index: usize,
}

#[derive(Component)]
pub struct HotbarItemText {
    pub index: usize,
}

#[derive(Component)]
pub struct HotbarQuantityText {
    pub index: usize,
}

#[derive(Component)]
pub struct PauseBanner;

const SLOT_BG: Color = Color::srgba(0.15, 0.12, 0.1, 0.85);
const SLOT_BORDER: Color = Color::srgba(0.4, 0.35, 0.3, 0.8);
const SELECTED_BG: Color = Color::srgba(0.3, 0.25, 0.15, 0.95);
const SELECTED_BORDER: Color = Color::srgb(1.0, 0.84, 0.0);

// ═══════════════════════════════════════════════════════════════════════
// LABELS
// ═══════════════════════════════════════════════════════════════════════

/// `Day 3  18:45`
pub fn clock_label(clock: &DayClock) -> String {
    format!("Day {}  {:02}:{:02}", clock.day, clock.hour(), clock.minute())
}

/// Name and quantity text for one hotbar slot. Tools show no count.
fn slot_labels(slot: &InventorySlot) -> (String, String) {
    if slot.is_empty() {
        return (String::new(), String::new());
    }
    let qty = if slot.item.is_tool() {
        String::new()
    } else {
        format!("x{}", slot.count)
    };
    (slot.item.name().to_string(), qty)
}

// ═══════════════════════════════════════════════════════════════════════
// SPAWN HUD
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_hud(mut commands: Commands) {
    // Root container: full screen, above the day/night overlay
    commands
        .spawn((
            HudRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::SpaceBetween,
                ..default()
            },
            ZIndex(1000),
        ))
        .with_children(|parent| {
            // ─── TOP BAR ───
            parent
                .spawn((
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Px(32.0),
                        flex_direction: FlexDirection::Row,
                        justify_content: JustifyContent::FlexEnd,
                        align_items: AlignItems::Center,
                        padding: UiRect::axes(Val::Px(12.0), Val::Px(4.0)),
                        ..default()
                    },
                ))
                .with_children(|top_bar| {
                    top_bar
                        .spawn((
                            Node {
                                padding: UiRect::axes(Val::Px(8.0), Val::Px(3.0)),
                                ..default()
                            },
                            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
                        ))
                        .with_children(|clock| {
                            clock.spawn((
                                HudClockText,
                                Text::new("Day 1  08:00"),
                                TextFont {
                                    font_size: 14.0,
                                    ..default()
                                },
                                TextColor(Color::srgb(1.0, 0.95, 0.8)),
                            ));
                        });
                });

            // ─── HOTBAR ───
            spawn_hotbar(parent);
        });
}

fn spawn_hotbar(parent: &mut ChildBuilder) {
    parent
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Px(56.0),
            flex_direction: FlexDirection::Row,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            column_gap: Val::Px(3.0),
            padding: UiRect::bottom(Val::Px(6.0)),
            ..default()
        })
        .with_children(|hotbar| {
            for i in 0..HOTBAR_SLOTS {
                hotbar
                    .spawn((
                        HotbarSlot { index: i },
                        Node {
                            width: Val::Px(64.0),
                            height: Val::Px(46.0),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            flex_direction: FlexDirection::Column,
                            border: UiRect::all(Val::Px(2.0)),
                            ..default()
                        },
                        BackgroundColor(SLOT_BG),
                        BorderColor(SLOT_BORDER),
                    ))
                    .with_children(|slot| {
                        // Key number
                        slot.spawn((
                            Text::new(format!("{}", i + 1)),
                            TextFont {
                                font_size: 7.0,
                                ..default()
                            },
                            TextColor(Color::srgba(0.5, 0.5, 0.45, 0.7)),
                            Node {
                                align_self: AlignSelf::FlexStart,
                                margin: UiRect::left(Val::Px(2.0)),
                                ..default()
                            },
                        ));
                        slot.spawn((
                            HotbarItemText { index: i },
                            Text::new(""),
                            TextFont {
                                font_size: 10.0,
                                ..default()
                            },
                            TextColor(Color::WHITE),
                        ));
                        slot.spawn((
                            HotbarQuantityText { index: i },
                            Text::new(""),
                            TextFont {
                                font_size: 9.0,
                                ..default()
                            },
                            TextColor(Color::srgb(0.7, 0.7, 0.7)),
                        ));
                    });
            }
        });
}

pub fn spawn_pause_banner(mut commands: Commands) {
    commands
        .spawn((
            PauseBanner,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.4)),
            ZIndex(1100),
        ))
        .with_children(|banner| {
            banner.spawn((
                Text::new("Paused (Esc to resume)"),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

pub fn despawn_pause_banner(mut commands: Commands, query: Query<Entity, With<PauseBanner>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE SYSTEMS: real-time HUD data binding
// ═══════════════════════════════════════════════════════════════════════

pub fn update_clock_display(clock: Res<DayClock>, mut query: Query<&mut Text, With<HudClockText>>) {
    if !clock.is_changed() {
        return;
    }
    for mut text in &mut query {
        **text = clock_label(&clock);
    }
}

pub fn update_hotbar(
    inventory: Res<Inventory>,
    mut slot_query: Query<(&HotbarSlot, &mut BackgroundColor, &mut BorderColor)>,
    mut item_text_query: Query<(&HotbarItemText, &mut Text), Without<HotbarQuantityText>>,
    mut qty_text_query: Query<(&HotbarQuantityText, &mut Text), Without<HotbarItemText>>,
) {
    if !inventory.is_changed() {
        return;
    }

    // Highlight the selected slot
    for (slot, mut bg, mut border) in &mut slot_query {
        if slot.index == inventory.selected() {
            *bg = BackgroundColor(SELECTED_BG);
            *border = BorderColor(SELECTED_BORDER);
        } else {
            *bg = BackgroundColor(SLOT_BG);
            *border = BorderColor(SLOT_BORDER);
        }
    }

    for (item_text, mut text) in &mut item_text_query {
        let Some(slot) = inventory.slot(item_text.index) else { continue };
        **text = slot_labels(slot).0;
    }

    for (qty_text, mut text) in &mut qty_text_query {
        let Some(slot) = inventory.slot(qty_text.index) else { continue };
        **text = slot_labels(slot).1;
    }
}

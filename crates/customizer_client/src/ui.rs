//! UI presentation: меню, кнопки, meters, color picker
//!
//! Widgets создаются из `HostEffect` (MenuCreated / ButtonCreated / MeterCreated),
//! клики уходят обратно в ядро как `ButtonClicked` / `PaintEdit`.
//!
//! Координаты кнопок и meters заданы на reference canvas 1920×1080 с началом
//! в центре (y вверх) и переводятся в проценты экрана.

use std::collections::HashMap;

use bevy::prelude::*;
use bevy::ui::RelativeCursorPosition;
use customizer_core::menu::MenuArea;
use customizer_core::paint::sv_from_pointer;
use customizer_core::settings::meter_position;
use customizer_core::{
    ButtonClicked, ButtonDescriptor, ButtonId, ButtonAction, CustomizerSet, HostEffect,
    MenuCoordinator, MenuId, MenuKind, PaintEdit, PaintMaterial, PickerSlider, SceneNode,
    SegmentTone, VariableId,
};

const CANVAS: Vec2 = Vec2::new(1920.0, 1080.0);
const METER_SIZE: Vec2 = Vec2::new(420.0, 28.0);
const METER_LABEL_WIDTH: f32 = 140.0;

const PANEL_COLOR: Color = Color::srgba(0.05, 0.05, 0.08, 0.85);
const BUTTON_COLOR: Color = Color::srgb(0.18, 0.18, 0.22);
const POSITIVE_COLOR: Color = Color::srgb(0.2, 0.75, 0.3);
const NEGATIVE_COLOR: Color = Color::srgb(0.8, 0.2, 0.2);
const NEUTRAL_COLOR: Color = Color::srgb(0.25, 0.25, 0.28);
const FILL_COLOR: Color = Color::srgb(0.85, 0.85, 0.9);
const SV_MARKER_SIZE: f32 = 10.0;

pub struct CustomizerUiPlugin;

impl Plugin for CustomizerUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiIndex>()
            .add_systems(Startup, spawn_ui_root)
            .add_systems(
                Update,
                (
                    (menu_button_clicks, picker_input).before(CustomizerSet::Dispatch),
                    (build_widgets, apply_widget_effects)
                        .chain()
                        .in_set(CustomizerSet::Present),
                ),
            );
    }
}

// ============================================================================
// Components / resources
// ============================================================================

#[derive(Component)]
pub struct UiRoot;

#[derive(Component)]
pub struct MenuPanel(pub MenuId);

#[derive(Component)]
pub struct MenuButton {
    pub id: ButtonId,
    pub action: ButtonAction,
}

#[derive(Component)]
pub struct MeterSegment {
    pub variable: VariableId,
    pub index: usize,
}

/// Элемент color picker'а (RelativeCursorPosition → PaintEdit)
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickerControl {
    SvPad,
    Slider(PickerSlider),
}

/// Отображение текущего значения: заливка slider'а или маркер на SV pad
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickerIndicator {
    Fill(PickerSlider),
    SvMarker,
}

#[derive(Component)]
pub struct PickerTitle;

/// Превью редактируемого цвета
#[derive(Component)]
pub struct PickerPreview;

/// Core id → UI entity
#[derive(Resource, Default)]
pub struct UiIndex {
    pub root: Option<Entity>,
    pub menus: HashMap<MenuId, Entity>,
    pub buttons: HashMap<ButtonId, Entity>,
    pub meters: HashMap<VariableId, Vec<Entity>>,
}

// ============================================================================
// Layout helpers
// ============================================================================

/// Прямоугольник на reference canvas (центр + размер) → absolute Node в процентах
fn canvas_node(center: Vec2, size: Vec2) -> Node {
    let top_left = Vec2::new(
        center.x - size.x / 2.0 + CANVAS.x / 2.0,
        CANVAS.y / 2.0 - center.y - size.y / 2.0,
    );

    Node {
        position_type: PositionType::Absolute,
        left: Val::Percent(top_left.x / CANVAS.x * 100.0),
        top: Val::Percent(top_left.y / CANVAS.y * 100.0),
        width: Val::Percent(size.x / CANVAS.x * 100.0),
        height: Val::Percent(size.y / CANVAS.y * 100.0),
        ..default()
    }
}

/// Полоса экрана, которую занимает меню (остальное - click region камеры)
fn area_node(area: MenuArea) -> Node {
    let mut node = Node {
        position_type: PositionType::Absolute,
        flex_direction: FlexDirection::Column,
        align_items: AlignItems::Center,
        padding: UiRect::all(Val::Px(8.0)),
        row_gap: Val::Px(8.0),
        ..default()
    };

    match area {
        MenuArea::Bottom => {
            node.left = Val::Px(0.0);
            node.bottom = Val::Px(0.0);
            node.width = Val::Percent(100.0);
            node.height = Val::Percent(23.0);
        }
        MenuArea::Left => {
            node.left = Val::Px(0.0);
            node.top = Val::Px(0.0);
            node.width = Val::Percent(27.0);
            node.height = Val::Percent(100.0);
        }
        MenuArea::Full => {
            node.width = Val::Percent(100.0);
            node.height = Val::Percent(100.0);
        }
    }
    node
}

fn tone_color(tone: SegmentTone) -> Color {
    match tone {
        SegmentTone::Positive => POSITIVE_COLOR,
        SegmentTone::Negative => NEGATIVE_COLOR,
        SegmentTone::Neutral => NEUTRAL_COLOR,
    }
}

fn label(text: impl Into<String>, size: f32) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(Color::WHITE),
    )
}

// ============================================================================
// Systems
// ============================================================================

fn spawn_ui_root(mut commands: Commands, mut index: ResMut<UiIndex>) {
    let root = commands
        .spawn((
            UiRoot,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
        ))
        .id();
    index.root = Some(root);
}

/// MenuCreated / ButtonCreated / MeterCreated → UI entities
fn build_widgets(
    mut commands: Commands,
    mut effects: EventReader<HostEffect>,
    mut index: ResMut<UiIndex>,
    asset_server: Res<AssetServer>,
    coordinator: Option<Res<MenuCoordinator>>,
) {
    let Some(root) = index.root else {
        effects.clear();
        return;
    };
    let segment_count = coordinator
        .map(|c| c.projection().segments)
        .unwrap_or_default();

    for effect in effects.read() {
        match effect {
            HostEffect::MenuCreated { menu, summary } => {
                let panel = commands
                    .spawn((
                        MenuPanel(*menu),
                        Node {
                            position_type: PositionType::Absolute,
                            width: Val::Percent(100.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        Visibility::Hidden,
                    ))
                    .id();

                let strip = commands
                    .spawn((area_node(summary.area), BackgroundColor(PANEL_COLOR)))
                    .with_children(|strip| {
                        strip.spawn(label(summary.display_name.clone(), 28.0));
                        if summary.kind == MenuKind::PaintSubmenu {
                            spawn_picker(strip);
                        }
                    })
                    .id();

                commands.entity(panel).add_child(strip);
                commands.entity(root).add_child(panel);
                index.menus.insert(*menu, panel);
            }
            HostEffect::ButtonCreated(descriptor) => {
                let Some(&panel) = index.menus.get(&descriptor.id.menu) else {
                    continue;
                };
                let button = spawn_button(&mut commands, descriptor, &asset_server);
                commands.entity(panel).add_child(button);
                index.buttons.insert(descriptor.id, button);
            }
            HostEffect::MeterCreated {
                variable,
                name,
                sequence,
            } => {
                let segments = commands
                    .spawn(canvas_node(meter_position(*sequence), METER_SIZE))
                    .id();
                commands.entity(root).add_child(segments);

                let caption = commands
                    .spawn((
                        Node {
                            width: Val::Px(METER_LABEL_WIDTH),
                            ..default()
                        },
                        label(name.to_uppercase(), 16.0),
                    ))
                    .id();
                commands.entity(segments).add_child(caption);

                let cells: Vec<Entity> = (0..segment_count)
                    .map(|i| {
                        commands
                            .spawn((
                                MeterSegment {
                                    variable: *variable,
                                    index: i,
                                },
                                Node {
                                    flex_grow: 1.0,
                                    margin: UiRect::horizontal(Val::Px(1.0)),
                                    ..default()
                                },
                                BackgroundColor(NEUTRAL_COLOR),
                            ))
                            .id()
                    })
                    .collect();
                commands.entity(segments).add_children(&cells);
                index.meters.insert(*variable, cells);
            }
            _ => {}
        }
    }
}

fn spawn_button(
    commands: &mut Commands,
    descriptor: &ButtonDescriptor,
    asset_server: &AssetServer,
) -> Entity {
    let color = descriptor
        .swatch
        .map(Color::Srgba)
        .unwrap_or(BUTTON_COLOR);

    let mut node = canvas_node(descriptor.position, descriptor.size);
    node.flex_direction = FlexDirection::Column;
    node.justify_content = JustifyContent::End;
    node.align_items = AlignItems::Center;

    let button = commands
        .spawn((
            Button,
            MenuButton {
                id: descriptor.id,
                action: descriptor.action,
            },
            node,
            BackgroundColor(color),
        ))
        .id();

    // Icon грузим, только если файл реально есть в assets/
    if let Some(icon) = &descriptor.icon {
        if std::path::Path::new("assets").join(&icon.0).exists() {
            let image = commands
                .spawn((
                    ImageNode::new(asset_server.load(icon.0.clone())),
                    Node {
                        width: Val::Percent(70.0),
                        height: Val::Percent(60.0),
                        ..default()
                    },
                ))
                .id();
            commands.entity(button).add_child(image);
        }
    }

    let text = commands.spawn(label(descriptor.label.clone(), 18.0)).id();
    commands.entity(button).add_child(text);
    button
}

fn spawn_picker(strip: &mut ChildSpawnerCommands) {
    strip.spawn((PickerTitle, label("", 22.0)));

    strip.spawn((
        PickerPreview,
        Node {
            width: Val::Percent(80.0),
            height: Val::Px(24.0),
            ..default()
        },
        BackgroundColor(NEUTRAL_COLOR),
    ));

    strip
        .spawn((
            PickerControl::SvPad,
            Button,
            RelativeCursorPosition::default(),
            Node {
                width: Val::Percent(80.0),
                aspect_ratio: Some(1.0),
                ..default()
            },
            BackgroundColor(Color::hsv(0.0, 1.0, 1.0)),
        ))
        .with_children(|pad| {
            pad.spawn((
                PickerIndicator::SvMarker,
                Node {
                    position_type: PositionType::Absolute,
                    width: Val::Px(SV_MARKER_SIZE),
                    height: Val::Px(SV_MARKER_SIZE),
                    margin: UiRect::all(Val::Px(-SV_MARKER_SIZE / 2.0)),
                    ..default()
                },
                BackgroundColor(Color::WHITE),
            ));
        });

    for slider in PickerSlider::ALL {
        strip.spawn(label(slider.caption(), 14.0));
        strip
            .spawn((
                PickerControl::Slider(slider),
                Button,
                RelativeCursorPosition::default(),
                Node {
                    width: Val::Percent(80.0),
                    height: Val::Px(18.0),
                    ..default()
                },
                BackgroundColor(NEUTRAL_COLOR),
            ))
            .with_children(|bar| {
                bar.spawn((
                    PickerIndicator::Fill(slider),
                    Node {
                        width: Val::Percent(0.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                    BackgroundColor(FILL_COLOR),
                ));
            });
    }
}

/// SetActive(menu) / ButtonSwatch / MeterRendered / picker → существующие widgets
fn apply_widget_effects(
    mut effects: EventReader<HostEffect>,
    index: Res<UiIndex>,
    coordinator: Option<Res<MenuCoordinator>>,
    mut panels: Query<&mut Visibility, With<MenuPanel>>,
    mut backgrounds: Query<&mut BackgroundColor>,
    pickers: Query<(Entity, &PickerControl)>,
    previews: Query<Entity, With<PickerPreview>>,
    mut indicators: Query<(&PickerIndicator, &mut Node)>,
    mut titles: Query<&mut Text, With<PickerTitle>>,
) {
    let Some(coordinator) = coordinator else {
        effects.clear();
        return;
    };

    for effect in effects.read() {
        match effect {
            HostEffect::SetActive {
                node: SceneNode::Menu(menu),
                active,
            } => {
                let Some(mut visibility) = index
                    .menus
                    .get(menu)
                    .and_then(|&e| panels.get_mut(e).ok())
                else {
                    continue;
                };
                *visibility = if *active {
                    Visibility::Inherited
                } else {
                    Visibility::Hidden
                };
            }
            HostEffect::ButtonSwatch { button, color } => {
                if let Some(mut background) = index
                    .buttons
                    .get(button)
                    .and_then(|&e| backgrounds.get_mut(e).ok())
                {
                    background.0 = Color::Srgba(*color);
                }
            }
            HostEffect::MeterRendered {
                variable,
                base_value,
                current_value,
            } => {
                let Some(cells) = index.meters.get(variable) else {
                    continue;
                };
                let projection = coordinator.projection();
                for (i, &cell) in cells.iter().enumerate() {
                    if let Ok(mut background) = backgrounds.get_mut(cell) {
                        background.0 = tone_color(projection.tone(i, *base_value, *current_value));
                    }
                }
            }
            HostEffect::ColorPickerOpened { material, .. } => {
                for mut title in titles.iter_mut() {
                    title.0 = material.name.to_uppercase();
                }
                refresh_picker(&coordinator, material, &pickers, &previews, &mut indicators, &mut backgrounds);
            }
            HostEffect::MaterialChanged { material, .. } => {
                refresh_picker(&coordinator, material, &pickers, &previews, &mut indicators, &mut backgrounds);
            }
            _ => {}
        }
    }
}

/// Picker widgets ← текущий HSV + материал
///
/// SV pad = чистый hue, маркер = (saturation, value), заливки slider'ов =
/// их значения, превью = цвет материала.
fn refresh_picker(
    coordinator: &MenuCoordinator,
    material: &PaintMaterial,
    pickers: &Query<(Entity, &PickerControl)>,
    previews: &Query<Entity, With<PickerPreview>>,
    indicators: &mut Query<(&PickerIndicator, &mut Node)>,
    backgrounds: &mut Query<&mut BackgroundColor>,
) {
    let Some(picker) = coordinator.color_picker() else {
        return;
    };

    for (entity, control) in pickers.iter() {
        if *control != PickerControl::SvPad {
            continue;
        }
        if let Ok(mut background) = backgrounds.get_mut(entity) {
            background.0 = Color::hsv(picker.hue * 360.0, 1.0, 1.0);
        }
    }

    for entity in previews.iter() {
        if let Ok(mut background) = backgrounds.get_mut(entity) {
            background.0 = Color::Srgba(material.color);
        }
    }

    for (indicator, mut node) in indicators.iter_mut() {
        match indicator {
            PickerIndicator::Fill(slider) => {
                node.width = Val::Percent(slider.value(picker, material) * 100.0);
            }
            PickerIndicator::SvMarker => {
                node.left = Val::Percent(picker.saturation * 100.0);
                node.top = Val::Percent((1.0 - picker.value) * 100.0);
            }
        }
    }
}

fn menu_button_clicks(
    buttons: Query<(&Interaction, &MenuButton), Changed<Interaction>>,
    mut clicks: EventWriter<ButtonClicked>,
) {
    for (interaction, button) in buttons.iter() {
        if *interaction == Interaction::Pressed {
            clicks.write(ButtonClicked {
                action: button.action,
            });
        }
    }
}

/// Pressed + позиция курсора → PaintEdit (каждый кадр, пока зажато)
///
/// `RelativeCursorPosition::normalized` - от центра ноды, (-0.5..0.5), y вниз.
fn picker_input(
    controls: Query<(&Interaction, &RelativeCursorPosition, &PickerControl)>,
    mut edits: EventWriter<PaintEdit>,
) {
    for (interaction, cursor, control) in controls.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }
        let Some(normalized) = cursor.normalized else {
            continue;
        };
        let slider = (normalized.x + 0.5).clamp(0.0, 1.0);

        edits.write(match control {
            PickerControl::SvPad => {
                let (saturation, value) =
                    sv_from_pointer(Vec2::new(normalized.x, -normalized.y), Vec2::ONE);
                PaintEdit::SetSaturationValue { saturation, value }
            }
            PickerControl::Slider(kind) => kind.edit(slider),
        });
    }
}

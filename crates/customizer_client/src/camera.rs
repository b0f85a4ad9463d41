use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use customizer_core::{CameraRigState, CustomizerSet, HostEffect};

/// Центр orbit'а (примерно середина объекта)
const FOCUS: Vec3 = Vec3::new(0.0, 1.0, 0.0);

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                apply_camera_effects.in_set(CustomizerSet::Present),
                (camera_rig_input, update_camera_transform)
                    .chain()
                    .after(CustomizerSet::Present),
            ),
        );
    }
}

/// Camera rig: orbit вокруг объекта, состояние в `CameraRigState`
#[derive(Component)]
pub struct CustomizerCamera {
    pub rig: CameraRigState,
}

impl CustomizerCamera {
    pub fn new(rig: CameraRigState) -> Self {
        Self { rig }
    }
}

/// Destination angle + click region от coordinator'а
fn apply_camera_effects(
    mut effects: EventReader<HostEffect>,
    mut query: Query<&mut CustomizerCamera>,
) {
    let Ok(mut camera) = query.single_mut() else {
        effects.clear();
        return;
    };

    for effect in effects.read() {
        match effect {
            HostEffect::CameraDestination(angle) => camera.rig.set_destination(*angle),
            HostEffect::ClickRegion(region) => camera.rig.set_click_region(*region),
            _ => {}
        }
    }
}

/// ЛКМ drag внутри click region → вращение, иначе easing к destination; колесо → zoom
///
/// Region проверяется каждый кадр по текущей позиции курсора.
fn camera_rig_input(
    mut query: Query<&mut CustomizerCamera>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut mouse_wheel: EventReader<MouseWheel>,
    time: Res<Time>,
) {
    let Ok(mut camera) = query.single_mut() else {
        return;
    };

    let cursor = windows.single().ok().and_then(cursor_percent);
    let delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();

    // Экранный y вниз → y вверх
    camera.rig.update(
        mouse_buttons.pressed(MouseButton::Left),
        cursor,
        Vec2::new(delta.x, -delta.y),
        time.delta_secs(),
    );

    for wheel in mouse_wheel.read() {
        camera.rig.zoom(wheel.y);
    }
}

/// Курсор → проценты viewport (y от низа)
fn cursor_percent(window: &Window) -> Option<Vec2> {
    let position = window.cursor_position()?;
    let size = window.size();
    if size.x <= 0.0 || size.y <= 0.0 {
        return None;
    }

    Some(Vec2::new(
        position.x / size.x * 100.0,
        (1.0 - position.y / size.y) * 100.0,
    ))
}

fn update_camera_transform(mut query: Query<(&CustomizerCamera, &mut Transform)>) {
    for (camera, mut transform) in query.iter_mut() {
        // Rig смотрит вдоль +Z, камера позади pivot'а
        let offset = camera.rig.rotation * Vec3::new(0.0, 0.0, -camera.rig.distance);
        *transform = Transform::from_translation(FOCUS + offset).looking_at(FOCUS, Vec3::Y);
    }
}

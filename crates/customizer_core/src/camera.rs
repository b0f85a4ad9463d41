//! Camera rig state (orbit вокруг объекта)
//!
//! Ядро только задаёт destination и click region; интерполяция - per-frame
//! update на стороне rig'а (fire-and-forget для coordinator'а).
//!
//! Поведение:
//! - drag ЛКМ внутри click region → вращение (destination = текущая ориентация)
//! - region проверяется каждый кадр: курсор ушёл из region → интерполяция
//!   к destination (rate 4/s), даже если кнопка ещё зажата
//! - scroll → zoom, clamp [min_distance, max_distance]

use bevy::math::{EulerRot, Quat, Vec2};

use crate::menu::{CameraAngle, ClickRegion};
use crate::settings::CustomizerSettings;

/// Скорость интерполяции к destination (доля за секунду)
pub const SETTLE_RATE: f32 = 4.0;

#[derive(Clone, Debug, PartialEq)]
pub struct CameraRigState {
    pub rotation: Quat,
    pub destination: Quat,
    pub click_region: ClickRegion,
    /// Градусы на единицу mouse delta в секунду
    pub sensitivity: f32,
    pub scroll_sensitivity: f32,
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

/// Euler (pitch, yaw) в градусах → ориентация rig'а (порядок Y, затем X)
pub fn angle_to_quat(angle: CameraAngle) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        angle.yaw.to_radians(),
        angle.pitch.to_radians(),
        0.0,
    )
}

impl CameraRigState {
    pub fn new(settings: &CustomizerSettings, min_distance: f32, max_distance: f32) -> Self {
        let (min_distance, max_distance) = if min_distance <= max_distance {
            (min_distance, max_distance)
        } else {
            (max_distance, min_distance)
        };

        Self {
            rotation: Quat::IDENTITY,
            destination: Quat::IDENTITY,
            click_region: ClickRegion::FULL,
            sensitivity: settings.rotational_sensitivity * 10.0,
            scroll_sensitivity: settings.scroll_sensitivity,
            distance: (min_distance + max_distance) / 2.0,
            min_distance,
            max_distance,
        }
    }

    pub fn set_destination(&mut self, angle: CameraAngle) {
        self.destination = angle_to_quat(angle);
    }

    pub fn set_click_region(&mut self, region: ClickRegion) {
        self.click_region = region.normalized();
    }

    /// `cursor_pct` - курсор в процентах viewport (y от низа)
    pub fn accepts_drag(&self, cursor_pct: Vec2) -> bool {
        self.click_region.contains(cursor_pct.x, cursor_pct.y)
    }

    /// Drag вращение: `delta` - mouse motion (x вправо, y вверх)
    pub fn drag(&mut self, delta: Vec2, dt: f32) {
        let (yaw, pitch, _) = self.rotation.to_euler(EulerRot::YXZ);
        let yaw = yaw + (delta.x * self.sensitivity * dt).to_radians();
        let pitch = pitch - (delta.y * self.sensitivity * dt).to_radians();

        self.rotation = Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0);
        self.destination = self.rotation;
    }

    /// Один кадр rig'а: drag, если ЛКМ зажата, мышь сдвинулась и курсор
    /// внутри click region, иначе easing к destination.
    ///
    /// `cursor_pct` - `None`, когда курсор вне окна.
    pub fn update(&mut self, held: bool, cursor_pct: Option<Vec2>, delta: Vec2, dt: f32) {
        let in_region = cursor_pct.is_some_and(|cursor| self.accepts_drag(cursor));

        if held && delta != Vec2::ZERO && in_region {
            self.drag(delta, dt);
        } else {
            self.settle(dt);
        }
    }

    /// Один кадр интерполяции к destination
    pub fn settle(&mut self, dt: f32) {
        let t = (dt * SETTLE_RATE).clamp(0.0, 1.0);
        self.rotation = self.rotation.slerp(self.destination, t).normalize();
    }

    /// Zoom колесом (положительный scroll = ближе)
    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance - scroll * self.scroll_sensitivity)
            .clamp(self.min_distance, self.max_distance);
    }
}

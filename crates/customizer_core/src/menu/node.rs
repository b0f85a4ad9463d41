//! Menu node: один экран кнопок + camera view + click region

use crate::attachment::AttachmentKey;
use crate::definitions::{IconId, ViewMode};
use crate::menu::button::ButtonDescriptor;
use crate::menu::key::MenuKey;

/// Destination-угол камеры (градусы, Euler pitch/yaw)
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct CameraAngle {
    pub pitch: f32,
    pub yaw: f32,
}

impl CameraAngle {
    pub const fn new(pitch: f32, yaw: f32) -> Self {
        Self { pitch, yaw }
    }

    /// (0, 0) = меню не трогает камеру
    pub fn is_managed(&self) -> bool {
        self.pitch != 0.0 || self.yaw != 0.0
    }
}

impl ViewMode {
    /// Фиксированная таблица ракурсов
    pub fn camera_angle(self) -> CameraAngle {
        match self {
            ViewMode::TopDown => CameraAngle::new(-310.0, -60.0),
            ViewMode::Isometric => CameraAngle::new(20.0, -30.0),
            ViewMode::Left => CameraAngle::new(10.0, -72.0),
            ViewMode::Right => CameraAngle::new(10.0, 72.0),
            ViewMode::Front => CameraAngle::new(8.0, -8.0),
            ViewMode::Rear => CameraAngle::new(10.0, 170.0),
            ViewMode::Unmanaged => CameraAngle::default(),
        }
    }
}

/// Playable area: прямоугольник viewport (в процентах), где работает drag камеры.
///
/// Координаты от левого нижнего угла: `left < x < right`, `top < y < bottom`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClickRegion {
    pub left: u8,
    pub right: u8,
    pub top: u8,
    pub bottom: u8,
}

impl Default for ClickRegion {
    fn default() -> Self {
        Self::FULL
    }
}

impl ClickRegion {
    pub const FULL: ClickRegion = ClickRegion { left: 0, right: 100, top: 0, bottom: 100 };

    /// Нулевые right/bottom означают "до края экрана"
    pub fn normalized(self) -> Self {
        Self {
            right: if self.right == 0 { 100 } else { self.right },
            bottom: if self.bottom == 0 { 100 } else { self.bottom },
            ..self
        }
    }

    /// `x_pct`/`y_pct` - позиция курсора в процентах viewport, y от низа
    pub fn contains(&self, x_pct: f32, y_pct: f32) -> bool {
        x_pct > self.left as f32
            && x_pct < self.right as f32
            && y_pct > self.top as f32
            && y_pct < self.bottom as f32
    }
}

/// Где меню занимает экран → какая часть viewport остаётся для камеры
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuArea {
    /// Полоса кнопок снизу
    Bottom,
    /// Панель слева (color picker)
    Left,
    Full,
}

impl MenuArea {
    pub fn click_region(self) -> ClickRegion {
        match self {
            MenuArea::Bottom => ClickRegion { left: 0, right: 100, top: 23, bottom: 100 },
            MenuArea::Left => ClickRegion { left: 27, right: 100, top: 0, bottom: 100 },
            MenuArea::Full => ClickRegion::FULL,
        }
    }
}

/// Что меню показывает
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuKind {
    Root,
    /// Кнопки attachments slot'а
    Attachments,
    /// Кнопки материалов
    Paint,
    /// Color picker
    PaintSubmenu,
}

#[derive(Clone, Debug)]
pub struct MenuNode {
    pub key: MenuKey,
    pub kind: MenuKind,
    /// Stable lookup key
    pub name: String,
    pub display_name: String,
    pub icon: Option<IconId>,
    pub view: ViewMode,
    pub camera_angle: CameraAngle,
    pub area: MenuArea,
    pub click_region: ClickRegion,
    pub buttons: Vec<ButtonDescriptor>,
    /// Attachments, перечисленные в этом меню
    pub attachments: Vec<AttachmentKey>,
}

impl MenuNode {
    pub fn new(
        key: MenuKey,
        kind: MenuKind,
        name: impl Into<String>,
        display_name: impl Into<String>,
        view: ViewMode,
        area: MenuArea,
    ) -> Self {
        Self {
            key,
            kind,
            name: name.into(),
            display_name: display_name.into(),
            icon: None,
            view,
            camera_angle: view.camera_angle(),
            area,
            click_region: area.click_region(),
            buttons: Vec::new(),
            attachments: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_table() {
        assert_eq!(ViewMode::Left.camera_angle(), CameraAngle::new(10.0, -72.0));
        assert_eq!(ViewMode::Rear.camera_angle(), CameraAngle::new(10.0, 170.0));
        assert!(!ViewMode::Unmanaged.camera_angle().is_managed());
        assert!(ViewMode::TopDown.camera_angle().is_managed());
    }

    #[test]
    fn test_click_region_normalized() {
        let region = ClickRegion { left: 10, right: 0, top: 5, bottom: 0 }.normalized();
        assert_eq!(region, ClickRegion { left: 10, right: 100, top: 5, bottom: 100 });
    }

    #[test]
    fn test_click_region_contains() {
        let bottom = MenuArea::Bottom.click_region();
        assert!(bottom.contains(50.0, 60.0));
        assert!(!bottom.contains(50.0, 10.0)); // в полосе кнопок

        let left = MenuArea::Left.click_region();
        assert!(!left.contains(20.0, 50.0)); // над панелью color picker
        assert!(left.contains(40.0, 50.0));
    }
}

//! Button descriptors - кликабельные элементы меню

use bevy::color::Srgba;
use bevy::math::Vec2;

use crate::attachment::{AttachmentKey, SlotId};
use crate::definitions::IconId;
use crate::menu::key::MenuKey;
use crate::menu::MenuId;

/// Authoring-строка действия "открыть меню"
pub const ACTION_LAUNCH_MENU: &str = "Launch Menu";
/// Authoring-строка действия "выбрать attachment"
pub const ACTION_CUSTOMIZE: &str = "Customize";

/// Кнопка = (меню, порядковый номер внутри меню)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ButtonId {
    pub menu: MenuId,
    pub index: usize,
}

/// Что делает кнопка
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonAction {
    LaunchMenu(MenuKey),
    Customize { slot: SlotId, object_id: i32 },
}

impl ButtonAction {
    pub fn customize(key: AttachmentKey) -> Self {
        ButtonAction::Customize { slot: key.slot, object_id: key.object_id }
    }
}

/// Визуальная роль кнопки (host выбирает prefab/стиль)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonRole {
    /// Root → category
    Navigation,
    Back,
    /// Выбор attachment
    Attachment,
    /// Материал в Paint меню (цветной swatch)
    PaintSwatch,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ButtonDescriptor {
    pub id: ButtonId,
    pub role: ButtonRole,
    pub action: ButtonAction,
    /// Stable имя цели (имя меню или attachment), нужно для строкового dispatch
    pub target_name: String,
    pub label: String,
    pub icon: Option<IconId>,
    /// Центр кнопки в reference layout
    pub position: Vec2,
    pub size: Vec2,
    /// Цвет swatch (только `PaintSwatch`)
    pub swatch: Option<Srgba>,
}

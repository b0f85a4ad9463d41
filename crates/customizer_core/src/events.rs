//! Входящие события customizer'а (UI → coordinator)
//!
//! Исходящие события - `HostEffect` (см. `host.rs`).

use bevy::prelude::*;

use crate::menu::ButtonAction;

/// Событие: пользователь нажал кнопку меню
///
/// Генерируется UI слоем клиента (или headless сценарием).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ButtonClicked {
    pub action: ButtonAction,
}

/// Событие: нажатие authored-кнопки со строковой привязкой
///
/// `action` - "Launch Menu" / "Customize", `target` резолвится prefix-правилом.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct RawButtonClicked {
    pub action: String,
    pub target: String,
    pub slot: i32,
    pub object_id: i32,
}

impl RawButtonClicked {
    pub fn launch(target: impl Into<String>) -> Self {
        Self {
            action: crate::menu::ACTION_LAUNCH_MENU.to_string(),
            target: target.into(),
            slot: -1,
            object_id: 0,
        }
    }

    pub fn customize(slot: i32, object_id: i32) -> Self {
        Self {
            action: crate::menu::ACTION_CUSTOMIZE.to_string(),
            target: String::new(),
            slot,
            object_id,
        }
    }
}

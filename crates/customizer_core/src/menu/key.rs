//! Structured menu identity
//!
//! Вместо склейки строк ("PSM_" + index) и StartsWith-навигации каждое меню
//! адресуется `MenuKey`. Строковые имена остаются для authoring-данных и
//! строкового dispatch (`MenuTree::find_by_prefix`).

use std::fmt;

use crate::error::ConfigError;

/// Имя paint submenu (одна нода на все color submenus)
pub const PAINT_SUBMENU_NAME: &str = "PSM";

/// Имя category-меню, для которого строятся paint-кнопки
pub const PAINT_MENU_NAME: &str = "Paint";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuKey {
    /// Главное меню
    Root,
    /// Меню slot'а (индекс в `ObjectDefinition::menus`)
    Category(usize),
    /// Paint submenu (color picker) - сама нода
    PaintSubmenu,
    /// Color submenu конкретного материала: член группы `PaintSubmenu`
    ColorSubmenu(usize),
}

impl MenuKey {
    /// Нода, которая показывается для этого ключа (submenu group relation)
    pub fn group(self) -> MenuKey {
        match self {
            MenuKey::ColorSubmenu(_) => MenuKey::PaintSubmenu,
            other => other,
        }
    }

    /// Conventional строковое имя color submenu ("PSM_3")
    pub fn color_key(material_index: usize) -> String {
        format!("{}_{}", PAINT_SUBMENU_NAME, material_index)
    }

    /// "PSM_3" / "PSM_3_suffix" → 3
    pub fn parse_color_key(name: &str) -> Result<usize, ConfigError> {
        let malformed = || ConfigError::MalformedColorKey(name.to_string());

        let rest = name
            .strip_prefix(PAINT_SUBMENU_NAME)
            .and_then(|r| r.strip_prefix('_'))
            .ok_or_else(malformed)?;
        let index = rest.split('_').next().unwrap_or_default();
        index.parse::<usize>().map_err(|_| malformed())
    }
}

impl fmt::Display for MenuKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuKey::Root => write!(f, "root"),
            MenuKey::Category(i) => write!(f, "category#{}", i),
            MenuKey::PaintSubmenu => write!(f, "{}", PAINT_SUBMENU_NAME),
            MenuKey::ColorSubmenu(i) => write!(f, "{}", MenuKey::color_key(*i)),
        }
    }
}

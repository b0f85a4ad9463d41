//! Object definitions - статические данные customizable object
//!
//! # Архитектура
//!
//! **ObjectDefinition** - то, что автор объекта описывает в RON:
//! - materials (перекрашиваемые материалы)
//! - menus (по одному меню на slot / "list")
//! - variables (stats 0–100 с базовым значением)
//! - attachments (scene instances, которые host обнаруживает в сцене)
//!
//! Загружается один раз при старте и дальше не меняется. Runtime state
//! (активные attachments, modifiers) живёт в `MenuCoordinator`.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Demo object (SUV) - используется headless бинарником, клиентом и тестами
pub const DEMO_OBJECT_RON: &str = include_str!("../data/demo_suv.ron");

/// Категория объекта (только для UI/логов)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObjectType {
    #[default]
    Vehicle,
    Weapon,
    Human,
}

/// Ракурс камеры для меню
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    #[serde(alias = "TopDown_View")]
    TopDown,
    #[serde(alias = "Isometric_View")]
    Isometric,
    #[serde(alias = "Left_View")]
    Left,
    #[serde(alias = "Right_View")]
    Right,
    #[serde(alias = "Front_View")]
    Front,
    #[serde(alias = "Rear_View")]
    Rear,
    /// Меню не трогает камеру
    #[default]
    #[serde(alias = "DontMessWithMyView")]
    Unmanaged,
}

/// Opaque handle на иконку/спрайт (путь ассета, host сам решает как грузить)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconId(pub String);

impl From<&str> for IconId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Описание одного меню (одного slot'а)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MenuDef {
    /// Порядок кнопки в root menu
    pub sequence_id: i32,
    /// Stable key для навигации (уникален среди всех меню)
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub view: ViewMode,
    #[serde(default)]
    pub icon: Option<IconId>,
}

/// Stat объекта (speed, handling, ...). Домен 0–100 номинальный.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariableDef {
    pub name: String,
    pub base_value: f32,
}

/// Перекрашиваемый материал
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaintMaterialDef {
    pub name: String,
    /// sRGBA 0..1
    pub color: (f32, f32, f32, f32),
    #[serde(default)]
    pub metallic: f32,
    #[serde(default = "default_glossiness")]
    pub glossiness: f32,
}

fn default_glossiness() -> f32 {
    0.5
}

/// Влияние attachment на переменную (+delta при активации, −delta при деактивации)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariableEffect {
    pub variable: String,
    pub delta: f32,
}

/// Визуал части объекта (используется только demo-сценой клиента)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartVisual {
    pub offset: (f32, f32, f32),
    pub size: (f32, f32, f32),
    /// Индекс в `ObjectDefinition::materials`
    #[serde(default)]
    pub material: usize,
}

/// Attachment instance в том виде, в каком host его обнаружил в сцене
///
/// Несколько instances могут иметь одинаковый (list, object_id) - например
/// четыре колеса одного комплекта. Ядро группирует их в один `AttachmentDef`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttachmentSource {
    /// Имя меню (slot), к которому относится attachment
    pub list: String,
    /// 0 = default choice slot'а
    pub object_id: i32,
    pub display_name: String,
    #[serde(default)]
    pub icon: Option<IconId>,
    #[serde(default)]
    pub effects: Vec<VariableEffect>,
    #[serde(default)]
    pub visual: Option<PartVisual>,
}

/// Полное описание customizable object
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectDefinition {
    #[serde(default)]
    pub object_type: ObjectType,
    #[serde(default = "default_root_menu_name")]
    pub root_menu_name: String,
    #[serde(default = "default_root_display_name")]
    pub root_display_name: String,
    pub min_distance: f32,
    pub max_distance: f32,
    #[serde(default)]
    pub materials: Vec<PaintMaterialDef>,
    #[serde(default)]
    pub menus: Vec<MenuDef>,
    #[serde(default)]
    pub variables: Vec<VariableDef>,
    #[serde(default)]
    pub attachments: Vec<AttachmentSource>,
    /// Неизменяемые части (кузов и т.п.) - только для demo-сцены
    #[serde(default)]
    pub body: Vec<PartVisual>,
}

fn default_root_menu_name() -> String {
    "Main Menu".to_string()
}

fn default_root_display_name() -> String {
    "MAIN MENU".to_string()
}

impl ObjectDefinition {
    /// Распарсить definition из RON строки
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(source)?)
    }

    /// Загрузить definition из RON файла
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_ron_str(&source)
    }

    /// Встроенный demo object
    pub fn demo() -> Result<Self, ConfigError> {
        Self::from_ron_str(DEMO_OBJECT_RON)
    }
}

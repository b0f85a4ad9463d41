//! Customizer settings (камера, кнопки, meters)
//!
//! Defaults совпадают со значениями authoring-инспектора исходного пакета.

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

/// Размер кнопок меню и расстояние между ними (в пикселях reference layout 1920×1080)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ButtonStyle {
    pub width: f32,
    pub height: f32,
    pub offset: f32,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            width: 160.0,
            height: 160.0,
            offset: 20.0,
        }
    }
}

impl ButtonStyle {
    /// Центр кнопки с порядковым номером `sequence` (origin = центр экрана, y вверх)
    pub fn position(&self, sequence: usize) -> Vec2 {
        let step = self.width + self.offset;
        Vec2::new(-960.0 + step + step * sequence as f32, -405.0)
    }

    /// Back button всегда в правом нижнем углу
    pub fn back_position(&self) -> Vec2 {
        Vec2::new(840.0, -420.0)
    }
}

/// Позиция meter'а переменной с порядковым номером `sequence`
pub fn meter_position(sequence: usize) -> Vec2 {
    Vec2::new(680.0, 490.0 - 40.0 * sequence as f32)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomizerSettings {
    /// Чувствительность drag-вращения (×10 внутри rig)
    pub rotational_sensitivity: f32,
    pub scroll_sensitivity: f32,
    pub button: ButtonStyle,
    /// Количество сегментов meter'а
    pub meter_segments: usize,
    /// Ширина bucket'а meter'а (в единицах переменной)
    pub meter_bucket_width: i32,
}

impl Default for CustomizerSettings {
    fn default() -> Self {
        Self {
            rotational_sensitivity: 20.0,
            scroll_sensitivity: 2.0,
            button: ButtonStyle::default(),
            meter_segments: 20,
            meter_bucket_width: 5,
        }
    }
}

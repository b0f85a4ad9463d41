//! Paint: материалы объекта и HSV color picker
//!
//! Материалы принадлежат `MenuCoordinator`. Color picker - это state + набор
//! правок (`PaintEdit`), которые coordinator применяет к выбранному материалу.
//! Hue хранится в 0..1 (как slider), конвертация через `bevy::color::Hsva`.

use bevy::color::{Hsva, Srgba};
use bevy::math::Vec2;
use bevy::prelude::Event;

use crate::definitions::PaintMaterialDef;

/// Runtime материал
#[derive(Clone, Debug, PartialEq)]
pub struct PaintMaterial {
    pub name: String,
    pub color: Srgba,
    pub metallic: f32,
    pub glossiness: f32,
}

impl PaintMaterial {
    pub fn from_def(def: &PaintMaterialDef) -> Self {
        let (r, g, b, a) = def.color;
        Self {
            name: def.name.clone(),
            color: Srgba::new(r, g, b, a),
            metallic: def.metallic,
            glossiness: def.glossiness,
        }
    }

    /// Подпись кнопки в Paint меню
    pub fn label(&self) -> String {
        self.name.to_uppercase()
    }
}

/// Правка открытого в color picker материала
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub enum PaintEdit {
    /// Точка на SV pad (0..1, 0..1)
    SetSaturationValue { saturation: f32, value: f32 },
    /// Hue slider (0..1)
    SetHue(f32),
    SetAlpha(f32),
    SetMetallic(f32),
    SetGlossiness(f32),
}

/// Состояние color picker для одного материала
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorPickerState {
    pub material_index: usize,
    pub hue: f32,
    pub saturation: f32,
    pub value: f32,
}

impl ColorPickerState {
    /// Инициализация из текущего цвета материала (RGB → HSV)
    pub fn open(material_index: usize, material: &PaintMaterial) -> Self {
        let hsva = Hsva::from(material.color);
        Self {
            material_index,
            hue: (hsva.hue / 360.0).rem_euclid(1.0),
            saturation: hsva.saturation,
            value: hsva.value,
        }
    }

    /// Текущий HSV как sRGB с заданной alpha
    pub fn rgb(&self, alpha: f32) -> Srgba {
        Srgba::from(Hsva::new(self.hue * 360.0, self.saturation, self.value, alpha))
    }

    /// Применить правку к state и материалу. HSV-правки пишут цвет, сохраняя alpha.
    pub fn apply(&mut self, edit: PaintEdit, material: &mut PaintMaterial) {
        match edit {
            PaintEdit::SetSaturationValue { saturation, value } => {
                self.saturation = saturation.clamp(0.0, 1.0);
                self.value = value.clamp(0.0, 1.0);
                material.color = self.rgb(material.color.alpha);
            }
            PaintEdit::SetHue(hue) => {
                self.hue = hue.clamp(0.0, 1.0);
                material.color = self.rgb(material.color.alpha);
            }
            PaintEdit::SetAlpha(alpha) => {
                material.color.alpha = alpha.clamp(0.0, 1.0);
            }
            PaintEdit::SetMetallic(metallic) => {
                material.metallic = metallic.clamp(0.0, 1.0);
            }
            PaintEdit::SetGlossiness(glossiness) => {
                material.glossiness = glossiness.clamp(0.0, 1.0);
            }
        }
    }
}

/// Скалярный slider color picker'а
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PickerSlider {
    Hue,
    Alpha,
    Metallic,
    Glossiness,
}

impl PickerSlider {
    pub const ALL: [PickerSlider; 4] = [
        PickerSlider::Hue,
        PickerSlider::Alpha,
        PickerSlider::Metallic,
        PickerSlider::Glossiness,
    ];

    pub fn caption(self) -> &'static str {
        match self {
            PickerSlider::Hue => "HUE",
            PickerSlider::Alpha => "ALPHA",
            PickerSlider::Metallic => "METALLIC",
            PickerSlider::Glossiness => "GLOSSINESS",
        }
    }

    /// Текущее положение slider'а (0..1) для открытого материала
    pub fn value(self, picker: &ColorPickerState, material: &PaintMaterial) -> f32 {
        match self {
            PickerSlider::Hue => picker.hue,
            PickerSlider::Alpha => material.color.alpha,
            PickerSlider::Metallic => material.metallic,
            PickerSlider::Glossiness => material.glossiness,
        }
    }

    /// Позиция на slider'е (0..1) → правка
    pub fn edit(self, position: f32) -> PaintEdit {
        match self {
            PickerSlider::Hue => PaintEdit::SetHue(position),
            PickerSlider::Alpha => PaintEdit::SetAlpha(position),
            PickerSlider::Metallic => PaintEdit::SetMetallic(position),
            PickerSlider::Glossiness => PaintEdit::SetGlossiness(position),
        }
    }
}

/// Pointer на SV pad → (saturation, value).
///
/// `local` - позиция относительно центра pad (y вверх), `size` - размер pad.
pub fn sv_from_pointer(local: Vec2, size: Vec2) -> (f32, f32) {
    let half = size * 0.5;
    let clamped = local.clamp(-half, half);
    let normalized = (clamped + half) / size;
    (normalized.x, normalized.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn red() -> PaintMaterial {
        PaintMaterial {
            name: "Body".into(),
            color: Srgba::new(1.0, 0.0, 0.0, 0.8),
            metallic: 0.2,
            glossiness: 0.5,
        }
    }

    #[test]
    fn test_open_reads_hsv() {
        let picker = ColorPickerState::open(0, &red());

        assert!(picker.hue.abs() < EPS);
        assert!((picker.saturation - 1.0).abs() < EPS);
        assert!((picker.value - 1.0).abs() < EPS);
    }

    #[test]
    fn test_hue_edit_keeps_alpha() {
        let mut material = red();
        let mut picker = ColorPickerState::open(0, &material);

        // 1/3 оборота → зелёный
        picker.apply(PaintEdit::SetHue(1.0 / 3.0), &mut material);

        assert!(material.color.red < EPS);
        assert!((material.color.green - 1.0).abs() < EPS);
        assert!(material.color.blue < EPS);
        assert_eq!(material.color.alpha, 0.8);
    }

    #[test]
    fn test_sv_edit_darkens() {
        let mut material = red();
        let mut picker = ColorPickerState::open(0, &material);

        picker.apply(PaintEdit::SetSaturationValue { saturation: 0.0, value: 0.5 }, &mut material);

        assert!((material.color.red - 0.5).abs() < EPS);
        assert!((material.color.green - 0.5).abs() < EPS);
        assert!((material.color.blue - 0.5).abs() < EPS);
    }

    #[test]
    fn test_scalar_edits() {
        let mut material = red();
        let mut picker = ColorPickerState::open(0, &material);

        picker.apply(PaintEdit::SetAlpha(0.25), &mut material);
        picker.apply(PaintEdit::SetMetallic(1.5), &mut material);
        picker.apply(PaintEdit::SetGlossiness(0.1), &mut material);

        assert_eq!(material.color.alpha, 0.25);
        assert_eq!(material.metallic, 1.0);
        assert_eq!(material.glossiness, 0.1);
        assert_eq!(material.color.red, 1.0);
    }

    #[test]
    fn test_sv_from_pointer_clamps() {
        let size = Vec2::new(200.0, 100.0);

        assert_eq!(sv_from_pointer(Vec2::ZERO, size), (0.5, 0.5));
        assert_eq!(sv_from_pointer(Vec2::new(-500.0, 500.0), size), (0.0, 1.0));
        assert_eq!(sv_from_pointer(Vec2::new(50.0, -25.0), size), (0.75, 0.25));
    }

    #[test]
    fn test_slider_values_follow_material() {
        let mut material = red();
        let mut picker = ColorPickerState::open(0, &material);

        assert_eq!(PickerSlider::Alpha.value(&picker, &material), 0.8);
        assert_eq!(PickerSlider::Metallic.value(&picker, &material), 0.2);
        assert_eq!(PickerSlider::Glossiness.value(&picker, &material), 0.5);
        assert!(PickerSlider::Hue.value(&picker, &material).abs() < EPS);

        for slider in PickerSlider::ALL {
            picker.apply(slider.edit(0.6), &mut material);
        }

        for slider in PickerSlider::ALL {
            assert!((slider.value(&picker, &material) - 0.6).abs() < EPS, "{:?}", slider);
        }
    }

    #[test]
    fn test_label_uppercase() {
        assert_eq!(red().label(), "BODY");
    }
}

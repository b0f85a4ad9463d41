//! Host collaborators - интерфейсы, через которые coordinator управляет сценой
//!
//! # Архитектура
//!
//! Coordinator никогда не ищет объекты в сцене сам: все collaborators
//! передаются явно (`&mut impl CustomizerHost`). Для ECS есть `EffectQueue`:
//! записывает вызовы как `HostEffect` events, которые presentation-системы
//! клиента читают и применяют.

use bevy::color::Srgba;
use bevy::prelude::Event;

use crate::attachment::SceneHandle;
use crate::menu::{ButtonDescriptor, ButtonId, CameraAngle, ClickRegion, MenuArea, MenuId, MenuKind, MenuNode};
use crate::paint::PaintMaterial;
use crate::variables::VariableId;

/// Нода сцены, видимость которой переключает coordinator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SceneNode {
    Menu(MenuId),
    Attachment(SceneHandle),
}

pub trait SceneVisibility {
    fn set_active(&mut self, node: SceneNode, active: bool);
}

pub trait CameraRig {
    /// Только destination - easing делает сам rig
    fn set_destination_angle(&mut self, angle: CameraAngle);
    fn set_click_region(&mut self, region: ClickRegion);
}

pub trait ColorPicker {
    /// Открыть picker для материала `material_index`; правки приходят обратно как `PaintEdit`
    fn initialize(&mut self, material: &PaintMaterial, material_index: usize);
}

pub trait MaterialSink {
    fn material_changed(&mut self, material_index: usize, material: &PaintMaterial);
}

pub trait MeterView {
    fn create_meter(&mut self, variable: VariableId, name: &str, sequence: usize);
    fn render(&mut self, variable: VariableId, base_value: f32, current_value: f32);
}

/// Button factory + widget updates
pub trait WidgetFactory {
    fn create_menu(&mut self, menu: MenuId, node: &MenuNode);
    fn create_button(&mut self, descriptor: &ButtonDescriptor);
    fn set_button_swatch(&mut self, button: ButtonId, color: Srgba);
}

/// Всё, что нужно coordinator'у от host engine
pub trait CustomizerHost:
    SceneVisibility + CameraRig + ColorPicker + MaterialSink + MeterView + WidgetFactory
{
}

impl<T> CustomizerHost for T where
    T: SceneVisibility + CameraRig + ColorPicker + MaterialSink + MeterView + WidgetFactory
{
}

/// Summary меню для presentation слоя
#[derive(Clone, Debug, PartialEq)]
pub struct MenuSummary {
    pub kind: MenuKind,
    pub name: String,
    pub display_name: String,
    pub area: MenuArea,
}

/// Записанный вызов collaborator'а
#[derive(Event, Clone, Debug, PartialEq)]
pub enum HostEffect {
    SetActive { node: SceneNode, active: bool },
    CameraDestination(CameraAngle),
    ClickRegion(ClickRegion),
    ColorPickerOpened { material_index: usize, material: PaintMaterial },
    MaterialChanged { material_index: usize, material: PaintMaterial },
    MeterCreated { variable: VariableId, name: String, sequence: usize },
    MeterRendered { variable: VariableId, base_value: f32, current_value: f32 },
    MenuCreated { menu: MenuId, summary: MenuSummary },
    ButtonCreated(ButtonDescriptor),
    ButtonSwatch { button: ButtonId, color: Srgba },
}

/// Recording host: копит effects до `drain`
#[derive(Debug, Default)]
pub struct EffectQueue {
    effects: Vec<HostEffect>,
}

impl EffectQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn effects(&self) -> &[HostEffect] {
        &self.effects
    }

    pub fn drain(&mut self) -> Vec<HostEffect> {
        std::mem::take(&mut self.effects)
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    fn push(&mut self, effect: HostEffect) {
        self.effects.push(effect);
    }
}

impl SceneVisibility for EffectQueue {
    fn set_active(&mut self, node: SceneNode, active: bool) {
        self.push(HostEffect::SetActive { node, active });
    }
}

impl CameraRig for EffectQueue {
    fn set_destination_angle(&mut self, angle: CameraAngle) {
        self.push(HostEffect::CameraDestination(angle));
    }

    fn set_click_region(&mut self, region: ClickRegion) {
        self.push(HostEffect::ClickRegion(region));
    }
}

impl ColorPicker for EffectQueue {
    fn initialize(&mut self, material: &PaintMaterial, material_index: usize) {
        self.push(HostEffect::ColorPickerOpened {
            material_index,
            material: material.clone(),
        });
    }
}

impl MaterialSink for EffectQueue {
    fn material_changed(&mut self, material_index: usize, material: &PaintMaterial) {
        self.push(HostEffect::MaterialChanged {
            material_index,
            material: material.clone(),
        });
    }
}

impl MeterView for EffectQueue {
    fn create_meter(&mut self, variable: VariableId, name: &str, sequence: usize) {
        self.push(HostEffect::MeterCreated {
            variable,
            name: name.to_string(),
            sequence,
        });
    }

    fn render(&mut self, variable: VariableId, base_value: f32, current_value: f32) {
        self.push(HostEffect::MeterRendered {
            variable,
            base_value,
            current_value,
        });
    }
}

impl WidgetFactory for EffectQueue {
    fn create_menu(&mut self, menu: MenuId, node: &MenuNode) {
        self.push(HostEffect::MenuCreated {
            menu,
            summary: MenuSummary {
                kind: node.kind,
                name: node.name.clone(),
                display_name: node.display_name.clone(),
                area: node.area,
            },
        });
    }

    fn create_button(&mut self, descriptor: &ButtonDescriptor) {
        self.push(HostEffect::ButtonCreated(descriptor.clone()));
    }

    fn set_button_swatch(&mut self, button: ButtonId, color: Srgba) {
        self.push(HostEffect::ButtonSwatch { button, color });
    }
}

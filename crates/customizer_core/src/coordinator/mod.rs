//! MenuCoordinator - ядро customizer'а
//!
//! # Архитектура
//!
//! Coordinator - единственный владелец mutable state:
//! - активность attachments (`AttachmentTable`)
//! - variable modifiers (`VariableSet`)
//! - live материалы + color picker
//! - текущее меню и последний открытый color submenu
//!
//! Все мутации идут через dispatch entry point (`dispatch` / `dispatch_raw`).
//! Collaborators передаются явно (`&mut impl CustomizerHost`); coordinator
//! никогда не ждёт их (camera easing и т.п. - их дело).
//!
//! Runtime lookup miss (неизвестное меню, unknown variable) - no-op с
//! диагностикой в лог, не ошибка.

use std::collections::HashMap;

use bevy::prelude::Resource;

use crate::attachment::{AttachmentKey, AttachmentTable, SlotId};
use crate::host::{CustomizerHost, SceneNode};
use crate::menu::*;
use crate::meter::{MeterProjection, SegmentTone};
use crate::paint::{ColorPickerState, PaintEdit, PaintMaterial};
use crate::settings::CustomizerSettings;
use crate::variables::{EffectDirection, VariableSet, VariableState};
use crate::{log, log_warning};

pub mod builder;

pub use builder::*;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod swap_tests;

#[derive(Resource, Debug)]
pub struct MenuCoordinator {
    pub(crate) tree: MenuTree,
    pub(crate) attachments: AttachmentTable,
    pub(crate) variables: VariableSet,
    pub(crate) materials: Vec<PaintMaterial>,
    /// Material index → swatch кнопка в Paint меню
    pub(crate) paint_buttons: HashMap<usize, ButtonId>,
    pub(crate) current: Option<MenuId>,
    pub(crate) last_color_submenu: usize,
    pub(crate) color_picker: Option<ColorPickerState>,
    pub(crate) projection: MeterProjection,
    pub(crate) settings: CustomizerSettings,
}

impl MenuCoordinator {
    pub fn builder() -> CoordinatorBuilder {
        CoordinatorBuilder::new()
    }

    // ============================================================================
    // Dispatch
    // ============================================================================

    pub fn dispatch(&mut self, action: ButtonAction, host: &mut impl CustomizerHost) {
        match action {
            ButtonAction::LaunchMenu(key) => self.launch(key, host),
            ButtonAction::Customize { slot, object_id } => {
                self.swap_attachment(slot, object_id, host)
            }
        }
    }

    /// Строковый dispatch (как его видят authored кнопки).
    ///
    /// `target` резолвится prefix-правилом: имя меню - префикс `target`.
    /// Неизвестные actions - no-op.
    pub fn dispatch_raw(
        &mut self,
        action: &str,
        target: &str,
        slot: i32,
        object_id: i32,
        host: &mut impl CustomizerHost,
    ) {
        match action {
            ACTION_LAUNCH_MENU => match self.resolve_target(target) {
                Some(key) => self.launch(key, host),
                None => log(&format!("No menu matches target {target:?}")),
            },
            ACTION_CUSTOMIZE => match usize::try_from(slot) {
                Ok(slot) => self.swap_attachment(SlotId(slot), object_id, host),
                Err(_) => log(&format!("Ignoring customize with negative slot {slot}")),
            },
            other => log(&format!("Ignoring unknown action {other:?}")),
        }
    }

    /// Prefix lookup → структурный ключ. `PSM_<i>` → `ColorSubmenu(i)`.
    pub fn resolve_target(&self, target: &str) -> Option<MenuKey> {
        let node = self.tree.get(self.tree.find_by_prefix(target)?)?;

        match node.key {
            MenuKey::PaintSubmenu => match MenuKey::parse_color_key(target) {
                Ok(index) => Some(MenuKey::ColorSubmenu(index)),
                Err(e) => {
                    log_warning(&format!("{e}"));
                    None
                }
            },
            key => Some(key),
        }
    }

    // ============================================================================
    // Navigation
    // ============================================================================

    /// Открыть меню: ровно одно меню активно после вызова.
    pub fn launch(&mut self, key: MenuKey, host: &mut impl CustomizerHost) {
        let Some(target) = self.tree.find(key) else {
            log(&format!("Menu {key} not found"));
            return;
        };

        if let MenuKey::ColorSubmenu(index) = key {
            if index >= self.materials.len() {
                log_warning(&format!("Color submenu {index} has no material"));
                return;
            }
        }

        let Some(node) = self.tree.get(target) else {
            return;
        };
        let angle = node.camera_angle;
        let region = node.click_region.normalized();
        let kind = node.kind;

        for (id, _) in self.tree.iter() {
            host.set_active(SceneNode::Menu(id), id == target);
        }

        if angle.is_managed() {
            host.set_destination_angle(angle);
        }

        if let MenuKey::ColorSubmenu(index) = key {
            let material = &self.materials[index];
            self.color_picker = Some(ColorPickerState::open(index, material));
            self.last_color_submenu = index;

            if let Some(node) = self.tree.get_mut(target) {
                node.display_name = material.label();
            }
            host.initialize(material, index);
        }

        self.current = Some(target);
        host.set_click_region(region);

        if kind == MenuKind::Paint {
            self.refresh_paint_swatch(host);
        }
    }

    /// Swatch последнего редактированного материала → live цвет
    fn refresh_paint_swatch(&mut self, host: &mut impl CustomizerHost) {
        let index = self.last_color_submenu;
        let (Some(&button), Some(material)) =
            (self.paint_buttons.get(&index), self.materials.get(index))
        else {
            return;
        };

        let color = material.color;
        if let Some(descriptor) = self.tree.button_mut(button) {
            descriptor.swatch = Some(color);
        }
        host.set_button_swatch(button, color);
    }

    // ============================================================================
    // Attachments
    // ============================================================================

    /// Сделать `object_id` единственным активным attachment в слоте.
    ///
    /// Effects применяются только на переходе (inactive → active: `+delta`,
    /// active → inactive: `-delta`), поэтому повторный вызов ничего не меняет.
    pub fn swap_attachment(&mut self, slot: SlotId, object_id: i32, host: &mut impl CustomizerHost) {
        let keys: Vec<AttachmentKey> = self.attachments.in_slot(slot).map(|d| d.key).collect();

        for key in keys {
            let active = key.object_id == object_id;
            let was_active = self.attachments.set_active(key, active);

            let Some(def) = self.attachments.get(key) else {
                continue;
            };

            if was_active != active {
                let direction = if active {
                    EffectDirection::Apply
                } else {
                    EffectDirection::Revert
                };
                self.variables.apply_effects(&def.effects, direction);
            }

            for &handle in &def.handles {
                host.set_active(SceneNode::Attachment(handle), active);
            }
        }

        self.recompute_meters(host);
    }

    /// Push (base, current) для каждой переменной
    pub fn recompute_meters(&self, host: &mut impl CustomizerHost) {
        for (id, state) in self.variables.iter() {
            host.render(id, state.base_value, state.current());
        }
    }

    // ============================================================================
    // Paint
    // ============================================================================

    /// Правка из color picker'а; действует только пока открыт paint submenu.
    pub fn apply_paint_edit(&mut self, edit: PaintEdit, host: &mut impl CustomizerHost) {
        if self.current_key() != Some(MenuKey::PaintSubmenu) {
            log(&format!("Paint edit {edit:?} ignored: color picker closed"));
            return;
        }

        let Some(picker) = self.color_picker.as_mut() else {
            return;
        };
        let index = picker.material_index;
        let Some(material) = self.materials.get_mut(index) else {
            return;
        };

        picker.apply(edit, material);
        host.material_changed(index, material);
    }

    // ============================================================================
    // Queries
    // ============================================================================

    pub fn menus(&self) -> &MenuTree {
        &self.tree
    }

    pub fn current_menu(&self) -> Option<&MenuNode> {
        self.tree.get(self.current?)
    }

    pub fn current_key(&self) -> Option<MenuKey> {
        self.current_menu().map(|n| n.key)
    }

    pub fn attachments(&self) -> &AttachmentTable {
        &self.attachments
    }

    pub fn is_attachment_active(&self, slot: SlotId, object_id: i32) -> bool {
        self.attachments.is_active(AttachmentKey::new(slot, object_id))
    }

    pub fn variables(&self) -> &VariableSet {
        &self.variables
    }

    pub fn variable(&self, name: &str) -> Option<&VariableState> {
        self.variables.get(name)
    }

    /// Сегменты meter'а переменной
    pub fn meter_tones(&self, name: &str) -> Option<Vec<SegmentTone>> {
        let state = self.variables.get(name)?;
        Some(self.projection.project(state.base_value, state.current()))
    }

    pub fn projection(&self) -> &MeterProjection {
        &self.projection
    }

    pub fn materials(&self) -> &[PaintMaterial] {
        &self.materials
    }

    pub fn color_picker(&self) -> Option<&ColorPickerState> {
        self.color_picker.as_ref()
    }

    pub fn last_color_submenu(&self) -> usize {
        self.last_color_submenu
    }

    pub fn settings(&self) -> &CustomizerSettings {
        &self.settings
    }
}

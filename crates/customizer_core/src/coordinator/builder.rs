//! Построение menu tree + attachment index + variable trackers
//!
//! # Flow
//! 1. Проверить collaborators (object definition обязателен)
//! 2. Создать ноды: root → category menus → paint submenu
//! 3. Зарегистрировать attachments (default choice = object_id 0, без effects)
//! 4. Создать кнопки (navigation / back / attachment / paint swatch)
//! 5. Создать variable trackers + meters
//! 6. Отдать host'у widgets и открыть root menu

use std::collections::HashMap;

use bevy::math::Vec2;

use crate::attachment::{AttachmentKey, AttachmentTable, SceneHandle, SlotId};
use crate::coordinator::MenuCoordinator;
use crate::definitions::{AttachmentSource, ObjectDefinition, ViewMode};
use crate::error::ConfigError;
use crate::host::{CustomizerHost, SceneNode};
use crate::menu::*;
use crate::meter::MeterProjection;
use crate::paint::PaintMaterial;
use crate::settings::{ButtonStyle, CustomizerSettings};
use crate::variables::VariableSet;
use crate::{log_info, log_warning};

/// Подпись back-кнопки
pub const BACK_LABEL: &str = "BACK";

/// Заголовок paint submenu до открытия конкретного материала
pub const PAINT_SUBMENU_TITLE: &str = "COLOR";

#[derive(Debug, Default)]
pub struct CoordinatorBuilder {
    definition: Option<ObjectDefinition>,
    settings: CustomizerSettings,
    attachments: Vec<(AttachmentSource, SceneHandle)>,
}

impl CoordinatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn definition(mut self, definition: ObjectDefinition) -> Self {
        self.definition = Some(definition);
        self
    }

    pub fn settings(mut self, settings: CustomizerSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Обнаруженный в сцене attachment instance
    pub fn attachment(mut self, source: AttachmentSource, handle: SceneHandle) -> Self {
        self.attachments.push((source, handle));
        self
    }

    pub fn attachments(
        mut self,
        instances: impl IntoIterator<Item = (AttachmentSource, SceneHandle)>,
    ) -> Self {
        self.attachments.extend(instances);
        self
    }

    /// Headless режим: instances берутся из самого definition, handle = порядковый номер
    pub fn attachments_from_definition(mut self) -> Self {
        if let Some(definition) = &self.definition {
            let instances = definition
                .attachments
                .iter()
                .cloned()
                .enumerate()
                .map(|(i, source)| (source, SceneHandle(i as u64)));
            self.attachments.extend(instances);
        }
        self
    }

    pub fn build(self, host: &mut impl CustomizerHost) -> Result<MenuCoordinator, ConfigError> {
        let definition = self
            .definition
            .ok_or(ConfigError::MissingCollaborator("object definition"))?;
        let settings = self.settings;
        let style = settings.button;

        for menu in &definition.menus {
            if menu.name.starts_with(PAINT_SUBMENU_NAME) {
                return Err(ConfigError::ReservedMenuName(menu.name.clone()));
            }
        }

        // === 1. Ноды ===
        let mut tree = MenuTree::new();
        let root = tree.insert(MenuNode::new(
            MenuKey::Root,
            MenuKind::Root,
            definition.root_menu_name.as_str(),
            definition.root_display_name.as_str(),
            ViewMode::Unmanaged,
            MenuArea::Bottom,
        ))?;

        let mut categories = Vec::with_capacity(definition.menus.len());
        let mut paint_category = None;
        for (index, menu) in definition.menus.iter().enumerate() {
            let kind = if menu.name == PAINT_MENU_NAME {
                MenuKind::Paint
            } else {
                MenuKind::Attachments
            };
            let mut node = MenuNode::new(
                MenuKey::Category(index),
                kind,
                menu.name.as_str(),
                menu.display_name.as_str(),
                menu.view,
                MenuArea::Bottom,
            );
            node.icon = menu.icon.clone();

            let id = tree.insert(node)?;
            if kind == MenuKind::Paint && paint_category.is_none() {
                paint_category = Some((index, id));
            }
            categories.push(id);
        }

        let paint_submenu = match paint_category {
            Some(_) => Some(tree.insert(MenuNode::new(
                MenuKey::PaintSubmenu,
                MenuKind::PaintSubmenu,
                PAINT_SUBMENU_NAME,
                PAINT_SUBMENU_TITLE,
                ViewMode::Unmanaged,
                MenuArea::Left,
            ))?),
            None => None,
        };

        tree.validate_prefixes()?;

        // === 2. Attachments ===
        let slots: HashMap<&str, SlotId> = definition
            .menus
            .iter()
            .enumerate()
            .filter(|(_, m)| m.name != PAINT_MENU_NAME)
            .map(|(i, m)| (m.name.as_str(), SlotId(i)))
            .collect();

        let mut attachments = AttachmentTable::new();
        for (source, handle) in &self.attachments {
            // Default choice видим сразу, effects не применяются (baseline)
            host.set_active(SceneNode::Attachment(*handle), source.object_id == 0);

            let Some(&slot) = slots.get(source.list.as_str()) else {
                log_warning(&format!(
                    "Attachment {:?} refers to unknown list {:?}, not selectable",
                    source.display_name, source.list
                ));
                continue;
            };
            attachments.register(AttachmentKey::new(slot, source.object_id), source, *handle)?;
        }

        // === 3. Кнопки ===
        let mut order: Vec<usize> = (0..definition.menus.len()).collect();
        order.sort_by_key(|&i| (definition.menus[i].sequence_id, i));

        for (sequence, &index) in order.iter().enumerate() {
            let menu = &definition.menus[index];
            push_button(
                &mut tree,
                root,
                ButtonRole::Navigation,
                ButtonAction::LaunchMenu(MenuKey::Category(index)),
                menu.name.clone(),
                menu.display_name.clone(),
                menu.icon.clone(),
                style.position(sequence),
                &style,
            );
        }

        let materials: Vec<PaintMaterial> =
            definition.materials.iter().map(PaintMaterial::from_def).collect();
        let mut paint_buttons = HashMap::new();

        for (index, &menu_id) in categories.iter().enumerate() {
            push_back_button(&mut tree, menu_id, MenuKey::Root, &definition.root_menu_name, &style);

            if Some(menu_id) == paint_category.map(|(_, id)| id) {
                for (material_index, material) in materials.iter().enumerate() {
                    let button = push_button(
                        &mut tree,
                        menu_id,
                        ButtonRole::PaintSwatch,
                        ButtonAction::LaunchMenu(MenuKey::ColorSubmenu(material_index)),
                        MenuKey::color_key(material_index),
                        material.label(),
                        None,
                        style.position(material_index),
                        &style,
                    );
                    if let Some(descriptor) = tree.button_mut(button) {
                        descriptor.swatch = Some(material.color);
                    }
                    paint_buttons.insert(material_index, button);
                }
            } else {
                add_attachment_buttons(&mut tree, menu_id, SlotId(index), &attachments, &style);
            }
        }

        if let (Some(submenu), Some((paint_index, _))) = (paint_submenu, paint_category) {
            push_back_button(
                &mut tree,
                submenu,
                MenuKey::Category(paint_index),
                PAINT_MENU_NAME,
                &style,
            );
        }

        // === 4. Variables ===
        let variables = VariableSet::from_defs(&definition.variables);
        for (id, state) in variables.iter() {
            host.create_meter(id, &state.name, id.0);
            host.render(id, state.base_value, state.current());
        }

        // === 5. Widgets ===
        for (id, node) in tree.iter() {
            host.create_menu(id, node);
            for button in &node.buttons {
                host.create_button(button);
            }
        }

        log_info(&format!(
            "Customizer built: {} menus, {} attachments, {} variables, {} materials",
            tree.len(),
            attachments.len(),
            variables.len(),
            materials.len()
        ));

        let mut coordinator = MenuCoordinator {
            tree,
            attachments,
            variables,
            materials,
            paint_buttons,
            current: None,
            last_color_submenu: 0,
            color_picker: None,
            projection: MeterProjection::new(settings.meter_segments, settings.meter_bucket_width),
            settings,
        };

        coordinator.launch(MenuKey::Root, host);
        Ok(coordinator)
    }
}

#[allow(clippy::too_many_arguments)]
fn push_button(
    tree: &mut MenuTree,
    menu: MenuId,
    role: ButtonRole,
    action: ButtonAction,
    target_name: String,
    label: String,
    icon: Option<crate::definitions::IconId>,
    position: Vec2,
    style: &ButtonStyle,
) -> ButtonId {
    let Some(node) = tree.get_mut(menu) else {
        return ButtonId { menu, index: usize::MAX };
    };

    let id = ButtonId { menu, index: node.buttons.len() };
    node.buttons.push(ButtonDescriptor {
        id,
        role,
        action,
        target_name,
        label,
        icon,
        position,
        size: Vec2::new(style.width, style.height),
        swatch: None,
    });
    id
}

fn push_back_button(tree: &mut MenuTree, menu: MenuId, target: MenuKey, target_name: &str, style: &ButtonStyle) {
    push_button(
        tree,
        menu,
        ButtonRole::Back,
        ButtonAction::LaunchMenu(target),
        target_name.to_string(),
        BACK_LABEL.to_string(),
        None,
        style.back_position(),
        style,
    );
}

/// Одна кнопка на attachment слота.
///
/// Дубли (display_name, object_id) сюда не доходят: `AttachmentTable::register`
/// уже слил строки с одинаковым (slot, object_id) в один `AttachmentDef`,
/// а расхождение display_name отклонил как `ConflictingAttachment`.
fn add_attachment_buttons(
    tree: &mut MenuTree,
    menu: MenuId,
    slot: SlotId,
    attachments: &AttachmentTable,
    style: &ButtonStyle,
) {
    for def in attachments.in_slot(slot) {
        if let Some(node) = tree.get_mut(menu) {
            node.attachments.push(def.key);
        }

        push_button(
            tree,
            menu,
            ButtonRole::Attachment,
            ButtonAction::customize(def.key),
            def.display_name.clone(),
            def.display_name.clone(),
            def.icon.clone(),
            style.position(def.key.object_id.max(0) as usize),
            style,
        );
    }
}

//! Shared fixtures для coordinator тестов

use std::collections::HashMap;

use crate::attachment::SceneHandle;
use crate::coordinator::MenuCoordinator;
use crate::definitions::{AttachmentSource, ObjectDefinition, VariableEffect};
use crate::host::{EffectQueue, HostEffect, SceneNode};
use crate::menu::MenuId;

/// Slots fixture'а: Wheels = 0, Bumper = 1, Paint = 2
pub const FIXTURE_RON: &str = r#"(
    min_distance: 4.0,
    max_distance: 12.0,
    materials: [
        (name: "Body", color: (1.0, 0.0, 0.0, 1.0)),
        (name: "Rims", color: (0.5, 0.5, 0.5, 1.0), metallic: 0.9),
    ],
    menus: [
        (sequence_id: 1, name: "Wheels", display_name: "WHEELS", view: Left),
        (sequence_id: 0, name: "Bumper", display_name: "BUMPER", view: Front),
        (sequence_id: 2, name: "Paint", display_name: "PAINT", view: Isometric),
    ],
    variables: [
        (name: "Speed", base_value: 50.0),
        (name: "Handling", base_value: 50.0),
    ],
)"#;

pub fn source(list: &str, object_id: i32, name: &str, effects: &[(&str, f32)]) -> AttachmentSource {
    AttachmentSource {
        list: list.to_string(),
        object_id,
        display_name: name.to_string(),
        icon: None,
        effects: effects
            .iter()
            .map(|(variable, delta)| VariableEffect {
                variable: variable.to_string(),
                delta: *delta,
            })
            .collect(),
        visual: None,
    }
}

/// Definition с тремя колёсами {0, 1, 2} и двумя бамперами
pub fn fixture_definition() -> ObjectDefinition {
    let mut definition = ObjectDefinition::from_ron_str(FIXTURE_RON).unwrap();
    definition.attachments = vec![
        source("Wheels", 0, "STOCK", &[]),
        source("Wheels", 1, "OFFROAD", &[("Speed", -12.0), ("Handling", 4.0)]),
        source("Wheels", 2, "RACING", &[("Speed", 12.0)]),
        source("Bumper", 0, "NONE", &[]),
        source("Bumper", 1, "BULL BAR", &[("Weight", 5.0), ("Handling", -3.0)]),
    ];
    definition
}

/// Handle attachment'а = его индекс в `definition.attachments`
pub fn handle(index: u64) -> SceneHandle {
    SceneHandle(index)
}

pub fn build_fixture() -> (MenuCoordinator, EffectQueue) {
    let mut queue = EffectQueue::new();
    let coordinator = MenuCoordinator::builder()
        .definition(fixture_definition())
        .attachments_from_definition()
        .build(&mut queue)
        .unwrap();
    (coordinator, queue)
}

/// Итоговая видимость нод после последовательности effects
pub fn visibility(effects: &[HostEffect]) -> HashMap<SceneNode, bool> {
    let mut state = HashMap::new();
    for effect in effects {
        if let HostEffect::SetActive { node, active } = effect {
            state.insert(*node, *active);
        }
    }
    state
}

pub fn active_menus(effects: &[HostEffect]) -> Vec<MenuId> {
    let mut menus: Vec<MenuId> = visibility(effects)
        .into_iter()
        .filter_map(|(node, active)| match node {
            SceneNode::Menu(id) if active => Some(id),
            _ => None,
        })
        .collect();
    menus.sort();
    menus
}

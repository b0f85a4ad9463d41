//! Attachments: выбираемые части объекта, сгруппированные по slot'ам
//!
//! # Инварианты
//! - внутри одного slot активен максимум один attachment
//! - (slot, object_id) уникально идентифицирует логический attachment
//! - activation state живёт в `AttachmentTable`, а не на scene node

use std::collections::HashMap;

use crate::definitions::{AttachmentSource, IconId, VariableEffect};
use crate::error::ConfigError;

/// Slot (exclusivity group) = индекс меню в `ObjectDefinition::menus`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub usize);

/// Opaque handle на scene instance (для Bevy - `Entity::to_bits()`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SceneHandle(pub u64);

/// Identity логического attachment
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AttachmentKey {
    pub slot: SlotId,
    pub object_id: i32,
}

impl AttachmentKey {
    pub fn new(slot: SlotId, object_id: i32) -> Self {
        Self { slot, object_id }
    }

    /// object_id 0 - default choice slot'а, активен сразу после построения
    pub fn is_default(&self) -> bool {
        self.object_id == 0
    }
}

/// Логический attachment (один выбор в slot'е) + все его scene instances
#[derive(Clone, Debug, PartialEq)]
pub struct AttachmentDef {
    pub key: AttachmentKey,
    pub display_name: String,
    pub icon: Option<IconId>,
    pub effects: Vec<VariableEffect>,
    pub handles: Vec<SceneHandle>,
}

impl AttachmentDef {
    fn from_source(key: AttachmentKey, source: &AttachmentSource, handle: SceneHandle) -> Self {
        Self {
            key,
            display_name: source.display_name.clone(),
            icon: source.icon.clone(),
            effects: source.effects.clone(),
            handles: vec![handle],
        }
    }

    /// Тот же выбор (display data + effects), что и у `source`
    fn matches(&self, source: &AttachmentSource) -> bool {
        self.display_name == source.display_name
            && self.icon == source.icon
            && self.effects == source.effects
    }
}

/// Все attachments объекта + activation map (slot, object_id) → bool
#[derive(Debug, Default)]
pub struct AttachmentTable {
    defs: Vec<AttachmentDef>,
    index: HashMap<AttachmentKey, usize>,
    active: HashMap<AttachmentKey, bool>,
}

impl AttachmentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Зарегистрировать обнаруженный scene instance.
    ///
    /// Instances с одинаковым ключом объединяются (общие handles); расхождение
    /// в display data/effects - ошибка конфигурации.
    pub fn register(
        &mut self,
        key: AttachmentKey,
        source: &AttachmentSource,
        handle: SceneHandle,
    ) -> Result<(), ConfigError> {
        if let Some(&existing) = self.index.get(&key) {
            let def = &mut self.defs[existing];
            if !def.matches(source) {
                return Err(ConfigError::ConflictingAttachment {
                    slot: key.slot,
                    object_id: key.object_id,
                });
            }
            def.handles.push(handle);
            return Ok(());
        }

        self.index.insert(key, self.defs.len());
        self.defs.push(AttachmentDef::from_source(key, source, handle));
        self.active.insert(key, key.is_default());
        Ok(())
    }

    pub fn get(&self, key: AttachmentKey) -> Option<&AttachmentDef> {
        self.index.get(&key).map(|&i| &self.defs[i])
    }

    pub fn is_active(&self, key: AttachmentKey) -> bool {
        self.active.get(&key).copied().unwrap_or(false)
    }

    /// Выставить флаг; возвращает предыдущее значение
    pub fn set_active(&mut self, key: AttachmentKey, active: bool) -> bool {
        self.active.insert(key, active).unwrap_or(false)
    }

    /// Attachments slot'а в порядке обнаружения
    pub fn in_slot(&self, slot: SlotId) -> impl Iterator<Item = &AttachmentDef> {
        self.defs.iter().filter(move |d| d.key.slot == slot)
    }

    /// Активный attachment slot'а (если есть)
    pub fn active_in_slot(&self, slot: SlotId) -> Option<&AttachmentDef> {
        self.in_slot(slot).find(|d| self.is_active(d.key))
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttachmentDef> {
        self.defs.iter()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(display_name: &str, object_id: i32, delta: f32) -> AttachmentSource {
        AttachmentSource {
            list: "Wheels".into(),
            object_id,
            display_name: display_name.into(),
            icon: None,
            effects: vec![VariableEffect { variable: "Speed".into(), delta }],
            visual: None,
        }
    }

    #[test]
    fn test_register_groups_instances() {
        let mut table = AttachmentTable::new();
        let key = AttachmentKey::new(SlotId(0), 1);

        table.register(key, &source("OFFROAD", 1, 5.0), SceneHandle(10)).unwrap();
        table.register(key, &source("OFFROAD", 1, 5.0), SceneHandle(11)).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(key).unwrap().handles, vec![SceneHandle(10), SceneHandle(11)]);
    }

    #[test]
    fn test_register_conflict() {
        let mut table = AttachmentTable::new();
        let key = AttachmentKey::new(SlotId(0), 1);

        table.register(key, &source("OFFROAD", 1, 5.0), SceneHandle(10)).unwrap();
        let result = table.register(key, &source("OFFROAD", 1, 7.0), SceneHandle(11));

        assert!(matches!(
            result,
            Err(ConfigError::ConflictingAttachment { slot: SlotId(0), object_id: 1 })
        ));
    }

    #[test]
    fn test_default_activation() {
        let mut table = AttachmentTable::new();
        for id in 0..3 {
            let key = AttachmentKey::new(SlotId(0), id);
            table.register(key, &source("PART", id, 0.0), SceneHandle(id as u64)).unwrap();
        }

        assert!(table.is_active(AttachmentKey::new(SlotId(0), 0)));
        assert!(!table.is_active(AttachmentKey::new(SlotId(0), 1)));
        assert_eq!(table.active_in_slot(SlotId(0)).unwrap().key.object_id, 0);
        assert!(table.active_in_slot(SlotId(1)).is_none());
    }
}

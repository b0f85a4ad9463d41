//! Menu tree: плоский индекс всех меню
//!
//! # Архитектура
//!
//! - `MenuNode` - один экран (кнопки, camera view, click region)
//! - `MenuTree` - владеет всеми нодами; lookup по `MenuKey`, по точному имени
//!   и по prefix (строковый dispatch)
//! - Ноды создаются один раз при построении и живут всю сессию
//!
//! Prefix lookup: нода совпадает, если её **имя является префиксом цели**
//! (`target.starts_with(name)`), а не наоборот. Имена обязаны быть попарно
//! непересекающимися под этим правилом - проверяется в `validate_prefixes`.

use std::collections::HashMap;

use crate::error::ConfigError;

pub mod button;
pub mod key;
pub mod node;

pub use button::*;
pub use key::*;
pub use node::*;

/// Индекс ноды в `MenuTree`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MenuId(pub usize);

#[derive(Debug, Default)]
pub struct MenuTree {
    nodes: Vec<MenuNode>,
    by_name: HashMap<String, MenuId>,
    by_key: HashMap<MenuKey, MenuId>,
}

impl MenuTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Добавить ноду; имя должно быть уникальным
    pub fn insert(&mut self, node: MenuNode) -> Result<MenuId, ConfigError> {
        if self.by_name.contains_key(&node.name) {
            return Err(ConfigError::DuplicateMenuName(node.name));
        }

        let id = MenuId(self.nodes.len());
        self.by_name.insert(node.name.clone(), id);
        self.by_key.insert(node.key, id);
        self.nodes.push(node);
        Ok(id)
    }

    /// Ни одно имя не должно быть префиксом другого
    pub fn validate_prefixes(&self) -> Result<(), ConfigError> {
        for a in &self.nodes {
            for b in &self.nodes {
                if !std::ptr::eq(a, b) && b.name.starts_with(&a.name) {
                    return Err(ConfigError::OverlappingMenuName {
                        name: a.name.clone(),
                        other: b.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Нода для ключа (ColorSubmenu → PaintSubmenu)
    pub fn find(&self, key: MenuKey) -> Option<MenuId> {
        self.by_key.get(&key.group()).copied()
    }

    pub fn find_by_name(&self, name: &str) -> Option<MenuId> {
        self.by_name.get(name).copied()
    }

    /// Первая нода, чьё имя - префикс `target`
    pub fn find_by_prefix(&self, target: &str) -> Option<MenuId> {
        self.nodes
            .iter()
            .position(|n| target.starts_with(n.name.as_str()))
            .map(MenuId)
    }

    pub fn get(&self, id: MenuId) -> Option<&MenuNode> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: MenuId) -> Option<&mut MenuNode> {
        self.nodes.get_mut(id.0)
    }

    pub fn button(&self, id: ButtonId) -> Option<&ButtonDescriptor> {
        self.get(id.menu)?.buttons.get(id.index)
    }

    pub fn button_mut(&mut self, id: ButtonId) -> Option<&mut ButtonDescriptor> {
        self.get_mut(id.menu)?.buttons.get_mut(id.index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (MenuId, &MenuNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (MenuId(i), n))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

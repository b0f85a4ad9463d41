//! Configuration errors
//!
//! Все ошибки здесь - fatal на этапе построения (startup). Runtime lookup miss
//! (меню не найдено, переменная не существует) ошибкой НЕ является: это no-op.

use crate::attachment::SlotId;

/// Ошибка конфигурации customizer (построение дерева меню / загрузка данных)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Required collaborator is missing: {0}")]
    MissingCollaborator(&'static str),

    #[error("Collaborator lookup is ambiguous (more than one instance): {0}")]
    AmbiguousCollaborator(&'static str),

    #[error("Menu name is used more than once: {0:?}")]
    DuplicateMenuName(String),

    #[error("Menu name {name:?} overlaps {other:?} under prefix lookup")]
    OverlappingMenuName { name: String, other: String },

    #[error("Menu name is reserved for the paint submenu family: {0:?}")]
    ReservedMenuName(String),

    #[error("Malformed color submenu key: {0:?}")]
    MalformedColorKey(String),

    #[error("Attachments sharing slot {slot:?} and object id {object_id} disagree on display data or effects")]
    ConflictingAttachment { slot: SlotId, object_id: i32 },

    #[error("Failed to parse object definition: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("Failed to read object definition: {0}")]
    Io(#[from] std::io::Error),
}

/// Scene-singleton lookup → явный результат.
///
/// Ноль кандидатов → `MissingCollaborator`, больше одного → `AmbiguousCollaborator`.
pub fn require_single<T>(
    candidates: impl IntoIterator<Item = T>,
    what: &'static str,
) -> Result<T, ConfigError> {
    let mut iter = candidates.into_iter();
    let Some(first) = iter.next() else {
        return Err(ConfigError::MissingCollaborator(what));
    };
    if iter.next().is_some() {
        return Err(ConfigError::AmbiguousCollaborator(what));
    }
    Ok(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_single() {
        assert_eq!(require_single(vec![7], "camera rig").unwrap(), 7);

        let missing = require_single(Vec::<u8>::new(), "camera rig");
        assert!(matches!(missing, Err(ConfigError::MissingCollaborator("camera rig"))));

        let ambiguous = require_single(vec![1, 2], "menu root");
        assert!(matches!(ambiguous, Err(ConfigError::AmbiguousCollaborator("menu root"))));
    }
}

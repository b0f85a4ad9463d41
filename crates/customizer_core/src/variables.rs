//! Variable tracking: base value + cumulative modifier от активных attachments
//!
//! current = base + modifier, без clamp (может выйти за 0–100; meter это переживёт).

use crate::definitions::{VariableDef, VariableEffect};

/// Индекс переменной (= её sequence, порядок в definition)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VariableId(pub usize);

#[derive(Clone, Debug, PartialEq)]
pub struct VariableState {
    pub name: String,
    pub base_value: f32,
    pub modifier: f32,
}

impl VariableState {
    pub fn new(def: &VariableDef) -> Self {
        Self {
            name: def.name.clone(),
            base_value: def.base_value,
            modifier: 0.0,
        }
    }

    pub fn current(&self) -> f32 {
        self.base_value + self.modifier
    }
}

/// Направление применения effects
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectDirection {
    /// attachment стал активным
    Apply,
    /// attachment перестал быть активным
    Revert,
}

#[derive(Clone, Debug, Default)]
pub struct VariableSet {
    states: Vec<VariableState>,
}

impl VariableSet {
    pub fn from_defs(defs: &[VariableDef]) -> Self {
        Self {
            states: defs.iter().map(VariableState::new).collect(),
        }
    }

    /// Применить/откатить effects. Неизвестное имя переменной игнорируется.
    pub fn apply_effects(&mut self, effects: &[VariableEffect], direction: EffectDirection) {
        for effect in effects {
            for state in self.states.iter_mut().filter(|s| s.name == effect.variable) {
                match direction {
                    EffectDirection::Apply => state.modifier += effect.delta,
                    EffectDirection::Revert => state.modifier -= effect.delta,
                }
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&VariableState> {
        self.states.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariableId, &VariableState)> {
        self.states.iter().enumerate().map(|(i, s)| (VariableId(i), s))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set() -> VariableSet {
        VariableSet::from_defs(&[
            VariableDef { name: "Speed".into(), base_value: 50.0 },
            VariableDef { name: "Weight".into(), base_value: 30.0 },
        ])
    }

    fn effect(variable: &str, delta: f32) -> VariableEffect {
        VariableEffect { variable: variable.into(), delta }
    }

    #[test]
    fn test_apply_and_revert_conserves_modifier() {
        let mut vars = set();
        let effects = vec![effect("Speed", 0.1), effect("Weight", -7.3)];

        vars.apply_effects(&effects, EffectDirection::Apply);
        assert_eq!(vars.get("Speed").unwrap().modifier, 0.1);
        assert_eq!(vars.get("Weight").unwrap().current(), 30.0 - 7.3);

        vars.apply_effects(&effects, EffectDirection::Revert);
        assert_eq!(vars.get("Speed").unwrap().modifier, 0.0);
        assert_eq!(vars.get("Weight").unwrap().modifier, 0.0);
    }

    #[test]
    fn test_unknown_variable_ignored() {
        let mut vars = set();
        vars.apply_effects(&[effect("Armor", 10.0)], EffectDirection::Apply);

        assert!(vars.iter().all(|(_, s)| s.modifier == 0.0));
        assert!(vars.get("Armor").is_none());
    }

    #[test]
    fn test_current_is_not_clamped() {
        let mut vars = set();
        vars.apply_effects(&[effect("Speed", 80.0)], EffectDirection::Apply);
        assert_eq!(vars.get("Speed").unwrap().current(), 130.0);
    }
}

//! Tests for attachment swap, variable recompute and meter projection.

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::super::*;
    use crate::host::{EffectQueue, HostEffect};
    use crate::variables::VariableId;

    const WHEELS: SlotId = SlotId(0);
    const BUMPER: SlotId = SlotId(1);

    fn modifiers(coordinator: &MenuCoordinator) -> Vec<f32> {
        coordinator.variables().iter().map(|(_, s)| s.modifier).collect()
    }

    fn active_ids(coordinator: &MenuCoordinator, slot: SlotId) -> Vec<i32> {
        coordinator
            .attachments()
            .in_slot(slot)
            .filter(|d| coordinator.attachments().is_active(d.key))
            .map(|d| d.key.object_id)
            .collect()
    }

    #[test]
    fn test_default_activation_after_build() {
        let (coordinator, queue) = build_fixture();

        assert_eq!(active_ids(&coordinator, WHEELS), vec![0]);
        assert_eq!(active_ids(&coordinator, BUMPER), vec![0]);
        assert!(modifiers(&coordinator).iter().all(|&m| m == 0.0));

        let visible = visibility(queue.effects());
        assert_eq!(visible.get(&SceneNode::Attachment(handle(0))), Some(&true));
        assert_eq!(visible.get(&SceneNode::Attachment(handle(1))), Some(&false));
        assert_eq!(visible.get(&SceneNode::Attachment(handle(2))), Some(&false));
    }

    #[test]
    fn test_initial_meters_render_baseline() {
        let (_, queue) = build_fixture();

        assert!(queue.effects().contains(&HostEffect::MeterRendered {
            variable: VariableId(0),
            base_value: 50.0,
            current_value: 50.0,
        }));
    }

    #[test]
    fn test_swap_is_exclusive() {
        let (mut coordinator, _) = build_fixture();
        let mut queue = EffectQueue::new();

        coordinator.swap_attachment(WHEELS, 1, &mut queue);
        coordinator.swap_attachment(WHEELS, 2, &mut queue);

        assert_eq!(active_ids(&coordinator, WHEELS), vec![2]);
        assert_eq!(active_ids(&coordinator, BUMPER), vec![0]);

        let visible = visibility(queue.effects());
        assert_eq!(visible.get(&SceneNode::Attachment(handle(0))), Some(&false));
        assert_eq!(visible.get(&SceneNode::Attachment(handle(1))), Some(&false));
        assert_eq!(visible.get(&SceneNode::Attachment(handle(2))), Some(&true));
    }

    #[test]
    fn test_swap_applies_and_reverts_effects() {
        let (mut coordinator, _) = build_fixture();
        let mut queue = EffectQueue::new();

        coordinator.swap_attachment(WHEELS, 1, &mut queue);
        assert_eq!(coordinator.variable("Speed").unwrap().modifier, -12.0);
        assert_eq!(coordinator.variable("Handling").unwrap().modifier, 4.0);

        // OFFROAD → RACING: -(-12) + 12, handling откатывается
        coordinator.swap_attachment(WHEELS, 2, &mut queue);
        assert_eq!(coordinator.variable("Speed").unwrap().modifier, 12.0);
        assert_eq!(coordinator.variable("Handling").unwrap().modifier, 0.0);
        assert_eq!(coordinator.variable("Speed").unwrap().current(), 62.0);
    }

    #[test]
    fn test_swap_is_idempotent() {
        let (mut coordinator, _) = build_fixture();
        let mut queue = EffectQueue::new();

        coordinator.swap_attachment(WHEELS, 1, &mut queue);
        let first = modifiers(&coordinator);

        coordinator.swap_attachment(WHEELS, 1, &mut queue);
        assert_eq!(modifiers(&coordinator), first);
        assert_eq!(active_ids(&coordinator, WHEELS), vec![1]);
    }

    #[test]
    fn test_activate_then_deactivate_conserves_modifier() {
        let (mut coordinator, _) = build_fixture();
        let mut queue = EffectQueue::new();
        let before = modifiers(&coordinator);

        coordinator.swap_attachment(BUMPER, 1, &mut queue);
        assert_eq!(coordinator.variable("Handling").unwrap().modifier, -3.0);

        coordinator.swap_attachment(BUMPER, 0, &mut queue);
        assert_eq!(modifiers(&coordinator), before);
    }

    #[test]
    fn test_unknown_variable_effect_ignored() {
        let (mut coordinator, _) = build_fixture();

        // BULL BAR трогает "Weight", которой нет в definition
        coordinator.swap_attachment(BUMPER, 1, &mut EffectQueue::new());

        assert!(coordinator.variable("Weight").is_none());
        assert_eq!(coordinator.variables().len(), 2);
    }

    #[test]
    fn test_swap_rerenders_every_meter() {
        let (mut coordinator, _) = build_fixture();
        let mut queue = EffectQueue::new();

        coordinator.swap_attachment(WHEELS, 2, &mut queue);

        let rendered: Vec<&HostEffect> = queue
            .effects()
            .iter()
            .filter(|e| matches!(e, HostEffect::MeterRendered { .. }))
            .collect();
        assert_eq!(
            rendered,
            vec![
                &HostEffect::MeterRendered {
                    variable: VariableId(0),
                    base_value: 50.0,
                    current_value: 62.0,
                },
                &HostEffect::MeterRendered {
                    variable: VariableId(1),
                    base_value: 50.0,
                    current_value: 50.0,
                },
            ]
        );
    }

    #[test]
    fn test_grouped_instances_toggle_together() {
        let mut definition = fixture_definition();
        definition.attachments.push(source("Wheels", 2, "RACING", &[("Speed", 12.0)]));

        let mut coordinator = MenuCoordinator::builder()
            .definition(definition)
            .attachments_from_definition()
            .build(&mut EffectQueue::new())
            .unwrap();

        let mut queue = EffectQueue::new();
        coordinator.swap_attachment(WHEELS, 2, &mut queue);

        let visible = visibility(queue.effects());
        assert_eq!(visible.get(&SceneNode::Attachment(handle(2))), Some(&true));
        assert_eq!(visible.get(&SceneNode::Attachment(handle(5))), Some(&true));
        // Effects группы применяются один раз
        assert_eq!(coordinator.variable("Speed").unwrap().modifier, 12.0);
    }

    #[test]
    fn test_unknown_slot_changes_nothing() {
        let (mut coordinator, _) = build_fixture();
        let mut queue = EffectQueue::new();

        coordinator.swap_attachment(SlotId(9), 1, &mut queue);

        assert!(modifiers(&coordinator).iter().all(|&m| m == 0.0));
        assert!(!queue
            .effects()
            .iter()
            .any(|e| matches!(e, HostEffect::SetActive { .. })));
    }

    #[test]
    fn test_raw_customize_routes_to_swap() {
        let (mut coordinator, _) = build_fixture();
        let mut queue = EffectQueue::new();

        coordinator.dispatch_raw(ACTION_CUSTOMIZE, "OFFROAD", 0, 1, &mut queue);
        assert_eq!(active_ids(&coordinator, WHEELS), vec![1]);

        coordinator.dispatch_raw(ACTION_CUSTOMIZE, "OFFROAD", -1, 0, &mut queue);
        assert_eq!(active_ids(&coordinator, WHEELS), vec![1]);
    }

    // ============================================================================
    // Meter projection через coordinator
    // ============================================================================

    #[test]
    fn test_meter_gain_scenario() {
        let (mut coordinator, _) = build_fixture();
        coordinator.swap_attachment(WHEELS, 2, &mut EffectQueue::new());

        let tones = coordinator.meter_tones("Speed").unwrap();
        assert_eq!(tones.len(), 20);
        assert!(tones[..12].iter().all(|&t| t == SegmentTone::Positive));
        assert!(tones[12..].iter().all(|&t| t == SegmentTone::Neutral));
    }

    #[test]
    fn test_meter_loss_scenario() {
        let (mut coordinator, _) = build_fixture();
        coordinator.swap_attachment(WHEELS, 1, &mut EffectQueue::new());

        let tones = coordinator.meter_tones("Speed").unwrap();
        assert!(tones[..7].iter().all(|&t| t == SegmentTone::Positive));
        assert!(tones[7..10].iter().all(|&t| t == SegmentTone::Negative));
        assert!(tones[10..].iter().all(|&t| t == SegmentTone::Neutral));
    }

    #[test]
    fn test_meter_tones_unknown_variable() {
        let (coordinator, _) = build_fixture();
        assert!(coordinator.meter_tones("Armor").is_none());
    }
}

//! Customization integration test
//!
//! Полный ECS flow headless: клики как events → MenuCoordinator → HostEffect
//!
//! Проверяем:
//! - build effects доходят до presentation слоя
//! - структурные и строковые клики
//! - paint edits
//! - одинаковый сценарий → одинаковые effects (детерминизм)

use bevy::prelude::*;
use customizer_core::*;

/// Presentation-заглушка: копит все HostEffect
#[derive(Resource, Default)]
struct CollectedEffects(Vec<HostEffect>);

fn collect_effects(mut events: EventReader<HostEffect>, mut collected: ResMut<CollectedEffects>) {
    collected.0.extend(events.read().cloned());
}

/// Helper: headless App с установленным demo coordinator'ом
fn create_customizer_app() -> App {
    let mut app = create_headless_app();
    app.add_plugins(CustomizerPlugin)
        .init_resource::<CollectedEffects>()
        .add_systems(Update, collect_effects.in_set(CustomizerSet::Present));

    let definition = ObjectDefinition::demo().expect("demo definition");
    install_coordinator(
        app.world_mut(),
        MenuCoordinator::builder()
            .definition(definition)
            .attachments_from_definition(),
    )
    .expect("demo coordinator");

    app.update();
    app
}

fn take_effects(app: &mut App) -> Vec<HostEffect> {
    std::mem::take(&mut app.world_mut().resource_mut::<CollectedEffects>().0)
}

fn coordinator(app: &App) -> &MenuCoordinator {
    app.world().resource::<MenuCoordinator>()
}

#[test]
fn test_build_effects_reach_presentation() {
    let mut app = create_customizer_app();
    let effects = take_effects(&mut app);

    let menus = effects
        .iter()
        .filter(|e| matches!(e, HostEffect::MenuCreated { .. }))
        .count();
    // root + 5 categories + paint submenu
    assert_eq!(menus, 7);
    assert!(effects
        .iter()
        .any(|e| matches!(e, HostEffect::MeterCreated { name, .. } if name == "Speed")));
    assert_eq!(coordinator(&app).current_key(), Some(MenuKey::Root));
}

#[test]
fn test_structured_click_swaps_attachment() {
    let mut app = create_customizer_app();
    take_effects(&mut app);

    // Wheels (slot 0) → RACING
    app.world_mut().send_event(ButtonClicked {
        action: ButtonAction::Customize { slot: SlotId(0), object_id: 2 },
    });
    app.update();

    let coordinator = coordinator(&app);
    assert!(coordinator.is_attachment_active(SlotId(0), 2));
    assert!(!coordinator.is_attachment_active(SlotId(0), 0));
    assert_eq!(coordinator.variable("Speed").unwrap().current(), 70.0);

    let effects = take_effects(&mut app);
    assert!(effects.contains(&HostEffect::MeterRendered {
        variable: VariableId(0),
        base_value: 60.0,
        current_value: 70.0,
    }));
    // Обе оси RACING видимы
    let shown = effects
        .iter()
        .filter(|e| matches!(e, HostEffect::SetActive { node: SceneNode::Attachment(_), active: true }))
        .count();
    assert_eq!(shown, 2);
}

#[test]
fn test_same_frame_structured_clicks_run_before_raw() {
    let mut app = create_customizer_app();
    take_effects(&mut app);

    // Raw отправлен первым, но обрабатывается после структурного
    app.world_mut().send_event(RawButtonClicked::customize(0, 1));
    app.world_mut().send_event(ButtonClicked {
        action: ButtonAction::Customize { slot: SlotId(0), object_id: 2 },
    });
    app.update();

    let coordinator = coordinator(&app);
    assert!(coordinator.is_attachment_active(SlotId(0), 1));
    assert!(!coordinator.is_attachment_active(SlotId(0), 2));

    assert_eq!(coordinator.variable("Speed").unwrap().current(), 52.0);

    // STOCK → RACING (60 + 10), затем RACING → OFFROAD (60 - 8)
    let speed: Vec<f32> = take_effects(&mut app)
        .iter()
        .filter_map(|e| match e {
            HostEffect::MeterRendered { variable: VariableId(0), current_value, .. } => Some(*current_value),
            _ => None,
        })
        .collect();
    assert_eq!(speed, vec![70.0, 52.0]);
}

#[test]
fn test_raw_clicks_navigate_and_paint() {
    let mut app = create_customizer_app();
    take_effects(&mut app);

    app.world_mut().send_event(RawButtonClicked::launch("Paint"));
    app.update();
    assert_eq!(coordinator(&app).current_key(), Some(MenuKey::Category(4)));

    app.world_mut().send_event(RawButtonClicked::launch("PSM_2"));
    app.update();
    assert_eq!(coordinator(&app).current_key(), Some(MenuKey::PaintSubmenu));
    assert_eq!(coordinator(&app).last_color_submenu(), 2);

    app.world_mut().send_event(PaintEdit::SetGlossiness(0.3));
    app.update();

    let effects = take_effects(&mut app);
    assert!(effects
        .iter()
        .any(|e| matches!(e, HostEffect::ColorPickerOpened { material_index: 2, .. })));
    assert!(effects.iter().any(|e| matches!(
        e,
        HostEffect::MaterialChanged { material_index: 2, material } if material.glossiness == 0.3
    )));
}

#[test]
fn test_clicks_without_coordinator_are_ignored() {
    let mut app = create_headless_app();
    app.add_plugins(CustomizerPlugin);

    app.world_mut().send_event(RawButtonClicked::customize(0, 1));
    app.update();

    assert!(app.world().get_resource::<MenuCoordinator>().is_none());
}

#[test]
fn test_same_script_same_effects() {
    fn run() -> Vec<HostEffect> {
        let mut app = create_customizer_app();
        for click in [
            RawButtonClicked::launch("Roof"),
            RawButtonClicked::customize(3, 1),
            RawButtonClicked::customize(3, 2),
            RawButtonClicked::launch("Main Menu"),
            RawButtonClicked::launch("Bumper"),
            RawButtonClicked::customize(1, 1),
        ] {
            app.world_mut().send_event(click);
            app.update();
        }
        take_effects(&mut app)
    }

    assert_eq!(run(), run());
}

#[test]
fn test_round_trip_restores_baseline() {
    let mut app = create_customizer_app();
    let baseline: Vec<f32> = coordinator(&app)
        .variables()
        .iter()
        .map(|(_, s)| s.current())
        .collect();

    for (slot, object_id) in [(0, 1), (1, 2), (2, 1), (3, 1), (0, 2), (3, 2)] {
        app.world_mut().send_event(RawButtonClicked::customize(slot, object_id));
        app.update();
    }
    for slot in 0..4 {
        app.world_mut().send_event(RawButtonClicked::customize(slot, 0));
        app.update();
    }

    let restored: Vec<f32> = coordinator(&app)
        .variables()
        .iter()
        .map(|(_, s)| s.current())
        .collect();
    for (before, after) in baseline.iter().zip(&restored) {
        assert!((before - after).abs() < 1e-4);
    }
}

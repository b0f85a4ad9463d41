//! Headless прогон customizer'а
//!
//! Строит меню из object definition (RON файл из аргумента или встроенный demo),
//! проигрывает сценарий кликов и печатает meters после каждого шага.

use bevy::prelude::App;
use customizer_core::*;

fn tones_bar(tones: &[SegmentTone]) -> String {
    tones
        .iter()
        .map(|t| match t {
            SegmentTone::Positive => '#',
            SegmentTone::Negative => '-',
            SegmentTone::Neutral => '.',
        })
        .collect()
}

fn print_meters(app: &App) {
    let Some(coordinator) = app.world().get_resource::<MenuCoordinator>() else {
        return;
    };

    for (_, state) in coordinator.variables().iter() {
        if let Some(tones) = coordinator.meter_tones(&state.name) {
            println!(
                "  {:<14} [{}] {:>6.1} → {:>6.1}",
                state.name,
                tones_bar(&tones),
                state.base_value,
                state.current()
            );
        }
    }
}

fn main() -> Result<(), ConfigError> {
    let definition = match std::env::args().nth(1) {
        Some(path) => ObjectDefinition::load(path)?,
        None => ObjectDefinition::demo()?,
    };
    println!("Starting customizer headless run ({:?})", definition.object_type);

    let mut app = create_headless_app();
    app.add_plugins(CustomizerPlugin);

    install_coordinator(
        app.world_mut(),
        MenuCoordinator::builder()
            .definition(definition)
            .attachments_from_definition(),
    )?;
    app.update();
    print_meters(&app);

    // Сценарий: каждый слот → последний вариант, потом paint первого материала
    let mut script = Vec::new();
    if let Some(coordinator) = app.world().get_resource::<MenuCoordinator>() {
        for (_, node) in coordinator.menus().iter() {
            if node.kind != MenuKind::Attachments {
                continue;
            }
            script.push(RawButtonClicked::launch(node.name.clone()));
            if let Some(last) = node.attachments.last() {
                script.push(RawButtonClicked::customize(last.slot.0 as i32, last.object_id));
            }
        }
        if !coordinator.materials().is_empty() {
            script.push(RawButtonClicked::launch(MenuKey::color_key(0)));
        }
    }

    for click in script {
        println!("Click: {} {:?} ({}, {})", click.action, click.target, click.slot, click.object_id);
        app.world_mut().send_event(click);
        app.update();
        print_meters(&app);
    }

    app.world_mut().send_event(PaintEdit::SetHue(0.6));
    app.update();

    if let Some(coordinator) = app.world().get_resource::<MenuCoordinator>() {
        for material in coordinator.materials() {
            println!("Material {}: {:?}", material.name, material.color);
        }
    }

    println!("Run complete!");
    Ok(())
}

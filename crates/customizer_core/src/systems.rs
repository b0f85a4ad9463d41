//! ECS системы customizer'а
//!
//! Flow: `ButtonClicked` / `RawButtonClicked` / `PaintEdit` → `MenuCoordinator`
//! → `EffectQueue` → `HostEffect` events → presentation системы клиента.

use bevy::prelude::*;

use crate::coordinator::{CoordinatorBuilder, MenuCoordinator};
use crate::error::ConfigError;
use crate::events::{ButtonClicked, RawButtonClicked};
use crate::host::{EffectQueue, HostEffect};
use crate::paint::PaintEdit;

/// Система: dispatch кликов
///
/// Структурные клики обрабатываются раньше строковых (в пределах кадра),
/// см. порядок в `CustomizerPlugin`.
pub fn process_button_clicks(
    mut clicks: EventReader<ButtonClicked>,
    mut raw_clicks: EventReader<RawButtonClicked>,
    mut coordinator: ResMut<MenuCoordinator>,
    mut effects: EventWriter<HostEffect>,
) {
    let mut queue = EffectQueue::new();

    for click in clicks.read() {
        coordinator.dispatch(click.action, &mut queue);
    }

    for click in raw_clicks.read() {
        coordinator.dispatch_raw(
            &click.action,
            &click.target,
            click.slot,
            click.object_id,
            &mut queue,
        );
    }

    if !queue.is_empty() {
        effects.write_batch(queue.drain());
    }
}

/// Система: правки color picker'а → материал
pub fn process_paint_edits(
    mut edits: EventReader<PaintEdit>,
    mut coordinator: ResMut<MenuCoordinator>,
    mut effects: EventWriter<HostEffect>,
) {
    let mut queue = EffectQueue::new();

    for edit in edits.read() {
        coordinator.apply_paint_edit(*edit, &mut queue);
    }

    if !queue.is_empty() {
        effects.write_batch(queue.drain());
    }
}

/// Построить coordinator и положить его в world.
///
/// Effects построения (создание widgets, начальная видимость, meters)
/// уходят как `HostEffect` events.
pub fn install_coordinator(world: &mut World, builder: CoordinatorBuilder) -> Result<(), ConfigError> {
    let mut queue = EffectQueue::new();
    let coordinator = builder.build(&mut queue)?;

    world.insert_resource(coordinator);
    world.send_event_batch(queue.drain());
    Ok(())
}

//! Customizer Core
//!
//! Engine-agnostic ядро меню кастомизации 3D объектов (vehicle / weapon / human)
//! на Bevy 0.16 ECS.
//!
//! # Архитектура
//!
//! - `MenuCoordinator` = единственный владелец state (меню, attachments,
//!   variables, материалы)
//! - Host engine = collaborators (видимость, камера, color picker, meters, widgets)
//! - ECS интеграция: клики/правки как events → coordinator → `HostEffect` events
//!
//! Клиент (`customizer_client`) рисует сцену и UI, ядро работает headless.

use bevy::prelude::*;

pub mod attachment;
pub mod camera;
pub mod coordinator;
pub mod definitions;
pub mod error;
pub mod events;
pub mod host;
pub mod logger;
pub mod menu;
pub mod meter;
pub mod paint;
pub mod settings;
pub mod systems;
pub mod variables;

// Re-export основных типов
pub use attachment::{AttachmentDef, AttachmentKey, AttachmentTable, SceneHandle, SlotId};
pub use camera::CameraRigState;
pub use coordinator::{CoordinatorBuilder, MenuCoordinator};
pub use definitions::{AttachmentSource, ObjectDefinition, ViewMode};
pub use error::{require_single, ConfigError};
pub use events::{ButtonClicked, RawButtonClicked};
pub use host::{CustomizerHost, EffectQueue, HostEffect, SceneNode};
pub use logger::*;
pub use menu::{ButtonAction, ButtonDescriptor, ButtonId, ButtonRole, MenuId, MenuKey, MenuKind};
pub use meter::{MeterProjection, SegmentTone};
pub use paint::{ColorPickerState, PaintEdit, PaintMaterial, PickerSlider};
pub use settings::CustomizerSettings;
pub use systems::install_coordinator;
pub use variables::{VariableId, VariableState};

/// Фазы customizer'а внутри Update
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CustomizerSet {
    /// Клики и paint edits → coordinator
    Dispatch,
    /// Presentation (клиент): применение `HostEffect`
    Present,
}

/// Главный plugin customizer'а
///
/// Порядок выполнения:
/// 1. process_button_clicks - навигация + attachment swap
/// 2. process_paint_edits - правки материала
///
/// Порядок кликов внутри одного кадра:
/// - все `ButtonClicked` (в порядке отправки), затем все `RawButtonClicked`
/// - paint edits кадра применяются после всех кликов
///
/// Отправитель, которому важен порядок между двумя типами кликов, шлёт их
/// в разных кадрах или только одним типом.
///
/// Системы работают, только когда `MenuCoordinator` уже установлен
/// (`install_coordinator`).
pub struct CustomizerPlugin;

impl Plugin for CustomizerPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<ButtonClicked>()
            .add_event::<RawButtonClicked>()
            .add_event::<PaintEdit>()
            .add_event::<HostEffect>();

        app.configure_sets(Update, (CustomizerSet::Dispatch, CustomizerSet::Present).chain());

        app.add_systems(
            Update,
            (systems::process_button_clicks, systems::process_paint_edits)
                .chain()
                .in_set(CustomizerSet::Dispatch)
                .run_if(resource_exists::<MenuCoordinator>),
        );
    }
}

/// Создаёт minimal Bevy App для headless прогона (без рендера)
pub fn create_headless_app() -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins);

    app
}

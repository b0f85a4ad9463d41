use bevy::prelude::*;
use customizer_core::{
    log_error, require_single, set_logger, AttachmentSource, CameraRigState, CustomizerPlugin,
    CustomizerSettings, EffectQueue, HostEffect, MenuCoordinator, ObjectDefinition, SceneHandle,
};

mod camera;
mod logger;
mod rendering;
mod ui;

use camera::{CameraPlugin, CustomizerCamera};
use logger::BevyLogger;
use rendering::{PaintHandles, SceneSyncPlugin};
use ui::CustomizerUiPlugin;

/// Загруженный object definition + настройки (вход для построения меню)
#[derive(Resource)]
pub struct LoadedObject {
    pub definition: ObjectDefinition,
    pub settings: CustomizerSettings,
}

/// Scene instance attachment'а (что host "обнаружил" в сцене)
#[derive(Component)]
pub struct AttachmentPart {
    pub source: AttachmentSource,
}

fn main() -> AppExit {
    set_logger(Box::new(BevyLogger));

    let definition = match std::env::args().nth(1) {
        Some(path) => ObjectDefinition::load(path),
        None => ObjectDefinition::demo(),
    };
    let definition = match definition {
        Ok(definition) => definition,
        Err(e) => {
            log_error(&format!("Cannot load object definition: {e}"));
            return AppExit::error();
        }
    };

    App::new()
        // Bevy defaults (rendering, input, time, etc.)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Customizer".to_string(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(LoadedObject {
            definition,
            settings: CustomizerSettings::default(),
        })
        // Ядро (menu coordination)
        .add_plugins(CustomizerPlugin)
        // Presentation: сцена, камера, UI
        .add_plugins((SceneSyncPlugin, CameraPlugin, CustomizerUiPlugin))
        .add_systems(Startup, setup_scene)
        // После Startup: attachment parts уже заспавнены
        .add_systems(PostStartup, setup_customizer)
        .run()
}

/// Spawn lights, camera rig, body and attachment parts
fn setup_scene(
    mut commands: Commands,
    object: Res<LoadedObject>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let definition = &object.definition;

    // Ground plane
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::new(Vec3::Y, Vec2::splat(12.0)))),
        MeshMaterial3d(materials.add(Color::srgb(0.25, 0.25, 0.28))),
        Transform::default(),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_4)),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
        affects_lightmapped_meshes: false,
    });

    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 4.0, 12.0).looking_at(Vec3::Y, Vec3::Y),
        CustomizerCamera::new(CameraRigState::new(
            &object.settings,
            definition.min_distance,
            definition.max_distance,
        )),
    ));

    // Перекрашиваемые материалы (индекс = индекс в definition)
    let handles = PaintHandles::from_definition(definition, &mut materials);

    for part in &definition.body {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(part.size.0, part.size.1, part.size.2))),
            MeshMaterial3d(handles.get(part.material)),
            Transform::from_xyz(part.offset.0, part.offset.1, part.offset.2),
        ));
    }

    for source in &definition.attachments {
        let mut part = commands.spawn((
            AttachmentPart { source: source.clone() },
            Transform::default(),
            Visibility::Hidden,
        ));

        if let Some(visual) = &source.visual {
            part.insert((
                Mesh3d(meshes.add(Cuboid::new(visual.size.0, visual.size.1, visual.size.2))),
                MeshMaterial3d(handles.get(visual.material)),
                Transform::from_xyz(visual.offset.0, visual.offset.1, visual.offset.2),
            ));
        }
    }

    commands.insert_resource(handles);
}

/// Построение MenuCoordinator из обнаруженных в сцене parts
///
/// Configuration error → fatal (default error handler паникует).
fn setup_customizer(
    mut commands: Commands,
    object: Res<LoadedObject>,
    parts: Query<(Entity, &AttachmentPart)>,
    cameras: Query<Entity, With<CustomizerCamera>>,
    mut effects: EventWriter<HostEffect>,
) -> Result {
    require_single(cameras.iter(), "customizer camera rig")?;

    let mut queue = EffectQueue::new();
    let coordinator = MenuCoordinator::builder()
        .definition(object.definition.clone())
        .settings(object.settings.clone())
        .attachments(
            parts
                .iter()
                .map(|(entity, part)| (part.source.clone(), SceneHandle(entity.to_bits()))),
        )
        .build(&mut queue)?;

    commands.insert_resource(coordinator);
    effects.write_batch(queue.drain());
    Ok(())
}

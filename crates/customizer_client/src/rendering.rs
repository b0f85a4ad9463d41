use bevy::prelude::*;
use customizer_core::definitions::ObjectDefinition;
use customizer_core::{CustomizerSet, HostEffect, PaintMaterial, SceneNode};

/// Scene sync: HostEffect → видимость attachment parts + StandardMaterial
pub struct SceneSyncPlugin;

impl Plugin for SceneSyncPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (apply_attachment_visibility, apply_material_changes).in_set(CustomizerSet::Present),
        );
    }
}

/// Handles перекрашиваемых материалов (индекс = индекс в definition)
#[derive(Resource, Default)]
pub struct PaintHandles(pub Vec<Handle<StandardMaterial>>);

impl PaintHandles {
    pub fn from_definition(
        definition: &ObjectDefinition,
        materials: &mut Assets<StandardMaterial>,
    ) -> Self {
        Self(
            definition
                .materials
                .iter()
                .map(|def| {
                    let mut material = StandardMaterial::default();
                    write_paint(&mut material, &PaintMaterial::from_def(def));
                    materials.add(material)
                })
                .collect(),
        )
    }

    /// Handle по индексу; неизвестный индекс → default handle
    pub fn get(&self, index: usize) -> Handle<StandardMaterial> {
        self.0.get(index).cloned().unwrap_or_default()
    }
}

/// PaintMaterial → PBR параметры
fn write_paint(material: &mut StandardMaterial, paint: &PaintMaterial) {
    material.base_color = Color::Srgba(paint.color);
    material.metallic = paint.metallic;
    material.perceptual_roughness = 1.0 - paint.glossiness;
    material.alpha_mode = if paint.color.alpha < 1.0 {
        AlphaMode::Blend
    } else {
        AlphaMode::Opaque
    };
}

/// SceneHandle = Entity::to_bits()
fn apply_attachment_visibility(
    mut effects: EventReader<HostEffect>,
    mut parts: Query<&mut Visibility, With<crate::AttachmentPart>>,
) {
    for effect in effects.read() {
        let HostEffect::SetActive {
            node: SceneNode::Attachment(handle),
            active,
        } = effect
        else {
            continue;
        };

        let Ok(entity) = Entity::try_from_bits(handle.0) else {
            continue;
        };
        if let Ok(mut visibility) = parts.get_mut(entity) {
            *visibility = if *active {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
        }
    }
}

fn apply_material_changes(
    mut effects: EventReader<HostEffect>,
    handles: Option<Res<PaintHandles>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(handles) = handles else {
        effects.clear();
        return;
    };

    for effect in effects.read() {
        let HostEffect::MaterialChanged {
            material_index,
            material,
        } = effect
        else {
            continue;
        };

        let Some(handle) = handles.0.get(*material_index) else {
            continue;
        };
        if let Some(standard) = materials.get_mut(handle) {
            write_paint(standard, material);
        }
    }
}

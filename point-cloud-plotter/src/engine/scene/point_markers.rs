use std::collections::HashMap;

use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use constants::class::palette_index;
use constants::coordinate_system::transform_coordinates;
use constants::render_settings::{FOG_COLOUR, FOG_DENSITY, MARKER_RADIUS, MARKER_SEGMENTS};

use super::PlotEntity;
use super::palette::marker_color;
use super::reference_plane::spawn_reference_plane;
use crate::engine::loading::point_data::PointRecord;

/// One rendered sample.
#[derive(Component, Debug, Clone, Copy)]
pub struct PointMarker {
    /// Position of the record in the plotted payload.
    pub index: usize,
    pub label: i64,
}

/// Render-space position: data z (biased) becomes height, data y becomes depth.
pub fn marker_translation(record: &PointRecord) -> Vec3 {
    Vec3::from_array(transform_coordinates(record.x, record.y, record.z))
}

/// Squared-exponential distance fog used for depth cueing.
pub fn scene_fog() -> DistanceFog {
    let [r, g, b] = FOG_COLOUR;
    DistanceFog {
        color: Color::srgb_u8(r, g, b),
        falloff: FogFalloff::ExponentialSquared {
            density: FOG_DENSITY,
        },
        ..default()
    }
}

/// Mesh and materials shared by every marker of one plot. Materials are
/// keyed by palette slot; every out-of-range label shares the `None` slot.
struct MarkerAssets {
    disc: Handle<Mesh>,
    materials: HashMap<Option<usize>, Handle<StandardMaterial>>,
}

impl MarkerAssets {
    fn new(meshes: &mut Assets<Mesh>) -> Self {
        Self {
            disc: meshes.add(Circle::new(MARKER_RADIUS).mesh().resolution(MARKER_SEGMENTS)),
            materials: HashMap::new(),
        }
    }

    fn material_for(
        &mut self,
        label: i64,
        materials: &mut Assets<StandardMaterial>,
    ) -> Handle<StandardMaterial> {
        self.materials
            .entry(palette_index(label))
            .or_insert_with(|| {
                materials.add(StandardMaterial {
                    base_color: marker_color(label),
                    unlit: true,
                    double_sided: true,
                    cull_mode: None,
                    ..default()
                })
            })
            .clone()
    }
}

/// Populate a fresh scene: reference loop, one disc per record, and fog on
/// the plot camera. Callers remove the previous generation first.
pub fn build_scene(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    records: &[PointRecord],
    camera: Entity,
) -> usize {
    spawn_reference_plane(commands, meshes, materials);

    let mut marker_assets = MarkerAssets::new(meshes);
    for (index, record) in records.iter().enumerate() {
        commands.spawn((
            Mesh3d(marker_assets.disc.clone()),
            MeshMaterial3d(marker_assets.material_for(record.label, materials)),
            Transform::from_translation(marker_translation(record)),
            Visibility::Visible,
            PointMarker {
                index,
                label: record.label,
            },
            PlotEntity,
        ));
    }

    commands.entity(camera).insert(scene_fog());

    records.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scene::palette::{color_for, unclassified_color};
    use crate::engine::scene::reference_plane::ReferencePlane;
    use bevy::ecs::system::RunSystemOnce;
    use constants::coordinate_system::VERTICAL_BIAS;

    fn record(x: f32, y: f32, z: f32, label: i64) -> PointRecord {
        PointRecord { x, y, z, label }
    }

    #[test]
    fn axes_are_remapped_into_y_up_render_space() {
        assert_eq!(
            marker_translation(&record(0.0, 0.0, 0.0, 1)),
            Vec3::new(0.0, VERTICAL_BIAS, 0.0)
        );
        assert_eq!(
            marker_translation(&record(10.0, 5.0, -10.0, 2)),
            Vec3::new(10.0, -10.0 + VERTICAL_BIAS, 5.0)
        );
    }

    #[test]
    fn fog_is_squared_exponential_towards_lavender() {
        let fog = scene_fog();
        assert!(matches!(
            fog.falloff,
            FogFalloff::ExponentialSquared { density } if density == FOG_DENSITY
        ));
        assert_eq!(fog.color, Color::srgb_u8(0x99, 0x99, 0xff));
    }

    fn build_into_world(records: &[PointRecord]) -> World {
        let mut world = World::new();
        world.init_resource::<Assets<Mesh>>();
        world.init_resource::<Assets<StandardMaterial>>();
        let camera = world.spawn(PlotEntity).id();
        let records = records.to_vec();

        world
            .run_system_once(
                move |mut commands: Commands,
                      mut meshes: ResMut<Assets<Mesh>>,
                      mut materials: ResMut<Assets<StandardMaterial>>| {
                    build_scene(&mut commands, &mut meshes, &mut materials, &records, camera)
                },
            )
            .unwrap();
        world
    }

    /// Markers in payload order with their translation and drawn colour.
    fn drawn_markers(world: &mut World) -> Vec<(PointMarker, Vec3, Handle<StandardMaterial>)> {
        let mut markers: Vec<_> = world
            .query::<(&PointMarker, &Transform, &MeshMaterial3d<StandardMaterial>)>()
            .iter(world)
            .map(|(marker, transform, material)| {
                (*marker, transform.translation, material.0.clone())
            })
            .collect();
        markers.sort_by_key(|(marker, _, _)| marker.index);
        markers
    }

    fn base_color(world: &World, handle: &Handle<StandardMaterial>) -> Color {
        world
            .resource::<Assets<StandardMaterial>>()
            .get(handle)
            .unwrap()
            .base_color
    }

    #[test]
    fn one_marker_per_record_plus_one_reference_loop() {
        let records = vec![record(0.0, 0.0, 0.0, 1), record(10.0, 5.0, -10.0, 2)];
        let mut world = build_into_world(&records);
        let markers = drawn_markers(&mut world);

        assert_eq!(markers.len(), 2);
        assert_eq!(
            world
                .query_filtered::<(), With<ReferencePlane>>()
                .iter(&world)
                .count(),
            1
        );

        assert_eq!(base_color(&world, &markers[0].2), color_for(1).unwrap());
        assert_eq!(base_color(&world, &markers[1].2), color_for(2).unwrap());
        assert_eq!(markers[0].1, Vec3::new(0.0, VERTICAL_BIAS, 0.0));
        assert_eq!(markers[1].1, Vec3::new(10.0, -10.0 + VERTICAL_BIAS, 5.0));
    }

    #[test]
    fn out_of_range_labels_share_the_unclassified_material() {
        let records = vec![
            record(1.0, 1.0, 1.0, 7),
            record(2.0, 2.0, 2.0, 0),
            record(3.0, 3.0, 3.0, 3),
        ];
        let mut world = build_into_world(&records);
        let markers = drawn_markers(&mut world);

        assert_eq!(markers.len(), 3);
        assert_eq!(base_color(&world, &markers[0].2), unclassified_color());
        assert_eq!(markers[0].2, markers[1].2);
        assert_eq!(base_color(&world, &markers[2].2), color_for(3).unwrap());
        // The reference line plus one material per palette slot in use.
        assert_eq!(world.resource::<Assets<StandardMaterial>>().len(), 3);
    }

    #[test]
    fn markers_with_equal_labels_share_a_material() {
        let records = vec![record(0.0, 0.0, 0.0, 4), record(5.0, 5.0, 5.0, 4)];
        let mut world = build_into_world(&records);
        let markers = drawn_markers(&mut world);

        assert_eq!(markers[0].2, markers[1].2);
        assert_eq!(markers[0].0.label, 4);
    }

    #[test]
    fn camera_receives_fog() {
        let mut world = build_into_world(&[]);
        let fogged = world.query::<&DistanceFog>().iter(&world).count();
        assert_eq!(fogged, 1);
    }
}

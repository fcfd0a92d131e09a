//! Flat square line loop at the origin, giving the plot a sense of scale.

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use constants::render_settings::{REFERENCE_PLANE_COLOUR, REFERENCE_PLANE_HALF_EXTENT};

use super::PlotEntity;

#[derive(Component)]
pub struct ReferencePlane;

/// Closed loop around the square: the first corner is repeated at the end.
pub fn reference_loop_vertices(half_extent: f32) -> Vec<[f32; 3]> {
    vec![
        [-half_extent, 0.0, -half_extent],
        [half_extent, 0.0, -half_extent],
        [half_extent, 0.0, half_extent],
        [-half_extent, 0.0, half_extent],
        [-half_extent, 0.0, -half_extent],
    ]
}

fn create_reference_loop_mesh(half_extent: f32) -> Mesh {
    let mut mesh = Mesh::new(PrimitiveTopology::LineStrip, RenderAssetUsages::default());
    mesh.insert_attribute(
        Mesh::ATTRIBUTE_POSITION,
        reference_loop_vertices(half_extent),
    );
    mesh
}

pub fn spawn_reference_plane(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> Entity {
    let [r, g, b] = REFERENCE_PLANE_COLOUR;
    let line_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(r, g, b),
        unlit: true,
        ..default()
    });

    commands
        .spawn((
            Mesh3d(meshes.add(create_reference_loop_mesh(REFERENCE_PLANE_HALF_EXTENT))),
            MeshMaterial3d(line_material),
            Transform::IDENTITY,
            Visibility::Visible,
            ReferencePlane,
            PlotEntity,
        ))
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::mesh::VertexAttributeValues;

    #[test]
    fn loop_is_closed_and_flat() {
        let vertices = reference_loop_vertices(100.0);

        assert_eq!(vertices.len(), 5);
        assert_eq!(vertices.first(), vertices.last());
        assert!(vertices.iter().all(|v| v[1] == 0.0));
        assert!(
            vertices
                .iter()
                .all(|v| v[0].abs() == 100.0 && v[2].abs() == 100.0)
        );
    }

    #[test]
    fn mesh_is_a_line_strip_over_the_loop() {
        let mesh = create_reference_loop_mesh(REFERENCE_PLANE_HALF_EXTENT);

        assert_eq!(mesh.primitive_topology(), PrimitiveTopology::LineStrip);
        match mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
            Some(VertexAttributeValues::Float32x3(positions)) => {
                assert_eq!(positions, &reference_loop_vertices(REFERENCE_PLANE_HALF_EXTENT));
            }
            other => panic!("unexpected position attribute: {other:?}"),
        }
    }
}

//! Point collection: flattening drawable hierarchies into world-space vertex positions.

use bevy::prelude::*;

/// A drawable hierarchy node.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    /// Vertex positions in the parent's space.
    Leaf(Vec<Vec3>),
    /// Nested nodes placed by a local transform.
    Container {
        transform: Transform,
        children:  Vec<SceneNode>,
    },
}

/// Flattens `roots` into world-space points, composing container transforms on the way down.
pub fn collect_points(roots: &[SceneNode]) -> Vec<Vec3> {
    let mut points = Vec::new();
    for root in roots {
        collect_into(root, &GlobalTransform::IDENTITY, &mut points);
    }
    points
}

fn collect_into(node: &SceneNode, parent: &GlobalTransform, points: &mut Vec<Vec3>) {
    match node {
        SceneNode::Leaf(vertices) => {
            points.extend(vertices.iter().map(|vertex| parent.transform_point(*vertex)));
        },
        SceneNode::Container {
            transform,
            children,
        } => {
            let global = parent.mul_transform(*transform);
            for child in children {
                collect_into(child, &global, points);
            }
        },
    }
}

/// World-space vertex positions of every `Mesh3d` on `entity` and its descendants.
///
/// Entities whose mesh asset is not loaded, or that carry no position attribute, are skipped.
/// Returns `None` when nothing was found.
pub fn extract_mesh_vertices(
    entity: Entity,
    children_query: &Query<&Children>,
    mesh_query: &Query<&Mesh3d>,
    global_transform_query: &Query<&GlobalTransform>,
    meshes: &Assets<Mesh>,
) -> Option<Vec<Vec3>> {
    let vertices: Vec<Vec3> = std::iter::once(entity)
        .chain(children_query.iter_descendants(entity))
        .filter_map(|node| {
            let Mesh3d(handle) = mesh_query.get(node).ok()?;
            let placement = global_transform_query.get(node).ok()?;
            let positions = meshes
                .get(handle)?
                .attribute(Mesh::ATTRIBUTE_POSITION)?
                .as_float3()?;
            Some(positions_in_world(positions, placement))
        })
        .flatten()
        .collect();

    (!vertices.is_empty()).then_some(vertices)
}

fn positions_in_world(positions: &[[f32; 3]], placement: &GlobalTransform) -> Vec<Vec3> {
    positions
        .iter()
        .map(|&position| placement.transform_point(Vec3::from(position)))
        .collect()
}

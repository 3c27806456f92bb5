use glam::{Vec2, Vec3};
use crate::core::build_state::BuildState;
use crate::core::bvh::{BvhBuilder, SplitMode};
use crate::math::AABB;
use crate::types::Triangle;

/// One mesh's raw geometry, all indices local to this object.
///
/// Populated by an external loader; this core does not validate index
/// ranges. An object contributes exactly one BVH subtree plus its attribute
/// arrays to the shared output of a scene build.
#[derive(Clone, Debug, Default)]
pub struct Object {
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub texcoords: Vec<Vec2>,
    pub triangles: Vec<Triangle>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position-only mesh, the common case for procedural geometry.
    pub fn from_positions(vertices: Vec<Vec3>, triangles: Vec<Triangle>) -> Self {
        Self {
            vertices,
            triangles,
            ..Self::default()
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Bounding box of one triangle's three vertices.
    pub fn triangle_bounds(&self, tri: &Triangle) -> AABB {
        tri.vertices
            .iter()
            .fold(AABB::empty(), |bb, &i| bb.extend(self.vertices[i as usize]))
    }

    /// Centroid of one triangle, its representative point for spatial
    /// sorting.
    pub fn triangle_centroid(&self, tri: &Triangle) -> Vec3 {
        let [a, b, c] = tri.vertices.map(|i| self.vertices[i as usize]);
        (a + b + c) / 3.0
    }

    /// Builds this object's BVH subtree into `state` and returns the root
    /// node's index into the global node buffer.
    ///
    /// Appends exactly `triangle_count()` entries to the global triangle
    /// buffer, in an order chosen by the split algorithm. The caller must
    /// append this object's attributes afterwards, not before; triangle
    /// remapping reads the cursors as they stand when this runs.
    pub fn build_bvh(&self, state: &mut BuildState, mode: SplitMode) -> u32 {
        BvhBuilder::new(self, mode).build(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_bounds_and_centroid() {
        let object = Object::from_positions(
            vec![Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0), Vec3::new(0.0, 3.0, 0.0)],
            vec![Triangle::new([0, 1, 2], 0)],
        );

        let bounds = object.triangle_bounds(&object.triangles[0]);
        assert_eq!(bounds.min, Vec3::ZERO);
        assert_eq!(bounds.max, Vec3::new(3.0, 3.0, 0.0));

        let centroid = object.triangle_centroid(&object.triangles[0]);
        assert_eq!(centroid, Vec3::new(1.0, 1.0, 0.0));
    }
}

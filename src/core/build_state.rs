use glam::{Vec2, Vec3};
use crate::types::{BvhNodeData, MaterialData, TextureData, Triangle, TriangleData, NO_INDEX};

/// Final buffer sizes, summed over every object before the pass starts.
#[derive(Copy, Clone, Debug, Default)]
pub struct BuildTotals {
    pub verts: usize,
    pub norms: usize,
    pub texcoords: usize,
    pub tris: usize,
    pub objects: usize,
}

/// The flat output of one scene build, globally indexed and ready for an
/// external traversal engine. Every `#[repr(C)]` record can be handed over
/// as raw bytes via bytemuck.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneBuffers {
    pub vertices: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub texcoords: Vec<[f32; 2]>,
    pub triangles: Vec<TriangleData>,
    pub nodes: Vec<BvhNodeData>,
    /// One BVH root node index per object, in registration order.
    pub object_roots: Vec<u32>,
    pub materials: Vec<MaterialData>,
    pub textures: Vec<TextureData>,
}

/// Accumulates one build pass's output.
///
/// All attribute and triangle buffers are allocated to their final size up
/// front; the vector lengths double as the running write cursors that
/// `add_triangle` remaps against. Only the node list grows dynamically while
/// the recursion runs; `finalize` moves it into the output.
///
/// Ordering contract per object: every `add_triangle` call must happen
/// before that object's `add_attributes` call, because appending attributes
/// advances the base cursors used to remap the *next* object.
pub struct BuildState {
    vertices: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    texcoords: Vec<[f32; 2]>,
    triangles: Vec<TriangleData>,
    nodes: Vec<BvhNodeData>,
    object_roots: Vec<u32>,
    materials: Vec<MaterialData>,
    textures: Vec<TextureData>,
    totals: BuildTotals,
}

impl BuildState {
    /// Allocates every buffer once, to its declared final size, and copies
    /// the already-finalized material/texture tables verbatim.
    pub fn new(totals: BuildTotals, materials: &[MaterialData], textures: &[TextureData]) -> Self {
        Self {
            vertices: Vec::with_capacity(totals.verts),
            normals: Vec::with_capacity(totals.norms),
            texcoords: Vec::with_capacity(totals.texcoords),
            triangles: Vec::with_capacity(totals.tris),
            nodes: Vec::new(),
            object_roots: Vec::with_capacity(totals.objects),
            materials: materials.to_vec(),
            textures: textures.to_vec(),
            totals,
        }
    }

    /// Count of triangles written so far; a leaf about to be materialized
    /// uses this as its first-primitive offset.
    pub fn triangle_cursor(&self) -> u32 {
        self.triangles.len() as u32
    }

    /// Remaps `tri`'s local indices by the attribute counts accumulated
    /// before the current object started, then appends it. `NO_INDEX`
    /// passes through untouched.
    pub fn add_triangle(&mut self, tri: &Triangle) {
        let base_verts = self.vertices.len() as u32;
        let base_norms = self.normals.len() as u32;
        let base_texcoords = self.texcoords.len() as u32;

        let remap = |idx: u32, base: u32| if idx == NO_INDEX { NO_INDEX } else { idx + base };

        debug_assert!(self.triangles.len() < self.totals.tris);
        self.triangles.push(TriangleData {
            vertices: tri.vertices.map(|i| i + base_verts),
            material: tri.material,
            normals: tri.normals.map(|i| remap(i, base_norms)),
            _pad0: 0,
            texcoords: tri.texcoords.map(|i| remap(i, base_texcoords)),
            _pad1: 0,
        });
    }

    /// Bulk-appends one object's attributes, advancing the base cursors for
    /// the next object.
    pub fn add_attributes(&mut self, vertices: &[Vec3], normals: &[Vec3], texcoords: &[Vec2]) {
        self.vertices.extend(vertices.iter().map(|v| v.to_array()));
        self.normals.extend(normals.iter().map(|n| n.to_array()));
        self.texcoords.extend(texcoords.iter().map(|t| t.to_array()));
    }

    pub fn add_object_root(&mut self, node_index: u32) {
        debug_assert!(self.object_roots.len() < self.totals.objects);
        self.object_roots.push(node_index);
    }

    /// Appends a node to the working list and returns its array index.
    pub fn push_node(&mut self, node: BvhNodeData) -> u32 {
        let index = self.nodes.len() as u32;
        self.nodes.push(node);
        index
    }

    /// Fills in an internal node's second-child index once the right
    /// subtree has been emitted.
    pub fn patch_second_child(&mut self, node_index: u32, second_child: u32) {
        debug_assert!(second_child > node_index + 1);
        self.nodes[node_index as usize].prim_offset_or_child = second_child;
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Consumes the accumulator into the final flat buffers. The totals
    /// declared at construction must have been written exactly; that is a
    /// programming-error check, not an input-validation path.
    pub fn finalize(self) -> SceneBuffers {
        debug_assert_eq!(self.vertices.len(), self.totals.verts);
        debug_assert_eq!(self.normals.len(), self.totals.norms);
        debug_assert_eq!(self.texcoords.len(), self.totals.texcoords);
        debug_assert_eq!(self.triangles.len(), self.totals.tris);
        debug_assert_eq!(self.object_roots.len(), self.totals.objects);

        SceneBuffers {
            vertices: self.vertices,
            normals: self.normals,
            texcoords: self.texcoords,
            triangles: self.triangles,
            nodes: self.nodes,
            object_roots: self.object_roots,
            materials: self.materials,
            textures: self.textures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals_for(tris: usize, verts: usize) -> BuildTotals {
        BuildTotals {
            verts,
            norms: 0,
            texcoords: 0,
            tris,
            objects: 0,
        }
    }

    #[test]
    fn test_add_triangle_remaps_against_counts_written_so_far() {
        let mut state = BuildState::new(totals_for(2, 6), &[], &[]);

        // First object: cursors are at zero, indices unchanged.
        state.add_triangle(&Triangle::new([0, 1, 2], 0));
        state.add_attributes(
            &[Vec3::ZERO, Vec3::X, Vec3::Y],
            &[],
            &[],
        );

        // Second object: vertex indices shift by the first object's count.
        state.add_triangle(&Triangle::new([0, 1, 2], 1));
        state.add_attributes(&[Vec3::ZERO, Vec3::X, Vec3::Z], &[], &[]);

        let buffers = state.finalize();
        assert_eq!(buffers.triangles[0].vertices, [0, 1, 2]);
        assert_eq!(buffers.triangles[1].vertices, [3, 4, 5]);
    }

    #[test]
    fn test_normal_indices_shift_with_the_global_normal_buffer() {
        let mut state = BuildState::new(
            BuildTotals {
                verts: 6,
                norms: 2,
                texcoords: 0,
                tris: 2,
                objects: 0,
            },
            &[],
            &[],
        );

        state.add_triangle(&Triangle::new([0, 1, 2], 0).with_normals([0; 3]));
        state.add_attributes(&[Vec3::ZERO, Vec3::X, Vec3::Y], &[Vec3::Y], &[]);

        // Same local normal index, but one normal already written globally.
        state.add_triangle(&Triangle::new([0, 1, 2], 0).with_normals([0; 3]));
        state.add_attributes(&[Vec3::ZERO, Vec3::X, Vec3::Z], &[Vec3::Y], &[]);

        let buffers = state.finalize();
        assert_eq!(buffers.triangles[0].normals, [0; 3]);
        assert_eq!(buffers.triangles[1].normals, [1; 3]);
        assert_eq!(buffers.normals.len(), 2);
    }

    #[test]
    fn test_no_index_sentinel_is_never_remapped() {
        let mut state = BuildState::new(totals_for(1, 3), &[], &[]);
        state.add_triangle(&Triangle::new([0, 1, 2], 0));
        state.add_attributes(&[Vec3::ZERO, Vec3::X, Vec3::Y], &[], &[]);

        let buffers = state.finalize();
        assert_eq!(buffers.triangles[0].normals, [NO_INDEX; 3]);
        assert_eq!(buffers.triangles[0].texcoords, [NO_INDEX; 3]);
    }

    #[test]
    fn test_node_count_tracks_pushed_nodes() {
        let mut state = BuildState::new(BuildTotals::default(), &[], &[]);
        assert_eq!(state.node_count(), 0);

        let index = state.push_node(BvhNodeData::leaf(&crate::math::AABB::empty(), 0, 0));
        assert_eq!(index, 0);
        assert_eq!(state.node_count(), 1);
    }

    #[test]
    fn test_material_table_copied_verbatim() {
        let materials = [MaterialData::new_color([1.0, 0.0, 0.0, 1.0])];
        let state = BuildState::new(
            BuildTotals::default(),
            &materials,
            &[],
        );
        let buffers = state.finalize();
        assert_eq!(buffers.materials, materials);
    }
}

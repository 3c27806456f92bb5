use crate::math::AABB;
use glam::Vec3;

/// Sentinel for "this triangle has no normal/texcoord index".
/// Passed through to the output buffers unmapped.
pub const NO_INDEX: u32 = u32::MAX;

/// One triangle of an object's raw geometry, indices local to that object.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Triangle {
    pub vertices: [u32; 3],
    pub normals: [u32; 3],
    pub texcoords: [u32; 3],
    pub material: u32,
}

impl Triangle {
    /// Position-only triangle; normals and texcoords stay unset.
    pub fn new(vertices: [u32; 3], material: u32) -> Self {
        Self {
            vertices,
            normals: [NO_INDEX; 3],
            texcoords: [NO_INDEX; 3],
            material,
        }
    }

    pub fn with_normals(mut self, normals: [u32; 3]) -> Self {
        self.normals = normals;
        self
    }

    pub fn with_texcoords(mut self, texcoords: [u32; 3]) -> Self {
        self.texcoords = texcoords;
        self
    }
}

/// Triangle record of the output contract: globally remapped attribute
/// indices plus a material id. 48 bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TriangleData {
    pub vertices: [u32; 3],
    pub material: u32,
    pub normals: [u32; 3],
    pub _pad0: u32,
    pub texcoords: [u32; 3],
    pub _pad1: u32,
}

/// Flat BVH node record. 48 bytes, 16-byte aligned fields.
///
/// Nodes are stored preorder: the first child of the internal node at array
/// index `i` sits at `i + 1`; `prim_offset_or_child` holds the second
/// child's array index. For a leaf (`axis == -1`) it instead holds the first
/// triangle's offset into the global triangle buffer, with `prim_count` the
/// number of triangles.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BvhNodeData {
    pub bounds_min: [f32; 3],
    /// -1 for a leaf, 0/1/2 for an internal node's split axis.
    pub axis: i32,
    pub bounds_max: [f32; 3],
    /// Triangle count for a leaf, unused (0) for an internal node.
    pub prim_count: u32,
    pub prim_offset_or_child: u32,
    pub _pad: [u32; 3],
}

impl BvhNodeData {
    pub fn leaf(bounds: &AABB, prim_count: u32, prim_offset: u32) -> Self {
        Self {
            bounds_min: bounds.min.to_array(),
            axis: -1,
            bounds_max: bounds.max.to_array(),
            prim_count,
            prim_offset_or_child: prim_offset,
            _pad: [0; 3],
        }
    }

    /// Internal node with the second child still unknown; the builder
    /// backpatches `prim_offset_or_child` once the right subtree is done.
    pub fn internal(bounds: &AABB, axis: i32) -> Self {
        Self {
            bounds_min: bounds.min.to_array(),
            axis,
            bounds_max: bounds.max.to_array(),
            prim_count: 0,
            prim_offset_or_child: 0,
            _pad: [0; 3],
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.axis < 0
    }

    pub fn bounds(&self) -> AABB {
        AABB::new(
            Vec3::from_array(self.bounds_min),
            Vec3::from_array(self.bounds_max),
        )
    }
}

/// Material table entry: base color plus an optional texture reference.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialData {
    pub base_color: [f32; 4],
    /// Index into the texture table, -1 if untextured.
    pub texture_index: i32,
    pub _pad: [u32; 3],
}

impl MaterialData {
    pub fn new_color(base_color: [f32; 4]) -> Self {
        Self {
            base_color,
            texture_index: -1,
            _pad: [0; 3],
        }
    }

    pub fn new_textured(base_color: [f32; 4], texture_index: u32) -> Self {
        Self {
            base_color,
            texture_index: texture_index as i32,
            _pad: [0; 3],
        }
    }
}

/// Texture table entry. The pixel payload is opaque to the build core; it is
/// produced by an external image loader and copied verbatim into the output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    /// RGBA8
    pub data: Vec<u8>,
}

use std::time::Instant;

use log::{debug, info};

use crate::core::{BuildState, BuildTotals, Object, SceneBuffers, SplitMode};
use crate::types::{MaterialData, TextureData};

/// Owns the object list plus the append-only material/texture tables, and
/// drives one build pass over all objects in registration order.
///
/// Every mutation eagerly drops previously derived buffers, so a stale
/// `buffers()` read is impossible; callers get `None` until they rebuild.
/// `build()` itself is one-shot and fully replacing.
///
/// Single-threaded by contract: objects must be processed strictly in
/// order because each object's index remapping depends on the counts
/// written by all objects before it.
#[derive(Default)]
pub struct Scene {
    objects: Vec<Object>,
    materials: Vec<MaterialData>,
    textures: Vec<TextureData>,
    buffers: Option<SceneBuffers>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an object and returns its id (also its slot in the
    /// per-object root array after a build).
    pub fn add_object(&mut self, object: Object) -> u32 {
        self.buffers = None;
        self.objects.push(object);
        (self.objects.len() - 1) as u32
    }

    pub fn add_material(&mut self, material: MaterialData) -> u32 {
        self.buffers = None;
        self.materials.push(material);
        (self.materials.len() - 1) as u32
    }

    pub fn add_texture(&mut self, texture: TextureData) -> u32 {
        self.buffers = None;
        self.textures.push(texture);
        (self.textures.len() - 1) as u32
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Rebuilds every derived buffer from scratch: sums final sizes over
    /// all objects, allocates one fresh accumulator, then per object builds
    /// its subtree, appends its attributes, and records its root.
    pub fn build(&mut self, mode: SplitMode) {
        self.buffers = None;

        let totals = self.objects.iter().fold(
            BuildTotals {
                objects: self.objects.len(),
                ..BuildTotals::default()
            },
            |mut acc, object| {
                acc.verts += object.vertices.len();
                acc.norms += object.normals.len();
                acc.texcoords += object.texcoords.len();
                acc.tris += object.triangle_count();
                acc
            },
        );

        let start = Instant::now();
        let mut state = BuildState::new(totals, &self.materials, &self.textures);

        for (id, object) in self.objects.iter().enumerate() {
            let root = object.build_bvh(&mut state, mode);
            state.add_attributes(&object.vertices, &object.normals, &object.texcoords);
            state.add_object_root(root);
            debug!(
                "object {}: {} triangles, root node {}",
                id,
                object.triangle_count(),
                root
            );
        }

        let node_count = state.node_count();
        let buffers = state.finalize();
        info!(
            "scene built ({:?}): {} objects, {} triangles, {} nodes in {:.2?}",
            mode,
            buffers.object_roots.len(),
            buffers.triangles.len(),
            node_count,
            start.elapsed()
        );
        self.buffers = Some(buffers);
    }

    /// The flat output of the last build, or `None` if no build has run
    /// since the last mutation.
    pub fn buffers(&self) -> Option<&SceneBuffers> {
        self.buffers.as_ref()
    }
}

use crate::scene::Scene;
use crate::scenes::grid::create_triangle_grid;
use crate::types::MaterialData;

/// A scene of `object_count` grid objects, each holding roughly
/// `triangles_per_object` triangles, plus a small material table. Used by
/// the demo binary, the benchmarks, and the integration tests.
pub fn create_demo_scene(object_count: usize, triangles_per_object: usize) -> Scene {
    let mut scene = Scene::new();
    scene.add_material(MaterialData::new_color([0.7, 0.7, 0.7, 1.0]));
    scene.add_material(MaterialData::new_color([0.8, 0.3, 0.3, 1.0]));

    let cols = (triangles_per_object as f32).sqrt().ceil().max(1.0) as usize;
    let rows = triangles_per_object.div_ceil(cols);

    for i in 0..object_count {
        let mut object = create_triangle_grid(rows, cols);
        // Stack objects vertically so they stay disjoint.
        let lift = i as f32 * 4.0;
        for v in &mut object.vertices {
            v.y += lift;
        }
        scene.add_object(object);
    }
    scene
}

use glam::Vec3;

use crate::core::Object;
use crate::types::Triangle;

/// `count` unit triangles evenly spaced along the x axis, none overlapping.
/// Each triangle owns its own vertex triple.
pub fn create_spread_strip(count: usize, spacing: f32) -> Object {
    let mut object = Object::new();
    for i in 0..count {
        let base = object.vertices.len() as u32;
        let x = i as f32 * spacing;
        object.vertices.push(Vec3::new(x, 0.0, 0.0));
        object.vertices.push(Vec3::new(x + 1.0, 0.0, 0.0));
        object.vertices.push(Vec3::new(x + 0.5, 1.0, 0.0));
        object
            .triangles
            .push(Triangle::new([base, base + 1, base + 2], 0));
    }
    object
}

/// A `rows` x `cols` field of triangles on the xz plane, one per cell, with
/// a little height variation so no axis degenerates.
pub fn create_triangle_grid(rows: usize, cols: usize) -> Object {
    let mut object = Object::new();
    for row in 0..rows {
        for col in 0..cols {
            let base = object.vertices.len() as u32;
            let x = col as f32 * 2.0;
            let z = row as f32 * 2.0;
            let y = ((row * 31 + col * 17) % 7) as f32 * 0.25;
            object.vertices.push(Vec3::new(x, y, z));
            object.vertices.push(Vec3::new(x + 1.0, y, z));
            object.vertices.push(Vec3::new(x + 0.5, y + 1.0, z + 1.0));
            object
                .triangles
                .push(Triangle::new([base, base + 1, base + 2], 0));
        }
    }
    object
}

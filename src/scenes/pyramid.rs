use glam::{Vec2, Vec3};

use crate::core::Object;
use crate::types::Triangle;

/// A square pyramid: 4 sides plus a 2-triangle base, 6 triangles over 5
/// shared vertices. Sides carry texcoords, flat-shading normals and
/// per-face materials; the base triangles leave both index lanes unset,
/// which exercises the sentinel pass-through in the output remapping.
pub fn create_pyramid_object() -> Object {
    let mut object = Object::new();

    let apex = Vec3::new(0.0, 5.0, 0.0);
    let size = 4.0;
    object.vertices = vec![
        Vec3::new(-size, 0.0, -size),
        Vec3::new(size, 0.0, -size),
        Vec3::new(size, 0.0, size),
        Vec3::new(-size, 0.0, size),
        apex,
    ];
    object.texcoords = vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(0.5, 1.0),
    ];

    let sides = [[0, 1], [1, 2], [2, 3], [3, 0]];
    for (face, [a, b]) in sides.into_iter().enumerate() {
        let (va, vb) = (object.vertices[a as usize], object.vertices[b as usize]);
        let normal = (vb - va).cross(apex - va).normalize();
        let ni = object.normals.len() as u32;
        object.normals.push(normal);
        object.triangles.push(
            Triangle::new([a, b, 4], face as u32)
                .with_normals([ni; 3])
                .with_texcoords([0, 1, 2]),
        );
    }
    // Base
    object.triangles.push(Triangle::new([0, 2, 1], 4));
    object.triangles.push(Triangle::new([0, 3, 2], 4));

    object
}

//! Flat disc generation

use std::f32::consts::PI;

use glam::Vec3;

use crate::mesh::{GeometryError, MeshBuffers};

/// Generate a disc in the XY plane, facing +Z
///
/// A fan of `num_triangles` around a centre vertex. The rim closes with a
/// duplicated vertex at the full angle, so the vertex count is
/// `num_triangles + 2` and the triangle count exactly `num_triangles`.
///
/// UVs map the rim onto the unit circle inscribed in the texture square,
/// centre at (0.5, 0.5).
pub fn disc(radius: f32, num_triangles: u32) -> Result<MeshBuffers, GeometryError> {
    if radius <= 0.0 {
        return Err(GeometryError::InvalidDimension {
            name: "radius",
            value: radius,
            requirement: "must be > 0",
        });
    }
    if num_triangles < 1 {
        return Err(GeometryError::InvalidSegmentCount {
            name: "num_triangles",
            value: num_triangles,
            min: 1,
        });
    }

    let mut mesh = MeshBuffers::with_capacity(num_triangles as usize + 2, num_triangles as usize * 3);

    // centre first, then the rim
    mesh.add_vertex_uv(Vec3::ZERO, (0.5, 0.5), Vec3::Z);
    for i in 0..=num_triangles {
        let angle = (2.0 * PI) * (i as f32 / num_triangles as f32);
        let position = Vec3::new(radius * angle.cos(), radius * angle.sin(), 0.0);
        let uv = (angle.cos() / 2.0 + 0.5, -angle.sin() / 2.0 + 0.5);
        mesh.add_vertex_uv(position, uv, Vec3::Z);
    }

    for i in 0..num_triangles {
        mesh.add_triangle(1 + i, 0, 2 + i);
    }

    Ok(mesh)
}

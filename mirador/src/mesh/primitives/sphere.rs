//! UV sphere generation

use std::f32::consts::PI;

use glam::Vec3;

use crate::mesh::{GeometryError, MeshBuffers};

/// Generate a sphere with smooth normals and equirectangular UV mapping
///
/// The sphere is parametrized from the north pole down: `long_segs` rings of
/// latitude, each with `lat_segs` segments around the axis. Vertex count is
/// `(long_segs + 1) * (lat_segs + 1)`; each ring duplicates its first vertex
/// to close the UV seam. Normals are position / radius.
///
/// # Errors
///
/// Non-positive radius or zero segment counts fail with
/// [`GeometryError`].
pub fn sphere(radius: f32, long_segs: u32, lat_segs: u32) -> Result<MeshBuffers, GeometryError> {
    if radius <= 0.0 {
        return Err(GeometryError::InvalidDimension {
            name: "radius",
            value: radius,
            requirement: "must be > 0",
        });
    }
    if long_segs < 1 {
        return Err(GeometryError::InvalidSegmentCount {
            name: "long_segs",
            value: long_segs,
            min: 1,
        });
    }
    if lat_segs < 1 {
        return Err(GeometryError::InvalidSegmentCount {
            name: "lat_segs",
            value: lat_segs,
            min: 1,
        });
    }

    let vertex_count = ((long_segs + 1) * (lat_segs + 1)) as usize;
    let mut mesh = MeshBuffers::with_capacity(vertex_count, vertex_count * 6);
    let inv_radius = 1.0 / radius;

    // Each quad between two rings:
    //
    // v0____v0 + 1
    //  |  / |
    //  | /  |
    // v1----v1 + 1
    for ring in 0..=long_segs {
        // longitude runs from +PI/2 (north pole) down to -PI/2
        let longitude = (PI / 2.0) - ring as f32 * (PI / long_segs as f32);
        let v = ring as f32 / long_segs as f32;
        let y = radius * longitude.sin();
        let ring_radius = radius * longitude.cos();

        for seg in 0..=lat_segs {
            let latitude = seg as f32 * ((2.0 * PI) / lat_segs as f32);
            let u = 1.0 - seg as f32 / lat_segs as f32;
            let position = Vec3::new(
                ring_radius * latitude.cos(),
                y,
                ring_radius * latitude.sin(),
            );
            mesh.add_vertex_uv(position, (u, v), position * inv_radius);
        }
    }

    // Two triangles per quad; the pole rings emit only one fan direction
    // since their other triangle would collapse onto the pole.
    let stride = lat_segs + 1;
    for ring in 0..long_segs {
        for seg in 0..lat_segs {
            let v0 = ring * stride + seg;
            let v1 = v0 + stride;
            if ring != 0 {
                mesh.add_triangle(v0, v1, v0 + 1);
            }
            if ring != long_segs - 1 {
                mesh.add_triangle(v0 + 1, v1, v1 + 1);
            }
        }
    }

    Ok(mesh)
}

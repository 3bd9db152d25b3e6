//! Cone-family side wall generation
//!
//! One generator covers the cone, cylinder, pyramid and N-gon prism family
//! by interpolating the ring radius linearly along the height. Cap discs are
//! not part of the side mesh; scene spawners attach them as child nodes.

use std::f32::consts::PI;

use glam::Vec3;

use crate::mesh::{GeometryError, MeshBuffers};

/// Generate the ruled side wall of the cone family
///
/// Ring `i` of `long_segs + 1` rings sits at height `i * height / long_segs`
/// with radius interpolated from `base_radius` to `top_radius`. Each ring has
/// `lat_segs + 1` vertices (seam closed with a duplicate). A zero top radius
/// still emits a full ring of coincident apex vertices, which keeps the index
/// grid regular.
///
/// Side normals are the radial unit vector of the ring - the unit-cylinder
/// approximation, not exact for sloped walls.
pub fn cone(
    base_radius: f32,
    top_radius: f32,
    height: f32,
    long_segs: u32,
    lat_segs: u32,
) -> Result<MeshBuffers, GeometryError> {
    if base_radius < 0.0 {
        return Err(GeometryError::InvalidDimension {
            name: "base_radius",
            value: base_radius,
            requirement: "must be >= 0",
        });
    }
    if top_radius < 0.0 {
        return Err(GeometryError::InvalidDimension {
            name: "top_radius",
            value: top_radius,
            requirement: "must be >= 0",
        });
    }
    if height <= 0.0 {
        return Err(GeometryError::InvalidDimension {
            name: "height",
            value: height,
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

    let radius_step = (top_radius - base_radius) / long_segs as f32;
    let height_step = height / long_segs as f32;

    for ring in 0..=long_segs {
        let r = base_radius + radius_step * ring as f32;
        let y = height_step * ring as f32;
        let v = 1.0 - ring as f32 / long_segs as f32;

        for seg in 0..=lat_segs {
            let angle = (2.0 * PI) * (seg as f32 / lat_segs as f32);
            let u = 1.0 - seg as f32 / lat_segs as f32;
            let radial = Vec3::new(angle.cos(), 0.0, angle.sin());
            let position = Vec3::new(r * angle.cos(), y, r * angle.sin());
            mesh.add_vertex_uv(position, (u, v), radial);
        }
    }

    let stride = lat_segs + 1;
    for ring in 0..long_segs {
        for seg in 0..lat_segs {
            let v0 = ring * stride + seg;
            let v1 = v0 + stride;
            mesh.add_triangle(v0, v1, v0 + 1);
            mesh.add_triangle(v0 + 1, v1, v1 + 1);
        }
    }

    Ok(mesh)
}

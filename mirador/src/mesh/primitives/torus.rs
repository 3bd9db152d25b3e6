//! Torus generation

use std::f32::consts::PI;

use glam::Vec3;

use crate::mesh::{GeometryError, MeshBuffers};

/// Generate a torus as the product of two circles
///
/// The major circle lies in the XY plane; the tube cross-section sweeps
/// along Z. Normals come from the cross product of the two tangent
/// directions, with a fallback to the tube-radial direction if the cross
/// product degenerates.
pub fn torus(
    minor_radius: f32,
    major_radius: f32,
    ring_segs: u32,
    tube_segs: u32,
) -> Result<MeshBuffers, GeometryError> {
    if minor_radius <= 0.0 {
        return Err(GeometryError::InvalidDimension {
            name: "minor_radius",
            value: minor_radius,
            requirement: "must be > 0",
        });
    }
    if major_radius <= 0.0 {
        return Err(GeometryError::InvalidDimension {
            name: "major_radius",
            value: major_radius,
            requirement: "must be > 0",
        });
    }
    if ring_segs < 1 {
        return Err(GeometryError::InvalidSegmentCount {
            name: "ring_segs",
            value: ring_segs,
            min: 1,
        });
    }
    if tube_segs < 1 {
        return Err(GeometryError::InvalidSegmentCount {
            name: "tube_segs",
            value: tube_segs,
            min: 1,
        });
    }

    let vertex_count = ((ring_segs + 1) * (tube_segs + 1)) as usize;
    let mut mesh = MeshBuffers::with_capacity(vertex_count, vertex_count * 6);

    for ring in 0..=ring_segs {
        let theta = (2.0 * PI) * (ring as f32 / ring_segs as f32);
        let (sin_theta, cos_theta) = theta.sin_cos();
        let u = 1.0 - ring as f32 / ring_segs as f32;

        for tube in 0..=tube_segs {
            let phi = (2.0 * PI) * (tube as f32 / tube_segs as f32);
            let (sin_phi, cos_phi) = phi.sin_cos();
            let v = 1.0 - tube as f32 / tube_segs as f32;

            let position = Vec3::new(
                (major_radius + minor_radius * cos_phi) * cos_theta,
                (major_radius + minor_radius * cos_phi) * sin_theta,
                minor_radius * sin_phi,
            );

            // tangents of the two parameter circles
            let ring_tangent = Vec3::new(-sin_theta, cos_theta, 0.0);
            let tube_tangent = Vec3::new(cos_theta * -sin_phi, sin_theta * -sin_phi, cos_phi);
            let cross = ring_tangent.cross(tube_tangent);
            let normal = if cross.length_squared() > f32::EPSILON {
                cross.normalize()
            } else {
                let tube_centre = Vec3::new(major_radius * cos_theta, major_radius * sin_theta, 0.0);
                (position - tube_centre).normalize_or_zero()
            };

            mesh.add_vertex_uv(position, (u, v), normal);
        }
    }

    let stride = tube_segs + 1;
    for ring in 0..ring_segs {
        for tube in 0..tube_segs {
            let v0 = ring * stride + tube;
            let v1 = v0 + stride;
            mesh.add_triangle(v0, v1, v0 + 1);
            mesh.add_triangle(v0 + 1, v1, v1 + 1);
        }
    }

    Ok(mesh)
}

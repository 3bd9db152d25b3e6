//! Planar shadow projection

use glam::{Mat4, Vec3, Vec4};

/// Build the planar-projection matrix that flattens geometry onto the plane
/// through the corner points `[p, r, q]`, as lit from `light`
///
/// `light[3]` is 1 for a positional light, 0 for a directional one. The
/// classic construction: with plane coefficients `n` and `d`,
/// `M = dot(plane, light) * I - light * plane^T`. Any point pushed through
/// `M` lands on the plane (after the perspective divide), stretched away
/// from the light.
pub fn shadow_matrix(light: [f32; 4], corners: [Vec3; 3]) -> Mat4 {
    let [p, r, q] = corners;
    let normal = (r - p).cross(q - p);
    let plane = Vec4::new(normal.x, normal.y, normal.z, -normal.dot(p));
    let light = Vec4::from_array(light);
    let dot = plane.dot(light);

    // column j is dot * e_j - light * plane[j]
    Mat4::from_cols(
        Vec4::new(
            dot - light.x * plane.x,
            -light.y * plane.x,
            -light.z * plane.x,
            -light.w * plane.x,
        ),
        Vec4::new(
            -light.x * plane.y,
            dot - light.y * plane.y,
            -light.z * plane.y,
            -light.w * plane.y,
        ),
        Vec4::new(
            -light.x * plane.z,
            -light.y * plane.z,
            dot - light.z * plane.z,
            -light.w * plane.z,
        ),
        Vec4::new(
            -light.x * plane.w,
            -light.y * plane.w,
            -light.z * plane.w,
            dot - light.w * plane.w,
        ),
    )
}

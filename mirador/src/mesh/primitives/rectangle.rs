//! Subdivided rectangle sheet generation
//!
//! The sheet lies flat in the XZ plane (normal +Y), spanning `x in [0, width]`
//! and `z in [0, -height]` in whole-unit cells. Each cell is tessellated into
//! ten triangles over ten vertices in a two-row diamond pattern:
//!
//! ```text
//! v0------v3------v5
//! | \  B  /\   D  /|
//! |  \   /  \    / |
//! | A \ /  C \  / E|
//! v1---v2-----v4---v6
//! | F / \  H  /\  J|
//! |  /   \   /  \  |
//! | /  G  \ /  I \ |
//! v7------v8------v9
//! ```
//!
//! The pattern (rather than two triangles per cell) is part of the sheet's
//! contract: vertex count and triangle count are both `height * width * 10`.

use glam::Vec3;

use crate::mesh::{GeometryError, MeshBuffers};

/// How a texture is laid over the sheet
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RectangleBehaviour {
    /// One texture region spans the whole sheet
    #[default]
    Unit,
    /// Every unit cell gets its own full tile (for repeat-wrapped textures)
    Split,
}

/// Sub-rectangle of a texture image in UV space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UvRect {
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
}

impl UvRect {
    pub const FULL: Self = Self {
        u0: 0.0,
        v0: 0.0,
        u1: 1.0,
        v1: 1.0,
    };

    pub fn new(u0: f32, v0: f32, u1: f32, v1: f32) -> Self {
        Self { u0, v0, u1, v1 }
    }
}

impl Default for UvRect {
    fn default() -> Self {
        Self::FULL
    }
}

/// Position offsets of the ten cell vertices, as (dx, dz) from the cell corner
const CELL_VERTICES: [(f32, f32); 10] = [
    (0.0, 0.0),
    (0.0, -0.5),
    (0.25, -0.5),
    (0.5, 0.0),
    (0.75, -0.5),
    (1.0, 0.0),
    (1.0, -0.5),
    (0.0, -1.0),
    (0.5, -1.0),
    (1.0, -1.0),
];

/// The ten triangles of one cell, as local vertex indices
const CELL_TRIANGLES: [(u32, u32, u32); 10] = [
    (0, 1, 2),
    (0, 2, 3),
    (3, 2, 4),
    (3, 4, 5),
    (5, 4, 6),
    (1, 7, 2),
    (2, 7, 8),
    (2, 8, 4),
    (4, 8, 9),
    (4, 9, 6),
];

/// Generate a subdivided rectangle sheet
///
/// `height` and `width` are whole-unit cell counts. UVs cover the full
/// texture ([`UvRect::FULL`]); use [`rectangle_uvs`] to remap afterwards.
pub fn rectangle(
    height: u32,
    width: u32,
    behaviour: RectangleBehaviour,
) -> Result<MeshBuffers, GeometryError> {
    if height < 1 {
        return Err(GeometryError::InvalidSegmentCount {
            name: "height",
            value: height,
            min: 1,
        });
    }
    if width < 1 {
        return Err(GeometryError::InvalidSegmentCount {
            name: "width",
            value: width,
            min: 1,
        });
    }

    let cells = (height * width) as usize;
    let mut mesh = MeshBuffers::with_capacity(cells * 10, cells * 30);

    for i in 0..width {
        for k in 0..height {
            let x = i as f32;
            let z = -(k as f32);
            let base = mesh.vertex_count() as u32;
            for (dx, dz) in CELL_VERTICES {
                mesh.add_vertex(Vec3::new(x + dx, 0.0, z + dz), Vec3::Y);
            }
            for (a, b, c) in CELL_TRIANGLES {
                mesh.add_triangle(base + a, base + b, base + c);
            }
        }
    }

    mesh.uvs = rectangle_uvs(height, width, behaviour, UvRect::FULL);
    Ok(mesh)
}

/// Build the UV buffer for a sheet of the given dimensions
///
/// Matches the vertex order emitted by [`rectangle`], so a node can swap its
/// UVs when re-textured with a different mapping or atlas region.
///
/// - `Unit`: `rect` is stretched once over the whole sheet.
/// - `Split`: every cell covers `rect` entirely; with the full rect and a
///   repeat-wrapped texture this tiles the image per cell.
pub fn rectangle_uvs(
    height: u32,
    width: u32,
    behaviour: RectangleBehaviour,
    rect: UvRect,
) -> Vec<f32> {
    let du = rect.u1 - rect.u0;
    let dv = rect.v1 - rect.v0;

    let (cell_u, cell_v) = match behaviour {
        RectangleBehaviour::Unit => (du / width as f32, dv / height as f32),
        RectangleBehaviour::Split => (du, dv),
    };

    let mut uvs = Vec::with_capacity((height * width) as usize * 20);
    for i in 0..width {
        for k in 0..height {
            let base_u = rect.u0 + i as f32 * cell_u;
            let base_v = rect.v0 + k as f32 * cell_v;
            for (dx, dz) in CELL_VERTICES {
                uvs.push(base_u + dx * cell_u);
                uvs.push(base_v + (-dz) * cell_v);
            }
        }
    }
    uvs
}

/// The P (top-left), R (bottom-left) and Q (top-right) corner vertices of a
/// flat sheet, used to derive plane equations for shadows and mirrors
pub fn rectangle_corners(height: u32, width: u32) -> [Vec3; 3] {
    [
        Vec3::ZERO,
        Vec3::new(0.0, 0.0, -(height as f32)),
        Vec3::new(width as f32, 0.0, 0.0),
    ]
}

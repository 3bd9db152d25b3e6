//! Mesh buffer types
//!
//! Shared types for procedural generation, model loading and rendering.
//! Buffers are full-precision f32, suitable for OBJ export and for handing
//! straight to a fixed-function style backend.

use glam::Vec3;
use thiserror::Error;

/// How vertex buffers are turned into drawn primitives
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DereferenceMethod {
    /// One draw-call-equivalent per vertex, no indices (reference path)
    PerVertex,
    /// One bulk draw call over the raw arrays, no indices
    BulkArrays,
    /// One bulk indexed draw call reusing shared vertices
    #[default]
    Indexed,
}

/// Primitive topology of a vertex run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Topology {
    #[default]
    Triangles,
    Quads,
    TriangleFan,
}

/// A contiguous run of one topology inside a mixed buffer
///
/// Loaded models may interleave triangle and quad faces; each run records
/// the topology and the vertex count up to and including the run, so render
/// can issue one bulk call per run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TopologyRun {
    pub topology: Topology,
    /// Total unrolled vertex count at the end of this run
    pub vertex_end: u32,
}

/// Construction-time geometry parameter failure
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("invalid {name}: {value} ({requirement})")]
    InvalidDimension {
        name: &'static str,
        value: f32,
        requirement: &'static str,
    },

    #[error("invalid {name}: {value} (must be at least {min})")]
    InvalidSegmentCount {
        name: &'static str,
        value: u32,
        min: u32,
    },
}

/// Geometry buffers for one mesh
///
/// Positions and normals are xyz triples, UVs are uv pairs (empty when the
/// mesh carries no texture mapping). An empty `indices` buffer means a
/// non-indexed draw. `runs` is only populated by the model loader; an empty
/// run list means the whole buffer is one run of the node's topology.
#[derive(Clone, Debug, Default)]
pub struct MeshBuffers {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub uvs: Vec<f32>,
    pub indices: Vec<u32>,
    pub runs: Vec<TopologyRun>,
}

impl MeshBuffers {
    /// Create empty buffers
    pub fn new() -> Self {
        Self::default()
    }

    /// Create buffers with pre-allocated capacity
    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices * 3),
            normals: Vec::with_capacity(vertices * 3),
            uvs: Vec::new(),
            indices: Vec::with_capacity(indices),
            runs: Vec::new(),
        }
    }

    /// Add a vertex with position and normal, returning its index
    pub fn add_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = (self.positions.len() / 3) as u32;
        self.positions
            .extend_from_slice(&[position.x, position.y, position.z]);
        self.normals.extend_from_slice(&[normal.x, normal.y, normal.z]);
        index
    }

    /// Add a vertex with position, UV coordinates and normal, returning its index
    pub fn add_vertex_uv(&mut self, position: Vec3, uv: (f32, f32), normal: Vec3) -> u32 {
        let index = self.add_vertex(position, normal);
        self.uvs.extend_from_slice(&[uv.0, uv.1]);
        index
    }

    /// Add a triangle using three vertex indices
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);
    }

    /// Position of vertex `index`
    pub fn position(&self, index: u32) -> Vec3 {
        let i = index as usize * 3;
        Vec3::new(self.positions[i], self.positions[i + 1], self.positions[i + 2])
    }

    /// Normal of vertex `index`
    pub fn normal(&self, index: u32) -> Vec3 {
        let i = index as usize * 3;
        Vec3::new(self.normals[i], self.normals[i + 1], self.normals[i + 2])
    }

    /// UV coordinates of vertex `index`
    pub fn uv(&self, index: u32) -> (f32, f32) {
        let i = index as usize * 2;
        (self.uvs[i], self.uvs[i + 1])
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of indexed triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether the buffers hold no geometry at all
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Check the buffer invariants: every index references an existing
    /// vertex, normals pair up with positions, and UVs (when present) cover
    /// every vertex.
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertex_count() as u32;
        if self.normals.len() != self.positions.len() {
            return false;
        }
        if !self.uvs.is_empty() && self.uvs.len() / 2 != vertex_count as usize {
            return false;
        }
        self.indices.iter().all(|&i| i < vertex_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_vertex_returns_sequential_indices() {
        let mut mesh = MeshBuffers::new();
        assert_eq!(mesh.add_vertex(Vec3::ZERO, Vec3::Y), 0);
        assert_eq!(mesh.add_vertex(Vec3::X, Vec3::Y), 1);
        assert_eq!(mesh.add_vertex(Vec3::Z, Vec3::Y), 2);
        assert_eq!(mesh.vertex_count(), 3);
    }

    #[test]
    fn test_validate_rejects_out_of_range_index() {
        let mut mesh = MeshBuffers::new();
        mesh.add_vertex(Vec3::ZERO, Vec3::Y);
        mesh.add_vertex(Vec3::X, Vec3::Y);
        mesh.add_vertex(Vec3::Z, Vec3::Y);
        mesh.add_triangle(0, 1, 2);
        assert!(mesh.validate());

        mesh.add_triangle(0, 1, 3);
        assert!(!mesh.validate());
    }

    #[test]
    fn test_validate_rejects_partial_uvs() {
        let mut mesh = MeshBuffers::new();
        mesh.add_vertex_uv(Vec3::ZERO, (0.0, 0.0), Vec3::Y);
        mesh.add_vertex(Vec3::X, Vec3::Y);
        assert!(!mesh.validate());
    }
}

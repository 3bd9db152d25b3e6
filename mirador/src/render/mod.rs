//! Rendering
//!
//! The scene never talks to a graphics API directly: it drives a
//! [`RenderBackend`] capability trait covering the transform stack, the
//! three draw strategies, stencil/blend/depth state and the fixed light and
//! material channels. [`TraceBackend`] records the command stream for tests
//! and headless debugging.

mod draw;
mod shadow;
mod trace;

pub use draw::{SHADOW_COLOUR, draw_mirror_world, draw_node, draw_planar_shadow};
pub use shadow::shadow_matrix;
pub use trace::{TraceBackend, TraceCommand};

use glam::{Mat4, Vec3};

use crate::light::{Light, Material};
use crate::mesh::Topology;
use crate::texture::{Texture, TextureId};

/// Stencil/depth comparison function
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareFunc {
    Never,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
    NotEqual,
    Always,
}

/// Stencil buffer write operation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StencilOp {
    Keep,
    Zero,
    Replace,
    Increment,
    Decrement,
    Invert,
}

/// Views over one mesh's vertex arrays for a draw call
#[derive(Clone, Copy, Debug)]
pub struct DrawBuffers<'a> {
    pub positions: &'a [f32],
    pub normals: &'a [f32],
    pub uvs: Option<&'a [f32]>,
}

/// Capabilities the scene needs from a graphics backend
pub trait RenderBackend {
    // transform stack
    fn push_matrix(&mut self);
    fn pop_matrix(&mut self);
    fn translate(&mut self, offset: Vec3);
    fn rotate_x(&mut self, degrees: f32);
    fn rotate_y(&mut self, degrees: f32);
    fn rotate_z(&mut self, degrees: f32);
    fn scale(&mut self, factors: Vec3);
    fn mult_matrix(&mut self, matrix: &Mat4);

    // draw state
    fn set_colour(&mut self, rgba: [f32; 4]);
    fn bind_texture(&mut self, id: TextureId, texture: &Texture);
    fn unbind_texture(&mut self);
    fn set_wireframe(&mut self, enabled: bool);

    // the three dereference strategies
    fn draw_per_vertex(&mut self, topology: Topology, buffers: DrawBuffers<'_>);
    fn draw_arrays(&mut self, topology: Topology, buffers: DrawBuffers<'_>, first: u32, count: u32);
    fn draw_elements(&mut self, topology: Topology, buffers: DrawBuffers<'_>, indices: &[u32]);

    // fragment tests and blending
    fn set_stencil_test(&mut self, enabled: bool);
    fn stencil_func(&mut self, func: CompareFunc, reference: i32, mask: u32);
    fn stencil_op(&mut self, fail: StencilOp, zfail: StencilOp, zpass: StencilOp);
    fn set_colour_mask(&mut self, enabled: bool);
    fn set_depth_test(&mut self, enabled: bool);
    fn set_blend(&mut self, enabled: bool);

    // lighting
    fn set_lighting(&mut self, enabled: bool);
    fn apply_light(&mut self, slot: usize, light: &Light);
    fn disable_light(&mut self, slot: usize);
    fn apply_material(&mut self, material: &Material);

    // camera
    fn apply_camera(&mut self, eye: Vec3, centre: Vec3, up: Vec3, fov_degrees: f32);
}

//! Command-recording backend
//!
//! Records every backend call as a [`TraceCommand`]. Tests assert on the
//! recorded stream; headless runs can dump it to inspect a frame without a
//! GL context.

use glam::{Mat4, Vec3};

use crate::light::{Light, Material};
use crate::mesh::Topology;
use crate::texture::{Texture, TextureId};

use super::{CompareFunc, DrawBuffers, RenderBackend, StencilOp};

/// One recorded backend call
#[derive(Clone, Debug, PartialEq)]
pub enum TraceCommand {
    PushMatrix,
    PopMatrix,
    Translate([f32; 3]),
    RotateX(f32),
    RotateY(f32),
    RotateZ(f32),
    Scale([f32; 3]),
    MultMatrix,
    SetColour([f32; 4]),
    BindTexture(u32),
    UnbindTexture,
    SetWireframe(bool),
    DrawPerVertex { topology: Topology, vertices: u32 },
    DrawArrays { topology: Topology, first: u32, count: u32 },
    DrawElements { topology: Topology, indices: u32 },
    SetStencilTest(bool),
    StencilFunc { func: CompareFunc, reference: i32, mask: u32 },
    StencilOp { fail: StencilOp, zfail: StencilOp, zpass: StencilOp },
    SetColourMask(bool),
    SetDepthTest(bool),
    SetBlend(bool),
    SetLighting(bool),
    ApplyLight { slot: usize },
    DisableLight { slot: usize },
    ApplyMaterial,
    ApplyCamera { eye: [f32; 3], centre: [f32; 3], up: [f32; 3], fov: f32 },
}

/// Backend that records its command stream
#[derive(Default)]
pub struct TraceBackend {
    pub commands: Vec<TraceCommand>,
}

impl TraceBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Index of the first matching command, if any
    pub fn find(&self, needle: &TraceCommand) -> Option<usize> {
        self.commands.iter().position(|command| command == needle)
    }
}

impl RenderBackend for TraceBackend {
    fn push_matrix(&mut self) {
        self.commands.push(TraceCommand::PushMatrix);
    }

    fn pop_matrix(&mut self) {
        self.commands.push(TraceCommand::PopMatrix);
    }

    fn translate(&mut self, offset: Vec3) {
        self.commands.push(TraceCommand::Translate(offset.to_array()));
    }

    fn rotate_x(&mut self, degrees: f32) {
        self.commands.push(TraceCommand::RotateX(degrees));
    }

    fn rotate_y(&mut self, degrees: f32) {
        self.commands.push(TraceCommand::RotateY(degrees));
    }

    fn rotate_z(&mut self, degrees: f32) {
        self.commands.push(TraceCommand::RotateZ(degrees));
    }

    fn scale(&mut self, factors: Vec3) {
        self.commands.push(TraceCommand::Scale(factors.to_array()));
    }

    fn mult_matrix(&mut self, _matrix: &Mat4) {
        self.commands.push(TraceCommand::MultMatrix);
    }

    fn set_colour(&mut self, rgba: [f32; 4]) {
        self.commands.push(TraceCommand::SetColour(rgba));
    }

    fn bind_texture(&mut self, id: TextureId, _texture: &Texture) {
        self.commands.push(TraceCommand::BindTexture(id.as_raw()));
    }

    fn unbind_texture(&mut self) {
        self.commands.push(TraceCommand::UnbindTexture);
    }

    fn set_wireframe(&mut self, enabled: bool) {
        self.commands.push(TraceCommand::SetWireframe(enabled));
    }

    fn draw_per_vertex(&mut self, topology: Topology, buffers: DrawBuffers<'_>) {
        self.commands.push(TraceCommand::DrawPerVertex {
            topology,
            vertices: (buffers.positions.len() / 3) as u32,
        });
    }

    fn draw_arrays(
        &mut self,
        topology: Topology,
        _buffers: DrawBuffers<'_>,
        first: u32,
        count: u32,
    ) {
        self.commands.push(TraceCommand::DrawArrays {
            topology,
            first,
            count,
        });
    }

    fn draw_elements(&mut self, topology: Topology, _buffers: DrawBuffers<'_>, indices: &[u32]) {
        self.commands.push(TraceCommand::DrawElements {
            topology,
            indices: indices.len() as u32,
        });
    }

    fn set_stencil_test(&mut self, enabled: bool) {
        self.commands.push(TraceCommand::SetStencilTest(enabled));
    }

    fn stencil_func(&mut self, func: CompareFunc, reference: i32, mask: u32) {
        self.commands.push(TraceCommand::StencilFunc {
            func,
            reference,
            mask,
        });
    }

    fn stencil_op(&mut self, fail: StencilOp, zfail: StencilOp, zpass: StencilOp) {
        self.commands.push(TraceCommand::StencilOp { fail, zfail, zpass });
    }

    fn set_colour_mask(&mut self, enabled: bool) {
        self.commands.push(TraceCommand::SetColourMask(enabled));
    }

    fn set_depth_test(&mut self, enabled: bool) {
        self.commands.push(TraceCommand::SetDepthTest(enabled));
    }

    fn set_blend(&mut self, enabled: bool) {
        self.commands.push(TraceCommand::SetBlend(enabled));
    }

    fn set_lighting(&mut self, enabled: bool) {
        self.commands.push(TraceCommand::SetLighting(enabled));
    }

    fn apply_light(&mut self, slot: usize, _light: &Light) {
        self.commands.push(TraceCommand::ApplyLight { slot });
    }

    fn disable_light(&mut self, slot: usize) {
        self.commands.push(TraceCommand::DisableLight { slot });
    }

    fn apply_material(&mut self, _material: &Material) {
        self.commands.push(TraceCommand::ApplyMaterial);
    }

    fn apply_camera(&mut self, eye: Vec3, centre: Vec3, up: Vec3, fov_degrees: f32) {
        self.commands.push(TraceCommand::ApplyCamera {
            eye: eye.to_array(),
            centre: centre.to_array(),
            up: up.to_array(),
            fov: fov_degrees,
        });
    }
}

//! Scene graph and frame protocol
//!
//! A [`Scene`] owns the node arena, the registries (textures, cameras,
//! lights), the mirror worlds and the shadow surfaces, and drives one tick
//! as a strict `handle_input -> update -> render` sequence. Everything is
//! single-threaded and frame-synchronous; delta time arrives once per tick
//! in the [`FrameContext`](crate::context::FrameContext).

mod arena;
mod cube;
mod mirror;
pub(crate) mod node;
mod plane;
mod spawn;

pub use arena::{NodeArena, NodeId};
pub use cube::{Cube, CubeFace};
pub use mirror::{CopyId, MirrorWorld};
pub use node::{AxisLimits, Motion, Node, Transform, WHITE};
pub use plane::{Facing, Plane};
pub use spawn::spawn_cone;

use hashbrown::HashMap;
use tracing::{debug, warn};

use crate::camera::CameraRig;
use crate::context::FrameContext;
use crate::input::InputState;
use crate::light::LightBank;
use crate::render::{
    CompareFunc, RenderBackend, StencilOp, draw_mirror_world, draw_node, draw_planar_shadow,
    shadow_matrix,
};
use crate::texture::{TextureCoordsKind, TextureError, TextureId, TextureTable};

/// A complete scene: graph, registries and frame protocol
pub struct Scene {
    pub arena: NodeArena,
    pub cameras: CameraRig,
    pub lights: LightBank,
    roots: Vec<NodeId>,
    shadow_surfaces: Vec<Plane>,
    mirrors: Vec<MirrorWorld>,
    names: HashMap<String, NodeId>,
    paused: bool,
    focused: bool,
    wireframe: bool,
    first_mouse: bool,
    /// Sole owner of shared textures; declared last so it outlives every
    /// node handle during teardown
    pub textures: TextureTable,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            arena: NodeArena::new(),
            cameras: CameraRig::new(),
            lights: LightBank::new(),
            roots: Vec::new(),
            shadow_surfaces: Vec::new(),
            mirrors: Vec::new(),
            names: HashMap::new(),
            paused: false,
            focused: true,
            wireframe: false,
            first_mouse: true,
            textures: TextureTable::new(),
        }
    }

    /// Register a top-level node: it updates every tick, draws every frame
    /// and casts planar shadows
    pub fn add_root(&mut self, id: NodeId) {
        self.roots.push(id);
    }

    /// Register a surface that receives planar shadows
    ///
    /// Shadow surfaces draw during the shadow pass, not with the roots.
    pub fn add_shadow_surface(&mut self, plane: Plane) {
        self.shadow_surfaces.push(plane);
    }

    pub fn add_mirror(&mut self, mirror: MirrorWorld) -> usize {
        self.mirrors.push(mirror);
        self.mirrors.len() - 1
    }

    pub fn mirror_mut(&mut self, index: usize) -> Option<&mut MirrorWorld> {
        self.mirrors.get_mut(index)
    }

    /// Remember a node under a name
    pub fn register_name(&mut self, name: impl Into<String>, id: NodeId) {
        self.names.insert(name.into(), id);
    }

    pub fn node_named(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    /// Load a texture, falling back to none on failure
    ///
    /// A missing or corrupt image leaves the would-be user textureless but
    /// otherwise functional; the failure is logged and reported once here.
    pub fn load_texture(
        &mut self,
        path: impl AsRef<std::path::Path>,
        coords: TextureCoordsKind,
        flip_vertical: bool,
    ) -> Result<TextureId, TextureError> {
        match self.textures.load(path.as_ref(), coords, flip_vertical) {
            Ok(id) => Ok(id),
            Err(error) => {
                warn!(path = %path.as_ref().display(), %error, "texture load failed");
                Err(error)
            }
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    /// Process pointer capture, global toggles and the active camera/lights
    pub fn handle_input(&mut self, input: &mut InputState, ctx: &FrameContext) {
        // left click captures or releases the pointer
        if input.mouse_left() {
            input.set_mouse_left(false);
            self.focused = !self.focused;
            if !self.focused {
                // next capture must swallow the stale mouse sample
                self.first_mouse = true;
            }
            debug!(focused = self.focused, "pointer capture toggled");
        }

        if !self.focused {
            return;
        }

        self.cameras
            .handle_input(input, ctx, &mut self.first_mouse, ctx.dt);
        self.lights.handle_input(input, ctx.dt);

        if input.is_key_down(b'm') {
            input.set_key_up(b'm');
            self.wireframe = !self.wireframe;
        }
        if input.is_key_down(b'p') {
            input.set_key_up(b'p');
            self.paused = !self.paused;
        }
    }

    /// Advance cameras, lights, root subtrees and mirror worlds
    pub fn update(&mut self, ctx: &FrameContext) {
        if self.paused {
            return;
        }
        let dt = ctx.dt;

        self.cameras.update(&self.arena, dt);
        self.lights.update(dt);

        for &root in &self.roots {
            self.arena.update_subtree(root, dt);
        }
        for mirror in &mut self.mirrors {
            mirror.update(&mut self.arena, dt);
        }
    }

    /// Draw the frame: camera, lights, shadow surfaces with planar shadows,
    /// scene geometry, then the mirror worlds
    pub fn render<B: RenderBackend>(&self, backend: &mut B) {
        let camera = self.cameras.active();
        backend.set_wireframe(self.wireframe);
        backend.apply_camera(camera.position, camera.look_at(), camera.up(), camera.fov());

        for (slot, light) in self.lights.iter() {
            if light.enabled {
                backend.apply_light(slot, light);
            } else {
                backend.disable_light(slot);
            }
        }

        // planar shadows, one stencil reference per surface so overlapping
        // shadows never double-blend
        if let Some(light_position) = self.lights.position(0) {
            for (index, surface) in self.shadow_surfaces.iter().enumerate() {
                let matrix = shadow_matrix(light_position, surface.corners(&self.arena));
                let reference = 2 + index as i32;

                backend.set_stencil_test(true);
                backend.stencil_func(CompareFunc::Always, reference, 0xffff_ffff);
                backend.stencil_op(StencilOp::Keep, StencilOp::Keep, StencilOp::Replace);
                draw_node(backend, &self.arena, &self.textures, surface.node, false);

                backend.stencil_func(CompareFunc::Less, reference - 1, 0xffff_ffff);
                backend.stencil_op(StencilOp::Replace, StencilOp::Replace, StencilOp::Replace);
                draw_planar_shadow(backend, &self.arena, &self.textures, &self.roots, &matrix);

                backend.set_stencil_test(false);
            }
        } else {
            for surface in &self.shadow_surfaces {
                draw_node(backend, &self.arena, &self.textures, surface.node, false);
            }
        }

        for &root in &self.roots {
            draw_node(backend, &self.arena, &self.textures, root, false);
        }

        for mirror in &self.mirrors {
            draw_mirror_world(backend, &self.arena, &self.textures, mirror);
        }
    }

    /// One full frame in the mandatory order
    pub fn tick<B: RenderBackend>(
        &mut self,
        input: &mut InputState,
        ctx: &FrameContext,
        backend: &mut B,
    ) {
        self.handle_input(input, ctx);
        self.update(ctx);
        self.render(backend);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::disc;
    use crate::render::{TraceBackend, TraceCommand};

    #[test]
    fn test_pause_freezes_updates() {
        let mut scene = Scene::new();
        let mut node = Node::new(disc(1.0, 4).unwrap());
        node.motion.rotating = [false, true, false];
        node.motion.speed = 10.0;
        let id = scene.arena.insert(node);
        scene.add_root(id);

        let ctx = FrameContext::new(1.0, 800, 600);
        scene.set_paused(true);
        scene.update(&ctx);
        assert_eq!(
            scene.arena.get(id).unwrap().transform.rotation_degrees.y,
            0.0
        );

        scene.set_paused(false);
        scene.update(&ctx);
        assert_eq!(
            scene.arena.get(id).unwrap().transform.rotation_degrees.y,
            10.0
        );
    }

    #[test]
    fn test_wireframe_and_pause_keys_toggle() {
        let mut scene = Scene::new();
        let mut input = InputState::new();
        let ctx = FrameContext::new(0.016, 800, 600);

        input.set_key_down(b'm');
        scene.handle_input(&mut input, &ctx);
        assert!(scene.wireframe());
        assert!(!input.is_key_down(b'm'));

        input.set_key_down(b'p');
        scene.handle_input(&mut input, &ctx);
        assert!(scene.is_paused());
    }

    #[test]
    fn test_unfocused_scene_ignores_keys() {
        let mut scene = Scene::new();
        let mut input = InputState::new();
        let ctx = FrameContext::new(0.016, 800, 600);

        // release the pointer
        input.set_mouse_left(true);
        scene.handle_input(&mut input, &ctx);
        assert!(!scene.is_focused());

        input.set_key_down(b'm');
        scene.handle_input(&mut input, &ctx);
        assert!(!scene.wireframe());
        assert!(input.is_key_down(b'm')); // left unconsumed
    }

    #[test]
    fn test_render_applies_camera_first() {
        let mut scene = Scene::new();
        let id = scene.arena.insert(Node::new(disc(1.0, 4).unwrap()));
        scene.add_root(id);

        let mut backend = TraceBackend::new();
        scene.render(&mut backend);
        assert!(matches!(
            backend.commands[1],
            TraceCommand::ApplyCamera { .. }
        ));
    }

    #[test]
    fn test_named_nodes() {
        let mut scene = Scene::new();
        let id = scene.arena.insert(Node::group());
        scene.register_name("floor", id);
        assert_eq!(scene.node_named("floor"), Some(id));
        assert_eq!(scene.node_named("ceiling"), None);
    }

    #[test]
    fn test_load_texture_failure_is_nonfatal() {
        let mut scene = Scene::new();
        let result = scene.load_texture("gfx/missing.png", TextureCoordsKind::Full, false);
        assert!(result.is_err());
        // the scene keeps working; a node simply stays untextured
        let id = scene.arena.insert(Node::new(disc(1.0, 4).unwrap()));
        scene.add_root(id);
        let mut backend = TraceBackend::new();
        scene.render(&mut backend);
        assert!(!backend.commands.is_empty());
    }
}

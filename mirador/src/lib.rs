//! Mirador - a fixed-function style scene kit
//!
//! Procedural meshes, a handle-based scene graph, a multi-camera rig,
//! dynamic lights, planar shadows and stencil-gated mirror reflections,
//! all behind a renderer-agnostic backend trait.
//!
//! The crate never creates a window or a graphics context. The embedding
//! owns the event loop: it fills an [`InputState`], builds a
//! [`FrameContext`] with the frame's delta time, and hands both plus a
//! [`render::RenderBackend`] to [`Scene::tick`].
//!
//! ```no_run
//! use mirador::mesh::{RectangleBehaviour, sphere};
//! use mirador::render::TraceBackend;
//! use mirador::scene::{Facing, MirrorWorld, Node, Plane, Scene};
//! use mirador::{FrameContext, InputState};
//!
//! let mut scene = Scene::new();
//! let ball = scene.arena.insert(Node::new(sphere(0.8, 32, 32)?));
//! scene.add_root(ball);
//!
//! let floor = Plane::spawn(
//!     &mut scene.arena,
//!     Facing::Up,
//!     24,
//!     20,
//!     RectangleBehaviour::Split,
//! )?;
//! scene.add_shadow_surface(floor);
//!
//! let mut mirror = MirrorWorld::new();
//! mirror.init_plane_mirror(&mut scene.arena, Facing::Backward, 4, 6)?;
//! let _copy = mirror.create_reflection(&mut scene.arena, ball, false, None);
//! scene.add_mirror(mirror);
//!
//! let mut input = InputState::new();
//! let mut backend = TraceBackend::new();
//! let ctx = FrameContext::new(0.016, 1280, 720);
//! scene.tick(&mut input, &ctx, &mut backend);
//! # Ok::<(), mirador::mesh::GeometryError>(())
//! ```

pub mod camera;
pub mod context;
pub mod input;
pub mod light;
pub mod mesh;
pub mod model;
pub mod render;
pub mod scene;
pub mod texture;

pub use context::FrameContext;
pub use input::InputState;
pub use scene::{Node, NodeArena, NodeId, Scene};

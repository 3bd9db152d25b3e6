//! Scene node: geometry buffers plus transform and motion state

use glam::Vec3;
use smallvec::SmallVec;

use crate::light::Material;
use crate::mesh::{DereferenceMethod, MeshBuffers, Topology};
use crate::scene::NodeId;
use crate::texture::TextureId;

pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Local transform, applied as translate, rotate X, rotate Y, rotate Z, scale
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation_degrees: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation_degrees: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// Bounding box that reverses an auto-moving node at its boundary
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisLimits {
    pub min: Vec3,
    pub max: Vec3,
}

impl AxisLimits {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }
}

/// Automatic per-axis rotation and bounded movement
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Motion {
    /// Per-axis auto-rotate flags (x, y, z)
    pub rotating: [bool; 3],
    /// Per-axis auto-move flags (x, y, z)
    pub moving: [bool; 3],
    pub speed: f32,
    /// Unit direction of travel, sign-flipped at the axis limits
    pub direction: Vec3,
    pub limits: AxisLimits,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            rotating: [false; 3],
            moving: [false; 3],
            speed: 0.0,
            direction: Vec3::ZERO,
            limits: AxisLimits::default(),
        }
    }
}

/// One node of the scene graph
///
/// A node owns its geometry by value; an empty mesh makes a pure transform
/// group. Children are arena handles owned by the parent: removing the
/// parent removes the subtree.
#[derive(Clone, Debug)]
pub struct Node {
    pub mesh: MeshBuffers,
    pub topology: Topology,
    pub dereference: DereferenceMethod,
    pub transform: Transform,
    /// Extra translate applied after rotation, before geometry and children
    pub pivot: Vec3,
    pub colour: [f32; 4],
    /// Shared handle into the scene texture table, not owned
    pub texture: Option<TextureId>,
    /// Surface material channels, applied before the node draws
    pub material: Option<Material>,
    pub motion: Motion,
    pub children: SmallVec<[NodeId; 4]>,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            mesh: MeshBuffers::default(),
            topology: Topology::Triangles,
            dereference: DereferenceMethod::Indexed,
            transform: Transform::default(),
            pivot: Vec3::ZERO,
            colour: WHITE,
            texture: None,
            material: None,
            motion: Motion::default(),
            children: SmallVec::new(),
        }
    }
}

impl Node {
    /// Node around generated geometry (indexed triangles)
    pub fn new(mesh: MeshBuffers) -> Self {
        Self {
            mesh,
            ..Self::default()
        }
    }

    /// Geometry-less transform group
    pub fn group() -> Self {
        Self::default()
    }

    pub fn set_texture(&mut self, texture: TextureId) {
        self.texture = Some(texture);
    }

    /// Mirror the geometry left-right
    pub fn invert_horizontally(&mut self) {
        self.transform.scale.x *= -1.0;
    }

    /// Mirror the geometry top-bottom
    pub fn invert_vertically(&mut self) {
        self.transform.scale.y *= -1.0;
    }

    /// Mirror the geometry front-back
    pub fn invert_z(&mut self) {
        self.transform.scale.z *= -1.0;
    }

    /// Copy the pose (translation and rotation) of another node
    pub fn copy_pose_from(&mut self, other: &Node) {
        self.transform.translation = other.transform.translation;
        self.transform.rotation_degrees = other.transform.rotation_degrees;
    }

    /// Advance auto-rotation and bounded auto-movement by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        let step = self.motion.speed * dt;

        if self.motion.rotating[0] {
            self.transform.rotation_degrees.x += step;
        }
        if self.motion.rotating[1] {
            self.transform.rotation_degrees.y += step;
        }
        if self.motion.rotating[2] {
            self.transform.rotation_degrees.z += step;
        }

        // Bounded movement: crossing a limit flips the direction sign and
        // turns the node around by adjusting the companion rotation axis.
        // The sign check makes the flip fire once per crossing, not every
        // frame spent at the boundary.
        if self.motion.moving[0] {
            let translation = self.transform.translation;
            if translation.x >= self.motion.limits.max.x && self.motion.direction.x == 1.0 {
                self.transform.rotation_degrees.y -= 180.0;
                self.motion.direction.x = -1.0;
            } else if translation.x <= self.motion.limits.min.x && self.motion.direction.x == -1.0 {
                self.transform.rotation_degrees.y += 180.0;
                self.motion.direction.x = 1.0;
            }
            self.transform.translation.x += self.motion.direction.x * step;
        }
        if self.motion.moving[1] {
            let translation = self.transform.translation;
            if translation.y >= self.motion.limits.max.y && self.motion.direction.y == 1.0 {
                self.transform.rotation_degrees.z -= 180.0;
                self.motion.direction.y = -1.0;
            } else if translation.y <= self.motion.limits.min.y && self.motion.direction.y == -1.0 {
                self.transform.rotation_degrees.z += 180.0;
                self.motion.direction.y = 1.0;
            }
            self.transform.translation.y += self.motion.direction.y * step;
        }
        if self.motion.moving[2] {
            let translation = self.transform.translation;
            if translation.z >= self.motion.limits.max.z && self.motion.direction.z == 1.0 {
                self.transform.rotation_degrees.y -= 180.0;
                self.motion.direction.z = -1.0;
            } else if translation.z <= self.motion.limits.min.z && self.motion.direction.z == -1.0 {
                self.transform.rotation_degrees.y += 180.0;
                self.motion.direction.z = 1.0;
            }
            self.transform.translation.z += self.motion.direction.z * step;
        }
    }
}

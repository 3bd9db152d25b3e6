//! Oriented plane sheets
//!
//! A plane is a rectangle sheet turned to face one of the six axis
//! directions. The facing rotation is baked into an inner sheet node so the
//! outer group node stays free for user transforms.

use glam::Vec3;

use crate::mesh::{GeometryError, RectangleBehaviour, UvRect, rectangle, rectangle_uvs};
use crate::scene::{Node, NodeArena, NodeId};
use crate::texture::TextureId;

/// Which way a planar or disc surface's outward normal points
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
    Forward,
    Backward,
}

impl Facing {
    /// Rotation preset that turns the flat +Y sheet to this facing
    pub(crate) fn rotation_degrees(self) -> Vec3 {
        match self {
            Facing::Up => Vec3::ZERO,
            Facing::Down => Vec3::new(-180.0, 0.0, 0.0),
            Facing::Backward => Vec3::new(90.0, 0.0, 0.0),
            Facing::Forward => Vec3::new(-90.0, 0.0, 0.0),
            Facing::Left => Vec3::new(-90.0, 0.0, 90.0),
            Facing::Right => Vec3::new(-90.0, 0.0, -90.0),
        }
    }

    /// Index of the axis perpendicular to a surface with this facing
    pub(crate) fn perpendicular_axis(self) -> usize {
        match self {
            Facing::Left | Facing::Right => 0,
            Facing::Up | Facing::Down => 1,
            Facing::Forward | Facing::Backward => 2,
        }
    }
}

/// An oriented rectangle sheet in the arena
#[derive(Clone, Copy, Debug)]
pub struct Plane {
    /// Outer group node; translate and rotate this one
    pub node: NodeId,
    /// Inner node carrying the geometry, colour and texture
    pub sheet: NodeId,
    pub facing: Facing,
    pub height: u32,
    pub width: u32,
    pub behaviour: RectangleBehaviour,
}

impl Plane {
    /// Create the two-node plane in the arena
    pub fn spawn(
        arena: &mut NodeArena,
        facing: Facing,
        height: u32,
        width: u32,
        behaviour: RectangleBehaviour,
    ) -> Result<Self, GeometryError> {
        let mut sheet_node = Node::new(rectangle(height, width, behaviour)?);
        sheet_node.transform.rotation_degrees = facing.rotation_degrees();
        let sheet = arena.insert(sheet_node);
        let node = arena.insert(Node::group());
        arena.attach_child(node, sheet);
        Ok(Self {
            node,
            sheet,
            facing,
            height,
            width,
            behaviour,
        })
    }

    pub fn set_colour(&self, arena: &mut NodeArena, colour: [f32; 4]) {
        if let Some(sheet) = arena.get_mut(self.sheet) {
            sheet.colour = colour;
        }
    }

    /// Texture the sheet with the full image
    pub fn set_texture(&self, arena: &mut NodeArena, texture: TextureId) {
        self.set_texture_region(arena, texture, UvRect::FULL);
    }

    /// Texture the sheet with a sub-rectangle of an atlas image
    ///
    /// Regenerates the UV buffer so the region change takes effect.
    pub fn set_texture_region(&self, arena: &mut NodeArena, texture: TextureId, region: UvRect) {
        if let Some(sheet) = arena.get_mut(self.sheet) {
            sheet.mesh.uvs = rectangle_uvs(self.height, self.width, self.behaviour, region);
            sheet.texture = Some(texture);
        }
    }

    /// The P, R, Q corner points of the sheet in world space
    ///
    /// Three non-collinear points on the surface, enough to derive its plane
    /// equation for planar shadows and mirrors.
    pub fn corners(&self, arena: &NodeArena) -> [Vec3; 3] {
        let translation = arena
            .get(self.node)
            .map(|node| node.transform.translation)
            .unwrap_or(Vec3::ZERO);
        let w = self.width as f32;
        let h = self.height as f32;
        let offsets = match self.facing {
            Facing::Up => [Vec3::ZERO, Vec3::new(0.0, 0.0, -h), Vec3::new(w, 0.0, -h)],
            Facing::Down => [Vec3::ZERO, Vec3::new(0.0, 0.0, h), Vec3::new(w, 0.0, h)],
            Facing::Backward => [Vec3::ZERO, Vec3::new(0.0, h, 0.0), Vec3::new(w, 0.0, 0.0)],
            Facing::Forward => [Vec3::ZERO, Vec3::new(0.0, -h, 0.0), Vec3::new(w, 0.0, 0.0)],
            Facing::Left | Facing::Right => {
                [Vec3::ZERO, Vec3::new(0.0, -h, 0.0), Vec3::new(0.0, 0.0, -w)]
            }
        };
        [
            translation + offsets[0],
            translation + offsets[1],
            translation + offsets[2],
        ]
    }
}

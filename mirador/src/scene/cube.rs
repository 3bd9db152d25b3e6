//! Cube composite
//!
//! Six oriented plane faces assembled so every outward normal points away
//! from the cube centre. Faces keep their own colour and texture mapping;
//! an atlas texture assigns each face a fixed sub-rectangle of one shared
//! image, laid out as a cross-shaped dice unfolding.

use glam::Vec3;

use crate::mesh::{GeometryError, RectangleBehaviour, UvRect};
use crate::scene::{Facing, Node, NodeArena, NodeId, Plane};
use crate::texture::{TextureCoordsKind, TextureId, TextureTable};

/// The six faces of a cube
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CubeFace {
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::Front,
        CubeFace::Back,
        CubeFace::Left,
        CubeFace::Right,
        CubeFace::Top,
        CubeFace::Bottom,
    ];

    /// Atlas sub-rectangle for this face in a cross-unfolded sheet
    fn atlas_region(self) -> UvRect {
        match self {
            CubeFace::Front => UvRect::new(0.25, 0.25, 0.5, 0.5),
            CubeFace::Back => UvRect::new(0.75, 0.25, 1.0, 0.5),
            CubeFace::Left => UvRect::new(0.0, 0.25, 0.25, 0.5),
            CubeFace::Right => UvRect::new(0.5, 0.25, 0.75, 0.5),
            CubeFace::Top => UvRect::new(0.25, 0.0, 0.5, 0.25),
            CubeFace::Bottom => UvRect::new(0.25, 0.5, 0.5, 0.75),
        }
    }

    /// Distinct default colour per face
    fn default_colour(self) -> [f32; 4] {
        match self {
            CubeFace::Front => [1.0, 0.0, 0.0, 1.0],
            CubeFace::Back => [0.0, 1.0, 0.0, 1.0],
            CubeFace::Left => [0.0, 0.0, 1.0, 1.0],
            CubeFace::Right => [0.5, 0.5, 0.0, 1.0],
            CubeFace::Top => [0.5, 0.0, 0.5, 1.0],
            CubeFace::Bottom => [0.0, 0.5, 0.5, 1.0],
        }
    }
}

/// A cube assembled from six plane faces, rooted at one group node
#[derive(Clone, Copy, Debug)]
pub struct Cube {
    pub node: NodeId,
    pub dimension: u32,
    faces: [Plane; 6],
}

impl Cube {
    /// Build the cube in the arena
    ///
    /// `coloured` gives every face its distinct default colour instead of
    /// white.
    pub fn spawn(
        arena: &mut NodeArena,
        dimension: u32,
        behaviour: RectangleBehaviour,
        coloured: bool,
    ) -> Result<Self, GeometryError> {
        let node = arena.insert(Node::group());
        let d = dimension as f32;

        // each face needs a facing plus a translation away from the shared
        // bottom-sheet origin
        let placements: [(CubeFace, Facing, Vec3); 6] = [
            (CubeFace::Front, Facing::Backward, Vec3::ZERO),
            (CubeFace::Back, Facing::Forward, Vec3::new(0.0, d, -d)),
            (CubeFace::Left, Facing::Left, Vec3::new(0.0, d, 0.0)),
            (CubeFace::Right, Facing::Right, Vec3::new(d, d, -d)),
            (CubeFace::Top, Facing::Up, Vec3::new(0.0, d, 0.0)),
            (CubeFace::Bottom, Facing::Down, Vec3::new(0.0, 0.0, -d)),
        ];

        let mut faces = Vec::with_capacity(6);
        for (face, facing, translation) in placements {
            let plane = Plane::spawn(arena, facing, dimension, dimension, behaviour)?;
            if let Some(group) = arena.get_mut(plane.node) {
                group.transform.translation = translation;
            }
            if coloured {
                plane.set_colour(arena, face.default_colour());
            }
            arena.attach_child(node, plane.node);
            faces.push(plane);
        }

        Ok(Self {
            node,
            dimension,
            faces: [faces[0], faces[1], faces[2], faces[3], faces[4], faces[5]],
        })
    }

    pub fn face(&self, face: CubeFace) -> &Plane {
        &self.faces[face as usize]
    }

    pub fn set_face_colour(&self, arena: &mut NodeArena, face: CubeFace, colour: [f32; 4]) {
        self.faces[face as usize].set_colour(arena, colour);
    }

    pub fn set_colour(&self, arena: &mut NodeArena, colour: [f32; 4]) {
        for plane in &self.faces {
            plane.set_colour(arena, colour);
        }
    }

    pub fn set_face_texture(&self, arena: &mut NodeArena, face: CubeFace, texture: TextureId) {
        self.faces[face as usize].set_texture(arena, texture);
    }

    /// Texture every face
    ///
    /// Atlas textures map the fixed per-face cross unfolding; plain textures
    /// repeat the full image on every face.
    pub fn set_texture(&self, arena: &mut NodeArena, textures: &TextureTable, texture: TextureId) {
        let atlas = textures
            .get(texture)
            .is_some_and(|t| t.coords == TextureCoordsKind::Atlas);
        for (face, plane) in CubeFace::ALL.iter().zip(&self.faces) {
            if atlas {
                plane.set_texture_region(arena, texture, face.atlas_region());
            } else {
                plane.set_texture(arena, texture);
            }
        }
    }

    /// Spin the cube around its vertical centre line
    ///
    /// The pivot recentres the rotation axis on the cube's middle; without
    /// it the cube would orbit its corner origin.
    pub fn set_spinning(&self, arena: &mut NodeArena, speed: f32) {
        let d = self.dimension as f32;
        if let Some(node) = arena.get_mut(self.node) {
            node.motion.rotating[1] = true;
            node.motion.speed = speed;
            node.pivot = Vec3::new(-d / 2.0, 0.0, d / 2.0);
        }
    }
}

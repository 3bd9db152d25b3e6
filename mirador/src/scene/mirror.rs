//! Mirror world
//!
//! Clones tracked nodes and keeps each clone positioned symmetrically
//! across the mirror surface. Clones never simulate on their own: every
//! update copies the original's live pose and reflects one coordinate, so a
//! reflection can not drift from the object it mirrors.

use tracing::debug;

use crate::mesh::{GeometryError, RectangleBehaviour, disc};
use crate::scene::{Facing, Node, NodeArena, NodeId, Plane};
use crate::texture::TextureId;

/// Handle to one reflection inside a [`MirrorWorld`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CopyId(u32);

impl CopyId {
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

struct Reflection {
    id: CopyId,
    /// The tracked node; referenced, not owned
    original: NodeId,
    /// The owned clone living behind the mirror
    copy: NodeId,
}

struct MirrorSurface {
    /// Node to translate/rotate and to draw in the stencil passes
    node: NodeId,
    /// Node carrying the surface geometry (differs from `node` for planes)
    geometry: NodeId,
    facing: Facing,
}

/// One mirror surface plus the reflections it tracks
#[derive(Default)]
pub struct MirrorWorld {
    surface: Option<MirrorSurface>,
    reflections: Vec<Reflection>,
    last_copy_id: u32,
}

impl MirrorWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialised(&self) -> bool {
        self.surface.is_some()
    }

    /// Create a rectangular mirror surface; later init calls are no-ops
    pub fn init_plane_mirror(
        &mut self,
        arena: &mut NodeArena,
        facing: Facing,
        height: u32,
        width: u32,
    ) -> Result<(), GeometryError> {
        if self.surface.is_some() {
            return Ok(());
        }
        let plane = Plane::spawn(arena, facing, height, width, RectangleBehaviour::Unit)?;
        self.surface = Some(MirrorSurface {
            node: plane.node,
            geometry: plane.sheet,
            facing,
        });
        Ok(())
    }

    /// Create a disc mirror surface; later init calls are no-ops
    pub fn init_disc_mirror(
        &mut self,
        arena: &mut NodeArena,
        facing: Facing,
        radius: f32,
        num_triangles: u32,
    ) -> Result<(), GeometryError> {
        if self.surface.is_some() {
            return Ok(());
        }
        let mut node = Node::new(disc(radius, num_triangles)?);
        if facing == Facing::Forward {
            // the disc faces backward (+Z) by default; turn it around
            node.transform.rotation_degrees.y = -180.0;
        }
        let id = arena.insert(node);
        self.surface = Some(MirrorSurface {
            node: id,
            geometry: id,
            facing,
        });
        Ok(())
    }

    /// The node to draw for the mirror surface
    pub fn surface_node(&self) -> Option<NodeId> {
        self.surface.as_ref().map(|surface| surface.node)
    }

    pub fn set_translation(&self, arena: &mut NodeArena, translation: glam::Vec3) {
        if let Some(surface) = &self.surface {
            if let Some(node) = arena.get_mut(surface.node) {
                node.transform.translation = translation;
            }
        }
    }

    pub fn set_colour(&self, arena: &mut NodeArena, colour: [f32; 4]) {
        if let Some(surface) = &self.surface {
            if let Some(node) = arena.get_mut(surface.geometry) {
                node.colour = colour;
            }
        }
    }

    /// Clone `original` into the mirror world
    ///
    /// The clone is a deep copy; `texture` (when given) is applied to the
    /// clone only. `invert_z` overrides the facing-derived inversion axis:
    /// without it, horizontal facings flip the clone left-right and
    /// vertical facings flip it top-bottom.
    pub fn create_reflection(
        &mut self,
        arena: &mut NodeArena,
        original: NodeId,
        invert_z: bool,
        texture: Option<TextureId>,
    ) -> Option<CopyId> {
        let surface_facing = self.surface.as_ref()?.facing;
        let copy = arena.clone_subtree(original)?;

        let node = arena.get_mut(copy)?;
        if let Some(texture) = texture {
            node.set_texture(texture);
        }
        if invert_z {
            node.invert_z();
        } else {
            match surface_facing {
                Facing::Left | Facing::Right | Facing::Forward | Facing::Backward => {
                    node.invert_horizontally();
                }
                Facing::Up | Facing::Down => node.invert_vertically(),
            }
        }

        self.last_copy_id += 1;
        let id = CopyId(self.last_copy_id);
        self.reflections.push(Reflection { id, original, copy });
        debug!(copy = id.as_raw(), "created reflection");
        Some(id)
    }

    /// Re-derive every clone's pose from its original, then update the
    /// mirror surface's own motion
    pub fn update(&mut self, arena: &mut NodeArena, dt: f32) {
        let Some(surface) = &self.surface else {
            return;
        };
        let Some(mirror_translation) = arena
            .get(surface.node)
            .map(|node| node.transform.translation)
        else {
            return;
        };
        let axis = surface.facing.perpendicular_axis();

        for reflection in &self.reflections {
            let Some(original) = arena.get(reflection.original) else {
                continue;
            };
            let translation = original.transform.translation;
            let rotation = original.transform.rotation_degrees;

            if let Some(copy) = arena.get_mut(reflection.copy) {
                copy.transform.translation = translation;
                copy.transform.rotation_degrees = rotation;
                // reflect across the mirror plane along the facing axis; the
                // two in-plane coordinates stay equal to the original's
                copy.transform.translation[axis] =
                    2.0 * mirror_translation[axis] - translation[axis];
            }
        }

        arena.update_subtree(surface.node, dt);
    }

    /// Destroy one reflection, clone subtree included
    pub fn remove_copy(&mut self, arena: &mut NodeArena, id: CopyId) {
        if let Some(position) = self.reflections.iter().position(|r| r.id == id) {
            let reflection = self.reflections.remove(position);
            arena.remove(reflection.copy);
        }
    }

    /// Clone nodes, in creation order, for the stencil-gated draw pass
    pub fn copies(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.reflections.iter().map(|reflection| reflection.copy)
    }

    pub fn reflection_count(&self) -> usize {
        self.reflections.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn arena_with_node(translation: Vec3) -> (NodeArena, NodeId) {
        let mut arena = NodeArena::new();
        let mut node = Node::new(disc(1.0, 4).unwrap());
        node.transform.translation = translation;
        let id = arena.insert(node);
        (arena, id)
    }

    #[test]
    fn test_init_is_idempotent() {
        let mut arena = NodeArena::new();
        let mut mirror = MirrorWorld::new();
        mirror
            .init_plane_mirror(&mut arena, Facing::Backward, 2, 4)
            .unwrap();
        let first = mirror.surface_node();
        mirror
            .init_disc_mirror(&mut arena, Facing::Forward, 1.0, 8)
            .unwrap();
        assert_eq!(mirror.surface_node(), first);
    }

    #[test]
    fn test_reflection_mirrors_across_up_facing() {
        let (mut arena, original) = arena_with_node(Vec3::new(3.0, 5.0, -2.0));
        let mut mirror = MirrorWorld::new();
        mirror
            .init_plane_mirror(&mut arena, Facing::Up, 2, 2)
            .unwrap();
        mirror.set_translation(&mut arena, Vec3::new(0.0, 1.0, 0.0));

        let id = mirror
            .create_reflection(&mut arena, original, false, None)
            .unwrap();
        mirror.update(&mut arena, 0.016);

        let copy = mirror.reflections[0].copy;
        let copied = arena.get(copy).unwrap().transform.translation;
        // mirrored coordinate: 2 * 1.0 - 5.0
        assert_eq!(copied, Vec3::new(3.0, -3.0, -2.0));
        assert_eq!(id.as_raw(), 1);
    }

    #[test]
    fn test_reflection_mirrors_across_backward_facing() {
        let (mut arena, original) = arena_with_node(Vec3::new(1.0, 2.0, -4.0));
        let mut mirror = MirrorWorld::new();
        mirror
            .init_plane_mirror(&mut arena, Facing::Backward, 2, 2)
            .unwrap();
        mirror.set_translation(&mut arena, Vec3::new(0.0, 0.0, -10.0));

        mirror.create_reflection(&mut arena, original, false, None);
        mirror.update(&mut arena, 0.016);

        let copy = mirror.reflections[0].copy;
        let copied = arena.get(copy).unwrap().transform.translation;
        // 2 * (-10) - (-4) = -16; x and y track the original exactly
        assert_eq!(copied, Vec3::new(1.0, 2.0, -16.0));
    }

    #[test]
    fn test_reflection_follows_moving_original() {
        let (mut arena, original) = arena_with_node(Vec3::new(0.0, 4.0, 0.0));
        let mut mirror = MirrorWorld::new();
        mirror
            .init_plane_mirror(&mut arena, Facing::Up, 2, 2)
            .unwrap();
        mirror.create_reflection(&mut arena, original, false, None);
        mirror.update(&mut arena, 0.016);

        // move the original; the clone must re-derive from the new pose
        arena.get_mut(original).unwrap().transform.translation = Vec3::new(7.0, 2.0, 1.0);
        arena.get_mut(original).unwrap().transform.rotation_degrees = Vec3::new(0.0, 90.0, 0.0);
        mirror.update(&mut arena, 0.016);

        let copy = mirror.reflections[0].copy;
        let transform = arena.get(copy).unwrap().transform;
        assert_eq!(transform.translation, Vec3::new(7.0, -2.0, 1.0));
        assert_eq!(transform.rotation_degrees, Vec3::new(0.0, 90.0, 0.0));
    }

    #[test]
    fn test_inversion_axis_follows_facing() {
        let (mut arena, original) = arena_with_node(Vec3::ZERO);
        let mut mirror = MirrorWorld::new();
        mirror
            .init_plane_mirror(&mut arena, Facing::Up, 2, 2)
            .unwrap();
        mirror.create_reflection(&mut arena, original, false, None);
        let copy = mirror.reflections[0].copy;
        assert_eq!(arena.get(copy).unwrap().transform.scale.y, -1.0);

        let mut side_mirror = MirrorWorld::new();
        side_mirror
            .init_plane_mirror(&mut arena, Facing::Left, 2, 2)
            .unwrap();
        side_mirror.create_reflection(&mut arena, original, false, None);
        let side_copy = side_mirror.reflections[0].copy;
        assert_eq!(arena.get(side_copy).unwrap().transform.scale.x, -1.0);
    }

    #[test]
    fn test_invert_z_override() {
        let (mut arena, original) = arena_with_node(Vec3::ZERO);
        let mut mirror = MirrorWorld::new();
        mirror
            .init_plane_mirror(&mut arena, Facing::Up, 2, 2)
            .unwrap();
        mirror.create_reflection(&mut arena, original, true, None);
        let copy = mirror.reflections[0].copy;
        let scale = arena.get(copy).unwrap().transform.scale;
        assert_eq!(scale.z, -1.0);
        assert_eq!(scale.y, 1.0);
    }

    #[test]
    fn test_special_texture_applies_to_copy_only() {
        let (mut arena, original) = arena_with_node(Vec3::ZERO);
        let mut textures = crate::texture::TextureTable::new();
        let texture = textures.insert(crate::texture::Texture {
            name: "ghost".into(),
            width: 1,
            height: 1,
            pixels: vec![255, 255, 255, 128],
            wrap_s: Default::default(),
            wrap_t: Default::default(),
            coords: Default::default(),
        });

        let mut mirror = MirrorWorld::new();
        mirror
            .init_plane_mirror(&mut arena, Facing::Up, 2, 2)
            .unwrap();
        mirror.create_reflection(&mut arena, original, false, Some(texture));

        let copy = mirror.reflections[0].copy;
        assert_eq!(arena.get(copy).unwrap().texture, Some(texture));
        assert_eq!(arena.get(original).unwrap().texture, None);
    }

    #[test]
    fn test_glass_tint_lands_on_surface_geometry() {
        let mut arena = NodeArena::new();
        let mut mirror = MirrorWorld::new();
        mirror
            .init_plane_mirror(&mut arena, Facing::Backward, 2, 4)
            .unwrap();
        mirror.set_colour(&mut arena, [0.8, 0.9, 1.0, 0.4]);

        // the tint goes on the sheet that actually draws, not the group
        let surface = mirror.surface_node().unwrap();
        let group = arena.get(surface).unwrap();
        assert_eq!(group.colour, crate::scene::WHITE);
        let sheet = arena.get(group.children[0]).unwrap();
        assert_eq!(sheet.colour, [0.8, 0.9, 1.0, 0.4]);
    }

    #[test]
    fn test_remove_copy_destroys_clone() {
        let (mut arena, original) = arena_with_node(Vec3::ZERO);
        let mut mirror = MirrorWorld::new();
        mirror
            .init_plane_mirror(&mut arena, Facing::Up, 2, 2)
            .unwrap();
        let id = mirror
            .create_reflection(&mut arena, original, false, None)
            .unwrap();
        let copy = mirror.reflections[0].copy;

        mirror.remove_copy(&mut arena, id);
        assert_eq!(mirror.reflection_count(), 0);
        assert!(!arena.contains(copy));
        assert!(arena.contains(original));
    }

    #[test]
    fn test_copy_ids_increase_monotonically() {
        let (mut arena, original) = arena_with_node(Vec3::ZERO);
        let mut mirror = MirrorWorld::new();
        mirror
            .init_plane_mirror(&mut arena, Facing::Up, 2, 2)
            .unwrap();
        let a = mirror
            .create_reflection(&mut arena, original, false, None)
            .unwrap();
        let b = mirror
            .create_reflection(&mut arena, original, false, None)
            .unwrap();
        mirror.remove_copy(&mut arena, a);
        let c = mirror
            .create_reflection(&mut arena, original, false, None)
            .unwrap();
        assert!(b.as_raw() > a.as_raw());
        assert!(c.as_raw() > b.as_raw());
    }
}

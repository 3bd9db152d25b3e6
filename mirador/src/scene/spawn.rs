//! Composite shape spawners

use glam::Vec3;

use crate::mesh::{GeometryError, cone, disc};
use crate::scene::{Node, NodeArena, NodeId};

/// Spawn a cone-family node, with optional cap discs attached as children
///
/// Covers cone, cylinder, pyramid and N-gon prism shapes. The base disc is
/// turned face-down under the side wall; the top disc is lifted to `height`
/// and turned face-up. Caps are separate child nodes so they can carry
/// their own colour and texture.
pub fn spawn_cone(
    arena: &mut NodeArena,
    base_radius: f32,
    top_radius: f32,
    height: f32,
    long_segs: u32,
    lat_segs: u32,
    has_top_disc: bool,
    has_base_disc: bool,
) -> Result<NodeId, GeometryError> {
    let side = arena.insert(Node::new(cone(
        base_radius,
        top_radius,
        height,
        long_segs,
        lat_segs,
    )?));

    if has_base_disc && base_radius > 0.0 {
        let mut base = Node::new(disc(base_radius, lat_segs)?);
        base.transform.rotation_degrees = Vec3::new(90.0, 0.0, 0.0);
        let base_id = arena.insert(base);
        arena.attach_child(side, base_id);
    }

    if has_top_disc && top_radius > 0.0 {
        let mut top = Node::new(disc(top_radius, lat_segs)?);
        top.transform.translation = Vec3::new(0.0, height, 0.0);
        top.transform.rotation_degrees = Vec3::new(-90.0, 0.0, 0.0);
        let top_id = arena.insert(top);
        arena.attach_child(side, top_id);
    }

    Ok(side)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cylinder_with_both_caps() {
        let mut arena = NodeArena::new();
        let id = spawn_cone(&mut arena, 1.0, 1.0, 2.0, 3, 8, true, true).unwrap();
        let node = arena.get(id).unwrap();
        assert_eq!(node.children.len(), 2);
        assert_eq!(arena.len(), 3);

        let base = arena.get(node.children[0]).unwrap();
        assert_eq!(base.transform.rotation_degrees, Vec3::new(90.0, 0.0, 0.0));
        let top = arena.get(node.children[1]).unwrap();
        assert_eq!(top.transform.translation, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(top.transform.rotation_degrees, Vec3::new(-90.0, 0.0, 0.0));
    }

    #[test]
    fn test_true_cone_skips_top_cap() {
        let mut arena = NodeArena::new();
        // a zero top radius has nothing to cap even when asked
        let id = spawn_cone(&mut arena, 1.0, 0.0, 2.0, 3, 8, true, true).unwrap();
        assert_eq!(arena.get(id).unwrap().children.len(), 1);
    }

    #[test]
    fn test_pyramid_from_few_segments() {
        let mut arena = NodeArena::new();
        let id = spawn_cone(&mut arena, 1.0, 0.0, 1.5, 1, 4, false, true).unwrap();
        let node = arena.get(id).unwrap();
        // 2 rings x 5 columns on the side wall
        assert_eq!(node.mesh.vertex_count(), 10);
        assert_eq!(node.children.len(), 1);
    }

    #[test]
    fn test_removing_cone_removes_caps() {
        let mut arena = NodeArena::new();
        let id = spawn_cone(&mut arena, 1.0, 1.0, 2.0, 2, 6, true, true).unwrap();
        arena.remove(id);
        assert!(arena.is_empty());
    }
}

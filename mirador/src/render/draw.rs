//! Scene-graph draw passes

use glam::{Mat4, Vec3};

use crate::mesh::DereferenceMethod;
use crate::scene::{MirrorWorld, NodeArena, NodeId, WHITE};
use crate::texture::TextureTable;

use super::{CompareFunc, DrawBuffers, RenderBackend, StencilOp};

/// Colour forced onto geometry in shadow passes
pub const SHADOW_COLOUR: [f32; 4] = [0.1, 0.1, 0.1, 1.0];

/// Draw one node and its subtree
///
/// Applies translate, rotate X, rotate Y, rotate Z, scale in that fixed
/// order (plus the pivot translate when set), issues one draw per the
/// node's dereference strategy, recurses into children under the same
/// transform, then restores the stack. Shadow passes force the shadow
/// colour and skip textures.
pub fn draw_node<B: RenderBackend>(
    backend: &mut B,
    arena: &NodeArena,
    textures: &TextureTable,
    id: NodeId,
    is_shadow: bool,
) {
    let Some(node) = arena.get(id) else {
        return;
    };

    if is_shadow {
        backend.set_colour(SHADOW_COLOUR);
    } else {
        backend.set_colour(node.colour);
        if let Some(material) = &node.material {
            backend.apply_material(material);
        }
    }

    let mut textured = false;
    if !is_shadow && !node.mesh.uvs.is_empty() {
        if let Some(texture_id) = node.texture {
            if let Some(texture) = textures.get(texture_id) {
                backend.bind_texture(texture_id, texture);
                textured = true;
            }
        }
    }

    backend.push_matrix();
    backend.translate(node.transform.translation);
    backend.rotate_x(node.transform.rotation_degrees.x);
    backend.rotate_y(node.transform.rotation_degrees.y);
    backend.rotate_z(node.transform.rotation_degrees.z);
    backend.scale(node.transform.scale);
    if node.pivot != Vec3::ZERO {
        backend.translate(node.pivot);
    }

    if !node.mesh.is_empty() {
        let buffers = DrawBuffers {
            positions: &node.mesh.positions,
            normals: &node.mesh.normals,
            uvs: if textured { Some(&node.mesh.uvs) } else { None },
        };
        match node.dereference {
            DereferenceMethod::PerVertex => backend.draw_per_vertex(node.topology, buffers),
            DereferenceMethod::BulkArrays => {
                if node.mesh.runs.is_empty() {
                    backend.draw_arrays(
                        node.topology,
                        buffers,
                        0,
                        node.mesh.vertex_count() as u32,
                    );
                } else {
                    // one bulk call per contiguous topology run
                    let mut first = 0;
                    for run in &node.mesh.runs {
                        backend.draw_arrays(run.topology, buffers, first, run.vertex_end - first);
                        first = run.vertex_end;
                    }
                }
            }
            DereferenceMethod::Indexed => {
                backend.draw_elements(node.topology, buffers, &node.mesh.indices);
            }
        }
    }

    for &child in &node.children {
        draw_node(backend, arena, textures, child, is_shadow);
    }

    backend.pop_matrix();

    if textured {
        backend.unbind_texture();
    }
    backend.set_colour(WHITE);
}

/// Draw a mirror world with the three-pass stencil protocol
///
/// Pass 1 writes the mirror silhouette into the stencil buffer only, pass 2
/// draws the clones where the silhouette was written, pass 3 lays the
/// blended glass surface on top. The order is load-bearing: anything else
/// lets reflections leak outside the mirror or hides them under the glass.
pub fn draw_mirror_world<B: RenderBackend>(
    backend: &mut B,
    arena: &NodeArena,
    textures: &TextureTable,
    mirror: &MirrorWorld,
) {
    let Some(surface) = mirror.surface_node() else {
        return;
    };

    // pass 1: silhouette into stencil, no colour or depth writes
    backend.set_depth_test(false);
    backend.set_colour_mask(false);
    backend.set_stencil_test(true);
    backend.stencil_op(StencilOp::Replace, StencilOp::Replace, StencilOp::Replace);
    backend.stencil_func(CompareFunc::Always, 1, 0xffff_ffff);
    draw_node(backend, arena, textures, surface, false);

    // pass 2: reflections, gated to the silhouette
    backend.set_colour_mask(true);
    backend.set_depth_test(true);
    backend.stencil_func(CompareFunc::Equal, 1, 0xffff_ffff);
    backend.stencil_op(StencilOp::Keep, StencilOp::Keep, StencilOp::Keep);
    for copy in mirror.copies() {
        draw_node(backend, arena, textures, copy, false);
    }

    // pass 3: translucent glass overlay, unlit
    backend.set_stencil_test(false);
    backend.set_blend(true);
    backend.set_lighting(false);
    draw_node(backend, arena, textures, surface, false);
    backend.set_lighting(true);
    backend.set_blend(false);
}

/// Flatten caster subtrees through a shadow matrix
///
/// Depth test and lighting are off while the darkened geometry is drawn;
/// the caller brackets this with the stencil state that keeps shadows on
/// their receiving surface.
pub fn draw_planar_shadow<B: RenderBackend>(
    backend: &mut B,
    arena: &NodeArena,
    textures: &TextureTable,
    casters: &[NodeId],
    matrix: &Mat4,
) {
    backend.set_depth_test(false);
    backend.set_lighting(false);

    backend.push_matrix();
    backend.mult_matrix(matrix);
    for &caster in casters {
        draw_node(backend, arena, textures, caster, true);
    }
    backend.pop_matrix();

    backend.set_lighting(true);
    backend.set_depth_test(true);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{DereferenceMethod, disc};
    use crate::render::{TraceBackend, TraceCommand};
    use crate::scene::{Facing, Node};

    fn single_node_scene() -> (NodeArena, TextureTable, NodeId) {
        let mut arena = NodeArena::new();
        let mut node = Node::new(disc(1.0, 4).unwrap());
        node.transform.translation = Vec3::new(1.0, 2.0, 3.0);
        node.transform.rotation_degrees = Vec3::new(10.0, 20.0, 30.0);
        node.transform.scale = Vec3::new(2.0, 2.0, 2.0);
        let id = arena.insert(node);
        (arena, TextureTable::new(), id)
    }

    #[test]
    fn test_transform_order_is_translate_rotate_scale() {
        let (arena, textures, id) = single_node_scene();
        let mut backend = TraceBackend::new();
        draw_node(&mut backend, &arena, &textures, id, false);

        let commands = &backend.commands;
        let position = |needle: &TraceCommand| {
            commands
                .iter()
                .position(|command| command == needle)
                .unwrap()
        };
        let translate = position(&TraceCommand::Translate([1.0, 2.0, 3.0]));
        let rx = position(&TraceCommand::RotateX(10.0));
        let ry = position(&TraceCommand::RotateY(20.0));
        let rz = position(&TraceCommand::RotateZ(30.0));
        let scale = position(&TraceCommand::Scale([2.0, 2.0, 2.0]));
        assert!(translate < rx && rx < ry && ry < rz && rz < scale);
    }

    #[test]
    fn test_shadow_pass_forces_dark_colour() {
        let (arena, textures, id) = single_node_scene();
        let mut backend = TraceBackend::new();
        draw_node(&mut backend, &arena, &textures, id, true);
        assert_eq!(backend.commands[0], TraceCommand::SetColour(SHADOW_COLOUR));
        assert!(
            !backend
                .commands
                .iter()
                .any(|command| matches!(command, TraceCommand::BindTexture(_)))
        );
    }

    #[test]
    fn test_dereference_strategies_pick_draw_calls() {
        let (mut arena, textures, id) = single_node_scene();

        let mut backend = TraceBackend::new();
        draw_node(&mut backend, &arena, &textures, id, false);
        assert!(
            backend
                .commands
                .iter()
                .any(|command| matches!(command, TraceCommand::DrawElements { .. }))
        );

        arena.get_mut(id).unwrap().dereference = DereferenceMethod::BulkArrays;
        let mut backend = TraceBackend::new();
        draw_node(&mut backend, &arena, &textures, id, false);
        assert!(
            backend
                .commands
                .iter()
                .any(|command| matches!(command, TraceCommand::DrawArrays { .. }))
        );

        arena.get_mut(id).unwrap().dereference = DereferenceMethod::PerVertex;
        let mut backend = TraceBackend::new();
        draw_node(&mut backend, &arena, &textures, id, false);
        assert!(
            backend
                .commands
                .iter()
                .any(|command| matches!(command, TraceCommand::DrawPerVertex { .. }))
        );
    }

    #[test]
    fn test_material_applies_outside_shadow_passes() {
        let (mut arena, textures, id) = single_node_scene();
        arena.get_mut(id).unwrap().material =
            Some(crate::light::Material::polished([1.0; 4], 76.8));

        let mut backend = TraceBackend::new();
        draw_node(&mut backend, &arena, &textures, id, false);
        assert!(
            backend
                .commands
                .iter()
                .any(|c| matches!(c, TraceCommand::ApplyMaterial))
        );

        let mut backend = TraceBackend::new();
        draw_node(&mut backend, &arena, &textures, id, true);
        assert!(
            !backend
                .commands
                .iter()
                .any(|c| matches!(c, TraceCommand::ApplyMaterial))
        );
    }

    #[test]
    fn test_children_draw_inside_parent_stack() {
        let (mut arena, textures, id) = single_node_scene();
        let child = arena.insert(Node::new(disc(0.5, 4).unwrap()));
        arena.attach_child(id, child);

        let mut backend = TraceBackend::new();
        draw_node(&mut backend, &arena, &textures, id, false);

        // two draws, but only one push/pop pair per node: the child's draw
        // happens before the parent's pop
        let pushes: Vec<usize> = backend
            .commands
            .iter()
            .enumerate()
            .filter(|(_, c)| matches!(c, TraceCommand::PushMatrix))
            .map(|(i, _)| i)
            .collect();
        let pops: Vec<usize> = backend
            .commands
            .iter()
            .enumerate()
            .filter(|(_, c)| matches!(c, TraceCommand::PopMatrix))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(pushes.len(), 2);
        assert_eq!(pops.len(), 2);
        assert!(pushes[1] > pushes[0]);
        assert!(pops[0] < pops[1]);
        // nested: parent push < child push < child pop < parent pop
        assert!(pushes[0] < pushes[1] && pops[0] > pushes[1] && pops[1] > pops[0]);
    }

    #[test]
    fn test_mirror_world_three_pass_order() {
        let mut arena = NodeArena::new();
        let textures = TextureTable::new();
        let original = arena.insert(Node::new(disc(1.0, 4).unwrap()));

        let mut mirror = MirrorWorld::new();
        mirror
            .init_plane_mirror(&mut arena, Facing::Backward, 2, 2)
            .unwrap();
        mirror.create_reflection(&mut arena, original, false, None);

        let mut backend = TraceBackend::new();
        draw_mirror_world(&mut backend, &arena, &textures, &mirror);

        let commands = &backend.commands;
        let first = |needle: &TraceCommand| commands.iter().position(|c| c == needle).unwrap();

        // silhouette write: colour mask off with ALWAYS/REPLACE
        let mask_off = first(&TraceCommand::SetColourMask(false));
        let stencil_always = first(&TraceCommand::StencilFunc {
            func: CompareFunc::Always,
            reference: 1,
            mask: 0xffff_ffff,
        });
        // gated reflection draw
        let stencil_equal = first(&TraceCommand::StencilFunc {
            func: CompareFunc::Equal,
            reference: 1,
            mask: 0xffff_ffff,
        });
        // blended surface
        let blend_on = first(&TraceCommand::SetBlend(true));
        let lighting_off = first(&TraceCommand::SetLighting(false));

        assert!(mask_off < stencil_always);
        assert!(stencil_always < stencil_equal);
        assert!(stencil_equal < blend_on);
        assert!(blend_on <= lighting_off);

        // the stencil test ends before the glass overlay
        let stencil_off = first(&TraceCommand::SetStencilTest(false));
        assert!(stencil_equal < stencil_off && stencil_off < lighting_off);
    }

    #[test]
    fn test_planar_shadow_brackets_state() {
        let (arena, textures, id) = single_node_scene();
        let mut backend = TraceBackend::new();
        let matrix = Mat4::IDENTITY;
        draw_planar_shadow(&mut backend, &arena, &textures, &[id], &matrix);

        let commands = &backend.commands;
        assert_eq!(commands[0], TraceCommand::SetDepthTest(false));
        assert_eq!(commands[1], TraceCommand::SetLighting(false));
        assert_eq!(commands[commands.len() - 2], TraceCommand::SetLighting(true));
        assert_eq!(commands[commands.len() - 1], TraceCommand::SetDepthTest(true));
        assert!(
            commands
                .iter()
                .any(|c| matches!(c, TraceCommand::MultMatrix))
        );
    }
}

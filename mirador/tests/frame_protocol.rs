//! Whole-frame integration: a small scene driven through the strict
//! input -> update -> render tick against the trace backend.

use glam::Vec3;

use mirador::camera::{Camera, CameraKind};
use mirador::light::Light;
use mirador::mesh::{RectangleBehaviour, sphere, write_obj};
use mirador::model::parse_obj;
use mirador::render::{CompareFunc, TraceBackend, TraceCommand};
use mirador::scene::{AxisLimits, Facing, MirrorWorld, Node, Plane, Scene};
use mirador::{FrameContext, InputState};

const DIM: [f32; 4] = [0.2, 0.2, 0.2, 1.0];
const FULL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const NONE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

fn demo_scene() -> Scene {
    let mut scene = Scene::new();

    // a sphere patrolling the z axis
    let mut ball = Node::new(sphere(0.8, 16, 16).unwrap());
    ball.transform.translation = Vec3::new(1.0, 0.5, -2.0);
    ball.motion.moving = [false, false, true];
    ball.motion.direction = -Vec3::Z;
    ball.motion.speed = 2.5;
    ball.motion.limits = AxisLimits::new(Vec3::new(1.0, 0.5, -22.0), Vec3::new(1.0, 0.5, -2.0));
    let ball_id = scene.arena.insert(ball);
    scene.add_root(ball_id);
    scene.register_name("ball", ball_id);

    // the floor receives planar shadows
    let floor = Plane::spawn(
        &mut scene.arena,
        Facing::Up,
        24,
        20,
        RectangleBehaviour::Split,
    )
    .unwrap();
    scene.add_shadow_surface(floor);

    // back-wall mirror reflecting the ball
    let mut mirror = MirrorWorld::new();
    mirror
        .init_plane_mirror(&mut scene.arena, Facing::Backward, 4, 6)
        .unwrap();
    mirror.set_translation(&mut scene.arena, Vec3::new(0.0, 0.0, -24.0));
    mirror.create_reflection(&mut scene.arena, ball_id, false, None);
    scene.add_mirror(mirror);

    // a light overhead
    scene
        .lights
        .add(Light::point(DIM, FULL, NONE, [7.0, 7.0, -9.0]))
        .unwrap();

    // a camera tracking the ball
    let mut chase = Camera::new();
    chase.kind = CameraKind::Tracking;
    let chase_index = scene.cameras.add(chase);
    scene
        .cameras
        .link_node(chase_index, ball_id, Vec3::new(0.0, 0.3, 0.0));

    scene
}

#[test]
fn frame_orders_camera_lights_shadows_geometry_mirrors() {
    let mut scene = demo_scene();
    let mut input = InputState::new();
    let ctx = FrameContext::new(0.016, 1280, 720);
    let mut backend = TraceBackend::new();

    scene.tick(&mut input, &ctx, &mut backend);

    let commands = &backend.commands;
    let camera = commands
        .iter()
        .position(|c| matches!(c, TraceCommand::ApplyCamera { .. }))
        .unwrap();
    let light = commands
        .iter()
        .position(|c| matches!(c, TraceCommand::ApplyLight { .. }))
        .unwrap();
    let shadow_stencil = commands
        .iter()
        .position(|c| {
            matches!(
                c,
                TraceCommand::StencilFunc {
                    func: CompareFunc::Always,
                    reference: 2,
                    ..
                }
            )
        })
        .unwrap();
    let shadow_flatten = commands
        .iter()
        .position(|c| matches!(c, TraceCommand::MultMatrix))
        .unwrap();
    let mirror_silhouette = commands
        .iter()
        .position(|c| {
            matches!(
                c,
                TraceCommand::StencilFunc {
                    func: CompareFunc::Always,
                    reference: 1,
                    ..
                }
            )
        })
        .unwrap();
    let mirror_gate = commands
        .iter()
        .position(|c| {
            matches!(
                c,
                TraceCommand::StencilFunc {
                    func: CompareFunc::Equal,
                    reference: 1,
                    ..
                }
            )
        })
        .unwrap();

    assert!(camera < light);
    assert!(light < shadow_stencil);
    assert!(shadow_stencil < shadow_flatten);
    assert!(shadow_flatten < mirror_silhouette);
    assert!(mirror_silhouette < mirror_gate);

    // the transform stack balances over the whole frame
    let pushes = commands
        .iter()
        .filter(|c| matches!(c, TraceCommand::PushMatrix))
        .count();
    let pops = commands
        .iter()
        .filter(|c| matches!(c, TraceCommand::PopMatrix))
        .count();
    assert_eq!(pushes, pops);
}

#[test]
fn reflection_tracks_the_moving_ball() {
    let mut scene = demo_scene();
    let mut input = InputState::new();
    let ctx = FrameContext::new(0.5, 1280, 720);
    let mut backend = TraceBackend::new();

    scene.tick(&mut input, &ctx, &mut backend);
    scene.tick(&mut input, &ctx, &mut backend);

    let ball = scene.node_named("ball").unwrap();
    let ball_z = scene
        .arena
        .get(ball)
        .unwrap()
        .transform
        .translation
        .z;
    // the ball moved away from its start
    assert!(ball_z < -2.0);

    // the clone sits symmetrically across the mirror plane at z = -24
    let mirror = scene.mirror_mut(0).unwrap();
    let copy = mirror.copies().next().unwrap();
    let copy_translation = scene.arena.get(copy).unwrap().transform.translation;
    assert_eq!(copy_translation.z, 2.0 * -24.0 - ball_z);
    assert_eq!(copy_translation.x, 1.0);
    assert_eq!(copy_translation.y, 0.5);
}

#[test]
fn tracking_camera_follows_the_ball() {
    let mut scene = demo_scene();
    let mut input = InputState::new();
    let ctx = FrameContext::new(0.25, 1280, 720);
    let mut backend = TraceBackend::new();

    // switch to the tracking camera with the number key
    input.set_key_down(b'2');
    scene.tick(&mut input, &ctx, &mut backend);

    // cameras update before nodes, so the tracker picks up this pose on the
    // next tick
    let ball = scene.node_named("ball").unwrap();
    let ball_translation = scene.arena.get(ball).unwrap().transform.translation;
    scene.tick(&mut input, &ctx, &mut backend);

    let camera = scene.cameras.active();
    assert_eq!(
        camera.position,
        ball_translation + Vec3::new(0.0, 0.3, 0.0)
    );
}

#[test]
fn exported_primitives_reload_through_the_model_path() {
    let mesh = sphere(1.0, 6, 8).unwrap();
    let mut obj = Vec::new();
    write_obj(&mesh, "sphere", &mut obj).unwrap();

    let reloaded = parse_obj(std::str::from_utf8(&obj).unwrap()).unwrap();
    // unrolled: three corners per exported triangle
    assert_eq!(reloaded.vertex_count(), mesh.triangle_count() * 3);
    assert_eq!(reloaded.runs.len(), 1);
}

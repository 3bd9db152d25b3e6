//! Camera rig
//!
//! Orientation is free-running pitch/yaw/roll in degrees; the forward, up
//! and right vectors are re-derived from the angles on every change via the
//! spherical parametrization, never integrated, so they can not drift out
//! of orthogonality.

use glam::Vec3;

use crate::context::FrameContext;
use crate::input::InputState;
use crate::scene::{NodeArena, NodeId};

/// Per-axis angle bounds
///
/// The ±360 sentinel pair means "unclamped": the angle is free, but resets
/// to 0 once it overflows the sentinel. Any tighter pair hard-clamps to the
/// boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngleLimits {
    pub max: f32,
    pub min: f32,
}

impl AngleLimits {
    pub const UNCLAMPED: Self = Self {
        max: 360.0,
        min: -360.0,
    };

    pub fn new(max: f32, min: f32) -> Self {
        Self { max, min }
    }

    fn is_unclamped(&self) -> bool {
        self.max == 360.0 && self.min == -360.0
    }

    fn clamp(&self, angle: f32) -> f32 {
        if self.is_unclamped() {
            if angle > self.max || angle < self.min {
                0.0
            } else {
                angle
            }
        } else if angle > self.max {
            self.max
        } else if angle < self.min {
            self.min
        } else {
            angle
        }
    }
}

impl Default for AngleLimits {
    fn default() -> Self {
        Self::UNCLAMPED
    }
}

/// Which input channels a camera listens to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CameraKind {
    /// No input at all
    #[default]
    FixedPoint,
    /// Mouse-look, pan/tilt keys and zoom (security cameras, sight guns)
    Rotating,
    /// Full six-axis movement plus cant
    Floating,
    /// Pose copied from a linked node every update
    Tracking,
}

#[derive(Clone, Copy, Debug)]
struct TrackedNode {
    node: NodeId,
    eye_offset: Vec3,
}

/// A single camera
#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Vec3,
    forward: Vec3,
    up: Vec3,
    right: Vec3,
    look_at: Vec3,
    pitch: f32,
    yaw: f32,
    roll: f32,
    fov: f32,
    pub movement_speed: f32,
    pub rotation_speed: f32,
    pub zoom_speed: f32,
    pub kind: CameraKind,
    pub pitch_limits: AngleLimits,
    pub yaw_limits: AngleLimits,
    pub roll_limits: AngleLimits,
    tracked: Option<TrackedNode>,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    pub fn new() -> Self {
        let mut camera = Self {
            position: Vec3::new(0.0, 0.0, 8.0),
            forward: Vec3::ZERO,
            up: Vec3::ZERO,
            right: Vec3::ZERO,
            look_at: Vec3::ZERO,
            pitch: 0.0,
            yaw: 0.0,
            roll: 0.0,
            fov: 45.0,
            movement_speed: 0.0,
            rotation_speed: 0.0,
            zoom_speed: 0.0,
            kind: CameraKind::FixedPoint,
            pitch_limits: AngleLimits::UNCLAMPED,
            yaw_limits: AngleLimits::UNCLAMPED,
            roll_limits: AngleLimits::UNCLAMPED,
            tracked: None,
        };
        camera.refresh_axes();
        camera.refresh_look_at();
        camera
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.refresh_look_at();
    }

    /// Set pitch, yaw and roll in degrees
    pub fn set_rotation(&mut self, pitch: f32, yaw: f32, roll: f32) {
        self.pitch = pitch;
        self.yaw = yaw;
        self.roll = roll;
        self.refresh_axes();
        self.refresh_look_at();
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn roll(&self) -> f32 {
        self.roll
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    /// Follow `node` with a fixed eye offset (tracking cameras)
    pub fn track_node(&mut self, node: NodeId, eye_offset: Vec3) {
        self.tracked = Some(TrackedNode { node, eye_offset });
    }

    /// Derive the tracking pose; other kinds hold their state between inputs
    pub fn update(&mut self, arena: &NodeArena, _dt: f32) {
        if self.kind != CameraKind::Tracking {
            return;
        }
        let Some(tracked) = self.tracked else {
            return;
        };
        let Some(node) = arena.get(tracked.node) else {
            return;
        };
        let rotation = node.transform.rotation_degrees;
        self.pitch = rotation.x;
        self.yaw = rotation.y;
        self.roll = rotation.z;
        self.position = node.transform.translation + tracked.eye_offset;
        self.refresh_axes();
        self.refresh_look_at();
    }

    /// Process the input channels this camera kind listens to
    pub fn handle_input(
        &mut self,
        input: &mut InputState,
        ctx: &FrameContext,
        first_mouse: &mut bool,
        dt: f32,
    ) {
        if matches!(self.kind, CameraKind::Rotating | CameraKind::Floating) {
            self.handle_mouse_look(input, ctx, first_mouse, dt);
            self.handle_keys(input, dt);
        }
        if self.kind == CameraKind::Rotating {
            self.handle_mouse_wheel(input, dt);
        }
    }

    fn handle_mouse_look(
        &mut self,
        input: &mut InputState,
        ctx: &FrameContext,
        first_mouse: &mut bool,
        dt: f32,
    ) {
        let (centre_x, centre_y) = ctx.window_centre();
        let (x, y) = input.mouse_position();

        if !*first_mouse && (x != centre_x || y != centre_y) {
            self.yaw += (x - centre_x) as f32 * (self.rotation_speed * dt);
            // reversed: window y grows downwards
            self.pitch += (centre_y - y) as f32 * (self.rotation_speed * dt);
            self.clamp_yaw();
            self.clamp_pitch();
            self.refresh_axes();
            self.refresh_look_at();
        }

        *first_mouse = false;
        // the embedding warps the captured pointer back to this position
        input.set_mouse_position(centre_x, centre_y);
    }

    fn handle_mouse_wheel(&mut self, input: &mut InputState, dt: f32) {
        if input.scroll_up() {
            input.set_scroll_up(false);
            self.fov -= self.zoom_speed * dt;
        } else if input.scroll_down() {
            input.set_scroll_down(false);
            self.fov += self.zoom_speed * dt;
        }
        self.fov = self.fov.clamp(1.0, 45.0);
    }

    fn handle_keys(&mut self, input: &mut InputState, dt: f32) {
        // cant is unlocked only on the free-flying camera
        if self.kind == CameraKind::Floating {
            if input.is_key_down(b'i') {
                input.set_key_up(b'i');
                self.cant_right(dt);
            } else if input.is_key_down(b'y') {
                input.set_key_up(b'y');
                self.cant_left(dt);
            }
        }

        if input.is_key_down(b'k') {
            input.set_key_up(b'k');
            self.pan_right(dt);
        } else if input.is_key_down(b'h') {
            input.set_key_up(b'h');
            self.pan_left(dt);
        }
        if input.is_key_down(b'u') {
            input.set_key_up(b'u');
            self.tilt_up(dt);
        } else if input.is_key_down(b'j') {
            input.set_key_up(b'j');
            self.tilt_down(dt);
        }

        // translation comes after rotation: it moves along the vectors the
        // rotation just refreshed
        if self.kind == CameraKind::Floating {
            if input.is_key_down(b'w') {
                input.set_key_up(b'w');
                self.dolly_in(dt);
            } else if input.is_key_down(b's') {
                input.set_key_up(b's');
                self.dolly_out(dt);
            }
            if input.is_key_down(b'q') {
                input.set_key_up(b'q');
                self.pedestal_up(dt);
            } else if input.is_key_down(b'e') {
                input.set_key_up(b'e');
                self.pedestal_down(dt);
            }
            if input.is_key_down(b'd') {
                input.set_key_up(b'd');
                self.truck_right(dt);
            } else if input.is_key_down(b'a') {
                input.set_key_up(b'a');
                self.truck_left(dt);
            }
        }
    }

    /// Move along the forward vector
    pub fn dolly_in(&mut self, dt: f32) {
        self.position += self.forward * (self.movement_speed * dt);
        self.refresh_look_at();
    }

    pub fn dolly_out(&mut self, dt: f32) {
        self.position -= self.forward * (self.movement_speed * dt);
        self.refresh_look_at();
    }

    /// Move along the up vector
    pub fn pedestal_up(&mut self, dt: f32) {
        self.position += self.up * (self.movement_speed * dt);
        self.refresh_look_at();
    }

    pub fn pedestal_down(&mut self, dt: f32) {
        self.position -= self.up * (self.movement_speed * dt);
        self.refresh_look_at();
    }

    /// Move along the right vector
    pub fn truck_right(&mut self, dt: f32) {
        self.position += self.right * (self.movement_speed * dt);
        self.refresh_look_at();
    }

    pub fn truck_left(&mut self, dt: f32) {
        self.position -= self.right * (self.movement_speed * dt);
        self.refresh_look_at();
    }

    /// Rotate around the vertical axis
    pub fn pan_right(&mut self, dt: f32) {
        self.yaw += self.rotation_speed * dt;
        self.clamp_yaw();
        self.refresh_axes();
        self.refresh_look_at();
    }

    pub fn pan_left(&mut self, dt: f32) {
        self.yaw -= self.rotation_speed * dt;
        self.clamp_yaw();
        self.refresh_axes();
        self.refresh_look_at();
    }

    /// Rotate around the lateral axis
    pub fn tilt_up(&mut self, dt: f32) {
        self.pitch += self.rotation_speed * dt;
        self.clamp_pitch();
        self.refresh_axes();
        self.refresh_look_at();
    }

    pub fn tilt_down(&mut self, dt: f32) {
        self.pitch -= self.rotation_speed * dt;
        self.clamp_pitch();
        self.refresh_axes();
        self.refresh_look_at();
    }

    /// Rotate around the view axis
    pub fn cant_right(&mut self, dt: f32) {
        self.roll += self.rotation_speed * dt;
        self.clamp_roll();
        self.refresh_axes();
        self.refresh_look_at();
    }

    pub fn cant_left(&mut self, dt: f32) {
        self.roll -= self.rotation_speed * dt;
        self.clamp_roll();
        self.refresh_axes();
        self.refresh_look_at();
    }

    fn clamp_pitch(&mut self) {
        // hard stop at ±89 degrees regardless of configured limits: at 90
        // the look vector flips over the pole
        if self.pitch_limits.max > 89.0 && self.pitch > 89.0 {
            self.pitch = 89.0;
        } else if self.pitch_limits.min < -89.0 && self.pitch < -89.0 {
            self.pitch = -89.0;
        } else if self.pitch > self.pitch_limits.max {
            self.pitch = self.pitch_limits.max;
        } else if self.pitch < self.pitch_limits.min {
            self.pitch = self.pitch_limits.min;
        }
    }

    fn clamp_yaw(&mut self) {
        self.yaw = self.yaw_limits.clamp(self.yaw);
    }

    fn clamp_roll(&mut self) {
        self.roll = self.roll_limits.clamp(self.roll);
    }

    fn refresh_axes(&mut self) {
        let (sin_pitch, cos_pitch) = self.pitch.to_radians().sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        let (sin_roll, cos_roll) = self.roll.to_radians().sin_cos();

        self.forward = Vec3::new(sin_yaw * cos_pitch, sin_pitch, cos_pitch * -cos_yaw).normalize();
        self.up = Vec3::new(
            -cos_yaw * sin_roll - sin_yaw * sin_pitch * cos_roll,
            cos_pitch * cos_roll,
            -sin_yaw * sin_roll + sin_pitch * cos_roll * cos_yaw,
        )
        .normalize();
        self.right = self.forward.cross(self.up).normalize();
    }

    fn refresh_look_at(&mut self) {
        self.look_at = self.position + self.forward;
    }
}

/// Dense camera table with one active camera
///
/// Number keys 1..=8 switch the active camera; only the active camera
/// receives input and updates.
pub struct CameraRig {
    cameras: Vec<Camera>,
    active: usize,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraRig {
    /// A rig with one default fixed camera
    pub fn new() -> Self {
        Self {
            cameras: vec![Camera::new()],
            active: 0,
        }
    }

    /// Add a camera, returning its index
    pub fn add(&mut self, camera: Camera) -> usize {
        self.cameras.push(camera);
        self.cameras.len() - 1
    }

    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }

    pub fn switch_to(&mut self, index: usize) {
        if index < self.cameras.len() {
            self.active = index;
        }
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> &Camera {
        &self.cameras[self.active]
    }

    pub fn active_mut(&mut self) -> &mut Camera {
        &mut self.cameras[self.active]
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Camera> {
        self.cameras.get_mut(index)
    }

    /// Wire a tracking camera to a scene node
    pub fn link_node(&mut self, index: usize, node: NodeId, eye_offset: Vec3) {
        if let Some(camera) = self.cameras.get_mut(index) {
            camera.track_node(node, eye_offset);
        }
    }

    /// Camera switching plus the active camera's own input
    pub fn handle_input(
        &mut self,
        input: &mut InputState,
        ctx: &FrameContext,
        first_mouse: &mut bool,
        dt: f32,
    ) {
        for (index, key) in (b'1'..=b'8').enumerate() {
            if input.is_key_down(key) {
                input.set_key_up(key);
                self.switch_to(index);
            }
        }
        self.active_mut().handle_input(input, ctx, first_mouse, dt);
    }

    pub fn update(&mut self, arena: &NodeArena, dt: f32) {
        self.cameras[self.active].update(arena, dt);
    }
}

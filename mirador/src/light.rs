//! Dynamic lights and materials
//!
//! Fixed-function style light sources: up to eight slots, each carrying
//! ambient/diffuse/specular colours, a positional or directional placement,
//! optional spot cone and an attenuation triple. The backend maps a slot
//! straight onto its own per-light channels.

use glam::Vec3;
use tracing::warn;

/// Light source behaviour, derived from how the light is constructed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightKind {
    Point,
    Directional,
    Spot,
}

/// Spot cone parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpotParams {
    pub direction: [f32; 3],
    pub cutoff_degrees: f32,
    pub exponent: f32,
}

/// Distance attenuation triple
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Default for Attenuation {
    fn default() -> Self {
        Self {
            constant: 1.0,
            linear: 0.0,
            quadratic: 0.0,
        }
    }
}

/// One light source
#[derive(Clone, Debug)]
pub struct Light {
    pub kind: LightKind,
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    /// Placement; w = 1 positional, w = 0 directional
    pub position: [f32; 4],
    pub spot: Option<SpotParams>,
    pub attenuation: Attenuation,
    pub enabled: bool,
    /// Orbit rotation applied around the origin before placement
    pub orbit_degrees: Vec3,
    pub orbiting: [bool; 3],
    pub speed: f32,
    colour_cycling: bool,
    cycle_phase: f32,
    cycle_countdown: f32,
}

impl Light {
    /// A positional light
    pub fn point(ambient: [f32; 4], diffuse: [f32; 4], specular: [f32; 4], position: [f32; 3]) -> Self {
        Self::with_kind(
            LightKind::Point,
            ambient,
            diffuse,
            specular,
            [position[0], position[1], position[2], 1.0],
            None,
        )
    }

    /// A directional light shining along `direction`
    pub fn directional(
        ambient: [f32; 4],
        diffuse: [f32; 4],
        specular: [f32; 4],
        direction: [f32; 3],
    ) -> Self {
        Self::with_kind(
            LightKind::Directional,
            ambient,
            diffuse,
            specular,
            [direction[0], direction[1], direction[2], 0.0],
            None,
        )
    }

    /// A positional light with a spot cone
    pub fn spot(
        ambient: [f32; 4],
        diffuse: [f32; 4],
        specular: [f32; 4],
        position: [f32; 3],
        direction: [f32; 3],
        cutoff_degrees: f32,
        exponent: f32,
    ) -> Self {
        Self::with_kind(
            LightKind::Spot,
            ambient,
            diffuse,
            specular,
            [position[0], position[1], position[2], 1.0],
            Some(SpotParams {
                direction,
                cutoff_degrees,
                exponent,
            }),
        )
    }

    fn with_kind(
        kind: LightKind,
        ambient: [f32; 4],
        diffuse: [f32; 4],
        specular: [f32; 4],
        position: [f32; 4],
        spot: Option<SpotParams>,
    ) -> Self {
        Self {
            kind,
            ambient,
            diffuse,
            specular,
            position,
            spot,
            attenuation: Attenuation::default(),
            enabled: true,
            orbit_degrees: Vec3::ZERO,
            orbiting: [false; 3],
            speed: 0.0,
            colour_cycling: false,
            cycle_phase: 0.0,
            cycle_countdown: 0.0,
        }
    }

    pub fn set_attenuation(&mut self, constant: f32, linear: f32, quadratic: f32) {
        self.attenuation = Attenuation {
            constant,
            linear,
            quadratic,
        };
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    /// Re-colour the diffuse/ambient channels on a slow cycle
    pub fn set_colour_cycling(&mut self, cycling: bool) {
        self.colour_cycling = cycling;
    }

    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.position[0] = x;
        self.position[1] = y;
        self.position[2] = z;
        // w stays as constructed
    }

    /// Advance orbit rotation and the colour cycle
    pub fn update(&mut self, dt: f32) {
        let step = self.speed * dt;
        if self.orbiting[0] {
            self.orbit_degrees.x += step;
        }
        if self.orbiting[1] {
            self.orbit_degrees.y += step;
        }
        if self.orbiting[2] {
            self.orbit_degrees.z += step;
        }

        if self.colour_cycling {
            self.cycle_phase += dt;
            self.cycle_countdown -= dt;
            if self.cycle_countdown <= 0.0 {
                self.recolour();
                self.cycle_countdown = 5.0;
            }
        }
    }

    fn recolour(&mut self) {
        let phase = self.cycle_phase;
        let r = (phase * 2.0).sin().abs();
        let g = (phase * 0.7).sin().abs();
        let b = (phase * 1.3).sin().abs();
        self.diffuse = [r * 0.5, g * 0.5, b * 0.5, 1.0];
        self.ambient = [r * 0.2, g * 0.2, b * 0.2, 1.0];
    }

    /// Raise or lower the light, bounded to sane scene heights
    pub fn move_vertical(&mut self, dt: f32) {
        self.position[1] += self.speed * dt;
        self.position[1] = self.position[1].clamp(1.0, 30.0);
    }

    pub fn move_along_x(&mut self, dt: f32) {
        self.position[0] += self.speed * dt;
    }

    pub fn move_along_z(&mut self, dt: f32) {
        self.position[2] += self.speed * dt;
    }
}

/// Slot-ordered light table
///
/// Slots map one-to-one onto the backend's light units; fixed-function
/// pipelines expose eight.
#[derive(Default)]
pub struct LightBank {
    lights: Vec<Light>,
}

impl LightBank {
    pub const MAX_LIGHTS: usize = 8;

    pub fn new() -> Self {
        Self::default()
    }

    /// Add a light, returning its slot
    pub fn add(&mut self, light: Light) -> Option<usize> {
        if self.lights.len() >= Self::MAX_LIGHTS {
            warn!("light bank full, ignoring extra light");
            return None;
        }
        self.lights.push(light);
        Some(self.lights.len() - 1)
    }

    pub fn get(&self, slot: usize) -> Option<&Light> {
        self.lights.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Light> {
        self.lights.get_mut(slot)
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Light)> {
        self.lights.iter().enumerate()
    }

    /// Placement of the light in `slot`, if any
    pub fn position(&self, slot: usize) -> Option<[f32; 4]> {
        self.lights.get(slot).map(|light| light.position)
    }

    /// Advance every enabled light
    pub fn update(&mut self, dt: f32) {
        for light in &mut self.lights {
            if light.enabled {
                light.update(dt);
            }
        }
    }

    /// Scene light controls: raise/lower the first two lights, toggle the second
    pub fn handle_input(&mut self, input: &mut crate::input::InputState, dt: f32) {
        if input.is_key_down(b'z') {
            input.set_key_up(b'z');
            if let Some(light) = self.lights.get_mut(0) {
                light.move_vertical(dt);
            }
        } else if input.is_key_down(b'c') {
            input.set_key_up(b'c');
            if let Some(light) = self.lights.get_mut(0) {
                light.move_vertical(-dt);
            }
        } else if input.is_key_down(b'v') {
            input.set_key_up(b'v');
            if let Some(light) = self.lights.get_mut(1) {
                light.move_vertical(dt);
            }
        } else if input.is_key_down(b'n') {
            input.set_key_up(b'n');
            if let Some(light) = self.lights.get_mut(1) {
                light.move_vertical(-dt);
            }
        }
        if input.is_key_down(b'b') {
            input.set_key_up(b'b');
            if let Some(light) = self.lights.get_mut(1) {
                light.toggle();
            }
        }
    }
}

/// Fixed-function material channels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub emission: [f32; 4],
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: [0.2, 0.2, 0.2, 1.0],
            diffuse: [0.8, 0.8, 0.8, 1.0],
            specular: [0.0, 0.0, 0.0, 1.0],
            emission: [0.0, 0.0, 0.0, 1.0],
            shininess: 0.0,
        }
    }
}

impl Material {
    /// A shiny metal-like material
    pub fn polished(specular: [f32; 4], shininess: f32) -> Self {
        Self {
            specular,
            shininess,
            ..Self::default()
        }
    }
}

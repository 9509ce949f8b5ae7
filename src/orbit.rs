use anyhow::{bail, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

use crate::math::{
    compose, lerp_rgb, position_of, rotation_x, rotation_y, rotation_z, scaling, translation, Transform,
};

/// `rotationZ(inclination) ∘ rotationY(speed * t) ∘ translation(distance, 0, 0)`
pub fn orbit_transform(distance: f32, speed: f32, inclination: f32, t: f32) -> Transform {
    compose(
        rotation_z(inclination),
        compose(rotation_y(speed * t), translation(distance, 0.0, 0.0)),
    )
}

/// Axial nodding about the body's local X axis. Affects the drawn model
/// only; the camera anchor never wobbles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wobble {
    /// Radians
    pub amplitude: f32,
    /// Hz
    pub frequency: f32,
}

impl Wobble {
    pub fn transform(&self, t: f32) -> Transform {
        rotation_x(self.amplitude * (TAU * self.frequency * t).sin())
    }
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitingBody {
    pub name: String,
    pub distance: f32,
    /// Radians per second
    pub speed: f32,
    /// Tilt of the orbit plane about Z, radians
    #[serde(default)]
    pub inclination: f32,
    /// Index of the body this one circles instead of the origin
    #[serde(default)]
    pub parent: Option<usize>,
    #[serde(default)]
    pub wobble: Option<Wobble>,
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
}

impl OrbitingBody {
    pub fn new(name: impl Into<String>, distance: f32, speed: f32) -> Self {
        Self {
            name: name.into(),
            distance,
            speed,
            inclination: 0.0,
            parent: None,
            wobble: None,
            scale: unit_scale(),
        }
    }

    pub fn around(mut self, parent: usize) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_wobble(mut self, amplitude: f32, frequency: f32) -> Self {
        self.wobble = Some(Wobble { amplitude, frequency });
        self
    }

    pub fn with_inclination(mut self, inclination: f32) -> Self {
        self.inclination = inclination;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale.to_array();
        self
    }
}

/// Per-body result for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPlacement {
    /// Orbit-only placement; what the camera follows
    pub anchor: Transform,
    /// `anchor ∘ wobble ∘ scale`; what gets drawn
    pub model: Transform,
}

impl BodyPlacement {
    pub fn position(&self) -> Vec3 {
        position_of(self.anchor)
    }
}

/// An independent set of orbiting bodies. Satellites are placed after
/// their parent, around the parent's position for the same frame.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalSystem {
    bodies: Vec<OrbitingBody>,
}

impl OrbitalSystem {
    pub fn new(bodies: Vec<OrbitingBody>) -> Result<Self> {
        for (i, body) in bodies.iter().enumerate() {
            if let Some(parent) = body.parent {
                if parent >= i {
                    bail!(
                        "body {} ('{}') orbits body {}, which is not placed before it",
                        i,
                        body.name,
                        parent
                    );
                }
            }
        }
        Ok(Self { bodies })
    }

    pub fn bodies(&self) -> &[OrbitingBody] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn placements(&self, t: f32) -> Vec<BodyPlacement> {
        let mut placements: Vec<BodyPlacement> = Vec::with_capacity(self.bodies.len());
        for body in &self.bodies {
            let orbit = orbit_transform(body.distance, body.speed, body.inclination, t);
            let anchor = match body.parent {
                Some(parent) => {
                    let center = placements[parent].position();
                    compose(translation(center.x, center.y, center.z), orbit)
                }
                None => orbit,
            };
            let wobble = body.wobble.map(|w| w.transform(t)).unwrap_or(Transform::IDENTITY);
            let [sx, sy, sz] = body.scale;
            let model = compose(anchor, compose(wobble, scaling(sx, sy, sz)));
            placements.push(BodyPlacement { anchor, model });
        }
        placements
    }
}

/// Pulsing star: grows from radius 1 to 3 and back every `cycle` seconds,
/// shading from red when small to white when large.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SunPulse {
    pub cycle: f32,
}

impl Default for SunPulse {
    fn default() -> Self {
        Self { cycle: 10.0 }
    }
}

impl SunPulse {
    fn wave(&self, t: f32) -> f32 {
        (PI * t.rem_euclid(self.cycle) / self.cycle).sin()
    }

    pub fn radius(&self, t: f32) -> f32 {
        1.0 + 2.0 * self.wave(t)
    }

    pub fn color(&self, t: f32) -> Vec3 {
        lerp_rgb(Vec3::X, Vec3::ONE, self.wave(t).abs())
    }

    /// Emitted light intensity, `10^radius`
    pub fn intensity(&self, t: f32) -> f32 {
        10f32.powf(self.radius(t))
    }
}

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::uniforms::LightUniform;
use crate::math::rgb_from_hex;

/// Compiled light slot cap shared by the uniform layout and the shaders
pub const MAX_LIGHTS: usize = 4;

/// Falloff distance assumed for point lights that don't set one
pub const DEFAULT_LIGHT_DISTANCE: f32 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LightKind {
    Point {
        position: Vec3,
        #[serde(default)]
        distance: Option<f32>,
    },
    /// `direction` points from the surface toward the light
    Directional { direction: Vec3 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    #[serde(flatten)]
    pub kind: LightKind,
    pub color: Vec3,
    pub intensity: f32,
}

impl Light {
    pub fn point(position: Vec3, color: Vec3, intensity: f32) -> Self {
        Self {
            kind: LightKind::Point { position, distance: None },
            color,
            intensity,
        }
    }

    pub fn directional(direction: Vec3, color: Vec3, intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional { direction },
            color,
            intensity,
        }
    }

    pub fn with_distance(mut self, falloff: f32) -> Self {
        if let LightKind::Point { distance, .. } = &mut self.kind {
            *distance = Some(falloff);
        }
        self
    }

    /// Move a point light; directional lights are left alone
    pub fn set_position(&mut self, to: Vec3) {
        if let LightKind::Point { position, .. } = &mut self.kind {
            *position = to;
        }
    }
}

/// Surface response coefficients. `ambient`, `diffusivity` and
/// `specularity` live in `[0, 1]`; `smoothness` is a positive exponent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialParams {
    pub base_color: Vec3,
    pub ambient: f32,
    pub diffusivity: f32,
    pub specularity: f32,
    pub smoothness: f32,
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self {
            base_color: Vec3::ONE,
            ambient: 0.1,
            diffusivity: 1.0,
            specularity: 1.0,
            smoothness: 40.0,
        }
    }
}

impl MaterialParams {
    pub fn from_hex(hex: u32, ambient: f32, diffusivity: f32, specularity: f32, smoothness: f32) -> Self {
        Self {
            base_color: rgb_from_hex(hex),
            ambient,
            diffusivity,
            specularity,
            smoothness,
        }
    }

    pub fn in_documented_ranges(&self) -> bool {
        let unit = 0.0_f32..=1.0;
        unit.contains(&self.ambient)
            && unit.contains(&self.diffusivity)
            && unit.contains(&self.specularity)
            && self.smoothness > 0.0
    }
}

/// Diffuse plus specular radiance summed over `lights`, without ambient.
///
/// `normal` must be unit length. A zero normal is not checked and yields
/// garbage rather than a panic.
pub fn phong_model_lights(
    normal: Vec3,
    world_pos: Vec3,
    camera_center: Vec3,
    lights: &[LightUniform],
    material: &MaterialParams,
) -> Vec3 {
    let e = (camera_center - world_pos).normalize();
    lights
        .iter()
        .map(|light| {
            let lp = light.position_or_vector();
            let surface_to_light = lp.truncate() - lp.w * world_pos;
            let distance = surface_to_light.length();
            let l = surface_to_light.normalize();
            let r = reflect(-l, normal);

            let diffuse = normal.dot(l).max(0.0);
            let specular = r.dot(e).max(0.0).powf(material.smoothness);

            let color = light.color();
            let contribution = material.base_color * color * material.diffusivity * diffuse
                + color * material.specularity * specular;
            light.attenuation_at(distance) * contribution
        })
        .fold(Vec3::ZERO, |acc, c| acc + c)
}

/// Full local-illumination color: ambient term plus every light
pub fn shade(
    normal: Vec3,
    world_pos: Vec3,
    camera_center: Vec3,
    lights: &[LightUniform],
    material: &MaterialParams,
) -> Vec3 {
    material.base_color * material.ambient
        + phong_model_lights(normal, world_pos, camera_center, lights, material)
}

/// GLSL/WGSL `reflect`: mirror incident `i` about `n`
pub fn reflect(i: Vec3, n: Vec3) -> Vec3 {
    i - 2.0 * n.dot(i) * n
}

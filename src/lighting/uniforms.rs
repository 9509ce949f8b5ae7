use glam::{Mat4, Vec3, Vec4};
use serde::Serialize;

use super::model::{Light, LightKind, MaterialParams, DEFAULT_LIGHT_DISTANCE, MAX_LIGHTS};

/// Per-light record as the shading stages see it
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    /// xyz = position (w = 1) or surface-to-light direction (w = 0)
    pub position_or_vector: [f32; 4],
    pub color: [f32; 4],
    /// x = falloff factor k for point lights, y = gain for directional lights
    pub attenuation: [f32; 4],
}

impl LightUniform {
    /// Slot filler that contributes nothing. The direction is non-zero so
    /// normalizing it stays finite.
    pub const PADDING: Self = Self {
        position_or_vector: [0.0, 0.0, 1.0, 0.0],
        color: [0.0, 0.0, 0.0, 1.0],
        attenuation: [0.0; 4],
    };

    pub fn from_light(light: &Light) -> Self {
        let color = light.color.extend(1.0).to_array();
        match light.kind {
            LightKind::Point { position, distance } => {
                let distance = distance.filter(|d| *d > 0.0).unwrap_or(DEFAULT_LIGHT_DISTANCE);
                Self {
                    position_or_vector: position.extend(1.0).to_array(),
                    color,
                    attenuation: [light.intensity / (distance * distance), 0.0, 0.0, 0.0],
                }
            }
            LightKind::Directional { direction } => Self {
                position_or_vector: direction.extend(0.0).to_array(),
                color,
                attenuation: [0.0, light.intensity, 0.0, 0.0],
            },
        }
    }

    pub fn position_or_vector(&self) -> Vec4 {
        Vec4::from_array(self.position_or_vector)
    }

    pub fn color(&self) -> Vec3 {
        Vec4::from_array(self.color).truncate()
    }

    pub fn is_directional(&self) -> bool {
        self.position_or_vector[3] == 0.0
    }

    /// Attenuation at `distance` from the surface point
    pub fn attenuation_at(&self, distance: f32) -> f32 {
        if self.is_directional() {
            self.attenuation[1]
        } else {
            1.0 / (1.0 + self.attenuation[0] * distance * distance)
        }
    }
}

/// Per-draw uniform bundle shared by both shading stages. Field order and
/// padding mirror the `Material` struct in the generated WGSL.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub model_transform: [[f32; 4]; 4],
    pub projection_camera_model_transform: [[f32; 4]; 4],
    pub shape_color: [f32; 4],
    pub camera_center: [f32; 3],
    pub ambient: f32,
    pub squared_scale: [f32; 3],
    pub diffusivity: f32,
    pub specularity: f32,
    pub smoothness: f32,
    pub light_count: u32,
    pub _pad: u32,
    pub lights: [LightUniform; MAX_LIGHTS],
}

impl MaterialUniform {
    pub fn new(material: &MaterialParams) -> Self {
        Self {
            model_transform: Mat4::IDENTITY.to_cols_array_2d(),
            projection_camera_model_transform: Mat4::IDENTITY.to_cols_array_2d(),
            shape_color: material.base_color.extend(1.0).to_array(),
            camera_center: [0.0; 3],
            ambient: material.ambient,
            squared_scale: [1.0; 3],
            diffusivity: material.diffusivity,
            specularity: material.specularity,
            smoothness: material.smoothness,
            light_count: 0,
            _pad: 0,
            lights: [LightUniform::PADDING; MAX_LIGHTS],
        }
    }

    pub fn material(&self) -> MaterialParams {
        MaterialParams {
            base_color: Vec4::from_array(self.shape_color).truncate(),
            ambient: self.ambient,
            diffusivity: self.diffusivity,
            specularity: self.specularity,
            smoothness: self.smoothness,
        }
    }

    pub fn model_transform(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model_transform)
    }

    pub fn camera_center(&self) -> Vec3 {
        Vec3::from_array(self.camera_center)
    }

    pub fn squared_scale(&self) -> Vec3 {
        Vec3::from_array(self.squared_scale)
    }

    /// Active light slots
    pub fn lights(&self) -> &[LightUniform] {
        let count = (self.light_count as usize).min(MAX_LIGHTS);
        &self.lights[..count]
    }
}

use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

use super::model::shade;
use super::uniforms::MaterialUniform;

/// Where the lighting formula runs relative to rasterizer interpolation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadingStage {
    /// Once per vertex; the rasterizer interpolates colors
    Gouraud,
    /// Once per fragment on interpolated normals and positions
    #[default]
    Phong,
}

impl ShadingStage {
    pub fn toggled(self) -> Self {
        match self {
            Self::Gouraud => Self::Phong,
            Self::Phong => Self::Gouraud,
        }
    }
}

/// Object-space vertex attributes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }
}

/// What the vertex stage hands to the rasterizer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Varyings {
    pub normal: Vec3,
    pub world_pos: Vec3,
    /// Only written by the Gouraud stage
    pub color: Vec3,
}

impl Varyings {
    /// Linear blend with barycentric weights, as the rasterizer does
    pub fn interpolate(v: &[Varyings; 3], bary: Vec3) -> Varyings {
        let mix = |f: fn(&Varyings) -> Vec3| f(&v[0]) * bary.x + f(&v[1]) * bary.y + f(&v[2]) * bary.z;
        Varyings {
            normal: mix(|x| x.normal),
            world_pos: mix(|x| x.world_pos),
            color: mix(|x| x.color),
        }
    }
}

/// `normalize(mat3(model) * normal / squared_scale)`.
///
/// Dividing by the squared scale after the linear map only matches the
/// inverse transpose when the scale is uniform, or when the non-uniform
/// scale isn't followed by a rotation. Shear is never handled.
pub fn transform_normal(model: &glam::Mat4, squared_scale: Vec3, normal: Vec3) -> Vec3 {
    (Mat3::from_mat4(*model) * normal / squared_scale).normalize()
}

pub fn vertex_stage(stage: ShadingStage, vertex: &Vertex, uniform: &MaterialUniform) -> Varyings {
    let model = uniform.model_transform();
    let normal = transform_normal(&model, uniform.squared_scale(), vertex.normal);
    let world_pos = model.transform_point3(vertex.position);
    let color = match stage {
        ShadingStage::Gouraud => shade(
            normal,
            world_pos,
            uniform.camera_center(),
            uniform.lights(),
            &uniform.material(),
        ),
        ShadingStage::Phong => Vec3::ZERO,
    };
    Varyings { normal, world_pos, color }
}

pub fn fragment_stage(stage: ShadingStage, varyings: &Varyings, uniform: &MaterialUniform) -> Vec3 {
    match stage {
        ShadingStage::Gouraud => varyings.color,
        ShadingStage::Phong => shade(
            varyings.normal.normalize(),
            varyings.world_pos,
            uniform.camera_center(),
            uniform.lights(),
            &uniform.material(),
        ),
    }
}

/// Color of the fragment at `bary` inside `triangle`, run through both
/// stages the way the GPU would
pub fn shade_at(stage: ShadingStage, triangle: &[Vertex; 3], bary: Vec3, uniform: &MaterialUniform) -> Vec3 {
    let varyings = triangle.map(|v| vertex_stage(stage, &v, uniform));
    fragment_stage(stage, &Varyings::interpolate(&varyings, bary), uniform)
}

//! WGSL generation for the two shading stages.
//!
//! Both programs are assembled from the same prelude and the same
//! `phong_model_lights` text; they differ only in which entry point calls
//! it. The `Material` struct layout matches [`super::MaterialUniform`].

use super::model::MAX_LIGHTS;
use super::stage::ShadingStage;

const PRELUDE: &str = r#"
struct Light {
    position_or_vector: vec4<f32>,
    color: vec4<f32>,
    attenuation: vec4<f32>,
}

struct Material {
    model_transform: mat4x4<f32>,
    projection_camera_model_transform: mat4x4<f32>,
    shape_color: vec4<f32>,
    camera_center: vec3<f32>,
    ambient: f32,
    squared_scale: vec3<f32>,
    diffusivity: f32,
    specularity: f32,
    smoothness: f32,
    light_count: u32,
    _pad: u32,
    lights: array<Light, MAX_LIGHTS>,
}

@group(0) @binding(0)
var<uniform> material: Material;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
}

fn transform_normal(normal: vec3<f32>) -> vec3<f32> {
    let m = material.model_transform;
    let linear = mat3x3<f32>(m[0].xyz, m[1].xyz, m[2].xyz);
    return normalize(linear * normal / material.squared_scale);
}
"#;

const LIGHTING: &str = r#"
fn phong_model_lights(N: vec3<f32>, vertex_worldspace: vec3<f32>) -> vec3<f32> {
    let E = normalize(material.camera_center - vertex_worldspace);
    var result = vec3<f32>(0.0);
    for (var i = 0u; i < N_LIGHTS; i = i + 1u) {
        let light = material.lights[i];
        let surface_to_light = light.position_or_vector.xyz
            - light.position_or_vector.w * vertex_worldspace;
        let distance_to_light = length(surface_to_light);
        let L = normalize(surface_to_light);
        let R = reflect(-L, N);

        let diffuse = max(dot(N, L), 0.0);
        let specular = pow(max(dot(R, E), 0.0), material.smoothness);

        let falloff = 1.0 / (1.0 + light.attenuation.x * distance_to_light * distance_to_light);
        let attenuation = select(falloff, light.attenuation.y, light.position_or_vector.w == 0.0);

        let contribution = material.shape_color.xyz * light.color.xyz * material.diffusivity * diffuse
            + light.color.xyz * material.specularity * specular;
        result += attenuation * contribution;
    }
    return result;
}

fn shade(N: vec3<f32>, vertex_worldspace: vec3<f32>) -> vec4<f32> {
    let ambient = material.shape_color.xyz * material.ambient;
    return vec4<f32>(ambient + phong_model_lights(N, vertex_worldspace), material.shape_color.w);
}
"#;

const GOURAUD_ENTRY: &str = r#"
struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
}

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = material.projection_camera_model_transform * vec4<f32>(in.position, 1.0);
    let N = transform_normal(in.normal);
    let vertex_worldspace = (material.model_transform * vec4<f32>(in.position, 1.0)).xyz;
    out.color = shade(N, vertex_worldspace);
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

const PHONG_ENTRY: &str = r#"
struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) N: vec3<f32>,
    @location(1) vertex_worldspace: vec3<f32>,
}

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = material.projection_camera_model_transform * vec4<f32>(in.position, 1.0);
    out.N = transform_normal(in.normal);
    out.vertex_worldspace = (material.model_transform * vec4<f32>(in.position, 1.0)).xyz;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return shade(normalize(in.N), in.vertex_worldspace);
}
"#;

/// Full WGSL module for `stage` with `n_lights` active slots.
/// Counts above the compiled cap are clamped.
pub fn stage_wgsl(stage: ShadingStage, n_lights: usize) -> String {
    let n_lights = if n_lights > MAX_LIGHTS {
        log::warn!("{} lights requested, shader compiled for {}", n_lights, MAX_LIGHTS);
        MAX_LIGHTS
    } else {
        n_lights
    };

    let entry = match stage {
        ShadingStage::Gouraud => GOURAUD_ENTRY,
        ShadingStage::Phong => PHONG_ENTRY,
    };

    format!(
        "const MAX_LIGHTS: u32 = {}u;\nconst N_LIGHTS: u32 = {}u;\n{}{}{}",
        MAX_LIGHTS, n_lights, PRELUDE, LIGHTING, entry
    )
}

pub fn gouraud_wgsl(n_lights: usize) -> String {
    stage_wgsl(ShadingStage::Gouraud, n_lights)
}

pub fn phong_wgsl(n_lights: usize) -> String {
    stage_wgsl(ShadingStage::Phong, n_lights)
}

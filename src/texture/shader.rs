//! WGSL for the animated-texture programs. The coordinate animation and
//! the outline test are generated from a [`UvAnimation`] so the GPU runs
//! the same transform as [`UvAnimation::sample`].

use super::uv::UvAnimation;

const PRELUDE: &str = r#"
struct UvParams {
    projection_camera_model_transform: mat4x4<f32>,
    animation_time: f32,
    _pad0: f32,
    _pad1: f32,
    _pad2: f32,
}

@group(0) @binding(0)
var<uniform> params: UvParams;
@group(0) @binding(1)
var t_map: texture_2d<f32>;
@group(0) @binding(2)
var s_map: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) uv: vec2<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
}

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = params.projection_camera_model_transform * vec4<f32>(in.position, 1.0);
    out.uv = in.uv;
    return out;
}
"#;

const ROTATE: &str = r#"
const TAU: f32 = 6.283185307;

fn animate_uv(uv: vec2<f32>, t: f32) -> vec2<f32> {
    let angle = -TAU * t / ROTATION_PERIOD;
    let c = cos(angle);
    let s = sin(angle);
    let centered = uv - vec2<f32>(0.5, 0.5);
    return vec2<f32>(centered.x * c - centered.y * s, centered.x * s + centered.y * c) + vec2<f32>(0.5, 0.5);
}

fn mask_coords(uv: vec2<f32>) -> vec2<f32> {
    return uv;
}
"#;

const SCROLL: &str = r#"
fn animate_uv(uv: vec2<f32>, t: f32) -> vec2<f32> {
    return uv * TILING - vec2<f32>(SCROLL_SPEED * t, 0.0);
}

fn mask_coords(uv: vec2<f32>) -> vec2<f32> {
    return fract(uv);
}
"#;

// sample before masking: textureSample must stay in uniform control flow
const FRAGMENT: &str = r#"
fn inside(uv: vec2<f32>, lo: f32, hi: f32) -> bool {
    return uv.x > lo && uv.x < hi && uv.y > lo && uv.y < hi;
}

fn outlined(uv: vec2<f32>) -> bool {
    let m = mask_coords(uv);
    return inside(m, OUTER_LO, OUTER_HI) && !inside(m, INNER_LO, INNER_HI);
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let uv = animate_uv(in.uv, params.animation_time);
    let color = textureSample(t_map, s_map, uv);
    return select(color, vec4<f32>(0.0, 0.0, 0.0, 1.0), outlined(uv));
}
"#;

fn constant(name: &str, value: f32) -> String {
    format!("const {}: f32 = {:?};\n", name, value)
}

/// Full WGSL module for one animated-texture material
pub fn texture_wgsl(animation: &UvAnimation) -> String {
    let outline = animation.outline();
    let mut src = String::new();
    src.push_str(&constant("OUTER_LO", outline.outer[0]));
    src.push_str(&constant("OUTER_HI", outline.outer[1]));
    src.push_str(&constant("INNER_LO", outline.inner[0]));
    src.push_str(&constant("INNER_HI", outline.inner[1]));

    let body = match *animation {
        UvAnimation::Rotate { period, .. } => {
            src.push_str(&constant("ROTATION_PERIOD", period));
            ROTATE
        }
        UvAnimation::Scroll { tiling, speed, .. } => {
            src.push_str(&constant("TILING", tiling));
            src.push_str(&constant("SCROLL_SPEED", speed));
            SCROLL
        }
    };

    src.push_str(PRELUDE);
    src.push_str(body);
    src.push_str(FRAGMENT);
    src
}

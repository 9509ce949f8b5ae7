use glam::Mat4;
use serde::Serialize;

/// Per-draw uniform for the animated-texture programs. Layout matches the
/// `UvParams` struct in the generated WGSL.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, bytemuck::Pod, bytemuck::Zeroable)]
pub struct UvUniform {
    pub projection_camera_model_transform: [[f32; 4]; 4],
    pub animation_time: f32,
    pub _pad: [f32; 3],
}

impl UvUniform {
    pub fn new(projection_camera_model: Mat4, animation_time: f32) -> Self {
        Self {
            projection_camera_model_transform: projection_camera_model.to_cols_array_2d(),
            animation_time,
            _pad: [0.0; 3],
        }
    }
}

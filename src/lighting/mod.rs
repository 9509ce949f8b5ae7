mod model;
pub mod shader;
mod stage;
mod uniforms;

pub use model::{
    phong_model_lights, reflect, shade, Light, LightKind, MaterialParams, DEFAULT_LIGHT_DISTANCE,
    MAX_LIGHTS,
};
pub use stage::{fragment_stage, shade_at, transform_normal, vertex_stage, ShadingStage, Varyings, Vertex};
pub use uniforms::{LightUniform, MaterialUniform};

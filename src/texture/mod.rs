mod uniform;
mod uv;
pub mod shader;

pub use uniform::UvUniform;
pub use uv::{rotate_uv, OutlineMask, UvAnimation, UvSample};

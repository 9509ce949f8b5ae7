pub mod camera;
pub mod frame;
pub mod renderer;
pub mod scene;

pub use camera::*;
pub use frame::*;
pub use renderer::*;
pub use scene::*;

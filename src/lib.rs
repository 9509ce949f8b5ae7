pub mod attachment;
pub mod bridge;
pub mod camera;
pub mod chain;
pub mod cli;
pub mod config;
pub mod core;
pub mod frame;
pub mod lighting;
pub mod math;
pub mod orbit;
pub mod scene;
pub mod scenes;
pub mod texture;
pub mod traits;

pub use scene::{FrameOutput, Scene};
pub use scenes::{create_solar_scene, create_spin_scene, create_stack_scene, SceneKind};

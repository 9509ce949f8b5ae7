mod solar;
mod spin;
mod stack;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::lighting::{Light, MaterialParams, ShadingStage};
use crate::math::Transform;
use crate::texture::UvAnimation;

pub use solar::{create_solar_scene, BodyConfig, SolarLayout, SolarSceneConfig};
pub use spin::{create_spin_scene, SpinAxis, SpinLayout, SpinSceneConfig, SpinningCube};
pub use stack::{create_stack_scene, StackLayout, StackSceneConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    /// Column of tilting boxes
    Stack,
    /// Pulsing sun with orbiting planets and a moon
    Solar,
    /// Two spinning boxes with animated texture coordinates
    Spin,
}

/// Planet 2 swaps stage once per second
pub const DEFAULT_ALTERNATION_PERIOD: f32 = 1.0;

/// Which stage a lit material runs in
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadingMode {
    Gouraud,
    #[default]
    Phong,
    /// Follows the live shading toggle
    Dynamic,
    /// Phong for even multiples of `period`, Gouraud for odd ones. The live
    /// toggle inverts the pattern.
    Alternating { period: f32 },
}

impl ShadingMode {
    /// Stage for this frame. `live` is the toggled stage, `phase` the pose time.
    pub fn resolve(self, live: ShadingStage, phase: f32) -> ShadingStage {
        match self {
            Self::Gouraud => ShadingStage::Gouraud,
            Self::Phong => ShadingStage::Phong,
            Self::Dynamic => live,
            Self::Alternating { period } => {
                let odd = (phase / period).floor().rem_euclid(2.0) >= 1.0;
                let stage = if odd { ShadingStage::Gouraud } else { ShadingStage::Phong };
                if live == ShadingStage::default() {
                    stage
                } else {
                    stage.toggled()
                }
            }
        }
    }

    /// Alternation periods must be positive
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Alternating { period } => *period > 0.0,
            _ => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LitMaterial {
    pub params: MaterialParams,
    #[serde(default)]
    pub shading: ShadingMode,
}

impl LitMaterial {
    pub fn new(params: MaterialParams, shading: ShadingMode) -> Self {
        Self { params, shading }
    }
}

/// One drawable after layout, before camera and material work
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedObject {
    pub name: String,
    pub model: Transform,
    /// The object's own scale, for normal correction
    pub scale: Vec3,
    pub color: Vec3,
    /// `None` for unlit objects
    pub material: Option<LitMaterial>,
    /// Animated texture coordinates for mapped objects
    pub texture: Option<UvAnimation>,
    /// Also drawn as a line cage, shown instead of the solid in wireframe mode
    pub wireframe_twin: bool,
}

/// Everything a layout produces for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Placed {
    pub objects: Vec<PlacedObject>,
    /// Followable placements, indexed by attachment slot
    pub anchors: Vec<Transform>,
    pub lights: Vec<Light>,
}

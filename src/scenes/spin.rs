use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::{Placed, PlacedObject};
use crate::camera::Projection;
use crate::config::CameraConfig;
use crate::core::clock::DEFAULT_FREEZE_PHASE;
use crate::math::{compose, rotation_x, rotation_y, rotation_z, scaling, translation, Transform};
use crate::scene::AnimationState;
use crate::texture::UvAnimation;
use crate::traits::SceneLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpinAxis {
    X,
    Y,
    Z,
}

impl SpinAxis {
    pub fn rotation(self, angle: f32) -> Transform {
        match self {
            Self::X => rotation_x(angle),
            Self::Y => rotation_y(angle),
            Self::Z => rotation_z(angle),
        }
    }
}

/// A textured box turning about one of its own axes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinningCube {
    pub name: String,
    pub position: Vec3,
    /// Edge length
    pub size: f32,
    pub axis: SpinAxis,
    pub rpm: f32,
    pub texture: UvAnimation,
}

impl SpinningCube {
    /// Radians per second
    pub fn angular_speed(&self) -> f32 {
        TAU * self.rpm / 60.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinSceneConfig {
    pub cubes: Vec<SpinningCube>,
    pub freeze_phase: f32,
    pub camera: CameraConfig,
}

impl Default for SpinSceneConfig {
    fn default() -> Self {
        Self {
            cubes: vec![
                SpinningCube {
                    name: "cube-1".to_string(),
                    position: Vec3::new(2.0, 0.0, 0.0),
                    size: 2.0,
                    axis: SpinAxis::X,
                    rpm: 15.0,
                    texture: UvAnimation::rotating(),
                },
                SpinningCube {
                    name: "cube-2".to_string(),
                    position: Vec3::new(-2.0, 0.0, 0.0),
                    size: 2.0,
                    axis: SpinAxis::Y,
                    rpm: 40.0,
                    texture: UvAnimation::scrolling(),
                },
            ],
            freeze_phase: DEFAULT_FREEZE_PHASE,
            camera: CameraConfig {
                position: Vec3::new(0.0, 0.0, -8.0),
                target: Vec3::ZERO,
                min_distance: 1.0,
                max_distance: 100.0,
                projection: Projection {
                    fov_y: 60.0,
                    far: 100.0,
                    ..Default::default()
                },
            },
        }
    }
}

/// Spin angles build up from frame deltas while spinning is on, so the
/// pose depends on history and not only on the phase. Texture animation
/// runs off the phase.
pub struct SpinLayout {
    cubes: Vec<SpinningCube>,
    angles: Vec<f32>,
}

impl SpinLayout {
    pub fn cubes(&self) -> &[SpinningCube] {
        &self.cubes
    }

    /// Current spin angle of each cube, radians in `[0, 2pi)`
    pub fn angles(&self) -> &[f32] {
        &self.angles
    }

    fn anchor(&self, index: usize) -> Transform {
        let cube = &self.cubes[index];
        let p = cube.position;
        compose(translation(p.x, p.y, p.z), cube.axis.rotation(self.angles[index]))
    }
}

impl SceneLayout for SpinLayout {
    fn tick(&mut self, delta: f32, state: &AnimationState) {
        if !state.spinning || state.frozen {
            return;
        }
        for (angle, cube) in self.angles.iter_mut().zip(&self.cubes) {
            *angle = (*angle + cube.angular_speed() * delta).rem_euclid(TAU);
        }
    }

    fn place(&self, _phase: f32) -> Placed {
        let anchors: Vec<Transform> = (0..self.cubes.len()).map(|i| self.anchor(i)).collect();
        let objects = self
            .cubes
            .iter()
            .zip(&anchors)
            .map(|(cube, &anchor)| PlacedObject {
                name: cube.name.clone(),
                model: compose(anchor, scaling(cube.size, cube.size, cube.size)),
                scale: Vec3::splat(cube.size),
                color: Vec3::ONE,
                material: None,
                texture: Some(cube.texture),
                wireframe_twin: false,
            })
            .collect();

        Placed {
            objects,
            anchors,
            lights: Vec::new(),
        }
    }

    fn anchor_count(&self) -> usize {
        self.cubes.len()
    }

    fn name(&self) -> &str {
        "spin"
    }
}

pub fn create_spin_scene(config: &SpinSceneConfig) -> SpinLayout {
    for cube in &config.cubes {
        log::info!("spin scene: {} turns about {:?} at {} rpm", cube.name, cube.axis, cube.rpm);
    }
    SpinLayout {
        cubes: config.cubes.clone(),
        angles: vec![0.0; config.cubes.len()],
    }
}

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::{LitMaterial, Placed, PlacedObject, ShadingMode};
use crate::camera::Projection;
use crate::chain::StackedCubes;
use crate::config::CameraConfig;
use crate::core::clock::DEFAULT_FREEZE_PHASE;
use crate::lighting::{Light, MaterialParams};
use crate::traits::SceneLayout;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackSceneConfig {
    pub cubes: StackedCubes,
    pub freeze_phase: f32,
    pub material: LitMaterial,
    pub lights: Vec<Light>,
    pub n_lights: usize,
    pub camera: CameraConfig,
}

impl Default for StackSceneConfig {
    fn default() -> Self {
        Self {
            cubes: StackedCubes::default(),
            freeze_phase: DEFAULT_FREEZE_PHASE,
            material: LitMaterial::new(
                MaterialParams::from_hex(0x00ff00, 0x50 as f32 / 255.0, 1.0, 1.0, 100.0),
                ShadingMode::Dynamic,
            ),
            lights: vec![
                Light::point(Vec3::new(5.0, 5.0, 5.0), Vec3::ONE, 100.0).with_distance(100.0),
                Light::directional(Vec3::new(0.5, 0.0, 1.0).normalize(), Vec3::ONE, 1.0),
            ],
            n_lights: 2,
            camera: CameraConfig {
                position: Vec3::new(0.0, 5.0, 10.0),
                target: Vec3::new(0.0, 5.0, 0.0),
                min_distance: 1.0,
                max_distance: 100.0,
                projection: Projection {
                    fov_y: 75.0,
                    ..Default::default()
                },
            },
        }
    }
}

pub struct StackLayout {
    cubes: StackedCubes,
    material: LitMaterial,
    lights: Vec<Light>,
}

impl StackLayout {
    pub fn cubes(&self) -> &StackedCubes {
        &self.cubes
    }
}

impl SceneLayout for StackLayout {
    fn place(&self, phase: f32) -> Placed {
        let placements = self.cubes.placements(phase);
        let scale = Vec3::new(1.0, self.cubes.y_scale, 1.0);
        let objects = placements
            .iter()
            .enumerate()
            .map(|(i, &model)| PlacedObject {
                name: format!("cube-{}", i),
                model,
                scale,
                color: self.material.params.base_color,
                material: Some(self.material),
                texture: None,
                wireframe_twin: true,
            })
            .collect();

        Placed {
            objects,
            anchors: placements,
            lights: self.lights.clone(),
        }
    }

    fn anchor_count(&self) -> usize {
        self.cubes.count
    }

    fn name(&self) -> &str {
        "stack"
    }
}

pub fn create_stack_scene(config: &StackSceneConfig) -> StackLayout {
    log::info!(
        "stack scene: {} cubes, {:.1} deg swing every {}s",
        config.cubes.count,
        config.cubes.amplitude.to_degrees(),
        config.cubes.period
    );
    StackLayout {
        cubes: config.cubes,
        material: config.material,
        lights: config.lights.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_cube_is_lit_and_twinned() {
        let layout = create_stack_scene(&StackSceneConfig::default());
        let placed = layout.place(0.3);

        assert_eq!(placed.objects.len(), 7);
        assert_eq!(placed.anchors.len(), layout.anchor_count());
        assert!(placed.objects.iter().all(|o| o.wireframe_twin && o.material.is_some()));
        assert_eq!(placed.objects[3].name, "cube-3");
        assert_eq!(placed.lights.len(), 2);
    }
}

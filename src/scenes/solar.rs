use anyhow::Result;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::{LitMaterial, Placed, PlacedObject, ShadingMode, DEFAULT_ALTERNATION_PERIOD};
use crate::attachment::{DEFAULT_BLEND_FACTOR, DEFAULT_OFFSET_DISTANCE};
use crate::config::CameraConfig;
use crate::core::clock::DEFAULT_FREEZE_PHASE;
use crate::lighting::{Light, MaterialParams};
use crate::math::scaling;
use crate::orbit::{OrbitalSystem, OrbitingBody, SunPulse};
use crate::traits::SceneLayout;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    #[serde(flatten)]
    pub orbit: OrbitingBody,
    pub material: LitMaterial,
}

impl BodyConfig {
    pub fn new(orbit: OrbitingBody, material: LitMaterial) -> Self {
        Self { orbit, material }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolarSceneConfig {
    pub bodies: Vec<BodyConfig>,
    pub sun: SunPulse,
    /// Falloff distance of the sun's light; unset means the bridge default
    pub sun_light_distance: Option<f32>,
    /// Lights besides the sun
    pub extra_lights: Vec<Light>,
    pub n_lights: usize,
    pub freeze_phase: f32,
    pub blend_factor: f32,
    pub offset_distance: f32,
    pub camera: CameraConfig,
}

fn lit(hex: u32, ambient: f32, diffusivity: f32, specularity: f32, smoothness: f32, shading: ShadingMode) -> LitMaterial {
    LitMaterial::new(
        MaterialParams::from_hex(hex, ambient, diffusivity, specularity, smoothness),
        shading,
    )
}

impl Default for SolarSceneConfig {
    fn default() -> Self {
        let bodies = vec![
            BodyConfig::new(
                OrbitingBody::new("planet-1", 5.0, 1.0),
                lit(0x808080, 0.0, 1.0, 0.0, 1.0, ShadingMode::Phong),
            ),
            BodyConfig::new(
                OrbitingBody::new("planet-2", 8.0, 5.0 / 8.0),
                lit(
                    0x80ffff,
                    0.0,
                    0.5,
                    1.0,
                    40.0,
                    ShadingMode::Alternating {
                        period: DEFAULT_ALTERNATION_PERIOD,
                    },
                ),
            ),
            BodyConfig::new(
                OrbitingBody::new("planet-3", 11.0, 5.0 / 11.0).with_wobble(0.25, 0.5),
                lit(0xb08040, 0.0, 1.0, 1.0, 100.0, ShadingMode::Phong),
            ),
            BodyConfig::new(
                OrbitingBody::new("planet-4", 14.0, 5.0 / 14.0),
                lit(0x0000d1, 0.0, 1.0, 1.0, 100.0, ShadingMode::Phong),
            ),
            BodyConfig::new(
                OrbitingBody::new("moon", 2.5, 1.0).around(3),
                lit(0xc83cb9, 0.0, 1.0, 0.0, 1.0, ShadingMode::Phong),
            ),
        ];
        Self {
            bodies,
            sun: SunPulse::default(),
            sun_light_distance: None,
            extra_lights: Vec::new(),
            n_lights: 1,
            freeze_phase: DEFAULT_FREEZE_PHASE,
            blend_factor: DEFAULT_BLEND_FACTOR,
            offset_distance: DEFAULT_OFFSET_DISTANCE,
            camera: CameraConfig::default(),
        }
    }
}

pub struct SolarLayout {
    system: OrbitalSystem,
    materials: Vec<LitMaterial>,
    sun: SunPulse,
    sun_light_distance: Option<f32>,
    extra_lights: Vec<Light>,
}

impl SolarLayout {
    pub fn system(&self) -> &OrbitalSystem {
        &self.system
    }

    pub fn sun_light(&self, t: f32) -> Light {
        let light = Light::point(Vec3::ZERO, self.sun.color(t), self.sun.intensity(t));
        match self.sun_light_distance {
            Some(distance) => light.with_distance(distance),
            None => light,
        }
    }
}

impl SceneLayout for SolarLayout {
    fn place(&self, phase: f32) -> Placed {
        let radius = self.sun.radius(phase);
        let sun = PlacedObject {
            name: "sun".to_string(),
            model: scaling(radius, radius, radius),
            scale: Vec3::splat(radius),
            color: self.sun.color(phase),
            material: None,
            texture: None,
            wireframe_twin: false,
        };

        let placements = self.system.placements(phase);
        let bodies = self
            .system
            .bodies()
            .iter()
            .zip(&self.materials)
            .zip(&placements)
            .map(|((body, material), placement)| PlacedObject {
                name: body.name.clone(),
                model: placement.model,
                scale: Vec3::from_array(body.scale),
                color: material.params.base_color,
                material: Some(*material),
                texture: None,
                wireframe_twin: false,
            });

        let mut lights = vec![self.sun_light(phase)];
        lights.extend(self.extra_lights.iter().copied());

        Placed {
            objects: std::iter::once(sun).chain(bodies).collect(),
            anchors: placements.iter().map(|p| p.anchor).collect(),
            lights,
        }
    }

    fn anchor_count(&self) -> usize {
        self.system.len()
    }

    fn name(&self) -> &str {
        "solar"
    }
}

pub fn create_solar_scene(config: &SolarSceneConfig) -> Result<SolarLayout> {
    let system = OrbitalSystem::new(config.bodies.iter().map(|b| b.orbit.clone()).collect())?;
    log::info!("solar scene: {} orbiting bodies", system.len());
    Ok(SolarLayout {
        system,
        materials: config.bodies.iter().map(|b| b.material).collect(),
        sun: config.sun,
        sun_light_distance: config.sun_light_distance,
        extra_lights: config.extra_lights.clone(),
    })
}

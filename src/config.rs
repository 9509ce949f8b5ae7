use anyhow::{bail, ensure, Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::camera::Projection;
use crate::lighting::{MaterialParams, MAX_LIGHTS};
use crate::orbit::OrbitalSystem;
use crate::scenes::{LitMaterial, SolarSceneConfig, SpinSceneConfig, StackSceneConfig};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    /// Orbit center for the free controller
    pub target: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
    pub projection: Projection,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 10.0, 20.0),
            target: Vec3::ZERO,
            min_distance: 10.0,
            max_distance: 50.0,
            projection: Projection::default(),
        }
    }
}

/// Top-level configuration. Every field falls back to the built-in preset,
/// so an empty JSON object is a valid file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub stack: StackSceneConfig,
    pub solar: SolarSceneConfig,
    pub spin: SpinSceneConfig,
}

impl SceneConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        log::info!("loaded scene config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("Failed to parse scene config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let stack = &self.stack;
        ensure!(stack.cubes.period > 0.0, "stack.cubes.period must be positive");
        ensure!(stack.cubes.count > 0, "stack.cubes.count must be at least 1");
        check_lit("stack.material", &stack.material)?;
        check_light_count("stack.n_lights", stack.n_lights)?;
        check_camera("stack.camera", &stack.camera)?;

        let solar = &self.solar;
        ensure!(solar.sun.cycle > 0.0, "solar.sun.cycle must be positive");
        ensure!(
            solar.blend_factor > 0.0 && solar.blend_factor <= 1.0,
            "solar.blend_factor must be in (0, 1], got {}",
            solar.blend_factor
        );
        for body in &solar.bodies {
            check_lit(&format!("solar body '{}'", body.orbit.name), &body.material)?;
        }
        check_light_count("solar.n_lights", solar.n_lights)?;
        check_camera("solar.camera", &solar.camera)?;
        OrbitalSystem::new(solar.bodies.iter().map(|b| b.orbit.clone()).collect())
            .context("solar.bodies")?;

        let spin = &self.spin;
        ensure!(!spin.cubes.is_empty(), "spin.cubes must not be empty");
        for cube in &spin.cubes {
            ensure!(cube.size > 0.0, "spin cube '{}': size must be positive", cube.name);
            ensure!(cube.rpm.is_finite(), "spin cube '{}': rpm must be finite", cube.name);
            ensure!(
                cube.texture.is_valid(),
                "spin cube '{}': texture needs a positive period or tiling and nested outline bands",
                cube.name
            );
        }
        check_camera("spin.camera", &spin.camera)?;
        Ok(())
    }
}

fn check_material(what: &str, material: &MaterialParams) -> Result<()> {
    if !material.in_documented_ranges() {
        bail!(
            "{}: ambient, diffusivity and specularity must be in [0, 1] and smoothness positive ({:?})",
            what,
            material
        );
    }
    Ok(())
}

fn check_lit(what: &str, lit: &LitMaterial) -> Result<()> {
    check_material(what, &lit.params)?;
    ensure!(lit.shading.is_valid(), "{}: alternation period must be positive", what);
    Ok(())
}

fn check_light_count(what: &str, n_lights: usize) -> Result<()> {
    ensure!(
        n_lights <= MAX_LIGHTS,
        "{} is {}, but at most {} lights are supported",
        what,
        n_lights,
        MAX_LIGHTS
    );
    Ok(())
}

fn check_camera(what: &str, camera: &CameraConfig) -> Result<()> {
    ensure!(
        camera.min_distance > 0.0 && camera.min_distance <= camera.max_distance,
        "{}: need 0 < min_distance <= max_distance",
        what
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let config = SceneConfig::from_json("{}").unwrap();
        assert_eq!(config, SceneConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = SceneConfig::from_json(r#"{ "stack": { "cubes": { "count": 3 } } }"#).unwrap();
        assert_eq!(config.stack.cubes.count, 3);
        assert_eq!(config.stack.cubes.period, 2.0);
        assert_eq!(config.solar, SolarSceneConfig::default());
    }

    #[test]
    fn test_rejects_bad_period() {
        let err = SceneConfig::from_json(r#"{ "stack": { "cubes": { "period": 0.0 } } }"#).unwrap_err();
        assert!(format!("{:#}", err).contains("period"));
    }

    #[test]
    fn test_spin_texture_from_json() {
        let config = SceneConfig::from_json(
            r#"{ "spin": { "cubes": [ {
                "name": "box", "position": [0.0, 1.0, 0.0], "size": 1.0, "axis": "z", "rpm": 30.0,
                "texture": { "kind": "scroll", "tiling": 3.0, "speed": 1.0,
                             "outline": { "outer": [0.2, 0.8], "inner": [0.3, 0.7] } }
            } ] } }"#,
        )
        .unwrap();
        assert_eq!(config.spin.cubes.len(), 1);
        assert_eq!(config.spin.cubes[0].axis, crate::scenes::SpinAxis::Z);
        assert_eq!(config.spin.camera, SpinSceneConfig::default().camera);
    }

    #[test]
    fn test_rejects_flat_spin_cube() {
        let mut config = SceneConfig::default();
        config.spin.cubes[1].size = 0.0;
        let err = config.validate().unwrap_err();
        assert!(format!("{:#}", err).contains("cube-2"));
    }

    #[test]
    fn test_rejects_too_many_lights() {
        assert!(SceneConfig::from_json(r#"{ "solar": { "n_lights": 9 } }"#).is_err());
    }

    #[test]
    fn test_rejects_zero_alternation_period() {
        let json = r#"{ "stack": { "material": { "params": { "base_color": [0, 1, 0], "ambient": 0.3,
            "diffusivity": 1.0, "specularity": 1.0, "smoothness": 100.0 },
            "shading": { "alternating": { "period": 0.0 } } } } }"#;
        let err = SceneConfig::from_json(json).unwrap_err();
        assert!(format!("{:#}", err).contains("alternation period"));
    }

    #[test]
    fn test_rejects_blend_factor_zero() {
        assert!(SceneConfig::from_json(r#"{ "solar": { "blend_factor": 0.0 } }"#).is_err());
    }

    #[test]
    fn test_rejects_satellite_before_parent() {
        let json = r#"{ "solar": { "bodies": [
            { "name": "moon", "distance": 1.0, "speed": 1.0, "parent": 1,
              "material": { "params": { "base_color": [1, 1, 1], "ambient": 0.0,
                "diffusivity": 1.0, "specularity": 0.0, "smoothness": 1.0 } } },
            { "name": "planet", "distance": 5.0, "speed": 1.0,
              "material": { "params": { "base_color": [1, 1, 1], "ambient": 0.0,
                "diffusivity": 1.0, "specularity": 0.0, "smoothness": 1.0 } } }
        ] } }"#;
        assert!(SceneConfig::from_json(json).is_err());
    }

    #[test]
    fn test_light_json_shape() {
        let json = r#"{ "stack": { "lights": [
            { "kind": "point", "position": [1, 2, 3], "distance": 50.0, "color": [1, 1, 1], "intensity": 2.0 },
            { "kind": "directional", "direction": [0, 1, 0], "color": [1, 0, 0], "intensity": 0.5 }
        ] } }"#;
        let config = SceneConfig::from_json(json).unwrap();
        assert_eq!(config.stack.lights.len(), 2);
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = SceneConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(format!("{}", err).contains("Failed to read config file"));
    }
}

use glam::{Mat4, Vec3};

use crate::camera::{Camera, Projection};
use crate::lighting::{Light, LightUniform, MaterialParams, MaterialUniform, MAX_LIGHTS};
use crate::math::Transform;
use crate::texture::UvUniform;

/// Scene state shared by every material refreshed in one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub camera: &'a Camera,
    pub projection: &'a Projection,
    pub lights: &'a [Light],
}

impl FrameView<'_> {
    pub fn projection_camera_model(&self, model: Transform) -> Mat4 {
        self.projection.matrix() * self.camera.view_matrix() * model
    }
}

/// Copies live scene values into per-material uniform bundles once per
/// frame.
#[derive(Debug, Clone)]
pub struct MaterialBridge {
    n_lights: usize,
    last_shortfall: Option<usize>,
}

impl MaterialBridge {
    /// Counts above the compiled cap are clamped
    pub fn new(n_lights: usize) -> Self {
        let n_lights = if n_lights > MAX_LIGHTS {
            log::warn!("lighting model capped at {} lights, {} requested", MAX_LIGHTS, n_lights);
            MAX_LIGHTS
        } else {
            n_lights
        };
        Self {
            n_lights,
            last_shortfall: None,
        }
    }

    pub fn n_lights(&self) -> usize {
        self.n_lights
    }

    /// First `n_lights` scene lights, padded with zero-contribution slots
    pub fn collect_lights(&mut self, lights: &[Light]) -> [LightUniform; MAX_LIGHTS] {
        let mut slots = [LightUniform::PADDING; MAX_LIGHTS];
        for (slot, light) in slots.iter_mut().zip(lights.iter().take(self.n_lights)) {
            *slot = LightUniform::from_light(light);
        }

        let shortfall = (lights.len() < self.n_lights).then_some(lights.len());
        if shortfall != self.last_shortfall {
            if let Some(found) = shortfall {
                log::warn!(
                    "expected {} lights, found {}; padding with default lights",
                    self.n_lights,
                    found
                );
            }
            self.last_shortfall = shortfall;
        }
        slots
    }

    /// Build the uniform bundle for one object. `scale` is the object's
    /// own scale, used for the normal correction.
    pub fn refresh(
        &mut self,
        material: &MaterialParams,
        model: Transform,
        scale: Vec3,
        view: &FrameView<'_>,
    ) -> MaterialUniform {
        let mut uniform = MaterialUniform::new(material);
        let projection_camera_model = view.projection_camera_model(model);

        uniform.model_transform = model.to_cols_array_2d();
        uniform.projection_camera_model_transform = projection_camera_model.to_cols_array_2d();
        uniform.camera_center = view.camera.position.to_array();
        uniform.squared_scale = (scale * scale).to_array();
        uniform.lights = self.collect_lights(view.lights);
        uniform.light_count = self.n_lights as u32;
        uniform
    }

    /// Uniform for an animated-texture draw
    pub fn texture_uniform(&self, model: Transform, animation_time: f32, view: &FrameView<'_>) -> UvUniform {
        UvUniform::new(view.projection_camera_model(model), animation_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{position_of, translation};

    fn view<'a>(camera: &'a Camera, projection: &'a Projection, lights: &'a [Light]) -> FrameView<'a> {
        FrameView { camera, projection, lights }
    }

    #[test]
    fn test_pads_missing_lights() {
        let mut bridge = MaterialBridge::new(2);
        let lights = [Light::point(Vec3::ONE, Vec3::ONE, 1.0)];
        let slots = bridge.collect_lights(&lights);
        assert_eq!(slots[0], LightUniform::from_light(&lights[0]));
        assert_eq!(slots[1], LightUniform::PADDING);
    }

    #[test]
    fn test_extra_lights_dropped() {
        let mut bridge = MaterialBridge::new(1);
        let lights = [
            Light::point(Vec3::ONE, Vec3::ONE, 1.0),
            Light::point(Vec3::ZERO, Vec3::X, 1.0),
        ];
        let slots = bridge.collect_lights(&lights);
        assert_eq!(slots[1], LightUniform::PADDING);
    }

    #[test]
    fn test_light_count_clamped_to_cap() {
        assert_eq!(MaterialBridge::new(MAX_LIGHTS + 2).n_lights(), MAX_LIGHTS);
    }

    #[test]
    fn test_refresh_copies_scene_state() {
        let mut bridge = MaterialBridge::new(1);
        let camera = Camera::new(Vec3::new(0.0, 10.0, 20.0), Vec3::ZERO);
        let projection = Projection::default();
        let lights = [Light::point(Vec3::ZERO, Vec3::ONE, 1.0)];
        let model = translation(5.0, 0.0, 0.0);

        let uniform = bridge.refresh(
            &MaterialParams::default(),
            model,
            Vec3::new(1.0, 2.0, 3.0),
            &view(&camera, &projection, &lights),
        );

        assert_eq!(position_of(uniform.model_transform()), Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(uniform.camera_center(), camera.position);
        assert_eq!(uniform.squared_scale(), Vec3::new(1.0, 4.0, 9.0));
        assert_eq!(uniform.lights().len(), 1);
    }

    #[test]
    fn test_texture_uniform_matches_material_transform() {
        let mut bridge = MaterialBridge::new(0);
        let camera = Camera::new(Vec3::new(0.0, 0.0, -8.0), Vec3::ZERO);
        let projection = Projection::default();
        let frame = view(&camera, &projection, &[]);
        let model = translation(2.0, 0.0, 0.0);

        let uv = bridge.texture_uniform(model, 3.5, &frame);
        let lit = bridge.refresh(&MaterialParams::default(), model, Vec3::ONE, &frame);

        assert_eq!(uv.animation_time, 3.5);
        assert_eq!(uv.projection_camera_model_transform, lit.projection_camera_model_transform);
    }
}

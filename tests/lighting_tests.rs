use glam::Vec3;
use scene_kinematics::lighting::shader::{gouraud_wgsl, phong_wgsl};
use scene_kinematics::lighting::{
    shade_at, Light, LightUniform, MaterialParams, MaterialUniform, ShadingStage, Vertex, MAX_LIGHTS,
};

fn uniform_with(material: MaterialParams, lights: &[Light], camera: Vec3) -> MaterialUniform {
    let mut uniform = MaterialUniform::new(&material);
    for (slot, light) in uniform.lights.iter_mut().zip(lights) {
        *slot = LightUniform::from_light(light);
    }
    uniform.light_count = lights.len() as u32;
    uniform.camera_center = camera.to_array();
    uniform
}

#[cfg(test)]
mod lighting_tests {
    use super::*;

    const CENTROID: Vec3 = Vec3::splat(1.0 / 3.0);

    #[test]
    fn test_stages_agree_on_small_flat_triangle() {
        let size = 1e-3;
        let triangle = [
            Vertex::new(Vec3::new(0.0, 0.0, 0.0), Vec3::Z),
            Vertex::new(Vec3::new(size, 0.0, 0.0), Vec3::Z),
            Vertex::new(Vec3::new(0.0, size, 0.0), Vec3::Z),
        ];
        let lights = [Light::directional(Vec3::new(0.3, 0.2, 1.0).normalize(), Vec3::ONE, 1.0)];
        let uniform = uniform_with(MaterialParams::default(), &lights, Vec3::new(0.0, 0.0, 1000.0));

        for bary in [CENTROID, Vec3::new(0.6, 0.3, 0.1), Vec3::new(0.1, 0.1, 0.8)] {
            let gouraud = shade_at(ShadingStage::Gouraud, &triangle, bary, &uniform);
            let phong = shade_at(ShadingStage::Phong, &triangle, bary, &uniform);
            assert!(gouraud.abs_diff_eq(phong, 1e-3), "{:?} vs {:?}", gouraud, phong);
        }
    }

    #[test]
    fn test_stages_agree_under_point_light() {
        let size = 1e-3;
        let triangle = [
            Vertex::new(Vec3::new(0.0, 0.0, 0.0), Vec3::Z),
            Vertex::new(Vec3::new(size, 0.0, 0.0), Vec3::Z),
            Vertex::new(Vec3::new(0.0, size, 0.0), Vec3::Z),
        ];
        let lights = [Light::point(Vec3::new(0.5, 0.3, 4.0), Vec3::ONE, 1.0)];
        let uniform = uniform_with(MaterialParams::default(), &lights, Vec3::new(0.0, 0.0, 6.0));

        let gouraud = shade_at(ShadingStage::Gouraud, &triangle, CENTROID, &uniform);
        let phong = shade_at(ShadingStage::Phong, &triangle, CENTROID, &uniform);
        assert!(phong.x > 0.1);
        assert!(gouraud.abs_diff_eq(phong, 1e-3), "{:?} vs {:?}", gouraud, phong);
    }

    #[test]
    fn test_stages_differ_when_normals_vary() {
        let triangle = [
            Vertex::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(-1.0, 1.0, 0.0).normalize()),
            Vertex::new(Vec3::new(1.0, 0.0, -1.0), Vec3::new(1.0, 1.0, 0.0).normalize()),
            Vertex::new(Vec3::new(0.0, 0.0, 1.0), Vec3::Y),
        ];
        let eye = Vec3::new(0.0, 10.0, 0.0);
        let shiny = MaterialParams {
            base_color: Vec3::ONE,
            ambient: 0.0,
            diffusivity: 0.0,
            specularity: 1.0,
            smoothness: 100.0,
        };
        let uniform = uniform_with(shiny, &[Light::point(eye, Vec3::ONE, 1.0)], eye);

        let gouraud = shade_at(ShadingStage::Gouraud, &triangle, CENTROID, &uniform);
        let phong = shade_at(ShadingStage::Phong, &triangle, CENTROID, &uniform);
        // the highlight sits between the vertices, so only per-fragment shading sees it
        assert!(phong.x > gouraud.x + 0.3, "{:?} vs {:?}", phong, gouraud);
    }

    #[test]
    fn test_padding_slots_contribute_nothing() {
        let triangle = [
            Vertex::new(Vec3::ZERO, Vec3::Z),
            Vertex::new(Vec3::X, Vec3::Z),
            Vertex::new(Vec3::Y, Vec3::Z),
        ];
        let lights = [Light::directional(Vec3::Z, Vec3::ONE, 1.0)];
        let one = uniform_with(MaterialParams::default(), &lights, Vec3::new(0.0, 0.0, 5.0));
        let mut padded = one;
        padded.light_count = MAX_LIGHTS as u32;

        let a = shade_at(ShadingStage::Phong, &triangle, CENTROID, &one);
        let b = shade_at(ShadingStage::Phong, &triangle, CENTROID, &padded);
        assert!(a.abs_diff_eq(b, 1e-6));
        assert!(b.is_finite());
    }

    #[test]
    fn test_generated_shaders_share_lighting() {
        let gouraud = gouraud_wgsl(2);
        let phong = phong_wgsl(2);
        assert!(gouraud.contains("fn phong_model_lights"));
        assert!(phong.contains("fn phong_model_lights"));
        assert!(gouraud.contains("const N_LIGHTS: u32 = 2u;"));
        assert_ne!(gouraud, phong);
    }
}

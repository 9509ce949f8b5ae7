use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::core::controller::{Button, Controller};
use crate::traits::camera::FreeCameraControl;

pub const ORBIT_ROTATION_SPEED: f32 = 1.5;
pub const ORBIT_ZOOM_SPEED: f32 = 10.0;

const MIN_POLAR: f32 = 0.01;
/// Keeps the heading off the world up axis, where `look_to_rh` degenerates
const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - MIN_POLAR;

#[derive(Default, Clone, Copy, Debug)]
pub struct MovementState {
    pub orbit_left: bool,
    pub orbit_right: bool,
    pub orbit_up: bool,
    pub orbit_down: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
}

impl MovementState {
    pub fn from_controller<C: Controller + ?Sized>(controller: &C) -> Self {
        Self {
            orbit_left: controller.is_down(Button::OrbitLeft),
            orbit_right: controller.is_down(Button::OrbitRight),
            orbit_up: controller.is_down(Button::OrbitUp),
            orbit_down: controller.is_down(Button::OrbitDown),
            zoom_in: controller.is_down(Button::ZoomIn),
            zoom_out: controller.is_down(Button::ZoomOut),
        }
    }

    const fn to_direction(&self, positive: bool, negative: bool) -> f32 {
        match (positive, negative) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }

    /// (azimuth, elevation, zoom) directions
    const fn velocity(&self) -> (f32, f32, f32) {
        (
            self.to_direction(self.orbit_right, self.orbit_left),
            self.to_direction(self.orbit_up, self.orbit_down),
            self.to_direction(self.zoom_in, self.zoom_out),
        )
    }

    fn is_idle(&self) -> bool {
        self.velocity() == (0.0, 0.0, 0.0)
    }
}

/// Free-flying eye: position plus yaw/pitch heading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl Camera {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        let mut camera = Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
        };
        camera.look_at(target);
        camera
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.cos() * self.pitch.cos(),
        )
        .normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn up(&self) -> Vec3 {
        Vec3::Y
    }

    /// Turn to face `target`. Looking at its own position is a no-op.
    pub fn look_at(&mut self, target: Vec3) {
        let dir = (target - self.position).normalize_or_zero();
        if dir == Vec3::ZERO {
            return;
        }
        // straight up or down has no heading; keep the old yaw
        if dir.x != 0.0 || dir.z != 0.0 {
            self.yaw = dir.x.atan2(dir.z);
        }
        self.pitch = dir.y.clamp(-1.0, 1.0).asin().clamp(-MAX_PITCH, MAX_PITCH);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), self.up())
    }
}

/// Perspective lens
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Vertical field of view, degrees
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y: 35.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Projection {
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y.to_radians(), self.aspect, self.near, self.far)
    }
}

/// Orbit-style interactive controller circling `target`
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
    enabled: bool,
    movement: MovementState,
}

impl OrbitControls {
    pub fn new(target: Vec3, min_distance: f32, max_distance: f32) -> Self {
        Self {
            target,
            min_distance,
            max_distance,
            enabled: true,
            movement: MovementState::default(),
        }
    }

    pub fn set_movement(&mut self, movement: MovementState) {
        self.movement = movement;
    }
}

impl FreeCameraControl for OrbitControls {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Only moves the camera while enabled and while some orbit input is
    /// held, so an idle controller never disturbs the current pose
    fn update(&mut self, camera: &mut Camera, delta: f32) {
        if !self.enabled || self.movement.is_idle() {
            return;
        }
        let (azimuth_dir, elevation_dir, zoom_dir) = self.movement.velocity();

        let offset = camera.position - self.target;
        let radius = offset.length();
        if radius == 0.0 {
            return;
        }
        let azimuth = offset.x.atan2(offset.z) + azimuth_dir * ORBIT_ROTATION_SPEED * delta;
        let polar = ((offset.y / radius).clamp(-1.0, 1.0).acos()
            - elevation_dir * ORBIT_ROTATION_SPEED * delta)
            .clamp(MIN_POLAR, std::f32::consts::PI - MIN_POLAR);
        let radius = (radius - zoom_dir * ORBIT_ZOOM_SPEED * delta)
            .clamp(self.min_distance, self.max_distance);

        let offset = radius
            * Vec3::new(
                polar.sin() * azimuth.sin(),
                polar.cos(),
                polar.sin() * azimuth.cos(),
            );
        camera.position = self.target + offset;
        camera.look_at(self.target);
    }
}

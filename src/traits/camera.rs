use crate::camera::Camera;

/// Interactive camera controller that owns the pose while enabled
pub trait FreeCameraControl {
    fn is_enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool);

    /// Apply user input accumulated since the last frame
    fn update(&mut self, camera: &mut Camera, delta_time: f32);
}

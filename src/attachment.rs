use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::math::{compose, position_of, translation, Transform};
use crate::traits::camera::FreeCameraControl;

pub const DEFAULT_BLEND_FACTOR: f32 = 0.1;
pub const DEFAULT_OFFSET_DISTANCE: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attachment {
    /// The free controller owns the camera
    #[default]
    Free,
    Attached(usize),
}

/// Camera-follow state machine.
///
/// While attached, each frame pulls the camera a `blend_factor` fraction of
/// the way toward a point `offset_distance` along the target's local +Z,
/// and keeps the free controller disabled. Detaching hands control back
/// from wherever the camera was left.
#[derive(Debug, Clone)]
pub struct AttachmentController {
    state: Attachment,
    blend_factor: f32,
    offset_distance: f32,
}

impl AttachmentController {
    pub fn new(blend_factor: f32, offset_distance: f32) -> Self {
        Self {
            state: Attachment::Free,
            blend_factor,
            offset_distance,
        }
    }

    pub fn state(&self) -> Attachment {
        self.state
    }

    pub fn blend_factor(&self) -> f32 {
        self.blend_factor
    }

    /// Follow object `index`. Indices outside `0..available` are ignored.
    pub fn select(&mut self, index: usize, available: usize) {
        if index >= available {
            log::warn!("no object {} to attach to ({} available)", index, available);
            return;
        }
        if self.state != Attachment::Attached(index) {
            log::info!("camera attached to object {}", index);
        }
        self.state = Attachment::Attached(index);
    }

    pub fn detach(&mut self) {
        if self.state != Attachment::Free {
            log::info!("camera detached");
        }
        self.state = Attachment::Free;
    }

    /// Where the camera is heading for the given target placement
    pub fn desired_position(&self, placement: Transform) -> Vec3 {
        position_of(compose(placement, translation(0.0, 0.0, self.offset_distance)))
    }

    /// One frame of camera work. `anchors` are the followable placements for
    /// this frame.
    pub fn update<C: FreeCameraControl + ?Sized>(
        &mut self,
        anchors: &[Transform],
        camera: &mut Camera,
        controls: &mut C,
    ) {
        match self.state {
            Attachment::Free => {
                if !controls.is_enabled() {
                    controls.set_enabled(true);
                }
            }
            Attachment::Attached(index) => {
                let Some(&placement) = anchors.get(index) else {
                    // the set shrank underneath us
                    log::warn!("attached object {} vanished, detaching", index);
                    self.detach();
                    controls.set_enabled(true);
                    return;
                };
                let desired = self.desired_position(placement);
                camera.position = camera.position.lerp(desired, self.blend_factor);
                camera.look_at(position_of(placement));
                controls.set_enabled(false);
            }
        }
    }
}

impl Default for AttachmentController {
    fn default() -> Self {
        Self::new(DEFAULT_BLEND_FACTOR, DEFAULT_OFFSET_DISTANCE)
    }
}

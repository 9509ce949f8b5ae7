use anyhow::Result;
use glam::{Mat4, Vec3};
use serde::Serialize;

use crate::attachment::{Attachment, AttachmentController};
use crate::bridge::{FrameView, MaterialBridge};
use crate::camera::{Camera, MovementState, OrbitControls, Projection};
use crate::config::{CameraConfig, SceneConfig};
use crate::core::clock::AnimationClock;
use crate::core::controller::Command;
use crate::frame::FrameInfo;
use crate::lighting::{Light, MaterialUniform, ShadingStage};
use crate::math::Transform;
use crate::scenes::{create_solar_scene, create_spin_scene, create_stack_scene, SceneKind};
use crate::texture::{UvAnimation, UvUniform};
use crate::traits::{FreeCameraControl, SceneLayout};

/// Flags toggled by input. Read once per frame as a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AnimationState {
    pub frozen: bool,
    pub wireframe: bool,
    /// Stage used by materials in dynamic shading mode
    pub shading: ShadingStage,
    /// Spinning layouts only turn while this is set
    pub spinning: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Representation {
    Solid,
    Wireframe,
}

/// One draw for the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectPlacement {
    pub name: String,
    pub model: Transform,
    pub visible: bool,
    pub representation: Representation,
    pub color: Vec3,
    /// Stage and uniforms for lit solids
    pub shading: Option<ShadingStage>,
    pub material: Option<MaterialUniform>,
    /// Texture animation and its uniforms for mapped solids
    pub texture: Option<UvAnimation>,
    pub uv: Option<UvUniform>,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameOutput {
    pub number: u64,
    pub time: f32,
    /// Time the poses were computed for
    pub phase: f32,
    pub state: AnimationState,
    pub attachment: Attachment,
    pub camera: Camera,
    pub view: Mat4,
    pub objects: Vec<ObjectPlacement>,
    pub lights: Vec<Light>,
}

impl FrameOutput {
    pub fn object(&self, name: &str) -> Option<&ObjectPlacement> {
        self.objects.iter().find(|o| o.name == name)
    }
}

/// Per-frame driver. Poses are rebuilt from the clock and flags each frame;
/// the state carried between frames is the clock, the flags, the attachment
/// state, the camera pose and whatever the layout accumulates in `tick`.
pub struct Scene {
    layout: Box<dyn SceneLayout>,
    clock: AnimationClock,
    state: AnimationState,
    attachment: AttachmentController,
    camera: Camera,
    controls: OrbitControls,
    projection: Projection,
    bridge: MaterialBridge,
}

impl Scene {
    pub fn new(kind: SceneKind, config: &SceneConfig) -> Result<Self> {
        let scene = match kind {
            SceneKind::Stack => {
                let cfg = &config.stack;
                Self::with_layout(
                    Box::new(create_stack_scene(cfg)),
                    &cfg.camera,
                    AnimationClock::new(cfg.freeze_phase),
                    AttachmentController::default(),
                    MaterialBridge::new(cfg.n_lights),
                )
            }
            SceneKind::Solar => {
                let cfg = &config.solar;
                Self::with_layout(
                    Box::new(create_solar_scene(cfg)?),
                    &cfg.camera,
                    AnimationClock::new(cfg.freeze_phase),
                    AttachmentController::new(cfg.blend_factor, cfg.offset_distance),
                    MaterialBridge::new(cfg.n_lights),
                )
            }
            SceneKind::Spin => {
                let cfg = &config.spin;
                Self::with_layout(
                    Box::new(create_spin_scene(cfg)),
                    &cfg.camera,
                    AnimationClock::new(cfg.freeze_phase),
                    AttachmentController::default(),
                    MaterialBridge::new(0),
                )
            }
        };
        Ok(scene)
    }

    pub fn with_layout(
        layout: Box<dyn SceneLayout>,
        camera: &CameraConfig,
        clock: AnimationClock,
        attachment: AttachmentController,
        bridge: MaterialBridge,
    ) -> Self {
        Self {
            layout,
            clock,
            state: AnimationState::default(),
            attachment,
            camera: Camera::new(camera.position, camera.target),
            controls: OrbitControls::new(camera.target, camera.min_distance, camera.max_distance),
            projection: camera.projection,
            bridge,
        }
    }

    pub fn name(&self) -> &str {
        self.layout.name()
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn attachment(&self) -> Attachment {
        self.attachment.state()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    /// Held orbit input for the free controller
    pub fn set_movement(&mut self, movement: MovementState) {
        self.controls.set_movement(movement);
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::ToggleFreeze => {
                self.state.frozen = !self.state.frozen;
                log::info!("animation {}", if self.state.frozen { "frozen" } else { "resumed" });
            }
            Command::ToggleWireframe => self.state.wireframe = !self.state.wireframe,
            Command::ToggleShading => {
                self.state.shading = self.state.shading.toggled();
                log::info!("dynamic shading now {:?}", self.state.shading);
            }
            Command::ToggleSpin => {
                self.state.spinning = !self.state.spinning;
                log::info!("spin {}", if self.state.spinning { "on" } else { "off" });
            }
            Command::Detach => self.attachment.detach(),
            Command::Attach(index) => self.attachment.select(index, self.layout.anchor_count()),
        }
    }

    /// Run one frame: apply staged commands, pose every object, move the
    /// camera, then refresh lit materials against the final camera.
    pub fn advance(&mut self, frame: FrameInfo, commands: &[Command]) -> FrameOutput {
        for &command in commands {
            self.apply(command);
        }
        let state = self.state;

        self.clock.set_frozen(state.frozen);
        self.clock.sync_to(frame.time);
        let phase = self.clock.phase();

        self.layout.tick(frame.delta, &state);
        let placed = self.layout.place(phase);

        self.attachment.update(&placed.anchors, &mut self.camera, &mut self.controls);
        if self.controls.is_enabled() {
            self.controls.update(&mut self.camera, frame.delta);
        }

        let view = FrameView {
            camera: &self.camera,
            projection: &self.projection,
            lights: &placed.lights,
        };
        let mut objects = Vec::with_capacity(placed.objects.len() * 2);
        for object in &placed.objects {
            let (shading, material) = match object.material {
                Some(lit) => (
                    Some(lit.shading.resolve(state.shading, phase)),
                    Some(self.bridge.refresh(&lit.params, object.model, object.scale, &view)),
                ),
                None => (None, None),
            };
            let uv = object
                .texture
                .map(|_| self.bridge.texture_uniform(object.model, phase, &view));
            objects.push(ObjectPlacement {
                name: object.name.clone(),
                model: object.model,
                visible: !(object.wireframe_twin && state.wireframe),
                representation: Representation::Solid,
                color: object.color,
                shading,
                material,
                texture: object.texture,
                uv,
            });
            if object.wireframe_twin {
                objects.push(ObjectPlacement {
                    name: format!("{}-wire", object.name),
                    model: object.model,
                    visible: state.wireframe,
                    representation: Representation::Wireframe,
                    color: object.color,
                    shading: None,
                    material: None,
                    texture: None,
                    uv: None,
                });
            }
        }

        FrameOutput {
            number: frame.number,
            time: frame.time,
            phase,
            state,
            attachment: self.attachment.state(),
            camera: self.camera,
            view: self.camera.view_matrix(),
            objects,
            lights: placed.lights,
        }
    }
}

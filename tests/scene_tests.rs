use scene_kinematics::attachment::Attachment;
use scene_kinematics::camera::MovementState;
use scene_kinematics::config::SceneConfig;
use scene_kinematics::core::controller::Command;
use scene_kinematics::core::input_adapter::{command_channel, CommandReceiver, WinitController};
use scene_kinematics::frame::{FixedStepFrames, FrameInfo};
use scene_kinematics::lighting::{LightUniform, ShadingStage};
use scene_kinematics::math::position_of;
use scene_kinematics::scene::{Representation, Scene};
use scene_kinematics::scenes::SceneKind;
use scene_kinematics::traits::FreeCameraControl;
use winit::keyboard::KeyCode;

fn run(scene: &mut Scene, frames: u64, script: &[(u64, Command)]) -> Vec<scene_kinematics::FrameOutput> {
    FixedStepFrames::new(60.0)
        .take_frames(frames)
        .map(|frame| {
            let commands: Vec<Command> = script
                .iter()
                .filter(|(at, _)| *at == frame.number)
                .map(|(_, c)| *c)
                .collect();
            scene.advance(frame, &commands)
        })
        .collect()
}

/// One frame the way the windowed loop runs it: held keys become the
/// controller's movement, staged commands are drained into `advance`
fn drive(
    scene: &mut Scene,
    keyboard: &WinitController,
    receiver: &CommandReceiver,
    frame: FrameInfo,
) -> scene_kinematics::FrameOutput {
    scene.set_movement(MovementState::from_controller(keyboard));
    scene.advance(frame, &receiver.drain())
}

#[cfg(test)]
mod scene_tests {
    use super::*;

    #[test]
    fn test_freeze_pins_pose_and_resume_jumps_to_clock() {
        let mut scene = Scene::new(SceneKind::Stack, &SceneConfig::default()).unwrap();
        let frames = run(&mut scene, 90, &[(30, Command::ToggleFreeze), (60, Command::ToggleFreeze)]);

        let frozen_a = frames[35].object("cube-6").unwrap().model;
        let frozen_b = frames[55].object("cube-6").unwrap().model;
        assert_eq!(frozen_a, frozen_b);
        assert_eq!(frames[40].phase, 1.0);

        // resumed poses follow the clock, not the time spent frozen
        assert!((frames[75].phase - frames[75].time).abs() < 1e-6);
    }

    #[test]
    fn test_stack_materials_see_both_lights() {
        let mut scene = Scene::new(SceneKind::Stack, &SceneConfig::default()).unwrap();
        let out = scene.advance(FrameInfo::new(0, 0.25, 0.0), &[]);
        let cube = out.object("cube-2").unwrap();
        let material = cube.material.unwrap();

        assert_eq!(cube.representation, Representation::Solid);
        assert_eq!(material.lights().len(), 2);
        assert!(material.lights()[1].is_directional());
        assert_eq!(material.model_transform(), cube.model);
        assert_eq!(material.camera_center(), out.camera.position);
    }

    #[test]
    fn test_wireframe_twin_shares_pose() {
        let mut scene = Scene::new(SceneKind::Stack, &SceneConfig::default()).unwrap();
        let out = scene.advance(FrameInfo::new(0, 0.7, 0.0), &[Command::ToggleWireframe]);
        let solid = out.object("cube-4").unwrap();
        let wire = out.object("cube-4-wire").unwrap();

        assert_eq!(solid.model, wire.model);
        assert_eq!(wire.representation, Representation::Wireframe);
        assert!(wire.visible && !solid.visible);
    }

    #[test]
    fn test_solar_attach_then_detach() {
        let mut scene = Scene::new(SceneKind::Solar, &SceneConfig::default()).unwrap();
        let frames = run(&mut scene, 240, &[(10, Command::Attach(4)), (200, Command::Detach)]);

        assert_eq!(frames[100].attachment, Attachment::Attached(4));
        let settled = frames[199].camera.position;
        let moon = position_of(frames[199].object("moon").unwrap().model);
        assert!(settled.distance(moon) < 20.0);

        assert_eq!(frames[205].attachment, Attachment::Free);
        assert_eq!(frames[205].camera, frames[239].camera);
        assert!(scene.controls().is_enabled());
    }

    #[test]
    fn test_attach_past_end_is_ignored() {
        let mut scene = Scene::new(SceneKind::Solar, &SceneConfig::default()).unwrap();
        let out = scene.advance(FrameInfo::new(0, 0.0, 0.0), &[Command::Attach(8)]);
        assert_eq!(out.attachment, Attachment::Free);
    }

    #[test]
    fn test_sun_light_padded_for_extra_slots() {
        let mut config = SceneConfig::default();
        config.solar.n_lights = 3;
        let mut scene = Scene::new(SceneKind::Solar, &config).unwrap();
        let out = scene.advance(FrameInfo::new(0, 5.0, 0.0), &[]);
        let material = out.object("planet-1").unwrap().material.unwrap();

        assert_eq!(material.lights().len(), 3);
        assert!(!material.lights()[0].is_directional());
        assert_eq!(material.lights()[1], LightUniform::PADDING);
        assert_eq!(material.lights()[2], LightUniform::PADDING);
    }

    #[test]
    fn test_dynamic_material_follows_toggle() {
        let mut scene = Scene::new(SceneKind::Stack, &SceneConfig::default()).unwrap();
        let before = scene.advance(FrameInfo::new(0, 0.0, 0.0), &[]);
        let after = scene.advance(FrameInfo::new(1, 0.1, 0.1), &[Command::ToggleShading]);

        assert_eq!(before.object("cube-0").unwrap().shading, Some(ShadingStage::Phong));
        assert_eq!(after.object("cube-0").unwrap().shading, Some(ShadingStage::Gouraud));
        assert_eq!(after.object("cube-0-wire").unwrap().shading, None);
    }

    #[test]
    fn test_frame_serializes_to_json() {
        let mut scene = Scene::new(SceneKind::Solar, &SceneConfig::default()).unwrap();
        let out = scene.advance(FrameInfo::new(3, 0.05, 1.0 / 60.0), &[]);
        let json = serde_json::to_value(&out).unwrap();

        assert_eq!(json["number"], 3);
        assert_eq!(json["attachment"], "free");
        assert_eq!(json["objects"][0]["name"], "sun");
        assert_eq!(json["objects"].as_array().unwrap().len(), 6);
        assert!(out.camera.position.is_finite());
    }

    #[test]
    fn test_held_arrow_orbits_free_camera() {
        let mut scene = Scene::new(SceneKind::Solar, &SceneConfig::default()).unwrap();
        let (sender, receiver) = command_channel();
        let mut keyboard = WinitController::new(sender);
        let mut frames = FixedStepFrames::new(60.0);

        let start = drive(&mut scene, &keyboard, &receiver, frames.next().unwrap()).camera;
        let target = scene.controls().target;

        keyboard.handle_key(KeyCode::ArrowLeft, true, false);
        let mut moved = start;
        for frame in frames.by_ref().take(30) {
            moved = drive(&mut scene, &keyboard, &receiver, frame).camera;
        }
        assert!(moved.position.distance(start.position) > 1.0);
        let radius = start.position.distance(target);
        assert!((moved.position.distance(target) - radius).abs() < 1e-3);

        keyboard.handle_key(KeyCode::ArrowLeft, false, false);
        let a = drive(&mut scene, &keyboard, &receiver, frames.next().unwrap()).camera;
        let b = drive(&mut scene, &keyboard, &receiver, frames.next().unwrap()).camera;
        assert_eq!(a, b);
    }

    #[test]
    fn test_held_arrow_ignored_while_attached() {
        let config = SceneConfig::default();
        let mut held = Scene::new(SceneKind::Solar, &config).unwrap();
        let mut idle = Scene::new(SceneKind::Solar, &config).unwrap();
        let (held_tx, held_rx) = command_channel();
        let (idle_tx, idle_rx) = command_channel();
        let mut held_keys = WinitController::new(held_tx);
        let mut idle_keys = WinitController::new(idle_tx);

        held_keys.handle_key(KeyCode::ArrowLeft, true, false);
        for keyboard in [&mut held_keys, &mut idle_keys] {
            keyboard.handle_key(KeyCode::Digit2, true, false);
            keyboard.handle_key(KeyCode::Digit2, false, false);
        }

        for frame in FixedStepFrames::new(60.0).take_frames(120) {
            if frame.number == 60 {
                for keyboard in [&mut held_keys, &mut idle_keys] {
                    keyboard.handle_key(KeyCode::Digit0, true, false);
                    keyboard.handle_key(KeyCode::Digit0, false, false);
                }
            }
            let a = drive(&mut held, &held_keys, &held_rx, frame);
            let b = drive(&mut idle, &idle_keys, &idle_rx, frame);

            if frame.number < 60 {
                // the attachment owns the camera, so the held arrow changes nothing
                assert_eq!(a.attachment, Attachment::Attached(1));
                assert_eq!(a.camera, b.camera);
            } else if frame.number == 119 {
                assert_eq!(a.attachment, Attachment::Free);
                assert!(a.camera.position.distance(b.camera.position) > 0.1);
            }
        }
    }

    #[test]
    fn test_alternating_planet_flips_at_period_boundary() {
        let mut scene = Scene::new(SceneKind::Solar, &SceneConfig::default()).unwrap();
        let before = scene.advance(FrameInfo::new(0, 0.9, 0.0), &[]);
        let after = scene.advance(FrameInfo::new(1, 1.1, 0.2), &[]);
        assert_eq!(before.object("planet-2").unwrap().shading, Some(ShadingStage::Phong));
        assert_eq!(after.object("planet-2").unwrap().shading, Some(ShadingStage::Gouraud));

        // G inverts the pattern instead of pinning a stage
        let before = scene.advance(FrameInfo::new(2, 1.9, 0.8), &[Command::ToggleShading]);
        let after = scene.advance(FrameInfo::new(3, 2.1, 0.2), &[]);
        assert_eq!(before.object("planet-2").unwrap().shading, Some(ShadingStage::Phong));
        assert_eq!(after.object("planet-2").unwrap().shading, Some(ShadingStage::Gouraud));
        assert_eq!(after.object("planet-4").unwrap().shading, Some(ShadingStage::Phong));
    }
}

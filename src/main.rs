use anyhow::{ensure, Context, Result};
use clap::Parser;
use std::io::{self, BufWriter, Write};

use scene_kinematics::camera::MovementState;
use scene_kinematics::cli::Cli;
use scene_kinematics::config::SceneConfig;
use scene_kinematics::core::input_adapter::{command_channel, WinitController};
use scene_kinematics::frame::{FixedStepFrames, PacedFrames};
use scene_kinematics::lighting::shader;
use scene_kinematics::scene::{FrameOutput, Scene};
use scene_kinematics::scenes::SceneKind;
use scene_kinematics::texture;
use scene_kinematics::traits::{FrameSource, RenderTarget};

/// Writes each frame as one JSON line
struct JsonLines<W: Write> {
    out: W,
}

impl<W: Write> RenderTarget for JsonLines<W> {
    fn render_frame(&mut self, frame: &FrameOutput) -> Result<()> {
        serde_json::to_writer(&mut self.out, frame).context("Failed to serialize frame")?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}

/// Discards frames
struct NullTarget;

impl RenderTarget for NullTarget {
    fn render_frame(&mut self, _frame: &FrameOutput) -> Result<()> {
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };

    if cli.emit_shaders {
        let n_lights = match cli.scene {
            SceneKind::Stack => config.stack.n_lights,
            SceneKind::Solar => config.solar.n_lights,
            SceneKind::Spin => {
                for cube in &config.spin.cubes {
                    println!("// {}\n{}", cube.name, texture::shader::texture_wgsl(&cube.texture));
                }
                return Ok(());
            }
        };
        println!("// Gouraud\n{}", shader::gouraud_wgsl(n_lights));
        println!("// Phong\n{}", shader::phong_wgsl(n_lights));
        return Ok(());
    }

    ensure!(cli.fps > 0.0, "--fps must be positive, got {}", cli.fps);

    let mut scene = Scene::new(cli.scene, &config)?;
    log::info!("running '{}' for {} frames at {} fps", scene.name(), cli.frames, cli.fps);

    let stdout = io::stdout();
    let mut target: Box<dyn RenderTarget> = if cli.quiet {
        Box::new(NullTarget)
    } else {
        Box::new(JsonLines {
            out: BufWriter::new(stdout.lock()),
        })
    };

    let frames: Box<dyn FrameSource> = if cli.realtime {
        Box::new(PacedFrames::new(cli.fps).take_frames(cli.frames))
    } else {
        Box::new(FixedStepFrames::new(cli.fps).take_frames(cli.frames))
    };

    let (sender, receiver) = command_channel();
    let mut keyboard = WinitController::new(sender);

    let mut last = None;
    for frame in frames {
        for event in cli.events_at(frame.number) {
            event.apply(&mut keyboard);
        }
        scene.set_movement(MovementState::from_controller(&keyboard));
        let output = scene.advance(frame, &receiver.drain());
        target.render_frame(&output)?;
        last = Some(output);
    }
    drop(target);

    if let Some(output) = last {
        log::info!(
            "finished at t={:.3}s, phase {:.3}, camera at {:?}, {:?}",
            output.time,
            output.phase,
            output.camera.position,
            output.attachment
        );
    }
    Ok(())
}

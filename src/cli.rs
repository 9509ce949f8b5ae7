// cli.rs - Command-line interface configuration
use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;
use winit::keyboard::KeyCode;

use crate::core::input_adapter::WinitController;
use crate::scenes::SceneKind;

#[derive(Parser, Debug, Clone)]
#[command(name = "scene-kinematics")]
#[command(about = "Headless driver for the stacked-cube, solar and spinning-cube scenes", long_about = None)]
pub struct Cli {
    /// Which scene to animate
    #[arg(long, value_enum, default_value = "stack")]
    pub scene: SceneKind,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 120)]
    pub frames: u64,

    /// Fixed frame rate of the simulated clock
    #[arg(long, default_value_t = 60.0)]
    pub fps: f32,

    /// JSON scene configuration; built-in presets when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Key event at a frame (repeatable): `30:s` taps a key, `10:+left`
    /// holds it down and `50:-left` lets it go
    #[arg(long = "event", value_name = "FRAME:KEY")]
    pub events: Vec<KeyEvent>,

    /// Pace frames against the wall clock instead of stepping a fixed clock
    #[arg(long, default_value = "false")]
    pub realtime: bool,

    /// Print the generated WGSL for the chosen scene and exit
    #[arg(long = "emit-shaders", default_value = "false")]
    pub emit_shaders: bool,

    /// Suppress per-frame JSON output
    #[arg(long, default_value = "false")]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Press and release within the same frame
    Tap,
    Press,
    Release,
}

/// A scripted key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub frame: u64,
    pub key: KeyCode,
    pub action: KeyAction,
}

impl KeyEvent {
    /// Feed the transition to the keyboard adapter, as a window would
    pub fn apply(&self, keyboard: &mut WinitController) {
        match self.action {
            KeyAction::Tap => {
                keyboard.handle_key(self.key, true, false);
                keyboard.handle_key(self.key, false, false);
            }
            KeyAction::Press => keyboard.handle_key(self.key, true, false),
            KeyAction::Release => keyboard.handle_key(self.key, false, false),
        }
    }
}

impl FromStr for KeyEvent {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (frame, key) = s
            .split_once(':')
            .ok_or_else(|| anyhow!("expected FRAME:KEY, got '{}'", s))?;
        let frame = frame
            .trim()
            .parse()
            .with_context(|| format!("bad frame number in '{}'", s))?;

        let key = key.trim();
        let (action, name) = if let Some(name) = key.strip_prefix('+') {
            (KeyAction::Press, name)
        } else if let Some(name) = key.strip_prefix('-') {
            (KeyAction::Release, name)
        } else {
            (KeyAction::Tap, key)
        };
        let Some(keycode) = key_by_name(name) else {
            bail!(
                "unknown key '{}' (expected s, w, g, c, 0-9, left, right, up, down, plus or minus)",
                name
            );
        };
        if WinitController::keycode_to_command(keycode).is_none()
            && WinitController::keycode_to_button(keycode).is_none()
        {
            bail!("key '{}' has no binding", name);
        }
        Ok(Self {
            frame,
            key: keycode,
            action,
        })
    }
}

fn key_by_name(name: &str) -> Option<KeyCode> {
    let code = match name.to_ascii_lowercase().as_str() {
        "s" => KeyCode::KeyS,
        "w" => KeyCode::KeyW,
        "g" => KeyCode::KeyG,
        "c" => KeyCode::KeyC,
        "0" => KeyCode::Digit0,
        "1" => KeyCode::Digit1,
        "2" => KeyCode::Digit2,
        "3" => KeyCode::Digit3,
        "4" => KeyCode::Digit4,
        "5" => KeyCode::Digit5,
        "6" => KeyCode::Digit6,
        "7" => KeyCode::Digit7,
        "8" => KeyCode::Digit8,
        "9" => KeyCode::Digit9,
        "left" => KeyCode::ArrowLeft,
        "right" => KeyCode::ArrowRight,
        "up" => KeyCode::ArrowUp,
        "down" => KeyCode::ArrowDown,
        "plus" => KeyCode::Equal,
        "minus" => KeyCode::Minus,
        _ => return None,
    };
    Some(code)
}

impl Cli {
    /// Events scripted for one frame, in command-line order
    pub fn events_at(&self, frame: u64) -> impl Iterator<Item = &KeyEvent> + '_ {
        self.events.iter().filter(move |e| e.frame == frame)
    }
}

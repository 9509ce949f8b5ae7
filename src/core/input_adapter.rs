use std::collections::HashSet;
use std::sync::mpsc::{self, Receiver, Sender};
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::controller::{Button, Command, Controller};

/// Producer half of the command queue, owned by the input side
#[derive(Debug, Clone)]
pub struct CommandSender(Sender<Command>);

/// Consumer half, owned by the frame loop
#[derive(Debug)]
pub struct CommandReceiver(Receiver<Command>);

/// Single-producer/single-consumer queue between key handling and the frame
/// loop. Commands are only observed when the frame loop drains it.
pub fn command_channel() -> (CommandSender, CommandReceiver) {
    let (tx, rx) = mpsc::channel();
    (CommandSender(tx), CommandReceiver(rx))
}

impl CommandSender {
    pub fn send(&self, command: Command) {
        if self.0.send(command).is_err() {
            log::debug!("frame loop gone, dropping {:?}", command);
        }
    }
}

impl CommandReceiver {
    /// Take everything staged since the previous frame
    pub fn drain(&self) -> Vec<Command> {
        self.0.try_iter().collect()
    }
}

/// Adapter that bridges Winit keyboard events to scene commands and
/// held orbit buttons
#[derive(Debug, Clone)]
pub struct WinitController {
    /// Currently pressed buttons
    pressed_keys: HashSet<Button>,
    /// All pressed buttons as a vec (for efficient get_down_keys)
    pressed_vec: Vec<Button>,
    commands: CommandSender,
}

impl WinitController {
    pub fn new(commands: CommandSender) -> Self {
        Self {
            pressed_keys: HashSet::new(),
            pressed_vec: Vec::new(),
            commands,
        }
    }

    /// Process a Winit WindowEvent and update internal state
    pub fn process_event(&mut self, event: &WindowEvent) {
        if let WindowEvent::KeyboardInput { event, .. } = event {
            if let PhysicalKey::Code(keycode) = event.physical_key {
                let pressed = event.state == ElementState::Pressed;
                self.handle_key(keycode, pressed, event.repeat);
            }
        }
    }

    /// Apply one key transition. Commands fire on the initial press only.
    pub fn handle_key(&mut self, keycode: KeyCode, pressed: bool, repeat: bool) {
        if let Some(button) = Self::keycode_to_button(keycode) {
            if pressed {
                if self.pressed_keys.insert(button) {
                    self.pressed_vec.push(button);
                }
            } else if self.pressed_keys.remove(&button) {
                self.pressed_vec.retain(|&b| b != button);
            }
            return;
        }

        if pressed && !repeat {
            match Self::keycode_to_command(keycode) {
                Some(command) => self.commands.send(command),
                None => log::debug!("unbound key {:?}", keycode),
            }
        }
    }

    /// Map Winit KeyCode to a scene command
    pub fn keycode_to_command(keycode: KeyCode) -> Option<Command> {
        let command = match keycode {
            KeyCode::KeyS => Command::ToggleFreeze,
            KeyCode::KeyW => Command::ToggleWireframe,
            KeyCode::KeyG => Command::ToggleShading,
            KeyCode::KeyC => Command::ToggleSpin,
            KeyCode::Digit0 | KeyCode::Numpad0 => Command::Detach,
            KeyCode::Digit1 | KeyCode::Numpad1 => Command::Attach(0),
            KeyCode::Digit2 | KeyCode::Numpad2 => Command::Attach(1),
            KeyCode::Digit3 | KeyCode::Numpad3 => Command::Attach(2),
            KeyCode::Digit4 | KeyCode::Numpad4 => Command::Attach(3),
            KeyCode::Digit5 | KeyCode::Numpad5 => Command::Attach(4),
            KeyCode::Digit6 | KeyCode::Numpad6 => Command::Attach(5),
            KeyCode::Digit7 | KeyCode::Numpad7 => Command::Attach(6),
            KeyCode::Digit8 | KeyCode::Numpad8 => Command::Attach(7),
            KeyCode::Digit9 | KeyCode::Numpad9 => Command::Attach(8),
            _ => return None,
        };
        Some(command)
    }

    /// Map Winit KeyCode to a held orbit button
    pub fn keycode_to_button(keycode: KeyCode) -> Option<Button> {
        match keycode {
            KeyCode::ArrowLeft => Some(Button::OrbitLeft),
            KeyCode::ArrowRight => Some(Button::OrbitRight),
            KeyCode::ArrowUp => Some(Button::OrbitUp),
            KeyCode::ArrowDown => Some(Button::OrbitDown),
            KeyCode::Equal | KeyCode::NumpadAdd => Some(Button::ZoomIn),
            KeyCode::Minus | KeyCode::NumpadSubtract => Some(Button::ZoomOut),
            _ => None,
        }
    }
}

impl Controller for WinitController {
    fn is_down(&self, button: Button) -> bool {
        self.pressed_keys.contains(&button)
    }

    fn get_down_keys(&self) -> &[Button] {
        &self.pressed_vec
    }
}

/// Held input used by the free orbit controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    OrbitLeft,
    OrbitRight,
    OrbitUp,
    OrbitDown,
    ZoomIn,
    ZoomOut,
}

/// Discrete scene event, produced on key press and applied at frame start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    ToggleFreeze,
    ToggleWireframe,
    ToggleShading,
    /// Start or stop the spinning cubes
    ToggleSpin,
    Detach,
    /// Follow the object at this index
    Attach(usize),
}

/// Controller - exposes held button state
pub trait Controller {
    /// Check if button is currently down
    fn is_down(&self, button: Button) -> bool;

    /// Get all currently pressed buttons
    fn get_down_keys(&self) -> &[Button];
}

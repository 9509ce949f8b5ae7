/// Phase the stacked-cube pose pins to while frozen, in seconds.
pub const DEFAULT_FREEZE_PHASE: f32 = 1.0;

/// Animation clock - the single piece of mutable time state.
/// Real elapsed time always accumulates; freezing only pins the phase
/// handed to animation functions.
#[derive(Debug, Clone, Copy)]
pub struct AnimationClock {
    elapsed: f32,
    frozen: bool,
    freeze_phase: f32,
}

impl AnimationClock {
    pub fn new(freeze_phase: f32) -> Self {
        Self {
            elapsed: 0.0,
            frozen: false,
            freeze_phase,
        }
    }

    /// Advance by a frame delta in seconds
    pub fn advance(&mut self, delta: f32) {
        self.elapsed += delta;
    }

    /// Adopt an absolute elapsed time read from a monotonic source
    pub fn sync_to(&mut self, elapsed: f32) {
        self.elapsed = elapsed;
    }

    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Time fed to pose functions: the pinned phase while frozen,
    /// otherwise real elapsed time
    pub fn phase(&self) -> f32 {
        if self.frozen {
            self.freeze_phase
        } else {
            self.elapsed
        }
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(DEFAULT_FREEZE_PHASE)
    }
}

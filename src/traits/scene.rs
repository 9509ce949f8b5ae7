use crate::scene::AnimationState;
use crate::scenes::Placed;

/// Time-driven object layout. `place` is pure: the same phase and the same
/// accumulated state always produce the same placements.
pub trait SceneLayout {
    /// Accumulate per-frame state before placing. Most layouts are fully
    /// described by the phase and keep nothing.
    fn tick(&mut self, _delta: f32, _state: &AnimationState) {}

    /// Lay out every object for one frame
    fn place(&self, phase: f32) -> Placed;

    /// Number of objects the camera may attach to
    fn anchor_count(&self) -> usize;

    /// Get scene name for debugging
    fn name(&self) -> &str {
        "Scene"
    }
}

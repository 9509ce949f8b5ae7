use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::math::{compose, rotation_z, scaling, translation, Transform};

/// One link of a dependent chain: `M_0 = base(t)`, `M_i = step(t) ∘ M_{i-1}`.
pub trait ChainLink {
    fn base(&self, phase: f32) -> Transform;
    fn step(&self, phase: f32) -> Transform;
}

/// Walks the recurrence top to bottom. Each link is placed relative to its
/// predecessor, so the order is fixed.
pub fn compose_chain<L: ChainLink + ?Sized>(link: &L, phase: f32, count: usize) -> Vec<Transform> {
    let step = link.step(phase);
    let mut placements = Vec::with_capacity(count);
    let mut current = link.base(phase);
    for _ in 0..count {
        placements.push(current);
        current = compose(step, current);
    }
    placements
}

/// `amplitude * |sin(pi * t / period)|`: always in `[0, amplitude]`,
/// periodic in `period`. Rectified, so the tilt only ever goes one way.
pub fn oscillation_angle(amplitude: f32, period: f32, t: f32) -> f32 {
    amplitude * (std::f32::consts::PI * t / period).sin().abs()
}

/// A column of boxes, each tilted about its shared corner with the one
/// below it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackedCubes {
    pub count: usize,
    /// Half the unscaled edge length
    pub half_extent: f32,
    /// Vertical stretch applied to every box
    pub y_scale: f32,
    /// Peak tilt per link, radians
    pub amplitude: f32,
    /// Seconds between rest poses
    pub period: f32,
}

impl Default for StackedCubes {
    fn default() -> Self {
        Self {
            count: 7,
            half_extent: 0.5,
            y_scale: 1.5,
            amplitude: 10.0_f32.to_radians(),
            period: 2.0,
        }
    }
}

impl StackedCubes {
    /// Half height after scaling
    pub fn half_height(&self) -> f32 {
        self.y_scale * self.half_extent
    }

    pub fn angle(&self, phase: f32) -> f32 {
        oscillation_angle(self.amplitude, self.period, phase)
    }

    pub fn placements(&self, phase: f32) -> Vec<Transform> {
        compose_chain(self, phase, self.count)
    }

    /// Bottom-left-front corner in box-local coordinates
    pub fn local_bottom_left(&self) -> Vec3 {
        let l = self.half_extent;
        Vec3::new(-l, -l, l)
    }

    /// Top-left-front corner in box-local coordinates
    pub fn local_top_left(&self) -> Vec3 {
        let l = self.half_extent;
        Vec3::new(-l, l, l)
    }
}

impl ChainLink for StackedCubes {
    fn base(&self, _phase: f32) -> Transform {
        scaling(1.0, self.y_scale, 1.0)
    }

    fn step(&self, phase: f32) -> Transform {
        let l = self.half_extent;
        let h = self.half_height();
        // pivot about the shared left edge, then lift one box height
        let to_pivot = translation(l, h, 0.0);
        let from_pivot = translation(-l, -h, 0.0);
        let lift = translation(0.0, 2.0 * h, 0.0);
        compose(
            lift,
            compose(from_pivot, compose(rotation_z(self.angle(phase)), to_pivot)),
        )
    }
}

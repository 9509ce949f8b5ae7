use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Square ring between two concentric boxes of texture space. Both bounds
/// are exclusive, so a coordinate sitting exactly on an edge of the outer
/// box is outside the ring and one on an edge of the inner box is inside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlineMask {
    pub outer: [f32; 2],
    pub inner: [f32; 2],
}

impl OutlineMask {
    pub const ROTATING: Self = Self {
        outer: [0.15, 0.85],
        inner: [0.25, 0.75],
    };

    pub const SCROLLING: Self = Self {
        outer: [0.25, 0.75],
        inner: [0.35, 0.65],
    };

    pub fn contains(&self, uv: Vec2) -> bool {
        inside(uv, self.outer) && !inside(uv, self.inner)
    }

    /// Inner box strictly nested in the outer one, both within `[0, 1]`
    pub fn is_valid(&self) -> bool {
        let [outer_lo, outer_hi] = self.outer;
        let [inner_lo, inner_hi] = self.inner;
        0.0 <= outer_lo && outer_lo < inner_lo && inner_lo < inner_hi && inner_hi < outer_hi && outer_hi <= 1.0
    }
}

fn inside(uv: Vec2, [lo, hi]: [f32; 2]) -> bool {
    uv.x > lo && uv.x < hi && uv.y > lo && uv.y < hi
}

/// Per-fragment texture-coordinate animation, driven by the animation time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum UvAnimation {
    /// Turns the map clockwise about the face center, one revolution every
    /// `period` seconds. The outline turns with it.
    Rotate { period: f32, outline: OutlineMask },
    /// Repeats the map `tiling` times across the face and slides it along s
    /// at `speed` texture units per second. The outline repeats per tile.
    Scroll {
        tiling: f32,
        speed: f32,
        outline: OutlineMask,
    },
}

/// Where a fragment reads the map, and whether the outline covers it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvSample {
    pub uv: Vec2,
    pub outlined: bool,
}

/// Rotate `uv` by `angle` radians about the face center `(0.5, 0.5)`
pub fn rotate_uv(uv: Vec2, angle: f32) -> Vec2 {
    let center = Vec2::splat(0.5);
    Vec2::from_angle(angle).rotate(uv - center) + center
}

impl UvAnimation {
    /// 8 rpm, outline ring from 0.15 to 0.25
    pub fn rotating() -> Self {
        Self::Rotate {
            period: 7.5,
            outline: OutlineMask::ROTATING,
        }
    }

    /// Two tiles per face scrolling 4 units/s, outline ring from 0.25 to 0.35
    pub fn scrolling() -> Self {
        Self::Scroll {
            tiling: 2.0,
            speed: 4.0,
            outline: OutlineMask::SCROLLING,
        }
    }

    pub fn outline(&self) -> &OutlineMask {
        match self {
            Self::Rotate { outline, .. } | Self::Scroll { outline, .. } => outline,
        }
    }

    /// Revolutions per minute of a rotating map
    pub fn rpm(&self) -> Option<f32> {
        match self {
            Self::Rotate { period, .. } => Some(60.0 / period),
            Self::Scroll { .. } => None,
        }
    }

    pub fn transform(&self, uv: Vec2, t: f32) -> Vec2 {
        match *self {
            Self::Rotate { period, .. } => rotate_uv(uv, -TAU * t / period),
            Self::Scroll { tiling, speed, .. } => uv * tiling - Vec2::new(speed * t, 0.0),
        }
    }

    /// Coordinates the outline is tested in: the animated ones for a
    /// rotating map, their fractional part for a tiled one
    pub fn mask_coords(&self, uv: Vec2) -> Vec2 {
        match self {
            Self::Rotate { .. } => uv,
            Self::Scroll { .. } => uv - uv.floor(),
        }
    }

    pub fn sample(&self, uv: Vec2, t: f32) -> UvSample {
        let uv = self.transform(uv, t);
        UvSample {
            uv,
            outlined: self.outline().contains(self.mask_coords(uv)),
        }
    }

    pub fn is_valid(&self) -> bool {
        let rates = match *self {
            Self::Rotate { period, .. } => period > 0.0,
            Self::Scroll { tiling, speed, .. } => tiling > 0.0 && speed.is_finite(),
        };
        rates && self.outline().is_valid()
    }
}

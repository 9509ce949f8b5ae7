use std::time::{Duration, Instant};

use crate::traits::FrameSource;

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    /// Seconds since the source started
    pub time: f32,
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }
}

/// Wall-clock frames paced to a target rate: `next` sleeps until one
/// interval has passed since the previous frame. Time and delta are
/// measured, so a slow consumer sees longer deltas instead of a slower clock.
#[derive(Debug, Clone)]
pub struct PacedFrames {
    interval: Duration,
    started: Option<Instant>,
    last: Option<Instant>,
    next_due: Option<Instant>,
    frame_number: u64,
    limit: Option<u64>,
    last_delta: f32,
}

impl PacedFrames {
    /// A non-positive or non-finite rate runs unpaced
    pub fn new(fps: f32) -> Self {
        Self {
            interval: Duration::try_from_secs_f32(1.0 / fps).unwrap_or(Duration::ZERO),
            started: None,
            last: None,
            next_due: None,
            frame_number: 0,
            limit: None,
            last_delta: 0.0,
        }
    }

    /// Stop after `frames` frames
    pub fn take_frames(mut self, frames: u64) -> Self {
        self.limit = Some(frames);
        self
    }
}

impl Iterator for PacedFrames {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        if self.limit.is_some_and(|limit| self.frame_number >= limit) {
            return None;
        }
        if let Some(due) = self.next_due {
            let now = Instant::now();
            if now < due {
                std::thread::sleep(due - now);
            }
        }

        let now = Instant::now();
        let started = *self.started.get_or_insert(now);
        let delta = self.last.map_or(0.0, |last| now.duration_since(last).as_secs_f32());
        let info = FrameInfo::new(self.frame_number, now.duration_since(started).as_secs_f32(), delta);

        self.next_due = Some(now + self.interval);
        self.last = Some(now);
        self.last_delta = delta;
        self.frame_number += 1;
        Some(info)
    }
}

impl FrameSource for PacedFrames {
    fn delta_time(&self) -> f32 {
        self.last_delta
    }

    fn frame_count(&self) -> u64 {
        self.frame_number
    }
}

/// Deterministic frames at a fixed rate, for headless runs and tests.
/// The first frame sits at time zero.
#[derive(Debug, Clone)]
pub struct FixedStepFrames {
    step: f32,
    frame_number: u64,
    limit: Option<u64>,
}

impl FixedStepFrames {
    pub fn new(fps: f32) -> Self {
        Self {
            step: 1.0 / fps,
            frame_number: 0,
            limit: None,
        }
    }

    /// Stop after `frames` frames
    pub fn take_frames(mut self, frames: u64) -> Self {
        self.limit = Some(frames);
        self
    }
}

impl Iterator for FixedStepFrames {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        if self.limit.is_some_and(|limit| self.frame_number >= limit) {
            return None;
        }
        let delta = if self.frame_number == 0 { 0.0 } else { self.step };
        // multiply rather than accumulate so long runs don't drift
        let info = FrameInfo::new(self.frame_number, self.frame_number as f32 * self.step, delta);
        self.frame_number += 1;
        Some(info)
    }
}

impl FrameSource for FixedStepFrames {
    fn delta_time(&self) -> f32 {
        self.step
    }

    fn frame_count(&self) -> u64 {
        self.frame_number
    }
}

//! A single spin, from request to rest.

use std::f64::consts::TAU;
use std::ops::Range;

use rand::Rng;

use crate::easing::{ease_out_cubic, lerp, progress};

/// The random draws that shape a spin: whole turns plus a fraction of a turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinDraw {
    pub turns: f64,
    pub offset: f64,
}

impl SpinDraw {
    /// `turns` uniform in `turn_range`, `offset` uniform in `[0, 1)`.
    pub fn sample<R: Rng>(rng: &mut R, turn_range: Range<f64>) -> Self {
        let turns = if turn_range.start < turn_range.end {
            rng.gen_range(turn_range)
        } else {
            turn_range.start
        };
        Self {
            turns,
            offset: rng.gen_range(0.0..1.0),
        }
    }

    /// Where a wheel resting at `current` should stop.
    pub fn target_from(&self, current: f64) -> f64 {
        current + self.turns * TAU + self.offset * TAU
    }
}

/// Result of sampling an animation at some timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub angle: f64,
    pub progress: f64,
    pub done: bool,
}

/// In-flight spin. The start timestamp is latched by the first sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinAnimation {
    pub from: f64,
    pub target: f64,
    pub duration: f64,
    started_at: Option<f64>,
}

impl SpinAnimation {
    pub fn new(from: f64, target: f64, duration: f64) -> Self {
        Self {
            from,
            target,
            duration,
            started_at: None,
        }
    }

    pub fn started_at(&self) -> Option<f64> {
        self.started_at
    }

    /// Displayed angle at `now` (milliseconds).
    pub fn sample(&mut self, now: f64) -> Frame {
        let start = *self.started_at.get_or_insert(now);
        let p = progress(now - start, self.duration);
        Frame {
            angle: lerp(self.from, self.target, ease_out_cubic(p)),
            progress: p,
            done: p >= 1.0,
        }
    }
}

//! The wheel's Idle → Spinning → Idle cycle.
//!
//! Nothing here knows about clocks or frame callbacks. The host calls
//! [`Wheel::advance`] with a millisecond timestamp whenever it gets a chance
//! to draw, and paints whatever angle comes back.

use std::ops::Range;

use rand::Rng;

use crate::animation::{SpinAnimation, SpinDraw};
use crate::config::{check_turns, WheelConfig};
use crate::draw::{render, Canvas, Style};
use crate::error::{Result, WheelError};
use crate::geometry::{normalize, resolve_index, Prize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Spinning,
}

/// What one call to [`Wheel::advance`] produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    /// No spin in flight (or the tick belonged to a discarded spin).
    Idle,
    /// Still turning; draw at `angle`.
    Frame { angle: f64, progress: f64 },
    /// The spin just ended. `angle` is the committed resting angle.
    Settled { angle: f64, prize: Prize },
}

#[derive(Debug, Clone)]
pub struct Wheel {
    segments: Vec<String>,
    angle: f64,
    duration: f64,
    turn_range: Range<f64>,
    generation: u64,
    spin: Option<SpinAnimation>,
}

impl Wheel {
    /// Wheel with the stock timing (3.5 s, 5 to 8 turns).
    pub fn new(segments: Vec<String>) -> Result<Self> {
        let defaults = WheelConfig::default();
        Self::with_timing(segments, defaults.duration_ms, defaults.turn_range())
    }

    pub fn from_config(config: &WheelConfig) -> Result<Self> {
        config.validate()?;
        Self::with_timing(
            config.segments.clone(),
            config.duration_ms,
            config.turn_range(),
        )
    }

    pub fn with_timing(
        segments: Vec<String>,
        duration: f64,
        turn_range: Range<f64>,
    ) -> Result<Self> {
        if segments.is_empty() {
            return Err(WheelError::NoSegments);
        }
        if !(duration.is_finite() && duration > 0.0) {
            return Err(WheelError::InvalidDuration(duration));
        }
        check_turns(&turn_range)?;
        Ok(Self {
            segments,
            angle: 0.0,
            duration,
            turn_range,
            generation: 0,
            spin: None,
        })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Committed resting angle. Does not move while a spin is in flight.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn phase(&self) -> Phase {
        if self.spin.is_some() {
            Phase::Spinning
        } else {
            Phase::Idle
        }
    }

    pub fn is_spinning(&self) -> bool {
        self.spin.is_some()
    }

    /// Target of the in-flight spin, if any.
    pub fn target(&self) -> Option<f64> {
        self.spin.as_ref().map(|s| s.target)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a randomized spin. Returns the target angle, or `None` when a
    /// spin is already running (in which case nothing changes).
    pub fn spin<R: Rng>(&mut self, rng: &mut R) -> Option<f64> {
        if self.is_spinning() {
            tracing::debug!("spin requested while spinning; ignored");
            return None;
        }
        let draw = SpinDraw::sample(rng, self.turn_range.clone());
        self.spin_to(draw.target_from(self.angle))
    }

    /// Start a spin towards an explicit target angle.
    pub fn spin_to(&mut self, target: f64) -> Option<f64> {
        if self.is_spinning() {
            tracing::debug!("spin requested while spinning; ignored");
            return None;
        }
        tracing::info!(
            from = self.angle,
            to = target,
            generation = self.generation,
            "spin started"
        );
        self.spin = Some(SpinAnimation::new(self.angle, target, self.duration));
        Some(target)
    }

    /// Step the animation to `now` (milliseconds, any monotonic origin).
    pub fn advance(&mut self, now: f64) -> Tick {
        let Some(spin) = self.spin.as_mut() else {
            return Tick::Idle;
        };
        let frame = spin.sample(now);
        if !frame.done {
            return Tick::Frame {
                angle: frame.angle,
                progress: frame.progress,
            };
        }

        let target = spin.target;
        self.spin = None;
        self.angle = normalize(target);
        let prize = self.resolve();
        tracing::info!(
            angle = self.angle,
            index = prize.index,
            label = %prize.label,
            "spin settled"
        );
        Tick::Settled {
            angle: self.angle,
            prize,
        }
    }

    /// Like [`Wheel::advance`], but only for the spin started under
    /// `generation`. Ticks for a spin discarded by [`Wheel::reset`] are no-ops.
    pub fn advance_for(&mut self, generation: u64, now: f64) -> Tick {
        if generation != self.generation {
            tracing::debug!(stale = generation, current = self.generation, "stale tick dropped");
            return Tick::Idle;
        }
        self.advance(now)
    }

    /// Back to angle 0, dropping any in-flight spin.
    pub fn reset(&mut self) {
        if self.spin.take().is_some() {
            tracing::debug!(generation = self.generation, "in-flight spin discarded");
        }
        self.generation += 1;
        self.angle = 0.0;
    }

    /// Segment under the pointer at the committed angle.
    pub fn resolve(&self) -> Prize {
        let index = resolve_index(self.angle, self.segments.len());
        Prize {
            index,
            label: self.segments[index].clone(),
        }
    }

    /// Draw the wheel at an arbitrary display angle.
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C, angle: f64, style: &Style) {
        render(canvas, &self.segments, angle, style);
    }
}

//! Wheel geometry.
//!
//! Angles are screen angles in radians with the y axis pointing down, so a
//! growing angle turns clockwise. Sector `i` of an `n`-segment wheel rotated
//! by `angle` spans `[angle + i·w, angle + (i+1)·w)` with `w = 2π/n`.

use std::f64::consts::{FRAC_PI_2, TAU};

use serde::{Deserialize, Serialize};

/// Where the pointer sits: straight up.
pub const POINTER_ANGLE: f64 = -FRAC_PI_2;

/// Offsets this close to a seam (in sector widths) snap onto it.
const SEAM_EPSILON: f64 = 1e-9;

/// Angular width of one sector.
pub fn sector_width(n: usize) -> f64 {
    TAU / n as f64
}

/// Reduce an angle into `[0, 2π)`.
pub fn normalize(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if a >= TAU { 0.0 } else { a }
}

/// Start and end angle of sector `index` for a wheel rotated by `angle`.
pub fn sector_bounds(index: usize, n: usize, angle: f64) -> (f64, f64) {
    let w = sector_width(n);
    (angle + index as f64 * w, angle + (index + 1) as f64 * w)
}

/// Index of the sector lying under the pointer when the wheel rests at
/// `angle`. Always in `[0, n)`; `n` must be non-zero.
///
/// The pointer is on `−π/2 (mod 2π)`, so we measure how far clockwise the
/// pointer is from the start of sector 0 and divide by the sector width.
/// A pointer sitting on a seam belongs to the sector that starts there.
pub fn resolve_index(angle: f64, n: usize) -> usize {
    debug_assert!(n > 0, "resolve_index on an empty wheel");
    let offset = normalize(POINTER_ANGLE - angle);
    let mut pos = offset / sector_width(n);
    let nearest = pos.round();
    if (pos - nearest).abs() < SEAM_EPSILON {
        pos = nearest;
    }
    (pos.floor() as usize) % n
}

/// The segment that won a spin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prize {
    pub index: usize,
    pub label: String,
}

/// Resolve the winning segment for a resting angle. `None` on an empty list.
pub fn resolve_prize(angle: f64, segments: &[String]) -> Option<Prize> {
    if segments.is_empty() {
        return None;
    }
    let index = resolve_index(angle, segments.len());
    Some(Prize {
        index,
        label: segments[index].clone(),
    })
}

/// A point on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotate `(x, y)` by `theta` around the origin, then translate by `self`.
    pub fn offset_rotated(&self, x: f64, y: f64, theta: f64) -> Point {
        let (sin, cos) = theta.sin_cos();
        Point {
            x: self.x + x * cos - y * sin,
            y: self.y + x * sin + y * cos,
        }
    }
}

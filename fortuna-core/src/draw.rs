//! Wheel rendering against an abstract 2D canvas.
//!
//! The renderer only knows about three primitives (pie sectors, rotated
//! text and filled polygons). Backends translate them into whatever the
//! host draws with; see `fortuna-bridge` for the SVG one and
//! [`crate::recorder`] for the one the tests use.

use std::f64::consts::TAU;

use crate::config::{Palette, Rgba, WheelConfig};
use crate::geometry::{sector_bounds, Point, POINTER_ANGLE};

/// Labels are right-aligned this far inside the rim.
pub const LABEL_INSET: f64 = 20.0;
/// Labels are pushed this far along the sector's perpendicular.
pub const LABEL_DROP: f64 = 10.0;

/// Pointer triangle in its own frame (x along the pointer direction).
pub const POINTER_SHAPE: [(f64, f64); 3] = [(-10.0, 0.0), (30.0, -20.0), (30.0, 20.0)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// A filled pie slice from `start` to `end`, clockwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Sector {
    pub center: Point,
    pub radius: f64,
    pub start: f64,
    pub end: f64,
    pub fill: Rgba,
}

/// Text drawn at `(dx, dy)` in a frame rotated by `rotation` around `origin`.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub origin: Point,
    pub rotation: f64,
    pub dx: f64,
    pub dy: f64,
    pub align: TextAlign,
    pub font: String,
    pub fill: Rgba,
}

impl Label {
    /// Anchor point in canvas coordinates.
    pub fn anchor(&self) -> Point {
        self.origin.offset_rotated(self.dx, self.dy, self.rotation)
    }
}

/// The drawing boundary.
pub trait Canvas {
    /// Edge length of the (square) drawing area.
    fn size(&self) -> f64;
    fn clear(&mut self);
    fn fill_sector(&mut self, sector: &Sector);
    fn fill_text(&mut self, label: &Label);
    fn fill_polygon(&mut self, points: &[Point], fill: Rgba);
}

/// Visual knobs the renderer needs besides the segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub palette: Palette,
    pub font: String,
}

impl Default for Style {
    fn default() -> Self {
        Self::from(&WheelConfig::default())
    }
}

impl From<&WheelConfig> for Style {
    fn from(config: &WheelConfig) -> Self {
        Self {
            palette: config.palette.clone(),
            font: config.font.clone(),
        }
    }
}

/// Draw the whole wheel rotated by `angle`, then the pointer on top.
pub fn render<C: Canvas + ?Sized>(canvas: &mut C, segments: &[String], angle: f64, style: &Style) {
    let size = canvas.size();
    let radius = size / 2.0;
    let center = Point::new(radius, radius);
    let n = segments.len();

    canvas.clear();

    for (i, text) in segments.iter().enumerate() {
        let (start, end) = sector_bounds(i, n, angle);
        let fill = if i % 2 == 0 {
            style.palette.even
        } else {
            style.palette.odd
        };
        canvas.fill_sector(&Sector {
            center,
            radius,
            start,
            end,
            fill,
        });
        canvas.fill_text(&Label {
            text: text.clone(),
            origin: center,
            rotation: start + (end - start) / 2.0,
            dx: radius - LABEL_INSET,
            dy: LABEL_DROP,
            align: TextAlign::Right,
            font: style.font.clone(),
            fill: style.palette.text,
        });
    }

    let pointer: Vec<Point> = POINTER_SHAPE
        .iter()
        .map(|&(x, y)| center.offset_rotated(radius + x, y, POINTER_ANGLE))
        .collect();
    canvas.fill_polygon(&pointer, style.palette.pointer);
}

/// True when the arc from `start` to `end` covers more than half a turn.
pub fn is_large_arc(start: f64, end: f64) -> bool {
    (end - start).abs() > TAU / 2.0
}

//! Canvas that records draw calls instead of painting.
//!
//! `clear` drops everything recorded so far, so after a render the log
//! holds exactly one frame.

use crate::config::Rgba;
use crate::draw::{Canvas, Label, Sector};
use crate::geometry::Point;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Sector(Sector),
    Text(Label),
    Polygon { points: Vec<Point>, fill: Rgba },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordingCanvas {
    size: f64,
    ops: Vec<DrawOp>,
    clears: usize,
}

impl RecordingCanvas {
    pub fn new(size: f64) -> Self {
        Self {
            size,
            ops: Vec::new(),
            clears: 0,
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// How many frames have been started on this canvas.
    pub fn clears(&self) -> usize {
        self.clears
    }

    pub fn sectors(&self) -> impl Iterator<Item = &Sector> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Sector(s) => Some(s),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(l) => Some(l),
            _ => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> f64 {
        self.size
    }

    fn clear(&mut self) {
        self.ops.clear();
        self.clears += 1;
    }

    fn fill_sector(&mut self, sector: &Sector) {
        self.ops.push(DrawOp::Sector(sector.clone()));
    }

    fn fill_text(&mut self, label: &Label) {
        self.ops.push(DrawOp::Text(label.clone()));
    }

    fn fill_polygon(&mut self, points: &[Point], fill: Rgba) {
        self.ops.push(DrawOp::Polygon {
            points: points.to_vec(),
            fill,
        });
    }
}

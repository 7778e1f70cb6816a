//! SVG backend for the wheel renderer.
//!
//! Draw calls are buffered for the current frame (each `clear` starts a new
//! one) and turned into an `svg::Document` on demand.

use std::f64::consts::TAU;
use std::path::Path as FsPath;

use fortuna_core::draw::is_large_arc;
use fortuna_core::{Canvas, DrawOp, Label, Point, RecordingCanvas, Rgba, Sector, TextAlign};
use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Path, Text};

#[derive(Debug, Clone)]
pub struct SvgCanvas {
    frame: RecordingCanvas,
}

impl SvgCanvas {
    pub fn new(size: f64) -> Self {
        Self {
            frame: RecordingCanvas::new(size),
        }
    }

    /// Draw calls making up the current frame.
    pub fn ops(&self) -> &[DrawOp] {
        self.frame.ops()
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> usize {
        self.frame.clears()
    }

    /// The current frame as a standalone document.
    pub fn document(&self) -> Document {
        let size = num(self.frame.size());
        let mut doc = Document::new()
            .set("width", size.clone())
            .set("height", size.clone())
            .set("viewBox", format!("0 0 {} {}", size, size));
        for op in self.frame.ops() {
            doc = match op {
                DrawOp::Sector(sector) if sector.end - sector.start >= TAU - 1e-9 => {
                    doc.add(disc(sector))
                }
                DrawOp::Sector(sector) => doc.add(slice(sector)),
                DrawOp::Text(label) => doc.add(text(label)),
                DrawOp::Polygon { points, fill } => match polygon(points, *fill) {
                    Some(path) => doc.add(path),
                    None => doc,
                },
            };
        }
        doc
    }

    pub fn to_svg_string(&self) -> String {
        self.document().to_string()
    }

    pub fn save<P: AsRef<FsPath>>(&self, path: P) -> std::io::Result<()> {
        svg::save(path, &self.document())
    }
}

impl Canvas for SvgCanvas {
    fn size(&self) -> f64 {
        self.frame.size()
    }

    fn clear(&mut self) {
        self.frame.clear();
    }

    fn fill_sector(&mut self, sector: &Sector) {
        self.frame.fill_sector(sector);
    }

    fn fill_text(&mut self, label: &Label) {
        self.frame.fill_text(label);
    }

    fn fill_polygon(&mut self, points: &[Point], fill: Rgba) {
        self.frame.fill_polygon(points, fill);
    }
}

// A lone segment covers the whole disc; an arc back onto its own start
// point would render as nothing.
fn disc(sector: &Sector) -> Circle {
    Circle::new()
        .set("cx", num(sector.center.x))
        .set("cy", num(sector.center.y))
        .set("r", num(sector.radius))
        .set("fill", sector.fill.to_hex())
}

fn slice(sector: &Sector) -> Path {
    let c = sector.center;
    let r = sector.radius;
    let from = c.offset_rotated(r, 0.0, sector.start);
    let to = c.offset_rotated(r, 0.0, sector.end);
    let large = if is_large_arc(sector.start, sector.end) { 1.0 } else { 0.0 };

    let data = Data::new()
        .move_to((c.x as f32, c.y as f32))
        .line_to((from.x as f32, from.y as f32))
        .elliptical_arc_to(vec![
            r as f32,
            r as f32,
            0.0,
            large,
            1.0,
            to.x as f32,
            to.y as f32,
        ])
        .close();

    Path::new().set("fill", sector.fill.to_hex()).set("d", data)
}

fn text(label: &Label) -> Text {
    let at = label.anchor();
    let anchor = match label.align {
        TextAlign::Left => "start",
        TextAlign::Center => "middle",
        TextAlign::Right => "end",
    };
    Text::new(label.text.clone())
        .set("x", num(at.x))
        .set("y", num(at.y))
        .set(
            "transform",
            format!(
                "rotate({} {} {})",
                num(label.rotation.to_degrees()),
                num(at.x),
                num(at.y)
            ),
        )
        .set("text-anchor", anchor)
        .set("fill", label.fill.to_hex())
        .set("style", format!("font: {}", label.font))
}

fn polygon(points: &[Point], fill: Rgba) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut data = Data::new().move_to((first.x as f32, first.y as f32));
    for p in rest {
        data = data.line_to((p.x as f32, p.y as f32));
    }
    Some(Path::new().set("fill", fill.to_hex()).set("d", data.close()))
}

/// Fixed-precision number formatting so identical frames serialize identically.
fn num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

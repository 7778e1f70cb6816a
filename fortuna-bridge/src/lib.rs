//! Fortuna Bridge library target.
//!
//! Hosts the prize wheel from `fortuna-core`: an SVG canvas, the page
//! widget (modal + spin button) and the frame scheduler that drives it.
//! The binary entry point is in `main.rs`.

pub mod driver;
pub mod settings;
pub mod svg_canvas;
pub mod util;
pub mod widget;

pub use driver::{DriverSettings, WheelCommand, WheelDriver, WheelEvent};
pub use svg_canvas::SvgCanvas;
pub use widget::WheelWidget;

//! # Fortuna Core
//!
//! A prize wheel: N labeled segments, a randomized ease-out spin, and the
//! segment under the pointer when it stops.
//!
//! The crate is clock-free and I/O-free apart from reading a config file.
//! Hosts own a [`Wheel`], feed it timestamps and paint through [`Canvas`].

pub mod animation;
pub mod config;
pub mod draw;
pub mod easing;
pub mod error;
pub mod geometry;
pub mod recorder;
pub mod state_machine;

// Re-export the main types so users can just use `fortuna_core::Wheel`
pub use config::{Palette, Rgba, WheelConfig};
pub use draw::{render, Canvas, Label, Sector, Style, TextAlign};
pub use error::WheelError;
pub use geometry::{resolve_index, resolve_prize, Point, Prize};
pub use recorder::{DrawOp, RecordingCanvas};
pub use state_machine::{Phase, Tick, Wheel};

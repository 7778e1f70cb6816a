//! Wheel configuration.
//!
//! Loaded from a JSON document; every field is optional and falls back to
//! the stock wheel (twelve prizes, 3.5 s spin, 5 to 8 turns).

use std::fmt;
use std::ops::Range;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WheelError};
use crate::geometry::Prize;

/// Stock prize list.
pub const DEFAULT_SEGMENTS: [&str; 12] = [
    "Diamante", "Oro", "Hierro", "XP", "Llave", "Nada", "Cofre", "Espada", "Escudo", "Poción",
    "Monedas", "Sorpresa",
];

/// 8-bit RGBA color, written as `#rgb`, `#rrggbb` or `#rrggbbaa` in config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        let bad = || WheelError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(bad)?;
        if !hex.is_ascii() {
            return Err(bad());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        let nibble = |i: usize| {
            u8::from_str_radix(&hex[i..i + 1], 16)
                .map(|v| v * 17)
                .map_err(|_| bad())
        };
        match hex.len() {
            3 => Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: byte(6)?,
            }),
            _ => Err(bad()),
        }
    }

    /// CSS hex form. Alpha is only written when not opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Rgba {
    type Error = WheelError;

    fn try_from(value: String) -> Result<Self> {
        Rgba::from_hex(&value)
    }
}

impl From<Rgba> for String {
    fn from(value: Rgba) -> Self {
        value.to_hex()
    }
}

/// Fill colors used by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Sectors with an even index.
    pub even: Rgba,
    /// Sectors with an odd index.
    pub odd: Rgba,
    pub text: Rgba,
    pub pointer: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            even: Rgba::rgb(0xf1, 0xc4, 0x0f),
            odd: Rgba::rgb(0xe6, 0x7e, 0x22),
            text: Rgba::rgb(0x22, 0x22, 0x22),
            pointer: Rgba::rgb(0xe7, 0x4c, 0x3c),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    pub segments: Vec<String>,
    /// Canvas edge length; the wheel radius is half of it.
    pub size: f64,
    pub duration_ms: f64,
    pub min_turns: f64,
    pub max_turns: f64,
    pub frame_interval_ms: u64,
    pub announce_delay_ms: u64,
    /// Announcement text; `{label}` is replaced by the winning segment.
    pub announcement: String,
    pub palette: Palette,
    pub font: String,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            segments: DEFAULT_SEGMENTS.iter().map(|s| s.to_string()).collect(),
            size: 400.0,
            duration_ms: 3500.0,
            min_turns: 5.0,
            max_turns: 8.0,
            frame_interval_ms: 16,
            announce_delay_ms: 500,
            announcement: "¡Ganaste: {label}!".to_string(),
            palette: Palette::default(),
            font: "bold 20px Poppins, sans-serif".to_string(),
        }
    }
}

impl WheelConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: WheelConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_json(&raw)?;
        tracing::debug!(
            path = %path.display(),
            segments = config.segments.len(),
            "loaded wheel config"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.segments.is_empty() {
            return Err(WheelError::NoSegments);
        }
        if !(self.duration_ms.is_finite() && self.duration_ms > 0.0) {
            return Err(WheelError::InvalidDuration(self.duration_ms));
        }
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(WheelError::InvalidSize(self.size));
        }
        check_turns(&self.turn_range())
    }

    pub fn turn_range(&self) -> Range<f64> {
        self.min_turns..self.max_turns
    }

    pub fn radius(&self) -> f64 {
        self.size / 2.0
    }

    /// The user-facing message for a prize.
    pub fn announce(&self, prize: &Prize) -> String {
        format_announcement(&self.announcement, prize)
    }
}

/// Whole turns per spin must be a finite, non-negative, non-inverted range.
pub fn check_turns(turns: &Range<f64>) -> Result<()> {
    let ok = turns.start.is_finite()
        && turns.end.is_finite()
        && turns.start >= 0.0
        && turns.start <= turns.end;
    if !ok {
        return Err(WheelError::InvalidTurns {
            min: turns.start,
            max: turns.end,
        });
    }
    Ok(())
}

/// Fill `{label}` in an announcement template.
pub fn format_announcement(template: &str, prize: &Prize) -> String {
    template.replace("{label}", &prize.label)
}

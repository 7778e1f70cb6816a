use thiserror::Error;

/// Everything that can go wrong while building or configuring a wheel.
#[derive(Debug, Error)]
pub enum WheelError {
    #[error("a wheel needs at least one segment")]
    NoSegments,

    #[error("invalid color {0:?} (expected #rgb or #rrggbb)")]
    InvalidColor(String),

    #[error("spin duration must be a positive number of milliseconds, got {0}")]
    InvalidDuration(f64),

    #[error("invalid turn range {min}..{max}")]
    InvalidTurns { min: f64, max: f64 },

    #[error("canvas size must be positive, got {0}")]
    InvalidSize(f64),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WheelError>;

//! Animation curves.

/// Cubic ease-out: starts fast, decelerates into the target.
/// Input is clamped to `[0, 1]`.
pub fn ease_out_cubic(progress: f64) -> f64 {
    let t = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Linear interpolation between `from` and `to`.
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Linear progress of `elapsed` over `duration`, clamped to `[0, 1]`.
pub fn progress(elapsed: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return 1.0;
    }
    (elapsed / duration).clamp(0.0, 1.0)
}

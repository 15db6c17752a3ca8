//! Frame timing resolution
//!
//! A frame's effective duration is its own `frame_interval` if set, else the
//! animation's `frame_interval`, else the global default.

use crate::error::{Result, SpriteError};

/// Global default seconds per frame.
pub const DEFAULT_FRAME_INTERVAL: f64 = 0.5;

/// Pick the effective duration from the three layers.
pub fn effective_duration(
    frame_override: Option<f64>,
    animation_default: Option<f64>,
    global_default: f64,
) -> f64 {
    frame_override.or(animation_default).unwrap_or(global_default)
}

/// Check that a `frame_interval` is a positive, finite number of seconds.
pub fn check_interval(context: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SpriteError::InvalidFrameInterval { context: context.to_string(), value })
    }
}

/// Drop an override that matches the animation's effective default.
///
/// Keeps the model sparse, so writing it back never turns an inherited
/// duration into an explicit one.
pub fn normalize_override(frame_override: Option<f64>, animation_effective: f64) -> Option<f64> {
    frame_override.filter(|d| *d != animation_effective)
}

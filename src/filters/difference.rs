//! Difference visualization between two images.
//!
//! Useful for checking where a redaction actually changed pixels: every
//! untouched pixel maps to black, and small changes are amplified by
//! `scale` so feathered edges become visible.

use ndarray::{Array3, ArrayView3, Zip};

use crate::error::{RedactError, Result};

/// Amplification used when the caller has no preference.
pub const DEFAULT_DIFF_SCALE: f32 = 10.0;

/// Per-channel `|before - after| * scale`, saturated to 255.
///
/// # Arguments
/// * `before` - Reference image (height, width, channels)
/// * `after` - Image to compare, same shape
/// * `scale` - Finite, non-negative amplification factor
pub fn difference_u8(
    before: ArrayView3<u8>,
    after: ArrayView3<u8>,
    scale: f32,
) -> Result<Array3<u8>> {
    if !scale.is_finite() || scale < 0.0 {
        return Err(RedactError::InvalidParameter {
            name: "scale",
            value: scale,
        });
    }
    if before.dim() != after.dim() {
        return Err(RedactError::ShapeMismatch {
            left: before.dim(),
            right: after.dim(),
        });
    }

    Ok(Zip::from(&before).and(&after).par_map_collect(|&a, &b| {
        let delta = (a as f32 - b as f32).abs() * scale;
        delta.min(255.0) as u8
    }))
}

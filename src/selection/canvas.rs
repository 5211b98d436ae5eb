//! Selection canvas: the per-pixel alpha map that drives compositing.
//!
//! Values live in [0, 1]. [`KEEP`] (1.0, white) keeps the original pixel,
//! [`REDACT`] (0.0, black) takes the blurred one. Boxes are drawn as
//! filled black rectangles and the whole canvas is then blurred with the
//! same blur as the image to feather the edges.

use ndarray::{s, Array2, ArrayView2, Zip};

use super::region::RedactBox;
use crate::error::{RedactError, Result};
use crate::filters::blur::gaussian_blur_mask;

/// Canvas value for pixels that keep the original image.
pub const KEEP: f32 = 1.0;

/// Canvas value for pixels that are fully blurred.
pub const REDACT: f32 = 0.0;

/// Blurred values this close to either end are snapped onto it.
///
/// Box averages are exact only up to rounding, so a flat white
/// area would otherwise come back as 0.99999994 and stop being an exact
/// copy of the source.
pub const SNAP_EPSILON: f32 = 1e-5;

/// Default luminance threshold for turning a grayscale image into a mask.
pub const DEFAULT_MASK_THRESHOLD: u8 = 128;

/// Single-channel selection canvas matching an image's height and width.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionCanvas {
    alpha: Array2<f32>,
}

impl SelectionCanvas {
    /// Create an all-white canvas (nothing selected for redaction).
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            alpha: Array2::from_elem((height, width), KEEP),
        }
    }

    /// Wrap an existing alpha map, clamping values into [0, 1].
    pub fn from_alpha(alpha: Array2<f32>) -> Self {
        Self {
            alpha: alpha.mapv(|v| v.clamp(REDACT, KEEP)),
        }
    }

    pub fn height(&self) -> usize {
        self.alpha.nrows()
    }

    pub fn width(&self) -> usize {
        self.alpha.ncols()
    }

    /// Read-only view of the alpha values, indexed `[[y, x]]`.
    pub fn alpha(&self) -> ArrayView2<'_, f32> {
        self.alpha.view()
    }

    pub fn into_alpha(self) -> Array2<f32> {
        self.alpha
    }

    /// Fill the pixels covered by `rect` with [`REDACT`].
    ///
    /// Uses [`RedactBox::pixel_span`], so the rectangle is clipped to the
    /// canvas and a rectangle entirely off-canvas does nothing.
    pub fn fill_rect(&mut self, rect: &RedactBox) {
        if let Some((xs, ys)) = rect.pixel_span(self.width(), self.height()) {
            self.alpha.slice_mut(s![ys, xs]).fill(REDACT);
        }
    }

    /// Rasterize every box, grown by `expand_fraction * scale` on each side.
    ///
    /// Overlapping boxes simply fill the same pixels again.
    pub fn draw_boxes(&mut self, boxes: &[RedactBox], expand_fraction: f32, scale: f32) {
        let amount = expand_fraction * scale;
        for rect in boxes {
            self.fill_rect(&rect.expanded(amount));
        }
    }

    /// Force [`REDACT`] wherever `mask` is true.
    pub fn redact_where(&mut self, mask: ArrayView2<bool>) -> Result<()> {
        let (mask_height, mask_width) = mask.dim();
        if (mask_height, mask_width) != self.alpha.dim() {
            return Err(RedactError::MaskShapeMismatch {
                image_height: self.height(),
                image_width: self.width(),
                mask_height,
                mask_width,
            });
        }

        Zip::from(&mut self.alpha).and(&mask).for_each(|a, &m| {
            if m {
                *a = REDACT;
            }
        });
        Ok(())
    }

    /// Gaussian-blurred copy of this canvas.
    ///
    /// Runs the same blur the image uses, then clamps to [0, 1] and
    /// snaps values within [`SNAP_EPSILON`] of either end.
    pub fn blurred(&self, sigma: f32) -> Self {
        let alpha = gaussian_blur_mask(self.alpha.view(), sigma).mapv(|v| {
            if v >= KEEP - SNAP_EPSILON {
                KEEP
            } else if v <= REDACT + SNAP_EPSILON {
                REDACT
            } else {
                v
            }
        });
        Self { alpha }
    }

    /// Number of pixels that are fully redacted.
    pub fn redacted_count(&self) -> usize {
        self.alpha.iter().filter(|&&v| v <= REDACT).count()
    }

    /// Number of pixels that keep the original exactly.
    pub fn untouched_count(&self) -> usize {
        self.alpha.iter().filter(|&&v| v >= KEEP).count()
    }
}

/// Turn a grayscale image into a boolean redaction mask.
///
/// A pixel is selected when its value is strictly greater than `threshold`.
pub fn extra_mask_from_luma(luma: ArrayView2<u8>, threshold: u8) -> Array2<bool> {
    luma.mapv(|v| v > threshold)
}

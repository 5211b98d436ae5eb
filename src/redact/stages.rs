//! Optional mask stages around the Gaussian pass.
//!
//! Each stage hooks in before and/or after the selection canvas is
//! blurred. A disabled stage is still present in the pipeline and simply
//! does nothing, so the order of operations never depends on which
//! options are switched on.

use ndarray::ArrayView2;

use crate::error::{RedactError, Result};
use crate::selection::{RedactBox, SelectionCanvas};

/// A step that edits the selection canvas around the blur.
pub trait MaskStage {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Whether the stage will change anything.
    fn is_active(&self) -> bool;

    /// Runs on the sharp canvas, before it is blurred.
    fn before_filter(&self, _canvas: &mut SelectionCanvas) -> Result<()> {
        Ok(())
    }

    /// Runs on the blurred canvas, before compositing.
    fn after_filter(&self, _canvas: &mut SelectionCanvas) -> Result<()> {
        Ok(())
    }
}

/// Forces pixels of an auxiliary boolean mask to be fully redacted.
///
/// Applied on both sides of the blur: before, so the blur spreads the
/// redaction outward like it does for boxes; after, so the masked pixels
/// themselves are a hard 0 rather than a feathered blend.
#[derive(Debug, Clone, Copy)]
pub struct ExtraMaskOverride<'a> {
    mask: Option<ArrayView2<'a, bool>>,
}

impl<'a> ExtraMaskOverride<'a> {
    /// Build the stage, checking the mask against the image size.
    pub fn new(mask: Option<ArrayView2<'a, bool>>, height: usize, width: usize) -> Result<Self> {
        if let Some(mask) = &mask {
            let (mask_height, mask_width) = mask.dim();
            if (mask_height, mask_width) != (height, width) {
                return Err(RedactError::MaskShapeMismatch {
                    image_height: height,
                    image_width: width,
                    mask_height,
                    mask_width,
                });
            }
        }
        Ok(Self { mask })
    }

    /// A stage that never changes the canvas.
    pub fn disabled() -> Self {
        Self { mask: None }
    }

    fn apply(&self, canvas: &mut SelectionCanvas) -> Result<()> {
        match self.mask {
            Some(mask) => canvas.redact_where(mask),
            None => Ok(()),
        }
    }
}

impl MaskStage for ExtraMaskOverride<'_> {
    fn name(&self) -> &'static str {
        "extra_mask_override"
    }

    fn is_active(&self) -> bool {
        self.mask.is_some()
    }

    fn before_filter(&self, canvas: &mut SelectionCanvas) -> Result<()> {
        self.apply(canvas)
    }

    fn after_filter(&self, canvas: &mut SelectionCanvas) -> Result<()> {
        self.apply(canvas)
    }
}

/// Re-stamps the unexpanded boxes onto the blurred canvas.
#[derive(Debug, Clone, Copy)]
pub struct HardBlurEnforcer<'a> {
    boxes: &'a [RedactBox],
    scale: f32,
    enabled: bool,
}

impl<'a> HardBlurEnforcer<'a> {
    pub fn new(boxes: &'a [RedactBox], scale: f32, enabled: bool) -> Self {
        Self {
            boxes,
            scale,
            enabled,
        }
    }
}

impl MaskStage for HardBlurEnforcer<'_> {
    fn name(&self) -> &'static str {
        "hard_blur_enforcer"
    }

    fn is_active(&self) -> bool {
        self.enabled && !self.boxes.is_empty()
    }

    fn after_filter(&self, canvas: &mut SelectionCanvas) -> Result<()> {
        if self.enabled {
            canvas.draw_boxes(self.boxes, 0.0, self.scale);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{KEEP, REDACT};
    use ndarray::Array2;

    fn rb(x0: f32, y0: f32, x1: f32, y1: f32) -> RedactBox {
        RedactBox::new(x0, y0, x1, y1).unwrap()
    }

    #[test]
    fn test_disabled_extra_mask_is_noop() {
        let stage = ExtraMaskOverride::disabled();
        let mut canvas = SelectionCanvas::new(4, 4);
        stage.before_filter(&mut canvas).unwrap();
        stage.after_filter(&mut canvas).unwrap();
        assert!(!stage.is_active());
        assert_eq!(canvas, SelectionCanvas::new(4, 4));
    }

    #[test]
    fn test_extra_mask_shape_checked_up_front() {
        let mask = Array2::from_elem((5, 4), false);
        let err = ExtraMaskOverride::new(Some(mask.view()), 4, 5).unwrap_err();
        assert!(matches!(err, RedactError::MaskShapeMismatch { .. }));
    }

    #[test]
    fn test_extra_mask_resets_feathered_pixels() {
        let mut mask = Array2::from_elem((6, 6), false);
        mask[[2, 2]] = true;
        let stage = ExtraMaskOverride::new(Some(mask.view()), 6, 6).unwrap();

        // Simulate a blurred canvas that left the masked pixel half-blended
        let mut canvas = SelectionCanvas::from_alpha(Array2::from_elem((6, 6), 0.5));
        stage.after_filter(&mut canvas).unwrap();

        assert_eq!(canvas.alpha()[[2, 2]], REDACT);
        assert_eq!(canvas.alpha()[[2, 3]], 0.5);
    }

    #[test]
    fn test_hard_blur_only_after_filter() {
        let boxes = [rb(1.0, 1.0, 2.0, 2.0)];
        let stage = HardBlurEnforcer::new(&boxes, 10.0, true);
        assert!(stage.is_active());

        let mut canvas = SelectionCanvas::new(5, 5);
        stage.before_filter(&mut canvas).unwrap();
        assert_eq!(canvas.redacted_count(), 0);

        stage.after_filter(&mut canvas).unwrap();
        // Unexpanded: exactly the 2x2 box, scale does not grow it
        assert_eq!(canvas.redacted_count(), 4);
        assert_eq!(canvas.alpha()[[0, 0]], KEEP);
    }

    #[test]
    fn test_hard_blur_disabled_is_noop() {
        let boxes = [rb(1.0, 1.0, 2.0, 2.0)];
        let stage = HardBlurEnforcer::new(&boxes, 10.0, false);
        assert!(!stage.is_active());

        let mut canvas = SelectionCanvas::new(5, 5);
        stage.after_filter(&mut canvas).unwrap();
        assert_eq!(canvas.redacted_count(), 0);
    }
}

//! Redaction pipeline: boxes in, blurred-and-blended image out.
//!
//! Stage order is fixed:
//!
//! 1. scale factor from the boxes and image size
//! 2. expanded boxes drawn onto a white selection canvas
//! 3. pre-filter mask stages (extra mask)
//! 4. one Gaussian blur applied to the image and to the canvas
//! 5. post-filter mask stages (hard blur, then extra mask again)
//! 6. original composited over the blurred image with the canvas as alpha
//!
//! Every call allocates its own canvas and blurred copies; nothing is
//! shared between calls.

use ndarray::{Array2, Array3, ArrayView2, ArrayView3};

use super::params::RedactParams;
use super::stages::{ExtraMaskOverride, HardBlurEnforcer, MaskStage};
use crate::error::{RedactError, Result};
use crate::filters::blur::{gaussian_blur_f32, gaussian_blur_u8_to_f32};
use crate::filters::composite::{composite_f32, composite_u8};
use crate::selection::{scale_factor, RedactBox, SelectionCanvas};

/// Values derived while preparing a redaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RedactionReport {
    /// Largest box diagonal, floored by the image diagonal.
    pub scale_factor: f32,
    /// Gaussian sigma used for both image and mask.
    pub sigma: f32,
    /// Pixels added to each side of every box before rasterizing.
    pub expansion: f32,
    /// Number of boxes drawn.
    pub boxes: usize,
    /// Whether an extra mask took part.
    pub extra_mask: bool,
    /// Whether box interiors were forced to full redaction.
    pub hard_blur_inside_face: bool,
}

/// A validated redaction for one image size.
///
/// Construction checks parameters and the extra mask shape, so running
/// the pipeline afterwards cannot fail halfway through.
#[derive(Debug, Clone, Copy)]
pub struct RedactionPipeline<'a> {
    height: usize,
    width: usize,
    boxes: &'a [RedactBox],
    params: RedactParams,
    extra: ExtraMaskOverride<'a>,
    hard: HardBlurEnforcer<'a>,
    report: RedactionReport,
}

impl<'a> RedactionPipeline<'a> {
    /// Prepare a redaction of a `height` x `width` image.
    pub fn new(
        height: usize,
        width: usize,
        boxes: &'a [RedactBox],
        extra_mask: Option<ArrayView2<'a, bool>>,
        params: RedactParams,
    ) -> Result<Self> {
        params.validate()?;
        let extra = ExtraMaskOverride::new(extra_mask, height, width)?;

        let scale = scale_factor(boxes, width, height);
        let hard = HardBlurEnforcer::new(boxes, scale, params.hard_blur_inside_face);
        let report = RedactionReport {
            scale_factor: scale,
            sigma: params.gaussian_fraction * scale,
            expansion: params.diagonal_expand * scale,
            boxes: boxes.len(),
            extra_mask: extra.is_active(),
            hard_blur_inside_face: params.hard_blur_inside_face,
        };

        tracing::debug!(
            height,
            width,
            boxes = report.boxes,
            scale_factor = report.scale_factor,
            sigma = report.sigma,
            expansion = report.expansion,
            extra_mask = report.extra_mask,
            hard_blur = report.hard_blur_inside_face,
            "prepared redaction pipeline"
        );

        Ok(Self {
            height,
            width,
            boxes,
            params,
            extra,
            hard,
            report,
        })
    }

    pub fn report(&self) -> RedactionReport {
        self.report
    }

    /// True when there is nothing to redact and the output equals the input.
    pub fn is_noop(&self) -> bool {
        self.boxes.is_empty() && !self.extra.is_active()
    }

    fn pre_filter_stages(&self) -> [&dyn MaskStage; 1] {
        [&self.extra]
    }

    fn post_filter_stages(&self) -> [&dyn MaskStage; 2] {
        [&self.hard, &self.extra]
    }

    /// Build the final alpha map without touching any image.
    pub fn selection(&self) -> Result<SelectionCanvas> {
        let mut canvas = SelectionCanvas::new(self.height, self.width);
        canvas.draw_boxes(
            self.boxes,
            self.params.diagonal_expand,
            self.report.scale_factor,
        );

        for stage in self.pre_filter_stages() {
            if stage.is_active() {
                tracing::trace!(stage = stage.name(), "pre-filter stage");
            }
            stage.before_filter(&mut canvas)?;
        }

        let mut blurred = canvas.blurred(self.report.sigma);

        for stage in self.post_filter_stages() {
            if stage.is_active() {
                tracing::trace!(stage = stage.name(), "post-filter stage");
            }
            stage.after_filter(&mut blurred)?;
        }

        Ok(blurred)
    }

    fn check_image(&self, dim: (usize, usize, usize)) -> Result<()> {
        let (height, width, channels) = dim;
        if (height, width) != (self.height, self.width) {
            return Err(RedactError::ShapeMismatch {
                left: dim,
                right: (self.height, self.width, channels),
            });
        }
        check_channels(channels)
    }

    /// Redact a u8 image (values 0-255).
    pub fn apply_u8(&self, image: ArrayView3<u8>) -> Result<Array3<u8>> {
        self.check_image(image.dim())?;
        if self.is_noop() {
            tracing::trace!("nothing to redact, returning copy");
            return Ok(image.to_owned());
        }

        let sigma = self.report.sigma;
        let (selection, blurred) =
            rayon::join(|| self.selection(), || gaussian_blur_u8_to_f32(image, sigma));
        composite_u8(image, blurred.view(), selection?.alpha())
    }

    /// Redact an f32 image (values 0.0-1.0).
    pub fn apply_f32(&self, image: ArrayView3<f32>) -> Result<Array3<f32>> {
        self.check_image(image.dim())?;
        if self.is_noop() {
            tracing::trace!("nothing to redact, returning copy");
            return Ok(image.to_owned());
        }

        let sigma = self.report.sigma;
        let (selection, blurred) =
            rayon::join(|| self.selection(), || gaussian_blur_f32(image, sigma));
        composite_f32(image, blurred.view(), selection?.alpha())
    }
}

fn check_channels(channels: usize) -> Result<()> {
    match channels {
        1 | 3 | 4 => Ok(()),
        other => Err(RedactError::UnsupportedChannels(other)),
    }
}

/// Redact boxed regions of a u8 image.
///
/// # Arguments
/// * `image` - Image with 1, 3, or 4 channels (height, width, channels)
/// * `boxes` - Regions to redact; may be empty, may overlap or leave the image
/// * `extra_mask` - Optional (height, width) mask of pixels always fully redacted
/// * `params` - Blur and expansion fractions
///
/// # Returns
/// New image of the same shape
pub fn redact_regions_u8<'a>(
    image: ArrayView3<u8>,
    boxes: &'a [RedactBox],
    extra_mask: Option<ArrayView2<'a, bool>>,
    params: &RedactParams,
) -> Result<Array3<u8>> {
    redact_regions_u8_with_report(image, boxes, extra_mask, params).map(|(out, _)| out)
}

/// Same as [`redact_regions_u8`], also returning the derived values.
pub fn redact_regions_u8_with_report<'a>(
    image: ArrayView3<u8>,
    boxes: &'a [RedactBox],
    extra_mask: Option<ArrayView2<'a, bool>>,
    params: &RedactParams,
) -> Result<(Array3<u8>, RedactionReport)> {
    let (height, width, _) = image.dim();
    let pipeline = RedactionPipeline::new(height, width, boxes, extra_mask, *params)?;
    let output = pipeline.apply_u8(image)?;
    Ok((output, pipeline.report()))
}

/// Redact boxed regions of an f32 image (values 0.0-1.0).
pub fn redact_regions_f32<'a>(
    image: ArrayView3<f32>,
    boxes: &'a [RedactBox],
    extra_mask: Option<ArrayView2<'a, bool>>,
    params: &RedactParams,
) -> Result<Array3<f32>> {
    redact_regions_f32_with_report(image, boxes, extra_mask, params).map(|(out, _)| out)
}

/// Same as [`redact_regions_f32`], also returning the derived values.
pub fn redact_regions_f32_with_report<'a>(
    image: ArrayView3<f32>,
    boxes: &'a [RedactBox],
    extra_mask: Option<ArrayView2<'a, bool>>,
    params: &RedactParams,
) -> Result<(Array3<f32>, RedactionReport)> {
    let (height, width, _) = image.dim();
    let pipeline = RedactionPipeline::new(height, width, boxes, extra_mask, *params)?;
    let output = pipeline.apply_f32(image)?;
    Ok((output, pipeline.report()))
}

/// Final alpha map for a redaction, without compositing any image.
///
/// 1.0 keeps the original pixel, 0.0 is fully blurred.
pub fn selection_mask<'a>(
    height: usize,
    width: usize,
    boxes: &'a [RedactBox],
    extra_mask: Option<ArrayView2<'a, bool>>,
    params: &RedactParams,
) -> Result<Array2<f32>> {
    let pipeline = RedactionPipeline::new(height, width, boxes, extra_mask, *params)?;
    Ok(pipeline.selection()?.into_alpha())
}

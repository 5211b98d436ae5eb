//! WebAssembly exports for region redaction.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images
//! travel as flat interleaved buffers (length = width * height * channels).

use wasm_bindgen::prelude::*;

use crate::error::RedactError;
use crate::filters::difference::difference_u8;
use crate::redact::flat::{boxes_from_flat, image_from_flat, mask_from_flat};
use crate::redact::{redact_regions_u8, RedactParams};

fn to_js(err: RedactError) -> JsError {
    JsError::new(&err.to_string())
}

// ============================================================================
// Region Redaction - u8 (8-bit)
// ============================================================================

/// Blur boxed regions of a u8 image.
///
/// # Arguments
/// * `data` - Flat array of pixel bytes (length = width * height * channels)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `channels` - 1, 3 or 4
/// * `boxes` - Flat `[min_x, min_y, max_x, max_y, ...]`
/// * `extra_mask` - Flat (height * width) bytes, non-zero = always blur; empty for none
/// * `gaussian_fraction` - Blur sigma as a fraction of the largest box diagonal
/// * `diagonal_expand` - Box growth as a fraction of the largest box diagonal
/// * `hard_blur_inside_face` - Force box interiors to full blur
///
/// # Returns
/// Flat array of pixel bytes with the same layout
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn blur_regions_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    boxes: &[f32],
    extra_mask: &[u8],
    gaussian_fraction: f32,
    diagonal_expand: f32,
    hard_blur_inside_face: bool,
) -> Result<Vec<u8>, JsError> {
    let input = image_from_flat(data, height, width, channels).map_err(to_js)?;
    let boxes = boxes_from_flat(boxes).map_err(to_js)?;
    let mask = mask_from_flat(extra_mask, height, width).map_err(to_js)?;
    let params = RedactParams::new()
        .with_gaussian_fraction(gaussian_fraction)
        .with_diagonal_expand(diagonal_expand)
        .with_hard_blur_inside_face(hard_blur_inside_face);

    let result = redact_regions_u8(input.view(), &boxes, mask.as_ref().map(|m| m.view()), &params)
        .map_err(to_js)?;
    Ok(result.into_raw_vec_and_offset().0)
}

// ============================================================================
// Difference Visualization
// ============================================================================

/// Amplified absolute difference between two flat u8 images.
#[wasm_bindgen]
pub fn difference_image_wasm(
    before: &[u8],
    after: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    scale: f32,
) -> Result<Vec<u8>, JsError> {
    let before = image_from_flat(before, height, width, channels).map_err(to_js)?;
    let after = image_from_flat(after, height, width, channels).map_err(to_js)?;

    let result = difference_u8(before.view(), after.view(), scale).map_err(to_js)?;
    Ok(result.into_raw_vec_and_offset().0)
}

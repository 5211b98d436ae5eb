//! Gaussian blur for images and selection masks.
//!
//! Both entry points run the same separable box passes, so a mask blurred
//! here falls off at exactly the rate the image content is smoothed.

use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis};

use super::core::{box_blur_separable, box_radii_for_gaussian};

/// Apply Gaussian blur to an f32 image.
///
/// Every channel, including alpha, is blurred. Edges are clamped. The
/// Gaussian is approximated by three box passes sized from `sigma`.
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels)
/// * `sigma` - Standard deviation of the Gaussian; 0 returns a copy
///
/// # Returns
/// Blurred image with same dimensions
pub fn gaussian_blur_f32(input: ArrayView3<f32>, sigma: f32) -> Array3<f32> {
    let mut result = input.to_owned();
    for radius in box_radii_for_gaussian(sigma) {
        if radius > 0 {
            result = box_blur_separable(result.view(), radius);
        }
    }
    result
}

/// Apply Gaussian blur to a u8 image, keeping full precision in the result.
///
/// Values stay on the 0-255 scale so the compositor can round once at the
/// very end instead of quantizing the blurred copy.
pub fn gaussian_blur_u8_to_f32(input: ArrayView3<u8>, sigma: f32) -> Array3<f32> {
    let widened = input.mapv(|v| v as f32);
    gaussian_blur_f32(widened.view(), sigma)
}

/// Apply Gaussian blur to a single-channel mask.
pub fn gaussian_blur_mask(mask: ArrayView2<f32>, sigma: f32) -> Array2<f32> {
    gaussian_blur_f32(mask.insert_axis(Axis(2)), sigma).index_axis_move(Axis(2), 0)
}

//! Alpha compositing of an original image over its blurred copy.
//!
//! The alpha map follows the selection canvas convention: 1.0 keeps the
//! original pixel, 0.0 takes the blurred one, values in between blend
//! linearly. An alpha of exactly 1.0 copies the source bit-for-bit.

use ndarray::{Array3, ArrayView2, ArrayView3, Zip};

use crate::error::{RedactError, Result};

fn check_shapes<A, B>(
    original: &ArrayView3<A>,
    blurred: &ArrayView3<B>,
    alpha: &ArrayView2<f32>,
) -> Result<()> {
    let (height, width, _) = original.dim();
    if blurred.dim() != original.dim() {
        return Err(RedactError::ShapeMismatch {
            left: original.dim(),
            right: blurred.dim(),
        });
    }
    let (mask_height, mask_width) = alpha.dim();
    if (mask_height, mask_width) != (height, width) {
        return Err(RedactError::MaskShapeMismatch {
            image_height: height,
            image_width: width,
            mask_height,
            mask_width,
        });
    }
    Ok(())
}

#[inline]
fn quantize(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Blend a u8 image with its blurred copy.
///
/// # Arguments
/// * `original` - Source image (height, width, channels), 0-255
/// * `blurred` - Blurred copy on the same 0-255 scale, unquantized
/// * `alpha` - Per-pixel weight of the original (height, width), 0.0-1.0
///
/// # Returns
/// `original * alpha + blurred * (1 - alpha)`, rounded to nearest
pub fn composite_u8(
    original: ArrayView3<u8>,
    blurred: ArrayView3<f32>,
    alpha: ArrayView2<f32>,
) -> Result<Array3<u8>> {
    check_shapes(&original, &blurred, &alpha)?;

    let mut output = Array3::<u8>::zeros(original.dim());
    Zip::indexed(&mut output)
        .and(&original)
        .and(&blurred)
        .par_for_each(|(y, x, _), out, &src, &blur| {
            let a = alpha[[y, x]];
            *out = if a >= 1.0 {
                src
            } else if a <= 0.0 {
                quantize(blur)
            } else {
                quantize(src as f32 * a + blur * (1.0 - a))
            };
        });

    Ok(output)
}

/// Blend an f32 image with its blurred copy.
///
/// Same as [`composite_u8`] but without quantization (values 0.0-1.0).
pub fn composite_f32(
    original: ArrayView3<f32>,
    blurred: ArrayView3<f32>,
    alpha: ArrayView2<f32>,
) -> Result<Array3<f32>> {
    check_shapes(&original, &blurred, &alpha)?;

    let mut output = Array3::<f32>::zeros(original.dim());
    Zip::indexed(&mut output)
        .and(&original)
        .and(&blurred)
        .par_for_each(|(y, x, _), out, &src, &blur| {
            let a = alpha[[y, x]];
            *out = if a >= 1.0 {
                src
            } else if a <= 0.0 {
                blur
            } else {
                src * a + blur * (1.0 - a)
            };
        });

    Ok(output)
}

//! Region Redact
//!
//! Blurs rectangular regions of an image (typically faces) by blending a
//! Gaussian-blurred copy into the original through a soft-edged mask.
//! Blur strength and feather width follow the size of the largest region,
//! so every region in one image is redacted uniformly.
//!
//! ## Image Format
//! Images are `ndarray` arrays of shape (height, width, channels):
//! - **Grayscale**: (height, width, 1) - single channel
//! - **RGB**: (height, width, 3) - 3 color channels
//! - **RGBA**: (height, width, 4) - 3 color channels + alpha
//!
//! Both bit depths are supported:
//! - `u8`: 8-bit per channel (0-255)
//! - `f32`: Float per channel (0.0-1.0)
//!
//! ## Example
//!
//! ```
//! use ndarray::Array3;
//! use region_redact::{redact_regions_u8, RedactBox, RedactParams};
//!
//! let image = Array3::<u8>::zeros((120, 160, 3));
//! let faces = [RedactBox::new(40.0, 30.0, 90.0, 80.0)?];
//! let blurred = redact_regions_u8(image.view(), &faces, None, &RedactParams::default())?;
//! assert_eq!(blurred.dim(), image.dim());
//! # Ok::<(), region_redact::RedactError>(())
//! ```

pub mod error;
pub mod filters;
pub mod redact;
pub mod selection;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{RedactError, Result};
pub use filters::difference::{difference_u8, DEFAULT_DIFF_SCALE};
pub use redact::{
    redact_regions_f32, redact_regions_f32_with_report, redact_regions_u8,
    redact_regions_u8_with_report, selection_mask, RedactParams, RedactionPipeline,
    RedactionReport,
};
pub use selection::{
    extra_mask_from_luma, scale_factor, RedactBox, SelectionCanvas, DEFAULT_MASK_THRESHOLD,
};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{
        IntoPyArray, PyArray2, PyArray3, PyReadonlyArray2, PyReadonlyArray3,
    };
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::error::RedactError;
    use crate::filters::difference::difference_u8;
    use crate::redact::{redact_regions_f32, redact_regions_u8, selection_mask, RedactParams};
    use crate::selection::{extra_mask_from_luma as luma_to_mask, RedactBox};

    impl From<RedactError> for PyErr {
        fn from(err: RedactError) -> PyErr {
            PyValueError::new_err(err.to_string())
        }
    }

    fn to_boxes(boxes: Vec<(f32, f32, f32, f32)>) -> Result<Vec<RedactBox>, RedactError> {
        boxes.into_iter().map(RedactBox::try_from).collect()
    }

    fn to_params(
        gaussian_fraction: f32,
        diagonal_expand: f32,
        hard_blur_inside_face: bool,
    ) -> RedactParams {
        RedactParams::new()
            .with_gaussian_fraction(gaussian_fraction)
            .with_diagonal_expand(diagonal_expand)
            .with_hard_blur_inside_face(hard_blur_inside_face)
    }

    // ========================================================================
    // Region Redaction
    // ========================================================================

    /// Blur boxed regions of a u8 image.
    ///
    /// # Arguments
    /// * `image` - Image (height, width, 1|3|4) as u8
    /// * `boxes` - List of (min_x, min_y, max_x, max_y) tuples
    /// * `extra_mask` - Optional (height, width) bool array, always fully blurred
    /// * `gaussian_fraction` - Blur sigma as a fraction of the largest box diagonal
    /// * `diagonal_expand` - Box growth as a fraction of the largest box diagonal
    /// * `hard_blur_inside_face` - Force box interiors to full blur
    #[pyfunction]
    #[pyo3(signature = (image, boxes, extra_mask=None, gaussian_fraction=0.1, diagonal_expand=0.15, hard_blur_inside_face=false))]
    pub fn blur_regions<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        boxes: Vec<(f32, f32, f32, f32)>,
        extra_mask: Option<PyReadonlyArray2<'py, bool>>,
        gaussian_fraction: f32,
        diagonal_expand: f32,
        hard_blur_inside_face: bool,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let boxes = to_boxes(boxes)?;
        let params = to_params(gaussian_fraction, diagonal_expand, hard_blur_inside_face);
        let mask = extra_mask.as_ref().map(|m| m.as_array());
        let result = redact_regions_u8(image.as_array(), &boxes, mask, &params)?;
        Ok(result.into_pyarray(py))
    }

    /// Blur boxed regions of an f32 image (values 0.0-1.0).
    #[pyfunction]
    #[pyo3(signature = (image, boxes, extra_mask=None, gaussian_fraction=0.1, diagonal_expand=0.15, hard_blur_inside_face=false))]
    pub fn blur_regions_f32<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, f32>,
        boxes: Vec<(f32, f32, f32, f32)>,
        extra_mask: Option<PyReadonlyArray2<'py, bool>>,
        gaussian_fraction: f32,
        diagonal_expand: f32,
        hard_blur_inside_face: bool,
    ) -> PyResult<Bound<'py, PyArray3<f32>>> {
        let boxes = to_boxes(boxes)?;
        let params = to_params(gaussian_fraction, diagonal_expand, hard_blur_inside_face);
        let mask = extra_mask.as_ref().map(|m| m.as_array());
        let result = redact_regions_f32(image.as_array(), &boxes, mask, &params)?;
        Ok(result.into_pyarray(py))
    }

    /// Final blend mask for a redaction (1.0 = original, 0.0 = blurred).
    #[pyfunction]
    #[pyo3(signature = (height, width, boxes, extra_mask=None, gaussian_fraction=0.1, diagonal_expand=0.15, hard_blur_inside_face=false))]
    pub fn redaction_mask<'py>(
        py: Python<'py>,
        height: usize,
        width: usize,
        boxes: Vec<(f32, f32, f32, f32)>,
        extra_mask: Option<PyReadonlyArray2<'py, bool>>,
        gaussian_fraction: f32,
        diagonal_expand: f32,
        hard_blur_inside_face: bool,
    ) -> PyResult<Bound<'py, PyArray2<f32>>> {
        let boxes = to_boxes(boxes)?;
        let params = to_params(gaussian_fraction, diagonal_expand, hard_blur_inside_face);
        let mask = extra_mask.as_ref().map(|m| m.as_array());
        let result = selection_mask(height, width, &boxes, mask, &params)?;
        Ok(result.into_pyarray(py))
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Amplified absolute difference between two u8 images.
    #[pyfunction]
    #[pyo3(signature = (before, after, scale=10.0))]
    pub fn difference_image<'py>(
        py: Python<'py>,
        before: PyReadonlyArray3<'py, u8>,
        after: PyReadonlyArray3<'py, u8>,
        scale: f32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let result = difference_u8(before.as_array(), after.as_array(), scale)?;
        Ok(result.into_pyarray(py))
    }

    /// Boolean mask of pixels brighter than `threshold` in a grayscale image.
    #[pyfunction]
    #[pyo3(signature = (luma, threshold=128))]
    pub fn extra_mask_from_luma<'py>(
        py: Python<'py>,
        luma: PyReadonlyArray2<'py, u8>,
        threshold: u8,
    ) -> Bound<'py, PyArray2<bool>> {
        luma_to_mask(luma.as_array(), threshold).into_pyarray(py)
    }

    #[pymodule]
    pub fn region_redact(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(blur_regions, m)?)?;
        m.add_function(wrap_pyfunction!(blur_regions_f32, m)?)?;
        m.add_function(wrap_pyfunction!(redaction_mask, m)?)?;
        m.add_function(wrap_pyfunction!(difference_image, m)?)?;
        m.add_function(wrap_pyfunction!(extra_mask_from_luma, m)?)?;
        Ok(())
    }
}

//! Core utilities for image processing filters.
//!
//! This module provides the numeric primitives shared by the image and
//! mask paths:
//! - Box sizes approximating a Gaussian of a given sigma
//! - Separable box blur with clamp-to-edge borders
//!
//! Three successive box passes approximate a Gaussian closely. Each pass
//! reads a running prefix sum, so the cost per pixel does not depend on
//! the radius.

use ndarray::{Array3, ArrayView1, ArrayView3, ArrayViewMut1, Axis, Zip};

/// Number of box passes used to approximate one Gaussian.
pub const BOX_PASSES: usize = 3;

/// Largest box radius ever applied.
///
/// Past the image extent every extra tap re-reads an edge pixel, so
/// larger radii only move the result towards the mean of the two edges.
pub const MAX_BOX_RADIUS: usize = u32::MAX as usize;

/// Box radii whose successive passes approximate a Gaussian.
///
/// # Arguments
/// * `sigma` - Standard deviation of the Gaussian
///
/// # Returns
/// One radius per pass. A non-positive or NaN sigma yields all zeros,
/// which is the identity; an infinite one yields [`MAX_BOX_RADIUS`].
pub fn box_radii_for_gaussian(sigma: f32) -> [usize; BOX_PASSES] {
    if sigma.is_nan() || sigma <= 0.0 {
        return [0; BOX_PASSES];
    }
    if sigma.is_infinite() {
        return [MAX_BOX_RADIUS; BOX_PASSES];
    }

    let n = BOX_PASSES as f64;
    let variance = 12.0 * (sigma as f64) * (sigma as f64);

    // Ideal width for n equal boxes, rounded down to the nearest odd width
    let ideal = (variance / n + 1.0).sqrt();
    let mut lower = ideal.floor();
    if lower % 2.0 == 0.0 {
        lower -= 1.0;
    }
    let upper = lower + 2.0;

    // How many passes use the lower width so the total variance matches
    let lower_passes =
        ((variance - n * lower * lower - 4.0 * n * lower - 3.0 * n) / (-4.0 * lower - 4.0)).round();

    let mut radii = [0; BOX_PASSES];
    for (i, radius) in radii.iter_mut().enumerate() {
        let size = if (i as f64) < lower_passes { lower } else { upper };
        *radius = ((size - 1.0) / 2.0).clamp(0.0, MAX_BOX_RADIUS as f64) as usize;
    }
    radii
}

/// Number of pixels a blur of the given sigma reaches on each side.
///
/// Pixels farther than this from every change in the input come out
/// unchanged.
pub fn blur_reach(sigma: f32) -> usize {
    box_radii_for_gaussian(sigma)
        .iter()
        .fold(0usize, |acc, &r| acc.saturating_add(r))
}

/// Average every line of `src` over a window of `2 * radius + 1` samples.
///
/// Samples outside the line are taken from the nearest end.
fn box_line(src: ArrayView1<f32>, mut dst: ArrayViewMut1<f32>, radius: usize) {
    let len = src.len();
    if len == 0 {
        return;
    }

    let mut prefix = Vec::with_capacity(len + 1);
    let mut acc = 0.0f64;
    prefix.push(acc);
    for &v in src.iter() {
        acc += v as f64;
        prefix.push(acc);
    }

    let first = src[0] as f64;
    let last = src[len - 1] as f64;
    let r = radius as i64;
    let end = len as i64 - 1;
    let norm = 1.0 / (2.0 * radius as f64 + 1.0);

    for (i, out) in dst.iter_mut().enumerate() {
        let lo = i as i64 - r;
        let hi = i as i64 + r;
        let inner = prefix[(hi.min(end) + 1) as usize] - prefix[lo.max(0) as usize];
        let before = (-lo).max(0) as f64;
        let after = (hi - end).max(0) as f64;
        *out = ((inner + before * first + after * last) * norm) as f32;
    }
}

/// One box pass along `axis`, every line in parallel.
fn box_blur_axis(input: ArrayView3<f32>, axis: Axis, radius: usize) -> Array3<f32> {
    let mut output = Array3::<f32>::zeros(input.raw_dim());
    Zip::from(output.lanes_mut(axis))
        .and(input.lanes(axis))
        .par_for_each(|dst, src| box_line(src, dst, radius));
    output
}

/// Box blur every channel of an image along x, then along y.
///
/// Samples outside the image are taken from the nearest edge pixel. Lines
/// are processed in parallel on the rayon pool; both passes are pure so
/// the result does not depend on scheduling.
///
/// # Arguments
/// * `input` - Image with any channel count (height, width, channels)
/// * `radius` - Half window size; 0 returns a copy
///
/// # Returns
/// Blurred image with the same shape
pub fn box_blur_separable(input: ArrayView3<f32>, radius: usize) -> Array3<f32> {
    let (height, width, channels) = input.dim();
    if radius == 0 || height == 0 || width == 0 || channels == 0 {
        return input.to_owned();
    }

    let radius = radius.min(MAX_BOX_RADIUS);
    let horizontal = box_blur_axis(input, Axis(1), radius);
    box_blur_axis(horizontal.view(), Axis(0), radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box_variance(radius: usize) -> f64 {
        let w = (2 * radius + 1) as f64;
        (w * w - 1.0) / 12.0
    }

    #[test]
    fn test_radii_match_gaussian_variance() {
        for sigma in [2.0f32, 5.0, 10.0, 14.14, 78.1] {
            let radii = box_radii_for_gaussian(sigma);
            let variance: f64 = radii.iter().map(|&r| box_variance(r)).sum();
            let target = (sigma * sigma) as f64;
            assert!(
                (variance - target).abs() < 0.2 * target,
                "sigma={} radii={:?} variance={}",
                sigma,
                radii,
                variance
            );
        }
    }

    #[test]
    fn test_radii_for_ten() {
        // Widths 19, 19, 21
        assert_eq!(box_radii_for_gaussian(10.0), [9, 9, 10]);
        assert_eq!(blur_reach(10.0), 28);
    }

    #[test]
    fn test_zero_sigma_is_identity() {
        assert_eq!(box_radii_for_gaussian(0.0), [0, 0, 0]);
        assert_eq!(box_radii_for_gaussian(-1.0), [0, 0, 0]);
        assert_eq!(box_radii_for_gaussian(f32::NAN), [0, 0, 0]);
        assert_eq!(blur_reach(0.0), 0);
    }

    #[test]
    fn test_huge_sigma_is_bounded() {
        let radii = box_radii_for_gaussian(1e12);
        assert!(radii.iter().all(|&r| r > 0 && r <= MAX_BOX_RADIUS));
        assert_eq!(box_radii_for_gaussian(f32::INFINITY), [MAX_BOX_RADIUS; BOX_PASSES]);
        assert!(blur_reach(f32::MAX) >= MAX_BOX_RADIUS);
    }

    #[test]
    fn test_zero_radius_keeps_values() {
        let mut img = Array3::<f32>::zeros((4, 5, 3));
        img[[1, 2, 0]] = 7.0;
        img[[3, 4, 2]] = 0.25;

        let result = box_blur_separable(img.view(), 0);
        assert_eq!(result, img);
    }

    #[test]
    fn test_constant_image_stays_constant() {
        let img = Array3::<f32>::from_elem((9, 7, 1), 42.0);
        let result = box_blur_separable(img.view(), 3);
        for &v in result.iter() {
            assert!((v - 42.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_ones_stay_exactly_one() {
        let img = Array3::<f32>::ones((6, 40, 1));
        let result = box_blur_separable(img.view(), 5);
        assert!(result.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_impulse_spreads_symmetrically() {
        let mut img = Array3::<f32>::zeros((11, 11, 1));
        img[[5, 5, 0]] = 1.0;

        let result = box_blur_separable(img.view(), 1);

        // 3x3 window, 1/9 each
        assert!((result[[5, 5, 0]] - 1.0 / 9.0).abs() < 1e-6);
        assert!((result[[4, 6, 0]] - 1.0 / 9.0).abs() < 1e-6);
        assert_eq!(result[[5, 7, 0]], 0.0);
        assert_eq!(result[[3, 5, 0]], 0.0);
        let total: f32 = result.iter().sum();
        assert!((total - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_edges_are_clamped() {
        let mut img = Array3::<f32>::zeros((1, 5, 1));
        img[[0, 0, 0]] = 3.0;

        let result = box_blur_separable(img.view(), 1);
        // Window at x=0 reads [3, 3, 0]
        assert!((result[[0, 0, 0]] - 2.0).abs() < 1e-6);
        assert!((result[[0, 1, 0]] - 1.0).abs() < 1e-6);
        assert_eq!(result[[0, 2, 0]], 0.0);
    }

    #[test]
    fn test_radius_beyond_image_tends_to_edge_mean() {
        let mut img = Array3::<f32>::zeros((1, 4, 1));
        img[[0, 3, 0]] = 1.0;

        let result = box_blur_separable(img.view(), MAX_BOX_RADIUS);
        for &v in result.iter() {
            assert!((v - 0.5).abs() < 1e-3, "value {}", v);
        }
    }

    #[test]
    fn test_channels_are_independent() {
        let mut img = Array3::<f32>::zeros((5, 5, 2));
        img[[2, 2, 0]] = 1.0;

        let result = box_blur_separable(img.view(), 1);
        for &v in result.index_axis(Axis(2), 1).iter() {
            assert_eq!(v, 0.0);
        }
    }

    #[test]
    fn test_empty_image() {
        let img = Array3::<f32>::zeros((0, 3, 3));
        let result = box_blur_separable(img.view(), 2);
        assert_eq!(result.dim(), (0, 3, 3));
    }
}

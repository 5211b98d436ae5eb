//! Redaction boxes and the scale factor derived from them.

use std::ops::RangeInclusive;

use crate::error::{RedactError, Result};

/// Minimum scale factor as a fraction of the image diagonal.
pub const MIN_DIAGONAL_FRACTION: f32 = 0.025;

/// Axis-aligned box in image pixel coordinates.
///
/// Always satisfies `min_x <= max_x` and `min_y <= max_y` with finite
/// coordinates; construction through [`RedactBox::new`] rejects anything
/// else.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "[f32; 4]", into = "[f32; 4]")
)]
pub struct RedactBox {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl RedactBox {
    /// Create a box, rejecting inverted or non-finite coordinates.
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Result<Self> {
        if ![min_x, min_y, max_x, max_y].iter().all(|v| v.is_finite()) {
            return Err(RedactError::NonFiniteBox);
        }
        if min_x > max_x || min_y > max_y {
            return Err(RedactError::InvertedBox {
                min_x,
                min_y,
                max_x,
                max_y,
            });
        }
        Ok(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Create a box from any two opposite corners.
    ///
    /// Unlike [`RedactBox::new`] this sorts the coordinates instead of
    /// rejecting an inverted box.
    pub fn from_corners(x0: f32, y0: f32, x1: f32, y1: f32) -> Result<Self> {
        Self::new(x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1))
    }

    pub fn min_x(&self) -> f32 {
        self.min_x
    }

    pub fn min_y(&self) -> f32 {
        self.min_y
    }

    pub fn max_x(&self) -> f32 {
        self.max_x
    }

    pub fn max_y(&self) -> f32 {
        self.max_y
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Length of the box diagonal.
    pub fn diagonal(&self) -> f32 {
        self.height().hypot(self.width())
    }

    /// Grow every edge outward by `amount` pixels.
    ///
    /// A negative amount shrinks the box, stopping at its center.
    pub fn expanded(&self, amount: f32) -> Self {
        let cx = (self.min_x + self.max_x) * 0.5;
        let cy = (self.min_y + self.max_y) * 0.5;
        Self {
            min_x: (self.min_x - amount).min(cx),
            min_y: (self.min_y - amount).min(cy),
            max_x: (self.max_x + amount).max(cx),
            max_y: (self.max_y + amount).max(cy),
        }
    }

    /// Pixel columns and rows covered by this box on a `width` x `height` grid.
    ///
    /// Edges round outward (floor of the minimum, ceil of the maximum) and
    /// both ends are inclusive, then the span is clipped to the grid.
    /// Returns `None` when nothing of the box lands on the grid.
    pub fn pixel_span(
        &self,
        width: usize,
        height: usize,
    ) -> Option<(RangeInclusive<usize>, RangeInclusive<usize>)> {
        if width == 0 || height == 0 {
            return None;
        }
        let last_x = (width - 1) as f32;
        let last_y = (height - 1) as f32;

        let x0 = self.min_x.floor();
        let y0 = self.min_y.floor();
        let x1 = self.max_x.ceil();
        let y1 = self.max_y.ceil();
        if x1 < 0.0 || y1 < 0.0 || x0 > last_x || y0 > last_y {
            return None;
        }

        let xs = x0.max(0.0) as usize..=x1.min(last_x) as usize;
        let ys = y0.max(0.0) as usize..=y1.min(last_y) as usize;
        Some((xs, ys))
    }
}

impl TryFrom<[f32; 4]> for RedactBox {
    type Error = RedactError;

    fn try_from(v: [f32; 4]) -> Result<Self> {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl TryFrom<(f32, f32, f32, f32)> for RedactBox {
    type Error = RedactError;

    fn try_from((min_x, min_y, max_x, max_y): (f32, f32, f32, f32)) -> Result<Self> {
        Self::new(min_x, min_y, max_x, max_y)
    }
}

impl From<RedactBox> for [f32; 4] {
    fn from(b: RedactBox) -> Self {
        [b.min_x, b.min_y, b.max_x, b.max_y]
    }
}

/// Scale factor ("max diagonal") shared by every box in one image.
///
/// The largest box diagonal, floored at [`MIN_DIAGONAL_FRACTION`] of the
/// image diagonal. One value for the whole image keeps blur strength and
/// feather width uniform across boxes of different sizes.
pub fn scale_factor(boxes: &[RedactBox], width: usize, height: usize) -> f32 {
    let floor = MIN_DIAGONAL_FRACTION * (height as f32).hypot(width as f32);
    boxes.iter().map(RedactBox::diagonal).fold(floor, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rb(x0: f32, y0: f32, x1: f32, y1: f32) -> RedactBox {
        RedactBox::new(x0, y0, x1, y1).unwrap()
    }

    #[test]
    fn test_inverted_box_rejected() {
        assert!(matches!(
            RedactBox::new(10.0, 0.0, 5.0, 5.0),
            Err(RedactError::InvertedBox { .. })
        ));
        assert!(matches!(
            RedactBox::new(0.0, 10.0, 5.0, 5.0),
            Err(RedactError::InvertedBox { .. })
        ));
    }

    #[test]
    fn test_non_finite_box_rejected() {
        assert_eq!(
            RedactBox::new(f32::NAN, 0.0, 1.0, 1.0),
            Err(RedactError::NonFiniteBox)
        );
        assert_eq!(
            RedactBox::new(0.0, 0.0, f32::INFINITY, 1.0),
            Err(RedactError::NonFiniteBox)
        );
    }

    #[test]
    fn test_from_corners_normalizes() {
        let b = RedactBox::from_corners(10.0, 8.0, 2.0, 4.0).unwrap();
        assert_eq!(b, rb(2.0, 4.0, 10.0, 8.0));
    }

    #[test]
    fn test_degenerate_box_is_valid() {
        let b = rb(5.0, 5.0, 5.0, 5.0);
        assert_eq!(b.diagonal(), 0.0);
        assert_eq!(b.pixel_span(10, 10), Some((5..=5, 5..=5)));
    }

    #[test]
    fn test_diagonal() {
        assert!((rb(100.0, 100.0, 200.0, 200.0).diagonal() - 141.421_36).abs() < 1e-3);
        assert!((rb(0.0, 0.0, 3.0, 4.0).diagonal() - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_expanded_grows_every_edge() {
        let b = rb(10.0, 20.0, 30.0, 40.0).expanded(5.0);
        assert_eq!(b, rb(5.0, 15.0, 35.0, 45.0));
    }

    #[test]
    fn test_negative_expansion_stops_at_center() {
        let b = rb(10.0, 10.0, 20.0, 30.0).expanded(-50.0);
        assert_eq!(b, rb(15.0, 20.0, 15.0, 20.0));
    }

    #[test]
    fn test_pixel_span_rounds_outward() {
        let b = rb(1.5, 2.2, 3.1, 4.0);
        assert_eq!(b.pixel_span(10, 10), Some((1..=4, 2..=4)));
    }

    #[test]
    fn test_pixel_span_clips_to_grid() {
        let b = rb(-20.0, -3.5, 50.0, 7.2);
        assert_eq!(b.pixel_span(10, 8), Some((0..=9, 0..=7)));
    }

    #[test]
    fn test_pixel_span_outside_grid() {
        assert_eq!(rb(-10.0, 0.0, -1.5, 5.0).pixel_span(10, 10), None);
        assert_eq!(rb(10.0, 0.0, 12.0, 5.0).pixel_span(10, 10), None);
        assert_eq!(rb(0.0, 10.0, 5.0, 12.0).pixel_span(10, 10), None);
        assert_eq!(rb(0.0, 0.0, 5.0, 5.0).pixel_span(0, 10), None);
    }

    #[test]
    fn test_scale_factor_floor_without_boxes() {
        // 0.025 * hypot(1000, 800) = 0.025 * 1280.62 = 32.0156
        let scale = scale_factor(&[], 1000, 800);
        assert!((scale - 32.0156).abs() < 1e-2);
    }

    #[test]
    fn test_scale_factor_uses_largest_box() {
        let boxes = [rb(100.0, 100.0, 200.0, 200.0), rb(500.0, 500.0, 510.0, 510.0)];
        let scale = scale_factor(&boxes, 1000, 800);
        assert!((scale - 141.421_36).abs() < 1e-3);
    }

    #[test]
    fn test_scale_factor_small_boxes_hit_floor() {
        let boxes = [rb(0.0, 0.0, 2.0, 2.0), rb(5.0, 5.0, 6.0, 9.0)];
        assert_eq!(scale_factor(&boxes, 1000, 800), scale_factor(&[], 1000, 800));
    }

    #[test]
    fn test_scale_factor_order_and_duplicates_irrelevant() {
        let a = rb(0.0, 0.0, 40.0, 30.0);
        let b = rb(10.0, 10.0, 90.0, 70.0);
        let c = rb(300.0, 200.0, 320.0, 260.0);

        let base = scale_factor(&[a, b, c], 400, 300);
        assert_eq!(scale_factor(&[c, b, a], 400, 300), base);
        assert_eq!(scale_factor(&[b, a, c, b, b, a], 400, 300), base);
        assert!((base - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_tuple_and_array_conversions() {
        let b = RedactBox::try_from((1.0, 2.0, 3.0, 4.0)).unwrap();
        let arr: [f32; 4] = b.into();
        assert_eq!(arr, [1.0, 2.0, 3.0, 4.0]);
        assert!(RedactBox::try_from([3.0, 0.0, 1.0, 1.0]).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_goes_through_validation() {
        let b: RedactBox = serde_json::from_str("[1.0, 2.0, 3.0, 4.0]").unwrap();
        assert_eq!(b, rb(1.0, 2.0, 3.0, 4.0));
        assert!(serde_json::from_str::<RedactBox>("[3.0, 2.0, 1.0, 4.0]").is_err());
        assert_eq!(serde_json::to_string(&b).unwrap(), "[1.0,2.0,3.0,4.0]");
    }
}

//! Redaction parameters.

use crate::error::{RedactError, Result};

/// Tuning knobs for one redaction call.
///
/// Both fractions are relative to the scale factor (the largest box
/// diagonal, floored by the image size), so one set of parameters works
/// for small and large faces alike.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RedactParams {
    /// Gaussian sigma as a fraction of the scale factor.
    /// Default: 0.1
    #[cfg_attr(
        feature = "serde",
        serde(default = "RedactParams::default_gaussian_fraction")
    )]
    pub gaussian_fraction: f32,

    /// Outward growth of each box edge as a fraction of the scale factor.
    /// Default: 0.15
    #[cfg_attr(
        feature = "serde",
        serde(default = "RedactParams::default_diagonal_expand")
    )]
    pub diagonal_expand: f32,

    /// Stamp the unexpanded boxes back to fully blurred after feathering.
    ///
    /// Guarantees box interiors are never left partially sharp at the cost
    /// of a visible edge at the box boundary. Only needed when box sizes
    /// vary enormously within one image.
    /// Default: false
    #[cfg_attr(feature = "serde", serde(default))]
    pub hard_blur_inside_face: bool,
}

impl RedactParams {
    /// Create parameters with default values.
    pub fn new() -> Self {
        Self::default()
    }

    fn default_gaussian_fraction() -> f32 {
        0.1
    }

    fn default_diagonal_expand() -> f32 {
        0.15
    }

    /// Set the Gaussian sigma fraction.
    pub fn with_gaussian_fraction(mut self, fraction: f32) -> Self {
        self.gaussian_fraction = fraction;
        self
    }

    /// Set the box expansion fraction.
    pub fn with_diagonal_expand(mut self, fraction: f32) -> Self {
        self.diagonal_expand = fraction;
        self
    }

    /// Enable or disable hard blurring inside the original boxes.
    pub fn with_hard_blur_inside_face(mut self, enabled: bool) -> Self {
        self.hard_blur_inside_face = enabled;
        self
    }

    /// Check that both fractions are finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        check_non_negative("gaussian_fraction", self.gaussian_fraction)?;
        check_non_negative("diagonal_expand", self.diagonal_expand)?;
        Ok(())
    }
}

impl Default for RedactParams {
    fn default() -> Self {
        Self {
            gaussian_fraction: Self::default_gaussian_fraction(),
            diagonal_expand: Self::default_diagonal_expand(),
            hard_blur_inside_face: false,
        }
    }
}

fn check_non_negative(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RedactError::InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = RedactParams::default();
        assert_eq!(params.gaussian_fraction, 0.1);
        assert_eq!(params.diagonal_expand, 0.15);
        assert!(!params.hard_blur_inside_face);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let params = RedactParams::new()
            .with_gaussian_fraction(0.2)
            .with_diagonal_expand(0.0)
            .with_hard_blur_inside_face(true);
        assert_eq!(params.gaussian_fraction, 0.2);
        assert_eq!(params.diagonal_expand, 0.0);
        assert!(params.hard_blur_inside_face);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_negative_values_rejected() {
        let err = RedactParams::new()
            .with_gaussian_fraction(-0.1)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            RedactError::InvalidParameter {
                name: "gaussian_fraction",
                ..
            }
        ));

        let err = RedactParams::new()
            .with_diagonal_expand(-1.0)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            RedactError::InvalidParameter {
                name: "diagonal_expand",
                ..
            }
        ));
    }

    #[test]
    fn test_non_finite_values_rejected() {
        assert!(RedactParams::new()
            .with_gaussian_fraction(f32::NAN)
            .validate()
            .is_err());
        assert!(RedactParams::new()
            .with_diagonal_expand(f32::INFINITY)
            .validate()
            .is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_fills_missing_fields_with_defaults() {
        let params: RedactParams =
            serde_json::from_str(r#"{"hard_blur_inside_face": true}"#).unwrap();
        assert_eq!(params.gaussian_fraction, 0.1);
        assert_eq!(params.diagonal_expand, 0.15);
        assert!(params.hard_blur_inside_face);
    }
}

//! Error types for region redaction.
//!
//! Every failure is detected before any output buffer is produced, so a
//! returned error never leaves a partially redacted image behind.

use thiserror::Error;

/// Errors that can occur while validating or running a redaction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RedactError {
    /// The extra mask does not have the same height/width as the image.
    #[error(
        "extra mask is {mask_height}x{mask_width} but image is {image_height}x{image_width}"
    )]
    MaskShapeMismatch {
        /// Height of the image.
        image_height: usize,
        /// Width of the image.
        image_width: usize,
        /// Height of the mask.
        mask_height: usize,
        /// Width of the mask.
        mask_width: usize,
    },

    /// Two images that must share a shape do not.
    #[error("image shapes differ: {left:?} vs {right:?}")]
    ShapeMismatch {
        /// Shape of the first image as (height, width, channels).
        left: (usize, usize, usize),
        /// Shape of the second image as (height, width, channels).
        right: (usize, usize, usize),
    },

    /// A box has its minimum corner past its maximum corner.
    #[error("box ({min_x}, {min_y}, {max_x}, {max_y}) has min greater than max")]
    InvertedBox {
        /// Left edge.
        min_x: f32,
        /// Top edge.
        min_y: f32,
        /// Right edge.
        max_x: f32,
        /// Bottom edge.
        max_y: f32,
    },

    /// A box coordinate is NaN or infinite.
    #[error("box coordinates must be finite")]
    NonFiniteBox,

    /// A numeric parameter is negative or not finite.
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f32,
    },

    /// A flat pixel buffer does not match its declared dimensions.
    #[error("buffer of {len} elements does not match {height}x{width}x{channels}")]
    BufferShape {
        /// Actual buffer length.
        len: usize,
        /// Declared height.
        height: usize,
        /// Declared width.
        width: usize,
        /// Declared channel count.
        channels: usize,
    },

    /// A flat box list is not a whole number of `[min_x, min_y, max_x, max_y]` groups.
    #[error("flat box list of {0} values is not a multiple of 4")]
    MalformedBoxes(usize),

    /// The image has a channel count other than 1, 3 or 4.
    #[error("unsupported channel count {0}, expected 1, 3 or 4")]
    UnsupportedChannels(usize),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RedactError>;

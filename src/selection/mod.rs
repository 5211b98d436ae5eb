//! Selection primitives for region redaction.
//!
//! - **Regions**: validated boxes and the shared scale factor
//! - **Canvas**: the alpha map boxes and masks are rasterized onto

pub mod canvas;
pub mod region;

pub use canvas::{extra_mask_from_luma, SelectionCanvas, DEFAULT_MASK_THRESHOLD, KEEP, REDACT};
pub use region::{scale_factor, RedactBox, MIN_DIAGONAL_FRACTION};

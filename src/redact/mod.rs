//! Region redaction: blur boxed regions with a feathered, size-adaptive mask.
//!
//! ## Pipeline
//!
//! 1. **Scale factor** - largest box diagonal, floored by the image size
//! 2. **Rasterize** - expanded boxes drawn black on a white canvas
//! 3. **Extra mask** - auxiliary mask forced black (pre-filter)
//! 4. **Gaussian** - the same box passes blur the image and the canvas
//! 5. **Hard blur** - optional: unexpanded boxes stamped black again
//! 6. **Extra mask** - forced black again, removing its feather inward
//! 7. **Composite** - `original * alpha + blurred * (1 - alpha)`

pub mod flat;
pub mod params;
pub mod pipeline;
pub mod stages;

pub use params::RedactParams;
pub use pipeline::{
    redact_regions_f32, redact_regions_f32_with_report, redact_regions_u8,
    redact_regions_u8_with_report, selection_mask, RedactionPipeline, RedactionReport,
};
pub use stages::{ExtraMaskOverride, HardBlurEnforcer, MaskStage};

//! Filter modules for image processing.
//!
//! ## Supported Formats
//!
//! All filters accept images with 1, 3, or 4 channels:
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | Grayscale8 | (H, W, 1) | u8 | Single luminance channel, 0-255 |
//! | Grayscale float | (H, W, 1) | f32 | Single luminance channel, 0.0-1.0 |
//! | RGB8 | (H, W, 3) | u8 | Red, green, blue, 0-255 |
//! | RGB float | (H, W, 3) | f32 | Red, green, blue, 0.0-1.0 |
//! | RGBA8 | (H, W, 4) | u8 | RGB + alpha, 0-255 |
//! | RGBA float | (H, W, 4) | f32 | RGB + alpha, 0.0-1.0 |
//!
//! ## Architecture
//!
//! - **Shared blur** - Image and mask go through the same separable box passes
//! - **Dual precision** - Both u8 (0-255) and f32 (0.0-1.0) variants
//! - **Thread-safe** - Lines and pixels are processed in parallel with rayon

pub mod blur;
pub mod composite;
pub mod core;
pub mod difference;

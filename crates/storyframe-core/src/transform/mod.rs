//! Geometry operations: aspect-ratio cropping and resampling.
//!
//! # Transform Order
//!
//! The pipeline applies these after decoding (which already handled
//! orientation and alpha):
//! 1. Compute the crop rectangle for the target ratio
//! 2. Crop
//! 3. Resample to the exact output size
//!
//! # Coordinate System
//!
//! - Crop rectangles are in pixels, origin at the top-left corner
//! - Ratios are width / height

mod crop;
mod resize;

pub use crop::{apply_crop_rect, compute_crop_rect, CropMode, CropRect, TransformError};
pub use resize::resize;

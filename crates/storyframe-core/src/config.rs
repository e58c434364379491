//! Output settings for the pipeline.
//!
//! The defaults are the fixed story format: 1080x1920 (9:16), JPEG quality
//! 92, Lanczos3 resampling and a white background behind transparency.

use serde::{Deserialize, Serialize};

use crate::decode::FilterType;

/// Output width in pixels.
pub const TARGET_WIDTH: u32 = 1080;
/// Output height in pixels.
pub const TARGET_HEIGHT: u32 = 1920;
/// Output aspect ratio (width / height).
pub const TARGET_RATIO: f64 = 9.0 / 16.0;
/// JPEG quality for encoded output.
pub const JPEG_QUALITY: u8 = 92;

/// Pipeline output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Output width in pixels.
    pub target_width: u32,
    /// Output height in pixels.
    pub target_height: u32,
    /// JPEG quality (1-100).
    pub jpeg_quality: u8,
    /// Resampling filter.
    pub filter: FilterType,
    /// RGB color that transparent pixels are composited onto.
    pub background: [u8; 3],
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            target_width: TARGET_WIDTH,
            target_height: TARGET_HEIGHT,
            jpeg_quality: JPEG_QUALITY,
            filter: FilterType::Lanczos3,
            background: [255, 255, 255],
        }
    }
}

impl FrameConfig {
    /// Create the default story-format configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aspect ratio of the output (width / height).
    pub fn target_ratio(&self) -> f64 {
        self.target_width as f64 / self.target_height as f64
    }

    /// Check that the settings describe a producible output.
    pub fn validate(&self) -> Result<(), String> {
        if self.target_width == 0 || self.target_height == 0 {
            return Err(format!(
                "target size {}x{} must be non-zero",
                self.target_width, self.target_height
            ));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(format!(
                "JPEG quality {} outside 1-100",
                self.jpeg_quality
            ));
        }
        Ok(())
    }
}

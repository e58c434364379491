//! Aspect-ratio crop computation and pixel cropping.
//!
//! The crop keeps as much of the source as possible while matching the
//! target ratio exactly (up to integer truncation):
//!
//! - Sources wider than the target keep their full height and are trimmed
//!   equally on the left and right.
//! - Sources taller than (or equal to) the target keep their full width and
//!   are trimmed at the top and/or bottom according to [`CropMode`].
//!
//! # Example
//!
//! ```ignore
//! // 4000x3000 landscape to 9:16
//! let rect = compute_crop_rect(4000, 3000, 9.0 / 16.0, CropMode::Center)?;
//! assert_eq!(rect, CropRect { x: 1156, y: 0, width: 1687, height: 3000 });
//! ```

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::DecodedImage;

/// Errors from crop and resize operations.
#[derive(Debug, Error, PartialEq)]
pub enum TransformError {
    /// The source has a zero dimension, so no crop can be computed.
    #[error("Cannot crop an empty {width}x{height} image")]
    EmptySource { width: u32, height: u32 },

    /// The target ratio is zero, negative or not finite.
    #[error("Invalid target aspect ratio: {0}")]
    InvalidRatio(f64),

    /// The crop rectangle does not fit inside the source.
    #[error("Crop {rect} exceeds {width}x{height} source")]
    OutOfBounds {
        rect: CropRect,
        width: u32,
        height: u32,
    },

    /// Resize target has a zero dimension.
    #[error("Invalid resize target: {width}x{height}")]
    InvalidTarget { width: u32, height: u32 },

    /// Pixel buffer length does not match the image dimensions.
    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    PixelBufferMismatch { expected: usize, actual: usize },
}

/// Vertical anchor used when a tall source must lose rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum CropMode {
    /// Keep the middle rows.
    #[default]
    Center,
    /// Keep the top rows.
    Top,
    /// Keep the bottom rows.
    Bottom,
}

impl CropMode {
    /// Parse a mode name. Anything other than `"top"` or `"bottom"` is
    /// treated as `Center`.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "top" => CropMode::Top,
            "bottom" => CropMode::Bottom,
            _ => CropMode::Center,
        }
    }

    /// Lowercase name used in metadata and requests.
    pub fn as_str(self) -> &'static str {
        match self {
            CropMode::Center => "center",
            CropMode::Top => "top",
            CropMode::Bottom => "bottom",
        }
    }
}

impl fmt::Display for CropMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CropMode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CropMode::from_name(s))
    }
}

impl From<&str> for CropMode {
    fn from(value: &str) -> Self {
        CropMode::from_name(value)
    }
}

impl From<String> for CropMode {
    fn from(value: String) -> Self {
        CropMode::from_name(&value)
    }
}

/// A pixel-space crop region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    /// True if the rectangle is non-empty and lies inside a
    /// `width` x `height` source.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.width > 0
            && self.height > 0
            && self.x as u64 + self.width as u64 <= width as u64
            && self.y as u64 + self.height as u64 <= height as u64
    }
}

impl fmt::Display for CropRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Compute the largest region of a `width` x `height` source matching
/// `target_ratio` (width / height).
///
/// Crop dimensions are truncated toward zero and never drop below one
/// pixel, so any non-empty source yields a usable rectangle.
///
/// # Errors
///
/// Returns `TransformError::EmptySource` if either dimension is zero and
/// `TransformError::InvalidRatio` for a non-positive or non-finite ratio.
pub fn compute_crop_rect(
    width: u32,
    height: u32,
    target_ratio: f64,
    mode: CropMode,
) -> Result<CropRect, TransformError> {
    if width == 0 || height == 0 {
        return Err(TransformError::EmptySource { width, height });
    }
    if !target_ratio.is_finite() || target_ratio <= 0.0 {
        return Err(TransformError::InvalidRatio(target_ratio));
    }

    let source_ratio = width as f64 / height as f64;

    if source_ratio > target_ratio {
        // Wider than the target: trim the sides
        let crop_width = ((height as f64 * target_ratio) as u32).clamp(1, width);
        Ok(CropRect {
            x: (width - crop_width) / 2,
            y: 0,
            width: crop_width,
            height,
        })
    } else {
        // Taller than (or equal to) the target: trim top and/or bottom
        let crop_height = ((width as f64 / target_ratio) as u32).clamp(1, height);
        let y = match mode {
            CropMode::Top => 0,
            CropMode::Bottom => height - crop_height,
            CropMode::Center => (height - crop_height) / 2,
        };
        Ok(CropRect {
            x: 0,
            y,
            width,
            height: crop_height,
        })
    }
}

/// Copy the pixels inside `rect` into a new image.
///
/// A rectangle covering the whole source returns a clone.
pub fn apply_crop_rect(
    image: &DecodedImage,
    rect: &CropRect,
) -> Result<DecodedImage, TransformError> {
    if !rect.fits_within(image.width, image.height) {
        return Err(TransformError::OutOfBounds {
            rect: *rect,
            width: image.width,
            height: image.height,
        });
    }

    let src_stride = image.width as usize * 3;
    let expected = src_stride * image.height as usize;
    if image.pixels.len() != expected {
        return Err(TransformError::PixelBufferMismatch {
            expected,
            actual: image.pixels.len(),
        });
    }

    // Fast path: full crop returns a clone
    if rect.width == image.width && rect.height == image.height {
        return Ok(image.clone());
    }

    let dst_stride = rect.width as usize * 3;
    let mut output = Vec::with_capacity(dst_stride * rect.height as usize);

    // Copy pixel data row by row
    for row in image
        .pixels
        .chunks_exact(src_stride)
        .skip(rect.y as usize)
        .take(rect.height as usize)
    {
        let start = rect.x as usize * 3;
        output.extend_from_slice(&row[start..start + dst_stride]);
    }

    Ok(DecodedImage::new(rect.width, rect.height, output))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const RATIO: f64 = 9.0 / 16.0;

    /// Strategy for source dimensions, from tiny to camera-sized.
    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=8000, 1u32..=8000)
    }

    fn mode_strategy() -> impl Strategy<Value = CropMode> {
        prop_oneof![
            Just(CropMode::Center),
            Just(CropMode::Top),
            Just(CropMode::Bottom),
        ]
    }

    proptest! {
        /// Property: the crop always lies inside the source.
        #[test]
        fn prop_crop_within_bounds(
            (width, height) in dimensions_strategy(),
            mode in mode_strategy(),
        ) {
            let rect = compute_crop_rect(width, height, RATIO, mode).unwrap();
            prop_assert!(rect.fits_within(width, height), "{} outside {}x{}", rect, width, height);
        }

        /// Property: one full source dimension is always kept.
        #[test]
        fn prop_one_axis_untouched(
            (width, height) in dimensions_strategy(),
            mode in mode_strategy(),
        ) {
            let rect = compute_crop_rect(width, height, RATIO, mode).unwrap();
            if width as f64 / height as f64 > RATIO {
                prop_assert_eq!(rect.height, height);
                prop_assert_eq!(rect.y, 0);
                prop_assert_eq!(rect.x, (width - rect.width) / 2);
            } else {
                prop_assert_eq!(rect.width, width);
                prop_assert_eq!(rect.x, 0);
            }
        }

        /// Property: the vertical anchor follows the crop mode.
        #[test]
        fn prop_vertical_anchor(
            width in 1u32..=2000,
            extra in 0u32..=4000,
        ) {
            // Height chosen so the source is always at least 9:16 tall
            let height = width * 16 / 9 + 1 + extra;
            let top = compute_crop_rect(width, height, RATIO, CropMode::Top).unwrap();
            let bottom = compute_crop_rect(width, height, RATIO, CropMode::Bottom).unwrap();
            let center = compute_crop_rect(width, height, RATIO, CropMode::Center).unwrap();

            prop_assert_eq!(top.y, 0);
            prop_assert_eq!(bottom.y, height - bottom.height);
            prop_assert_eq!(center.y, (height - center.height) / 2);
        }

        /// Property: the crop is as close to 9:16 as truncation allows.
        #[test]
        fn prop_ratio_within_one_pixel(
            width in 16u32..=8000,
            height in 16u32..=8000,
        ) {
            let rect = compute_crop_rect(width, height, RATIO, CropMode::Center).unwrap();
            let ideal_width = rect.height as f64 * RATIO;
            let ideal_height = rect.width as f64 / RATIO;
            prop_assert!(
                (rect.width as f64 - ideal_width).abs() < 1.0
                    || (rect.height as f64 - ideal_height).abs() < 1.0
            );
        }
    }
}

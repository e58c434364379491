//! Resampling to an exact output size.
//!
//! Uses the `image` crate's separable filters. The pipeline always resamples
//! with Lanczos3, which keeps aliasing low when a large photo is shrunk to
//! 1080x1920 and stays sharp when a small one is enlarged.

use crate::decode::{DecodedImage, FilterType};

use super::TransformError;

/// Resize an image to exact dimensions.
///
/// Aspect ratio is not preserved; callers crop to the target ratio first.
///
/// # Errors
///
/// Returns `TransformError::InvalidTarget` for a zero target dimension and
/// `TransformError::PixelBufferMismatch` if the source buffer is malformed.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, TransformError> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidTarget { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let source = image
        .as_rgb_image()
        .ok_or(TransformError::PixelBufferMismatch {
            expected: image.width as usize * image.height as usize * 3,
            actual: image.pixels.len(),
        })?;

    let resized = image::imageops::resize(&source, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgb_image(resized))
}

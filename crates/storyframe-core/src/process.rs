//! The story-format pipeline: decode, orient, flatten, crop, resample, encode.
//!
//! [`process`] is the single entry point a transport layer needs. It is
//! synchronous and holds no state between calls, so it can run on any
//! worker thread.

use image::Rgb;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::FrameConfig;
use crate::decode::{decode_image_onto, DecodeError};
use crate::encode::{encode_image, EncodeError};
use crate::transform::{apply_crop_rect, compute_crop_rect, resize, CropMode, TransformError};

/// Failure categories a caller can map to a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The bytes are empty, not an image, or a damaged image.
    Decode,
    /// The bytes are a recognized format that has no decoder here.
    UnsupportedFormat,
    /// Anything that went wrong after a successful decode.
    Internal,
}

impl ErrorKind {
    /// Stable identifier, e.g. for a JSON `kind` field.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Decode => "decode",
            ErrorKind::UnsupportedFormat => "unsupported_format",
            ErrorKind::Internal => "internal",
        }
    }

    /// True when the input, not the service, is at fault.
    pub fn is_client_error(self) -> bool {
        !matches!(self, ErrorKind::Internal)
    }
}

/// Errors returned by [`process`].
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The input could not be decoded.
    #[error("Failed to decode image: {0}")]
    Decode(DecodeError),

    /// The input is not in a supported format.
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Cropping, resampling, encoding or configuration failed.
    #[error("Image processing failed: {0}")]
    Internal(String),
}

impl ProcessError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProcessError::Decode(_) => ErrorKind::Decode,
            ProcessError::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            ProcessError::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<DecodeError> for ProcessError {
    fn from(error: DecodeError) -> Self {
        match error {
            DecodeError::UnsupportedFormat(detail) => ProcessError::UnsupportedFormat(detail),
            other => ProcessError::Decode(other),
        }
    }
}

impl From<TransformError> for ProcessError {
    fn from(error: TransformError) -> Self {
        ProcessError::Internal(error.to_string())
    }
}

impl From<EncodeError> for ProcessError {
    fn from(error: EncodeError) -> Self {
        ProcessError::Internal(error.to_string())
    }
}

/// Facts about one completed transform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformMetadata {
    /// Width of the upright source image.
    pub original_width: u32,
    /// Height of the upright source image.
    pub original_height: u32,
    /// The crop mode after normalization.
    pub crop_mode: CropMode,
    /// Output width (1080 unless configured otherwise).
    pub result_width: u32,
    /// Output height (1920 unless configured otherwise).
    pub result_height: u32,
    /// Encoded JPEG size in bytes.
    pub file_size: usize,
}

/// Encoded output plus its metadata.
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    /// JPEG bytes.
    pub jpeg: Vec<u8>,
    /// Metadata describing the transform.
    pub metadata: TransformMetadata,
}

impl ProcessedImage {
    /// The JPEG as a `data:image/jpeg;base64,...` URL.
    pub fn to_data_url(&self) -> String {
        crate::data_url::to_data_url(&self.jpeg, crate::data_url::JPEG_MIME)
    }
}

/// Crop an encoded image to 9:16, resample it to 1080x1920 and encode it as
/// JPEG.
///
/// `crop_mode` is `"top"`, `"bottom"` or anything else for center.
///
/// # Errors
///
/// `ProcessError::Decode` when the input is empty, unrecognizable or
/// damaged, `ProcessError::UnsupportedFormat` for a recognized format that
/// cannot be decoded here, and `ProcessError::Internal` for failures after
/// decoding.
pub fn process(image_bytes: &[u8], crop_mode: &str) -> Result<ProcessedImage, ProcessError> {
    process_with_config(
        image_bytes,
        CropMode::from_name(crop_mode),
        &FrameConfig::default(),
    )
}

/// Run the pipeline with custom output settings.
pub fn process_with_config(
    image_bytes: &[u8],
    crop_mode: CropMode,
    config: &FrameConfig,
) -> Result<ProcessedImage, ProcessError> {
    config.validate().map_err(ProcessError::Internal)?;

    let source = decode_image_onto(image_bytes, Rgb(config.background))?;
    let (original_width, original_height) = (source.width, source.height);

    let rect = compute_crop_rect(
        original_width,
        original_height,
        config.target_ratio(),
        crop_mode,
    )?;
    log::debug!(
        "cropping {}x{} source to {} ({})",
        original_width,
        original_height,
        rect,
        crop_mode
    );

    let cropped = apply_crop_rect(&source, &rect)?;
    drop(source);

    let resized = resize(
        &cropped,
        config.target_width,
        config.target_height,
        config.filter,
    )?;
    let jpeg = encode_image(&resized, config.jpeg_quality)?;

    let metadata = TransformMetadata {
        original_width,
        original_height,
        crop_mode,
        result_width: resized.width,
        result_height: resized.height,
        file_size: jpeg.len(),
    };
    log::info!(
        "processed {}x{} -> {}x{} ({}, {} bytes)",
        metadata.original_width,
        metadata.original_height,
        metadata.result_width,
        metadata.result_height,
        metadata.crop_mode,
        metadata.file_size
    );

    Ok(ProcessedImage { jpeg, metadata })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, RgbImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 90])
        });
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_process_landscape() {
        let result = process(&png_bytes(64, 48), "center").unwrap();

        assert_eq!(result.metadata.original_width, 64);
        assert_eq!(result.metadata.original_height, 48);
        assert_eq!(result.metadata.crop_mode, CropMode::Center);
        assert_eq!(result.metadata.result_width, 1080);
        assert_eq!(result.metadata.result_height, 1920);
        assert_eq!(result.metadata.file_size, result.jpeg.len());
        assert_eq!(&result.jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_process_normalizes_unknown_mode() {
        let result = process(&png_bytes(20, 60), "diagonal").unwrap();
        assert_eq!(result.metadata.crop_mode, CropMode::Center);
    }

    #[test]
    fn test_process_with_small_config() {
        let config = FrameConfig {
            target_width: 90,
            target_height: 160,
            ..FrameConfig::default()
        };
        let result = process_with_config(&png_bytes(50, 50), CropMode::Top, &config).unwrap();

        let decoded = image::load_from_memory(&result.jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (90, 160));
        assert_eq!(result.metadata.result_width, 90);
        assert_eq!(result.metadata.crop_mode, CropMode::Top);
    }

    #[test]
    fn test_process_rejects_invalid_config() {
        let config = FrameConfig {
            jpeg_quality: 0,
            ..FrameConfig::default()
        };
        let err = process_with_config(&png_bytes(10, 10), CropMode::Center, &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_process_empty_input() {
        let err = process(&[], "center").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_process_garbage_input() {
        let err = process(b"definitely not an image", "center").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert!(err.kind().is_client_error());
        assert_eq!(
            err.to_string(),
            "Failed to decode image: Data is not a recognizable image"
        );
    }

    #[test]
    fn test_process_recognized_format_without_decoder() {
        let mut bytes = b"farbfeld".to_vec();
        bytes.extend_from_slice(&[0, 0, 0, 1, 0, 0, 0, 1]);
        bytes.extend_from_slice(&[0xFF; 8]);

        let err = process(&bytes, "center").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
        assert!(err.kind().is_client_error());
    }

    #[test]
    fn test_process_truncated_input() {
        let bytes = png_bytes(40, 40);
        let err = process(&bytes[..bytes.len() / 2], "center").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert!(err.to_string().starts_with("Failed to decode image"));
    }

    #[test]
    fn test_error_kind_names() {
        assert_eq!(ErrorKind::Decode.as_str(), "decode");
        assert_eq!(ErrorKind::UnsupportedFormat.as_str(), "unsupported_format");
        assert_eq!(ErrorKind::Internal.as_str(), "internal");
        assert!(!ErrorKind::Internal.is_client_error());
        assert_eq!(
            serde_json::to_string(&ErrorKind::UnsupportedFormat).unwrap(),
            "\"unsupported_format\""
        );
    }

    #[test]
    fn test_transform_error_is_internal() {
        let err: ProcessError = TransformError::EmptySource {
            width: 0,
            height: 0,
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_metadata_serializes_with_wire_names() {
        let metadata = TransformMetadata {
            original_width: 4000,
            original_height: 3000,
            crop_mode: CropMode::Bottom,
            result_width: 1080,
            result_height: 1920,
            file_size: 12345,
        };
        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "original_width": 4000,
                "original_height": 3000,
                "crop_mode": "bottom",
                "result_width": 1080,
                "result_height": 1920,
                "file_size": 12345
            })
        );
    }

    #[test]
    fn test_to_data_url() {
        let result = process(&png_bytes(9, 16), "top").unwrap();
        assert!(result
            .to_data_url()
            .starts_with("data:image/jpeg;base64,/9j/"));
    }
}

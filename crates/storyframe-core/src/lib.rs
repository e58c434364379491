//! Storyframe Core - story-format image pipeline
//!
//! This crate turns an uploaded photo into a 1080x1920 (9:16) JPEG:
//! EXIF orientation correction, alpha flattening, aspect-ratio cropping,
//! Lanczos3 resampling and JPEG encoding.
//!
//! # Usage
//!
//! ```ignore
//! let bytes = std::fs::read("holiday.jpg")?;
//! let result = storyframe_core::process(&bytes, "center")?;
//! std::fs::write("story.jpg", &result.jpeg)?;
//! println!("{:?}", result.metadata);
//! ```
//!
//! The crate logs through the `log` facade and installs no logger itself.

pub mod config;
pub mod data_url;
pub mod decode;
pub mod encode;
pub mod process;
pub mod transform;

pub use config::{FrameConfig, JPEG_QUALITY, TARGET_HEIGHT, TARGET_RATIO, TARGET_WIDTH};
pub use data_url::{decode_data_url, to_data_url, DataUrlError};
pub use process::{
    process, process_with_config, ErrorKind, ProcessError, ProcessedImage, TransformMetadata,
};
pub use transform::{compute_crop_rect, CropMode, CropRect};

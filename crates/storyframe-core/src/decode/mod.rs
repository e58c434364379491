//! Image decoding for Storyframe.
//!
//! This module provides functionality for:
//! - Decoding common raster formats (JPEG, PNG, GIF, WebP, BMP, TIFF)
//! - Reading the EXIF orientation tag and turning the raster upright
//! - Flattening transparent images onto an opaque background
//!
//! Every decoded image is 8-bit RGB; later pipeline stages never see alpha.
//!
//! # Examples
//!
//! ```ignore
//! use storyframe_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod reader;
mod types;

pub use reader::{
    decode_image, decode_image_onto, flatten_alpha, get_orientation, read_orientation, WHITE,
};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};

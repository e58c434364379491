//! Image encoding for Storyframe.
//!
//! This module provides functionality for:
//! - Encoding RGB images to JPEG with configurable quality
//!
//! # Examples
//!
//! ```ignore
//! use storyframe_core::encode::encode_jpeg;
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
//! let jpeg_bytes = encode_jpeg(&pixels, 100, 100, 92).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;

pub use jpeg::{encode_image, encode_jpeg, EncodeError};

//! WASM-compatible wrapper types for pipeline output.
//!
//! This module provides JavaScript-friendly types that wrap the core
//! Storyframe types, handling the conversion between Rust and JavaScript
//! data representations.

use storyframe_core::{ProcessedImage, TransformMetadata};
use wasm_bindgen::prelude::*;

/// A processed story image for JavaScript.
///
/// Holds the encoded JPEG and the transform metadata. The JPEG bytes live in
/// WASM memory until `jpeg()` or `data_url()` copies them out.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const result = process_image(bytes, 'center');
/// img.src = result.data_url();
/// console.log(`${result.original_width}x${result.original_height} -> ${result.file_size} bytes`);
/// result.free();
/// ```
#[wasm_bindgen]
#[derive(Debug)]
pub struct JsProcessedImage {
    jpeg: Vec<u8>,
    metadata: TransformMetadata,
}

#[wasm_bindgen]
impl JsProcessedImage {
    /// Width of the upright source image.
    #[wasm_bindgen(getter)]
    pub fn original_width(&self) -> u32 {
        self.metadata.original_width
    }

    /// Height of the upright source image.
    #[wasm_bindgen(getter)]
    pub fn original_height(&self) -> u32 {
        self.metadata.original_height
    }

    /// Normalized crop mode ("center", "top" or "bottom").
    #[wasm_bindgen(getter)]
    pub fn crop_mode(&self) -> String {
        self.metadata.crop_mode.to_string()
    }

    /// Output width in pixels.
    #[wasm_bindgen(getter)]
    pub fn result_width(&self) -> u32 {
        self.metadata.result_width
    }

    /// Output height in pixels.
    #[wasm_bindgen(getter)]
    pub fn result_height(&self) -> u32 {
        self.metadata.result_height
    }

    /// Size of the encoded JPEG in bytes.
    #[wasm_bindgen(getter)]
    pub fn file_size(&self) -> usize {
        self.metadata.file_size
    }

    /// Returns the JPEG bytes as a Uint8Array (copied).
    pub fn jpeg(&self) -> Vec<u8> {
        self.jpeg.clone()
    }

    /// Returns the JPEG as a `data:image/jpeg;base64,...` string.
    pub fn data_url(&self) -> String {
        storyframe_core::to_data_url(&self.jpeg, storyframe_core::data_url::JPEG_MIME)
    }

    /// Returns the metadata as a plain object with snake_case keys.
    pub fn info(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.metadata)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize metadata: {}", e)))
    }
}

impl JsProcessedImage {
    /// Wrap a core pipeline result.
    pub(crate) fn from_processed(result: ProcessedImage) -> Self {
        Self {
            jpeg: result.jpeg,
            metadata: result.metadata,
        }
    }
}

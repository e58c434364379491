//! Story-format pipeline WASM bindings.
//!
//! # Functions
//!
//! - [`process_image`] - Crop and resize raw image bytes
//! - [`process_data_url`] - Same, for a base64 data URL upload
//! - [`process_image_with_config`] - Crop and resize with custom output settings
//! - [`crop_preview`] - Compute the crop rectangle without touching pixels
//!
//! # Example
//!
//! ```typescript
//! import { process_image } from '@storyframe/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! try {
//!   const result = process_image(bytes, 'bottom');
//!   preview.src = result.data_url();
//! } catch (e) {
//!   // every binding throws an Error whose name is
//!   // "decode", "unsupported_format" or "internal"
//!   showError(e.message);
//! }
//! ```

use crate::types::JsProcessedImage;
use storyframe_core::decode::DecodeError;
use storyframe_core::{
    compute_crop_rect, decode_data_url, process, process_with_config, CropMode, FrameConfig,
    ProcessError, TARGET_RATIO,
};
use wasm_bindgen::prelude::*;

/// Convert a pipeline error into a JS `Error` whose `name` is the error kind.
fn to_js_error(error: ProcessError) -> JsValue {
    let js_error = js_sys::Error::new(&error.to_string());
    js_error.set_name(error.kind().as_str());
    web_sys::console::warn_1(&js_error);
    js_error.into()
}

/// Crop raw image bytes to 9:16 and resize to 1080x1920 JPEG.
///
/// # Arguments
///
/// * `bytes` - Encoded image (JPEG, PNG, GIF, WebP, BMP or TIFF)
/// * `crop_mode` - "top", "bottom" or anything else for center
///
/// # Errors
///
/// Throws an `Error` named after the failure kind.
#[wasm_bindgen]
pub fn process_image(bytes: &[u8], crop_mode: &str) -> Result<JsProcessedImage, JsValue> {
    process(bytes, crop_mode)
        .map(JsProcessedImage::from_processed)
        .map_err(to_js_error)
}

/// Process an upload given as a `data:image/...;base64,...` string.
///
/// Bare base64 without a `data:` header is accepted too.
#[wasm_bindgen]
pub fn process_data_url(data_url: &str, crop_mode: &str) -> Result<JsProcessedImage, JsValue> {
    let bytes = decode_data_url(data_url)
        .map_err(|e| to_js_error(DecodeError::CorruptedFile(e.to_string()).into()))?;
    process_image(&bytes, crop_mode)
}

/// Process with custom output settings.
///
/// `config` is an object with any of `target_width`, `target_height`,
/// `jpeg_quality`, `filter` ("nearest" | "bilinear" | "lanczos3") and
/// `background` ([r, g, b]). Missing fields keep their defaults; a malformed
/// object throws an `internal` error.
#[wasm_bindgen]
pub fn process_image_with_config(
    bytes: &[u8],
    crop_mode: &str,
    config: JsValue,
) -> Result<JsProcessedImage, JsValue> {
    let config: FrameConfig = if config.is_undefined() || config.is_null() {
        FrameConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)
            .map_err(|e| to_js_error(ProcessError::Internal(format!("Invalid config: {}", e))))?
    };

    process_with_config(bytes, CropMode::from_name(crop_mode), &config)
        .map(JsProcessedImage::from_processed)
        .map_err(to_js_error)
}

/// Compute the 9:16 crop rectangle for a `width` x `height` source.
///
/// Returns `{ x, y, width, height }` in source pixels, for drawing a crop
/// overlay before uploading. A zero dimension throws an `internal` error.
#[wasm_bindgen]
pub fn crop_preview(width: u32, height: u32, crop_mode: &str) -> Result<JsValue, JsValue> {
    let rect = compute_crop_rect(width, height, TARGET_RATIO, CropMode::from_name(crop_mode))
        .map_err(|e| to_js_error(e.into()))?;
    serde_wasm_bindgen::to_value(&rect)
        .map_err(|e| to_js_error(ProcessError::Internal(e.to_string())))
}

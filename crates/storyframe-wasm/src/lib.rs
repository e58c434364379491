//! Storyframe WASM - WebAssembly bindings for Storyframe
//!
//! This crate exposes the storyframe-core pipeline to a browser front end,
//! so photos are cropped to 9:16 and resized to 1080x1920 without leaving
//! the page.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper for pipeline results
//! - `process` - Pipeline bindings (bytes, data URLs, crop preview)
//!
//! # Usage
//!
//! ```typescript
//! import init, { process_image } from '@storyframe/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = process_image(bytes, 'center');
//! console.log(result.info());
//! ```

use wasm_bindgen::prelude::*;

mod process;
mod types;

// Re-export public types
pub use process::{crop_preview, process_data_url, process_image, process_image_with_config};
pub use types::JsProcessedImage;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Output size as `[width, height]`.
#[wasm_bindgen]
pub fn target_size() -> Vec<u32> {
    vec![storyframe_core::TARGET_WIDTH, storyframe_core::TARGET_HEIGHT]
}

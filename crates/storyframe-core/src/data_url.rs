//! Base64 `data:` URL helpers.
//!
//! Browser front ends send uploads as `data:image/png;base64,...` strings and
//! display results from `data:image/jpeg;base64,...`. Only the base64 form is
//! supported.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

/// MIME type of pipeline output.
pub const JPEG_MIME: &str = "image/jpeg";

/// Errors from decoding a data URL payload.
#[derive(Debug, Error)]
pub enum DataUrlError {
    /// Nothing to decode after stripping the header.
    #[error("Data URL has no payload")]
    EmptyPayload,

    /// The payload is not valid base64.
    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// Encode bytes as `data:<mime>;base64,<payload>`.
pub fn to_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Decode the bytes carried by a data URL.
///
/// The payload is the segment between the first and second comma; anything
/// after a second comma is ignored. Input without a comma is taken as bare
/// base64.
pub fn decode_data_url(input: &str) -> Result<Vec<u8>, DataUrlError> {
    let payload = input.split(',').nth(1).unwrap_or(input);
    let payload = payload.trim();
    if payload.is_empty() {
        return Err(DataUrlError::EmptyPayload);
    }
    Ok(STANDARD.decode(payload)?)
}

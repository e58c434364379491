//! Image decoding with EXIF orientation handling and alpha flattening.
//!
//! Any format enabled on the `image` crate is accepted (JPEG, PNG, GIF, WebP,
//! BMP, TIFF). The decoded raster is turned upright using the EXIF
//! orientation tag when one can be read, and transparent sources are
//! composited onto an opaque background so the result is always RGB.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageError, ImageReader, Rgb, RgbImage};

use super::{DecodeError, DecodedImage, Orientation};

/// Background used when flattening transparent images.
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Decode an image from bytes, applying EXIF orientation correction and
/// flattening any transparency onto white.
///
/// # Errors
///
/// Returns `DecodeError::EmptyInput` for an empty slice,
/// `DecodeError::NotAnImage` if no known signature matches,
/// `DecodeError::UnsupportedFormat` for a recognized format without a
/// compiled-in decoder and `DecodeError::CorruptedFile` if the data is
/// damaged or truncated.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    decode_image_onto(bytes, WHITE)
}

/// Decode an image from bytes, flattening transparency onto `background`.
pub fn decode_image_onto(bytes: &[u8], background: Rgb<u8>) -> Result<DecodedImage, DecodeError> {
    let img = load_dynamic(bytes)?;
    log::debug!(
        "decoded {}x{} image ({:?})",
        img.width(),
        img.height(),
        img.color()
    );

    let orientation = get_orientation(bytes);
    let oriented = apply_orientation(img, orientation);
    if orientation != Orientation::Normal {
        log::debug!(
            "applied orientation {:?}, now {}x{}{}",
            orientation,
            oriented.width(),
            oriented.height(),
            if orientation.swaps_dimensions() {
                " (axes swapped)"
            } else {
                ""
            }
        );
    }

    Ok(DecodedImage::from_rgb_image(flatten_alpha(
        oriented, background,
    )))
}

fn load_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyInput);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::NotAnImage);
    }

    reader.decode().map_err(|e| match e {
        ImageError::Unsupported(inner) => DecodeError::UnsupportedFormat(inner.to_string()),
        other => DecodeError::CorruptedFile(other.to_string()),
    })
}

/// Look up the EXIF orientation tag.
///
/// Returns `Ok(None)` when the container carries no EXIF block or the block
/// has no usable orientation field. Errors are returned only when an EXIF
/// block exists but cannot be parsed.
pub fn read_orientation(bytes: &[u8]) -> Result<Option<Orientation>, exif::Error> {
    let exif = match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => exif,
        Err(exif::Error::NotFound(_)) => return Ok(None),
        Err(e) => return Err(e),
    };

    Ok(exif
        .get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .and_then(Orientation::from_tag))
}

/// Extract the EXIF orientation, falling back to `Orientation::Normal` when
/// it is absent or unreadable.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    match read_orientation(bytes) {
        Ok(orientation) => orientation.unwrap_or_default(),
        Err(e) => {
            log::debug!("no usable EXIF orientation: {}", e);
            Orientation::Normal
        }
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

/// Convert an image to 8-bit RGB, compositing over `background` when the
/// source has an alpha channel.
pub fn flatten_alpha(img: DynamicImage, background: Rgb<u8>) -> RgbImage {
    if !img.color().has_alpha() {
        return img.into_rgb8();
    }

    let rgba = img.into_rgba8();
    let (width, height) = rgba.dimensions();
    let mut rgb = RgbImage::new(width, height);

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as f32 / 255.0;
        let inv_alpha = 1.0 - alpha;
        let blend = |src: u8, bg: u8| (src as f32 * alpha + bg as f32 * inv_alpha).round() as u8;
        rgb.put_pixel(
            x,
            y,
            Rgb([
                blend(r, background[0]),
                blend(g, background[1]),
                blend(b, background[2]),
            ]),
        );
    }

    rgb
}

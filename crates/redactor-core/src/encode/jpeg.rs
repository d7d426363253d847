//! JPEG encoding of RGB8 images.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;

use crate::decode::DecodedImage;

/// Quality used when the caller does not choose one (lossless-leaning, like
/// a `compress: 1` save).
pub const DEFAULT_QUALITY: u8 = 100;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height is zero
    #[error("Cannot encode a {width}x{height} image")]
    EmptyImage { width: u32, height: u32 },

    /// Buffer length disagrees with width * height * 3
    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    BufferMismatch { expected: usize, actual: usize },

    /// The encoder itself failed
    #[error("JPEG encoding failed: {0}")]
    Encoder(String),
}

/// Encode an RGB8 image as JPEG bytes.
///
/// `quality` is clamped to 1-100.
pub fn encode_jpeg(image: &DecodedImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let DecodedImage {
        width,
        height,
        pixels,
    } = image;

    if *width == 0 || *height == 0 {
        return Err(EncodeError::EmptyImage {
            width: *width,
            height: *height,
        });
    }

    let expected = image.expected_len();
    if pixels.len() != expected {
        return Err(EncodeError::BufferMismatch {
            expected,
            actual: pixels.len(),
        });
    }

    let mut out = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100))
        .write_image(pixels, *width, *height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::Encoder(e.to_string()))?;

    Ok(out.into_inner())
}

//! JPEG (and PNG) decoding with EXIF orientation applied.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, DecodedImage, Orientation};

/// Decode image bytes into an upright RGB8 image.
///
/// The EXIF orientation tag, if present, is applied so the result matches
/// what the camera preview showed.
///
/// # Errors
///
/// - `DecodeError::UnrecognizedFormat` if the bytes are not a known format
/// - `DecodeError::Corrupted` if decoding fails part way
pub fn decode_jpeg(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let orientation = read_orientation(bytes);
    let img = open(bytes)?
        .decode()
        .map_err(|e| DecodeError::Corrupted(e.to_string()))?;

    let upright = apply_orientation(img, orientation);
    Ok(DecodedImage::from_rgb_image(upright.into_rgb8()))
}

/// Upright (width, height) of encoded image bytes, without decoding pixels.
///
/// This is what an image frame's source size must be measured with, since
/// the preview always shows the image upright.
pub fn read_dimensions(bytes: &[u8]) -> Result<(u32, u32), DecodeError> {
    let orientation = read_orientation(bytes);
    let (width, height) = open(bytes)?
        .into_dimensions()
        .map_err(|e| DecodeError::Corrupted(e.to_string()))?;
    Ok(orientation.oriented(width, height))
}

/// EXIF orientation of the image, `Normal` when absent or unreadable.
pub fn read_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map(Orientation::from)
        .unwrap_or_default()
}

fn open(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::Corrupted(e.to_string()))?;
    if reader.format().is_none() {
        return Err(DecodeError::UnrecognizedFormat(format!(
            "{} bytes with no known signature",
            bytes.len()
        )));
    }
    Ok(reader)
}

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_jpeg;

    fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DecodedImage::filled(width, height, [200, 120, 40]);
        encode_jpeg(&img, 90).unwrap()
    }

    /// Two-pixel strip: red on the left, green on the right.
    fn strip() -> DynamicImage {
        let rgb = image::RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
        DynamicImage::ImageRgb8(rgb)
    }

    #[test]
    fn test_decode_encoded_jpeg() {
        let img = decode_jpeg(&jpeg_bytes(32, 16)).unwrap();
        assert_eq!((img.width, img.height), (32, 16));
        assert_eq!(img.pixels.len(), 32 * 16 * 3);
    }

    #[test]
    fn test_read_dimensions() {
        assert_eq!(read_dimensions(&jpeg_bytes(40, 24)).unwrap(), (40, 24));
    }

    #[test]
    fn test_unrecognized_bytes() {
        let result = decode_jpeg(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::UnrecognizedFormat(_))));

        let result = read_dimensions(&[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_truncated_jpeg() {
        // Signature intact, frame header cut off
        let bytes = jpeg_bytes(64, 64);
        let result = decode_jpeg(&bytes[..20]);
        assert!(matches!(result, Err(DecodeError::Corrupted(_))));
    }

    #[test]
    fn test_no_exif_is_normal() {
        assert_eq!(read_orientation(&jpeg_bytes(8, 8)), Orientation::Normal);
        assert_eq!(read_orientation(&[0xAB, 0xCD]), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_rotate90_swaps() {
        let out = apply_orientation(strip(), Orientation::Rotate90CW).into_rgb8();
        assert_eq!(out.dimensions(), (1, 2));
        // Left pixel ends up on top after a clockwise turn
        assert_eq!(out.get_pixel(0, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_mirror() {
        let out = apply_orientation(strip(), Orientation::FlipHorizontal).into_rgb8();
        assert_eq!(out.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(out.get_pixel(1, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_normal_untouched() {
        let out = apply_orientation(strip(), Orientation::Normal).into_rgb8();
        assert_eq!(out.get_pixel(0, 0).0, [255, 0, 0]);
    }
}

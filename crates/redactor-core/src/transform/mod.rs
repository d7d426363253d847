//! Pixel operations applied to a photo once its boxes are committed.
//!
//! # Region Order
//!
//! Regions are applied in the order given. A crop replaces the working image
//! with the cropped sub-image, so any region after it is interpreted in the
//! cropped image's coordinates.
//!
//! # Coordinate System
//!
//! - Regions are integral source pixels (see [`crate::mapping`])
//! - Origin is the top-left corner

mod crop;
mod redact;

pub use crop::crop_region;
pub use redact::{blackout_region, BLACKOUT};

use thiserror::Error;

use crate::decode::DecodedImage;
use crate::geometry::PixelRegion;
use crate::{Region, RegionKind};

/// Errors from applying regions to an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The region covers no pixels.
    #[error("Region at ({}, {}) has zero area", .0.origin_x, .0.origin_y)]
    EmptyRegion(PixelRegion),

    /// The pixel buffer length disagrees with `width * height * 3`.
    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    BufferMismatch { expected: usize, actual: usize },

    /// The region reaches past the image it is applied to.
    #[error(
        "Region {}x{} at ({}, {}) exceeds {image_width}x{image_height} image",
        .region.width, .region.height, .region.origin_x, .region.origin_y
    )]
    OutOfBounds {
        region: PixelRegion,
        image_width: u32,
        image_height: u32,
    },
}

/// Apply crop and blackout regions to an image, in order.
///
/// The input is left untouched; a new image is returned.
///
/// # Errors
///
/// - `TransformError::BufferMismatch` if the pixel buffer does not match
///   the image dimensions
/// - Otherwise fails on the first region that is empty or does not fit the
///   working image. No partial result is returned.
pub fn apply_regions(
    image: &DecodedImage,
    regions: &[Region],
) -> Result<DecodedImage, TransformError> {
    let expected = image.expected_len();
    if image.pixels.len() != expected {
        return Err(TransformError::BufferMismatch {
            expected,
            actual: image.pixels.len(),
        });
    }

    let mut working = image.clone();

    for region in regions {
        let pixels = region.pixels();
        check_region(&working, pixels)?;

        match region.kind {
            RegionKind::Crop => working = crop_region(&working, pixels),
            RegionKind::Blackout => blackout_region(&mut working, pixels),
        }
    }

    Ok(working)
}

fn check_region(image: &DecodedImage, region: PixelRegion) -> Result<(), TransformError> {
    if region.is_empty() {
        return Err(TransformError::EmptyRegion(region));
    }
    if !region.fits_within(image.width, image.height) {
        return Err(TransformError::OutOfBounds {
            region,
            image_width: image.width,
            image_height: image.height,
        });
    }
    Ok(())
}

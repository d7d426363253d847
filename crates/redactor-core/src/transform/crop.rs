//! Cropping to a pixel region.

use crate::decode::DecodedImage;
use crate::geometry::PixelRegion;

/// Copy the pixels inside `region` into a new image.
///
/// The region is clamped to the image, and the result is at least 1x1 for a
/// non-empty image. A region covering the whole image returns a clone.
pub fn crop_region(image: &DecodedImage, region: PixelRegion) -> DecodedImage {
    if region.origin_x == 0
        && region.origin_y == 0
        && region.width >= image.width
        && region.height >= image.height
    {
        return image.clone();
    }

    let left = region.origin_x.min(image.width.saturating_sub(1));
    let top = region.origin_y.min(image.height.saturating_sub(1));
    let right = (left as u64 + region.width as u64).min(image.width as u64) as u32;
    let bottom = (top as u64 + region.height as u64).min(image.height as u64) as u32;

    let out_width = right.saturating_sub(left).max(1);
    let out_height = bottom.saturating_sub(top).max(1);

    let src_stride = image.width as usize * 3;
    let row_len = out_width as usize * 3;
    let mut pixels = Vec::with_capacity(row_len * out_height as usize);

    for y in top..top + out_height {
        let start = y as usize * src_stride + left as usize * 3;
        pixels.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    DecodedImage {
        width: out_width,
        height: out_height,
        pixels,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

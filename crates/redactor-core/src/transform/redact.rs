//! Solid blackout of a pixel region.

use crate::decode::DecodedImage;
use crate::geometry::PixelRegion;

/// Fill color for redacted regions.
pub const BLACKOUT: [u8; 3] = [0, 0, 0];

/// Paint `region` black in place. Parts outside the image are ignored.
pub fn blackout_region(image: &mut DecodedImage, region: PixelRegion) {
    let right = region.right().min(image.width as u64) as usize;
    let bottom = region.bottom().min(image.height as u64) as usize;
    let left = region.origin_x as usize;
    let top = region.origin_y as usize;

    if left >= right || top >= bottom {
        return;
    }

    let stride = image.width as usize * 3;
    for y in top..bottom {
        let row = &mut image.pixels[y * stride + left * 3..y * stride + right * 3];
        for px in row.chunks_exact_mut(3) {
            px.copy_from_slice(&BLACKOUT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [u8; 3] = [255, 255, 255];

    #[test]
    fn test_blackout_inner_region() {
        let mut img = DecodedImage::filled(10, 10, WHITE);
        blackout_region(&mut img, PixelRegion::new(2, 3, 4, 2));

        assert_eq!(img.pixel(2, 3), Some(BLACKOUT));
        assert_eq!(img.pixel(5, 4), Some(BLACKOUT));
        assert_eq!(img.pixel(6, 4), Some(WHITE));
        assert_eq!(img.pixel(2, 5), Some(WHITE));
        assert_eq!(img.pixel(1, 3), Some(WHITE));

        let black = img.pixels.chunks(3).filter(|p| *p == BLACKOUT).count();
        assert_eq!(black, 8);
    }

    #[test]
    fn test_blackout_clipped_at_edges() {
        let mut img = DecodedImage::filled(10, 10, WHITE);
        blackout_region(&mut img, PixelRegion::new(8, 8, 50, 50));

        let black = img.pixels.chunks(3).filter(|p| *p == BLACKOUT).count();
        assert_eq!(black, 4);
    }

    #[test]
    fn test_blackout_outside_is_noop() {
        let mut img = DecodedImage::filled(10, 10, WHITE);
        blackout_region(&mut img, PixelRegion::new(20, 0, 5, 5));
        assert_eq!(img, DecodedImage::filled(10, 10, WHITE));
    }
}

//! Decode, transform and encode bindings.
//!
//! These let a web host run the whole crop/redact pipeline in WASM:
//!
//! ```typescript
//! const image = decode_jpeg(new Uint8Array(await file.arrayBuffer()));
//! const redacted = apply_regions(image, session.regions(frame, JsRegionKind.Blackout));
//! const jpeg = encode_jpeg(redacted, 100);
//! ```

use redactor_core::decode;
use redactor_core::encode;
use redactor_core::{transform, Region};
use wasm_bindgen::prelude::*;

use crate::types::{js_error, JsDecodedImage};

/// Decode JPEG or PNG bytes to an upright RGB image.
#[wasm_bindgen]
pub fn decode_jpeg(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_jpeg(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(js_error)
}

/// Upright `[width, height]` of encoded image bytes.
#[wasm_bindgen]
pub fn read_dimensions(bytes: &[u8]) -> Result<Vec<u32>, JsValue> {
    let (width, height) = decode::read_dimensions(bytes).map_err(js_error)?;
    Ok(vec![width, height])
}

/// Encode an image as JPEG (quality 1-100).
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsDecodedImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(&image.to_decoded(), quality).map_err(js_error)
}

/// Apply `[{ kind, origin_x, origin_y, width, height }]` regions in order.
#[wasm_bindgen]
pub fn apply_regions(image: &JsDecodedImage, regions: JsValue) -> Result<JsDecodedImage, JsValue> {
    let regions: Vec<Region> = serde_wasm_bindgen::from_value(regions)
        .map_err(|e| JsValue::from_str(&format!("Invalid regions: {}", e)))?;
    apply_region_list(image, &regions)
}

fn apply_region_list(
    image: &JsDecodedImage,
    regions: &[Region],
) -> Result<JsDecodedImage, JsValue> {
    transform::apply_regions(&image.to_decoded(), regions)
        .map(JsDecodedImage::from_decoded)
        .map_err(js_error)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_decode_garbage_errors() {
        assert!(decode_jpeg(&[1, 2, 3]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_encode_empty_errors() {
        assert!(encode_jpeg(&JsDecodedImage::new(0, 0, vec![]), 90).is_err());
    }

    #[wasm_bindgen_test]
    fn test_apply_regions_from_js() {
        let regions = vec![Region::crop(redactor_core::PixelRegion::new(0, 0, 4, 4))];
        let value = serde_wasm_bindgen::to_value(&regions).unwrap();
        let img = JsDecodedImage::new(8, 8, vec![50u8; 8 * 8 * 3]);
        let out = apply_regions(&img, value).unwrap();
        assert_eq!(out.width(), 4);
    }

    #[wasm_bindgen_test]
    fn test_apply_regions_short_buffer_errors() {
        let regions = vec![Region::blackout(redactor_core::PixelRegion::new(0, 5, 5, 5))];
        let value = serde_wasm_bindgen::to_value(&regions).unwrap();
        let img = JsDecodedImage::new(10, 10, vec![0u8; 30]);
        assert!(apply_regions(&img, value).is_err());
    }

    #[wasm_bindgen_test]
    fn test_apply_regions_out_of_bounds_errors() {
        let regions = vec![Region::crop(redactor_core::PixelRegion::new(6, 6, 4, 4))];
        let value = serde_wasm_bindgen::to_value(&regions).unwrap();
        let img = JsDecodedImage::new(8, 8, vec![50u8; 8 * 8 * 3]);
        assert!(apply_regions(&img, value).is_err());
    }
}

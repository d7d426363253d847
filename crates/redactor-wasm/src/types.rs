//! WASM-compatible wrapper types for image data and region kinds.

use redactor_core::decode::DecodedImage;
use redactor_core::RegionKind;
use wasm_bindgen::prelude::*;

/// A decoded RGB8 image held in WASM memory.
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create an image from dimensions and RGB pixel data (3 bytes per pixel).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsDecodedImage {
        JsDecodedImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Copy the RGB pixel data out as a `Uint8Array`.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Clone into a core image for processing.
    pub(crate) fn to_decoded(&self) -> DecodedImage {
        DecodedImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// Region kind as seen from JavaScript.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsRegionKind {
    Crop = 0,
    Blackout = 1,
}

impl From<JsRegionKind> for RegionKind {
    fn from(kind: JsRegionKind) -> Self {
        match kind {
            JsRegionKind::Crop => RegionKind::Crop,
            JsRegionKind::Blackout => RegionKind::Blackout,
        }
    }
}

/// Convert any displayable error into a JS string value.
pub(crate) fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_decoded_image_accessors() {
        let img = JsDecodedImage::new(4, 2, vec![7u8; 4 * 2 * 3]);
        assert_eq!(img.width(), 4);
        assert_eq!(img.height(), 2);
        assert_eq!(img.byte_length(), 24);
        assert_eq!(img.pixels(), vec![7u8; 24]);
    }

    #[test]
    fn test_decoded_conversion() {
        let core = DecodedImage::filled(3, 3, [1, 2, 3]);
        let js = JsDecodedImage::from_decoded(core.clone());
        assert_eq!(js.to_decoded(), core);
    }

    #[test]
    fn test_region_kind_conversion() {
        assert_eq!(RegionKind::from(JsRegionKind::Crop), RegionKind::Crop);
        assert_eq!(RegionKind::from(JsRegionKind::Blackout), RegionKind::Blackout);
    }
}

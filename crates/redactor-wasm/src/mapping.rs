//! Coordinate mapping bindings.
//!
//! ```typescript
//! const frame = new JsImageFrame(layout.width, layout.height, photo.width, photo.height);
//! const [originX, originY, width, height] =
//!     map_to_source(frame, box.x, box.y, box.width, box.height);
//! ```

use redactor_core::mapping::{self, GuideFrame, ImageFrame};
use redactor_core::Rect;
use wasm_bindgen::prelude::*;

use crate::types::js_error;

/// Preview and source sizes of an image.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct JsImageFrame {
    inner: ImageFrame,
}

#[wasm_bindgen]
impl JsImageFrame {
    #[wasm_bindgen(constructor)]
    pub fn new(
        display_width: f64,
        display_height: f64,
        source_width: u32,
        source_height: u32,
    ) -> JsImageFrame {
        JsImageFrame {
            inner: ImageFrame::new(display_width, display_height, source_width, source_height),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn display_width(&self) -> f64 {
        self.inner.display_width
    }

    #[wasm_bindgen(getter)]
    pub fn display_height(&self) -> f64 {
        self.inner.display_height
    }

    #[wasm_bindgen(getter)]
    pub fn source_width(&self) -> u32 {
        self.inner.source_width
    }

    #[wasm_bindgen(getter)]
    pub fn source_height(&self) -> u32 {
        self.inner.source_height
    }

    pub fn is_measured(&self) -> bool {
        self.inner.is_measured()
    }
}

impl JsImageFrame {
    pub(crate) fn inner(&self) -> &ImageFrame {
        &self.inner
    }
}

/// Map a preview rectangle to `[originX, originY, width, height]` source pixels.
#[wasm_bindgen]
pub fn map_to_source(
    frame: &JsImageFrame,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> Result<Vec<u32>, JsValue> {
    let region =
        mapping::map_to_source(Rect::new(x, y, width, height), frame.inner()).map_err(js_error)?;
    Ok(vec![region.origin_x, region.origin_y, region.width, region.height])
}

/// Guide frame centered in the camera layout as `[x, y, width, height]`.
///
/// `mail_piece` selects the tall mail-piece frame instead of the document frame.
#[wasm_bindgen]
pub fn guide_frame(layout_width: f64, layout_height: f64, mail_piece: bool) -> Vec<f64> {
    let preset = if mail_piece {
        GuideFrame::MailPiece
    } else {
        GuideFrame::Document
    };
    let r = preset.rect(layout_width, layout_height);
    vec![r.x, r.y, r.width, r.height]
}

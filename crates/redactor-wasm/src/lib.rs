//! Redactor WASM - WebAssembly bindings for the redactor editing core
//!
//! This crate exposes the crop/redaction session, coordinate mapping and
//! image pipeline of `redactor-core` to a JavaScript/TypeScript UI.
//!
//! # Module Structure
//!
//! - `session` - Drag-driven rectangle editing with undo/redo
//! - `mapping` - Preview-to-source coordinate mapping and guide frames
//! - `codec` - Decode, region transform and JPEG encode
//! - `types` - WASM-compatible wrapper types
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditorSession, JsImageFrame, JsRegionKind } from '@redactor/wasm';
//!
//! await init();
//!
//! const session = new JsEditorSession();
//! const frame = new JsImageFrame(view.width, view.height, photo.width, photo.height);
//! const regions = session.regions(frame, JsRegionKind.Blackout);
//! ```

use wasm_bindgen::prelude::*;

mod codec;
mod mapping;
mod session;
mod types;

pub use codec::{apply_regions, decode_jpeg, encode_jpeg, read_dimensions};
pub use mapping::{guide_frame, map_to_source, JsImageFrame};
pub use session::{JsDragOutcome, JsEditorSession};
pub use types::{JsDecodedImage, JsRegionKind};

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

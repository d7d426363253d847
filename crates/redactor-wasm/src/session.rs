//! Editing session bindings.
//!
//! A `JsEditorSession` is created per crop or redaction screen and fed the
//! screen's pan-gesture callbacks.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const session = JsEditorSession.with_config({ move_policy: 'snapshot' });
//!
//! onStart: (e) => session.drag_start(e.x, e.y),
//! onUpdate: (e) => session.drag_update(e.x, e.y),
//! onEnd: () => session.drag_end(),
//!
//! const boxes = session.rects(); // [{ id, x, y, width, height }]
//! const regions = session.regions(frame, JsRegionKind.Blackout);
//! ```

use redactor_core::editor::Entry;
use redactor_core::workflow::plan_regions;
use redactor_core::{DragMode, DragOutcome, EditorConfig, RectangleEditor};
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;

use crate::mapping::JsImageFrame;
use crate::types::{js_error, JsRegionKind};

/// How a finished drag was resolved.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsDragOutcome {
    Committed = 0,
    Discarded = 1,
    Moved = 2,
}

impl From<DragOutcome> for JsDragOutcome {
    fn from(outcome: DragOutcome) -> Self {
        match outcome {
            DragOutcome::Committed(_) => JsDragOutcome::Committed,
            DragOutcome::Discarded => JsDragOutcome::Discarded,
            DragOutcome::Moved(_) => JsDragOutcome::Moved,
        }
    }
}

/// One editing session: rectangles, active gesture and undo history.
#[wasm_bindgen]
pub struct JsEditorSession {
    editor: RectangleEditor,
}

impl Default for JsEditorSession {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl JsEditorSession {
    /// Session with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsEditorSession {
        JsEditorSession {
            editor: RectangleEditor::default(),
        }
    }

    /// Session configured from a JS object; missing fields use defaults.
    pub fn with_config(config: JsValue) -> Result<JsEditorSession, JsValue> {
        let config: EditorConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid editor config: {}", e)))?;
        Ok(Self::from_config(config))
    }

    /// Start a drag. Returns `true` if an existing box was grabbed.
    pub fn drag_start(&mut self, x: f64, y: f64) -> Result<bool, JsValue> {
        let mode = self.editor.begin_drag(x, y).map_err(js_error)?;
        Ok(matches!(mode, DragMode::Moving(_)))
    }

    pub fn drag_update(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        self.editor.update_drag(x, y).map_err(js_error)
    }

    pub fn drag_end(&mut self) -> Result<JsDragOutcome, JsValue> {
        self.editor.end_drag().map(JsDragOutcome::from).map_err(js_error)
    }

    pub fn cancel_drag(&mut self) -> bool {
        self.editor.cancel_drag()
    }

    pub fn undo(&mut self) -> bool {
        self.editor.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.editor.redo()
    }

    #[wasm_bindgen(getter)]
    pub fn can_undo(&self) -> bool {
        self.editor.can_undo()
    }

    #[wasm_bindgen(getter)]
    pub fn can_redo(&self) -> bool {
        self.editor.can_redo()
    }

    /// Drop the newest box. Returns `false` if there was none.
    pub fn remove_last(&mut self) -> bool {
        self.editor.remove_last().is_some()
    }

    /// Add the default box. Returns `false` while a drag is in progress.
    pub fn add_default_box(&mut self) -> bool {
        self.editor.add_default_box().is_some()
    }

    pub fn clear(&mut self) -> bool {
        self.editor.clear()
    }

    /// Number of committed boxes.
    #[wasm_bindgen(getter)]
    pub fn count(&self) -> usize {
        self.editor.rects().len()
    }

    /// The box being drawn as `[x, y, width, height]`, empty when not drawing.
    pub fn current(&self) -> Vec<f64> {
        self.editor
            .current()
            .map(|r| vec![r.x, r.y, r.width, r.height])
            .unwrap_or_default()
    }

    /// Committed boxes as `[{ id, x, y, width, height }]`, bottom to top.
    pub fn rects(&self) -> Result<JsValue, JsValue> {
        // Flattened entries serialize as maps; emit plain objects instead of `Map`
        self.entries()
            .serialize(&Serializer::json_compatible())
            .map_err(js_error)
    }

    /// Source-pixel regions for the committed boxes.
    pub fn regions(&self, frame: &JsImageFrame, kind: JsRegionKind) -> Result<JsValue, JsValue> {
        let regions = plan_regions(self.editor.rects().geometry(), frame.inner(), kind.into())
            .map_err(js_error)?;
        serde_wasm_bindgen::to_value(&regions).map_err(js_error)
    }
}

impl JsEditorSession {
    pub(crate) fn from_config(config: EditorConfig) -> Self {
        Self {
            editor: RectangleEditor::new(config),
        }
    }

    pub(crate) fn entries(&self) -> Vec<Entry> {
        self.editor.rects().iter().copied().collect()
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_out_of_order_end_errors() {
        let mut session = JsEditorSession::new();
        assert!(session.drag_end().is_err());
    }

    #[wasm_bindgen_test]
    fn test_regions_serialize() {
        let mut session = JsEditorSession::new();
        session.add_default_box();
        let frame = JsImageFrame::new(400.0, 800.0, 1200, 2400);
        let regions = session.regions(&frame, JsRegionKind::Blackout).unwrap();
        assert!(regions.is_object());
    }

    #[wasm_bindgen_test]
    fn test_with_config_object() {
        let mut config = EditorConfig::default();
        config.min_size = 25.0;
        let value = serde_wasm_bindgen::to_value(&config).unwrap();

        let mut session = JsEditorSession::with_config(value).unwrap();
        session.drag_start(0.0, 0.0).unwrap();
        session.drag_update(20.0, 20.0).unwrap();
        assert_eq!(session.drag_end().unwrap(), JsDragOutcome::Discarded);
    }

    #[wasm_bindgen_test]
    fn test_with_config_rejects_garbage() {
        assert!(JsEditorSession::with_config(JsValue::from_str("nope")).is_err());
    }
}

//! Interactive rectangle editing for crop and redaction boxes.
//!
//! A [`RectangleEditor`] is one editing session. It owns the committed
//! rectangles, the box currently being drawn or dragged, and the undo/redo
//! history. The UI layer feeds it pointer events in three phases:
//!
//! ```text
//!            begin_drag (hit)          end_drag
//!   Idle  ------------------> Moving ----------> Idle
//!     |      begin_drag (miss)         end_drag
//!     +---------------------> Drawing ---------> Idle
//! ```
//!
//! Only one gesture can be active at a time. Phases that arrive out of order
//! are rejected with an [`EditorError`] and leave the session unchanged.

mod history;
mod set;

pub use history::{EditHistory, DEFAULT_HISTORY_LIMIT};
pub use set::{Entry, RectId, RectangleSet};

use std::mem;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Rect;

/// Errors for gesture phases received in the wrong state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditorError {
    /// `begin_drag` was called while another gesture is still active.
    #[error("A drag gesture is already in progress")]
    GestureInProgress,

    /// `update_drag` or `end_drag` was called with no active gesture.
    #[error("No drag gesture is in progress")]
    NoActiveGesture,
}

/// Whether finished moves are recorded in the undo history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovePolicy {
    /// Moves are not undoable; only drawing, adding and clearing are.
    #[default]
    Untracked,
    /// A move that changed a rectangle's position pushes an undo snapshot.
    Snapshot,
}

/// Tunables for an editing session.
///
/// Missing fields fall back to their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Drawings with width or height at or below this are discarded.
    pub min_size: f64,
    /// History policy for move gestures.
    pub move_policy: MovePolicy,
    /// Maximum number of undo snapshots.
    pub history_limit: usize,
    /// Keep moved rectangles inside this area (unclamped when `None`).
    pub move_bounds: Option<Rect>,
    /// Box created by [`RectangleEditor::add_default_box`].
    pub default_box: Rect,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_size: 10.0,
            move_policy: MovePolicy::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            move_bounds: None,
            default_box: Rect::new(100.0, 100.0, 150.0, 60.0),
        }
    }
}

/// Observable gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Idle,
    Drawing,
    Moving,
}

/// What a drag start turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// The point missed every rectangle; a new one is being drawn.
    Drawing,
    /// The point hit this rectangle; it is being moved.
    Moving(RectId),
}

/// Result of finishing a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// A new rectangle was added to the set.
    Committed(RectId),
    /// The drawing was too small and was dropped.
    Discarded,
    /// A rectangle finished moving.
    Moved(RectId),
}

#[derive(Debug, Clone)]
enum Gesture {
    Idle,
    Drawing {
        /// Anchored at the drag start; extents may be negative.
        current: Rect,
    },
    Moving {
        id: RectId,
        offset_x: f64,
        offset_y: f64,
        before: RectangleSet,
    },
}

/// One crop or redaction editing session.
#[derive(Debug, Clone)]
pub struct RectangleEditor {
    config: EditorConfig,
    rects: RectangleSet,
    gesture: Gesture,
    history: EditHistory<RectangleSet>,
    next_id: RectId,
}

impl Default for RectangleEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl RectangleEditor {
    pub fn new(config: EditorConfig) -> Self {
        let history = EditHistory::new(config.history_limit);
        Self {
            config,
            rects: RectangleSet::new(),
            gesture: Gesture::Idle,
            history,
            next_id: 1,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Committed rectangles, bottom to top.
    pub fn rects(&self) -> &RectangleSet {
        &self.rects
    }

    /// The rectangle being drawn, as dragged (not normalized).
    pub fn current(&self) -> Option<Rect> {
        match &self.gesture {
            Gesture::Drawing { current } => Some(*current),
            _ => None,
        }
    }

    /// Identifier of the rectangle being moved.
    pub fn selected(&self) -> Option<RectId> {
        match &self.gesture {
            Gesture::Moving { id, .. } => Some(*id),
            _ => None,
        }
    }

    pub fn state(&self) -> EditorState {
        match self.gesture {
            Gesture::Idle => EditorState::Idle,
            Gesture::Drawing { .. } => EditorState::Drawing,
            Gesture::Moving { .. } => EditorState::Moving,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Start a drag at `(px, py)`.
    ///
    /// Hitting a committed rectangle (topmost wins) starts moving it;
    /// otherwise a new zero-size rectangle is anchored at the point.
    pub fn begin_drag(&mut self, px: f64, py: f64) -> Result<DragMode, EditorError> {
        if !matches!(self.gesture, Gesture::Idle) {
            log::warn!("drag start at ({px}, {py}) ignored: gesture in progress");
            return Err(EditorError::GestureInProgress);
        }

        let hit = self
            .rects
            .hit_test(px, py)
            .and_then(|id| self.rects.get(id).map(|rect| (id, *rect)));

        match hit {
            Some((id, rect)) => {
                self.gesture = Gesture::Moving {
                    id,
                    offset_x: px - rect.x,
                    offset_y: py - rect.y,
                    before: self.rects.clone(),
                };
                Ok(DragMode::Moving(id))
            }
            None => {
                self.gesture = Gesture::Drawing {
                    current: Rect::at(px, py),
                };
                Ok(DragMode::Drawing)
            }
        }
    }

    /// Continue the active drag with the pointer at `(px, py)`.
    pub fn update_drag(&mut self, px: f64, py: f64) -> Result<(), EditorError> {
        match &mut self.gesture {
            Gesture::Idle => Err(EditorError::NoActiveGesture),
            Gesture::Drawing { current } => {
                current.width = px - current.x;
                current.height = py - current.y;
                Ok(())
            }
            Gesture::Moving {
                id,
                offset_x,
                offset_y,
                ..
            } => {
                if let Some(rect) = self.rects.get_mut(*id) {
                    let moved = rect.with_origin(px - *offset_x, py - *offset_y);
                    *rect = match &self.config.move_bounds {
                        Some(bounds) => moved.clamped_within(bounds),
                        None => moved,
                    };
                }
                Ok(())
            }
        }
    }

    /// Finish the active drag and return to idle.
    pub fn end_drag(&mut self) -> Result<DragOutcome, EditorError> {
        match mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle => Err(EditorError::NoActiveGesture),
            Gesture::Drawing { current } => {
                let rect = current.normalized();
                if rect.width <= self.config.min_size || rect.height <= self.config.min_size {
                    log::debug!(
                        "discarded {}x{} drawing below minimum size {}",
                        rect.width,
                        rect.height,
                        self.config.min_size
                    );
                    return Ok(DragOutcome::Discarded);
                }
                let id = self.commit(rect);
                log::debug!("committed rectangle {id}: {rect:?}");
                Ok(DragOutcome::Committed(id))
            }
            Gesture::Moving { id, before, .. } => {
                if self.config.move_policy == MovePolicy::Snapshot && before != self.rects {
                    self.history.commit(before);
                }
                Ok(DragOutcome::Moved(id))
            }
        }
    }

    /// Abandon the active drag without committing it.
    ///
    /// A drawing is dropped and a moved rectangle returns to where it started.
    /// Returns `false` if no gesture was active.
    pub fn cancel_drag(&mut self) -> bool {
        match mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle => false,
            Gesture::Drawing { .. } => true,
            Gesture::Moving { before, .. } => {
                self.rects = before;
                true
            }
        }
    }

    /// Restore the state before the last recorded edit.
    ///
    /// Returns `false` when there is nothing to undo or a gesture is active.
    pub fn undo(&mut self) -> bool {
        if self.gesture_blocks("undo") {
            return false;
        }
        match self.history.undo(self.rects.clone()) {
            Some(previous) => {
                self.rects = previous;
                log::debug!("undo: {} rectangles", self.rects.len());
                true
            }
            None => false,
        }
    }

    /// Re-apply the last undone edit.
    ///
    /// Returns `false` when there is nothing to redo or a gesture is active.
    pub fn redo(&mut self) -> bool {
        if self.gesture_blocks("redo") {
            return false;
        }
        match self.history.redo(self.rects.clone()) {
            Some(next) => {
                self.rects = next;
                log::debug!("redo: {} rectangles", self.rects.len());
                true
            }
            None => false,
        }
    }

    /// Drop the most recently committed rectangle without touching history.
    ///
    /// Returns `None` when the set is empty or a gesture is active.
    pub fn remove_last(&mut self) -> Option<Entry> {
        if self.gesture_blocks("remove_last") {
            return None;
        }
        self.rects.pop()
    }

    /// Commit the configured default box on top of the others.
    ///
    /// Returns `None` while a gesture is active.
    pub fn add_default_box(&mut self) -> Option<RectId> {
        if self.gesture_blocks("add_default_box") {
            return None;
        }
        let rect = self.config.default_box.normalized();
        Some(self.commit(rect))
    }

    /// Remove every rectangle as one undoable edit.
    ///
    /// Returns `false` (recording nothing) if the set was already empty or a
    /// gesture is active.
    pub fn clear(&mut self) -> bool {
        if self.gesture_blocks("clear") || self.rects.is_empty() {
            return false;
        }
        self.history.commit(self.rects.clone());
        self.rects.clear();
        true
    }

    /// Edits outside the gesture state machine wait until it is idle.
    fn gesture_blocks(&self, action: &str) -> bool {
        if matches!(self.gesture, Gesture::Idle) {
            return false;
        }
        log::warn!("{action} ignored: gesture in progress");
        true
    }

    fn commit(&mut self, rect: Rect) -> RectId {
        let id = self.next_id;
        self.next_id += 1;
        self.history.commit(self.rects.clone());
        self.rects.push(id, rect);
        id
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

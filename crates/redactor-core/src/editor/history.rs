//! Bounded undo/redo stacks of whole-state snapshots.

/// Default number of undo snapshots kept per session.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Undo and redo stacks holding snapshots of type `T`.
///
/// Committing a new edit clears the redo stack. When the undo stack exceeds
/// its limit the oldest snapshot is dropped.
#[derive(Debug, Clone)]
pub struct EditHistory<T> {
    undo: Vec<T>,
    redo: Vec<T>,
    limit: usize,
}

impl<T> Default for EditHistory<T> {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl<T> EditHistory<T> {
    /// Create empty history. A limit of zero is treated as one.
    pub fn new(limit: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Record the state as it was before a new edit.
    pub fn commit(&mut self, before: T) {
        self.redo.clear();
        self.push_undo(before);
    }

    /// Step back: returns the snapshot to restore, storing `current` for redo.
    ///
    /// Returns `None` (and drops nothing) when there is nothing to undo.
    pub fn undo(&mut self, current: T) -> Option<T> {
        let previous = self.undo.pop()?;
        self.redo.push(current);
        Some(previous)
    }

    /// Step forward: returns the snapshot to restore, storing `current` for undo.
    pub fn redo(&mut self, current: T) -> Option<T> {
        let next = self.redo.pop()?;
        self.push_undo(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    fn push_undo(&mut self, snapshot: T) {
        self.undo.push(snapshot);
        if self.undo.len() > self.limit {
            let excess = self.undo.len() - self.limit;
            self.undo.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history_is_noop() {
        let mut history: EditHistory<u32> = EditHistory::default();
        assert_eq!(history.undo(7), None);
        assert_eq!(history.redo(7), None);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_then_redo() {
        let mut history = EditHistory::new(10);
        history.commit(1);
        // current state is 2
        assert_eq!(history.undo(2), Some(1));
        assert!(history.can_redo());
        assert_eq!(history.redo(1), Some(2));
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_commit_clears_redo() {
        let mut history = EditHistory::new(10);
        history.commit(1);
        history.undo(2);
        assert_eq!(history.redo_len(), 1);

        history.commit(1);
        assert_eq!(history.redo_len(), 0);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = EditHistory::new(3);
        for i in 0..5 {
            history.commit(i);
        }
        assert_eq!(history.undo_len(), 3);
        assert_eq!(history.undo(99), Some(4));
        assert_eq!(history.undo(4), Some(3));
        assert_eq!(history.undo(3), Some(2));
        assert_eq!(history.undo(2), None);
    }

    #[test]
    fn test_redo_respects_limit() {
        let mut history = EditHistory::new(2);
        history.commit(0);
        history.commit(1);
        assert_eq!(history.undo(2), Some(1));
        history.redo(1);
        history.commit(2);
        assert_eq!(history.undo_len(), 2);
    }

    #[test]
    fn test_zero_limit_keeps_one() {
        let mut history = EditHistory::new(0);
        history.commit(1);
        history.commit(2);
        assert_eq!(history.limit(), 1);
        assert_eq!(history.undo(3), Some(2));
        assert_eq!(history.undo(2), None);
    }
}

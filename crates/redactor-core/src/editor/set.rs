//! Committed rectangles of an editing session, in insertion order.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Opaque rectangle identifier, unique within one editing session.
pub type RectId = u64;

/// A committed rectangle and its identifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: RectId,
    #[serde(flatten)]
    pub rect: Rect,
}

/// Ordered collection of committed rectangles.
///
/// Later entries are drawn on top of earlier ones, which is why hit testing
/// scans from the back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RectangleSet {
    entries: Vec<Entry>,
}

impl RectangleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rectangle on top of the others.
    pub fn push(&mut self, id: RectId, rect: Rect) {
        self.entries.push(Entry { id, rect });
    }

    pub fn get(&self, id: RectId) -> Option<&Rect> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.rect)
    }

    pub fn get_mut(&mut self, id: RectId) -> Option<&mut Rect> {
        self.entries.iter_mut().find(|e| e.id == id).map(|e| &mut e.rect)
    }

    /// Topmost rectangle containing the point.
    pub fn hit_test(&self, px: f64, py: f64) -> Option<RectId> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.rect.contains(px, py))
            .map(|e| e.id)
    }

    /// Remove and return the most recently added entry.
    pub fn pop(&mut self) -> Option<Entry> {
        self.entries.pop()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Rectangles without their identifiers, bottom to top.
    pub fn geometry(&self) -> Vec<Rect> {
        self.entries.iter().map(|e| e.rect).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RectangleSet {
        let mut set = RectangleSet::new();
        set.push(1, Rect::new(0.0, 0.0, 100.0, 100.0));
        set.push(2, Rect::new(50.0, 50.0, 100.0, 100.0));
        set.push(3, Rect::new(300.0, 300.0, 20.0, 20.0));
        set
    }

    #[test]
    fn test_hit_test_topmost_wins() {
        let set = sample();
        assert_eq!(set.hit_test(75.0, 75.0), Some(2));
        assert_eq!(set.hit_test(10.0, 10.0), Some(1));
        assert_eq!(set.hit_test(310.0, 310.0), Some(3));
        assert_eq!(set.hit_test(250.0, 10.0), None);
    }

    #[test]
    fn test_get_mut_updates_in_place() {
        let mut set = sample();
        if let Some(r) = set.get_mut(3) {
            r.x = 0.0;
        }
        assert_eq!(set.get(3).map(|r| r.x), Some(0.0));
        assert!(set.get(42).is_none());
    }

    #[test]
    fn test_pop_removes_latest() {
        let mut set = sample();
        assert_eq!(set.pop().map(|e| e.id), Some(3));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_geometry_order() {
        let set = sample();
        let g = set.geometry();
        assert_eq!(g.len(), 3);
        assert_eq!(g[2], Rect::new(300.0, 300.0, 20.0, 20.0));
    }
}

//! Axis-aligned rectangles in preview space and source-pixel space.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, y grows downward
//! - [`Rect`] uses floating-point preview coordinates
//! - [`PixelRegion`] uses integral source-image pixels
//!
//! A rectangle being drawn can carry a negative width or height: the sign
//! records which way the pointer moved from the anchor. [`Rect::normalized`]
//! flips such a rectangle into the equivalent positive-size form.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in preview coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (top-left x)
    pub x: f64,
    /// Top edge (top-left y)
    pub y: f64,
    /// Width, negative while dragging leftward
    pub width: f64,
    /// Height, negative while dragging upward
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Zero-size rectangle anchored at a point.
    pub fn at(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0, 0.0)
    }

    /// Return the same footprint with non-negative width and height.
    ///
    /// A negative extent moves the origin by that extent and flips its sign,
    /// so the covered area is unchanged.
    pub fn normalized(self) -> Self {
        let (x, width) = if self.width < 0.0 {
            (self.x + self.width, -self.width)
        } else {
            (self.x, self.width)
        };
        let (y, height) = if self.height < 0.0 {
            (self.y + self.height, -self.height)
        } else {
            (self.y, self.height)
        };
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check if the rectangle has non-negative extents.
    pub fn is_normalized(&self) -> bool {
        self.width >= 0.0 && self.height >= 0.0
    }

    /// Inclusive point containment on a normalized rectangle.
    #[inline]
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    /// Absolute covered area (sign of the extents is ignored).
    pub fn area(&self) -> f64 {
        (self.width * self.height).abs()
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Same size, new top-left corner.
    pub fn with_origin(self, x: f64, y: f64) -> Self {
        Self { x, y, ..self }
    }

    /// Shift the origin so the rectangle lies inside `bounds` where possible.
    ///
    /// Size is never changed. A rectangle larger than `bounds` is pinned to the
    /// bounds' top-left corner on that axis.
    pub fn clamped_within(self, bounds: &Rect) -> Self {
        let max_x = bounds.right() - self.width;
        let max_y = bounds.bottom() - self.height;
        let x = self.x.min(max_x).max(bounds.x);
        let y = self.y.min(max_y).max(bounds.y);
        self.with_origin(x, y)
    }
}

/// Integral rectangle in source-image pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRegion {
    pub origin_x: u32,
    pub origin_y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRegion {
    pub fn new(origin_x: u32, origin_y: u32, width: u32, height: u32) -> Self {
        Self {
            origin_x,
            origin_y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u64 {
        self.origin_x as u64 + self.width as u64
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u64 {
        self.origin_y as u64 + self.height as u64
    }

    /// Check if the region lies fully inside an image of the given size.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right() <= width as u64 && self.bottom() <= height as u64
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

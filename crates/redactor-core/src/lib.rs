//! Redactor Core - crop and redaction editing library
//!
//! This crate provides the computational core behind a capture, crop and
//! redact workflow: geometry for preview-space rectangles, the mapping from
//! preview space to source pixels, an interactive rectangle editor with
//! undo/redo, and the image pipeline that turns committed boxes into a
//! cropped or blacked-out JPEG.
//!
//! # Data Flow
//!
//! 1. Pointer drags drive a [`RectangleEditor`] session
//! 2. Committed rectangles are mapped through [`map_to_source`]
//! 3. The resulting [`Region`]s are handed to an image transform provider
//! 4. The transformed image URI is optionally saved to the media library

pub mod decode;
pub mod editor;
pub mod encode;
pub mod geometry;
pub mod mapping;
pub mod providers;
pub mod store;
pub mod transform;
pub mod workflow;

pub use editor::{
    DragMode, DragOutcome, EditorConfig, EditorError, EditorState, MovePolicy, RectId,
    RectangleEditor,
};
pub use geometry::{PixelRegion, Rect};
pub use mapping::{guide_frame, map_to_source, GuideFrame, ImageFrame, MapError};
pub use providers::ProviderError;
pub use transform::apply_regions;

use serde::{Deserialize, Serialize};

/// What an image transform does with a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
    /// Keep only the pixels inside the region.
    Crop,
    /// Paint the region solid black.
    #[default]
    Blackout,
}

/// A source-pixel region handed to an image transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub kind: RegionKind,
    pub origin_x: u32,
    pub origin_y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    /// Create a region of the given kind from a mapped pixel rectangle.
    pub fn new(kind: RegionKind, pixels: PixelRegion) -> Self {
        Self {
            kind,
            origin_x: pixels.origin_x,
            origin_y: pixels.origin_y,
            width: pixels.width,
            height: pixels.height,
        }
    }

    /// Crop region covering the given pixels.
    pub fn crop(pixels: PixelRegion) -> Self {
        Self::new(RegionKind::Crop, pixels)
    }

    /// Blackout region covering the given pixels.
    pub fn blackout(pixels: PixelRegion) -> Self {
        Self::new(RegionKind::Blackout, pixels)
    }

    /// The pixel rectangle without its kind.
    pub fn pixels(&self) -> PixelRegion {
        PixelRegion {
            origin_x: self.origin_x,
            origin_y: self.origin_y,
            width: self.width,
            height: self.height,
        }
    }

    /// Check if the region covers no pixels
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

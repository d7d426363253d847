//! Preview-space to source-pixel coordinate mapping.
//!
//! The preview shows the image fitted to the screen, so a rectangle drawn on
//! the preview has to be rescaled before it can crop or black out the
//! full-resolution file. When the preview and source aspect ratios differ,
//! part of the preview is letterboxing and the scale is taken from the axis
//! the image actually fills.
//!
//! # Algorithm
//!
//! - `source_aspect > preview_aspect`: image fills the preview width, so
//!   `scale_x = source_width / display_width` and the content height is
//!   `display_width / source_aspect`
//! - otherwise: image fills the preview height, so
//!   `scale_y = source_height / display_height` and the content width is
//!   `display_height * source_aspect`
//!
//! Mapping is one-directional (preview to source). Results are rounded to
//! whole pixels and trimmed at the right and bottom edges of the source.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{PixelRegion, Rect};

/// Relative tolerance for treating two aspect ratios as equal.
const ASPECT_EPSILON: f64 = 1e-9;

/// Errors produced while mapping preview rectangles to source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MapError {
    /// The preview or source size has not been measured yet.
    #[error("Image frame has not been measured")]
    UnmeasuredFrame,

    /// The mapped region has no area after clamping to the source.
    #[error("Mapped region has no area")]
    DegenerateRegion,
}

/// Size of an image as displayed in the preview and as stored on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageFrame {
    /// Width of the rendered preview.
    pub display_width: f64,
    /// Height of the rendered preview.
    pub display_height: f64,
    /// Native pixel width of the source image.
    pub source_width: u32,
    /// Native pixel height of the source image.
    pub source_height: u32,
}

impl ImageFrame {
    pub fn new(
        display_width: f64,
        display_height: f64,
        source_width: u32,
        source_height: u32,
    ) -> Self {
        Self {
            display_width,
            display_height,
            source_width,
            source_height,
        }
    }

    /// Check if both the preview and the source have a non-zero size.
    pub fn is_measured(&self) -> bool {
        self.display_width > 0.0
            && self.display_height > 0.0
            && self.source_width > 0
            && self.source_height > 0
    }

    /// Preview width divided by preview height.
    pub fn preview_aspect(&self) -> f64 {
        self.display_width / self.display_height
    }

    /// Source width divided by source height.
    pub fn source_aspect(&self) -> f64 {
        self.source_width as f64 / self.source_height as f64
    }

    /// Per-axis factors converting preview units to source pixels.
    ///
    /// # Errors
    ///
    /// Returns `MapError::UnmeasuredFrame` if any dimension is zero.
    pub fn scale_factors(&self) -> Result<(f64, f64), MapError> {
        if !self.is_measured() {
            return Err(MapError::UnmeasuredFrame);
        }

        let source_w = self.source_width as f64;
        let source_h = self.source_height as f64;
        let preview_aspect = self.preview_aspect();
        let source_aspect = self.source_aspect();

        if ((source_aspect - preview_aspect) / preview_aspect).abs() <= ASPECT_EPSILON {
            let scale = source_w / self.display_width;
            return Ok((scale, scale));
        }

        if source_aspect > preview_aspect {
            // Letterboxed top/bottom: content spans the full preview width
            let scale_x = source_w / self.display_width;
            let effective_height = self.display_width / source_aspect;
            Ok((scale_x, source_h / effective_height))
        } else {
            // Letterboxed left/right: content spans the full preview height
            let scale_y = source_h / self.display_height;
            let effective_width = self.display_height * source_aspect;
            Ok((source_w / effective_width, scale_y))
        }
    }
}

/// Map a preview-space rectangle to a pixel region of the source image.
///
/// The rectangle is normalized first, so an in-progress drag rectangle maps
/// to the area it visibly covers.
///
/// # Behavior
///
/// - Origin, width and height are each rounded to the nearest non-negative
///   whole pixel
/// - Width and height are trimmed so the region ends inside the source;
///   the origin is never moved
///
/// # Errors
///
/// - `MapError::UnmeasuredFrame` if the frame has a zero dimension
/// - `MapError::DegenerateRegion` if nothing is left after trimming
pub fn map_to_source(rect: Rect, frame: &ImageFrame) -> Result<PixelRegion, MapError> {
    let (scale_x, scale_y) = frame.scale_factors()?;
    let rect = rect.normalized();

    let origin_x = round_px(rect.x * scale_x);
    let origin_y = round_px(rect.y * scale_y);
    let width = round_px(rect.width * scale_x).min(frame.source_width.saturating_sub(origin_x));
    let height = round_px(rect.height * scale_y).min(frame.source_height.saturating_sub(origin_y));

    if width == 0 || height == 0 {
        return Err(MapError::DegenerateRegion);
    }

    Ok(PixelRegion {
        origin_x,
        origin_y,
        width,
        height,
    })
}

#[inline]
fn round_px(value: f64) -> u32 {
    // NaN maps to 0 via max; `as` saturates above u32::MAX
    value.round().max(0.0) as u32
}

/// Capture guide presets drawn over the camera preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuideFrame {
    /// Landscape ID-card style frame (height = 0.6 × width).
    Document,
    /// Portrait mail-piece frame (height = 1.58 × width).
    MailPiece,
}

impl GuideFrame {
    /// Fraction of the layout width the frame occupies.
    const WIDTH_FRACTION: f64 = 0.8;

    fn height_ratio(self) -> f64 {
        match self {
            GuideFrame::Document => 0.6,
            GuideFrame::MailPiece => 1.58,
        }
    }

    /// Frame size for a camera layout of the given width.
    pub fn size(self, layout_width: f64) -> (f64, f64) {
        let width = layout_width * Self::WIDTH_FRACTION;
        (width, width * self.height_ratio())
    }

    /// Frame rectangle centered in the camera layout.
    pub fn rect(self, layout_width: f64, layout_height: f64) -> Rect {
        let (width, height) = self.size(layout_width);
        guide_frame(layout_width, layout_height, width, height)
    }
}

/// Center a frame of the given size inside the camera layout.
pub fn guide_frame(
    layout_width: f64,
    layout_height: f64,
    frame_width: f64,
    frame_height: f64,
) -> Rect {
    Rect::new(
        (layout_width - frame_width) / 2.0,
        (layout_height - frame_height) / 2.0,
        frame_width,
        frame_height,
    )
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for measured frames with independent preview and source sizes.
    fn frame_strategy() -> impl Strategy<Value = ImageFrame> {
        (100.0f64..=2000.0, 100.0f64..=2000.0, 100u32..=6000, 100u32..=6000)
            .prop_map(|(dw, dh, sw, sh)| ImageFrame::new(dw, dh, sw, sh))
    }

    proptest! {
        /// Property: The full preview maps to the full source.
        #[test]
        fn prop_full_preview_covers_source(frame in frame_strategy()) {
            let full = Rect::new(0.0, 0.0, frame.display_width, frame.display_height);
            let region = map_to_source(full, &frame).unwrap();

            prop_assert_eq!(region.origin_x, 0);
            prop_assert_eq!(region.origin_y, 0);
            prop_assert!((region.width as i64 - frame.source_width as i64).abs() <= 1);
            prop_assert!((region.height as i64 - frame.source_height as i64).abs() <= 1);
        }

        /// Property: Mapped regions never extend past the source.
        #[test]
        fn prop_mapped_region_within_source(
            frame in frame_strategy(),
            (x, y, w, h) in (
                -200.0f64..=2000.0,
                -200.0f64..=2000.0,
                -800.0f64..=800.0,
                -800.0f64..=800.0,
            ),
        ) {
            if let Ok(region) = map_to_source(Rect::new(x, y, w, h), &frame) {
                prop_assert!(region.fits_within(frame.source_width, frame.source_height));
                prop_assert!(!region.is_empty());
            }
        }

        /// Property: Scale factors are positive and finite for measured frames.
        #[test]
        fn prop_scale_factors_positive(frame in frame_strategy()) {
            let (sx, sy) = frame.scale_factors().unwrap();
            prop_assert!(sx.is_finite() && sx > 0.0);
            prop_assert!(sy.is_finite() && sy > 0.0);
        }
    }
}

//! Capture, export and save steps of an editing session.
//!
//! These functions glue the editor and mapper to the host collaborators.
//! The editor is only ever borrowed immutably here, so a failed capture,
//! transform or save leaves the session's rectangles and history exactly as
//! they were and the user can retry.

use thiserror::Error;

use crate::editor::RectangleEditor;
use crate::geometry::Rect;
use crate::mapping::{map_to_source, ImageFrame, MapError};
use crate::providers::{
    CaptureProvider, ImageTransformProvider, MeasurementProvider, PersistenceProvider,
    ProviderError,
};
use crate::{Region, RegionKind};

/// Errors from exporting a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// A captured photo paired with its preview geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Captured {
    pub uri: String,
    pub frame: ImageFrame,
}

/// Take a picture and describe it for a preview of the given size.
pub fn capture(
    provider: &mut impl CaptureProvider,
    display_width: f64,
    display_height: f64,
) -> Result<Captured, ProviderError> {
    let photo = provider.take_picture().inspect_err(|e| log::warn!("capture failed: {e}"))?;
    Ok(Captured {
        frame: ImageFrame::new(display_width, display_height, photo.width, photo.height),
        uri: photo.uri,
    })
}

/// Build a frame for an already stored image shown at the given size.
pub fn measure_frame(
    provider: &impl MeasurementProvider,
    uri: &str,
    display_width: f64,
    display_height: f64,
) -> Result<ImageFrame, ProviderError> {
    let (width, height) = provider.measure(uri)?;
    Ok(ImageFrame::new(display_width, display_height, width, height))
}

/// Map preview rectangles to source regions of one kind.
///
/// Rectangles that end up with no area are skipped.
///
/// # Errors
///
/// Returns `MapError::UnmeasuredFrame` if the frame has not been measured.
pub fn plan_regions(
    rects: impl IntoIterator<Item = Rect>,
    frame: &ImageFrame,
    kind: RegionKind,
) -> Result<Vec<Region>, MapError> {
    let mut regions = Vec::new();
    for rect in rects {
        match map_to_source(rect, frame) {
            Ok(pixels) => regions.push(Region::new(kind, pixels)),
            Err(MapError::DegenerateRegion) => {
                log::warn!("skipping rectangle with no area in source: {rect:?}");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(regions)
}

/// Apply the session's rectangles to the image at `uri`.
///
/// With `RegionKind::Blackout` every committed rectangle is redacted. With
/// `RegionKind::Crop` only the topmost rectangle is used, since a crop
/// session has a single crop box. Returns `uri` unchanged when nothing
/// remains to apply.
pub fn export(
    editor: &RectangleEditor,
    frame: &ImageFrame,
    uri: &str,
    kind: RegionKind,
    transform: &mut impl ImageTransformProvider,
) -> Result<String, ExportError> {
    let rects = editor.rects().geometry();
    let rects = match kind {
        RegionKind::Crop => rects.last().copied().into_iter().collect(),
        RegionKind::Blackout => rects,
    };

    let regions = plan_regions(rects, frame, kind)?;
    if regions.is_empty() {
        return Ok(uri.to_string());
    }

    transform
        .crop_or_overlay(uri, &regions)
        .inspect_err(|e| log::warn!("transform of {uri} failed: {e}"))
        .map_err(ExportError::from)
}

/// [`export`], then save the result to the media library.
pub fn export_and_save(
    editor: &RectangleEditor,
    frame: &ImageFrame,
    uri: &str,
    kind: RegionKind,
    transform: &mut impl ImageTransformProvider,
    persistence: &mut impl PersistenceProvider,
) -> Result<String, ExportError> {
    let result = export(editor, frame, uri, kind, transform)?;
    persistence
        .save_to_library(&result)
        .inspect_err(|e| log::warn!("saving {result} failed: {e}"))?;
    Ok(result)
}

/// Crop a captured photo to a fixed guide rectangle (camera-screen flow).
pub fn crop_to_guide(
    captured: &Captured,
    guide: Rect,
    transform: &mut impl ImageTransformProvider,
) -> Result<String, ExportError> {
    let pixels = map_to_source(guide, &captured.frame)?;
    let uri = transform.crop_or_overlay(&captured.uri, &[Region::crop(pixels)])?;
    Ok(uri)
}

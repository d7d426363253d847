//! Collaborators supplied by the host application.
//!
//! Camera access, image rendering and media-library storage live outside this
//! crate. The host implements these traits over its platform APIs; the
//! [`crate::store::FileImageStore`] implementation covers measuring,
//! transforming and saving for plain files.
//!
//! Calls are blocking from the core's point of view. Hosts with an async UI
//! run them on their own executor and resume the session with the result;
//! the core adds no timeout of its own.

use thiserror::Error;

use crate::Region;

/// Failures reported by collaborators. All are recoverable by retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The camera was unavailable or the capture failed.
    #[error("Capture failed: {0}")]
    Capture(String),

    /// The region list was invalid or the image could not be processed.
    #[error("Image transform failed: {0}")]
    Transform(String),

    /// The image could not be read to find its size.
    #[error("Measuring image failed: {0}")]
    Measure(String),

    /// The media library write failed.
    #[error("Save failed: {0}")]
    Save(String),

    /// The user has not granted camera or media-library access.
    #[error("Permission denied")]
    PermissionDenied,
}

/// A freshly captured photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPhoto {
    pub uri: String,
    /// Upright pixel width.
    pub width: u32,
    /// Upright pixel height.
    pub height: u32,
}

/// Takes pictures with the device camera.
pub trait CaptureProvider {
    fn take_picture(&mut self) -> Result<CapturedPhoto, ProviderError>;
}

/// Crops or blacks out regions of an image, producing a new image URI.
pub trait ImageTransformProvider {
    fn crop_or_overlay(&mut self, uri: &str, regions: &[Region]) -> Result<String, ProviderError>;
}

/// Saves an image into the device media library.
pub trait PersistenceProvider {
    fn save_to_library(&mut self, uri: &str) -> Result<(), ProviderError>;
}

/// Reports the upright pixel size of an image.
pub trait MeasurementProvider {
    fn measure(&self, uri: &str) -> Result<(u32, u32), ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display() {
        assert_eq!(
            ProviderError::Capture("camera busy".into()).to_string(),
            "Capture failed: camera busy"
        );
        assert_eq!(
            ProviderError::Measure("no such file".into()).to_string(),
            "Measuring image failed: no such file"
        );
        assert_eq!(ProviderError::PermissionDenied.to_string(), "Permission denied");
    }
}

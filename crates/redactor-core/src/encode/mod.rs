//! Image encoding for transformed photos.
//!
//! Cropped and redacted images are written back as JPEG, the format the
//! capture side produces and the media library expects.

mod jpeg;

pub use jpeg::{encode_jpeg, EncodeError, DEFAULT_QUALITY};

//! Image decoding for captured and loaded photos.
//!
//! This module provides:
//! - Decoding JPEG (and PNG) bytes to upright RGB8 pixels
//! - Reading upright dimensions without a full decode, for measuring frames
//! - EXIF orientation lookup
//!
//! All operations are synchronous and allocate a fresh buffer per call.

mod jpeg;
mod types;

pub use jpeg::{decode_jpeg, read_dimensions, read_orientation};
pub use types::{DecodeError, DecodedImage, Orientation};

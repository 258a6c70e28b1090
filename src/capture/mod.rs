//! Frame acquisition layer
//!
//! Canonical pixel buffers, normalization of encoded image bytes, and the
//! live-stream prefilter gate. Actual camera/scanner acquisition stays with
//! the caller; this layer only defines the frame contract the pipeline
//! consumes.

pub mod frame;
pub mod prefilter;

pub use frame::{normalize_image, PixelBuffer};
pub use prefilter::StreamPrefilter;

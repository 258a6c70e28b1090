//! Canonical pixel buffers and image normalization
//!
//! Every frame entering the pipeline is a packed 3-channel RGB buffer.
//! [`normalize_image`] turns arbitrary encoded image bytes (camera uploads,
//! phone photos) into that canonical form, applying the EXIF orientation so
//! portrait phone captures arrive upright.

use image::{metadata::Orientation, DynamicImage, ImageDecoder, ImageReader};
use std::io::Cursor;
use tracing::debug;

use crate::error::RecognitionError;

/// A normalized frame: packed RGB, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Raw RGB pixel data, `width * height * 3` bytes.
    pub data: Vec<u8>,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
}

impl PixelBuffer {
    /// Wrap raw RGB data.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self { data, width, height }
    }

    /// Frame dimensions as (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Structural sanity check: non-zero dimensions and a consistent buffer
    /// length.
    pub fn is_well_formed(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.data.len() == (self.width as usize) * (self.height as usize) * 3
    }
}

/// Decode encoded image bytes into a canonical [`PixelBuffer`].
///
/// Applies the embedded EXIF orientation and converts to RGB8. Empty input,
/// undecodable bytes, and zero-dimension results all surface as
/// [`RecognitionError::InvalidImage`].
pub fn normalize_image(bytes: &[u8]) -> Result<PixelBuffer, RecognitionError> {
    if bytes.is_empty() {
        return Err(RecognitionError::InvalidImage);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|_| RecognitionError::InvalidImage)?;
    let mut decoder = reader
        .into_decoder()
        .map_err(|_| RecognitionError::InvalidImage)?;

    // Phone captures carry their rotation in EXIF rather than the pixels.
    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);

    let mut img =
        DynamicImage::from_decoder(decoder).map_err(|_| RecognitionError::InvalidImage)?;
    img.apply_orientation(orientation);

    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return Err(RecognitionError::InvalidImage);
    }

    debug!("Normalized image to {}x{} RGB frame", width, height);

    Ok(PixelBuffer::new(rgb.into_raw(), width, height))
}

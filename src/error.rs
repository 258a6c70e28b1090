//! Pipeline error surface
//!
//! Only categorically-fatal conditions are represented here. Malformed item
//! triples, unmatched keywords, and absent optional fields are absorbed as
//! defaults by the components themselves and never surface as errors.

use thiserror::Error;

/// Fatal recognition pipeline errors.
#[derive(Debug, Error)]
pub enum RecognitionError {
    /// Image source was empty, undecodable, or had zero dimensions.
    #[error("image source could not be decoded into a usable pixel buffer")]
    InvalidImage,

    /// The QR path was explicitly selected but zero payload strings were supplied.
    #[error("QR payload set is empty")]
    EmptyQrSet,

    /// No string in the QR set qualifies as a header payload.
    #[error("no header-shaped payload among {0} decoded QR string(s)")]
    MissingHeader(usize),

    /// The OCR path produced no usable text at all.
    #[error("OCR produced no usable text")]
    NoContentRecognized,

    /// The external QR symbol detector failed.
    #[error("QR detection failed")]
    QrDetection(#[source] anyhow::Error),

    /// All OCR collaborator invocations failed.
    #[error("OCR recognition failed")]
    Ocr(#[source] anyhow::Error),
}

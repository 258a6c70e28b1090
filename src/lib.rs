//! invoice-scan - Taiwanese e-invoice recognition pipeline
//!
//! Turns a retail invoice image, or pre-extracted recognition signals
//! (decoded QR payload strings, OCR text), into a structured, categorized
//! record. The pipeline is QR-first: the e-invoice QR pair is authoritative
//! when present, and OCR field recovery is the best-effort fallback for
//! paper invoices.
//!
//! The crate owns the orchestration, the parsers, the keyword
//! classification, and the live-stream prefilter gate. Image acquisition,
//! the QR symbol decoder, the OCR engines, and persistence are external
//! collaborators injected through the traits in [`pipeline`].

pub mod capture;
pub mod classify;
pub mod config;
pub mod error;
pub mod invoice;
pub mod parse;
pub mod pipeline;
pub mod taxonomy;

pub use capture::{normalize_image, PixelBuffer, StreamPrefilter};
pub use error::RecognitionError;
pub use invoice::{Invoice, InvoiceSource, LineItem, OcrText, RecognitionInput};
pub use pipeline::{InvoiceStore, OcrProfile, QrDetector, Recognizer, TextRecognizer};
pub use taxonomy::{Category, SubCategory};

//! Signal-to-invoice parsers
//!
//! Turns pre-extracted recognition signals (decoded QR payload strings, raw
//! OCR text) into draft invoices. Both parsers are pure and perform no I/O;
//! classification happens downstream.

pub mod ocr;
pub mod qr;

pub use ocr::recover_fields;
pub use qr::{parse_qr_set, roc_to_date};

//! Taiwanese e-invoice QR payload parser
//!
//! An e-invoice prints two QR symbols. The left one ("header") is a
//! fixed-offset record carrying the invoice number, ROC-calendar date,
//! amounts, and the buyer/seller tax ids. The right one ("items") is a
//! colon-delimited list: four preamble tokens followed by
//! (name, quantity, unit price) triples.
//!
//! Malformed item triples are tolerated and dropped silently; only a missing
//! header is fatal. This is a deliberate best-effort contract: trailing
//! garbage from a partially-scanned symbol must not discard the invoice.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::RecognitionError;
use crate::invoice::{Invoice, InvoiceSource, LineItem};

/// Colon count at which a payload is classified as the items payload.
///
/// The four preamble tokens alone produce three delimiters and the smallest
/// real payload (one item triple) adds three more for six, while genuine
/// header payloads contain none. This is a shape heuristic, not a grammar:
/// an item name containing many literal colons could in principle flip a
/// header's classification. Known fragility, preserved as-is.
const ITEMS_MIN_DELIMITERS: usize = 5;

/// Number of preamble tokens (encrypted block / counters) before the first
/// item triple in the items payload.
const PREAMBLE_TOKENS: usize = 4;

/// A header candidate must cover all fixed field offsets (real headers are
/// 77 bytes).
const HEADER_MIN_LEN: usize = 53;

/// Parse a set of raw decoded QR strings into a draft invoice.
///
/// The result carries source [`InvoiceSource::Qr`] and unclassified items.
/// Fails only on an empty set or when no string qualifies as a header; item
/// decoding problems never fail the parse.
pub fn parse_qr_set(payloads: &[String]) -> Result<Invoice, RecognitionError> {
    if payloads.is_empty() {
        return Err(RecognitionError::EmptyQrSet);
    }

    let (header, items) = split_payloads(payloads)?;
    debug!(
        "QR set split: header {} byte(s), items payload {}",
        header.len(),
        items.map_or("absent".into(), |p| format!("{} byte(s)", p.len()))
    );

    let mut invoice = decode_header(header);
    if let Some(payload) = items {
        invoice.items = decode_items(payload);
    }

    debug!(
        "Parsed QR invoice {} ({} item(s))",
        invoice.number,
        invoice.items.len()
    );
    Ok(invoice)
}

/// Classify the decoded strings into (header, optional items payload) by
/// structural shape.
fn split_payloads(payloads: &[String]) -> Result<(&str, Option<&str>), RecognitionError> {
    let mut header = None;
    let mut items = None;

    for payload in payloads {
        if payload.matches(':').count() >= ITEMS_MIN_DELIMITERS {
            if items.is_none() {
                items = Some(payload.as_str());
            }
        } else if header.is_none() && payload.len() >= HEADER_MIN_LEN {
            header = Some(payload.as_str());
        }
    }

    match header {
        Some(header) => Ok((header, items)),
        None => Err(RecognitionError::MissingHeader(payloads.len())),
    }
}

/// Decode the fixed-offset header payload. Fields whose offsets fall outside
/// the payload, or that fail to parse, absorb to their empty defaults.
fn decode_header(header: &str) -> Invoice {
    let mut invoice = Invoice::draft(InvoiceSource::Qr);

    invoice.number = header.get(0..10).unwrap_or_default().to_string();
    invoice.date = header.get(10..17).and_then(roc_to_date);
    invoice.total = header.get(29..37).map_or(0.0, parse_amount);
    invoice.buyer_id = header
        .get(37..45)
        .filter(|field| field.bytes().any(|b| b != b'0'))
        .map(str::to_string);
    invoice.seller_id = header.get(45..53).map(str::to_string);

    invoice
}

/// Convert a 7-digit ROC-calendar date (`YYYMMDD`, year offset 1911) to a
/// calendar date. `"1110708"` converts to 2022-07-08. Out-of-range month or
/// day yields `None`.
pub fn roc_to_date(roc: &str) -> Option<NaiveDate> {
    if roc.len() != 7 || !roc.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = roc[..3].parse::<i32>().ok()? + 1911;
    let month = roc[3..5].parse::<u32>().ok()?;
    let day = roc[5..7].parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse the 8-byte amount field. Some producers encode decimal, others
/// uppercase hexadecimal; an all-digit field reads as decimal, an all-hex
/// field as base 16, and anything else absorbs to zero.
fn parse_amount(field: &str) -> f64 {
    if field.is_empty() {
        return 0.0;
    }
    if field.bytes().all(|b| b.is_ascii_digit()) {
        field.parse::<u64>().map_or(0.0, |v| v as f64)
    } else if field.bytes().all(|b| matches!(b, b'0'..=b'9' | b'A'..=b'F')) {
        u64::from_str_radix(field, 16).map_or(0.0, |v| v as f64)
    } else {
        0.0
    }
}

/// Decode the colon-delimited items payload. Triples that fail to parse
/// (short trailing group, empty name, non-numeric or non-positive quantity,
/// negative price) are skipped; decoding continues with the next triple.
fn decode_items(payload: &str) -> Vec<LineItem> {
    let tokens: Vec<&str> = payload.split(':').collect();
    if tokens.len() <= PREAMBLE_TOKENS {
        return Vec::new();
    }

    let mut items = Vec::new();
    for group in tokens[PREAMBLE_TOKENS..].chunks(3) {
        let (name, qty, price) = match group {
            [name, qty, price] => (*name, *qty, *price),
            _ => continue,
        };
        let Ok(quantity) = qty.parse::<f64>() else {
            continue;
        };
        let Ok(unit_price) = price.parse::<f64>() else {
            continue;
        };
        if name.is_empty() || quantity <= 0.0 || unit_price < 0.0 {
            continue;
        }
        items.push(LineItem::new(name, quantity, unit_price));
    }
    items
}

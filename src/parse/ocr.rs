//! OCR text field recovery
//!
//! Recovers structured invoice fields from raw OCR output using ordered
//! pattern tables with first-match-wins semantics per field. Two recognition
//! profiles feed this component (see [`OcrText`]); fields are searched in
//! Profile-A text first, then Profile-B. That priority is a policy choice:
//! when both channels contain a candidate for the same field, the general
//! profile's match is taken.
//!
//! Line items are not recoverable from unstructured OCR text; the recovered
//! draft always carries an empty item list. A completely empty input yields
//! an empty draft, which is a valid result here; treating blank OCR output as
//! a recognition failure is the orchestrator's call, not this component's.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::invoice::{Invoice, InvoiceSource, OcrText};

/// Invoice number shape: 2 uppercase letters followed by 8 digits.
static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]{2}\d{8}").expect("valid pattern"));

/// ROC-calendar date, e.g. `111年7月8日` or `111/07/08`. Tried before the
/// 4-digit-year pattern.
static ROC_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{3})[年/\-](\d{1,2})[月/\-](\d{1,2})").expect("valid pattern")
});

/// Already-converted 4-digit-year date, e.g. `2022-07-08`.
static AD_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})[年/\-](\d{1,2})[月/\-](\d{1,2})").expect("valid pattern")
});

/// Grand-total label variants in priority order. The first label that
/// matches anywhere in the text wins, regardless of text position.
static TOTAL_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    ["總計", "合計", "總額"]
        .iter()
        .map(|label| {
            Regex::new(&format!(r"{label}[：:]\s*\$?\s*(\d+)")).expect("valid pattern")
        })
        .collect()
});

/// Recover a draft invoice from OCR text. Never fails; unmatched fields stay
/// at their empty defaults and the item list is always empty.
pub fn recover_fields(text: &OcrText) -> Invoice {
    let mut invoice = Invoice::draft(InvoiceSource::Paper);

    invoice.number = find_number(text).unwrap_or_default();
    invoice.date = find_date(text);
    invoice.total = find_total(text).unwrap_or(0.0);

    debug!(
        "Recovered OCR fields: number={:?} date={:?} total={}",
        invoice.number, invoice.date, invoice.total
    );
    invoice
}

fn find_number(text: &OcrText) -> Option<String> {
    text.channels()
        .find_map(|channel| NUMBER_RE.find(channel))
        .map(|m| m.as_str().to_string())
}

fn find_date(text: &OcrText) -> Option<NaiveDate> {
    for channel in text.channels() {
        for (re, roc) in [(&*ROC_DATE_RE, true), (&*AD_DATE_RE, false)] {
            if let Some(caps) = re.captures(channel) {
                let mut year: i32 = caps[1].parse().ok()?;
                if roc {
                    year += 1911;
                }
                let month: u32 = caps[2].parse().ok()?;
                let day: u32 = caps[3].parse().ok()?;
                // First matching pattern wins; an out-of-range match absorbs
                // to an empty date rather than falling through.
                return NaiveDate::from_ymd_opt(year, month, day);
            }
        }
    }
    None
}

fn find_total(text: &OcrText) -> Option<f64> {
    for channel in text.channels() {
        for re in TOTAL_RES.iter() {
            if let Some(caps) = re.captures(channel) {
                return caps[1].parse::<f64>().ok();
            }
        }
    }
    None
}

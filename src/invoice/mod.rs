//! Invoice domain types
//!
//! Structured records produced by the recognition pipeline. Everything here
//! is created fresh per recognition request and treated as immutable once the
//! pipeline returns it.

use serde::{Deserialize, Serialize};

use crate::capture::frame::PixelBuffer;
use crate::taxonomy::{Category, SubCategory};

/// How the invoice data was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceSource {
    /// Decoded from the e-invoice QR pair.
    Qr,
    /// Recovered from OCR text of a paper invoice.
    #[default]
    Paper,
}

/// A single purchased line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item name as printed. Non-empty.
    pub name: String,
    /// Purchased quantity. Positive; fractional values occur in some QR encodings.
    pub quantity: f64,
    /// Unit price. Non-negative.
    pub unit_price: f64,
    /// Resolved category, if classified.
    pub category: Option<Category>,
    /// Resolved subcategory, if classified. Its parent always equals `category`.
    pub sub_category: Option<SubCategory>,
}

impl LineItem {
    /// Create an unclassified line item.
    pub fn new(name: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit_price,
            category: None,
            sub_category: None,
        }
    }

    /// Line subtotal (quantity x unit price).
    pub fn subtotal(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

/// A recognized retail invoice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice number, 2 uppercase letters + 8 digits. Empty when unrecovered.
    pub number: String,
    /// Issue date. `None` when unrecovered.
    pub date: Option<chrono::NaiveDate>,
    /// Grand total as parsed. Never reconciled against the item subtotals;
    /// discrepancies are legitimate (e.g. service charges not itemized).
    pub total: f64,
    /// Buyer tax id (8 digits). Absent on personal purchases (all-zero field).
    pub buyer_id: Option<String>,
    /// Seller tax id (8 digits).
    pub seller_id: Option<String>,
    /// Line items in printed order.
    pub items: Vec<LineItem>,
    /// How this invoice was recognized.
    pub source: InvoiceSource,
    /// Main category: the highest-occurrence category across the items.
    pub category: Category,
    /// Main subcategory, absent when no item received an explicit one.
    pub sub_category: Option<SubCategory>,
}

impl Invoice {
    /// Create an empty draft for the given source.
    pub fn draft(source: InvoiceSource) -> Self {
        Self {
            source,
            ..Self::default()
        }
    }

    /// Append an item. Fills `total` from the items only while no total has
    /// been parsed yet.
    pub fn add_item(&mut self, item: LineItem) {
        self.items.push(item);
        if self.total == 0.0 {
            self.total = self.items_total();
        }
    }

    /// Sum of line subtotals. Informational only; see `total`.
    pub fn items_total(&self) -> f64 {
        self.items.iter().map(LineItem::subtotal).sum()
    }
}

/// OCR text carried into field recovery, split by recognition profile.
///
/// Profile-A (`general`) is tuned for mixed Traditional-Chinese + Latin text
/// and recovers merchant/item wording; Profile-B (`digits`) runs a restricted
/// Latin + digit whitelist and recovers amounts, dates, and the invoice
/// number. Either channel may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OcrText {
    /// Profile-A output (mixed script).
    pub general: Option<String>,
    /// Profile-B output (Latin + digits).
    pub digits: Option<String>,
}

impl OcrText {
    /// Wrap a single combined OCR output as the general channel.
    pub fn combined(text: impl Into<String>) -> Self {
        Self {
            general: Some(text.into()),
            digits: None,
        }
    }

    /// Build from both profile outputs.
    pub fn dual(general: impl Into<String>, digits: impl Into<String>) -> Self {
        Self {
            general: Some(general.into()),
            digits: Some(digits.into()),
        }
    }

    /// Channel texts in priority order: Profile-A first, then Profile-B.
    pub fn channels(&self) -> impl Iterator<Item = &str> {
        self.general
            .as_deref()
            .into_iter()
            .chain(self.digits.as_deref())
    }

    /// True when no channel carries any non-whitespace text.
    pub fn is_blank(&self) -> bool {
        self.channels().all(|text| text.trim().is_empty())
    }
}

/// One recognition request.
#[derive(Debug, Clone)]
pub enum RecognitionInput {
    /// Raw decoded QR payload strings, as scanned by an external client.
    QrPayloads(Vec<String>),
    /// OCR text already produced by an external client.
    OcrText(OcrText),
    /// A normalized frame; the orchestrator drives QR detection then OCR.
    Image(PixelBuffer),
}

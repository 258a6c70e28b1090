//! Two-level keyword classification
//!
//! Assigns a category (and, when a fine-grained trigger hits, a subcategory)
//! to each line item, then resolves the invoice-level main category and main
//! subcategory by occurrence count.
//!
//! Determinism contract: both keyword tables are scanned in declaration
//! order and the first trigger found wins, so an item name containing a
//! subcategory trigger and an unrelated category trigger always resolves
//! through the subcategory's parent. Ties in the invoice-level tally keep
//! whichever key was inserted first, i.e. the first classified item's
//! category.

use indexmap::IndexMap;
use tracing::debug;

use crate::invoice::Invoice;
use crate::taxonomy::keywords::{CATEGORY_KEYWORDS, SUBCATEGORY_KEYWORDS};
use crate::taxonomy::{Category, SubCategory};

/// Classify a single item name.
///
/// The subcategory table is checked first; a hit there short-circuits the
/// coarser category table and implies the parent category. With no match in
/// either table the item falls through to [`Category::Other`].
pub fn classify_name(name: &str) -> (Category, Option<SubCategory>) {
    for (sub, triggers) in SUBCATEGORY_KEYWORDS {
        if triggers.iter().any(|trigger| name.contains(trigger)) {
            return (sub.parent(), Some(*sub));
        }
    }
    for (category, triggers) in CATEGORY_KEYWORDS {
        if triggers.iter().any(|trigger| name.contains(trigger)) {
            return (*category, None);
        }
    }
    (Category::Other, None)
}

/// Classify every line item and resolve the invoice-level main category and
/// subcategory. Never fails; an invoice with zero items resolves to
/// ([`Category::Other`], no subcategory).
pub fn classify_invoice(mut invoice: Invoice) -> Invoice {
    let mut category_tally: IndexMap<Category, usize> = IndexMap::new();
    let mut subcategory_tally: IndexMap<SubCategory, usize> = IndexMap::new();

    for item in &mut invoice.items {
        let (category, sub) = classify_name(&item.name);
        item.category = Some(category);
        item.sub_category = sub;

        *category_tally.entry(category).or_insert(0) += 1;
        if let Some(sub) = sub {
            *subcategory_tally.entry(sub).or_insert(0) += 1;
        }
    }

    // Strictly-greater comparison over insertion order keeps the earlier key
    // on a tie.
    invoice.category = pick_majority(&category_tally).unwrap_or(Category::Other);
    invoice.sub_category = pick_majority(&subcategory_tally);

    debug!(
        "Classified invoice {}: category={} sub_category={:?}",
        invoice.number,
        invoice.category.key(),
        invoice.sub_category.map(|s| s.key())
    );
    invoice
}

fn pick_majority<K: Copy + std::hash::Hash + Eq>(tally: &IndexMap<K, usize>) -> Option<K> {
    let mut best: Option<(K, usize)> = None;
    for (&key, &count) in tally {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((key, count));
        }
    }
    best.map(|(key, _)| key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::{InvoiceSource, LineItem};

    fn invoice_with(names: &[&str]) -> Invoice {
        let mut invoice = Invoice::draft(InvoiceSource::Qr);
        for name in names {
            invoice.items.push(LineItem::new(*name, 1.0, 10.0));
        }
        invoice
    }

    #[test]
    fn test_subcategory_trigger_implies_parent() {
        let (category, sub) = classify_name("路邊停車費繳費單");
        assert_eq!(category, Category::Transport);
        assert_eq!(sub, Some(SubCategory::Parking));
    }

    #[test]
    fn test_subcategory_table_declaration_order_wins() {
        // Both 停車 (Parking) and 電影 (Movie) trigger; Parking is declared
        // earlier in the subcategory table.
        let (category, sub) = classify_name("電影院停車費");
        assert_eq!(sub, Some(SubCategory::Parking));
        assert_eq!(category, Category::Transport);
    }

    #[test]
    fn test_subcategory_short_circuits_category_table() {
        // 票 is an Entertainment category trigger, but the 高鐵 subcategory
        // trigger wins and pulls in its parent category.
        let (category, sub) = classify_name("高鐵車票");
        assert_eq!(sub, Some(SubCategory::Hsr));
        assert_eq!(category, Category::Transport);
    }

    #[test]
    fn test_category_table_declaration_order_wins() {
        // "餐" (Food) and "車" (Transport) both trigger; Food is declared
        // first in the category table.
        let (category, sub) = classify_name("餐車");
        assert_eq!(category, Category::Food);
        assert_eq!(sub, None);
    }

    #[test]
    fn test_unmatched_name_falls_through_to_other() {
        let (category, sub) = classify_name("zzzz");
        assert_eq!(category, Category::Other);
        assert_eq!(sub, None);
    }

    #[test]
    fn test_invoice_items_get_classified() {
        let invoice = classify_invoice(invoice_with(&["可口可樂1250CC", "停車費"]));

        assert_eq!(invoice.items[0].category, Some(Category::Food));
        assert_eq!(invoice.items[0].sub_category, Some(SubCategory::Drink));
        assert_eq!(invoice.items[1].category, Some(Category::Transport));
        assert_eq!(invoice.items[1].sub_category, Some(SubCategory::Parking));
    }

    #[test]
    fn test_tie_resolves_to_first_classified_category() {
        // One Food item, one Transport item: 1-1 tie, Food was tallied first.
        let invoice = classify_invoice(invoice_with(&["可口可樂", "停車費"]));
        assert_eq!(invoice.category, Category::Food);

        // Reversed order flips the winner.
        let invoice = classify_invoice(invoice_with(&["停車費", "可口可樂"]));
        assert_eq!(invoice.category, Category::Transport);
    }

    #[test]
    fn test_majority_beats_insertion_order() {
        let invoice =
            classify_invoice(invoice_with(&["可口可樂", "停車費", "路邊停車"]));
        assert_eq!(invoice.category, Category::Transport);
        assert_eq!(invoice.sub_category, Some(SubCategory::Parking));
    }

    #[test]
    fn test_subcategory_tie_keeps_first_tallied() {
        // Drink, Parking, Taxi all count 1; Drink entered the tally first.
        let invoice =
            classify_invoice(invoice_with(&["可口可樂", "停車費", "計程車車資"]));
        assert_eq!(invoice.category, Category::Transport);
        assert_eq!(invoice.sub_category, Some(SubCategory::Drink));
    }

    #[test]
    fn test_items_without_subcategory_never_win_subcategory() {
        // Two items resolve a category only; one resolves a subcategory.
        // The None bucket is excluded, so the explicit subcategory wins.
        let invoice = classify_invoice(invoice_with(&["牛肉麵", "排骨飯", "珍珠奶茶"]));
        assert_eq!(invoice.category, Category::Food);
        assert_eq!(invoice.sub_category, Some(SubCategory::Drink));
    }

    #[test]
    fn test_no_explicit_subcategory_means_absent() {
        let invoice = classify_invoice(invoice_with(&["牛肉麵"]));
        assert_eq!(invoice.category, Category::Food);
        assert_eq!(invoice.sub_category, None);
    }

    #[test]
    fn test_empty_invoice_defaults_to_other() {
        let invoice = classify_invoice(invoice_with(&[]));
        assert_eq!(invoice.category, Category::Other);
        assert_eq!(invoice.sub_category, None);
    }
}

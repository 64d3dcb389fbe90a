//! # Cart
//!
//! The active cart: an ordered store of line items and the single owner of
//! every mutation over them.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Operations                                    │
//! │                                                                         │
//! │  Capture Event             Operation                 Store Change       │
//! │  ─────────────             ─────────                 ────────────       │
//! │                                                                         │
//! │  Barcode decoded ────────► apply_detection() ──────► dedup + push      │
//! │                                                                         │
//! │  Price recognized ───────► apply_detection() ──────► push              │
//! │                                                                         │
//! │  Field keystroke ────────► edit_field() ───────────► replace or no-op  │
//! │                                                                         │
//! │  Row delete ─────────────► remove() ───────────────► retain            │
//! │                                                                         │
//! │  Promotion / cancel ─────► clear() ────────────────► items.clear()     │
//! │                                                                         │
//! │  NOTE: Every operation is total. Invalid input degrades to a no-op     │
//! │        or a default value; nothing here can fail or panic.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::item::{Detection, ItemField, LineItem};
use crate::money::Money;
use crate::validation::{validate_field_len, validate_price_text};
use crate::{
    DEFAULT_QUANTITY, DEFAULT_UNIT_PRICE, PRICE_ITEM_KIND, PRICE_SCAN_SOURCE, UNKNOWN_KIND,
};

// =============================================================================
// Cart
// =============================================================================

/// The active cart.
///
/// ## Invariants
/// - `id` is unique across items for the cart's whole lifetime
/// - Insertion order is preserved; barcode dedup removes the stale row
///   before the fresh one is appended
/// - The item counter only feeds default labels, never identity, and is
///   not reset by `clear()`: "Item 7" stays "Item 7" across a promotion
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Items in scan order.
    items: Vec<LineItem>,

    /// Running counter for auto-numbered labels and id salting.
    item_counter: u64,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Rebuilds a cart from a persisted item snapshot.
    ///
    /// The label counter resumes past the restored rows so fresh scans
    /// don't reuse "Item 1".
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let item_counter = items.len() as u64;
        Cart {
            items,
            item_counter,
        }
    }

    /// Returns the items in scan order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Applies a capture detection, returning the created item.
    ///
    /// ## Behavior
    /// - `Barcode`: any existing row with the same scanned payload is
    ///   dropped first (re-scanning a physical barcode replaces its row
    ///   instead of duplicating it), then a fresh row is appended with the
    ///   default price and quantity.
    /// - `PriceText`: appended unconditionally; every recognized price is
    ///   its own row, priced from the recognized text.
    ///
    /// The new row gets a generated id, an auto-numbered label, and
    /// `quantity = "1"`.
    pub fn apply_detection(&mut self, detection: Detection) -> &LineItem {
        self.item_counter += 1;
        let id = self.next_item_id();
        let label = format!("Item {}", self.item_counter);

        let item = match detection {
            Detection::Barcode { kind, payload } => {
                self.items.retain(|item| item.source_code != payload);
                LineItem {
                    id,
                    source_code: payload,
                    kind: if kind.is_empty() {
                        UNKNOWN_KIND.to_string()
                    } else {
                        kind
                    },
                    label,
                    unit_price: DEFAULT_UNIT_PRICE.to_string(),
                    quantity: DEFAULT_QUANTITY.to_string(),
                }
            }
            Detection::PriceText { payload } => LineItem {
                id,
                source_code: PRICE_SCAN_SOURCE.to_string(),
                kind: PRICE_ITEM_KIND.to_string(),
                label,
                unit_price: payload,
                quantity: DEFAULT_QUANTITY.to_string(),
            },
        };

        self.items.push(item);
        self.items.last().expect("cart is non-empty after push")
    }

    /// Replaces one field on the item matching `id`.
    ///
    /// ## Silent Rejection
    /// The edit is dropped (prior value retained, no error) when:
    /// - the value exceeds the field length cap
    /// - a `UnitPrice` value fails the decimal pattern (empty is fine)
    /// - no item matches `id` (the update matches zero rows)
    pub fn edit_field(&mut self, id: &str, field: ItemField, value: &str) {
        if validate_field_len(field.name(), value).is_err() {
            return;
        }
        if field == ItemField::UnitPrice && validate_price_text(value).is_err() {
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            match field {
                ItemField::Label => item.label = value.to_string(),
                ItemField::UnitPrice => item.unit_price = value.to_string(),
                ItemField::Quantity => item.quantity = value.to_string(),
            }
        }
    }

    /// Deletes the item with the given id; no-op when absent.
    pub fn remove(&mut self, id: &str) {
        self.items.retain(|item| item.id != id);
    }

    /// Empties the cart unconditionally.
    ///
    /// The label counter is deliberately left alone.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Computes the running total.
    ///
    /// Recomputed on every call, never cached, so it always reflects the
    /// live store. Unparsable text contributes zero; negative quantities
    /// contribute their literal (negative) product.
    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Generates the next item id.
    ///
    /// Wall-clock millis salted with the item counter: unique within this
    /// cart even when two scans land in the same millisecond.
    fn next_item_id(&self) -> String {
        format!(
            "item-{}-{}",
            Utc::now().timestamp_millis(),
            self.item_counter
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn barcode(payload: &str) -> Detection {
        Detection::Barcode {
            kind: "ean13".to_string(),
            payload: payload.to_string(),
        }
    }

    #[test]
    fn test_apply_barcode_detection() {
        let mut cart = Cart::new();
        let item = cart.apply_detection(barcode("0123456789012")).clone();

        assert_eq!(cart.len(), 1);
        assert_eq!(item.source_code, "0123456789012");
        assert_eq!(item.kind, "ean13");
        assert_eq!(item.label, "Item 1");
        assert_eq!(item.unit_price, "0.00");
        assert_eq!(item.quantity, "1");
    }

    #[test]
    fn test_same_barcode_scanned_twice_keeps_one_row() {
        let mut cart = Cart::new();
        cart.apply_detection(barcode("0123456789012"));
        cart.apply_detection(barcode("0123456789012"));

        assert_eq!(cart.len(), 1);
        // The surviving row is the fresh scan, not the stale one.
        assert_eq!(cart.items()[0].label, "Item 2");
    }

    #[test]
    fn test_different_barcodes_keep_two_rows() {
        let mut cart = Cart::new();
        cart.apply_detection(barcode("0123456789012"));
        cart.apply_detection(barcode("5901234123457"));

        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_price_detections_always_append() {
        let mut cart = Cart::new();
        cart.apply_detection(Detection::PriceText {
            payload: "4.99".to_string(),
        });
        cart.apply_detection(Detection::PriceText {
            payload: "4.99".to_string(),
        });

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.items()[0].kind, "price");
        assert_eq!(cart.items()[0].unit_price, "4.99");
        assert_eq!(cart.items()[0].source_code, "Scanned price");
    }

    #[test]
    fn test_empty_symbology_falls_back() {
        let mut cart = Cart::new();
        let item = cart
            .apply_detection(Detection::Barcode {
                kind: String::new(),
                payload: "p".to_string(),
            })
            .clone();
        assert_eq!(item.kind, "unknown");
    }

    #[test]
    fn test_item_ids_unique() {
        let mut cart = Cart::new();
        for i in 0..20 {
            cart.apply_detection(barcode(&format!("code-{i}")));
        }

        let mut ids: Vec<_> = cart.items().iter().map(|i| i.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_edit_field_replaces_value() {
        let mut cart = Cart::new();
        let id = cart.apply_detection(barcode("p")).id.clone();

        cart.edit_field(&id, ItemField::Label, "Milk 2%");
        cart.edit_field(&id, ItemField::UnitPrice, "3.49");
        cart.edit_field(&id, ItemField::Quantity, "2");

        let item = &cart.items()[0];
        assert_eq!(item.label, "Milk 2%");
        assert_eq!(item.unit_price, "3.49");
        assert_eq!(item.quantity, "2");
    }

    #[test]
    fn test_oversized_edit_is_rejected_idempotently() {
        let mut cart = Cart::new();
        let id = cart.apply_detection(barcode("p")).id.clone();
        cart.edit_field(&id, ItemField::Label, "Milk");

        let oversized = "a".repeat(16);
        for _ in 0..3 {
            cart.edit_field(&id, ItemField::Label, &oversized);
        }

        assert_eq!(cart.items()[0].label, "Milk");
    }

    #[test]
    fn test_price_edit_sticks_iff_pattern_matches() {
        let mut cart = Cart::new();
        let id = cart.apply_detection(barcode("p")).id.clone();

        cart.edit_field(&id, ItemField::UnitPrice, "1,234.56");
        assert_eq!(cart.items()[0].unit_price, "1,234.56");

        // Malformed: prior value retained.
        cart.edit_field(&id, ItemField::UnitPrice, "12,34");
        assert_eq!(cart.items()[0].unit_price, "1,234.56");

        // Empty: accepted (cleared field).
        cart.edit_field(&id, ItemField::UnitPrice, "");
        assert_eq!(cart.items()[0].unit_price, "");
    }

    #[test]
    fn test_edit_unknown_id_matches_zero_rows() {
        let mut cart = Cart::new();
        cart.apply_detection(barcode("p"));

        cart.edit_field("no-such-id", ItemField::Label, "ghost");
        assert_eq!(cart.items()[0].label, "Item 1");
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::new();
        let id = cart.apply_detection(barcode("a")).id.clone();
        cart.apply_detection(barcode("b"));

        cart.remove(&id);
        assert_eq!(cart.len(), 1);

        cart.remove("no-such-id"); // no-op
        assert_eq!(cart.len(), 1);

        cart.clear();
        assert!(cart.is_empty());

        // Counter survives clear: the next label continues the sequence.
        let item = cart.apply_detection(barcode("c")).clone();
        assert_eq!(item.label, "Item 3");
    }

    #[test]
    fn test_total_with_unparsable_price() {
        let mut cart = Cart::new();
        let a = cart.apply_detection(barcode("a")).id.clone();
        let b = cart.apply_detection(barcode("b")).id.clone();

        cart.edit_field(&a, ItemField::UnitPrice, "2.50");
        cart.edit_field(&a, ItemField::Quantity, "3");
        // "abc" can't get in through edit_field; force it to exercise the
        // aggregator's zero default on foreign snapshot data.
        let mut items = cart.items().to_vec();
        items.iter_mut().find(|i| i.id == b).unwrap().unit_price = "abc".to_string();
        items.iter_mut().find(|i| i.id == b).unwrap().quantity = "2".to_string();
        let cart = Cart::from_items(items);

        assert_eq!(cart.total().cents(), 750); // $7.50
    }

    #[test]
    fn test_total_invariant_under_reordering() {
        let mut cart = Cart::new();
        for (i, price) in ["1.25", "0.99", "12.00"].iter().enumerate() {
            let id = cart.apply_detection(barcode(&format!("c{i}"))).id.clone();
            cart.edit_field(&id, ItemField::UnitPrice, price);
        }

        let forward = Cart::from_items(cart.items().to_vec());
        let mut reversed_items = cart.items().to_vec();
        reversed_items.reverse();
        let reversed = Cart::from_items(reversed_items);

        assert_eq!(forward.total(), reversed.total());
        assert_eq!(forward.total().cents(), 1424);
    }

    #[test]
    fn test_from_items_resumes_counter() {
        let mut cart = Cart::new();
        cart.apply_detection(barcode("a"));
        cart.apply_detection(barcode("b"));

        let mut restored = Cart::from_items(cart.items().to_vec());
        let item = restored.apply_detection(barcode("c")).clone();
        assert_eq!(item.label, "Item 3");
    }
}

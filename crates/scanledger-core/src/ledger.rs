//! # Ledger
//!
//! The cart and the receipt history under one owner.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Ledger                                         │
//! │                                                                         │
//! │   ┌────────────────┐              ┌─────────────────────┐              │
//! │   │     Cart       │── promote ──►│   ReceiptHistory    │              │
//! │   │  (live items)  │              │   (newest first)    │              │
//! │   └────────────────┘              └─────────────────────┘              │
//! │                                                                         │
//! │  One logical owner, one logical thread of control. Callers reach       │
//! │  both collections only through the operations below; there is no       │
//! │  ambient global cart threaded through the application.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Promotion Is One Unit
//! `promote` performs snapshot + total capture + prepend + clear as a
//! single synchronous mutation. No caller can observe a state where the
//! receipt exists but the cart survived, or the reverse.

use chrono::Local;

use crate::cart::Cart;
use crate::item::{Detection, ItemField, LineItem};
use crate::money::Money;
use crate::receipt::{format_receipt_timestamp, Receipt, ReceiptHistory};

// =============================================================================
// Ledger
// =============================================================================

/// The combined cart + receipt history with the operations governing them.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    cart: Cart,
    history: ReceiptHistory,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Ledger::default()
    }

    /// Rebuilds a ledger from persisted snapshots.
    ///
    /// Absent or unreadable snapshots become empty collections at the
    /// persistence boundary; this constructor only sees clean data.
    pub fn from_snapshots(items: Vec<LineItem>, receipts: Vec<Receipt>) -> Self {
        Ledger {
            cart: Cart::from_items(items),
            history: ReceiptHistory::from_receipts(receipts),
        }
    }

    // -------------------------------------------------------------------------
    // Cart operations (delegated; the cart is the sole writer of its items)
    // -------------------------------------------------------------------------

    /// Applies a capture detection to the cart. See [`Cart::apply_detection`].
    pub fn apply_detection(&mut self, detection: Detection) -> &LineItem {
        self.cart.apply_detection(detection)
    }

    /// Edits one line item field. See [`Cart::edit_field`].
    pub fn edit_field(&mut self, id: &str, field: ItemField, value: &str) {
        self.cart.edit_field(id, field, value);
    }

    /// Removes a line item; no-op when absent.
    pub fn remove_item(&mut self, id: &str) {
        self.cart.remove(id);
    }

    /// Empties the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// Items in scan order.
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    /// The live running total, recomputed on every call.
    pub fn total(&self) -> Money {
        self.cart.total()
    }

    /// Checks if the cart is empty.
    pub fn cart_is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    // -------------------------------------------------------------------------
    // Promotion
    // -------------------------------------------------------------------------

    /// Promotes the current cart into a receipt.
    ///
    /// ## Behavior
    /// - Empty cart: no-op, returns `None`. This is the only guarded
    ///   precondition in the ledger, and it is not an error.
    /// - Otherwise: captures the total, deep-copies the items, stamps a
    ///   fresh time-ordered id and formatted timestamp, prepends the
    ///   receipt to the history, and clears the cart, all in one unit.
    ///
    /// Returns the freshly stored receipt.
    pub fn promote(&mut self) -> Option<&Receipt> {
        if self.cart.is_empty() {
            return None;
        }

        let receipt = Receipt {
            id: self.history.next_receipt_id(),
            created_at: format_receipt_timestamp(Local::now()),
            items: self.cart.items().to_vec(),
            total: self.cart.total(),
        };

        self.history.prepend(receipt);
        self.cart.clear();

        self.history.receipts().first()
    }

    // -------------------------------------------------------------------------
    // History operations
    // -------------------------------------------------------------------------

    /// Stored receipts, newest first.
    pub fn receipts(&self) -> &[Receipt] {
        self.history.receipts()
    }

    /// Looks up a receipt by id.
    pub fn receipt(&self, id: &str) -> Option<&Receipt> {
        self.history.get(id)
    }

    /// Deletes a receipt permanently; no-op when absent.
    pub fn delete_receipt(&mut self, id: &str) {
        self.history.delete_by_id(id);
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
    fn test_promote_empty_cart_is_noop() {
        let mut ledger = Ledger::new();

        assert!(ledger.promote().is_none());
        assert!(ledger.receipts().is_empty());
    }

    #[test]
    fn test_promote_snapshots_and_clears() {
        let mut ledger = Ledger::new();
        let id = ledger.apply_detection(barcode("p")).id.clone();
        ledger.edit_field(&id, ItemField::UnitPrice, "1.00");
        ledger.edit_field(&id, ItemField::Quantity, "2");

        let receipt = ledger.promote().expect("non-empty cart promotes").clone();

        assert_eq!(receipt.total.cents(), 200); // $2.00
        assert_eq!(receipt.items.len(), 1);
        assert!(ledger.cart_is_empty());
        assert_eq!(ledger.receipts().len(), 1);
        assert_eq!(ledger.receipts()[0].id, receipt.id);
    }

    #[test]
    fn test_promotions_prepend_newest_first() {
        let mut ledger = Ledger::new();

        ledger.apply_detection(barcode("a"));
        let first = ledger.promote().unwrap().id.clone();

        ledger.apply_detection(barcode("b"));
        let second = ledger.promote().unwrap().id.clone();

        let ids: Vec<_> = ledger.receipts().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, [second.as_str(), first.as_str()]);
        assert!(second.parse::<i64>().unwrap() > first.parse::<i64>().unwrap());
    }

    #[test]
    fn test_receipt_is_isolated_from_later_cart_edits() {
        let mut ledger = Ledger::new();
        let id = ledger.apply_detection(barcode("p")).id.clone();
        ledger.edit_field(&id, ItemField::UnitPrice, "5.00");

        let receipt_id = ledger.promote().unwrap().id.clone();

        // Build a new cart and mutate it heavily; the stored receipt must
        // keep its frozen copy.
        let new_id = ledger.apply_detection(barcode("p")).id.clone();
        ledger.edit_field(&new_id, ItemField::UnitPrice, "9.99");
        ledger.clear_cart();

        let stored = ledger.receipt(&receipt_id).unwrap();
        assert_eq!(stored.items.len(), 1);
        assert_eq!(stored.items[0].unit_price, "5.00");
        assert_eq!(stored.total.cents(), 500);
    }

    #[test]
    fn test_delete_receipt() {
        let mut ledger = Ledger::new();
        ledger.apply_detection(barcode("a"));
        let id = ledger.promote().unwrap().id.clone();

        ledger.delete_receipt(&id);
        assert!(ledger.receipts().is_empty());

        ledger.delete_receipt(&id); // no-op
        assert!(ledger.receipts().is_empty());
    }

    #[test]
    fn test_from_snapshots_round_trip() {
        let mut ledger = Ledger::new();
        ledger.apply_detection(barcode("a"));
        ledger.apply_detection(barcode("b"));
        ledger.promote();
        ledger.apply_detection(barcode("c"));

        let restored = Ledger::from_snapshots(
            ledger.items().to_vec(),
            ledger.receipts().to_vec(),
        );

        assert_eq!(restored.items().len(), 1);
        assert_eq!(restored.receipts().len(), 1);
        assert_eq!(restored.receipts()[0].items.len(), 2);
    }
}

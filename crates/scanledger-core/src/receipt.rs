//! # Receipts
//!
//! Immutable receipts and the receipt history.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Receipt Lifecycle                                  │
//! │                                                                         │
//! │  Active cart ──── promote ────► Receipt (deep snapshot + total)        │
//! │                                     │                                   │
//! │                                     ▼                                   │
//! │                            ReceiptHistory (newest first)               │
//! │                                     │                                   │
//! │                         delete_by_id │ export (app layer)              │
//! │                                     ▼                                   │
//! │                                  removed                               │
//! │                                                                         │
//! │  A receipt is never edited. Created by promotion, destroyed by         │
//! │  explicit deletion, otherwise kept indefinitely.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::item::LineItem;
use crate::money::Money;

// =============================================================================
// Receipt
// =============================================================================

/// An immutable snapshot of a completed cart plus its total.
///
/// ## Snapshot Semantics
/// `items` is a deep value copy taken at promotion time; later edits to the
/// live cart cannot reach it. `total` is captured once at promotion and
/// never recomputed: it records what the shopper saw when they saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Unique id, numeric unix-millis text; creation order is sort order.
    pub id: String,

    /// Human-readable timestamp captured at promotion time.
    pub created_at: String,

    /// Frozen copy of the cart at promotion time.
    pub items: Vec<LineItem>,

    /// Total captured at promotion time, in cents.
    pub total: Money,
}

/// Formats a promotion timestamp for display and for the receipt record.
///
/// ## Example
/// `"Fri, Aug 7, 2026, 3:05 PM"`
pub fn format_receipt_timestamp(at: DateTime<Local>) -> String {
    at.format("%a, %b %-d, %Y, %-I:%M %p").to_string()
}

// =============================================================================
// Receipt History
// =============================================================================

/// Ordered collection of receipts, most recent first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptHistory {
    receipts: Vec<Receipt>,
}

impl ReceiptHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        ReceiptHistory::default()
    }

    /// Rebuilds a history from a persisted snapshot (already newest-first).
    pub fn from_receipts(receipts: Vec<Receipt>) -> Self {
        ReceiptHistory { receipts }
    }

    /// Returns the receipts, newest first.
    pub fn receipts(&self) -> &[Receipt] {
        &self.receipts
    }

    /// Returns the number of stored receipts.
    pub fn len(&self) -> usize {
        self.receipts.len()
    }

    /// Checks if the history is empty.
    pub fn is_empty(&self) -> bool {
        self.receipts.is_empty()
    }

    /// Looks up a receipt by id.
    pub fn get(&self, id: &str) -> Option<&Receipt> {
        self.receipts.iter().find(|r| r.id == id)
    }

    /// Prepends a freshly promoted receipt (most-recent-first ordering).
    pub fn prepend(&mut self, receipt: Receipt) {
        self.receipts.insert(0, receipt);
    }

    /// Removes the receipt matching `id`, preserving the order of the rest.
    ///
    /// No-op when the id is absent. There is no undo; recovery, if any,
    /// is an export taken before deletion.
    pub fn delete_by_id(&mut self, id: &str) {
        self.receipts.retain(|r| r.id != id);
    }

    /// Generates the id for the next promotion.
    ///
    /// Unix millis, bumped past the newest stored id so ids stay strictly
    /// increasing even when two promotions land in the same millisecond.
    pub fn next_receipt_id(&self) -> String {
        let now = Utc::now().timestamp_millis();
        let floor = self
            .receipts
            .first()
            .and_then(|r| r.id.parse::<i64>().ok())
            .map_or(i64::MIN, |newest| newest + 1);
        now.max(floor).to_string()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn receipt(id: &str) -> Receipt {
        Receipt {
            id: id.to_string(),
            created_at: "Fri, Aug 7, 2026, 3:05 PM".to_string(),
            items: Vec::new(),
            total: Money::from_cents(0),
        }
    }

    #[test]
    fn test_delete_by_id_preserves_order() {
        let mut history =
            ReceiptHistory::from_receipts(vec![receipt("3"), receipt("2"), receipt("1")]);

        history.delete_by_id("2");
        let ids: Vec<_> = history.receipts().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["3", "1"]);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut history =
            ReceiptHistory::from_receipts(vec![receipt("3"), receipt("2"), receipt("1")]);

        history.delete_by_id("99");
        let ids: Vec<_> = history.receipts().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["3", "2", "1"]);
    }

    #[test]
    fn test_prepend_puts_newest_first() {
        let mut history = ReceiptHistory::new();
        history.prepend(receipt("1"));
        history.prepend(receipt("2"));

        assert_eq!(history.receipts()[0].id, "2");
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_next_receipt_id_strictly_increases() {
        let mut history = ReceiptHistory::new();
        let mut last: Option<i64> = None;

        for _ in 0..5 {
            let id = history.next_receipt_id();
            let n: i64 = id.parse().unwrap();
            if let Some(prev) = last {
                assert!(n > prev);
            }
            last = Some(n);
            history.prepend(receipt(&id));
        }
    }

    #[test]
    fn test_next_receipt_id_outruns_clock_collisions() {
        // A stored id from "the future" (same-millisecond promotion) still
        // yields a strictly larger successor.
        let far_future = i64::MAX - 10;
        let history = ReceiptHistory::from_receipts(vec![receipt(&far_future.to_string())]);

        let next: i64 = history.next_receipt_id().parse().unwrap();
        assert_eq!(next, far_future + 1);
    }

    #[test]
    fn test_timestamp_format() {
        let at = Local.with_ymd_and_hms(2026, 8, 7, 15, 5, 0).unwrap();
        assert_eq!(format_receipt_timestamp(at), "Fri, Aug 7, 2026, 3:05 PM");
    }

    #[test]
    fn test_get() {
        let history = ReceiptHistory::from_receipts(vec![receipt("2"), receipt("1")]);
        assert!(history.get("1").is_some());
        assert!(history.get("9").is_none());
    }
}

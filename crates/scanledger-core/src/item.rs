//! # Line Items and Detections
//!
//! Core domain types for the active cart.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │   Detection     │   │   ItemField     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  Barcode        │   │  Label          │       │
//! │  │  source_code    │   │   {kind,payload}│   │  UnitPrice      │       │
//! │  │  kind           │   │  PriceText      │   │  Quantity       │       │
//! │  │  label          │   │   {payload}     │   │                 │       │
//! │  │  unit_price     │   └─────────────────┘   └─────────────────┘       │
//! │  │  quantity       │                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Text Fields By Design
//! `unit_price` and `quantity` are stored as the user's exact text: a
//! trailing decimal point or a half-typed number round-trips through
//! persistence untouched. Numeric meaning is derived on demand with the
//! lenient parsers in [`crate::money`].

use serde::{Deserialize, Serialize};

use crate::money::{self, Money};

// =============================================================================
// Detection
// =============================================================================

/// A raw detection delivered by the capture source.
///
/// The two capture flows are distinct variants so the cart dispatches
/// exhaustively; there is no field-sniffing to tell a barcode from an
/// OCR result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// A decoded barcode: symbology name and decoded payload.
    Barcode { kind: String, payload: String },

    /// A price recognized on a captured frame, already reduced to clean
    /// decimal text (see [`crate::scan::extract_price_text`]).
    PriceText { payload: String },
}

// =============================================================================
// Item Field
// =============================================================================

/// The user-editable fields of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    /// Display name.
    Label,
    /// Decimal price text.
    UnitPrice,
    /// Integer quantity text.
    Quantity,
}

impl ItemField {
    /// Field name used in validation messages.
    pub const fn name(&self) -> &'static str {
        match self {
            ItemField::Label => "label",
            ItemField::UnitPrice => "unit_price",
            ItemField::Quantity => "quantity",
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One scanned or entered product row in the active cart.
///
/// ## Identity
/// `id` is the identity key and is unique within a cart for the cart's
/// whole lifetime. `source_code` keeps the raw scanned payload for
/// traceability (and barcode dedup at insert time) but is never used as
/// identity after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Unique identifier within the cart (time-ordered, opaque).
    pub id: String,

    /// Raw scanned payload, or the scanned-price sentinel for OCR rows.
    pub source_code: String,

    /// Classification: symbology name, `"price"`, or `"unknown"`.
    pub kind: String,

    /// User-editable display name; may be empty.
    pub label: String,

    /// Decimal price text, pattern-checked on edit.
    pub unit_price: String,

    /// Integer quantity text, length-checked on edit.
    pub quantity: String,
}

impl LineItem {
    /// Returns the name to display for this item.
    ///
    /// An empty label falls back to `KIND: id` so a row is never blank.
    pub fn display_name(&self) -> String {
        if self.label.trim().is_empty() {
            format!("{}: {}", self.kind.to_uppercase(), self.id)
        } else {
            self.label.clone()
        }
    }

    /// Computes this row's contribution to the cart total.
    ///
    /// Both fields parse leniently with a zero default, so an unparsable
    /// price or quantity makes the row free rather than making the total
    /// unavailable.
    pub fn line_total(&self) -> Money {
        Money::parse_lenient(&self.unit_price)
            .multiply_quantity(money::parse_quantity(&self.quantity))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price: &str, qty: &str) -> LineItem {
        LineItem {
            id: "item-1700000000000-1".to_string(),
            source_code: "0123456789012".to_string(),
            kind: "ean13".to_string(),
            label: String::new(),
            unit_price: price.to_string(),
            quantity: qty.to_string(),
        }
    }

    #[test]
    fn test_line_total() {
        assert_eq!(item("2.50", "3").line_total().cents(), 750);
        assert_eq!(item("abc", "2").line_total().cents(), 0);
        assert_eq!(item("2.00", "junk").line_total().cents(), 0);
        assert_eq!(item("2.00", "-1").line_total().cents(), -200);
    }

    #[test]
    fn test_display_name_fallback() {
        let mut it = item("0.00", "1");
        assert_eq!(it.display_name(), "EAN13: item-1700000000000-1");

        it.label = "Milk 2%".to_string();
        assert_eq!(it.display_name(), "Milk 2%");
    }

    #[test]
    fn test_snapshot_wire_format() {
        // Persistence serializes items in camelCase; field text survives
        // the round trip exactly, partial entries included.
        let mut it = item("5.", "1");
        it.label = "Bread".to_string();

        let json = serde_json::to_string(&it).unwrap();
        assert!(json.contains("\"sourceCode\""));
        assert!(json.contains("\"unitPrice\":\"5.\""));

        let back: LineItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, it);
    }
}

//! # scanledger-core: Pure Business Logic for Scanledger
//!
//! This crate is the **heart** of Scanledger. It contains the cart ledger
//! (scanned line items, their running total, and their promotion into
//! immutable receipts) as pure logic with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Scanledger Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Capture Shell (apps/scanner)                    │   │
//! │  │    Barcode events ──► OCR frames ──► Edits ──► Export          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ scanledger-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   cart    │  │  receipt  │  │   money   │  │ validation│  │   │
//! │  │   │  LineItem │  │  Receipt  │  │   Money   │  │   rules   │  │   │
//! │  │   │  Detection│  │  History  │  │  parsing  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CAMERA • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               scanledger-store (Persistence Layer)              │   │
//! │  │          SQLite snapshot store for cart and receipts            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`item`] - Line items and capture detections
//! - [`cart`] - The active cart: mutation rules and the running total
//! - [`receipt`] - Immutable receipts and the receipt history
//! - [`ledger`] - Cart + history under one owner, with promotion
//! - [`money`] - Money type with integer cents and lenient text parsing
//! - [`scan`] - Price extraction from recognized text
//! - [`error`] - Validation error types
//! - [`validation`] - Field edit rules
//!
//! ## Design Principles
//!
//! 1. **Total operations**: No cart mutation can fail. Invalid input is
//!    normalized to a no-op or a default, never an error. Data entry at a
//!    shelf must never be interrupted by a dialog.
//! 2. **No I/O**: Database, network, camera, file system access is
//!    FORBIDDEN here.
//! 3. **Integer Money**: Totals are computed in cents (i64); price text is
//!    parsed leniently with a zero default.
//! 4. **Immutable receipts**: A promoted receipt is a deep value snapshot;
//!    later cart edits can never reach it.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod item;
pub mod ledger;
pub mod money;
pub mod receipt;
pub mod scan;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use scanledger_core::Money` instead of
// `use scanledger_core::money::Money`

pub use cart::Cart;
pub use error::ValidationError;
pub use item::{Detection, ItemField, LineItem};
pub use ledger::Ledger;
pub use money::Money;
pub use receipt::{Receipt, ReceiptHistory};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of any editable line item field (label, price, quantity).
///
/// Edits beyond this length are silently rejected rather than truncated,
/// so a runaway paste leaves the field exactly as it was.
pub const MAX_FIELD_LEN: usize = 15;

/// Unit price assigned to a barcode item before the user fills it in.
pub const DEFAULT_UNIT_PRICE: &str = "0.00";

/// Quantity assigned to every freshly scanned item.
pub const DEFAULT_QUANTITY: &str = "1";

/// `kind` recorded for OCR-sourced line items.
pub const PRICE_ITEM_KIND: &str = "price";

/// `source_code` sentinel recorded for OCR-sourced line items, which have
/// no barcode payload to trace back to.
pub const PRICE_SCAN_SOURCE: &str = "Scanned price";

/// `kind` fallback when a capture source reports an empty symbology name.
pub const UNKNOWN_KIND: &str = "unknown";

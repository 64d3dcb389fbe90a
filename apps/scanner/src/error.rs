//! # Application Error Type
//!
//! Unified error type for session operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Error Flow in the Scanner Shell                        │
//! │                                                                         │
//! │  Ledger-internal input problems          never become errors at all    │
//! │  (bad edits, unknown ids, empty-cart     the ledger normalizes them    │
//! │  promotion)                              to no-ops                     │
//! │                                                                         │
//! │  Background persistence failures         logged via tracing::warn,     │
//! │  (auto-save after a mutation)            swallowed; the in-memory      │
//! │                                          ledger stays authoritative    │
//! │                                                                         │
//! │  User-initiated collaborator failures    surfaced as ONE AppError      │
//! │  (export, startup store bootstrap)       so the caller can show a      │
//! │                                          pass/fail notification        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::export::ExportError;
use scanledger_store::StoreError;

/// Errors surfaced by user-initiated session operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Store bootstrap or an explicit (non-background) store operation failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Receipt export failed.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// An export was requested for a receipt that doesn't exist (already
    /// deleted, or a stale id).
    #[error("Receipt not found: {0}")]
    ReceiptNotFound(String),

    /// Filesystem problem outside the store (data directory creation).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The platform data directory could not be determined.
    #[error("Could not determine app data directory")]
    NoDataDir,
}

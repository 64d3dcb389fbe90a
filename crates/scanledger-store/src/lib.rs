//! # scanledger-store: Persistence Layer for Scanledger
//!
//! This crate provides durable storage for the cart ledger.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Scanledger Data Flow                              │
//! │                                                                         │
//! │  Session mutation (scan applied, field edited, receipt promoted)       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 scanledger-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │    Store      │    │  Repositories  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│ (snapshot.rs)  │    │  (embedded)  │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database (WAL mode)                                            │
//! │  ~/.local/share/scanledger/scanledger.db                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Storage error types
//! - [`repository`] - Snapshot repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scanledger_store::{Store, StoreConfig};
//!
//! let store = Store::new(StoreConfig::new("path/to/scanledger.db")).await?;
//!
//! store.snapshots().save_cart(ledger.items()).await?;
//! let items = store.snapshots().load_cart().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::StoreError;
pub use pool::{Store, StoreConfig};
pub use repository::snapshot::{SnapshotRepository, CART_KEY, RECEIPTS_KEY};

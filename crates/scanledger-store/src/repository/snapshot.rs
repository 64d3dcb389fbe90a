//! # Snapshot Repository
//!
//! Whole-collection persistence for the cart ledger.
//!
//! ## Append-and-Overwrite
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Snapshot Persistence                                 │
//! │                                                                         │
//! │  LEDGER MUTATION (scan applied, field edited, receipt promoted)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Serialize the FULL current collection to JSON                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  INSERT INTO snapshots (key, payload, updated_at)                      │
//! │  ON CONFLICT (key) DO UPDATE ← one statement, old or new, never a mix  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Durable. On startup the collections load back by key;                 │
//! │  an absent key is an empty collection, not an error.                   │
//! │                                                                         │
//! │  There is no partial/incremental write path: the ledger has exactly    │
//! │  one mutator, and collections are small (a cart, a receipt list).      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StoreResult;
use scanledger_core::{LineItem, Receipt};

/// Durable key for the active cart snapshot.
pub const CART_KEY: &str = "scanned_items";

/// Durable key for the receipt history snapshot.
pub const RECEIPTS_KEY: &str = "receipts";

/// Repository for snapshot operations.
#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    pool: SqlitePool,
}

impl SnapshotRepository {
    /// Creates a new SnapshotRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SnapshotRepository { pool }
    }

    // -------------------------------------------------------------------------
    // Raw key-value operations
    // -------------------------------------------------------------------------

    /// Loads the raw payload stored under `key`, or `None` when absent.
    pub async fn load(&self, key: &str) -> StoreResult<Option<String>> {
        let payload: Option<String> =
            sqlx::query_scalar("SELECT payload FROM snapshots WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(payload)
    }

    /// Saves `payload` under `key`, replacing any previous snapshot.
    ///
    /// The upsert is a single statement: durable state flips from the old
    /// snapshot to the new one atomically.
    pub async fn save(&self, key: &str, payload: &str) -> StoreResult<()> {
        let now = Utc::now().to_rfc3339();

        debug!(key = %key, bytes = payload.len(), "Saving snapshot");

        sqlx::query(
            r#"
            INSERT INTO snapshots (key, payload, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(payload)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Typed collection helpers
    // -------------------------------------------------------------------------

    /// Loads the persisted cart items; an absent key is an empty cart.
    pub async fn load_cart(&self) -> StoreResult<Vec<LineItem>> {
        match self.load(CART_KEY).await? {
            Some(payload) => Ok(serde_json::from_str(&payload)?),
            None => Ok(Vec::new()),
        }
    }

    /// Saves the full cart item collection.
    pub async fn save_cart(&self, items: &[LineItem]) -> StoreResult<()> {
        let payload = serde_json::to_string(items)?;
        self.save(CART_KEY, &payload).await
    }

    /// Loads the persisted receipt history (newest first); an absent key is
    /// an empty history.
    pub async fn load_receipts(&self) -> StoreResult<Vec<Receipt>> {
        match self.load(RECEIPTS_KEY).await? {
            Some(payload) => Ok(serde_json::from_str(&payload)?),
            None => Ok(Vec::new()),
        }
    }

    /// Saves the full receipt history.
    pub async fn save_receipts(&self, receipts: &[Receipt]) -> StoreResult<()> {
        let payload = serde_json::to_string(receipts)?;
        self.save(RECEIPTS_KEY, &payload).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

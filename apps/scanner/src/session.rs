//! # Scan Session
//!
//! The orchestration layer: routes capture events into the ledger, applies
//! user edits, promotes receipts, and keeps durable snapshots current.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Scan Session                                     │
//! │                                                                         │
//! │  CaptureEvent channel          User-initiated calls                    │
//! │  ───────────────────           ────────────────────                    │
//! │  Barcode ─► gate ─► ledger     edit_item / remove_item / clear_items   │
//! │  Frame ──► OCR ──► ledger      promote / delete_receipt / export       │
//! │            │                                │                           │
//! │            └────────────┬───────────────────┘                           │
//! │                         ▼                                               │
//! │            persist full snapshot after every mutation                  │
//! │                         │                                               │
//! │            failure? ── log + keep going (memory is authoritative)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Promotion Sequencing
//! Promotion is one explicit method: snapshot + append + clear happen
//! inside a single ledger lock, then both collections are persisted in
//! direct sequence. Nothing here relies on a reactive "watch the state and
//! save eventually" pattern.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::capture::{CaptureEvent, ScanGate};
use crate::error::AppError;
use crate::export::ReceiptExporter;
use crate::ocr::OcrService;
use crate::state::LedgerState;
use scanledger_core::scan::extract_price_text;
use scanledger_core::{Detection, ItemField, Ledger, LineItem, Money, Receipt};
use scanledger_store::Store;

// =============================================================================
// Session
// =============================================================================

/// A scanning session: one ledger, one store, one capture boundary.
pub struct Session<O, E> {
    state: LedgerState,
    store: Store,
    ocr: O,
    exporter: E,

    /// Barcode burst debounce. Held across no await point.
    gate: Mutex<ScanGate>,

    /// OCR overlap guard: frames arriving while one is in flight are
    /// dropped rather than queued behind it.
    ocr_busy: AtomicBool,
}

impl<O, E> Session<O, E>
where
    O: OcrService,
    E: ReceiptExporter,
{
    /// Opens a session over an already-hydrated ledger state.
    pub fn new(state: LedgerState, store: Store, ocr: O, exporter: E, cooldown: Duration) -> Self {
        Session {
            state,
            store,
            ocr,
            exporter,
            gate: Mutex::new(ScanGate::new(cooldown)),
            ocr_busy: AtomicBool::new(false),
        }
    }

    /// Opens a session, rehydrating the ledger from the store.
    ///
    /// Load failures are logged and degrade to empty collections; a
    /// corrupt snapshot must not brick the scanner.
    pub async fn bootstrap(store: Store, ocr: O, exporter: E, cooldown: Duration) -> Self {
        let items = match store.snapshots().load_cart().await {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "Failed to load cart snapshot; starting empty");
                Vec::new()
            }
        };
        let receipts = match store.snapshots().load_receipts().await {
            Ok(receipts) => receipts,
            Err(e) => {
                warn!(error = %e, "Failed to load receipts snapshot; starting empty");
                Vec::new()
            }
        };

        info!(
            cart_items = items.len(),
            receipts = receipts.len(),
            "Ledger hydrated"
        );

        let state = LedgerState::with_ledger(Ledger::from_snapshots(items, receipts));
        Session::new(state, store, ocr, exporter, cooldown)
    }

    // -------------------------------------------------------------------------
    // Capture loop
    // -------------------------------------------------------------------------

    /// Consumes capture events until the source closes its channel.
    ///
    /// Each event is applied to completion before the next is taken: a
    /// delivered detection is one atomic mutation, never interleaved with
    /// another.
    pub async fn run(&self, mut events: mpsc::Receiver<CaptureEvent>) {
        info!("Capture loop started");
        while let Some(event) = events.recv().await {
            match event {
                CaptureEvent::Barcode { kind, payload } => {
                    self.handle_barcode(kind, payload).await;
                }
                CaptureEvent::Frame { image } => {
                    self.handle_frame(&image).await;
                }
            }
        }
        info!("Capture source closed; capture loop ended");
    }

    /// Applies one barcode detection, subject to the scan-gate cooldown.
    pub async fn handle_barcode(&self, kind: String, payload: String) {
        {
            let mut gate = self.gate.lock().expect("Scan gate mutex poisoned");
            if !gate.ready() {
                debug!(payload = %payload, "Barcode dropped: inside cooldown window");
                return;
            }
            gate.mark();
        }

        let item = self
            .state
            .write(|ledger| ledger.apply_detection(Detection::Barcode { kind, payload }).clone());
        info!(item_id = %item.id, kind = %item.kind, "Barcode applied");

        self.persist_cart().await;
    }

    /// Runs OCR on a captured frame and applies any recognized price.
    ///
    /// ## Overlap Guard
    /// While one frame is in flight, further frames are dropped (and
    /// logged) instead of stacking up behind a slow recognition: the
    /// capture UI treats "processing" as a disabled state, and two
    /// interleaved recognitions of the same shelf tag would insert the
    /// same price twice.
    pub async fn handle_frame(&self, image: &[u8]) {
        if self.ocr_busy.swap(true, Ordering::AcqRel) {
            debug!("Frame dropped: recognition already in flight");
            return;
        }

        let outcome = self.ocr.recognize(image).await;
        self.ocr_busy.store(false, Ordering::Release);

        let text = match outcome {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Recognition failed; frame dropped");
                return;
            }
        };

        let Some(price) = extract_price_text(&text) else {
            debug!("No price found in recognized text");
            return;
        };

        let item = self
            .state
            .write(|ledger| ledger.apply_detection(Detection::PriceText { payload: price }).clone());
        info!(item_id = %item.id, price = %item.unit_price, "Recognized price applied");

        self.persist_cart().await;
    }

    // -------------------------------------------------------------------------
    // Item operations
    // -------------------------------------------------------------------------

    /// Edits one field on a line item. Invalid edits are silent no-ops.
    pub async fn edit_item(&self, id: &str, field: ItemField, value: &str) {
        self.state.write(|ledger| ledger.edit_field(id, field, value));
        self.persist_cart().await;
    }

    /// Removes a line item; no-op when absent.
    pub async fn remove_item(&self, id: &str) {
        self.state.write(|ledger| ledger.remove_item(id));
        self.persist_cart().await;
    }

    /// Empties the cart.
    pub async fn clear_items(&self) {
        self.state.write(|ledger| ledger.clear_cart());
        self.persist_cart().await;
    }

    /// Current cart items, in scan order.
    pub fn items(&self) -> Vec<LineItem> {
        self.state.read(|ledger| ledger.items().to_vec())
    }

    /// Live running total.
    pub fn total(&self) -> Money {
        self.state.read(|ledger| ledger.total())
    }

    // -------------------------------------------------------------------------
    // Receipt operations
    // -------------------------------------------------------------------------

    /// Promotes the cart into a receipt and persists both collections.
    ///
    /// Returns the new receipt, or `None` for an empty cart (a deliberate
    /// no-op, not an error). The in-memory promotion is atomic; the two
    /// snapshot saves follow in direct sequence, and a failed save is
    /// logged while the in-memory ledger stays authoritative.
    pub async fn promote(&self) -> Option<Receipt> {
        let receipt = self.state.write(|ledger| ledger.promote().cloned());

        match &receipt {
            Some(receipt) => {
                info!(
                    receipt_id = %receipt.id,
                    total = %receipt.total,
                    items = receipt.items.len(),
                    "Cart promoted to receipt"
                );
                self.persist_cart().await;
                self.persist_receipts().await;
            }
            None => debug!("Promote skipped: cart is empty"),
        }

        receipt
    }

    /// Stored receipts, newest first.
    pub fn receipts(&self) -> Vec<Receipt> {
        self.state.read(|ledger| ledger.receipts().to_vec())
    }

    /// Deletes a receipt permanently and persists the history.
    pub async fn delete_receipt(&self, id: &str) {
        self.state.write(|ledger| ledger.delete_receipt(id));
        info!(receipt_id = %id, "Receipt deleted");
        self.persist_receipts().await;
    }

    /// Exports a receipt through the export collaborator.
    ///
    /// Unlike background persistence, this is user-initiated: failure is
    /// surfaced to the caller as a single pass/fail error.
    pub async fn export_receipt(&self, id: &str) -> Result<std::path::PathBuf, AppError> {
        let receipt = self
            .state
            .read(|ledger| ledger.receipt(id).cloned())
            .ok_or_else(|| AppError::ReceiptNotFound(id.to_string()))?;

        let path = self.exporter.export(&receipt).await?;
        Ok(path)
    }

    // -------------------------------------------------------------------------
    // Persistence (background; failures logged, never surfaced)
    // -------------------------------------------------------------------------

    /// Persists the full cart snapshot.
    async fn persist_cart(&self) {
        let items = self.items();
        if let Err(e) = self.store.snapshots().save_cart(&items).await {
            warn!(error = %e, "Cart snapshot save failed; in-memory state kept");
        }
    }

    /// Persists the full receipt history snapshot.
    async fn persist_receipts(&self) {
        let receipts = self.receipts();
        if let Err(e) = self.store.snapshots().save_receipts(&receipts).await {
            warn!(error = %e, "Receipts snapshot save failed; in-memory state kept");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::HtmlFileExporter;
    use crate::ocr::OcrError;
    use scanledger_store::{Store, StoreConfig};
    use std::sync::Arc;
    use tokio::sync::Notify;

    /// Test double: recognizes a fixed shelf-tag text.
    struct FixedOcr(&'static str);

    impl OcrService for FixedOcr {
        async fn recognize(&self, _image: &[u8]) -> Result<String, OcrError> {
            Ok(self.0.to_string())
        }
    }

    /// Test double: blocks until released, to hold the busy guard open.
    struct BlockingOcr {
        release: Arc<Notify>,
    }

    impl OcrService for BlockingOcr {
        async fn recognize(&self, _image: &[u8]) -> Result<String, OcrError> {
            self.release.notified().await;
            Ok("$1.00".to_string())
        }
    }

    async fn session_with(
        ocr_text: &'static str,
        exporter_dir: &std::path::Path,
    ) -> Session<FixedOcr, HtmlFileExporter> {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        Session::bootstrap(
            store,
            FixedOcr(ocr_text),
            HtmlFileExporter::new(exporter_dir),
            Duration::ZERO,
        )
        .await
    }

    #[tokio::test]
    async fn test_barcode_event_creates_and_persists_item() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_with("", dir.path()).await;

        session
            .handle_barcode("ean13".to_string(), "0123456789012".to_string())
            .await;

        assert_eq!(session.items().len(), 1);

        // The snapshot hit the store, not just memory.
        let persisted = session.store.snapshots().load_cart().await.unwrap();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].source_code, "0123456789012");
    }

    #[tokio::test]
    async fn test_cooldown_drops_burst_events() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        let session = Session::bootstrap(
            store,
            FixedOcr(""),
            HtmlFileExporter::new(dir.path()),
            Duration::from_secs(60),
        )
        .await;

        // A physical scan fires a burst of identical decodes.
        for _ in 0..3 {
            session
                .handle_barcode("ean13".to_string(), "0123456789012".to_string())
                .await;
        }

        assert_eq!(session.items().len(), 1);
        assert_eq!(session.items()[0].label, "Item 1"); // first of the burst
    }

    #[tokio::test]
    async fn test_frame_with_price_appends_item() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_with("ORGANIC MILK $3.79 EA", dir.path()).await;

        session.handle_frame(&[0u8; 4]).await;

        let items = session.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].unit_price, "3.79");
        assert_eq!(items[0].kind, "price");
    }

    #[tokio::test]
    async fn test_frame_without_price_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_with("CLEANUP AISLE 4", dir.path()).await;

        session.handle_frame(&[0u8; 4]).await;

        assert!(session.items().is_empty());
    }

    #[tokio::test]
    async fn test_overlapping_frames_are_dropped_not_queued() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        let release = Arc::new(Notify::new());
        let session = Arc::new(Session::bootstrap(
            store,
            BlockingOcr {
                release: release.clone(),
            },
            HtmlFileExporter::new(dir.path()),
            Duration::ZERO,
        )
        .await);

        let first = {
            let session = session.clone();
            tokio::spawn(async move { session.handle_frame(&[0u8; 4]).await })
        };
        // Let the first frame reach the engine and park there.
        tokio::task::yield_now().await;

        // Second frame while the first is in flight: dropped by the guard.
        session.handle_frame(&[0u8; 4]).await;

        release.notify_one();
        first.await.unwrap();

        assert_eq!(session.items().len(), 1);
    }

    #[tokio::test]
    async fn test_promote_persists_and_rehydrates() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        let session = Session::bootstrap(
            store.clone(),
            FixedOcr(""),
            HtmlFileExporter::new(dir.path()),
            Duration::ZERO,
        )
        .await;

        session
            .handle_barcode("ean13".to_string(), "0123456789012".to_string())
            .await;
        let id = session.items()[0].id.clone();
        session.edit_item(&id, ItemField::UnitPrice, "1.00").await;
        session.edit_item(&id, ItemField::Quantity, "2").await;

        let receipt = session.promote().await.expect("non-empty cart promotes");
        assert_eq!(receipt.total.cents(), 200);
        assert!(session.items().is_empty());

        // A fresh session over the same store sees the promoted state.
        let reopened = Session::bootstrap(
            store,
            FixedOcr(""),
            HtmlFileExporter::new(dir.path()),
            Duration::ZERO,
        )
        .await;
        assert!(reopened.items().is_empty());
        assert_eq!(reopened.receipts().len(), 1);
        assert_eq!(reopened.receipts()[0].id, receipt.id);
    }

    #[tokio::test]
    async fn test_promote_empty_cart_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_with("", dir.path()).await;

        assert!(session.promote().await.is_none());
        assert!(session.receipts().is_empty());
    }

    #[tokio::test]
    async fn test_delete_receipt_persists() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_with("", dir.path()).await;

        session
            .handle_barcode("ean13".to_string(), "a".to_string())
            .await;
        let receipt = session.promote().await.unwrap();

        session.delete_receipt(&receipt.id).await;

        assert!(session.receipts().is_empty());
        let persisted = session.store.snapshots().load_receipts().await.unwrap();
        assert!(persisted.is_empty());
    }

    #[tokio::test]
    async fn test_export_receipt() {
        let dir = tempfile::tempdir().unwrap();
        let session = session_with("", dir.path()).await;

        session
            .handle_barcode("ean13".to_string(), "a".to_string())
            .await;
        let receipt = session.promote().await.unwrap();

        let path = session.export_receipt(&receipt.id).await.unwrap();
        assert!(path.exists());

        match session.export_receipt("no-such-id").await {
            Err(AppError::ReceiptNotFound(_)) => {}
            other => panic!("expected ReceiptNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_run_consumes_channel_until_closed() {
        let dir = tempfile::tempdir().unwrap();
        let session = Arc::new(session_with("$2.25", dir.path()).await);

        let (tx, rx) = mpsc::channel(8);
        let loop_handle = {
            let session = session.clone();
            tokio::spawn(async move { session.run(rx).await })
        };

        tx.send(CaptureEvent::Barcode {
            kind: "ean13".to_string(),
            payload: "0123456789012".to_string(),
        })
        .await
        .unwrap();
        tx.send(CaptureEvent::Frame { image: vec![0u8; 4] })
            .await
            .unwrap();
        drop(tx);

        loop_handle.await.unwrap();
        assert_eq!(session.items().len(), 2);
    }
}

//! # Scanledger Scanner Shell
//!
//! Core library for the scanner application: wiring between the capture
//! boundary, the ledger, the snapshot store, and the export collaborator.
//!
//! ## Module Organization
//! ```text
//! scanledger_scanner/
//! ├── lib.rs          ◄─── You are here (startup & the dev drive)
//! ├── config.rs       ◄─── Paths and tunables (env + platform defaults)
//! ├── state.rs        ◄─── Shared ledger state (Arc<Mutex<Ledger>>)
//! ├── capture.rs      ◄─── Capture events + scan-gate debounce
//! ├── ocr.rs          ◄─── OCR collaborator seam
//! ├── export.rs       ◄─── Receipt document rendering + export seam
//! ├── session.rs      ◄─── Session orchestration
//! └── error.rs        ◄─── AppError
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter                                │
//! │     • Default: INFO, can be overridden with RUST_LOG                    │
//! │                                                                         │
//! │  2. Resolve Configuration ────────────────────────────────────────────► │
//! │     • Platform data dir (or SCANLEDGER_DB_PATH)                         │
//! │     • Export dir, scan cooldown                                         │
//! │                                                                         │
//! │  3. Open Snapshot Store ──────────────────────────────────────────────► │
//! │     • SQLite with WAL mode                                              │
//! │     • Run pending migrations                                            │
//! │                                                                         │
//! │  4. Hydrate Ledger ───────────────────────────────────────────────────► │
//! │     • Cart + receipt history from their snapshot keys                   │
//! │     • Absent or unreadable snapshots become empty collections           │
//! │                                                                         │
//! │  5. Run Capture Session ──────────────────────────────────────────────► │
//! │     • Events drain from the capture channel into the ledger             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod capture;
pub mod config;
pub mod error;
pub mod export;
pub mod ocr;
pub mod session;
pub mod state;

use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use capture::CaptureEvent;
use config::AppConfig;
use export::HtmlFileExporter;
use ocr::{OcrError, OcrService};
use session::Session;
use scanledger_core::ItemField;
use scanledger_store::{Store, StoreConfig};

/// Scripted stand-in for the device OCR engine.
///
/// The real engine lives in the mobile shell, behind the same
/// [`OcrService`] seam. The dev drive recognizes a fixed shelf tag so the
/// whole pipeline (frame, extraction, cart, persistence) runs for real.
struct ShelfTagOcr;

impl OcrService for ShelfTagOcr {
    async fn recognize(&self, _image: &[u8]) -> Result<String, OcrError> {
        Ok("ORGANIC MILK\n2% REDUCED FAT\n$3.79 EA".to_string())
    }
}

/// Runs the development drive: a scripted capture session against the real
/// store and exporter.
///
/// Camera hardware is the mobile shell's concern; everything behind the
/// capture channel (ledger rules, snapshots, promotion, export) is
/// exactly the production path.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Scanledger scanner shell");

    let config = AppConfig::from_env()?;
    info!(db = %config.database_path.display(), "Configuration resolved");

    let store = Store::new(StoreConfig::new(&config.database_path)).await?;

    let session = Session::bootstrap(
        store,
        ShelfTagOcr,
        HtmlFileExporter::new(&config.export_dir),
        config.scan_cooldown,
    )
    .await;

    println!("Scanledger dev drive");
    println!("====================");
    println!("Database: {}", config.database_path.display());
    println!("Exports:  {}", config.export_dir.display());
    println!();

    // Feed a scripted capture sequence through the production event loop.
    // Barcode bursts are spaced past the cooldown so both survive the gate.
    let (tx, rx) = mpsc::channel(8);
    let cooldown = config.scan_cooldown;
    let feeder = tokio::spawn(async move {
        let _ = tx
            .send(CaptureEvent::Barcode {
                kind: "ean13".to_string(),
                payload: "0123456789012".to_string(),
            })
            .await;
        // Comfortably past the window so the gate reopens.
        tokio::time::sleep(cooldown + std::time::Duration::from_millis(100)).await;
        let _ = tx
            .send(CaptureEvent::Barcode {
                kind: "qr".to_string(),
                payload: "5901234123457".to_string(),
            })
            .await;
        let _ = tx.send(CaptureEvent::Frame { image: vec![0u8; 16] }).await;
        // Sender drops here; the session loop ends when the channel drains.
    });

    session.run(rx).await;
    feeder.await?;

    println!("✓ Scanned {} items", session.items().len());

    // Price the barcode rows the way a user would, then save the cart.
    let items = session.items();
    if let Some(first) = items.first() {
        session
            .edit_item(&first.id, ItemField::UnitPrice, "2.50")
            .await;
        session.edit_item(&first.id, ItemField::Quantity, "3").await;
    }
    if let Some(second) = items.get(1) {
        session
            .edit_item(&second.id, ItemField::UnitPrice, "1.99")
            .await;
    }

    println!("✓ Running total: {}", session.total());

    let Some(receipt) = session.promote().await else {
        println!("Nothing to promote (cart was empty)");
        return Ok(());
    };
    println!(
        "✓ Saved receipt {} ({}, {} items, total {})",
        receipt.id,
        receipt.created_at,
        receipt.items.len(),
        receipt.total
    );

    let path = session.export_receipt(&receipt.id).await?;
    println!("✓ Exported to {}", path.display());

    println!();
    println!("Receipt history ({} total):", session.receipts().len());
    for receipt in session.receipts() {
        println!(
            "  {} - {} items, {}",
            receipt.created_at,
            receipt.items.len(),
            receipt.total
        );
    }

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=scanledger=trace` - Trace for scanledger crates only
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,scanledger=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

//! # Scanledger Scanner Entry Point
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Scanledger                                     │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                  Capture Hardware (mobile shell)                 │  │
//! │  │  • Camera preview        • Barcode decoder      • OCR engine     │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                                 │ CaptureEvent channel                  │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                   Rust Backend (this crate)                      │  │
//! │  │                                                                  │  │
//! │  │  main.rs ────► Hands off to lib.rs                               │  │
//! │  │  lib.rs ─────► Logging, config, store, session wiring            │  │
//! │  │  session.rs ─► Event loop, edits, promotion, export              │  │
//! │  │                                                                  │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                      SQLite Snapshot Store                       │  │
//! │  │  scanledger.db (local file, WAL mode)                            │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The binary runs the development drive: a scripted capture sequence
//! through the production session, store, and exporter. Real capture
//! hardware plugs into the same channel and trait seams.

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The actual setup is in lib.rs for better testability
    scanledger_scanner::run().await
}

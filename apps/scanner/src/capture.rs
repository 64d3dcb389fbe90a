//! # Capture Boundary
//!
//! Events delivered by the capture source, and the scan-gate debounce.
//!
//! ## Capture Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Capture Event Flow                                  │
//! │                                                                         │
//! │  Camera / decoder (external collaborator)                              │
//! │       │                                                                 │
//! │       │  mpsc::Sender<CaptureEvent>                                     │
//! │       ▼                                                                 │
//! │  Session event loop                                                    │
//! │       │                                                                 │
//! │       ├── Barcode ──► ScanGate.ready()? ──► ledger ──► ScanGate.mark() │
//! │       │                    │                                            │
//! │       │                    └── within cooldown ──► event dropped        │
//! │       │                                                                 │
//! │       └── Frame ───► OCR ──► price extraction ──► ledger               │
//! │                                                                         │
//! │  The session never initiates capture; it only reacts to delivered      │
//! │  events, one at a time.                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::{Duration, Instant};

// =============================================================================
// Capture Event
// =============================================================================

/// A raw event from the capture source.
#[derive(Debug, Clone)]
pub enum CaptureEvent {
    /// A decoded barcode: symbology name and decoded payload.
    Barcode { kind: String, payload: String },

    /// A captured camera frame destined for OCR price detection.
    Frame { image: Vec<u8> },
}

// =============================================================================
// Scan Gate
// =============================================================================

/// Cooldown gate for barcode detections.
///
/// A physical scan fires a burst of identical decode events; after one is
/// accepted, the gate stays closed for the cooldown window and the rest of
/// the burst is dropped. This is advisory debouncing at the capture
/// boundary; duplicate rows are actually prevented by the cart's
/// dedup-by-scanned-value rule.
#[derive(Debug)]
pub struct ScanGate {
    cooldown: Duration,
    last_accept: Option<Instant>,
}

impl ScanGate {
    /// Creates a gate with the given cooldown window.
    pub fn new(cooldown: Duration) -> Self {
        ScanGate {
            cooldown,
            last_accept: None,
        }
    }

    /// Checks whether a new barcode detection should be accepted.
    pub fn ready(&self) -> bool {
        match self.last_accept {
            Some(at) => at.elapsed() >= self.cooldown,
            None => true,
        }
    }

    /// Records an accepted detection, closing the gate for the window.
    pub fn mark(&mut self) {
        self.last_accept = Some(Instant::now());
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_open_before_first_scan() {
        let gate = ScanGate::new(Duration::from_secs(2));
        assert!(gate.ready());
    }

    #[test]
    fn test_gate_closes_for_cooldown_window() {
        let mut gate = ScanGate::new(Duration::from_secs(60));
        gate.mark();
        assert!(!gate.ready());
    }

    #[test]
    fn test_zero_cooldown_never_blocks() {
        let mut gate = ScanGate::new(Duration::ZERO);
        gate.mark();
        assert!(gate.ready());
    }
}

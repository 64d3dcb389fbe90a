//! # OCR Boundary
//!
//! The seam to the text-recognition collaborator.
//!
//! ## Division of Labor
//! The engine behind this trait (a native OCR library, a cloud endpoint, a
//! test double) owns recognition quality and timing. The session owns what
//! happens to the text: price extraction, cart insertion, persistence.
//!
//! ## Overlap Policy
//! Frames are serialized with a busy guard in the session: while one frame
//! is being recognized, further frames are dropped and logged. See
//! [`crate::session::Session::handle_frame`].

use std::future::Future;

use thiserror::Error;

/// Text recognition errors.
///
/// The session logs these and drops the frame; recognition failure never
/// disturbs the ledger.
#[derive(Debug, Error)]
pub enum OcrError {
    /// The engine failed to process the frame.
    #[error("Recognition failed: {0}")]
    Failed(String),

    /// The frame data was unusable (empty, wrong encoding).
    #[error("Unusable frame: {0}")]
    BadFrame(String),
}

/// A text-recognition engine.
///
/// ## Contract
/// Returns the full recognized text for a frame; the caller extracts the
/// currency-shaped token and discards the rest.
pub trait OcrService: Send + Sync {
    /// Recognizes text on a captured frame.
    fn recognize(
        &self,
        image: &[u8],
    ) -> impl Future<Output = Result<String, OcrError>> + Send;
}

//! # Error Types
//!
//! Validation error types for scanledger-core.
//!
//! ## Containment Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Flow                                      │
//! │                                                                         │
//! │  validation::* returns ValidationError                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Cart mutation ops catch it and degrade to a silent no-op              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Nothing escapes the ledger boundary: every cart operation is total    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A rejected edit is not an exceptional situation here: it is the normal
//! fate of a keystroke that would make the field invalid. The typed error
//! exists so the rules are testable, not so callers can branch on it.

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when an edit doesn't meet field requirements.
/// The ledger converts them to no-ops; they never cross its boundary.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., malformed price text).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

//! # Validation Module
//!
//! Field edit rules for line items.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Edit Acceptance                                    │
//! │                                                                         │
//! │  User keystroke on a line item field                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_field_len ── too long? ──► edit silently dropped             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  unit_price only: validate_price_text                                  │
//! │       │                                                                 │
//! │       ├── malformed? ──► edit silently dropped (prior value retained)  │
//! │       │                                                                 │
//! │       └── OK ──► field replaced                                        │
//! │                                                                         │
//! │  Rejections are invisible: the field simply does not change.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::MAX_FIELD_LEN;

// =============================================================================
// Length
// =============================================================================

/// Validates a field edit against the shared length cap.
///
/// ## Rules
/// - At most [`MAX_FIELD_LEN`] characters
/// - Empty is fine: clearing a field is a legal edit
pub fn validate_field_len(field: &str, value: &str) -> ValidationResult<()> {
    if value.chars().count() > MAX_FIELD_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_FIELD_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Price Text
// =============================================================================

/// Validates price text against the accepted decimal pattern.
///
/// ## Accepted
/// - Empty (cleared field)
/// - Plain digits: `"7"`, `"1099"`
/// - Up to two fraction digits, dot included: `"7."`, `"7.9"`, `"7.99"`
/// - Thousands separators in strict groups of three: `"1,234.56"`
///
/// ## Rejected
/// - A bare fraction: `".50"`
/// - Three or more fraction digits: `"1.999"`
/// - Misplaced separators: `"12,34"`, `",123"`
/// - Anything non-numeric: `"$5"`, `"abc"`
///
/// ## Example
/// ```rust
/// use scanledger_core::validation::validate_price_text;
///
/// assert!(validate_price_text("1,234.56").is_ok());
/// assert!(validate_price_text("").is_ok());
/// assert!(validate_price_text(".50").is_err());
/// ```
pub fn validate_price_text(value: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Ok(());
    }

    let invalid = || ValidationError::InvalidFormat {
        field: "unit_price".to_string(),
        reason: "not a decimal amount".to_string(),
    };

    let (int_part, frac) = match value.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (value, None),
    };

    if let Some(frac) = frac {
        // Fraction may be empty ("7." mid-edit) but never more than 2 digits.
        if frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
    }

    if int_part.contains(',') {
        // Grouped form: 1-3 leading digits, then exact groups of three.
        let mut groups = int_part.split(',');
        let head = groups.next().unwrap_or("");
        if head.is_empty() || head.len() > 3 || !head.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        for group in groups {
            if group.len() != 3 || !group.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
        }
    } else if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

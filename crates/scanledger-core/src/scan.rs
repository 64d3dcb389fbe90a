//! # Scan Text Shaping
//!
//! Reduces raw OCR output to the one thing the cart wants: clean price
//! text.
//!
//! ## Pipeline Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Captured frame ──► OCR engine (collaborator) ──► recognized text      │
//! │                                                        │                │
//! │                                                        ▼                │
//! │                                          extract_price_text()           │
//! │                                                        │                │
//! │                          ┌─────────────────────────────┤                │
//! │                          ▼                             ▼                │
//! │                    Some("4.99")                      None               │
//! │                 Detection::PriceText            frame discarded         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A shelf tag reads like `"SPECIAL  $4.99 /lb"`; everything around the
//! first currency-shaped token is noise and is discarded.

use std::sync::OnceLock;

use regex::Regex;

/// Currency pattern: optional `$`, one or more digits, a dot, exactly two
/// fraction digits.
fn price_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$?\d+\.\d{2}").expect("static pattern compiles"))
}

/// Extracts the first currency-shaped token from recognized text.
///
/// The match is cleaned to digits and dot (`"$4.99"` → `"4.99"`), ready to
/// be stored as a line item's `unit_price`. Returns `None` when nothing in
/// the text looks like a price, in which case the frame is discarded.
///
/// ## Example
/// ```rust
/// use scanledger_core::scan::extract_price_text;
///
/// assert_eq!(
///     extract_price_text("SPECIAL $4.99 /lb"),
///     Some("4.99".to_string())
/// );
/// assert_eq!(extract_price_text("no price here"), None);
/// ```
pub fn extract_price_text(text: &str) -> Option<String> {
    let matched = price_pattern().find(text)?;
    let cleaned: String = matched
        .as_str()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    Some(cleaned)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_first_price() {
        assert_eq!(extract_price_text("$4.99"), Some("4.99".to_string()));
        assert_eq!(extract_price_text("4.99"), Some("4.99".to_string()));
        assert_eq!(
            extract_price_text("WAS $5.49 NOW $4.99"),
            Some("5.49".to_string())
        );
        assert_eq!(
            extract_price_text("ORGANIC MILK\n2% REDUCED FAT\n$3.79 EA"),
            Some("3.79".to_string())
        );
    }

    #[test]
    fn test_requires_two_fraction_digits() {
        assert_eq!(extract_price_text("$4.9"), None);
        assert_eq!(extract_price_text("$4"), None);
        // "4.999" still contains the two-digit prefix "4.99".
        assert_eq!(extract_price_text("4.999"), Some("4.99".to_string()));
    }

    #[test]
    fn test_no_price_in_text() {
        assert_eq!(extract_price_text(""), None);
        assert_eq!(extract_price_text("no price here"), None);
        assert_eq!(extract_price_text("$."), None);
    }
}

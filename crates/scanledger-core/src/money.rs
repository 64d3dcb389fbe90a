//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely, plus the
//! lenient text parsers the cart runs on.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "2.50" parses to 250 cents; 250 × 3 = 750 cents = $7.50, exactly.   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lenient Parsing
//! Line item prices and quantities are stored as the user's exact text,
//! including partial entries like `"5."` mid-edit. Totals therefore parse
//! on every read with a zero default: unparsable text contributes nothing,
//! and no parse failure is ever surfaced.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Negative quantities are accepted at entry time, so a
///   line total (and even a cart total) may be negative.
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support; serializes as a bare integer, which
///   is the persisted form of a receipt total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use scanledger_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use scanledger_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(250); // $2.50
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 750); // $7.50
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Parses decimal price text into cents, best-effort.
    ///
    /// ## Accepted Shapes
    /// - `"10.99"` → 1099
    /// - `"1,234.56"` → 123456 (thousands separators stripped)
    /// - `"5."` → 500 (partial entry mid-edit)
    /// - `"7"` → 700
    /// - `""`, `"abc"`, `"1.2.3"` → 0
    ///
    /// ## Never Fails
    /// This is the cart's "default to zero" rule: an unparsable price
    /// contributes nothing to a total, and no error reaches the caller.
    /// Fraction digits beyond the second are dropped; stored prices are
    /// pattern-checked to at most two, so that path only covers foreign
    /// snapshot data.
    pub fn parse_lenient(text: &str) -> Money {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Money::zero();
        }

        // Sign, then strip grouping commas for the digit scan.
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let cleaned: String = unsigned.chars().filter(|c| *c != ',').collect();

        let (int_part, frac_part) = match cleaned.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (cleaned.as_str(), ""),
        };

        if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
            return Money::zero();
        }
        if !frac_part.bytes().all(|b| b.is_ascii_digit()) {
            return Money::zero();
        }

        let dollars: i64 = match int_part.parse() {
            Ok(v) => v,
            Err(_) => return Money::zero(), // overflow on absurd input
        };

        let mut frac = frac_part.bytes().take(2);
        let tens = frac.next().map_or(0, |b| (b - b'0') as i64);
        let ones = frac.next().map_or(0, |b| (b - b'0') as i64);
        let cents = dollars.saturating_mul(100) + tens * 10 + ones;

        Money(if negative { -cents } else { cents })
    }
}

/// Parses quantity text as an integer prefix, defaulting to zero.
///
/// Matches the data-entry semantics of the cart: `"3"` → 3, `"3x"` → 3
/// (trailing garbage ignored), `"x3"` → 0, `"-2"` → -2, `""` → 0.
/// Quantity edits are only length-checked, so negative and nonsense values
/// are storable; they contribute their literal value here.
pub fn parse_quantity(text: &str) -> i64 {
    let trimmed = text.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits: &str = {
        let end = unsigned
            .bytes()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(unsigned.len());
        &unsigned[..end]
    };

    let value: i64 = digits.parse().unwrap_or(0);
    if negative {
        -value
    } else {
        value
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation over line totals.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        let result: Money = a * 3;
        assert_eq!(result.cents(), 3000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, -50]
            .iter()
            .map(|c| Money::from_cents(*c))
            .sum();
        assert_eq!(total.cents(), 300);
    }

    #[test]
    fn test_parse_lenient_plain() {
        assert_eq!(Money::parse_lenient("10.99").cents(), 1099);
        assert_eq!(Money::parse_lenient("2.50").cents(), 250);
        assert_eq!(Money::parse_lenient("7").cents(), 700);
        assert_eq!(Money::parse_lenient("0.05").cents(), 5);
    }

    #[test]
    fn test_parse_lenient_partial_entry() {
        // A trailing decimal point is a legal mid-edit state.
        assert_eq!(Money::parse_lenient("5.").cents(), 500);
        assert_eq!(Money::parse_lenient("5.9").cents(), 590);
    }

    #[test]
    fn test_parse_lenient_thousands_separators() {
        assert_eq!(Money::parse_lenient("1,234.56").cents(), 123456);
        assert_eq!(Money::parse_lenient("12,000").cents(), 1_200_000);
    }

    #[test]
    fn test_parse_lenient_garbage_is_zero() {
        assert!(Money::parse_lenient("").is_zero());
        assert!(Money::parse_lenient("abc").is_zero());
        assert!(Money::parse_lenient("1.2.3").is_zero());
        assert!(Money::parse_lenient(".50").is_zero());
        assert!(Money::parse_lenient("$5").is_zero());
    }

    #[test]
    fn test_parse_lenient_sign() {
        assert_eq!(Money::parse_lenient("-2.00").cents(), -200);
        assert_eq!(Money::parse_lenient("+2.00").cents(), 200);
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("3"), 3);
        assert_eq!(parse_quantity(" 12 "), 12);
        assert_eq!(parse_quantity("3x"), 3);
        assert_eq!(parse_quantity("x3"), 0);
        assert_eq!(parse_quantity(""), 0);
        assert_eq!(parse_quantity("-2"), -2);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(299);
        let line_total = unit_price.multiply_quantity(3);
        assert_eq!(line_total.cents(), 897);
    }
}

//! # Money Module
//!
//! Provides the `Money` type for unit prices and inventory valuation.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  An f64 price read from "Price: 0.10" and summed ten times:            │
//! │    0.1 × 10 = 0.9999999999999999  ❌ WRONG!                             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "0.10" → 10 cents, × 10 = 100 cents → "1.00"                        │
//! │    The file always carries exactly 2 decimal places, so cents are      │
//! │    lossless for everything we write ourselves                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shelf_core::money::Money;
//!
//! let price: Money = "19.99".parse().unwrap();
//! assert_eq!(price.cents(), 1999);
//! assert_eq!(price.to_decimal_string(), "19.99");
//! assert_eq!(price.to_string(), "$19.99");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: parsing never fails on a sign, validation decides
///   whether a negative price is acceptable
/// - **Single field tuple struct**: Zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use shelf_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion (truncated toward zero).
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
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

    /// Multiplies money by a quantity, or `None` if the product overflows.
    ///
    /// ## Example
    /// ```rust
    /// use shelf_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// assert_eq!(unit_price.checked_multiply_quantity(3), Some(Money::from_cents(897)));
    /// assert_eq!(unit_price.checked_multiply_quantity(i64::MAX), None);
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, or `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Formats the value with exactly two decimal places and no currency sign.
    ///
    /// This is the representation written to the inventory file.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a plain decimal such as `19.99`, `5`, `.5` or `-3.25`.
///
/// ## Rounding
/// Digits beyond the second decimal place round half away from zero:
/// `"0.125"` → 13 cents, `"0.124"` → 12 cents.
///
/// Exponents, thousands separators and currency signs are rejected.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        let s = s.trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("expected a decimal number"));
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid("expected a decimal number"));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("value is too large"))?
        };

        // Cents from the first two fractional digits, third digit rounds.
        let mut frac = fraction.bytes().map(|b| i64::from(b - b'0'));
        let tenths = frac.next().unwrap_or(0);
        let hundredths = frac.next().unwrap_or(0);
        let round_up = frac.next().map_or(false, |d| d >= 5);

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(tenths * 10 + hundredths + i64::from(round_up)))
            .ok_or_else(|| invalid("value is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money with a dollar sign, as used by the inventory table.
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
    fn test_decimal_string() {
        assert_eq!(Money::from_cents(1999).to_decimal_string(), "19.99");
        assert_eq!(Money::from_cents(5).to_decimal_string(), "0.05");
        assert_eq!(Money::from_cents(-550).to_decimal_string(), "-5.50");
    }

    #[test]
    fn test_parse_plain_decimals() {
        assert_eq!("19.99".parse::<Money>().unwrap().cents(), 1999);
        assert_eq!("5".parse::<Money>().unwrap().cents(), 500);
        assert_eq!("5.".parse::<Money>().unwrap().cents(), 500);
        assert_eq!(".5".parse::<Money>().unwrap().cents(), 50);
        assert_eq!("0.1".parse::<Money>().unwrap().cents(), 10);
        assert_eq!(" 12.30 ".parse::<Money>().unwrap().cents(), 1230);
        assert_eq!("-3.25".parse::<Money>().unwrap().cents(), -325);
    }

    #[test]
    fn test_parse_rounds_to_cents() {
        assert_eq!("0.125".parse::<Money>().unwrap().cents(), 13);
        assert_eq!("0.124".parse::<Money>().unwrap().cents(), 12);
        assert_eq!("9.999".parse::<Money>().unwrap().cents(), 1000);
        assert_eq!("-0.125".parse::<Money>().unwrap().cents(), -13);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", ".", "-", "abc", "1e3", "$5.00", "1,000.00", "1.2.3", "--1"] {
            assert!(input.parse::<Money>().is_err(), "accepted {input:?}");
        }
        assert!("99999999999999999999".parse::<Money>().is_err());
    }

    #[test]
    fn test_checked_arithmetic() {
        let total = [Money::from_cents(10); 10]
            .into_iter()
            .try_fold(Money::zero(), |acc, m| acc.checked_add(m))
            .unwrap();
        assert_eq!(total.to_decimal_string(), "1.00");
        assert!(Money::default().is_zero());

        assert_eq!(
            Money::from_cents(299).checked_multiply_quantity(3),
            Some(Money::from_cents(897))
        );
        assert_eq!(
            Money::from_cents(-299).checked_multiply_quantity(-2),
            Some(Money::from_cents(598))
        );
    }

    #[test]
    fn test_checked_arithmetic_overflow() {
        assert_eq!(Money::from_cents(100).checked_multiply_quantity(i64::MAX), None);
        assert_eq!(Money::from_cents(2).checked_multiply_quantity(i64::MIN), None);
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
        assert_eq!(
            Money::from_cents(i64::MAX).checked_add(Money::from_cents(-1)),
            Some(Money::from_cents(i64::MAX - 1))
        );
    }
}

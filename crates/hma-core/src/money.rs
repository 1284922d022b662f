//! # Money Module
//!
//! Provides the `Money` type for handling ringgit amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing a ledger in floating point:                                    │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A client ledger is summed on every read, so drift would show up       │
//! │  in balances and statements.                                            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Sen                                              │
//! │    RM 2,500.00 is stored as 250000 sen                                  │
//! │    Sums are exact, display rounds nothing                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Shape
//! Persisted state and notification payloads carry amounts as JSON numbers
//! in ringgit (`2500`, `12.5`). `Money` serializes to that shape and reads
//! it back rounded to the nearest sen, so a round trip is exact.
//!
//! ## Usage
//! ```rust
//! use hma_core::money::Money;
//!
//! let fee = Money::parse("2500").unwrap();
//! let paid = Money::parse("-1000.50").unwrap();
//!
//! assert_eq!((fee + paid).to_decimal_string(), "1499.50");
//! assert_eq!((fee + paid).to_string(), "RM 1,499.50");
//! ```

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::error::ValidationError;

/// Sen per ringgit.
const SEN_PER_RINGGIT: i64 = 100;

/// Largest amount accepted from text or JSON: RM 1,000,000,000,000.00.
pub const MAX_AMOUNT: Money = Money(1_000_000_000_000 * SEN_PER_RINGGIT);

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in sen (1/100 of a ringgit).
///
/// ## Design Decisions
/// - **i64 (signed)**: Ledger entries are signed. Positive is a charge,
///   negative is a payment or credit.
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Saturating operators**: sums and products clamp at the `i64`
///   bounds instead of overflowing. Inputs are limited to [`MAX_AMOUNT`],
///   so real ledgers never get near them.
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  LedgerEntry.amt ──► Client balance ──► Statement total                 │
/// │                                                                         │
/// │  ServiceItem.price ──► CartLine.unit_price × qty ──► Receipt total      │
/// │                                                                         │
/// │  PjsRecord.amount ──► Monthly totals                                    │
/// │                                                                         │
/// │  CSV export ──► to_decimal_string() ──► CSV import ──► parse()          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from sen.
    ///
    /// ```rust
    /// use hma_core::money::Money;
    ///
    /// let price = Money::from_sen(1050);
    /// assert_eq!(price.to_decimal_string(), "10.50");
    /// ```
    #[inline]
    pub const fn from_sen(sen: i64) -> Self {
        Money(sen)
    }

    /// Creates a Money value from whole ringgit.
    #[inline]
    pub const fn from_ringgit(ringgit: i64) -> Self {
        Money(ringgit.saturating_mul(SEN_PER_RINGGIT))
    }

    /// Returns the value in sen.
    #[inline]
    pub const fn sen(&self) -> i64 {
        self.0
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ```rust
    /// use hma_core::money::Money;
    ///
    /// let unit_price = Money::from_ringgit(100);
    /// assert_eq!(unit_price.multiply_quantity(2), Money::from_ringgit(200));
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Parses a decimal amount typed by a user or read from a CSV cell.
    ///
    /// ## Accepted Input
    /// - optional surrounding whitespace
    /// - optional `+` or `-` sign
    /// - digits with an optional `.` fraction (`12`, `12.5`, `.5`, `12.`)
    ///
    /// More than two fraction digits are rounded half away from zero.
    /// Amounts beyond [`MAX_AMOUNT`] either way are rejected.
    /// Thousands separators, currency symbols and exponents are rejected.
    ///
    /// ```rust
    /// use hma_core::money::Money;
    ///
    /// assert_eq!(Money::parse(" 2500 ").unwrap().sen(), 250000);
    /// assert_eq!(Money::parse("-12.5").unwrap().sen(), -1250);
    /// assert_eq!(Money::parse("0.125").unwrap().sen(), 13);
    /// assert!(Money::parse("1,000").is_err());
    /// assert!(Money::parse("").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Money, ValidationError> {
        let text = input.trim();
        if text.is_empty() {
            return Err(ValidationError::Required {
                field: "amount".to_string(),
            });
        }

        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: format!("'{}' {}", text, reason),
        };

        let (negative, unsigned) = match text.as_bytes()[0] {
            b'-' => (true, &text[1..]),
            b'+' => (false, &text[1..]),
            _ => (false, text),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("is not a number"));
        }
        if !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid("is not a number"));
        }

        let too_large = || invalid("is too large");

        let mut sen: i64 = 0;
        for digit in whole.bytes() {
            sen = sen
                .checked_mul(10)
                .and_then(|v| v.checked_add(i64::from(digit - b'0')))
                .ok_or_else(too_large)?;
        }
        sen = sen.checked_mul(SEN_PER_RINGGIT).ok_or_else(too_large)?;

        let mut digits = fraction.bytes().map(|b| i64::from(b - b'0'));
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let round_up = digits.next().is_some_and(|d| d >= 5);

        sen = sen
            .checked_add(tenths * 10 + hundredths + i64::from(round_up))
            .ok_or_else(too_large)?;

        if sen > MAX_AMOUNT.0 {
            return Err(too_large());
        }
        Ok(Money(if negative { -sen } else { sen }))
    }

    /// `Some` when the amount is within [`MAX_AMOUNT`] either way.
    fn within_limit(sen: i64) -> Option<Money> {
        (sen.unsigned_abs() <= MAX_AMOUNT.0.unsigned_abs()).then_some(Money(sen))
    }

    /// Parses an amount, falling back to zero when the text is not a number.
    ///
    /// Used for the initial client fee, CSV amount columns and cart edits.
    pub fn parse_or_zero(input: &str) -> Money {
        Money::parse(input).unwrap_or_default()
    }

    /// Renders the amount with exactly two decimals and no grouping.
    ///
    /// This is the CSV/export representation: `2500.00`, `-12.50`.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!("{}{}.{:02}", sign, abs / 100, abs % 100)
    }

    /// Value in ringgit as a float. Only used for the JSON wire shape.
    fn as_ringgit_f64(&self) -> f64 {
        self.0 as f64 / SEN_PER_RINGGIT as f64
    }

    fn from_ringgit_f64(value: f64) -> Option<Money> {
        let sen = (value * SEN_PER_RINGGIT as f64).round();
        if sen.is_finite() && sen.abs() <= MAX_AMOUNT.0 as f64 {
            Some(Money(sen as i64))
        } else {
            None
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display renders the amount for documents: `RM 2,500.00`, `-RM 12.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = (abs / 100).to_string();

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        write!(f, "{}RM {}.{:02}", sign, grouped, abs % 100)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

/// Multiplication by a cart quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Serde
// =============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % SEN_PER_RINGGIT == 0 {
            serializer.serialize_i64(self.0 / SEN_PER_RINGGIT)
        } else {
            serializer.serialize_f64(self.as_ringgit_f64())
        }
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an amount in ringgit as a number or numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        v.checked_mul(SEN_PER_RINGGIT)
            .and_then(Money::within_limit)
            .ok_or_else(|| E::custom("amount out of range"))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        i64::try_from(v)
            .ok()
            .and_then(|v| v.checked_mul(SEN_PER_RINGGIT))
            .and_then(Money::within_limit)
            .ok_or_else(|| E::custom("amount out of range"))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Money::from_ringgit_f64(v).ok_or_else(|| E::custom("amount out of range"))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        Money::parse(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_plain_decimals() {
        assert_eq!(Money::parse("2500").unwrap(), Money::from_ringgit(2500));
        assert_eq!(Money::parse("12.5").unwrap().sen(), 1250);
        assert_eq!(Money::parse("12.05").unwrap().sen(), 1205);
        assert_eq!(Money::parse(".5").unwrap().sen(), 50);
        assert_eq!(Money::parse("7.").unwrap().sen(), 700);
        assert_eq!(Money::parse("+3").unwrap().sen(), 300);
        assert_eq!(Money::parse("  -0.75 ").unwrap().sen(), -75);
    }

    #[test]
    fn test_parse_rounds_extra_fraction_digits() {
        assert_eq!(Money::parse("0.125").unwrap().sen(), 13);
        assert_eq!(Money::parse("0.124").unwrap().sen(), 12);
        assert_eq!(Money::parse("-0.125").unwrap().sen(), -13);
        assert_eq!(Money::parse("9.999").unwrap().sen(), 1000);
    }

    #[test]
    fn test_parse_rejects_non_numbers() {
        for bad in ["", "   ", "-", ".", "abc", "1,000", "RM10", "1e3", "1.2.3", "--1"] {
            assert!(Money::parse(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(Money::parse("99999999999999999999").is_err());
        assert!(Money::parse("50000000000000000").is_err());
        assert!(Money::parse("-1000000000000.01").is_err());
        assert_eq!(Money::parse("1000000000000").unwrap(), MAX_AMOUNT);
        assert_eq!(Money::parse("-1000000000000").unwrap(), -MAX_AMOUNT);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_sen(i64::MAX - 10);
        assert_eq!((huge + huge).sen(), i64::MAX);
        assert_eq!((-huge - huge).sen(), -i64::MAX - 1);
        assert_eq!((MAX_AMOUNT * u32::MAX).sen(), i64::MAX);
        assert_eq!((-Money::from_sen(i64::MIN)).sen(), i64::MAX);

        let mut acc = Money::zero();
        for _ in 0..4 {
            acc += huge;
        }
        assert_eq!(acc.sen(), i64::MAX);

        let total: Money = [huge, huge, -Money::from_ringgit(1)].iter().sum();
        assert_eq!(total.sen(), i64::MAX - 100);
    }

    #[test]
    fn test_parse_or_zero() {
        assert_eq!(Money::parse_or_zero("abc"), Money::zero());
        assert_eq!(Money::parse_or_zero(""), Money::zero());
        assert_eq!(Money::parse_or_zero("40"), Money::from_ringgit(40));
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::from_sen(250000).to_decimal_string(), "2500.00");
        assert_eq!(Money::from_sen(-1250).to_decimal_string(), "-12.50");
        assert_eq!(Money::from_sen(-5).to_decimal_string(), "-0.05");
        assert_eq!(Money::zero().to_decimal_string(), "0.00");
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_ringgit(2500).to_string(), "RM 2,500.00");
        assert_eq!(Money::from_sen(-1250).to_string(), "-RM 12.50");
        assert_eq!(Money::from_ringgit(1234567).to_string(), "RM 1,234,567.00");
        assert_eq!(Money::from_ringgit(100).to_string(), "RM 100.00");
        assert_eq!(Money::zero().to_string(), "RM 0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_ringgit(10);
        let b = Money::from_sen(250);

        assert_eq!((a + b).sen(), 1250);
        assert_eq!((a - b).sen(), 750);
        assert_eq!((-a).sen(), -1000);
        assert_eq!((a * 3).sen(), 3000);

        let total: Money = [a, b, -b].iter().sum();
        assert_eq!(total, a);
    }

    #[test]
    fn test_json_shape() {
        assert_eq!(serde_json::to_string(&Money::from_ringgit(2500)).unwrap(), "2500");
        assert_eq!(serde_json::to_string(&Money::from_sen(1250)).unwrap(), "12.5");
        assert_eq!(serde_json::to_string(&Money::from_sen(-5)).unwrap(), "-0.05");
    }

    #[test]
    fn test_json_accepts_numbers_and_strings() {
        let m: Money = serde_json::from_str("2500").unwrap();
        assert_eq!(m.sen(), 250000);
        let m: Money = serde_json::from_str("12.5").unwrap();
        assert_eq!(m.sen(), 1250);
        let m: Money = serde_json::from_str("0.30000000000000004").unwrap();
        assert_eq!(m.sen(), 30);
        let m: Money = serde_json::from_str("\"-40.10\"").unwrap();
        assert_eq!(m.sen(), -4010);
        assert!(serde_json::from_str::<Money>("\"abc\"").is_err());
        assert!(serde_json::from_str::<Money>("50000000000000000").is_err());
        assert!(serde_json::from_str::<Money>("5e16").is_err());
    }

    #[test]
    fn test_json_round_trip_is_exact() {
        for sen in [0, 1, 5, 10, 99, 1250, -1, -999, 123456789] {
            let money = Money::from_sen(sen);
            let json = serde_json::to_string(&money).unwrap();
            let back: Money = serde_json::from_str(&json).unwrap();
            assert_eq!(back, money, "round trip of {json}");
        }
    }
}

//! Money and percentage types with precise decimal arithmetic
//!
//! The platform bills in a single currency, so `Money` wraps a bare
//! `rust_decimal::Decimal` rather than carrying a currency code. All amounts
//! are kept at two decimal places.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use thiserror::Error;

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid percentage: {0} (must be 0-100)")]
    InvalidPercentage(i64),
}

/// A monetary amount in the platform currency
///
/// Uses rust_decimal for precise arithmetic without floating-point errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Creates a new Money value, rounded to two decimal places
    pub fn new(amount: Decimal) -> Self {
        Self(amount.round_dp(2))
    }

    /// Creates a zero amount
    pub fn zero() -> Self {
        Self(dec!(0))
    }

    /// Returns the underlying decimal amount
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Saturating subtraction, clamped at zero
    ///
    /// Used for "remaining balance" computations where a payment may
    /// legitimately exceed what is left.
    pub fn saturating_sub(&self, other: Money) -> Money {
        let diff = self.0 - other.0;
        if diff.is_sign_negative() {
            Money::zero()
        } else {
            Money::new(diff)
        }
    }

    /// Multiplies by a scalar factor
    pub fn multiply(&self, factor: Decimal) -> Self {
        Self::new(self.0 * factor)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money::new(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Decimal {
        money.0
    }
}

/// An integer percentage in the range 0-100
///
/// Courts express their minimum down payment as a whole percentage of the
/// booking total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(u8);

impl Percent {
    /// Creates a percentage, rejecting values above 100
    pub fn new(value: u8) -> Result<Self, MoneyError> {
        if value > 100 {
            return Err(MoneyError::InvalidPercentage(value as i64));
        }
        Ok(Self(value))
    }

    /// Creates a percentage from a signed integer, as stored in the database
    pub fn from_i32(value: i32) -> Result<Self, MoneyError> {
        if !(0..=100).contains(&value) {
            return Err(MoneyError::InvalidPercentage(value as i64));
        }
        Ok(Self(value as u8))
    }

    /// Returns the raw percentage value
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Applies this percentage to an amount (amount * pct / 100)
    pub fn of(&self, amount: Money) -> Money {
        amount.multiply(Decimal::new(self.0 as i64, 0) / dec!(100))
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_rounds_to_two_places() {
        let m = Money::new(dec!(100.555));
        assert_eq!(m.amount(), dec!(100.56));
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(dec!(300.00));
        let b = Money::new(dec!(700.00));

        assert_eq!((a + b).amount(), dec!(1000.00));
        assert_eq!((b - a).amount(), dec!(400.00));
    }

    #[test]
    fn test_saturating_sub_clamps_at_zero() {
        let paid = Money::new(dec!(1200));
        let total = Money::new(dec!(1000));

        assert_eq!(total.saturating_sub(paid), Money::zero());
        assert_eq!(paid.saturating_sub(total).amount(), dec!(200));
    }

    #[test]
    fn test_money_sum() {
        let total: Money = [dec!(300), dec!(700)].into_iter().map(Money::new).sum();
        assert_eq!(total.amount(), dec!(1000));
    }

    #[test]
    fn test_percent_of() {
        let pct = Percent::new(20).unwrap();
        let total = Money::new(dec!(1000));

        assert_eq!(pct.of(total).amount(), dec!(200));
    }

    #[test]
    fn test_percent_rejects_out_of_range() {
        assert!(Percent::new(101).is_err());
        assert!(Percent::from_i32(-1).is_err());
        assert!(Percent::from_i32(100).is_ok());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn percent_of_never_exceeds_total(
            cents in 0i64..1_000_000_000i64,
            pct in 0u8..=100u8
        ) {
            let total = Money::new(Decimal::new(cents, 2));
            let threshold = Percent::new(pct).unwrap().of(total);
            prop_assert!(threshold <= total);
        }

        #[test]
        fn saturating_sub_is_never_negative(
            a in 0i64..1_000_000_000i64,
            b in 0i64..1_000_000_000i64
        ) {
            let x = Money::new(Decimal::new(a, 2));
            let y = Money::new(Decimal::new(b, 2));
            prop_assert!(!x.saturating_sub(y).is_negative());
        }
    }
}

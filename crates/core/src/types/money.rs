//! Type-safe money representation using decimal arithmetic.
//!
//! All menu prices, complement prices and delivery fees are in Brazilian
//! reais. Amounts are exact decimals, so `(25.90 + 3.50) * 2` is exactly
//! `58.80`.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An amount of money in reais.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero reais.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create an amount from a decimal value.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create an amount from centavos (e.g. `2590` is `25.90`).
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R$ {:.2}", self.0)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Money {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_decimal_arithmetic() {
        let total = (Money::from_cents(2590) + Money::from_cents(350)) * 2;
        assert_eq!(total, Money::from_cents(5880));
    }

    #[test]
    fn test_display_uses_two_decimals() {
        assert_eq!(Money::from_cents(500).to_string(), "R$ 5.00");
        assert_eq!(Money::new(Decimal::new(259, 1)).to_string(), "R$ 25.90");
    }

    #[test]
    fn test_deserializes_numbers_and_strings() {
        let from_number: Money = serde_json::from_str("25.9").unwrap_or_default();
        let from_string: Money = serde_json::from_str("\"25.90\"").unwrap_or_default();
        assert_eq!(from_number, Money::from_cents(2590));
        assert_eq!(from_string, Money::from_cents(2590));
    }

    #[test]
    fn test_negative_detection() {
        assert!(Money::from_cents(-1).is_negative());
        assert!(!Money::ZERO.is_negative());
    }
}

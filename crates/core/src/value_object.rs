//! Value objects: equality by value, not identity.

use serde::{Deserialize, Serialize};

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. Two value
/// objects with the same attributes are interchangeable.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// An amount of money in the smallest currency unit (yen).
///
/// Signed on purpose: inserted money is taken as given by the caller, so a
/// negative amount is representable and simply fails the funds check.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn new(amount: i64) -> Self {
        Self(amount)
    }

    pub const fn amount(self) -> i64 {
        self.0
    }

    /// `self + other`, saturating at the `i64` bounds.
    pub fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }
}

impl ValueObject for Money {}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} yen", self.0)
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl core::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Money::saturating_add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_is_compared_by_value() {
        assert_eq!(Money::new(150), Money::from(150));
        assert!(Money::new(100) < Money::new(150));
    }

    #[test]
    fn display_uses_yen() {
        assert_eq!(Money::new(120).to_string(), "120 yen");
    }

    #[test]
    fn sum_saturates() {
        let total: Money = [Money::new(i64::MAX), Money::new(1)].into_iter().sum();
        assert_eq!(total, Money::new(i64::MAX));
    }
}

//! Exact monetary amounts (single implicit currency: EUR).

use core::iter::Sum;
use core::ops::Add;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// A non-negative amount of money.
///
/// Backed by `rust_decimal` so `14.95 * 2` is exactly `29.90`. Serializes as a
/// decimal string and accepts either strings or JSON numbers when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn new(amount: Decimal) -> DomainResult<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DomainError::validation(format!(
                "amount must not be negative (got {amount})"
            )));
        }
        Ok(Self(amount))
    }

    /// `Money::from_cents(1495)` is `14.95`.
    pub fn from_cents(cents: u64) -> Self {
        Self(Decimal::from_i128_with_scale(i128::from(cents), 2))
    }

    /// Whole currency units (`Money::from_units(50)` is `50`).
    pub fn from_units(units: u32) -> Self {
        Self(Decimal::from(units))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Price of `quantity` units, saturating at the largest representable amount.
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Price of `quantity` units, `None` on overflow.
    pub fn checked_times(self, quantity: u32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(quantity)).map(Self)
    }

    pub fn checked_add(self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// `percent`% of this amount, rounded to cents (half away from zero).
    pub fn percent(self, percent: u32) -> Self {
        let share = self.0.saturating_mul(Decimal::from(percent)) / Decimal::ONE_HUNDRED;
        Self(share.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }

    /// Subtract, flooring at zero.
    pub fn saturating_sub(self, other: Money) -> Self {
        if other.0 >= self.0 {
            Self::ZERO
        } else {
            Self(self.0 - other.0)
        }
    }
}

impl TryFrom<Decimal> for Money {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

/// Saturates instead of overflowing.
impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.2} €", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_amounts() {
        assert!(Money::new(Decimal::new(-1, 2)).is_err());
        assert!(Money::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn multiplication_is_exact() {
        let price = Money::from_cents(1495);
        assert_eq!(price.times(2), Money::from_cents(2990));
        assert_eq!(price.times(2).to_string(), "29.90 €");
    }

    #[test]
    fn overflow_saturates_instead_of_panicking() {
        let huge = Money::new(Decimal::MAX).unwrap();
        assert_eq!(huge.times(2), huge);
        assert_eq!(huge + Money::from_cents(1), huge);
        assert_eq!(huge.checked_times(2), None);
        assert_eq!(huge.checked_add(Money::from_cents(1)), None);
        assert_eq!(
            Money::from_cents(1495).checked_times(2),
            Some(Money::from_cents(2990))
        );
    }

    #[test]
    fn percent_rounds_to_cents() {
        // 10% of 17.95 is 1.795
        assert_eq!(Money::from_cents(1795).percent(10), Money::from_cents(180));
        assert_eq!(Money::from_units(150).percent(10), Money::from_units(15));
    }

    #[test]
    fn saturating_sub_floors_at_zero() {
        let a = Money::from_cents(500);
        let b = Money::from_cents(700);
        assert_eq!(a.saturating_sub(b), Money::ZERO);
        assert_eq!(b.saturating_sub(a), Money::from_cents(200));
    }

    #[test]
    fn deserializes_from_numbers_and_strings() {
        let from_number: Money = serde_json::from_str("14.95").unwrap();
        let from_string: Money = serde_json::from_str("\"14.95\"").unwrap();
        assert_eq!(from_number, Money::from_cents(1495));
        assert_eq!(from_string, Money::from_cents(1495));
        assert!(serde_json::from_str::<Money>("\"-3\"").is_err());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: summing line prices equals multiplying by the count.
            #[test]
            fn sum_matches_times(cents in 0u64..1_000_000, qty in 0u32..500) {
                let price = Money::from_cents(cents);
                let summed: Money = (0..qty).map(|_| price).sum();
                prop_assert_eq!(summed, price.times(qty));
            }
        }
    }
}

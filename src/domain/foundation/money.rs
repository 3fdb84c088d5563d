//! Money value object with exact two-decimal arithmetic.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use super::ValidationError;

/// Number of fractional digits every amount is kept at.
pub const MONEY_SCALE: u32 = 2;

/// A monetary amount with exactly two decimal places.
///
/// Backed by a fixed-point decimal so sums and differences never drift.
/// Negative values are allowed: a negative remaining balance represents an
/// overpayment or pending refund.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates an amount, rejecting values with more than two decimals.
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value.normalize().scale() > MONEY_SCALE {
            return Err(ValidationError::invalid_format(
                "amount",
                format!("{} has more than {} decimal places", value, MONEY_SCALE),
            ));
        }
        let mut value = value;
        value.rescale(MONEY_SCALE);
        Ok(Self(value))
    }

    /// Creates an amount from an integer number of cents.
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, MONEY_SCALE))
    }

    /// Rounds an arbitrary decimal half away from zero to two places.
    pub fn rounded(value: Decimal) -> Self {
        let mut value =
            value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
        value.rescale(MONEY_SCALE);
        Self(value)
    }

    /// Returns the underlying decimal.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Clamps into `[min, max]`.
    pub fn clamp_between(self, min: Money, max: Money) -> Money {
        if self < min {
            min
        } else if self > max {
            max
        } else {
            self
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<Decimal> for Money {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Money::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim())
            .map_err(|e| ValidationError::invalid_format("amount", e.to_string()))?;
        Money::new(value)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    #[test]
    fn parses_two_decimal_amount() {
        assert_eq!(money("150.00"), Money::from_cents(15_000));
    }

    #[test]
    fn integer_amount_is_rescaled_for_display() {
        assert_eq!(money("500").to_string(), "500.00");
    }

    #[test]
    fn rejects_more_than_two_decimals() {
        assert!("10.005".parse::<Money>().is_err());
    }

    #[test]
    fn accepts_trailing_zero_beyond_scale() {
        assert_eq!(money("10.500"), money("10.50"));
    }

    #[test]
    fn subtraction_is_exact() {
        let remaining = money("500.00") - money("150.00") - money("100.00");
        assert_eq!(remaining, money("250.00"));
        assert_eq!(remaining.to_string(), "250.00");
    }

    #[test]
    fn classic_float_drift_case_is_exact() {
        assert_eq!(money("0.10") + money("0.20"), money("0.30"));
    }

    #[test]
    fn negative_amounts_are_allowed() {
        let overpaid = money("100.00") - money("120.00");
        assert!(overpaid.is_negative());
        assert_eq!(overpaid.to_string(), "-20.00");
    }

    #[test]
    fn rounded_uses_half_away_from_zero() {
        assert_eq!(Money::rounded(Decimal::new(12345, 3)), money("12.35"));
        assert_eq!(Money::rounded(Decimal::new(-12345, 3)), money("-12.35"));
    }

    #[test]
    fn clamp_between_bounds_value() {
        let lo = Money::ZERO;
        let hi = money("50.00");
        assert_eq!(money("-1.00").clamp_between(lo, hi), lo);
        assert_eq!(money("70.00").clamp_between(lo, hi), hi);
        assert_eq!(money("20.00").clamp_between(lo, hi), money("20.00"));
    }

    #[test]
    fn deserialization_rejects_excess_precision() {
        let result: Result<Money, _> = serde_json::from_str("\"1.234\"");
        assert!(result.is_err());
    }

    #[test]
    fn serializes_as_decimal_string() {
        let json = serde_json::to_string(&money("99.90")).unwrap();
        assert_eq!(json, "\"99.90\"");
    }
}

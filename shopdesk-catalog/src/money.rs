//! Fixed-point currency amounts.
//!
//! Prices are kept as whole cents so that sums and products stay exact.
//! The JSON form is a plain decimal number with the shortest exact spelling
//! (`12.5`, `500.0`), matching the datasets.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An amount of money in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Whole currency units, e.g. `Money::from_units(5)` is 5.00.
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Convert a decimal amount, rounding to the nearest cent.
    pub fn from_decimal(amount: f64) -> Self {
        Self((amount * 100.0).round() as i64)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub fn as_decimal(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Divide evenly among `count` parts, rounding half away from zero.
    /// Returns zero when `count` is zero.
    pub fn average(self, count: i64) -> Self {
        if count == 0 {
            return Self::ZERO;
        }
        let doubled = self.0 * 2 / count;
        Self((doubled + doubled.signum()) / 2)
    }
}

impl fmt::Display for Money {
    /// Always two decimals, e.g. `41.50`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Ok(Money::from_decimal(amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_pads_cents() {
        assert_eq!(Money::from_cents(4105).to_string(), "41.05");
        assert_eq!(Money::from_units(45).to_string(), "45.00");
        assert_eq!(Money::from_cents(7).to_string(), "0.07");
        assert_eq!(Money::from_cents(-250).to_string(), "-2.50");
    }

    #[test]
    fn from_decimal_rounds_to_cent() {
        assert_eq!(Money::from_decimal(1058.34).cents(), 105834);
        assert_eq!(Money::from_decimal(0.1 + 0.2).cents(), 30);
    }

    #[test]
    fn average_rounds_half_away_from_zero() {
        assert_eq!(Money::from_cents(1000).average(3).cents(), 333);
        assert_eq!(Money::from_cents(1001).average(2).cents(), 501);
        assert_eq!(Money::from_cents(500).average(0), Money::ZERO);
    }

    #[test]
    fn json_is_a_plain_number() {
        let json = serde_json::to_string(&Money::from_cents(105834)).unwrap();
        assert_eq!(json, "1058.34");
        let whole = serde_json::to_string(&Money::from_units(500)).unwrap();
        assert_eq!(whole, "500.0");
        let back: Money = serde_json::from_str("12.5").unwrap();
        assert_eq!(back, Money::from_cents(1250));
    }
}

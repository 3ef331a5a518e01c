//! FILENAME: core/ledger/src/money.rs
//! Payment amounts held as integer minor units (cents).
//!
//! Revenue and monetary roll-ups sum thousands of lines in different
//! groupings; integer cents keep every one of those sums exact, so the daily
//! revenue total always equals the ledger total.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

const CENTS_PER_UNIT: i64 = 100;

/// Largest accepted line amount: one trillion currency units. At this cap a
/// ledger needs more than 92 000 maximal lines before a sum could reach
/// `i64::MAX`; sums beyond that saturate instead of wrapping.
pub const MAX_LINE_CENTS: i64 = 1_000_000_000_000 * CENTS_PER_UNIT;

/// A non-negative payment amount in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn from_cents(cents: i64) -> Self {
        Amount(cents)
    }

    /// Converts a decimal currency value, rounding to the nearest cent.
    /// Returns None for negative, NaN, infinite or values above
    /// `MAX_LINE_CENTS`.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        let cents = (value * CENTS_PER_UNIT as f64).round();
        if cents > MAX_LINE_CENTS as f64 {
            return None;
        }
        Some(Amount(cents as i64))
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / CENTS_PER_UNIT as f64
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Amount {
        iter.copied().sum()
    }
}

/// Plain `units.cents` rendering. Currency symbols and locale separators
/// belong to the presentation layer.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per_unit = CENTS_PER_UNIT as u64;
        write!(f, "{}{}.{:02}", sign, abs / per_unit, abs % per_unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_f64_rounds_to_cents() {
        assert_eq!(Amount::from_f64(10.0), Some(Amount::from_cents(1000)));
        assert_eq!(Amount::from_f64(72.199), Some(Amount::from_cents(7220)));
        assert_eq!(Amount::from_f64(0.0), Some(Amount::ZERO));
    }

    #[test]
    fn test_from_f64_rejects_invalid() {
        assert_eq!(Amount::from_f64(-0.01), None);
        assert_eq!(Amount::from_f64(f64::NAN), None);
        assert_eq!(Amount::from_f64(f64::INFINITY), None);
        assert_eq!(Amount::from_f64(5.0e16), None);
        assert_eq!(Amount::from_f64(9_223_372_036_854_775_808.0), None);
    }

    #[test]
    fn test_from_f64_accepts_up_to_line_cap() {
        assert_eq!(Amount::from_f64(1.0e12), Some(Amount::from_cents(MAX_LINE_CENTS)));
        assert_eq!(Amount::from_f64(1.0e12 + 1.0), None);
    }

    #[test]
    fn test_sum_of_capped_lines_does_not_wrap() {
        let max = Amount::from_cents(MAX_LINE_CENTS);
        let total: Amount = std::iter::repeat(max).take(1_000).sum();
        assert_eq!(total.cents(), MAX_LINE_CENTS * 1_000);

        let mut saturated = Amount::from_cents(i64::MAX);
        saturated += Amount::from_cents(1);
        assert_eq!(saturated, Amount::from_cents(i64::MAX));
        assert_eq!(Amount::from_cents(i64::MAX) + max, Amount::from_cents(i64::MAX));
    }

    #[test]
    fn test_sum_is_exact() {
        // 0.1 + 0.2 drifts in f64; cents do not
        let parts = [Amount::from_f64(0.1), Amount::from_f64(0.2)];
        let total: Amount = parts.iter().flatten().sum();
        assert_eq!(total, Amount::from_cents(30));
        assert_eq!(total.as_f64(), 0.3);
    }

    #[test]
    fn test_display() {
        assert_eq!(Amount::from_cents(1505).to_string(), "15.05");
        assert_eq!(Amount::from_cents(7).to_string(), "0.07");
        assert_eq!(Amount::from_cents(-250).to_string(), "-2.50");
    }
}

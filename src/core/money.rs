use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Integer division rounded half away from zero.
///
/// The denominator must be positive. This is the rounding used everywhere a
/// money amount is derived from a ratio, so that `1.005` style midpoints land
/// on the same cent every time.
///
/// # Example
///
/// ```
/// use poker_night::core::div_round_half_away;
///
/// assert_eq!(div_round_half_away(5, 2), 3);
/// assert_eq!(div_round_half_away(-5, 2), -3);
/// assert_eq!(div_round_half_away(4, 3), 1);
/// ```
pub fn div_round_half_away(numerator: i128, denominator: i128) -> i128 {
    debug_assert!(denominator > 0);
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if remainder.abs() * 2 >= denominator {
        quotient + numerator.signum()
    } else {
        quotient
    }
}

/// A fixed point amount of money, stored as a count of cents.
///
/// Keeping money as integers means a night of rebuys and cash-outs never
/// drifts. Amounts derived from chips are rounded to the cent once, at the
/// point of conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Whole currency units, e.g. `Money::from_units(100)` is 100.00.
    pub const fn from_units(units: i64) -> Self {
        Money(units * 100)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn abs(self) -> Self {
        Money(self.0.abs())
    }

    /// `None` when the sum doesn't fit.
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    pub fn saturating_add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }

    pub fn saturating_sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Round to the nearest multiple of `unit`, ties away from zero.
    ///
    /// A non-positive unit leaves the amount untouched.
    ///
    /// ```
    /// use poker_night::core::Money;
    ///
    /// let unit = Money::from_units(50);
    /// assert_eq!(Money::from_units(120).round_to_unit(unit), Money::from_units(100));
    /// assert_eq!(Money::from_units(125).round_to_unit(unit), Money::from_units(150));
    /// ```
    pub fn round_to_unit(self, unit: Money) -> Self {
        if unit.0 <= 0 {
            return self;
        }
        let unit = unit.0 as i128;
        let steps = div_round_half_away(self.0 as i128, unit);
        // Near the ends of the range round toward zero instead.
        let cents = i64::try_from(steps * unit)
            .unwrap_or_else(|_| ((self.0 as i128 / unit) * unit) as i64);
        Money(cents)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_div_round_half_away_midpoints() {
        assert_eq!(div_round_half_away(1, 2), 1);
        assert_eq!(div_round_half_away(-1, 2), -1);
        assert_eq!(div_round_half_away(3, 2), 2);
        assert_eq!(div_round_half_away(-3, 2), -2);
    }

    #[test]
    fn test_div_round_half_away_below_midpoint() {
        assert_eq!(div_round_half_away(1, 3), 0);
        assert_eq!(div_round_half_away(-1, 3), 0);
        assert_eq!(div_round_half_away(2, 3), 1);
        assert_eq!(div_round_half_away(0, 7), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1250).to_string(), "12.50");
        assert_eq!(Money::from_cents(-305).to_string(), "-3.05");
        assert_eq!(Money::from_cents(7).to_string(), "0.07");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let mut m = Money::from_units(100);
        m += Money::from_units(50);
        m -= Money::from_cents(25);
        assert_eq!(m, Money::from_cents(14975));
        assert_eq!(-m, Money::from_cents(-14975));
        assert_eq!((Money::from_units(10) - Money::from_units(30)).abs(), Money::from_units(20));
    }

    #[test]
    fn test_sum() {
        let amounts = [Money::from_units(1), Money::from_units(2), Money::from_cents(50)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total, Money::from_cents(350));
    }

    #[test]
    fn test_round_to_unit() {
        let unit = Money::from_units(50);
        assert_eq!(Money::from_units(74).round_to_unit(unit), Money::from_units(50));
        assert_eq!(Money::from_units(75).round_to_unit(unit), Money::from_units(100));
        assert_eq!(Money::from_units(10).round_to_unit(unit), Money::ZERO);
        assert_eq!(Money::from_units(10).round_to_unit(Money::ZERO), Money::from_units(10));
    }

    #[test]
    fn test_round_to_unit_near_the_limit_rounds_toward_zero() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(
            max.round_to_unit(Money::from_cents(10)),
            Money::from_cents(9_223_372_036_854_775_800)
        );
    }

    #[test]
    fn test_checked_add() {
        assert_eq!(
            Money::from_units(1).checked_add(Money::from_cents(50)),
            Some(Money::from_cents(150))
        );
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
    }

    #[test]
    fn test_saturating() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(max.saturating_add(Money::from_units(1)), max);
        assert_eq!(
            Money::from_units(3).saturating_sub(Money::from_units(5)),
            Money::from_units(-2)
        );
        assert_eq!(
            Money::from_cents(i64::MIN).saturating_sub(Money::from_cents(1)),
            Money::from_cents(i64::MIN)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serializes_as_cents() {
        let json = serde_json::to_string(&Money::from_cents(12345)).unwrap();
        assert_eq!(json, "12345");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Money::from_cents(12345));
    }
}

use super::money::{Money, div_round_half_away};

/// The money value of a single chip, `buy_in / chips_per_buy_in`.
///
/// Stored as the ratio rather than a float so conversions are exact until the
/// final rounding to the cent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChipValue {
    buy_in: Money,
    chips_per_buy_in: u32,
}

impl ChipValue {
    /// Returns `None` unless the buy-in is positive and at least one chip is
    /// granted per buy-in.
    pub fn new(buy_in: Money, chips_per_buy_in: u32) -> Option<Self> {
        if buy_in.is_positive() && chips_per_buy_in > 0 {
            Some(ChipValue {
                buy_in,
                chips_per_buy_in,
            })
        } else {
            None
        }
    }

    pub fn buy_in(&self) -> Money {
        self.buy_in
    }

    pub fn chips_per_buy_in(&self) -> u32 {
        self.chips_per_buy_in
    }

    /// Money for a chip count, rounded to the cent half away from zero.
    /// `None` when the amount is too large for a [`Money`].
    ///
    /// ```
    /// use poker_night::core::{ChipValue, Money};
    ///
    /// let value = ChipValue::new(Money::from_units(100), 200).unwrap();
    /// assert_eq!(value.money_for_chips(300), Some(Money::from_units(150)));
    /// assert_eq!(value.money_for_chips(1), Some(Money::from_cents(50)));
    /// ```
    pub fn money_for_chips(&self, chips: i64) -> Option<Money> {
        let numerator = chips as i128 * self.buy_in.cents() as i128;
        let cents = div_round_half_away(numerator, self.chips_per_buy_in as i128);
        i64::try_from(cents).ok().map(Money::from_cents)
    }

    /// How many chips an amount of money buys. Fractional when the amount is
    /// not a whole number of chips.
    pub fn chips_for_money(&self, money: Money) -> f64 {
        money.cents() as f64 * self.chips_per_buy_in as f64 / self.buy_in.cents() as f64
    }

    pub fn per_chip(&self) -> f64 {
        self.buy_in.as_f64() / self.chips_per_buy_in as f64
    }
}

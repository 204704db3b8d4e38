use crate::core::{Money, PlayerId, Timestamp};

use super::errors::TransitionError;

/// An extra buy-in made by a player still at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rebuy {
    pub amount: Money,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Initial buy-in plus every rebuy.
    pub total_in: Money,
    /// Append only.
    pub rebuys: Vec<Rebuy>,
    /// Set once, when the player cashes out.
    pub cash_out: Option<Money>,
    pub cash_out_chips: Option<i64>,
    /// Flips to false at cash-out and never back.
    pub is_active: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, total_in: Money) -> Self {
        Player {
            id: PlayerId::new(),
            name: name.into(),
            total_in,
            rebuys: vec![],
            cash_out: None,
            cash_out_chips: None,
            is_active: true,
        }
    }

    /// Money won (positive) or lost (negative). A player who never cashed
    /// out counts as having left with nothing.
    pub fn net(&self) -> Money {
        self.cash_out.unwrap_or(Money::ZERO) - self.total_in
    }

    pub fn num_rebuys(&self) -> usize {
        self.rebuys.len()
    }

    pub fn rebuy_total(&self) -> Money {
        self.rebuys.iter().map(|r| r.amount).sum()
    }

    pub(crate) fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    pub(crate) fn buy_in(&mut self, buy_in: Money) {
        self.total_in = buy_in;
        self.rebuys.clear();
        self.cash_out = None;
        self.cash_out_chips = None;
        self.is_active = true;
    }

    pub(crate) fn rebuy(
        &mut self,
        amount: Money,
        timestamp: Timestamp,
    ) -> Result<(), TransitionError> {
        self.total_in = self
            .total_in
            .checked_add(amount)
            .ok_or(TransitionError::AmountOutOfRange)?;
        self.rebuys.push(Rebuy { amount, timestamp });
        Ok(())
    }

    pub(crate) fn record_cash_out(&mut self, chips: i64, money: Money) {
        self.cash_out = Some(money);
        self.cash_out_chips = Some(chips);
        self.is_active = false;
    }
}

use crate::core::{Money, PlayerId};
use crate::ledger::Game;

use super::{Transfer, settle};

/// How one player did over the night.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerResult {
    pub id: PlayerId,
    pub name: String,
    pub total_in: Money,
    pub cash_out: Money,
    pub profit: Money,
    pub rebuys: usize,
}

/// One side of a transfer, from the point of view of a single player.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Payment {
    pub counterparty: String,
    pub amount: Money,
}

/// Who a player pays and who pays them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerInstructions {
    pub name: String,
    pub sends: Vec<Payment>,
    pub receives: Vec<Payment>,
}

/// The end of night report: totals, standings, and who pays whom.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSummary {
    pub total_pot: Money,
    pub total_cashed_out: Money,
    pub total_rebuys: usize,
    /// Best result first. Equal profits keep seating order.
    pub results: Vec<PlayerResult>,
    pub transfers: Vec<Transfer>,
    /// One entry per player, in seating order.
    pub instructions: Vec<PlayerInstructions>,
}

impl GameSummary {
    pub fn from_game(game: &Game) -> Self {
        let mut results: Vec<PlayerResult> = game
            .players
            .iter()
            .map(|p| {
                let cash_out = p.cash_out.unwrap_or(Money::ZERO);
                PlayerResult {
                    id: p.id,
                    name: p.name.clone(),
                    total_in: p.total_in,
                    cash_out,
                    profit: cash_out - p.total_in,
                    rebuys: p.num_rebuys(),
                }
            })
            .collect();
        results.sort_by(|a, b| b.profit.cmp(&a.profit));

        let transfers = settle(&game.balances());

        let mut instructions: Vec<PlayerInstructions> = game
            .players
            .iter()
            .map(|p| PlayerInstructions {
                name: p.name.clone(),
                ..Default::default()
            })
            .collect();
        for transfer in &transfers {
            for instruction in instructions.iter_mut() {
                if instruction.name == transfer.from {
                    instruction.sends.push(Payment {
                        counterparty: transfer.to.clone(),
                        amount: transfer.amount,
                    });
                } else if instruction.name == transfer.to {
                    instruction.receives.push(Payment {
                        counterparty: transfer.from.clone(),
                        amount: transfer.amount,
                    });
                }
            }
        }

        GameSummary {
            total_pot: game.total_pot(),
            total_cashed_out: game.total_cashed_out(),
            total_rebuys: game.players.iter().map(|p| p.num_rebuys()).sum(),
            results,
            transfers,
            instructions,
        }
    }

    pub fn biggest_winner(&self) -> Option<&PlayerResult> {
        self.results.first()
    }

    pub fn biggest_loser(&self) -> Option<&PlayerResult> {
        self.results.last()
    }

    pub fn instructions_for(&self, name: &str) -> Option<&PlayerInstructions> {
        self.instructions.iter().find(|i| i.name == name)
    }
}

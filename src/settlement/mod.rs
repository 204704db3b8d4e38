//! Turning a night of wins and losses into a short list of payments.
//!
//! [`settle`] takes each player's net balance and pairs the biggest debtors
//! with the biggest creditors until everyone is square. The greedy
//! largest-first pairing never needs more than `debtors + creditors - 1`
//! transfers. It is not guaranteed to find the true minimum for every input,
//! but it is deterministic: the same balances always give the same transfers.
//!
//! ```
//! use poker_night::core::Money;
//! use poker_night::settlement::{Balance, Transfer, settle};
//!
//! let balances = vec![
//!     Balance::new("A", Money::from_units(100)),
//!     Balance::new("B", Money::from_units(-100)),
//!     Balance::new("C", Money::ZERO),
//! ];
//!
//! assert_eq!(
//!     settle(&balances),
//!     vec![Transfer::new("B", "A", Money::from_units(100))]
//! );
//! ```
mod stats;
mod summary;

pub use stats::PlayerStats;
pub use summary::{GameSummary, PlayerInstructions, PlayerResult, Payment};

use tracing::trace;

use crate::core::Money;

/// A player's result for the night. Positive means they are owed money.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Balance {
    pub name: String,
    pub net: Money,
}

impl Balance {
    pub fn new(name: impl Into<String>, net: Money) -> Self {
        Balance {
            name: name.into(),
            net,
        }
    }
}

/// One payment from a player who lost to a player who won.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transfer {
    pub from: String,
    pub to: String,
    pub amount: Money,
}

impl Transfer {
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: Money) -> Self {
        Transfer {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }
}

struct Outstanding<'a> {
    name: &'a str,
    remaining: Money,
}

/// Compute the transfers that bring every balance to zero.
///
/// Debtors and creditors are each sorted largest first; ties keep their input
/// order. Break-even players never appear in a transfer. If the balances don't
/// sum to zero the solver stops when either side runs out and the rest is left
/// unmatched.
pub fn settle(balances: &[Balance]) -> Vec<Transfer> {
    let mut debtors: Vec<Outstanding<'_>> = balances
        .iter()
        .filter(|b| b.net.is_negative())
        .map(|b| Outstanding {
            name: &b.name,
            remaining: b.net.abs(),
        })
        .collect();
    let mut creditors: Vec<Outstanding<'_>> = balances
        .iter()
        .filter(|b| b.net.is_positive())
        .map(|b| Outstanding {
            name: &b.name,
            remaining: b.net,
        })
        .collect();

    // sort_by is stable, so equal amounts stay in input order.
    debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
    creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));

    let mut transfers = Vec::with_capacity(debtors.len() + creditors.len());
    let mut i = 0;
    let mut j = 0;

    while i < debtors.len() && j < creditors.len() {
        let debtor = &mut debtors[i];
        let creditor = &mut creditors[j];
        let amount = debtor.remaining.min(creditor.remaining);

        if amount.is_positive() {
            trace!(from = debtor.name, to = creditor.name, %amount, "Matched transfer");
            transfers.push(Transfer::new(debtor.name, creditor.name, amount));
        }

        debtor.remaining -= amount;
        creditor.remaining -= amount;

        if !debtor.remaining.is_positive() {
            i += 1;
        }
        if !creditor.remaining.is_positive() {
            j += 1;
        }
    }

    if i < debtors.len() || j < creditors.len() {
        trace!(
            unmatched_debtors = debtors.len() - i,
            unmatched_creditors = creditors.len() - j,
            "Balances did not sum to zero"
        );
    }

    transfers
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::*;
    use crate::test_util::assert_valid_settlement;

    fn units(n: i64) -> Money {
        Money::from_units(n)
    }

    #[test]
    fn test_empty_input() {
        assert!(settle(&[]).is_empty());
    }

    #[test]
    fn test_everyone_break_even() {
        let balances = vec![Balance::new("A", Money::ZERO), Balance::new("B", Money::ZERO)];
        assert!(settle(&balances).is_empty());
    }

    #[test]
    fn test_single_pair() {
        // A in 100 out 150, B in 100 out 50.
        let balances = vec![Balance::new("A", units(50)), Balance::new("B", units(-50))];
        assert_eq!(settle(&balances), vec![Transfer::new("B", "A", units(50))]);
    }

    #[test]
    fn test_break_even_player_is_skipped() {
        let balances = vec![
            Balance::new("A", units(100)),
            Balance::new("B", units(-100)),
            Balance::new("C", Money::ZERO),
        ];
        let transfers = settle(&balances);
        assert_eq!(transfers, vec![Transfer::new("B", "A", units(100))]);
    }

    #[test]
    fn test_largest_first_matching() {
        let balances = vec![
            Balance::new("A", units(-30)),
            Balance::new("B", units(-70)),
            Balance::new("C", units(60)),
            Balance::new("D", units(40)),
        ];
        let transfers = settle(&balances);
        assert_eq!(
            transfers,
            vec![
                Transfer::new("B", "C", units(60)),
                Transfer::new("B", "D", units(10)),
                Transfer::new("A", "D", units(30)),
            ]
        );
        assert_valid_settlement(&balances, &transfers);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let balances = vec![
            Balance::new("A", units(50)),
            Balance::new("B", units(50)),
            Balance::new("C", units(-50)),
            Balance::new("D", units(-50)),
        ];
        assert_eq!(
            settle(&balances),
            vec![
                Transfer::new("C", "A", units(50)),
                Transfer::new("D", "B", units(50)),
            ]
        );
    }

    #[test]
    fn test_cents_are_exact() {
        let balances = vec![
            Balance::new("A", Money::from_cents(3333)),
            Balance::new("B", Money::from_cents(3334)),
            Balance::new("C", Money::from_cents(-6667)),
        ];
        let transfers = settle(&balances);
        assert_eq!(
            transfers,
            vec![
                Transfer::new("C", "B", Money::from_cents(3334)),
                Transfer::new("C", "A", Money::from_cents(3333)),
            ]
        );
    }

    #[test]
    fn test_unbalanced_input_leaves_residual() {
        let balances = vec![Balance::new("A", units(100)), Balance::new("B", units(-60))];
        let transfers = settle(&balances);
        assert_eq!(transfers, vec![Transfer::new("B", "A", units(60))]);
    }

    #[test]
    fn test_one_winner_many_losers() {
        let balances = vec![
            Balance::new("W", units(300)),
            Balance::new("L1", units(-100)),
            Balance::new("L2", units(-150)),
            Balance::new("L3", units(-50)),
        ];
        let transfers = settle(&balances);
        assert_eq!(transfers.len(), 3);
        assert_eq!(transfers[0], Transfer::new("L2", "W", units(150)));
        assert_valid_settlement(&balances, &transfers);
    }

    #[test_log::test]
    fn test_random_zero_sum_balances_settle() {
        let mut rng = StdRng::seed_from_u64(420);

        for _ in 0..200 {
            let num_players = rng.random_range(1..12);
            let mut balances: Vec<Balance> = (0..num_players - 1)
                .map(|idx| {
                    Balance::new(
                        format!("P{idx}"),
                        Money::from_cents(rng.random_range(-50_000..50_000)),
                    )
                })
                .collect();
            let total: Money = balances.iter().map(|b| b.net).sum();
            balances.push(Balance::new("Last", -total));

            let transfers = settle(&balances);
            assert_valid_settlement(&balances, &transfers);
        }
    }

    #[test]
    fn test_transfers_only_flow_from_losers_to_winners() {
        let balances = vec![
            Balance::new("A", units(-20)),
            Balance::new("B", units(35)),
            Balance::new("C", units(-15)),
        ];
        let nets: HashMap<&str, Money> =
            balances.iter().map(|b| (b.name.as_str(), b.net)).collect();
        for transfer in settle(&balances) {
            assert!(nets[transfer.from.as_str()].is_negative());
            assert!(nets[transfer.to.as_str()].is_positive());
        }
    }
}

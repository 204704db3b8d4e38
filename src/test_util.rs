use std::collections::HashMap;

use crate::core::Money;
use crate::ledger::{Game, Phase};
use crate::settlement::{Balance, Transfer};

/// Check the transfers settle the balances they came from.
///
/// Requires the balances to sum to zero. After applying every transfer each
/// player must be exactly square, no player may pay themselves, every amount
/// must be positive, and there must be no more than
/// `debtors + creditors - 1` transfers.
pub fn assert_valid_settlement(balances: &[Balance], transfers: &[Transfer]) {
    let total: Money = balances.iter().map(|b| b.net).sum();
    assert_eq!(Money::ZERO, total, "Balances must sum to zero: {:?}", balances);

    let mut remaining: HashMap<&str, Money> = HashMap::new();
    for balance in balances {
        *remaining.entry(balance.name.as_str()).or_default() += balance.net;
    }

    for transfer in transfers {
        assert!(
            transfer.amount.is_positive(),
            "Transfer amount must be positive: {:?}",
            transfer
        );
        assert_ne!(transfer.from, transfer.to, "Player paying themselves");

        let from = remaining
            .get_mut(transfer.from.as_str())
            .unwrap_or_else(|| panic!("Unknown payer {}", transfer.from));
        *from += transfer.amount;

        let to = remaining
            .get_mut(transfer.to.as_str())
            .unwrap_or_else(|| panic!("Unknown payee {}", transfer.to));
        *to -= transfer.amount;
    }

    for (name, left) in &remaining {
        assert_eq!(Money::ZERO, *left, "{} is not square after settling", name);
    }

    let debtors = balances.iter().filter(|b| b.net.is_negative()).count();
    let creditors = balances.iter().filter(|b| b.net.is_positive()).count();
    let bound = (debtors + creditors).saturating_sub(1);
    assert!(
        transfers.len() <= bound,
        "{} transfers for {} debtors and {} creditors",
        transfers.len(),
        debtors,
        creditors
    );
}

/// Check the invariants every reachable game holds.
pub fn assert_valid_game(game: &Game) {
    for player in &game.players {
        if player.is_active {
            assert!(player.cash_out.is_none(), "Active player with cash out: {:?}", player);
            assert!(player.cash_out_chips.is_none());
        } else {
            assert!(player.cash_out.is_some(), "Inactive player without cash out: {:?}", player);
            assert!(player.cash_out_chips.is_some());
        }
        assert!(!player.total_in.is_negative());
    }

    let mut names: Vec<String> = game.players.iter().map(|p| p.name.to_lowercase()).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), game.players.len(), "Duplicate player names");

    match game.phase {
        Phase::Setup => {
            assert!(game.game_started_at.is_none());
            assert!(game.players.iter().all(|p| p.is_active));
        }
        Phase::Active | Phase::Cashout => {
            assert!(game.game_started_at.is_some());
            assert!(game.chip_value().is_some());
            for player in &game.players {
                assert_eq!(
                    player.total_in,
                    game.buy_in + player.rebuy_total(),
                    "Total in for {} doesn't add up",
                    player.name
                );
            }
        }
        Phase::Settled => {
            assert!(game.game_started_at.is_some());
            assert_eq!(0, game.num_active_players());
        }
    }
}

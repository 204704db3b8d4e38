use std::collections::HashMap;

use crate::core::Money;
use crate::ledger::{Game, Phase};

/// A player's record across every settled game they sat in.
///
/// Players are matched by name exactly as written, since ids only mean
/// something within a single game. Totals saturate rather than wrap.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PlayerStats {
    pub name: String,
    pub games_played: usize,
    /// Sum of the winning nights.
    pub total_won: Money,
    /// Sum of the losing nights, as a positive amount.
    pub total_lost: Money,
    pub total_rebuys: usize,
    /// Best single night. Never below zero.
    pub best_game: Money,
    /// Worst single night. Never above zero.
    pub worst_game: Money,
    pub net_profit: Money,
}

impl PlayerStats {
    fn new(name: &str) -> Self {
        PlayerStats {
            name: name.to_string(),
            games_played: 0,
            total_won: Money::ZERO,
            total_lost: Money::ZERO,
            total_rebuys: 0,
            best_game: Money::ZERO,
            worst_game: Money::ZERO,
            net_profit: Money::ZERO,
        }
    }

    fn record(&mut self, profit: Money, rebuys: usize) {
        self.games_played += 1;
        if profit.is_positive() {
            self.total_won = self.total_won.saturating_add(profit);
        } else {
            self.total_lost = self.total_lost.saturating_add(profit.abs());
        }
        self.total_rebuys += rebuys;
        self.best_game = self.best_game.max(profit);
        self.worst_game = self.worst_game.min(profit);
        self.net_profit = self.total_won.saturating_sub(self.total_lost);
    }

    /// Lifetime standings over `games`, best net profit first.
    ///
    /// Only settled games count. Players with the same net profit stay in
    /// the order they were first seen.
    ///
    /// ```
    /// use poker_night::settlement::PlayerStats;
    ///
    /// assert!(PlayerStats::from_games(&[]).is_empty());
    /// ```
    pub fn from_games(games: &[Game]) -> Vec<PlayerStats> {
        let mut stats: Vec<PlayerStats> = vec![];
        let mut index: HashMap<&str, usize> = HashMap::new();

        for game in games.iter().filter(|g| g.phase == Phase::Settled) {
            for player in &game.players {
                let i = *index.entry(player.name.as_str()).or_insert_with(|| {
                    stats.push(PlayerStats::new(&player.name));
                    stats.len() - 1
                });
                stats[i].record(player.net(), player.num_rebuys());
            }
        }

        stats.sort_by(|a, b| b.net_profit.cmp(&a.net_profit));
        stats
    }
}

use std::collections::HashSet;
use std::fmt::{self, Display};

use tracing::debug;

use crate::core::{ChipValue, Currency, Money, PlayerId, Timestamp};
use crate::settlement::{Balance, Transfer, settle};

use super::config::GameConfig;
use super::errors::{GameBuilderError, GameError, TransitionError};
use super::event::{ChipCount, GameEvent};
use super::player::Player;
use super::reconcile::Reconciliation;

/// Where a game is in its life.
///
/// Phases only move forward. `NewGame` doesn't rewind a settled game, it
/// replaces it with a fresh one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Phase {
    /// Choosing settings and seating players.
    #[default]
    Setup,
    /// Cards are in the air. Rebuys and early cash-outs happen here.
    Active,
    /// Play has stopped and the remaining stacks are being counted.
    Cashout,
    /// Everyone has cashed out.
    Settled,
}

impl Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Setup => write!(f, "setup"),
            Phase::Active => write!(f, "active"),
            Phase::Cashout => write!(f, "cashout"),
            Phase::Settled => write!(f, "settled"),
        }
    }
}

/// A single night's game.
///
/// Games are values. [`Game::apply`] never changes the game it is called on;
/// it hands back the next game or an error saying why the event was refused.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Game {
    pub phase: Phase,
    pub buy_in: Money,
    pub chips_per_buy_in: u32,
    pub currency: Currency,
    /// In seating order. The order is only for display.
    pub players: Vec<Player>,
    /// Set once, when the game starts.
    pub game_started_at: Option<Timestamp>,
    /// Defaults for `NewGame` and the house rules.
    #[cfg_attr(feature = "serde", serde(default))]
    pub config: GameConfig,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Game {
    /// A fresh game in the setup phase using the config's defaults.
    pub fn new(config: GameConfig) -> Self {
        Game {
            phase: Phase::Setup,
            buy_in: config.default_buy_in,
            chips_per_buy_in: config.default_chips_per_buy_in,
            currency: config.default_currency,
            players: vec![],
            game_started_at: None,
            config,
        }
    }

    pub fn builder() -> GameBuilder {
        GameBuilder::new()
    }

    pub fn chip_value(&self) -> Option<ChipValue> {
        ChipValue::new(self.buy_in, self.chips_per_buy_in)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Case insensitive, like the duplicate name check.
    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.matches_name(name))
    }

    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_active)
    }

    pub fn cashed_out_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| !p.is_active)
    }

    pub fn num_active_players(&self) -> usize {
        self.active_players().count()
    }

    /// Everything paid in, buy-ins and rebuys.
    pub fn total_pot(&self) -> Money {
        self.players.iter().map(|p| p.total_in).sum()
    }

    pub fn total_cashed_out(&self) -> Money {
        self.players.iter().filter_map(|p| p.cash_out).sum()
    }

    /// The pot expressed in chips. Zero when there is no valid chip value.
    pub fn total_chips_in_play(&self) -> f64 {
        self.chip_value()
            .map(|value| value.chips_for_money(self.total_pot()))
            .unwrap_or(0.0)
    }

    /// Net result for each player, in seating order.
    pub fn balances(&self) -> Vec<Balance> {
        self.players
            .iter()
            .map(|p| Balance::new(p.name.clone(), p.net()))
            .collect()
    }

    /// Who pays whom, from the current balances.
    pub fn settlements(&self) -> Vec<Transfer> {
        settle(&self.balances())
    }

    /// Compare the chips bought against the chips already cashed out plus
    /// `entered`. Entries for players who already cashed out are ignored.
    ///
    /// Returns `None` if the chip counts are too large to add up.
    pub fn reconcile(&self, entered: &[ChipCount]) -> Option<Reconciliation> {
        let already_out = self
            .cashed_out_players()
            .filter_map(|p| p.cash_out_chips)
            .try_fold(0i64, i64::checked_add)?;
        let newly_out = entered
            .iter()
            .filter(|c| self.player(c.player_id).is_some_and(|p| p.is_active))
            .map(|c| c.chips)
            .try_fold(0i64, i64::checked_add)?;
        Some(Reconciliation::new(
            self.total_chips_in_play(),
            already_out.checked_add(newly_out)?,
        ))
    }

    /// Whether the pot, the money cashed out and the chips cashed out can
    /// each be summed without overflowing.
    fn totals_fit(&self) -> bool {
        let pot = self
            .players
            .iter()
            .try_fold(Money::ZERO, |acc, p| acc.checked_add(p.total_in));
        let cashed_out = self
            .players
            .iter()
            .filter_map(|p| p.cash_out)
            .try_fold(Money::ZERO, Money::checked_add);
        let chips_out = self
            .players
            .iter()
            .filter_map(|p| p.cash_out_chips)
            .try_fold(0i64, i64::checked_add);
        pot.is_some() && cashed_out.is_some() && chips_out.is_some()
    }

    /// Apply one event and return the resulting game.
    ///
    /// `now` is used for anything the event timestamps. On error `self` is
    /// untouched and the error says why; the event can be retried with
    /// corrected input.
    ///
    /// # Example
    ///
    /// ```
    /// use poker_night::core::Timestamp;
    /// use poker_night::ledger::{Game, GameEvent, Phase};
    ///
    /// let game = Game::default()
    ///     .apply(&GameEvent::AddPlayer { name: "Alice".into() }, Timestamp(0))
    ///     .unwrap();
    ///
    /// // One player isn't enough to start.
    /// let err = game.apply(&GameEvent::StartGame, Timestamp(0));
    /// assert!(err.is_err());
    /// assert_eq!(game.phase, Phase::Setup);
    /// ```
    pub fn apply(&self, event: &GameEvent, now: Timestamp) -> Result<Game, GameError> {
        let mut next = self.clone();
        let result = next.transition(event, now).and_then(|()| {
            if next.totals_fit() {
                Ok(())
            } else {
                Err(self.invalid(TransitionError::AmountOutOfRange))
            }
        });
        match result {
            Ok(()) => {
                debug!(event = event.name(), from = %self.phase, to = %next.phase, "Applied event");
                Ok(next)
            }
            Err(err) => {
                debug!(event = event.name(), phase = %self.phase, %err, "Rejected event");
                Err(err)
            }
        }
    }

    fn transition(&mut self, event: &GameEvent, now: Timestamp) -> Result<(), GameError> {
        match (self.phase, event) {
            (Phase::Setup | Phase::Active, GameEvent::AddPlayer { name }) => {
                self.add_player(name)
            }
            (Phase::Setup, GameEvent::RemovePlayer(id)) => self.remove_player(*id),
            (Phase::Setup, GameEvent::SetBuyIn(amount)) => {
                self.buy_in = *amount;
                Ok(())
            }
            (Phase::Setup, GameEvent::CommitBuyIn(amount)) => {
                self.buy_in = self.config.commit_buy_in(*amount);
                Ok(())
            }
            (Phase::Setup, GameEvent::SetChipsPerBuyIn(chips)) => {
                self.chips_per_buy_in = *chips;
                Ok(())
            }
            (Phase::Setup, GameEvent::SetCurrency(currency)) => {
                self.currency = *currency;
                Ok(())
            }
            (Phase::Setup, GameEvent::StartGame) => self.start(now),
            (Phase::Active, GameEvent::AddRebuy { player_id, amount }) => {
                self.rebuy(*player_id, *amount, now)
            }
            (Phase::Active, GameEvent::CashOutPlayer { player_id, chips }) => {
                self.cash_out_player(*player_id, *chips)
            }
            (Phase::Active, GameEvent::StartCashout) => {
                self.phase = if self.num_active_players() == 0 {
                    Phase::Settled
                } else {
                    Phase::Cashout
                };
                Ok(())
            }
            (Phase::Active, GameEvent::FinishGame) => {
                let still_active = self.num_active_players();
                if still_active > 0 {
                    return Err(self.invalid(TransitionError::PlayersStillActive(still_active)));
                }
                self.phase = Phase::Settled;
                Ok(())
            }
            (Phase::Cashout, GameEvent::FinishGameWithCashouts(counts)) => {
                self.finish_with_cashouts(counts)
            }
            (Phase::Settled, GameEvent::NewGame) => {
                *self = Game::new(self.config.clone());
                Ok(())
            }
            (_, GameEvent::Unrecognized) => Ok(()),
            (_, event) => Err(self.invalid(TransitionError::WrongPhase {
                event: event.name(),
            })),
        }
    }

    fn invalid(&self, reason: TransitionError) -> GameError {
        GameError::invalid(self.phase, reason)
    }

    fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, GameError> {
        let phase = self.phase;
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(GameError::invalid(phase, TransitionError::UnknownPlayer(id)))
    }

    fn active_player_mut(&mut self, id: PlayerId) -> Result<&mut Player, GameError> {
        let phase = self.phase;
        let player = self.player_mut(id)?;
        if !player.is_active {
            return Err(GameError::invalid(phase, TransitionError::PlayerNotActive(id)));
        }
        Ok(player)
    }

    fn add_player(&mut self, name: &str) -> Result<(), GameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(self.invalid(TransitionError::EmptyName));
        }
        if self.player_by_name(name).is_some() {
            return Err(self.invalid(TransitionError::DuplicateName(name.to_string())));
        }

        // Joining a game already under way costs the full buy-in.
        let total_in = if self.phase == Phase::Active {
            self.buy_in
        } else {
            Money::ZERO
        };
        self.players.push(Player::new(name, total_in));
        Ok(())
    }

    fn remove_player(&mut self, id: PlayerId) -> Result<(), GameError> {
        let before = self.players.len();
        self.players.retain(|p| p.id != id);
        if self.players.len() == before {
            return Err(self.invalid(TransitionError::UnknownPlayer(id)));
        }
        Ok(())
    }

    fn start(&mut self, now: Timestamp) -> Result<(), GameError> {
        let required = self.config.min_players;
        if self.players.len() < required {
            return Err(self.invalid(TransitionError::NotEnoughPlayers {
                required,
                actual: self.players.len(),
            }));
        }
        if !self.buy_in.is_positive() {
            return Err(self.invalid(TransitionError::NonPositiveBuyIn(self.buy_in)));
        }
        if self.chips_per_buy_in == 0 {
            return Err(self.invalid(TransitionError::ZeroChipsPerBuyIn));
        }

        let buy_in = self.buy_in;
        for player in self.players.iter_mut() {
            player.buy_in(buy_in);
        }
        self.game_started_at = Some(now);
        self.phase = Phase::Active;
        Ok(())
    }

    fn rebuy(&mut self, id: PlayerId, amount: Money, now: Timestamp) -> Result<(), GameError> {
        if !amount.is_positive() {
            return Err(self.invalid(TransitionError::NonPositiveRebuy(amount)));
        }
        let phase = self.phase;
        self.active_player_mut(id)?
            .rebuy(amount, now)
            .map_err(|reason| GameError::invalid(phase, reason))
    }

    fn cash_out_player(&mut self, id: PlayerId, chips: i64) -> Result<(), GameError> {
        if chips < 0 {
            return Err(self.invalid(TransitionError::NegativeChips {
                player_id: id,
                chips,
            }));
        }
        let money = self.money_for_chips(chips)?;
        self.active_player_mut(id)?.record_cash_out(chips, money);
        Ok(())
    }

    fn money_for_chips(&self, chips: i64) -> Result<Money, GameError> {
        // Start guarantees a chip value, but a loaded game might not have one.
        let value = self
            .chip_value()
            .ok_or_else(|| self.invalid(TransitionError::ZeroChipsPerBuyIn))?;
        value
            .money_for_chips(chips)
            .ok_or_else(|| self.invalid(TransitionError::AmountOutOfRange))
    }

    fn finish_with_cashouts(&mut self, counts: &[ChipCount]) -> Result<(), GameError> {
        let mut seen = HashSet::with_capacity(counts.len());
        for count in counts {
            let player = self
                .player(count.player_id)
                .ok_or_else(|| self.invalid(TransitionError::UnknownPlayer(count.player_id)))?;
            if !player.is_active {
                return Err(self.invalid(TransitionError::PlayerNotActive(count.player_id)));
            }
            if !seen.insert(count.player_id) {
                return Err(self.invalid(TransitionError::DuplicateChipCount(count.player_id)));
            }
            if count.chips < 0 {
                return Err(self.invalid(TransitionError::NegativeChips {
                    player_id: count.player_id,
                    chips: count.chips,
                }));
            }
        }
        if let Some(missing) = self.active_players().find(|p| !seen.contains(&p.id)) {
            return Err(self.invalid(TransitionError::MissingChipCount(missing.id)));
        }

        let reconciliation = self
            .reconcile(counts)
            .ok_or_else(|| self.invalid(TransitionError::AmountOutOfRange))?;
        if !reconciliation.is_within(self.config.chip_tolerance) {
            return Err(GameError::Reconciliation(reconciliation));
        }

        for count in counts {
            let money = self.money_for_chips(count.chips)?;
            self.active_player_mut(count.player_id)?
                .record_cash_out(count.chips, money);
        }
        self.phase = Phase::Settled;
        Ok(())
    }
}

/// Loads a game that already exists, typically one read back from storage
/// mid-session, and checks it is something the state machine could have
/// produced.
///
/// # Example
///
/// ```
/// use poker_night::core::{Money, Timestamp};
/// use poker_night::ledger::{Game, Phase, Player};
///
/// let game = Game::builder()
///     .phase(Phase::Active)
///     .buy_in(Money::from_units(100))
///     .players(vec![
///         Player::new("Alice", Money::from_units(100)),
///         Player::new("Bob", Money::from_units(150)),
///     ])
///     .game_started_at(Timestamp(1_700_000_000_000))
///     .build()
///     .unwrap();
///
/// assert_eq!(game.total_pot(), Money::from_units(250));
/// ```
#[derive(Default, Clone, Debug)]
pub struct GameBuilder {
    config: Option<GameConfig>,
    phase: Option<Phase>,
    buy_in: Option<Money>,
    chips_per_buy_in: Option<u32>,
    currency: Option<Currency>,
    players: Option<Vec<Player>>,
    game_started_at: Option<Timestamp>,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults to `GameConfig::default()`.
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Defaults to `Phase::Setup`.
    pub fn phase(mut self, phase: Phase) -> Self {
        self.phase = Some(phase);
        self
    }

    /// Defaults to the config's default buy-in.
    pub fn buy_in(mut self, buy_in: Money) -> Self {
        self.buy_in = Some(buy_in);
        self
    }

    /// Defaults to the config's default chips per buy-in.
    pub fn chips_per_buy_in(mut self, chips: u32) -> Self {
        self.chips_per_buy_in = Some(chips);
        self
    }

    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    pub fn players(mut self, players: Vec<Player>) -> Self {
        self.players = Some(players);
        self
    }

    pub fn game_started_at(mut self, at: Timestamp) -> Self {
        self.game_started_at = Some(at);
        self
    }

    pub fn build(self) -> Result<Game, GameBuilderError> {
        let config = self.config.unwrap_or_default();
        config
            .validate()
            .map_err(|e| GameBuilderError::InvalidConfig(e.to_string()))?;

        let phase = self.phase.unwrap_or_default();
        let players = self.players.unwrap_or_default();

        let mut ids = HashSet::with_capacity(players.len());
        let mut names = HashSet::with_capacity(players.len());
        for player in &players {
            if !ids.insert(player.id) {
                return Err(GameBuilderError::DuplicatePlayerId(player.id));
            }
            if !names.insert(player.name.to_lowercase()) {
                return Err(GameBuilderError::DuplicatePlayerName(player.name.clone()));
            }
            if player.total_in.is_negative() {
                return Err(GameBuilderError::NegativeTotalIn(player.id));
            }
            match (player.is_active, player.cash_out, player.cash_out_chips) {
                (false, Some(_), Some(_)) | (true, None, None) => {}
                (false, _, _) => return Err(GameBuilderError::MissingCashOut(player.id)),
                (true, _, _) => return Err(GameBuilderError::UnexpectedCashOut(player.id)),
            }
        }

        let game = Game {
            phase,
            buy_in: self.buy_in.unwrap_or(config.default_buy_in),
            chips_per_buy_in: self
                .chips_per_buy_in
                .unwrap_or(config.default_chips_per_buy_in),
            currency: self.currency.unwrap_or(config.default_currency),
            players,
            game_started_at: self.game_started_at,
            config,
        };

        if phase != Phase::Setup {
            if game.game_started_at.is_none() {
                return Err(GameBuilderError::MissingStartTime(phase));
            }
            if game.chip_value().is_none() {
                return Err(GameBuilderError::MissingChipValue(phase));
            }
        }

        let still_active = game.num_active_players();
        if phase == Phase::Settled && still_active > 0 {
            return Err(GameBuilderError::ActivePlayersInSettledGame(still_active));
        }
        if !game.totals_fit() {
            return Err(GameBuilderError::AmountOutOfRange);
        }

        Ok(game)
    }
}

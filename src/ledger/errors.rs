use thiserror::Error;

use crate::core::{Money, PlayerId};

use super::game::Phase;
use super::reconcile::Reconciliation;

/// Why a single transition was refused.
#[derive(Error, Debug, PartialEq, Eq, Clone, Hash)]
pub enum TransitionError {
    #[error("{event} is not allowed in this phase")]
    WrongPhase { event: &'static str },

    #[error("player name can't be empty")]
    EmptyName,

    #[error("a player named {0} is already in the game")]
    DuplicateName(String),

    #[error("no player with id {0}")]
    UnknownPlayer(PlayerId),

    #[error("player {0} has already cashed out")]
    PlayerNotActive(PlayerId),

    #[error("need at least {required} players, have {actual}")]
    NotEnoughPlayers { required: usize, actual: usize },

    #[error("buy-in must be positive, got {0}")]
    NonPositiveBuyIn(Money),

    #[error("chips per buy-in must be positive")]
    ZeroChipsPerBuyIn,

    #[error("rebuy must be positive, got {0}")]
    NonPositiveRebuy(Money),

    #[error("chip count for player {player_id} must be non-negative, got {chips}")]
    NegativeChips { player_id: PlayerId, chips: i64 },

    #[error("{0} player(s) have not cashed out yet")]
    PlayersStillActive(usize),

    #[error("no chip count supplied for player {0}")]
    MissingChipCount(PlayerId),

    #[error("more than one chip count supplied for player {0}")]
    DuplicateChipCount(PlayerId),

    #[error("amount is too large to keep track of")]
    AmountOutOfRange,
}

/// Errors returned by [`super::Game::apply`]. The game the event was applied
/// to is never changed when one of these comes back.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum GameError {
    #[error("invalid transition in {phase} phase: {reason}")]
    InvalidTransition {
        phase: Phase,
        reason: TransitionError,
    },

    #[error("chip counts don't reconcile: {0}")]
    Reconciliation(Reconciliation),
}

impl GameError {
    pub(crate) fn invalid(phase: Phase, reason: TransitionError) -> Self {
        GameError::InvalidTransition { phase, reason }
    }

    pub fn reason(&self) -> Option<&TransitionError> {
        match self {
            GameError::InvalidTransition { reason, .. } => Some(reason),
            GameError::Reconciliation(_) => None,
        }
    }
}

/// Errors that can occur when loading a `Game` through the builder.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum GameBuilderError {
    #[error("player id {0} appears more than once")]
    DuplicatePlayerId(PlayerId),

    #[error("player name {0} appears more than once")]
    DuplicatePlayerName(String),

    #[error("player {0} is inactive but has no cash-out recorded")]
    MissingCashOut(PlayerId),

    #[error("player {0} is active but already has a cash-out recorded")]
    UnexpectedCashOut(PlayerId),

    #[error("player {0} has a negative total in")]
    NegativeTotalIn(PlayerId),

    #[error("a game in the {0} phase needs a start time")]
    MissingStartTime(Phase),

    #[error("a game in the {0} phase needs a positive buy-in and chips per buy-in")]
    MissingChipValue(Phase),

    #[error("a settled game can't have {0} active player(s)")]
    ActivePlayersInSettledGame(usize),

    #[error("the game's totals are too large to add up")]
    AmountOutOfRange,

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Errors from building or loading a [`super::GameConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0}")]
    Invalid(String),

    #[cfg(feature = "serde")]
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

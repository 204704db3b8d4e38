//! The life of one game night, from seating players to settling up.
//!
//! A [`Game`] moves through four [`Phase`]s, `Setup`, `Active`, `Cashout`,
//! and `Settled`, driven by [`GameEvent`]s. [`apply`] is the whole state
//! machine: it takes a game and an event and returns the next game, or a
//! [`GameError`] explaining why the event was refused.
//!
//! [`GameSession`] wraps a game with a clock and a set of [`GameObserver`]s
//! for callers that want to hold one mutable game and be told about changes.
mod config;
mod errors;
mod event;
mod game;
mod player;
mod reconcile;
mod session;

pub mod observer;

pub use config::GameConfig;
pub use errors::{ConfigError, GameBuilderError, GameError, TransitionError};
pub use event::{ChipCount, GameEvent};
pub use game::{Game, GameBuilder, Phase};
pub use observer::{GameObserver, ObserverError};
pub use player::{Player, Rebuy};
pub use reconcile::Reconciliation;
pub use session::{GameSession, GameSessionBuilder};

use crate::core::Timestamp;

/// Apply `event` to `game` at time `now`. See [`Game::apply`].
pub fn apply(game: &Game, event: &GameEvent, now: Timestamp) -> Result<Game, GameError> {
    game.apply(event, now)
}

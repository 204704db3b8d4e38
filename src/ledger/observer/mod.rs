//! Hooks for whatever needs to follow a game as it changes.
//!
//! A [`GameObserver`] is told about every event a [`super::GameSession`]
//! accepts, along with the game that resulted. Storage and sync live behind
//! this trait; the state machine itself never does I/O.
mod failing;
mod null;
mod vec;

pub use failing::FailingObserver;
pub use null::NullObserver;
pub use vec::{ObservedEvent, VecObserver};

use thiserror::Error;

use super::{Game, GameEvent};

#[derive(Error, Debug)]
pub enum ObserverError {
    #[error("Unable to record event")]
    UnableToRecord,

    #[error("Storage is already borrowed")]
    BorrowMut(#[from] std::cell::BorrowMutError),
}

/// Something that wants to hear about accepted events.
pub trait GameObserver {
    /// Called after `event` has been applied. `game` is the state after the
    /// event.
    fn record(&mut self, game: &Game, event: &GameEvent) -> Result<(), ObserverError>;
}

use tracing::warn;

use super::{GameObserver, ObserverError};
use crate::ledger::{Game, GameEvent};

/// An observer that always fails.
///
/// Useful for testing how a session copes with a broken storage layer.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingObserver;

impl GameObserver for FailingObserver {
    fn record(&mut self, _game: &Game, event: &GameEvent) -> Result<(), ObserverError> {
        warn!(event = event.name(), "FailingObserver intentionally returning error");
        Err(ObserverError::UnableToRecord)
    }
}

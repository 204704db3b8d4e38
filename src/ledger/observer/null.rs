use super::{GameObserver, ObserverError};
use crate::ledger::{Game, GameEvent};

/// An observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl GameObserver for NullObserver {
    fn record(&mut self, _game: &Game, _event: &GameEvent) -> Result<(), ObserverError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Timestamp;

    #[test]
    fn test_null_observer_accepts_events() {
        let mut observer = NullObserver;
        let event = GameEvent::AddPlayer {
            name: "Alice".to_string(),
        };
        let game = Game::default().apply(&event, Timestamp(0)).unwrap();

        assert!(observer.record(&game, &event).is_ok());
    }
}

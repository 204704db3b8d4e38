use std::{cell::RefCell, rc::Rc};

use super::{GameObserver, ObserverError};
use crate::ledger::{Game, GameEvent};

/// An accepted event and the game it produced.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObservedEvent {
    pub event: GameEvent,
    pub game: Game,
}

/// Keeps every accepted event in memory.
///
/// The storage is shared, so hold on to [`VecObserver::get_storage`] before
/// handing the observer to a session.
#[derive(Debug, Default, Clone)]
pub struct VecObserver {
    storage: Rc<RefCell<Vec<ObservedEvent>>>,
}

impl VecObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_with_storage(storage: Rc<RefCell<Vec<ObservedEvent>>>) -> Self {
        VecObserver { storage }
    }

    pub fn get_storage(&self) -> Rc<RefCell<Vec<ObservedEvent>>> {
        self.storage.clone()
    }
}

impl GameObserver for VecObserver {
    fn record(&mut self, game: &Game, event: &GameEvent) -> Result<(), ObserverError> {
        self.storage.try_borrow_mut()?.push(ObservedEvent {
            event: event.clone(),
            game: game.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Timestamp;
    use crate::ledger::Phase;

    #[test]
    fn test_vec_observer_keeps_events_in_order() {
        let mut observer = VecObserver::new();
        let storage = observer.get_storage();

        let mut game = Game::default();
        for name in ["Alice", "Bob"] {
            let event = GameEvent::AddPlayer {
                name: name.to_string(),
            };
            game = game.apply(&event, Timestamp(0)).unwrap();
            observer.record(&game, &event).unwrap();
        }

        let recorded = storage.borrow();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].game.players.len(), 1);
        assert_eq!(recorded[1].game.players.len(), 2);
        assert_eq!(recorded[1].game.phase, Phase::Setup);
    }

    #[test]
    fn test_vec_observer_fails_while_storage_borrowed() {
        let mut observer = VecObserver::new();
        let storage = observer.get_storage();
        let _held = storage.borrow_mut();

        let result = observer.record(&Game::default(), &GameEvent::Unrecognized);
        assert!(matches!(result, Err(ObserverError::BorrowMut(_))));
    }
}

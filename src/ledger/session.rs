use tracing::{instrument, warn};

use crate::core::{Clock, SystemClock};
use crate::settlement::{GameSummary, Transfer};

use super::{
    Game, GameConfig, GameEvent,
    errors::{ConfigError, GameError},
    observer::GameObserver,
};

/// A game plus everything needed to run it: a clock for timestamps and the
/// observers that follow it.
///
/// Each [`GameSession::dispatch`] reads the clock once, applies the event,
/// and only then tells the observers. A refused event changes nothing and
/// nobody is told.
///
/// # Example
///
/// ```
/// use poker_night::ledger::{GameEvent, GameSessionBuilder, Phase};
///
/// let mut session = GameSessionBuilder::default().build().unwrap();
/// session.dispatch(GameEvent::AddPlayer { name: "Alice".into() }).unwrap();
/// session.dispatch(GameEvent::AddPlayer { name: "Bob".into() }).unwrap();
/// session.dispatch(GameEvent::StartGame).unwrap();
///
/// assert_eq!(session.game().phase, Phase::Active);
/// ```
pub struct GameSession {
    game: Game,
    clock: Box<dyn Clock>,
    observers: Vec<Box<dyn GameObserver>>,
}

impl GameSession {
    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn into_game(self) -> Game {
        self.game
    }

    pub fn num_observers(&self) -> usize {
        self.observers.len()
    }

    /// Apply `event` to the session's game.
    ///
    /// Observers are only told when the game actually changed. An observer
    /// that fails is logged and dropped; the new state is kept either way.
    #[instrument(level = "debug", skip(self, event), fields(event = event.name()))]
    pub fn dispatch(&mut self, event: GameEvent) -> Result<&Game, GameError> {
        let now = self.clock.now();
        let next = self.game.apply(&event, now)?;
        if next != self.game {
            self.game = next;
            self.notify(&event);
        }
        Ok(&self.game)
    }

    fn notify(&mut self, event: &GameEvent) {
        let game = &self.game;
        self.observers.retain_mut(|observer| match observer.record(game, event) {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, event = event.name(), "Dropping observer that failed to record");
                false
            }
        });
    }

    pub fn settlements(&self) -> Vec<Transfer> {
        self.game.settlements()
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary::from_game(&self.game)
    }
}

/// Builder for a [`GameSession`]. Everything is optional: by default the
/// session starts a fresh game with `GameConfig::default()`, reads the system
/// clock, and has no observers.
#[derive(Default)]
pub struct GameSessionBuilder {
    game: Option<Game>,
    config: Option<GameConfig>,
    clock: Option<Box<dyn Clock>>,
    observers: Vec<Box<dyn GameObserver>>,
}

impl GameSessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume an existing game. Its own config wins over [`Self::config`].
    pub fn game(mut self, game: Game) -> Self {
        self.game = Some(game);
        self
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn observers(mut self, observers: Vec<Box<dyn GameObserver>>) -> Self {
        self.observers = observers;
        self
    }

    pub fn observer(mut self, observer: Box<dyn GameObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn build(self) -> Result<GameSession, ConfigError> {
        let game = match self.game {
            Some(game) => game,
            None => Game::new(self.config.unwrap_or_default()),
        };
        game.config.validate()?;

        Ok(GameSession {
            game,
            clock: self.clock.unwrap_or_else(|| Box::new(SystemClock)),
            observers: self.observers,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::core::{FixedClock, Money, Timestamp};
    use crate::ledger::observer::{FailingObserver, NullObserver, VecObserver};
    use crate::ledger::{ChipCount, Phase};

    fn session_with_clock(clock: Rc<FixedClock>, observer: VecObserver) -> GameSession {
        GameSessionBuilder::new()
            .clock(Box::new(clock))
            .observer(Box::new(observer))
            .build()
            .unwrap()
    }

    #[test_log::test]
    fn test_full_night() {
        let clock = Rc::new(FixedClock::new(1_000));
        let observer = VecObserver::new();
        let storage = observer.get_storage();
        let mut session = session_with_clock(clock.clone(), observer);

        for name in ["Alice", "Bob", "Carol"] {
            session
                .dispatch(GameEvent::AddPlayer { name: name.to_string() })
                .unwrap();
        }
        session.dispatch(GameEvent::CommitBuyIn(Money::from_units(140))).unwrap();
        session.dispatch(GameEvent::StartGame).unwrap();
        assert_eq!(session.game().buy_in, Money::from_units(150));
        assert_eq!(session.game().game_started_at, Some(Timestamp(1_000)));

        clock.advance(30_000);
        let bob = session.game().player_by_name("Bob").unwrap().id;
        session
            .dispatch(GameEvent::AddRebuy {
                player_id: bob,
                amount: Money::from_units(150),
            })
            .unwrap();
        assert_eq!(
            session.game().player(bob).unwrap().rebuys[0].timestamp,
            Timestamp(31_000)
        );

        session.dispatch(GameEvent::StartCashout).unwrap();
        let counts: Vec<ChipCount> = [("Alice", 500), ("Bob", 100), ("Carol", 200)]
            .iter()
            .map(|(name, chips)| {
                ChipCount::new(session.game().player_by_name(name).unwrap().id, *chips)
            })
            .collect();
        session
            .dispatch(GameEvent::FinishGameWithCashouts(counts))
            .unwrap();

        assert_eq!(session.game().phase, Phase::Settled);
        assert_eq!(session.settlements().len(), 1);
        assert_eq!(session.summary().total_pot, Money::from_units(600));

        let recorded = storage.borrow();
        assert_eq!(recorded.len(), 8);
        assert_eq!(recorded.last().unwrap().game.phase, Phase::Settled);
    }

    #[test]
    fn test_rejected_event_is_not_observed() {
        let observer = VecObserver::new();
        let storage = observer.get_storage();
        let mut session = session_with_clock(Rc::new(FixedClock::new(0)), observer);

        session
            .dispatch(GameEvent::AddPlayer { name: "Alice".into() })
            .unwrap();
        assert!(session.dispatch(GameEvent::StartGame).is_err());
        assert!(session.dispatch(GameEvent::Unrecognized).is_ok());

        assert_eq!(storage.borrow().len(), 1);
        assert_eq!(session.game().phase, Phase::Setup);
    }

    #[test_log::test]
    fn test_failing_observer_is_dropped() {
        let observers: Vec<Box<dyn GameObserver>> =
            vec![Box::new(FailingObserver), Box::new(NullObserver)];
        let mut session = GameSessionBuilder::new()
            .observers(observers)
            .build()
            .unwrap();
        assert_eq!(session.num_observers(), 2);

        session
            .dispatch(GameEvent::AddPlayer { name: "Alice".into() })
            .unwrap();

        assert_eq!(session.num_observers(), 1);
        assert_eq!(session.game().players.len(), 1);
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let config = GameConfig {
            min_players: 0,
            ..GameConfig::default()
        };
        assert!(GameSessionBuilder::new().config(config).build().is_err());
    }

    #[test]
    fn test_resume_existing_game() {
        let game = Game::default()
            .apply(&GameEvent::AddPlayer { name: "Alice".into() }, Timestamp(0))
            .unwrap();
        let session = GameSessionBuilder::new().game(game.clone()).build().unwrap();
        assert_eq!(session.into_game(), game);
    }
}

//! Bookkeeping for a home poker game.
//!
//! Players buy in, rebuy, and cash out their chips. At the end of the night
//! [`settlement::settle`] works out who pays whom with as few transfers as the
//! greedy largest-first pairing allows.
//!
//! - [`core`] has the value types: fixed point [`core::Money`], chip value
//!   conversion, ids and clocks.
//! - [`ledger`] is the game state machine.
//! - [`settlement`] turns final balances into transfers and an end of night
//!   summary.
//!
//! ```
//! use poker_night::core::{Money, Timestamp};
//! use poker_night::ledger::{Game, GameEvent};
//! use poker_night::settlement::Transfer;
//!
//! let now = Timestamp(0);
//! let mut game = Game::default();
//! for name in ["Alice", "Bob"] {
//!     game = game.apply(&GameEvent::AddPlayer { name: name.into() }, now).unwrap();
//! }
//! game = game.apply(&GameEvent::StartGame, now).unwrap();
//!
//! // 100.00 buys 200 chips. Alice leaves with 300, Bob with 100.
//! let alice = game.player_by_name("Alice").unwrap().id;
//! let bob = game.player_by_name("Bob").unwrap().id;
//! game = game.apply(&GameEvent::CashOutPlayer { player_id: alice, chips: 300 }, now).unwrap();
//! game = game.apply(&GameEvent::CashOutPlayer { player_id: bob, chips: 100 }, now).unwrap();
//! game = game.apply(&GameEvent::FinishGame, now).unwrap();
//!
//! assert_eq!(
//!     game.settlements(),
//!     vec![Transfer::new("Bob", "Alice", Money::from_units(50))]
//! );
//! ```
pub mod core;
pub mod ledger;
pub mod settlement;

#[cfg(any(test, feature = "test-util"))]
pub mod test_util;

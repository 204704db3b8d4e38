#![no_main]

extern crate arbitrary;
extern crate libfuzzer_sys;
extern crate poker_night;

use libfuzzer_sys::fuzz_target;

use poker_night::core::{Money, PlayerId, Timestamp};
use poker_night::ledger::{ChipCount, Game, GameEvent, Phase};
use poker_night::test_util::{assert_valid_game, assert_valid_settlement};

/// Events with players picked by seat index, so the fuzzer can actually hit
/// players that exist.
#[derive(Debug, Clone, arbitrary::Arbitrary)]
enum Op {
    AddPlayer(u8),
    RemovePlayer(u8),
    SetBuyIn(i32),
    CommitBuyIn(i32),
    SetChipsPerBuyIn(u16),
    StartGame,
    AddRebuy(u8, i32),
    CashOutPlayer(u8, i32),
    StartCashout,
    FinishGame,
    FinishGameWithCashouts(Vec<(u8, i32)>),
    NewGame,
    Unrecognized,
}

fn seat(game: &Game, idx: u8) -> PlayerId {
    if game.players.is_empty() {
        PlayerId::new()
    } else {
        game.players[idx as usize % game.players.len()].id
    }
}

fn to_event(game: &Game, op: &Op) -> GameEvent {
    match op {
        Op::AddPlayer(n) => GameEvent::AddPlayer {
            name: format!("player-{}", n % 16),
        },
        Op::RemovePlayer(idx) => GameEvent::RemovePlayer(seat(game, *idx)),
        Op::SetBuyIn(cents) => GameEvent::SetBuyIn(Money::from_cents(*cents as i64)),
        Op::CommitBuyIn(cents) => GameEvent::CommitBuyIn(Money::from_cents(*cents as i64)),
        Op::SetChipsPerBuyIn(chips) => GameEvent::SetChipsPerBuyIn(*chips as u32),
        Op::StartGame => GameEvent::StartGame,
        Op::AddRebuy(idx, cents) => GameEvent::AddRebuy {
            player_id: seat(game, *idx),
            amount: Money::from_cents(*cents as i64),
        },
        Op::CashOutPlayer(idx, chips) => GameEvent::CashOutPlayer {
            player_id: seat(game, *idx),
            chips: *chips as i64,
        },
        Op::StartCashout => GameEvent::StartCashout,
        Op::FinishGame => GameEvent::FinishGame,
        Op::FinishGameWithCashouts(counts) => GameEvent::FinishGameWithCashouts(
            counts
                .iter()
                .map(|(idx, chips)| ChipCount::new(seat(game, *idx), *chips as i64))
                .collect(),
        ),
        Op::NewGame => GameEvent::NewGame,
        Op::Unrecognized => GameEvent::Unrecognized,
    }
}

fuzz_target!(|ops: Vec<Op>| {
    let mut game = Game::default();

    for (step, op) in ops.iter().enumerate() {
        let event = to_event(&game, op);
        let before = game.clone();
        match game.apply(&event, Timestamp(step as u64)) {
            Ok(next) => {
                if event != GameEvent::NewGame {
                    assert!(next.phase >= before.phase);
                }
                game = next;
            }
            Err(_) => assert_eq!(before, game),
        }
        assert_valid_game(&game);

        if game.phase == Phase::Settled {
            let balances = game.balances();
            let total: Money = balances.iter().map(|b| b.net).sum();
            if total == Money::ZERO {
                assert_valid_settlement(&balances, &game.settlements());
            }
        }
    }
});

use crate::core::{Currency, Money, PlayerId};

/// Chips a player is leaving the table with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ChipCount {
    pub player_id: PlayerId,
    pub chips: i64,
}

impl ChipCount {
    pub fn new(player_id: PlayerId, chips: i64) -> Self {
        ChipCount { player_id, chips }
    }
}

/// Everything that can happen to a game.
///
/// With the `serde` feature these use a `{"type": ..., "payload": ...}`
/// envelope, and any unknown `type` reads back as
/// [`GameEvent::Unrecognized`] whatever its payload. It applies as a no-op.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        remote = "Self",
        tag = "type",
        content = "payload",
        rename_all = "SCREAMING_SNAKE_CASE",
        rename_all_fields = "camelCase"
    )
)]
pub enum GameEvent {
    /// Seat a new player. Mid-game joiners pay the full buy-in.
    AddPlayer { name: String },
    /// Remove a player before the game starts.
    RemovePlayer(PlayerId),
    /// Raw buy-in as typed; not rounded.
    #[cfg_attr(feature = "serde", serde(rename = "SET_BUYIN"))]
    SetBuyIn(Money),
    /// Buy-in as committed by the user, rounded to the configured unit.
    #[cfg_attr(feature = "serde", serde(rename = "COMMIT_BUYIN"))]
    CommitBuyIn(Money),
    #[cfg_attr(feature = "serde", serde(rename = "SET_CHIPS_PER_BUYIN"))]
    SetChipsPerBuyIn(u32),
    SetCurrency(Currency),
    StartGame,
    AddRebuy { player_id: PlayerId, amount: Money },
    CashOutPlayer { player_id: PlayerId, chips: i64 },
    /// Stop play and count everyone who is still in.
    StartCashout,
    /// Close a game where everyone already cashed out.
    FinishGame,
    FinishGameWithCashouts(Vec<ChipCount>),
    NewGame,
    #[cfg_attr(feature = "serde", serde(other))]
    Unrecognized,
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::AddPlayer { .. } => "ADD_PLAYER",
            GameEvent::RemovePlayer(_) => "REMOVE_PLAYER",
            GameEvent::SetBuyIn(_) => "SET_BUYIN",
            GameEvent::CommitBuyIn(_) => "COMMIT_BUYIN",
            GameEvent::SetChipsPerBuyIn(_) => "SET_CHIPS_PER_BUYIN",
            GameEvent::SetCurrency(_) => "SET_CURRENCY",
            GameEvent::StartGame => "START_GAME",
            GameEvent::AddRebuy { .. } => "ADD_REBUY",
            GameEvent::CashOutPlayer { .. } => "CASH_OUT_PLAYER",
            GameEvent::StartCashout => "START_CASHOUT",
            GameEvent::FinishGame => "FINISH_GAME",
            GameEvent::FinishGameWithCashouts(_) => "FINISH_GAME_WITH_CASHOUTS",
            GameEvent::NewGame => "NEW_GAME",
            GameEvent::Unrecognized => "UNRECOGNIZED",
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for GameEvent {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        GameEvent::serialize(self, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for GameEvent {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
        match GameEvent::deserialize(&value) {
            Ok(event) => Ok(event),
            Err(err) => {
                // Known types must be well formed. Unknown ones are dropped
                // along with whatever payload they carry.
                let tag_only = serde_json::json!({ "type": value.get("type") });
                match GameEvent::deserialize(&tag_only) {
                    Ok(GameEvent::Unrecognized) => Ok(GameEvent::Unrecognized),
                    _ => Err(D::Error::custom(err)),
                }
            }
        }
    }
}

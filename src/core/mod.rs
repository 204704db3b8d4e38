//! Value types shared by the ledger and the settlement solver.

mod chips;
mod currency;
mod money;
mod time;

use std::fmt;

pub use chips::ChipValue;
pub use currency::Currency;
pub use money::{Money, div_round_half_away};
pub use time::{Clock, FixedClock, SystemClock, Timestamp};

use uuid::Uuid;

/// Opaque identifier of a player, assigned when the player is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PlayerId(Uuid);

impl PlayerId {
    pub fn new() -> Self {
        PlayerId(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        PlayerId(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

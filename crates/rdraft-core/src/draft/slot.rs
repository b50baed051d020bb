// Draw outcomes: one slot per drawn champion.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::champion::ChampionRef;
use super::lane::Lane;
use super::roster::Player;

/// Stable slot identity: the draw generation plus the slot's position in
/// that draw. Survives rerolls, so caches keyed on it stay valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotUid {
    pub draw: u64,
    pub index: u32,
}

impl fmt::Display for SlotUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot-{}-{}", self.draw, self.index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub uid: SlotUid,
    pub champion: ChampionRef,
    /// Set together with `lane` in a single assignment step.
    pub player: Option<Player>,
    pub lane: Option<Lane>,
    /// Bumped on every reroll. Pair with `uid` to invalidate in-flight
    /// asset or audio work for the previous champion.
    pub rerolls: u32,
}

impl Slot {
    pub fn new(uid: SlotUid, champion: ChampionRef) -> Self {
        Slot {
            uid,
            champion,
            player: None,
            lane: None,
            rerolls: 0,
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.lane.is_some()
    }
}

// Turn sequencing: the shuffled order in which players pick, and the phase
// machine the session walks through.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{DraftError, DraftResult};
use super::random::RandomSource;
use super::roster::Player;
use super::slot::SlotUid;

/// Session lifecycle.
///
/// `Registering -> Drawing -> AwaitingPick -> AssigningLane -> AwaitingPick
/// -> ... -> Complete`. `reset` returns to `Registering` from anywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    /// Players are being added or removed.
    #[default]
    Registering,
    /// Champions are drawn and being revealed one by one.
    Drawing,
    /// Waiting for the current player to pick a revealed, unassigned slot.
    AwaitingPick,
    /// The current player picked `slot` and must confirm a lane.
    AssigningLane { slot: SlotUid },
    /// Every player has a champion and a lane.
    Complete,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Registering => "registering",
            Phase::Drawing => "drawing",
            Phase::AwaitingPick => "awaiting pick",
            Phase::AssigningLane { .. } => "assigning lane",
            Phase::Complete => "complete",
        }
    }

    /// Whether every drawn slot has been revealed.
    pub fn is_post_reveal(&self) -> bool {
        matches!(
            self,
            Phase::AwaitingPick | Phase::AssigningLane { .. } | Phase::Complete
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The order in which players choose. Independent of slot order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOrder {
    players: Vec<Player>,
}

impl TurnOrder {
    /// Fisher-Yates shuffle of a copy of `roster`. The input is not touched.
    pub fn shuffled<R: RandomSource + ?Sized>(roster: &[Player], rng: &mut R) -> Self {
        let mut players = roster.to_vec();
        for i in (1..players.len()).rev() {
            let j = rng.pick(i + 1);
            players.swap(i, j);
        }
        TurnOrder { players }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn get(&self, turn_index: usize) -> Option<&Player> {
        self.players.get(turn_index)
    }

}

/// Walks the turn order one completed assignment at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSequencer {
    order: TurnOrder,
    turn_index: usize,
}

impl TurnSequencer {
    pub fn new(order: TurnOrder) -> Self {
        TurnSequencer {
            order,
            turn_index: 0,
        }
    }

    pub fn order(&self) -> &TurnOrder {
        &self.order
    }

    /// Number of completed turns. Never exceeds the order length.
    pub fn turn_index(&self) -> usize {
        self.turn_index
    }

    /// The player whose turn it is, or `None` once every turn is done.
    pub fn current(&self) -> Option<&Player> {
        self.order.get(self.turn_index)
    }

    pub fn is_complete(&self) -> bool {
        self.turn_index >= self.order.players().len()
    }

    /// Move to the next turn. Returns `true` when that was the last one.
    pub fn advance(&mut self, phase: Phase) -> DraftResult<bool> {
        if self.is_complete() {
            return Err(DraftError::IllegalPhaseTransition {
                action: "advance the turn",
                phase,
            });
        }
        self.turn_index += 1;
        Ok(self.is_complete())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::random::{RngSource, ScriptedSource};

    fn players(names: &[&str]) -> Vec<Player> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| Player::new(*n, i as u32))
            .collect()
    }

    fn names(order: &TurnOrder) -> Vec<&str> {
        order.players().iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn shuffle_follows_fisher_yates_with_scripted_picks() {
        let roster = players(&["A", "B", "C"]);
        // i=2 picks j=0 -> [C, B, A]; i=1 picks j=1 -> unchanged.
        let order = TurnOrder::shuffled(&roster, &mut ScriptedSource::new(vec![0, 1]));
        assert_eq!(names(&order), vec!["C", "B", "A"]);
    }

    #[test]
    fn shuffle_does_not_touch_the_roster() {
        let roster = players(&["A", "B", "C", "D"]);
        let before = roster.clone();
        let _ = TurnOrder::shuffled(&roster, &mut RngSource::seeded(7));
        assert_eq!(roster, before);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let roster = players(&["A", "B", "C", "D", "E"]);
        for seed in 0..20 {
            let order = TurnOrder::shuffled(&roster, &mut RngSource::seeded(seed));
            let mut got = names(&order);
            got.sort();
            assert_eq!(got, vec!["A", "B", "C", "D", "E"]);
        }
    }

    #[test]
    fn sequencer_advances_to_completion_then_rejects() {
        let roster = players(&["A", "B"]);
        let mut seq = TurnSequencer::new(TurnOrder::shuffled(&roster, &mut ScriptedSource::new(vec![1])));
        assert_eq!(seq.current().map(|p| p.name.as_str()), Some("A"));
        assert_eq!(seq.advance(Phase::AssigningLane { slot: SlotUid { draw: 1, index: 0 } }), Ok(false));
        assert_eq!(seq.current().map(|p| p.name.as_str()), Some("B"));
        assert_eq!(seq.advance(Phase::AwaitingPick), Ok(true));
        assert!(seq.current().is_none());
        assert!(matches!(
            seq.advance(Phase::Complete),
            Err(DraftError::IllegalPhaseTransition { .. })
        ));
        assert_eq!(seq.turn_index(), 2);
    }

    #[test]
    fn phase_serializes_with_tag() {
        let json = serde_json::to_string(&Phase::AssigningLane {
            slot: SlotUid { draw: 3, index: 1 },
        })
        .unwrap();
        assert_eq!(json, r#"{"phase":"assigning_lane","slot":{"draw":3,"index":1}}"#);
    }
}

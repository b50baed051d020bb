// Registered players, in registration order.

use serde::{Deserialize, Serialize};

use super::error::{DraftError, DraftResult};
use super::random::RandomSource;

/// Fewest players a draw accepts.
pub const MIN_PLAYERS: usize = 2;
/// Most players a roster can hold (one per lane).
pub const MAX_PLAYERS: usize = 5;

/// Profile icon id shown next to a player's name.
pub type AvatarRef = u32;

/// Profile icon ranges that exist for every account, so a random pick always
/// resolves to an image.
const SAFE_AVATAR_RANGES: &[(u32, u32)] = &[(0, 3), (10, 30), (50, 79), (1000, 1050)];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub avatar: AvatarRef,
}

impl Player {
    pub fn new(name: impl Into<String>, avatar: AvatarRef) -> Self {
        Player {
            name: name.into(),
            avatar,
        }
    }
}

/// Ordered list of registered players, capped at [`MAX_PLAYERS`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a player. Returns `false` (and changes nothing) when the roster
    /// is already full. Names are not validated: empty and duplicate names
    /// are allowed.
    pub fn add_player(&mut self, name: impl Into<String>, avatar: AvatarRef) -> bool {
        if self.is_full() {
            return false;
        }
        self.players.push(Player::new(name, avatar));
        true
    }

    /// Remove the player at `index`, returning it.
    pub fn remove_player(&mut self, index: usize) -> DraftResult<Player> {
        if index >= self.players.len() {
            return Err(DraftError::OutOfRange {
                index,
                len: self.players.len(),
            });
        }
        Ok(self.players.remove(index))
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= MAX_PLAYERS
    }

    /// Read-only copy of the current players, taken when a draw begins.
    pub fn snapshot(&self) -> Vec<Player> {
        self.players.clone()
    }

    pub fn clear(&mut self) {
        self.players.clear();
    }
}

/// Reject a draw for fewer than `MIN_PLAYERS` or more than `MAX_PLAYERS`.
pub fn check_draw_size(count: usize) -> DraftResult<()> {
    if (MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
        Ok(())
    } else {
        Err(DraftError::Capacity {
            count,
            min: MIN_PLAYERS,
            max: MAX_PLAYERS,
        })
    }
}

/// Pick a random profile icon from the always-available set.
pub fn random_avatar<R: RandomSource + ?Sized>(rng: &mut R) -> AvatarRef {
    let total: u32 = SAFE_AVATAR_RANGES.iter().map(|(lo, hi)| hi - lo).sum();
    let mut n = rng.pick(total as usize) as u32;
    for (lo, hi) in SAFE_AVATAR_RANGES {
        let width = hi - lo;
        if n < width {
            return lo + n;
        }
        n -= width;
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::random::ScriptedSource;

    fn roster_of(n: usize) -> Roster {
        let mut roster = Roster::new();
        for i in 0..n {
            roster.add_player(format!("P{i}"), i as u32);
        }
        roster
    }

    #[test]
    fn add_player_appends_in_registration_order() {
        let roster = roster_of(3);
        let names: Vec<_> = roster.players().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["P0", "P1", "P2"]);
    }

    #[test]
    fn add_player_is_noop_when_full() {
        let mut roster = roster_of(MAX_PLAYERS);
        assert!(!roster.add_player("Extra", 7));
        assert_eq!(roster.len(), MAX_PLAYERS);
        assert!(roster.players().iter().all(|p| p.name != "Extra"));
    }

    #[test]
    fn empty_and_duplicate_names_are_allowed() {
        let mut roster = Roster::new();
        assert!(roster.add_player("", 1));
        assert!(roster.add_player("Teemo", 2));
        assert!(roster.add_player("Teemo", 3));
        assert_eq!(roster.len(), 3);
    }

    #[test]
    fn remove_player_returns_removed_entry() {
        let mut roster = roster_of(3);
        let removed = roster.remove_player(1).unwrap();
        assert_eq!(removed.name, "P1");
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.players()[1].name, "P2");
    }

    #[test]
    fn remove_player_out_of_range_leaves_roster_unchanged() {
        let mut roster = roster_of(2);
        let before = roster.clone();
        assert_eq!(
            roster.remove_player(2),
            Err(DraftError::OutOfRange { index: 2, len: 2 })
        );
        assert_eq!(roster, before);
    }

    #[test]
    fn draw_size_bounds() {
        assert!(check_draw_size(roster_of(1).len()).is_err());
        assert_eq!(check_draw_size(roster_of(2).len()), Ok(()));
        assert_eq!(check_draw_size(roster_of(5).len()), Ok(()));
        assert_eq!(
            check_draw_size(6),
            Err(DraftError::Capacity { count: 6, min: 2, max: 5 })
        );
    }

    #[test]
    fn random_avatar_walks_safe_ranges() {
        assert_eq!(random_avatar(&mut ScriptedSource::new(vec![0])), 0);
        assert_eq!(random_avatar(&mut ScriptedSource::new(vec![3])), 10);
        assert_eq!(random_avatar(&mut ScriptedSource::new(vec![23])), 50);
        assert_eq!(random_avatar(&mut ScriptedSource::new(vec![52])), 1000);
        assert_eq!(random_avatar(&mut ScriptedSource::new(vec![101])), 1049);
    }
}

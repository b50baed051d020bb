// Mystery voice round: play a random champion's pick or ban line and let the
// group guess who it is before revealing.

use crate::draft::champion::ChampionRef;
use crate::draft::error::{DraftError, DraftResult};
use crate::draft::random::RandomSource;
use crate::protocol::{CueKind, MysteryView};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MysteryRound {
    champion: ChampionRef,
    kind: CueKind,
    revealed: bool,
}

impl MysteryRound {
    /// Pick a champion and a cue kind (pick or ban line, even odds).
    pub fn start<R: RandomSource + ?Sized>(
        catalog: &[ChampionRef],
        rng: &mut R,
    ) -> DraftResult<Self> {
        if catalog.is_empty() {
            return Err(DraftError::CatalogNotReady);
        }
        let champion = catalog[rng.pick(catalog.len())].clone();
        let kind = if rng.pick(2) == 0 {
            CueKind::Choice
        } else {
            CueKind::Ban
        };
        Ok(MysteryRound {
            champion,
            kind,
            revealed: false,
        })
    }

    pub fn kind(&self) -> CueKind {
        self.kind
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// The champion whose line is played. Audio only; not for display.
    pub fn voiced(&self) -> &ChampionRef {
        &self.champion
    }

    pub fn reveal(&mut self) -> &ChampionRef {
        self.revealed = true;
        &self.champion
    }

    /// Case-insensitive match against the display name or id.
    pub fn is_correct(&self, guess: &str) -> bool {
        let guess = guess.trim();
        guess.eq_ignore_ascii_case(&self.champion.name) || guess.eq_ignore_ascii_case(&self.champion.id)
    }

    pub fn view(&self) -> MysteryView {
        MysteryView {
            kind: self.kind,
            champion: self.revealed.then(|| self.champion.clone()),
            active: true,
        }
    }
}

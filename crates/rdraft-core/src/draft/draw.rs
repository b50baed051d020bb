// Champion draw (sampling without replacement) and single-slot reroll.

use std::collections::HashSet;

use tracing::debug;

use super::champion::ChampionRef;
use super::error::{DraftError, DraftResult};
use super::random::RandomSource;
use super::roster::{check_draw_size, Player};
use super::slot::{Slot, SlotUid};

/// Result of a successful reroll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RerollOutcome {
    pub uid: SlotUid,
    pub previous: ChampionRef,
    pub champion: ChampionRef,
    /// The slot's reroll counter after this reroll.
    pub rerolls: u32,
}

/// Draw one distinct champion per roster entry.
///
/// Each pick takes a uniform index into a shrinking copy of the catalog and
/// removes that entry, so every champion is drawn at most once and no pick
/// is ever rejected and retried. Slots get fresh uids under `generation`.
pub fn draw<R: RandomSource + ?Sized>(
    roster: &[Player],
    catalog: &[ChampionRef],
    generation: u64,
    rng: &mut R,
) -> DraftResult<Vec<Slot>> {
    let count = roster.len();
    check_draw_size(count)?;
    if catalog.len() < count {
        return Err(DraftError::InsufficientCatalog {
            available: catalog.len(),
            required: count,
        });
    }

    let mut pool: Vec<&ChampionRef> = catalog.iter().collect();
    let slots = (0..count)
        .map(|i| {
            let picked = pool.remove(rng.pick(pool.len()));
            let uid = SlotUid {
                draw: generation,
                index: i as u32,
            };
            debug!("draw {}: {} -> {}", generation, uid, picked.id);
            Slot::new(uid, picked.clone())
        })
        .collect();

    Ok(slots)
}

/// Replace the champion of `slots[index]` with one not held by any slot.
///
/// The excluded set includes the target's own champion, so a reroll never
/// lands on the champion it replaces. Only the champion changes; uid,
/// player and lane are preserved, and the reroll counter is bumped.
pub fn reroll<R: RandomSource + ?Sized>(
    slots: &mut [Slot],
    index: usize,
    catalog: &[ChampionRef],
    rng: &mut R,
) -> DraftResult<RerollOutcome> {
    if index >= slots.len() {
        return Err(DraftError::OutOfRange {
            index,
            len: slots.len(),
        });
    }

    let picked = {
        let taken: HashSet<&str> = slots.iter().map(|s| s.champion.id.as_str()).collect();
        let candidates: Vec<&ChampionRef> = catalog
            .iter()
            .filter(|c| !taken.contains(c.id.as_str()))
            .collect();
        if candidates.is_empty() {
            return Err(DraftError::PoolExhausted);
        }
        candidates[rng.pick(candidates.len())].clone()
    };

    let slot = &mut slots[index];
    let previous = std::mem::replace(&mut slot.champion, picked);
    slot.rerolls += 1;

    Ok(RerollOutcome {
        uid: slot.uid,
        previous,
        champion: slot.champion.clone(),
        rerolls: slot.rerolls,
    })
}

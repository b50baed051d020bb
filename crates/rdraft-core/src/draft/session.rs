// Draft session: composes roster, draw, turn sequencing and reroll into one
// state machine.
//
// Every transition validates before it mutates, so a failed call leaves the
// session exactly as it was. Timer-driven effects live outside: the app layer
// calls `reveal_next` with the generation it was scheduled under, and ticks
// from an older draw are ignored.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::protocol::SessionSnapshot;

use super::champion::ChampionRef;
use super::draw::{self, RerollOutcome};
use super::error::{DraftError, DraftResult};
use super::lane::Lane;
use super::random::RandomSource;
use super::roster::{AvatarRef, Player, Roster};
use super::slot::{Slot, SlotUid};
use super::turn::{Phase, TurnOrder, TurnSequencer};

/// A slot as the presentation layer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    pub uid: SlotUid,
    pub index: usize,
    pub revealed: bool,
    /// `None` while the slot is still hidden.
    pub champion: Option<ChampionRef>,
    pub player: Option<Player>,
    pub lane: Option<Lane>,
    pub rerolls: u32,
    /// Picked by the current player and waiting for a lane.
    pub selected: bool,
}

/// Result of a successful lane assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub uid: SlotUid,
    pub player: Player,
    pub lane: Lane,
    pub champion: ChampionRef,
    /// Turn index after the assignment.
    pub turn_index: usize,
    pub complete: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DraftSession {
    roster: Roster,
    catalog: Option<Catalog>,
    slots: Vec<Slot>,
    turns: TurnSequencer,
    /// Number of slots revealed so far, in slot order.
    revealed: usize,
    /// Bumped on every draw, restart and reset.
    generation: u64,
    phase: Phase,
}

impl DraftSession {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Roster
    // -----------------------------------------------------------------------

    /// Register a player. `Ok(false)` when the roster is already full.
    pub fn add_player(&mut self, name: impl Into<String>, avatar: AvatarRef) -> DraftResult<bool> {
        self.require_registering("add a player")?;
        let name = name.into();
        let added = self.roster.add_player(name.clone(), avatar);
        if added {
            info!("Player '{}' registered ({} total)", name, self.roster.len());
        } else {
            debug!("Roster full, ignoring '{}'", name);
        }
        Ok(added)
    }

    pub fn remove_player(&mut self, index: usize) -> DraftResult<Player> {
        self.require_registering("remove a player")?;
        let removed = self.roster.remove_player(index)?;
        info!("Player '{}' removed ({} left)", removed.name, self.roster.len());
        Ok(removed)
    }

    // -----------------------------------------------------------------------
    // Catalog
    // -----------------------------------------------------------------------

    /// Install or replace the catalog, e.g. after a locale switch.
    ///
    /// Drawn slots keep their champion but take the new catalog's display
    /// name and image for the same id. Returns how many slots were relabelled.
    pub fn set_catalog(&mut self, catalog: Catalog) -> usize {
        let mut relabelled = 0;
        for slot in &mut self.slots {
            if let Some(entry) = catalog.find(&slot.champion.id) {
                if *entry != slot.champion {
                    slot.champion = entry.clone();
                    relabelled += 1;
                }
            }
        }
        info!(
            "Catalog {} ({}) installed: {} champions, {} slots relabelled",
            catalog.version,
            catalog.locale,
            catalog.len(),
            relabelled
        );
        self.catalog = Some(catalog);
        relabelled
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    // -----------------------------------------------------------------------
    // Draw and reveal
    // -----------------------------------------------------------------------

    /// Freeze the roster, draw one champion per player and shuffle the turn
    /// order. Returns the new draw generation.
    pub fn start_draw<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> DraftResult<u64> {
        self.require_registering("start a draw")?;
        self.begin_draw(rng)
    }

    /// Re-draw every champion for the existing roster, re-shuffle the turn
    /// order and clear all assignments.
    pub fn restart_draw<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> DraftResult<u64> {
        if self.phase == Phase::Registering {
            return Err(self.illegal("restart the draw"));
        }
        self.begin_draw(rng)
    }

    fn begin_draw<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> DraftResult<u64> {
        let catalog = self.catalog.as_ref().ok_or(DraftError::CatalogNotReady)?;
        let frozen = self.roster.snapshot();
        let generation = self.generation + 1;

        let slots = draw::draw(&frozen, &catalog.champions, generation, rng)?;
        let order = TurnOrder::shuffled(&frozen, rng);

        self.slots = slots;
        self.turns = TurnSequencer::new(order);
        self.revealed = 0;
        self.generation = generation;
        self.phase = Phase::Drawing;
        info!(
            "Draw {} started: {} slots from {} champions",
            generation,
            self.slots.len(),
            catalog.len()
        );
        Ok(generation)
    }

    /// Reveal the next hidden slot. Ticks scheduled under another generation
    /// (a reset or re-draw happened since) are ignored and return `false`.
    pub fn reveal_next(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.phase != Phase::Drawing {
            debug!(
                "Ignoring reveal tick (tick gen: {}, current gen: {}, phase: {})",
                generation, self.generation, self.phase
            );
            return false;
        }
        self.revealed += 1;
        debug!("Revealed slot {}/{}", self.revealed, self.slots.len());
        if self.revealed >= self.slots.len() {
            self.phase = Phase::AwaitingPick;
            info!("All {} slots revealed, turn sequence starts", self.slots.len());
        }
        true
    }

    /// Reveal every remaining slot at once.
    pub fn reveal_all(&mut self) {
        while self.phase == Phase::Drawing {
            self.reveal_next(self.generation);
        }
    }

    // -----------------------------------------------------------------------
    // Turns
    // -----------------------------------------------------------------------

    /// The current player picks a revealed, unassigned slot.
    pub fn select_slot(&mut self, uid: SlotUid) -> DraftResult<()> {
        if self.phase != Phase::AwaitingPick {
            return Err(self.illegal("select a slot"));
        }
        let index = self.index_of(uid)?;
        if index >= self.revealed || self.slots[index].is_assigned() {
            return Err(DraftError::SlotUnavailable(uid));
        }
        self.phase = Phase::AssigningLane { slot: uid };
        debug!("Turn {}: selected {}", self.turns.turn_index(), uid);
        Ok(())
    }

    /// Drop the current selection so the player can pick another slot.
    pub fn cancel_selection(&mut self) -> DraftResult<()> {
        match self.phase {
            Phase::AssigningLane { .. } => {
                self.phase = Phase::AwaitingPick;
                Ok(())
            }
            _ => Err(self.illegal("cancel a selection")),
        }
    }

    /// Bind the selected slot to the current player and `lane`, then move to
    /// the next turn.
    pub fn assign_lane(&mut self, lane: Lane) -> DraftResult<Assignment> {
        let uid = match self.phase {
            Phase::AssigningLane { slot } => slot,
            _ => return Err(self.illegal("assign a lane")),
        };
        if self.slots.iter().any(|s| s.lane == Some(lane)) {
            return Err(DraftError::LaneTaken(lane));
        }
        let index = self.index_of(uid)?;
        let player = self
            .turns
            .current()
            .cloned()
            .ok_or_else(|| self.illegal("assign a lane"))?;

        let complete = self.turns.advance(self.phase)?;
        let slot = &mut self.slots[index];
        slot.player = Some(player.clone());
        slot.lane = Some(lane);
        let champion = slot.champion.clone();
        self.phase = if complete {
            Phase::Complete
        } else {
            Phase::AwaitingPick
        };

        info!(
            "{} takes {} on {} (turn {}/{})",
            player.name,
            champion.name,
            lane,
            self.turns.turn_index(),
            self.turns.order().players().len()
        );
        Ok(Assignment {
            uid,
            player,
            lane,
            champion,
            turn_index: self.turns.turn_index(),
            complete,
        })
    }

    // -----------------------------------------------------------------------
    // Reroll and reset
    // -----------------------------------------------------------------------

    /// Swap the champion of the slot at `index` for one no slot holds.
    ///
    /// Allowed once every slot is revealed, including for slots that already
    /// have a player and lane; those stay as they are.
    pub fn reroll<R: RandomSource + ?Sized>(
        &mut self,
        index: usize,
        rng: &mut R,
    ) -> DraftResult<RerollOutcome> {
        if !self.phase.is_post_reveal() {
            return Err(self.illegal("reroll"));
        }
        let catalog = self.catalog.as_ref().ok_or(DraftError::CatalogNotReady)?;
        let outcome = draw::reroll(&mut self.slots, index, &catalog.champions, rng)?;
        info!(
            "Rerolled {}: {} -> {} (reroll #{})",
            outcome.uid, outcome.previous.name, outcome.champion.name, outcome.rerolls
        );
        Ok(outcome)
    }

    /// Back to an empty roster. Always legal. The catalog is kept.
    pub fn reset(&mut self) {
        self.roster.clear();
        self.slots.clear();
        self.turns = TurnSequencer::default();
        self.revealed = 0;
        self.generation += 1;
        self.phase = Phase::Registering;
        info!("Session reset (gen: {})", self.generation);
    }

    // -----------------------------------------------------------------------
    // Projections
    // -----------------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn roster(&self) -> &[Player] {
        self.roster.players()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed
    }

    pub fn turn_index(&self) -> usize {
        self.turns.turn_index()
    }

    pub fn turn_order(&self) -> &[Player] {
        self.turns.order().players()
    }

    /// The player whose turn it is, while picks are being made.
    pub fn current_player(&self) -> Option<&Player> {
        match self.phase {
            Phase::AwaitingPick | Phase::AssigningLane { .. } => self.turns.current(),
            _ => None,
        }
    }

    pub fn selected_slot(&self) -> Option<SlotUid> {
        match self.phase {
            Phase::AssigningLane { slot } => Some(slot),
            _ => None,
        }
    }

    pub fn used_lanes(&self) -> Vec<Lane> {
        self.slots.iter().filter_map(|s| s.lane).collect()
    }

    /// Lanes not yet taken, in display order.
    pub fn available_lanes(&self) -> Vec<Lane> {
        let used = self.used_lanes();
        Lane::ALL
            .into_iter()
            .filter(|lane| !used.contains(lane))
            .collect()
    }

    pub fn slot_views(&self) -> Vec<SlotView> {
        let selected = self.selected_slot();
        self.slots
            .iter()
            .enumerate()
            .map(|(index, slot)| {
                let revealed = index < self.revealed;
                SlotView {
                    uid: slot.uid,
                    index,
                    revealed,
                    champion: revealed.then(|| slot.champion.clone()),
                    player: slot.player.clone(),
                    lane: slot.lane,
                    rerolls: slot.rerolls,
                    selected: selected == Some(slot.uid),
                }
            })
            .collect()
    }

    /// Assigned slots sorted by lane display order (`Lane`'s `Ord`).
    pub fn lineup(&self) -> Vec<&Slot> {
        let mut assigned: Vec<&Slot> = self.slots.iter().filter(|s| s.is_assigned()).collect();
        assigned.sort_by_key(|s| s.lane);
        assigned
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            generation: self.generation,
            roster: self.roster.snapshot(),
            slots: self.slot_views(),
            available_lanes: self.available_lanes(),
            current_player: self.current_player().cloned(),
            turn_order: self.turn_order().to_vec(),
            turn_index: self.turn_index(),
            lineup: self.lineup().iter().map(|s| s.uid).collect(),
            catalog_version: self.catalog.as_ref().map(|c| c.version.clone()),
            locale: self.catalog.as_ref().map(|c| c.locale),
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn index_of(&self, uid: SlotUid) -> DraftResult<usize> {
        self.slots
            .iter()
            .position(|s| s.uid == uid)
            .ok_or(DraftError::UnknownSlot(uid))
    }

    fn require_registering(&self, action: &'static str) -> DraftResult<()> {
        if self.phase == Phase::Registering {
            Ok(())
        } else {
            Err(self.illegal(action))
        }
    }

    fn illegal(&self, action: &'static str) -> DraftError {
        DraftError::IllegalPhaseTransition {
            action,
            phase: self.phase,
        }
    }
}

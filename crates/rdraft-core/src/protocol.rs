// Messages between the presentation layer and the app orchestrator, plus the
// voice cues handed to the audio collaborator.

use serde::{Deserialize, Serialize};

use crate::catalog::Locale;
use crate::draft::champion::ChampionRef;
use crate::draft::lane::Lane;
use crate::draft::roster::{AvatarRef, Player};
use crate::draft::session::SlotView;
use crate::draft::slot::SlotUid;
use crate::draft::turn::Phase;

// ---------------------------------------------------------------------------
// Presentation -> app
// ---------------------------------------------------------------------------

/// User actions. These are the only mutation path into the session.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Register a player. A random profile icon is chosen when `avatar` is `None`.
    AddPlayer {
        name: String,
        avatar: Option<AvatarRef>,
    },
    RemovePlayer(usize),
    StartDraw,
    SelectSlot(SlotUid),
    CancelSelection,
    AssignLane(Lane),
    /// Reroll the slot at this index.
    Reroll(usize),
    RestartDraw,
    Reset,
    SetLocale(Locale),
    /// Master volume in `0.0..=1.0`.
    SetVolume(f32),
    MysteryStart,
    MysteryReveal,
    MysteryReplay,
    MysteryGuess(String),
    MysteryClose,
    Quit,
}

// ---------------------------------------------------------------------------
// App -> presentation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// Full session state after any change.
    Snapshot(Box<SessionSnapshot>),
    Catalog(CatalogStatus),
    /// A roulette frame for the current turn. `settled` marks the final frame,
    /// which always shows the real current player.
    Roulette { name: String, settled: bool },
    /// A command was refused; the session is unchanged.
    Rejected { action: String, reason: String },
    Mystery(MysteryView),
    Notice(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CatalogStatus {
    Loading { locale: Locale },
    Ready { version: String, locale: Locale, champions: usize },
    Failed { message: String },
}

/// Read-only projection of a draft session for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub generation: u64,
    pub roster: Vec<Player>,
    pub slots: Vec<SlotView>,
    pub available_lanes: Vec<Lane>,
    pub current_player: Option<Player>,
    pub turn_order: Vec<Player>,
    pub turn_index: usize,
    /// Assigned slot uids in lane order.
    pub lineup: Vec<SlotUid>,
    pub catalog_version: Option<String>,
    pub locale: Option<Locale>,
}

impl SessionSnapshot {
    pub fn slot(&self, uid: SlotUid) -> Option<&SlotView> {
        self.slots.iter().find(|s| s.uid == uid)
    }
}

// ---------------------------------------------------------------------------
// Voice cues
// ---------------------------------------------------------------------------

/// Which voice line to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CueKind {
    /// The line a champion says when picked.
    Choice,
    /// The line a champion says when banned.
    Ban,
}

impl CueKind {
    /// Asset folder holding this kind of line.
    pub fn folder(&self) -> &'static str {
        match self {
            CueKind::Choice => "champion-choose-vo",
            CueKind::Ban => "champion-ban-vo",
        }
    }
}

/// Fire-and-forget notification for the audio collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceCue {
    pub champion_id: String,
    pub champion_key: String,
    pub locale: Locale,
    pub kind: CueKind,
    /// Playback volume in `0.0..=1.0`, already scaled by the master volume.
    pub volume: f32,
}

impl VoiceCue {
    pub fn new(champion: &ChampionRef, locale: Locale, kind: CueKind, volume: f32) -> Self {
        VoiceCue {
            champion_id: champion.id.clone(),
            champion_key: champion.key.clone(),
            locale,
            kind,
            volume,
        }
    }

    /// Cache key matching the asset layout: key, locale, kind.
    pub fn cache_key(&self) -> String {
        format!(
            "{}-{}-{}",
            self.champion_key,
            self.locale.cdragon(),
            self.kind.folder()
        )
    }
}

// ---------------------------------------------------------------------------
// Mystery voice round
// ---------------------------------------------------------------------------

/// What the presentation layer may show of a mystery round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MysteryView {
    pub kind: CueKind,
    /// `None` until the round is revealed.
    pub champion: Option<ChampionRef>,
    pub active: bool,
}

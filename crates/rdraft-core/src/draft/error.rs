// Error taxonomy for the draft engine. Every variant is recoverable: the
// caller decides whether to disable an action or surface a message.

use thiserror::Error;

use super::lane::Lane;
use super::slot::SlotUid;
use super::turn::Phase;

pub type DraftResult<T> = Result<T, DraftError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    /// Roster size outside the range required by the operation.
    #[error("roster holds {count} players; a draw needs between {min} and {max}")]
    Capacity { count: usize, min: usize, max: usize },

    #[error("index {index} is out of range (length {len})")]
    OutOfRange { index: usize, len: usize },

    #[error("catalog has {available} champions but {required} are needed")]
    InsufficientCatalog { available: usize, required: usize },

    #[error("no unused champion is left to reroll into")]
    PoolExhausted,

    #[error("lane {0} is already taken")]
    LaneTaken(Lane),

    #[error("cannot {action} while {phase}")]
    IllegalPhaseTransition { action: &'static str, phase: Phase },

    #[error("champion catalog is not loaded yet")]
    CatalogNotReady,

    #[error("no slot with id {0}")]
    UnknownSlot(SlotUid),

    /// The slot exists but is hidden or already assigned.
    #[error("slot {0} cannot be picked right now")]
    SlotUnavailable(SlotUid),
}

// Draft engine: roster, champion draw, turn order and the session state machine.

pub mod champion;
pub mod draw;
pub mod error;
pub mod lane;
pub mod random;
pub mod roster;
pub mod session;
pub mod slot;
pub mod turn;

pub use champion::ChampionRef;
pub use error::{DraftError, DraftResult};
pub use lane::Lane;
pub use random::{RandomSource, RngSource, ScriptedSource};
pub use roster::{AvatarRef, Player, Roster, MAX_PLAYERS, MIN_PLAYERS};
pub use session::{Assignment, DraftSession, SlotView};
pub use slot::{Slot, SlotUid};
pub use turn::{Phase, TurnOrder, TurnSequencer};

// App layer: catalog fetching, reveal timers, voice cues and the event loop
// that owns the draft session.

pub mod app;
pub mod assets;
pub mod ddragon;
pub mod reveal;
pub mod voice;

// Library root: re-exports the engine modules so the app crate, the CLI and
// integration tests share one public API.

pub mod catalog;
pub mod config;
pub mod draft;
pub mod mystery;
pub mod protocol;

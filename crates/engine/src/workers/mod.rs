//! Background workers owned by the engine.
//!
//! Workers are internal: callers interact with them through the handles the
//! engine returns.

mod reaper;

pub use reaper::ReaperHandle;
pub(crate) use reaper::spawn_reaper;

//! Application module: the view state the TUI renders.
//!
//! Playback itself lives in `crate::player`; `App` only tracks what the user
//! is looking at (cursor, search box, popups) and the last status message.

mod model;

pub use model::*;

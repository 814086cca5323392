//! Audio output.
//!
//! The core only talks to the [`PlaybackSession`] trait; [`RodioSession`] is
//! the implementation used by the binary.

mod session;
mod sink;
mod types;

pub use session::RodioSession;
pub use types::{PlaybackError, PlaybackSession, clamp_volume};

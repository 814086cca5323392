//! Playback orchestration.
//!
//! [`Player`] owns the playlist index, the back-navigation history and the
//! play counts, and drives a [`crate::audio::PlaybackSession`]. Every outcome
//! worth showing to the user is also sent as a [`StatusEvent`].

mod model;
mod types;

pub use model::Player;
pub use types::{PlaybackState, PlayerError, StatusEvent};

#[cfg(test)]
mod tests;

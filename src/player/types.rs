use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::audio::PlaybackError;
use crate::library::ScanError;

/// Where the player is in its lifecycle.
///
/// `Idle` means nothing has played since the last folder load.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
    Paused,
    Stopped,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("no playable audio files in {}", .0.display())]
    EmptyFolder(PathBuf),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("cannot play {title}: {source}")]
    Playback {
        title: String,
        #[source]
        source: PlaybackError,
    },

    #[error("end of playlist")]
    EndOfPlaylist,

    #[error("no previous song")]
    NoPreviousTrack,
}

/// Notifications for whoever is presenting the player.
#[derive(Clone, Debug, PartialEq)]
pub enum StatusEvent {
    Loaded { count: usize },
    NowPlaying(String),
    Paused,
    Resumed,
    Stopped,
    EndOfPlaylist,
    NoPreviousTrack,
    ShuffleChanged(bool),
    VolumeChanged(f32),
    Error(String),
}

impl fmt::Display for StatusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded { count } => write!(f, "Loaded {count} songs"),
            Self::NowPlaying(title) => write!(f, "Playing: {title}"),
            Self::Paused => f.write_str("Paused"),
            Self::Resumed => f.write_str("Resumed"),
            Self::Stopped => f.write_str("Stopped"),
            Self::EndOfPlaylist => f.write_str("End of playlist"),
            Self::NoPreviousTrack => f.write_str("No previous song"),
            Self::ShuffleChanged(true) => f.write_str("Shuffle ON"),
            Self::ShuffleChanged(false) => f.write_str("Shuffle OFF"),
            Self::VolumeChanged(v) => write!(f, "Volume {}%", (v * 100.0).round() as u32),
            Self::Error(msg) => write!(f, "Error: {msg}"),
        }
    }
}

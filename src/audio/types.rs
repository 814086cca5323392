//! The playback boundary: the commands the core issues and the errors a
//! session can report.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    #[error("no audio output device: {0}")]
    Device(#[from] rodio::StreamError),
}

/// Something that can actually render audio.
///
/// Everything except `load` is fire-and-forget and must be harmless when the
/// session is in a state where the command makes no sense (pausing while
/// paused, resuming with nothing loaded).
pub trait PlaybackSession {
    /// Replace whatever is loaded with `path`, ready but not yet playing.
    /// On error the previously loaded audio is left alone.
    fn load(&mut self, path: &Path) -> Result<(), PlaybackError>;
    fn play(&mut self);
    fn pause(&mut self);
    fn resume(&mut self);
    /// Halt output. A later `resume` restarts the loaded track from the top.
    fn stop(&mut self);
    /// Set output volume; values outside `0.0..=1.0` are clamped.
    fn set_volume(&mut self, volume: f32);
    /// True while audio is actually coming out.
    fn is_busy(&self) -> bool;
}

/// Clamp a volume to `0.0..=1.0`; NaN becomes silence.
pub fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

use std::path::Path;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, info};

use super::sink::{decode_file, paused_sink};
use super::types::{PlaybackError, PlaybackSession, clamp_volume};

/// A [`PlaybackSession`] on the default output device.
///
/// Decoding and mixing run on rodio's own thread; every method here returns
/// immediately.
pub struct RodioSession {
    stream: OutputStream,
    sink: Option<Sink>,
    volume: f32,
}

impl RodioSession {
    pub fn open_default(volume: f32) -> Result<Self, PlaybackError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when the stream is dropped, which garbles the TUI.
        stream.log_on_drop(false);
        info!("opened default audio output");

        Ok(Self {
            stream,
            sink: None,
            volume: clamp_volume(volume),
        })
    }
}

impl PlaybackSession for RodioSession {
    fn load(&mut self, path: &Path) -> Result<(), PlaybackError> {
        let source = decode_file(path)?;
        let sink = paused_sink(&self.stream, source, self.volume);
        if let Some(old) = self.sink.replace(sink) {
            old.stop();
        }
        debug!(path = %path.display(), "loaded");
        Ok(())
    }

    fn play(&mut self) {
        if let Some(sink) = &self.sink {
            sink.play();
        }
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn resume(&mut self) {
        if let Some(sink) = &self.sink {
            sink.play();
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
            if let Err(e) = sink.try_seek(Duration::ZERO) {
                debug!(error = %e, "rewind on stop failed");
            }
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = clamp_volume(volume);
        if let Some(sink) = &self.sink {
            sink.set_volume(self.volume);
        }
    }

    fn is_busy(&self) -> bool {
        self.sink
            .as_ref()
            .is_some_and(|sink| !sink.is_paused() && !sink.empty())
    }
}

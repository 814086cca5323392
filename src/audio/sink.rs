//! Utilities for turning a file into a ready-to-play `rodio` sink.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, Sink};

use super::types::PlaybackError;

pub(super) type FileSource = Decoder<BufReader<File>>;

/// Open and probe `path`. Fails on unreadable files and unsupported formats.
pub(super) fn decode_file(path: &Path) -> Result<FileSource, PlaybackError> {
    let file = File::open(path).map_err(|source| PlaybackError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    Decoder::new(BufReader::new(file)).map_err(|source| PlaybackError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Create a paused `Sink` on `stream` holding `source`.
pub(super) fn paused_sink(stream: &OutputStream, source: FileSource, volume: f32) -> Sink {
    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume);
    sink.append(source);
    sink.pause();
    sink
}

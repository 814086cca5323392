use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::file::AudioFile;
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::Track;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot read folder {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn probe_duration(path: &Path) -> Option<Duration> {
    match lofty::read_from_path(path) {
        Ok(tagged) => Some(tagged.properties().duration()),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "duration probe failed");
            None
        }
    }
}

/// Filter `paths` down to eligible audio files and sort them by title,
/// case-insensitively. Ties keep a stable case-sensitive order.
pub fn tracks_from_paths<I>(paths: I, settings: &LibrarySettings) -> Vec<Track>
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut tracks: Vec<Track> = paths
        .into_iter()
        .filter(|p| (settings.include_hidden || !is_hidden(p)) && is_audio_file(p, settings))
        .map(|p| Track::from_path(&p))
        .collect();

    tracks.sort_by_cached_key(|t| (t.title.to_lowercase(), t.title.clone()));
    tracks
}

/// Scan the top level of `dir` for audio files.
///
/// An empty result is not an error here; the player decides what an empty
/// folder means.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Result<Vec<Track>, ScanError> {
    let mut files: Vec<PathBuf> = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true).max_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) if source.depth() == 0 => {
                return Err(ScanError::Unreadable {
                    path: dir.to_path_buf(),
                    source,
                });
            }
            Err(e) => {
                debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if entry.depth() == 1 && entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    let mut tracks = tracks_from_paths(files, settings);
    if settings.probe_duration {
        for track in &mut tracks {
            track.duration = probe_duration(&track.path);
        }
    }

    debug!(folder = %dir.display(), count = tracks.len(), "scanned folder");
    Ok(tracks)
}

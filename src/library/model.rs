use std::path::{Path, PathBuf};
use std::time::Duration;

/// A playable file from the loaded folder.
///
/// `title` is the file stem. It is what the user sees, what prefix search
/// matches against and what play counts are keyed by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    pub path: PathBuf,
    pub duration: Option<Duration>,
}

impl Track {
    pub fn new(title: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
            duration: None,
        }
    }

    /// Build a track whose title is the file stem of `path`.
    pub fn from_path(path: &Path) -> Self {
        let title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string();
        Self::new(title, path)
    }
}

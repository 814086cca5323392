use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::audio::{PlaybackSession, clamp_volume};
use crate::config::{LibrarySettings, Settings};
use crate::library::{self, Track};
use crate::playlist::{History, NodeId, PlayLedger, PlaylistIndex, Sequence};

use super::types::{PlaybackState, PlayerError, StatusEvent};

/// The playlist state machine.
///
/// All methods run on the caller's thread and return quickly; audio itself is
/// rendered by the session.
pub struct Player<S: PlaybackSession> {
    session: S,
    index: PlaylistIndex,
    history: History,
    ledger: PlayLedger,
    current: Option<NodeId>,
    state: PlaybackState,
    shuffle: bool,
    volume: f32,
    suggestion_limit: usize,
    library: LibrarySettings,
    rng: StdRng,
    events: Sender<StatusEvent>,
}

impl<S: PlaybackSession> Player<S> {
    pub fn new(mut session: S, settings: &Settings, events: Sender<StatusEvent>) -> Self {
        let volume = clamp_volume(settings.audio.volume);
        session.set_volume(volume);

        Self {
            session,
            index: PlaylistIndex::default(),
            history: History::default(),
            ledger: PlayLedger::default(),
            current: None,
            state: PlaybackState::Idle,
            shuffle: settings.playback.shuffle,
            volume,
            suggestion_limit: settings.search.suggestion_limit,
            library: settings.library.clone(),
            rng: StdRng::from_entropy(),
            events,
        }
    }

    /// Scan `dir` and replace the playlist with its audio files.
    ///
    /// An unreadable or empty folder leaves the current playlist untouched.
    pub fn load_folder(&mut self, dir: &Path) -> Result<usize, PlayerError> {
        let tracks = library::scan(dir, &self.library).map_err(|e| self.report(e.into()))?;
        self.load_tracks(dir, tracks)
    }

    /// Replace the playlist with an explicit list of files from `dir`.
    /// Files that are not audio are ignored.
    pub fn load_file_list<I>(&mut self, dir: &Path, files: I) -> Result<usize, PlayerError>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let tracks = library::tracks_from_paths(files, &self.library);
        self.load_tracks(dir, tracks)
    }

    /// Install already-sorted `tracks` as the new playlist.
    ///
    /// Stops playback and clears history and play counts. `dir` is only used
    /// to describe an empty load.
    pub fn load_tracks(&mut self, dir: &Path, tracks: Vec<Track>) -> Result<usize, PlayerError> {
        if tracks.is_empty() {
            return Err(self.report(PlayerError::EmptyFolder(dir.to_path_buf())));
        }

        let count = tracks.len();
        self.session.stop();
        self.index = PlaylistIndex::build(tracks);
        self.history.clear();
        self.ledger.clear();
        self.current = None;
        self.state = PlaybackState::Idle;

        info!(folder = %dir.display(), count, "playlist loaded");
        self.emit(StatusEvent::Loaded { count });
        Ok(count)
    }

    /// Play `title`, or the first track when `selection` is `None`.
    ///
    /// Unknown titles and an empty playlist are no-ops.
    pub fn play_selected_or_first(&mut self, selection: Option<&str>) -> Result<(), PlayerError> {
        let target = match selection {
            Some(title) => match self.index.registry.lookup(title) {
                Some(id) => id,
                None => {
                    warn!(title, "no track with that title");
                    return Ok(());
                }
            },
            None => match self.index.sequence.head() {
                Some(id) => id,
                None => return Ok(()),
            },
        };
        self.move_to(target)
    }

    /// Play the track at `position` in playlist order.
    pub fn play_at(&mut self, position: usize) -> Result<(), PlayerError> {
        match self.index.sequence.node_at(position) {
            Some(id) => self.move_to(id),
            None => Ok(()),
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.current.is_none() {
            return;
        }
        match self.state {
            PlaybackState::Playing => {
                self.session.pause();
                self.state = PlaybackState::Paused;
                self.emit(StatusEvent::Paused);
            }
            PlaybackState::Paused | PlaybackState::Stopped => {
                self.session.resume();
                self.state = PlaybackState::Playing;
                self.emit(StatusEvent::Resumed);
            }
            PlaybackState::Idle => {}
        }
    }

    /// Halt output. The current track is kept, so resuming restarts it.
    pub fn stop(&mut self) {
        self.session.stop();
        self.state = PlaybackState::Stopped;
        self.emit(StatusEvent::Stopped);
    }

    /// Move to the next track: a random other one with shuffle on, otherwise
    /// the successor (or the first track when nothing has played yet).
    pub fn advance(&mut self) -> Result<(), PlayerError> {
        match self.pick_next() {
            Some(id) => self.move_to(id),
            None => {
                info!("end of playlist");
                Err(self.report(PlayerError::EndOfPlaylist))
            }
        }
    }

    /// Return to the track that was current before the last move.
    pub fn go_back(&mut self) -> Result<(), PlayerError> {
        match self.history.pop() {
            Some(id) => self.play_node(id),
            None => Err(self.report(PlayerError::NoPreviousTrack)),
        }
    }

    /// Auto-advance once the session has run out of audio.
    ///
    /// Only fires while playing. If advancing fails the player stops, so the
    /// next poll does not retry. Returns whether an advance was attempted.
    pub fn tick(&mut self) -> bool {
        if self.state != PlaybackState::Playing || self.current.is_none() {
            return false;
        }
        if self.session.is_busy() {
            return false;
        }

        debug!("track finished, advancing");
        if self.advance().is_err() {
            self.state = PlaybackState::Stopped;
        }
        true
    }

    pub fn set_shuffle(&mut self, on: bool) {
        self.shuffle = on;
        self.emit(StatusEvent::ShuffleChanged(on));
    }

    /// Set the output volume and return the clamped value actually applied.
    pub fn set_volume(&mut self, volume: f32) -> f32 {
        self.volume = clamp_volume(volume);
        self.session.set_volume(self.volume);
        self.emit(StatusEvent::VolumeChanged(self.volume));
        self.volume
    }

    /// Titles starting with `prefix`, ignoring case and surrounding spaces.
    pub fn search(&self, prefix: &str) -> Vec<String> {
        let query = prefix.trim();
        if query.is_empty() {
            return Vec::new();
        }
        self.index.titles.search(query, self.suggestion_limit)
    }

    /// The `k` most played titles this session, most played first.
    pub fn top_played(&self, k: usize) -> Vec<(String, u32)> {
        self.ledger.top_k(k)
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|id| self.index.sequence.get(id))
    }

    pub fn current_position(&self) -> Option<usize> {
        self.current.and_then(|id| self.index.sequence.position(id))
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn sequence(&self) -> &Sequence {
        &self.index.sequence
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn play_count(&self, title: &str) -> u32 {
        self.ledger.count(title).unwrap_or(0)
    }

    #[cfg(test)]
    pub(crate) fn seed_rng(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    fn pick_next(&mut self) -> Option<NodeId> {
        let current = self.current;
        if self.shuffle {
            let candidates: Vec<NodeId> = self
                .index
                .sequence
                .to_ordered_list()
                .into_iter()
                .filter(|&id| Some(id) != current)
                .collect();
            candidates.choose(&mut self.rng).copied()
        } else {
            match current {
                Some(id) => self.index.sequence.next(id),
                None => self.index.sequence.head(),
            }
        }
    }

    /// Play `id`, recording the previous track in history if it differs.
    fn move_to(&mut self, id: NodeId) -> Result<(), PlayerError> {
        let previous = self.current;
        self.play_node(id)?;
        if let Some(prev) = previous.filter(|&prev| prev != id) {
            self.history.push(prev);
        }
        Ok(())
    }

    /// Load and start `id`. On failure nothing about the player changes.
    fn play_node(&mut self, id: NodeId) -> Result<(), PlayerError> {
        let Some(track) = self.index.sequence.get(id) else {
            return Ok(());
        };
        let title = track.title.clone();
        let path = track.path.clone();

        if let Err(source) = self.session.load(&path) {
            return Err(self.report(PlayerError::Playback { title, source }));
        }
        self.session.play();

        let plays = self.ledger.record_play(&title);
        self.current = Some(id);
        self.state = PlaybackState::Playing;
        info!(title = %title, plays, "now playing");
        self.emit(StatusEvent::NowPlaying(title));
        Ok(())
    }

    /// Surface `err` on the status channel and hand it back to the caller.
    fn report(&self, err: PlayerError) -> PlayerError {
        let event = match &err {
            PlayerError::EndOfPlaylist => StatusEvent::EndOfPlaylist,
            PlayerError::NoPreviousTrack => StatusEvent::NoPreviousTrack,
            other => {
                warn!(error = %other, "player error");
                StatusEvent::Error(other.to_string())
            }
        };
        self.emit(event);
        err
    }

    fn emit(&self, event: StatusEvent) {
        // Nobody listening is fine; the UI may already be gone.
        let _ = self.events.send(event);
    }
}

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver};

use super::*;
use crate::audio::{PlaybackError, PlaybackSession};
use crate::config::Settings;
use crate::library::Track;

#[derive(Debug, Default)]
struct SessionLog {
    calls: Vec<String>,
    loaded: Option<PathBuf>,
    busy: bool,
    volume: f32,
    failing: HashSet<PathBuf>,
}

/// Records every command instead of producing sound.
#[derive(Clone, Default)]
struct FakeSession(Rc<RefCell<SessionLog>>);

impl FakeSession {
    fn finish_track(&self) {
        self.0.borrow_mut().busy = false;
    }

    fn fail_on(&self, path: &str) {
        self.0.borrow_mut().failing.insert(PathBuf::from(path));
    }

    fn calls(&self) -> Vec<String> {
        self.0.borrow().calls.clone()
    }

    fn loaded(&self) -> Option<PathBuf> {
        self.0.borrow().loaded.clone()
    }

    fn volume(&self) -> f32 {
        self.0.borrow().volume
    }
}

impl PlaybackSession for FakeSession {
    fn load(&mut self, path: &Path) -> Result<(), PlaybackError> {
        let mut log = self.0.borrow_mut();
        if log.failing.contains(path) {
            return Err(PlaybackError::Open {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
            });
        }
        log.calls.push(format!("load {}", path.display()));
        log.loaded = Some(path.to_path_buf());
        log.busy = false;
        Ok(())
    }

    fn play(&mut self) {
        let mut log = self.0.borrow_mut();
        log.calls.push("play".into());
        log.busy = true;
    }

    fn pause(&mut self) {
        let mut log = self.0.borrow_mut();
        log.calls.push("pause".into());
        log.busy = false;
    }

    fn resume(&mut self) {
        let mut log = self.0.borrow_mut();
        log.calls.push("resume".into());
        log.busy = log.loaded.is_some();
    }

    fn stop(&mut self) {
        let mut log = self.0.borrow_mut();
        log.calls.push("stop".into());
        log.busy = false;
    }

    fn set_volume(&mut self, volume: f32) {
        self.0.borrow_mut().volume = crate::audio::clamp_volume(volume);
    }

    fn is_busy(&self) -> bool {
        self.0.borrow().busy
    }
}

fn player_with(titles: &[&str]) -> (Player<FakeSession>, FakeSession, Receiver<StatusEvent>) {
    let session = FakeSession::default();
    let (tx, rx) = mpsc::channel();
    let mut player = Player::new(session.clone(), &Settings::default(), tx);
    player.seed_rng(7);

    if !titles.is_empty() {
        let tracks = titles
            .iter()
            .map(|t| Track::new(*t, format!("/music/{t}.mp3")))
            .collect();
        player.load_tracks(Path::new("/music"), tracks).unwrap();
    }
    session.0.borrow_mut().calls.clear();
    drain(&rx);
    (player, session, rx)
}

fn drain(rx: &Receiver<StatusEvent>) -> Vec<StatusEvent> {
    rx.try_iter().collect()
}

fn current_title(player: &Player<FakeSession>) -> Option<String> {
    player.current_track().map(|t| t.title.clone())
}

#[test]
fn scenario_from_unsorted_file_list() {
    let (mut player, _session, rx) = player_with(&[]);
    let files = ["Beta.mp3", "alpha.wav", "Gamma.ogg"]
        .iter()
        .map(|f| PathBuf::from("/music").join(f));

    assert_eq!(player.load_file_list(Path::new("/music"), files).unwrap(), 3);
    let order: Vec<&str> = player
        .sequence()
        .iter()
        .map(|(_, t)| t.title.as_str())
        .collect();
    assert_eq!(order, vec!["alpha", "Beta", "Gamma"]);
    assert_eq!(player.search("b"), vec!["Beta".to_string()]);

    player.play_selected_or_first(None).unwrap();
    assert_eq!(current_title(&player).as_deref(), Some("alpha"));
    assert_eq!(player.state(), PlaybackState::Playing);

    player.advance().unwrap();
    assert_eq!(current_title(&player).as_deref(), Some("Beta"));
    assert_eq!(player.history_len(), 1);

    player.go_back().unwrap();
    assert_eq!(current_title(&player).as_deref(), Some("alpha"));
    assert_eq!(player.history_len(), 0);

    assert_eq!(
        drain(&rx),
        vec![
            StatusEvent::Loaded { count: 3 },
            StatusEvent::NowPlaying("alpha".into()),
            StatusEvent::NowPlaying("Beta".into()),
            StatusEvent::NowPlaying("alpha".into()),
        ]
    );
}

#[test]
fn play_selected_resolves_title_and_records_history() {
    let (mut player, session, _rx) = player_with(&["a", "b", "c"]);

    player.play_selected_or_first(Some("c")).unwrap();
    assert_eq!(session.loaded(), Some(PathBuf::from("/music/c.mp3")));

    player.play_selected_or_first(Some("a")).unwrap();
    assert_eq!(current_title(&player).as_deref(), Some("a"));
    assert_eq!(player.history_len(), 1);

    // replaying the current track counts but does not grow history
    player.play_selected_or_first(Some("a")).unwrap();
    assert_eq!(player.history_len(), 1);
    assert_eq!(player.play_count("a"), 2);
}

#[test]
fn unknown_selection_and_empty_playlist_are_noops() {
    let (mut player, session, rx) = player_with(&["a"]);
    player.play_selected_or_first(Some("zzz")).unwrap();
    assert!(player.current_track().is_none());
    assert!(session.calls().is_empty());
    assert!(drain(&rx).is_empty());

    let (mut empty, session, _rx) = player_with(&[]);
    empty.play_selected_or_first(None).unwrap();
    assert_eq!(empty.state(), PlaybackState::Idle);
    assert!(session.calls().is_empty());
}

#[test]
fn play_at_uses_playlist_position() {
    let (mut player, _session, _rx) = player_with(&["a", "b", "c"]);
    player.play_at(2).unwrap();
    assert_eq!(current_title(&player).as_deref(), Some("c"));
    assert_eq!(player.current_position(), Some(2));

    player.play_at(10).unwrap();
    assert_eq!(current_title(&player).as_deref(), Some("c"));
}

#[test]
fn advance_from_nothing_starts_at_head() {
    let (mut player, _session, _rx) = player_with(&["a", "b"]);
    player.advance().unwrap();
    assert_eq!(current_title(&player).as_deref(), Some("a"));
    assert_eq!(player.history_len(), 0);
}

#[test]
fn advance_at_tail_reports_end_and_keeps_current() {
    let (mut player, _session, rx) = player_with(&["a", "b"]);
    player.play_selected_or_first(Some("b")).unwrap();
    drain(&rx);

    let err = player.advance().unwrap_err();
    assert!(matches!(err, PlayerError::EndOfPlaylist));
    assert_eq!(current_title(&player).as_deref(), Some("b"));
    assert_eq!(player.state(), PlaybackState::Playing);
    assert_eq!(drain(&rx), vec![StatusEvent::EndOfPlaylist]);
}

#[test]
fn go_back_twice_reports_no_previous_track() {
    let (mut player, _session, rx) = player_with(&["a", "b"]);
    player.play_selected_or_first(None).unwrap();
    player.advance().unwrap();

    player.go_back().unwrap();
    assert_eq!(current_title(&player).as_deref(), Some("a"));
    drain(&rx);

    let err = player.go_back().unwrap_err();
    assert!(matches!(err, PlayerError::NoPreviousTrack));
    assert_eq!(current_title(&player).as_deref(), Some("a"));
    assert_eq!(drain(&rx), vec![StatusEvent::NoPreviousTrack]);
}

#[test]
fn shuffle_with_single_track_ends_after_first_play() {
    let (mut player, _session, _rx) = player_with(&["only"]);
    player.set_shuffle(true);

    player.advance().unwrap();
    assert_eq!(current_title(&player).as_deref(), Some("only"));

    assert!(matches!(
        player.advance().unwrap_err(),
        PlayerError::EndOfPlaylist
    ));
}

#[test]
fn shuffle_never_repeats_the_current_track() {
    let (mut player, _session, _rx) = player_with(&["a", "b", "c", "d"]);
    player.set_shuffle(true);
    player.play_selected_or_first(None).unwrap();

    let mut seen = HashSet::new();
    for _ in 0..50 {
        let before = current_title(&player);
        player.advance().unwrap();
        let after = current_title(&player);
        assert_ne!(before, after);
        seen.extend(after);
    }
    assert_eq!(seen.len(), 4);
    assert_eq!(player.history_len(), 50);
}

#[test]
fn failed_load_leaves_player_unchanged() {
    let (mut player, session, rx) = player_with(&["a", "b"]);
    session.fail_on("/music/b.mp3");
    player.play_selected_or_first(None).unwrap();
    drain(&rx);

    let err = player.advance().unwrap_err();
    assert!(matches!(err, PlayerError::Playback { ref title, .. } if title == "b"));
    assert_eq!(current_title(&player).as_deref(), Some("a"));
    assert_eq!(player.state(), PlaybackState::Playing);
    assert_eq!(player.play_count("b"), 0);
    assert_eq!(player.history_len(), 0);

    let events = drain(&rx);
    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], StatusEvent::Error(msg) if msg.contains("b")));
}

#[test]
fn toggle_pause_and_stop() {
    let (mut player, session, rx) = player_with(&["a"]);

    player.toggle_pause();
    assert_eq!(player.state(), PlaybackState::Idle);

    player.play_selected_or_first(None).unwrap();
    player.toggle_pause();
    assert_eq!(player.state(), PlaybackState::Paused);
    player.toggle_pause();
    assert_eq!(player.state(), PlaybackState::Playing);

    player.stop();
    assert_eq!(player.state(), PlaybackState::Stopped);
    assert_eq!(current_title(&player).as_deref(), Some("a"));

    player.toggle_pause();
    assert_eq!(player.state(), PlaybackState::Playing);

    assert_eq!(
        session.calls(),
        vec!["load /music/a.mp3", "play", "pause", "resume", "stop", "resume"]
    );
    assert_eq!(
        drain(&rx),
        vec![
            StatusEvent::NowPlaying("a".into()),
            StatusEvent::Paused,
            StatusEvent::Resumed,
            StatusEvent::Stopped,
            StatusEvent::Resumed,
        ]
    );
}

#[test]
fn tick_advances_only_when_playing_and_finished() {
    let (mut player, session, _rx) = player_with(&["a", "b", "c"]);
    assert!(!player.tick());

    player.play_selected_or_first(None).unwrap();
    assert!(!player.tick(), "still busy");

    session.finish_track();
    assert!(player.tick());
    assert_eq!(current_title(&player).as_deref(), Some("b"));

    player.toggle_pause();
    assert!(!player.tick());
    player.toggle_pause();

    player.stop();
    assert!(!player.tick());
}

#[test]
fn tick_at_end_of_playlist_stops() {
    let (mut player, session, rx) = player_with(&["a"]);
    player.play_selected_or_first(None).unwrap();
    session.finish_track();
    drain(&rx);

    assert!(player.tick());
    assert_eq!(player.state(), PlaybackState::Stopped);
    assert_eq!(current_title(&player).as_deref(), Some("a"));
    assert_eq!(drain(&rx), vec![StatusEvent::EndOfPlaylist]);

    assert!(!player.tick());
    assert!(drain(&rx).is_empty());
}

#[test]
fn reload_clears_history_ledger_and_current() {
    let (mut player, session, rx) = player_with(&["a", "b"]);
    player.play_selected_or_first(None).unwrap();
    player.advance().unwrap();
    drain(&rx);

    let tracks = vec![Track::new("x", "/other/x.mp3")];
    assert_eq!(player.load_tracks(Path::new("/other"), tracks).unwrap(), 1);

    assert!(player.current_track().is_none());
    assert_eq!(player.state(), PlaybackState::Idle);
    assert_eq!(player.history_len(), 0);
    assert!(player.top_played(10).is_empty());
    assert_eq!(session.calls().last().map(String::as_str), Some("stop"));

    session.finish_track();
    assert!(!player.tick());
    assert_eq!(drain(&rx), vec![StatusEvent::Loaded { count: 1 }]);
}

#[test]
fn empty_load_leaves_playlist_untouched() {
    let (mut player, _session, rx) = player_with(&["a", "b"]);
    player.play_selected_or_first(None).unwrap();
    drain(&rx);

    let err = player
        .load_file_list(Path::new("/notes"), vec![PathBuf::from("/notes/readme.txt")])
        .unwrap_err();
    assert!(matches!(err, PlayerError::EmptyFolder(ref p) if p == Path::new("/notes")));
    assert_eq!(player.sequence().len(), 2);
    assert_eq!(current_title(&player).as_deref(), Some("a"));
    assert_eq!(player.state(), PlaybackState::Playing);

    let events = drain(&rx);
    assert!(matches!(&events[..], [StatusEvent::Error(msg)] if msg.contains("/notes")));
}

#[test]
fn load_folder_reports_missing_directory() {
    let (mut player, _session, _rx) = player_with(&["a"]);
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");

    let err = player.load_folder(&missing).unwrap_err();
    assert!(matches!(err, PlayerError::Scan(_)));
    assert_eq!(player.sequence().len(), 1);
}

#[test]
fn load_folder_reads_audio_files() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["b.mp3", "A.wav", "notes.txt"] {
        std::fs::write(dir.path().join(name), b"").unwrap();
    }
    let (mut player, _session, _rx) = player_with(&[]);

    assert_eq!(player.load_folder(dir.path()).unwrap(), 2);
    let order: Vec<String> = player
        .sequence()
        .iter()
        .map(|(_, t)| t.title.clone())
        .collect();
    assert_eq!(order, vec!["A", "b"]);
}

#[test]
fn volume_is_clamped_and_forwarded() {
    let (mut player, session, rx) = player_with(&[]);
    assert_eq!(session.volume(), 0.7);

    assert_eq!(player.set_volume(1.4), 1.0);
    assert_eq!(session.volume(), 1.0);
    assert_eq!(player.set_volume(f32::NAN), 0.0);
    assert_eq!(player.volume(), 0.0);
    assert_eq!(
        drain(&rx),
        vec![StatusEvent::VolumeChanged(1.0), StatusEvent::VolumeChanged(0.0)]
    );
}

#[test]
fn search_trims_query_and_ignores_blank() {
    let (player, _session, _rx) = player_with(&["Rain", "Rainbow", "Sun"]);
    assert_eq!(player.search("  rai "), vec!["Rain", "Rainbow"]);
    assert!(player.search("   ").is_empty());
    assert!(player.search("moon").is_empty());
}

#[test]
fn top_played_ranks_by_play_count() {
    let (mut player, _session, _rx) = player_with(&["a", "b", "c"]);
    for title in ["b", "a", "b", "c", "b", "a"] {
        player.play_selected_or_first(Some(title)).unwrap();
    }

    assert_eq!(
        player.top_played(2),
        vec![("b".to_string(), 3), ("a".to_string(), 2)]
    );
    assert_eq!(player.top_played(10).len(), 3);
}

#[test]
fn status_events_render_for_the_status_line() {
    assert_eq!(StatusEvent::Loaded { count: 3 }.to_string(), "Loaded 3 songs");
    assert_eq!(StatusEvent::NowPlaying("x".into()).to_string(), "Playing: x");
    assert_eq!(StatusEvent::ShuffleChanged(true).to_string(), "Shuffle ON");
    assert_eq!(StatusEvent::VolumeChanged(0.35).to_string(), "Volume 35%");
    assert_eq!(StatusEvent::NoPreviousTrack.to_string(), "No previous song");
}

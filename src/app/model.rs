//! View state: `App` and the input `Mode` it is in.

use std::path::PathBuf;

use crate::player::StatusEvent;

/// Which part of the screen receives key presses.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Browse,
    Search,
    TopPlayed,
}

impl Default for Mode {
    fn default() -> Self {
        Self::Browse
    }
}

/// The main view model.
#[derive(Debug, Default)]
pub struct App {
    pub mode: Mode,
    /// Cursor position in playlist order.
    pub selected: usize,
    pub track_count: usize,
    /// Move the cursor to whatever starts playing.
    pub follow_playback: bool,

    pub query: String,
    pub suggestions: Vec<String>,
    pub suggestion_selected: usize,

    pub top: Vec<(String, u32)>,
    pub top_selected: usize,

    pub status: String,
    pub now_playing: Option<String>,
    pub current_dir: Option<PathBuf>,
}

impl App {
    pub fn new() -> Self {
        Self {
            follow_playback: true,
            ..Self::default()
        }
    }

    pub fn set_current_dir(&mut self, dir: PathBuf) {
        self.current_dir = Some(dir);
    }

    pub fn has_tracks(&self) -> bool {
        self.track_count > 0
    }

    /// Fold a player notification into the view.
    pub fn apply_event(&mut self, event: &StatusEvent) {
        match event {
            StatusEvent::Loaded { count } => {
                self.track_count = *count;
                self.selected = 0;
                self.now_playing = None;
            }
            StatusEvent::NowPlaying(title) => {
                self.now_playing = Some(title.clone());
            }
            _ => {}
        }
        self.status = event.to_string();
    }

    /// Put the cursor on `position` if following playback.
    pub fn follow(&mut self, position: usize) {
        if self.follow_playback && self.mode == Mode::Browse {
            self.set_selected(position);
        }
    }

    pub fn set_selected(&mut self, position: usize) {
        self.selected = position.min(self.track_count.saturating_sub(1));
    }

    /// Move the cursor down, wrapping to the top.
    pub fn next(&mut self) {
        self.selected = wrap_next(self.selected, self.track_count);
    }

    /// Move the cursor up, wrapping to the bottom.
    pub fn prev(&mut self) {
        self.selected = wrap_prev(self.selected, self.track_count);
    }

    pub fn enter_search(&mut self) {
        self.mode = Mode::Search;
        self.query.clear();
        self.suggestions.clear();
        self.suggestion_selected = 0;
    }

    pub fn exit_search(&mut self) {
        self.mode = Mode::Browse;
        self.query.clear();
        self.suggestions.clear();
        self.suggestion_selected = 0;
    }

    pub fn push_query_char(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn pop_query_char(&mut self) {
        self.query.pop();
    }

    /// Replace the suggestion list; the highlight goes back to the first entry.
    pub fn set_suggestions(&mut self, suggestions: Vec<String>) {
        self.suggestions = suggestions;
        self.suggestion_selected = 0;
    }

    pub fn next_suggestion(&mut self) {
        self.suggestion_selected = wrap_next(self.suggestion_selected, self.suggestions.len());
    }

    pub fn prev_suggestion(&mut self) {
        self.suggestion_selected = wrap_prev(self.suggestion_selected, self.suggestions.len());
    }

    pub fn selected_suggestion(&self) -> Option<&str> {
        self.suggestions
            .get(self.suggestion_selected)
            .map(String::as_str)
    }

    pub fn open_top(&mut self, entries: Vec<(String, u32)>) {
        self.top = entries;
        self.top_selected = 0;
        self.mode = Mode::TopPlayed;
    }

    pub fn close_top(&mut self) {
        self.mode = Mode::Browse;
    }

    pub fn next_top(&mut self) {
        self.top_selected = wrap_next(self.top_selected, self.top.len());
    }

    pub fn prev_top(&mut self) {
        self.top_selected = wrap_prev(self.top_selected, self.top.len());
    }

    pub fn selected_top(&self) -> Option<&str> {
        self.top.get(self.top_selected).map(|(title, _)| title.as_str())
    }
}

fn wrap_next(current: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (current + 1) % len }
}

fn wrap_prev(current: usize, len: usize) -> usize {
    match (current, len) {
        (_, 0) => 0,
        (0, len) => len - 1,
        (current, len) => current.min(len) - 1,
    }
}

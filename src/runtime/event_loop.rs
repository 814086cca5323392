use std::io::Stdout;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::app::{App, Mode};
use crate::audio::PlaybackSession;
use crate::config;
use crate::player::{Player, StatusEvent};
use crate::ui;

/// Longest we block on input before redrawing.
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Main terminal event loop: handles input, drawing and the auto-advance poll.
/// Returns `Ok(())` when the user quits.
pub fn run<S: PlaybackSession>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    player: &mut Player<S>,
    events: &Receiver<StatusEvent>,
) -> Result<()> {
    let poll_interval = Duration::from_millis(settings.playback.poll_interval_ms);
    let mut next_tick = Instant::now() + poll_interval;

    loop {
        if Instant::now() >= next_tick {
            player.tick();
            next_tick = Instant::now() + poll_interval;
        }

        for event in events.try_iter() {
            app.apply_event(&event);
        }
        if let Some(pos) = player.current_position() {
            app.follow(pos);
        }

        terminal.draw(|f| ui::draw(f, app, player))?;

        let timeout = next_tick
            .saturating_duration_since(Instant::now())
            .min(INPUT_POLL);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, player) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Returns true when the user asked to quit.
///
/// Player errors are ignored here; they already reach the status line.
fn handle_key_event<S: PlaybackSession>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    player: &mut Player<S>,
) -> bool {
    match app.mode {
        Mode::Search => {
            handle_search_key(key, app, player);
            false
        }
        Mode::TopPlayed => {
            handle_top_key(key, app, player);
            false
        }
        Mode::Browse => handle_browse_key(key, settings, app, player),
    }
}

fn handle_search_key<S: PlaybackSession>(key: KeyEvent, app: &mut App, player: &mut Player<S>) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.exit_search(),
        KeyCode::Down => app.next_suggestion(),
        KeyCode::Up => app.prev_suggestion(),
        KeyCode::Char('n') | KeyCode::Char('j') if ctrl => app.next_suggestion(),
        KeyCode::Char('p') | KeyCode::Char('k') if ctrl => app.prev_suggestion(),
        KeyCode::Backspace => {
            app.pop_query_char();
            app.set_suggestions(player.search(&app.query));
        }
        KeyCode::Char(c) if !c.is_control() && !ctrl => {
            app.push_query_char(c);
            app.set_suggestions(player.search(&app.query));
        }
        KeyCode::Enter => {
            let Some(title) = app.selected_suggestion().map(str::to_owned) else {
                return;
            };
            app.exit_search();
            app.follow_playback = true;
            let _ = player.play_selected_or_first(Some(&title));
        }
        _ => {}
    }
}

fn handle_top_key<S: PlaybackSession>(key: KeyEvent, app: &mut App, player: &mut Player<S>) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('t') | KeyCode::Char('q') => app.close_top(),
        KeyCode::Char('j') | KeyCode::Down => app.next_top(),
        KeyCode::Char('k') | KeyCode::Up => app.prev_top(),
        KeyCode::Enter => {
            let Some(title) = app.selected_top().map(str::to_owned) else {
                return;
            };
            app.close_top();
            app.follow_playback = true;
            let _ = player.play_selected_or_first(Some(&title));
        }
        _ => {}
    }
}

fn handle_browse_key<S: PlaybackSession>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    player: &mut Player<S>,
) -> bool {
    match key.code {
        KeyCode::Char('q') => {
            player.stop();
            info!("quit requested");
            return true;
        }
        KeyCode::Char('/') => app.enter_search(),
        KeyCode::Char('t') => app.open_top(player.top_played(settings.ranking.top_k)),
        KeyCode::Char('j') | KeyCode::Down => {
            app.follow_playback = false;
            app.next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.follow_playback = false;
            app.prev();
        }
        KeyCode::Char('g') | KeyCode::Home => {
            app.follow_playback = false;
            app.set_selected(0);
        }
        KeyCode::Char('G') | KeyCode::End => {
            app.follow_playback = false;
            app.set_selected(app.track_count.saturating_sub(1));
        }
        KeyCode::Enter => {
            if app.has_tracks() {
                app.follow_playback = true;
                let _ = player.play_at(app.selected);
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => player.toggle_pause(),
        KeyCode::Char('x') => player.stop(),
        KeyCode::Char('l') => {
            app.follow_playback = true;
            let _ = player.advance();
        }
        KeyCode::Char('h') => {
            app.follow_playback = true;
            let _ = player.go_back();
        }
        KeyCode::Char('s') => player.set_shuffle(!player.shuffle()),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            player.set_volume(player.volume() + settings.audio.volume_step);
        }
        KeyCode::Char('-') => {
            player.set_volume(player.volume() - settings.audio.volume_step);
        }
        KeyCode::Char('r') => {
            if let Some(dir) = app.current_dir.clone() {
                let _ = player.load_folder(&dir);
            }
        }
        _ => {}
    }

    false
}

//! UI rendering helpers for the terminal user interface.
//!
//! Everything here is a pure function of the `App` view state and the
//! `Player`; nothing is mutated while drawing.

use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, Mode};
use crate::audio::PlaybackSession;
use crate::player::{PlaybackState, Player};

const CONTROLS: &[(&str, &str)] = &[
    ("j/k", "up/down"),
    ("enter", "play selected"),
    ("space/p", "play/pause"),
    ("x", "stop"),
    ("h/l", "back/next"),
    ("s", "shuffle"),
    ("+/-", "volume"),
    ("/", "search"),
    ("t", "top played"),
    ("r", "rescan"),
    ("q", "quit"),
];

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(key, action)| format!("[{key}] {action}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width.saturating_sub(2)).max(10);
    let height = height.min(r.height.saturating_sub(2)).max(3);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width: width.min(r.width),
        height: height.min(r.height),
    }
}

/// Pick the slice of a `total`-long list to show in `height` rows, keeping
/// `selected` near the middle.
///
/// Returns `(start, end, selected_row)`.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize, usize) {
    let selected = selected.min(total.saturating_sub(1));
    if total <= height || height == 0 {
        return (0, total, selected);
    }

    let half = height / 2;
    let start = selected.saturating_sub(half).min(total - height);
    (start, start + height, selected - start)
}

fn state_label(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Idle => "Idle",
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
        PlaybackState::Stopped => "Stopped",
    }
}

fn padded_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into `frame`.
pub fn draw<S: PlaybackSession>(frame: &mut Frame, app: &App, player: &Player<S>) {
    let search_height = if app.mode == Mode::Search { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(search_height),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let dir = app
        .current_dir
        .as_ref()
        .map(|d| d.display().to_string())
        .unwrap_or_default();
    let header = Paragraph::new(dir).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" tunedex ")
            .title_alignment(Alignment::Center),
    );
    frame.render_widget(header, chunks[0]);

    draw_status(frame, chunks[1], app, player);

    if app.mode == Mode::Search {
        let query = Paragraph::new(format!("{}_", app.query))
            .block(padded_block(" search (enter plays, esc closes) "));
        frame.render_widget(query, chunks[2]);
    }

    draw_playlist(frame, chunks[3], app, player);

    match app.mode {
        Mode::Search if !app.query.trim().is_empty() => draw_suggestions(frame, chunks[3], app),
        Mode::TopPlayed => draw_top_played(frame, chunks[3], app),
        _ => {}
    }

    let footer = Paragraph::new(controls_text())
        .block(padded_block(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}

fn draw_status<S: PlaybackSession>(frame: &mut Frame, area: Rect, app: &App, player: &Player<S>) {
    let mut parts: Vec<String> = vec![state_label(player.state()).to_string()];

    if let Some(track) = player.current_track() {
        match track.duration {
            Some(d) => parts.push(format!("Song: {} [{}]", track.title, format_mmss(d))),
            None => parts.push(format!("Song: {}", track.title)),
        }
    }
    parts.push(format!(
        "Shuffle: {}",
        if player.shuffle() { "ON" } else { "OFF" }
    ));
    parts.push(format!("Volume: {}%", (player.volume() * 100.0).round() as u32));
    if !app.status.is_empty() {
        parts.push(app.status.clone());
    }

    let status = Paragraph::new(parts.join(" • "))
        .block(padded_block(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, area);
}

fn draw_playlist<S: PlaybackSession>(frame: &mut Frame, area: Rect, app: &App, player: &Player<S>) {
    let sequence = player.sequence();
    let total = sequence.len();
    let height = area.height.saturating_sub(2) as usize;
    let (start, end, selected_row) = visible_window(total, height, app.selected);
    let playing = player.current_position();

    // Only build items for the rows on screen.
    let items: Vec<ListItem> = sequence
        .iter()
        .enumerate()
        .skip(start)
        .take(end - start)
        .map(|(pos, (_, track))| {
            let marker = if playing == Some(pos) { "♪ " } else { "  " };
            let line = match track.duration {
                Some(d) => format!("{marker}{}  {}", track.title, format_mmss(d)),
                None => format!("{marker}{}", track.title),
            };
            ListItem::new(line)
        })
        .collect();

    let title = format!(" tracks ({total}) ");
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(selected_row));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_suggestions(frame: &mut Frame, area: Rect, app: &App) {
    let height = (app.suggestions.len() as u16).saturating_add(2).max(3);
    let popup = centered_rect_sized(60, height, area);
    frame.render_widget(Clear, popup);

    let items: Vec<ListItem> = if app.suggestions.is_empty() {
        vec![ListItem::new("no matches").italic()]
    } else {
        app.suggestions
            .iter()
            .map(|s| ListItem::new(s.as_str()))
            .collect()
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" suggestions "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    if !app.suggestions.is_empty() {
        state.select(Some(app.suggestion_selected));
    }
    frame.render_stateful_widget(list, popup, &mut state);
}

fn draw_top_played(frame: &mut Frame, area: Rect, app: &App) {
    let height = (app.top.len() as u16).saturating_add(2).max(3);
    let popup = centered_rect_sized(50, height, area);
    frame.render_widget(Clear, popup);

    let items: Vec<ListItem> = if app.top.is_empty() {
        vec![ListItem::new("nothing played yet").italic()]
    } else {
        app.top
            .iter()
            .enumerate()
            .map(|(i, (title, count))| {
                let plays = if *count == 1 { "play" } else { "plays" };
                ListItem::new(format!("{:>2}. {title} ({count} {plays})", i + 1))
            })
            .collect()
    };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" top played (enter plays, t closes) "),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default();
    if !app.top.is_empty() {
        state.select(Some(app.top_selected));
    }
    frame.render_stateful_widget(list, popup, &mut state);
}

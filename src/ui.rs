//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::App;
use crate::audio::AudioEngine;
use crate::config::{ControlsSettings, UiSettings};
use crate::session::{PlaybackState, format_elapsed};

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "up/down");
    map.insert("gg/G", "top/bottom");
    map.insert("z", "jump to playing");
    map.insert("enter", "play selected song");
    map.insert("space/p", "play/pause");
    map.insert("h/l", "prev/next song");
    // H/L is filled dynamically from config.
    map.insert("s", "shuffle");
    map.insert("q", "quit");
    map
});

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    // Keep the rendered order stable and human-friendly.
    let order = [
        "space/p", "h/l", "H/L", "s", "j/k", "gg/G", "z", "enter", "q",
    ];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] scrub -/+{scrub_seconds}s"))
            } else {
                CONTROLS_MAP.get(k).map(|v| format!("[{k}] {v}"))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

fn header<'a>(ui_settings: &'a UiSettings) -> Paragraph<'a> {
    Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" rola ")
                .title_alignment(Alignment::Center),
        )
}

/// Transport line: play/pause glyph, shuffle flag, cursor mode and any error.
fn status_line<E: AudioEngine>(app: &App<E>) -> Line<'static> {
    // The glyph shows the action the play/pause key will take.
    let glyph = match app.state() {
        PlaybackState::Playing => "⏸",
        PlaybackState::Paused | PlaybackState::Stopped => "▶",
    };
    let shuffle = if app.playlist.is_shuffled() {
        Span::styled("SHUFFLE: ON", Style::default().fg(Color::Green))
    } else {
        Span::raw("SHUFFLE: OFF")
    };
    let cursor = if app.follow_playback {
        "CURSOR: Follow"
    } else {
        "CURSOR: Free-roam"
    };

    let mut spans = vec![
        Span::raw(format!(" {glyph}  ")),
        shuffle,
        Span::raw(format!(" • {cursor}")),
    ];
    if let Some(dir) = &app.current_dir {
        spans.push(Span::raw(format!(" • Dir: {dir}")));
    }
    if let Some(err) = &app.last_error {
        spans.push(Span::styled(
            format!(" • {err}"),
            Style::default().fg(Color::Red),
        ));
    }
    Line::from(spans)
}

fn draw_now_playing<E: AudioEngine>(frame: &mut Frame, app: &App<E>, area: Rect) {
    let block = Block::bordered()
        .padding(Padding {
            left: 1,
            right: 1,
            top: 0,
            bottom: 0,
        })
        .title(" now playing ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let track = app.playlist.active_track();
    let title = Paragraph::new(track.title.as_str())
        .bold()
        .alignment(Alignment::Center);
    frame.render_widget(title, rows[0]);

    let total = app
        .session
        .loaded()
        .map(|t| t.duration)
        .unwrap_or(track.duration);
    let label = format!(
        "{} / {}",
        format_elapsed(app.session.position()),
        format_elapsed(total)
    );
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(app.session.progress().clamp(0.0, 1.0))
        .label(label);
    frame.render_widget(gauge, rows[1]);

    frame.render_widget(Paragraph::new(status_line(app)), rows[2]);
}

fn draw_tracks<E: AudioEngine>(frame: &mut Frame, app: &App<E>, area: Rect) {
    let active = app.playlist.active_index();
    let items: Vec<ListItem> = app
        .playlist
        .tracks()
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let style = if i == active {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            ListItem::new(track.title.as_str()).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" tracks "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(app.cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

fn footer(scrub_seconds: u64) -> Paragraph<'static> {
    Paragraph::new(controls_text(scrub_seconds))
        .block(Block::default().borders(Borders::ALL).title(" controls "))
        .wrap(Wrap { trim: true })
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw<E: AudioEngine>(
    frame: &mut Frame,
    app: &App<E>,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    frame.render_widget(header(ui_settings), chunks[0]);
    draw_now_playing(frame, app, chunks[1]);
    draw_tracks(frame, app, chunks[2]);
    frame.render_widget(footer(controls_settings.scrub_seconds), chunks[3]);
}

/// Render the static view shown when the folder has no playable tracks.
pub fn draw_empty(frame: &mut Frame, ui_settings: &UiSettings, dir: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    frame.render_widget(header(ui_settings), chunks[0]);

    let notice = Paragraph::new(vec![
        Line::from("No songs in the playlist").bold(),
        Line::from(format!("Add .mp3 files to {dir} and restart.")),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(notice, chunks[1]);

    let footer = Paragraph::new("[q] quit")
        .block(Block::default().borders(Borders::ALL).title(" controls "));
    frame.render_widget(footer, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::fake::FakeEngine;
    use crate::library::Track;
    use crate::playlist::PlaylistStore;
    use crate::session::PlaybackSession;
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::Duration;

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn controls_text_includes_scrub_seconds() {
        let text = controls_text(9);
        assert!(text.contains("[H/L] scrub -/+9s"));
        assert!(text.starts_with("[space/p] play/pause"));
        assert!(text.ends_with("[q] quit"));
    }

    #[test]
    fn draw_shows_title_time_and_glyph() {
        let tracks = vec![
            Track::new("/music/Opening.mp3", Duration::from_secs(125)),
            Track::new("/music/Closing.mp3", Duration::from_secs(60)),
        ];
        let mut app = App::new(
            PlaylistStore::load(tracks).unwrap(),
            PlaybackSession::new(FakeEngine::default(), Duration::from_millis(500)),
        );
        app.play_active();
        app.on_tick(Duration::from_secs(65));

        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal
            .draw(|f| draw(f, &app, &UiSettings::default(), &ControlsSettings::default()))
            .unwrap();

        let text = screen(&terminal);
        assert!(text.contains("WELCOME BACK"));
        assert!(text.contains("Opening"));
        assert!(text.contains("01:05 / 02:05"));
        assert!(text.contains("⏸"));
        assert!(text.contains("SHUFFLE: OFF"));
    }

    #[test]
    fn draw_empty_shows_notice() {
        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        terminal
            .draw(|f| draw_empty(f, &UiSettings::default(), "Playlist#1"))
            .unwrap();
        let text = screen(&terminal);
        assert!(text.contains("No songs in the playlist"));
        assert!(text.contains("[q] quit"));
    }
}

use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, info};

use crate::app::App;
use crate::audio::AudioEngine;
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::mpris_sync::update_mpris;
use crate::session::PlaybackState;
use crate::ui;

/// Longest time the loop blocks waiting for input.
const INPUT_POLL: Duration = Duration::from_millis(50);

/// What MPRIS was last told, so it is only refreshed on change.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MprisSnapshot {
    loaded: Option<PathBuf>,
    active_index: usize,
    playback: PlaybackState,
    shuffled: bool,
}

impl MprisSnapshot {
    fn of<E: AudioEngine>(app: &App<E>) -> Self {
        Self {
            loaded: app.session.loaded().map(|t| t.path.clone()),
            active_index: app.playlist.active_index(),
            playback: app.state(),
            shuffled: app.playlist.is_shuffled(),
        }
    }
}

/// State tracked by the runtime event loop across iterations.
#[derive(Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    last_mpris: Option<MprisSnapshot>,
}

/// Main terminal event loop: draws, handles keys and MPRIS commands, and
/// drives the playback tick. Returns `Ok(())` when shutdown is requested.
///
/// Everything runs on this one thread, so a tick never overlaps another tick
/// or a key handler.
pub fn run<E: AudioEngine>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App<E>,
    mpris: &MprisHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> anyhow::Result<()> {
    let tick_interval = settings.playback.tick_interval();
    let mut last_tick = Instant::now();

    loop {
        sync_mpris(mpris, app, state);

        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, app) {
                return Ok(());
            }
        }

        let timeout = tick_interval
            .saturating_sub(last_tick.elapsed())
            .min(INPUT_POLL);
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && handle_key_event(key, settings, app, control_tx, state)
        {
            break;
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick_interval {
            last_tick = Instant::now();
            if app.on_tick(elapsed) {
                debug!(index = app.playlist.active_index(), "auto-advanced");
            }
        }
    }

    Ok(())
}

/// Loop for an empty playlist: a static notice until `q` (or MPRIS Quit).
pub fn run_empty(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    dir: &str,
    control_rx: &mpsc::Receiver<ControlCmd>,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| ui::draw_empty(f, &settings.ui, dir))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if cmd == ControlCmd::Quit {
                return Ok(());
            }
        }

        if event::poll(INPUT_POLL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && key.code == KeyCode::Char('q')
        {
            return Ok(());
        }
    }
}

fn sync_mpris<E: AudioEngine>(mpris: &MprisHandle, app: &App<E>, state: &mut EventLoopState) {
    let snapshot = MprisSnapshot::of(app);
    if state.last_mpris.as_ref() != Some(&snapshot) {
        update_mpris(mpris, app);
        state.last_mpris = Some(snapshot);
    }
}

/// Apply an MPRIS (or forwarded key) command. Returns true on quit.
fn handle_control_cmd<E: AudioEngine>(cmd: ControlCmd, app: &mut App<E>) -> bool {
    debug!(?cmd, "control command");
    match cmd {
        ControlCmd::Quit => {
            info!("quit requested");
            app.stop();
            return true;
        }
        ControlCmd::Play => app.play(),
        ControlCmd::Pause => app.pause(),
        ControlCmd::PlayPause => app.toggle_play(),
        ControlCmd::Stop => app.stop(),
        ControlCmd::Next => app.skip(1),
        ControlCmd::Prev => app.skip(-1),
    }
    false
}

/// Apply a key press. Returns true on quit.
fn handle_key_event<E: AudioEngine>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App<E>,
    control_tx: &mpsc::Sender<ControlCmd>,
    state: &mut EventLoopState,
) -> bool {
    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }

    let scrub = i64::try_from(settings.controls.scrub_seconds).unwrap_or(i64::MAX);

    match key.code {
        KeyCode::Char('q') => {
            info!("quit requested");
            app.stop();
            return true;
        }
        KeyCode::Char('s') => app.toggle_shuffle(),
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.cursor_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => app.cursor_last(),
        KeyCode::Char('j') | KeyCode::Down => app.cursor_next(),
        KeyCode::Char('k') | KeyCode::Up => app.cursor_prev(),
        KeyCode::Char('z') => app.cursor_to_active(),
        KeyCode::Enter => {
            if let Err(e) = app.play_cursor() {
                app.report(e);
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            let _ = control_tx.send(ControlCmd::PlayPause);
        }
        KeyCode::Char('l') => {
            let _ = control_tx.send(ControlCmd::Next);
        }
        KeyCode::Char('h') => {
            let _ = control_tx.send(ControlCmd::Prev);
        }
        KeyCode::Char('L') => app.seek_by(scrub),
        KeyCode::Char('H') => app.seek_by(-scrub),
        _ => {}
    }

    false
}

use std::env;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::Context;
use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::RodioPlayer;
use crate::error::PlayerError;
use crate::library::scan;
use crate::mpris::ControlCmd;
use crate::playlist::PlaylistStore;
use crate::session::PlaybackSession;

mod event_loop;
mod logging;
mod mpris_sync;
mod settings;
mod startup;

/// What the terminal shows once setup is done.
enum Screen {
    Player(Box<App<RodioPlayer>>),
    Empty,
}

pub fn run() -> anyhow::Result<()> {
    let settings::LoadedSettings { settings, problem } = settings::load_settings();

    let log_path = logging::init(&settings.log);
    info!(log = ?log_path, "rola starting");
    if let Some(problem) = problem {
        warn!("{problem}");
    }

    let dir = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| settings.library.dir.clone());
    let dir_label = dir.display().to_string();

    let tracks = scan(&dir, &settings.library);

    let screen = match PlaylistStore::load(tracks) {
        Ok(store) => {
            let engine = RodioPlayer::new().context("failed to open the default audio output")?;
            let session = PlaybackSession::new(engine, settings.playback.guard_window());
            let mut app = App::new(store, session);
            app.set_current_dir(dir_label.clone());
            startup::apply_playback_defaults(&mut app, &settings);
            Screen::Player(Box::new(app))
        }
        Err(PlayerError::EmptyPlaylist) => {
            warn!(dir = %dir_label, "no playable tracks found");
            Screen::Empty
        }
        Err(e) => return Err(e.into()),
    };

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx.clone());

    enable_raw_mode()?;
    let run_result = with_restore(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen)?;
            let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

            match screen {
                Screen::Player(mut app) => {
                    let mut state = event_loop::EventLoopState::default();
                    event_loop::run(
                        &mut terminal,
                        &settings,
                        &mut *app,
                        &mpris,
                        &control_tx,
                        &control_rx,
                        &mut state,
                    )
                }
                Screen::Empty => {
                    event_loop::run_empty(&mut terminal, &settings, &dir_label, &control_rx)
                }
            }
        },
        restore_terminal,
    );

    info!("rola exiting");
    run_result
}

/// Leave raw mode and the alternate screen and show the cursor again.
fn restore_terminal() -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)?;
    Ok(())
}

/// Run `body`, then `restore` no matter how `body` ended. The body's error
/// wins over a restore error.
fn with_restore<T>(
    body: impl FnOnce() -> anyhow::Result<T>,
    restore: impl FnOnce() -> anyhow::Result<()>,
) -> anyhow::Result<T> {
    let result = body();
    let restored = restore();
    let value = result?;
    restored?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn restore_runs_when_setup_fails() {
        let restored = Cell::new(false);
        let result: anyhow::Result<()> = with_restore(
            || anyhow::bail!("alternate screen unavailable"),
            || {
                restored.set(true);
                Ok(())
            },
        );
        assert!(restored.get());
        assert_eq!(result.unwrap_err().to_string(), "alternate screen unavailable");
    }

    #[test]
    fn restore_error_surfaces_after_clean_run() {
        let result = with_restore(|| Ok(3), || anyhow::bail!("tty gone"));
        assert_eq!(result.unwrap_err().to_string(), "tty gone");

        let ok = with_restore(|| Ok(3), || Ok(()));
        assert_eq!(ok.unwrap(), 3);
    }
}

//! Application model: the `App` handed to every key and MPRIS handler.
//!
//! `App` owns the playlist store and the playback session and implements the
//! composite operations ("advance, then load and play") on top of them.

use std::time::Duration;

use tracing::{info, warn};

use crate::audio::AudioEngine;
use crate::error::{PlayerError, Result};
use crate::playlist::PlaylistStore;
use crate::session::{PlaybackSession, PlaybackState};

/// The main application model.
pub struct App<E: AudioEngine> {
    pub playlist: PlaylistStore,
    pub session: PlaybackSession<E>,
    /// Highlighted row in the track list (display order).
    pub cursor: usize,
    /// Whether the cursor jumps to the active track when it changes.
    pub follow_playback: bool,
    /// Shown until the next track starts successfully.
    pub last_error: Option<String>,
    pub current_dir: Option<String>,
}

impl<E: AudioEngine> App<E> {
    pub fn new(playlist: PlaylistStore, session: PlaybackSession<E>) -> Self {
        Self {
            playlist,
            session,
            cursor: 0,
            follow_playback: true,
            last_error: None,
            current_dir: None,
        }
    }

    /// Record the playlist directory in the app state.
    pub fn set_current_dir(&mut self, dir: String) {
        self.current_dir = Some(dir);
    }

    pub fn state(&self) -> PlaybackState {
        self.session.state()
    }

    /// Load the active track without starting it.
    pub fn prime(&mut self) {
        self.start_active(false);
    }

    /// Load and play the active track.
    ///
    /// A track that fails to load is skipped once; if the next one fails too
    /// the session is left Stopped with `last_error` set.
    pub fn play_active(&mut self) {
        self.start_active(true);
    }

    fn start_active(&mut self, play: bool) {
        for attempt in 0..2 {
            let track = self.playlist.active_track().clone();
            let started = self.session.load_track(&track).and_then(|_| {
                if play {
                    self.session.play()
                } else {
                    Ok(())
                }
            });

            match started {
                Ok(()) => {
                    if play {
                        info!(title = %track.title, "now playing");
                    }
                    self.last_error = None;
                    self.sync_cursor();
                    return;
                }
                Err(e) if attempt == 0 => {
                    warn!(error = %e, "skipping track that failed to load");
                    self.playlist.advance(1);
                }
                Err(e) => {
                    warn!(error = %e, "second track failed to load, stopping");
                    self.session.stop();
                    self.last_error = Some(e.to_string());
                }
            }
        }
        self.sync_cursor();
    }

    /// The play/pause control.
    pub fn toggle_play(&mut self) {
        let active = self.playlist.active_track().clone();
        let loaded_is_active = self
            .session
            .loaded()
            .map(|t| t.path == active.path)
            .unwrap_or(false);

        if self.state() == PlaybackState::Stopped && !loaded_is_active {
            self.play_active();
            return;
        }
        if let Err(e) = self.session.toggle(&active) {
            self.report(e);
        }
    }

    /// Start or resume; no-op while already playing.
    pub fn play(&mut self) {
        if self.state() != PlaybackState::Playing {
            self.toggle_play();
        }
    }

    /// Pause; while Stopped this loads and plays the active track instead.
    pub fn pause(&mut self) {
        if self.state() == PlaybackState::Stopped {
            self.toggle_play();
            return;
        }
        if let Err(e) = self.session.pause() {
            self.report(e);
        }
    }

    pub fn stop(&mut self) {
        self.session.stop();
    }

    /// Move `delta` tracks through the display order (wrapping) and play.
    pub fn skip(&mut self, delta: isize) {
        self.follow_playback = true;
        self.playlist.advance(delta);
        self.play_active();
    }

    /// Play the track at display position `index`.
    pub fn select(&mut self, index: usize) -> Result<()> {
        self.playlist.select_index(index)?;
        self.follow_playback = true;
        self.play_active();
        Ok(())
    }

    /// Play the track under the cursor.
    pub fn play_cursor(&mut self) -> Result<()> {
        self.select(self.cursor)
    }

    /// Toggle shuffle. The active track keeps playing; the cursor moves with it.
    pub fn toggle_shuffle(&mut self) {
        self.playlist.toggle_shuffle();
        self.cursor = self.playlist.active_index();
        info!(shuffled = self.playlist.is_shuffled(), "shuffle toggled");
    }

    /// Scrub the loaded track by `secs`.
    pub fn seek_by(&mut self, secs: i64) {
        if let Err(e) = self.session.seek_by(secs) {
            self.report(e);
        }
    }

    /// Periodic tick. Advances to the next track when the current one ends;
    /// returns true when that happened.
    pub fn on_tick(&mut self, elapsed: Duration) -> bool {
        if self.session.tick(elapsed).is_none() {
            return false;
        }
        info!("track completed");
        self.playlist.advance(1);
        self.play_active();
        true
    }

    /// Move the cursor down one row, wrapping to the top.
    pub fn cursor_next(&mut self) {
        self.follow_playback = false;
        self.cursor = (self.cursor + 1) % self.playlist.len();
    }

    /// Move the cursor up one row, wrapping to the bottom.
    pub fn cursor_prev(&mut self) {
        self.follow_playback = false;
        let len = self.playlist.len();
        self.cursor = (self.cursor + len - 1) % len;
    }

    pub fn cursor_first(&mut self) {
        self.follow_playback = false;
        self.cursor = 0;
    }

    pub fn cursor_last(&mut self) {
        self.follow_playback = false;
        self.cursor = self.playlist.len() - 1;
    }

    /// Put the cursor back on the active track and follow it again.
    pub fn cursor_to_active(&mut self) {
        self.follow_playback = true;
        self.sync_cursor();
    }

    fn sync_cursor(&mut self) {
        if self.follow_playback {
            self.cursor = self.playlist.active_index();
        }
    }

    /// Log a failed command and show it on the transport line.
    pub fn report(&mut self, e: PlayerError) {
        warn!(error = %e, "playback command failed");
        self.last_error = Some(e.to_string());
    }
}

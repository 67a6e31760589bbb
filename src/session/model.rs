use std::time::Duration;

use tracing::debug;

use crate::audio::AudioEngine;
use crate::error::{PlayerError, Result};
use crate::library::Track;

/// The transport state of the session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Returned by [`PlaybackSession::tick`] once the loaded track has run out.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TrackCompleted;

/// Format `d` as `MM:SS`, dropping any sub-second remainder.
pub fn format_elapsed(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Drives an [`AudioEngine`] for one track at a time and tracks its position.
pub struct PlaybackSession<E: AudioEngine> {
    engine: E,
    state: PlaybackState,
    loaded: Option<Track>,
    position: Duration,
    completed: bool,
    /// A track counts as finished this close to its end.
    guard: Duration,
}

impl<E: AudioEngine> PlaybackSession<E> {
    pub fn new(engine: E, guard: Duration) -> Self {
        Self {
            engine,
            state: PlaybackState::Stopped,
            loaded: None,
            position: Duration::ZERO,
            completed: false,
            guard,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn loaded(&self) -> Option<&Track> {
        self.loaded.as_ref()
    }

    #[cfg(test)]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    #[cfg(test)]
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Fraction of the loaded track already played, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        match &self.loaded {
            Some(t) if !t.duration.is_zero() => {
                (self.position.as_secs_f64() / t.duration.as_secs_f64()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    /// Stop whatever is playing and load `track`, leaving the session Stopped at 0.
    pub fn load_track(&mut self, track: &Track) -> Result<()> {
        self.engine.stop();
        self.state = PlaybackState::Stopped;
        self.position = Duration::ZERO;
        self.completed = false;
        self.loaded = None;

        self.engine.load(&track.path)?;
        self.loaded = Some(track.clone());
        debug!(title = %track.title, "track loaded");
        Ok(())
    }

    /// Start (from Stopped) or resume (from Paused). No-op while Playing.
    pub fn play(&mut self) -> Result<()> {
        match self.state {
            PlaybackState::Playing => {}
            PlaybackState::Paused => {
                self.engine.resume();
                self.state = PlaybackState::Playing;
            }
            PlaybackState::Stopped => {
                if self.loaded.is_none() {
                    return Err(PlayerError::NoTrackLoaded);
                }
                self.engine.play()?;
                self.state = PlaybackState::Playing;
            }
        }
        Ok(())
    }

    /// Hold playback, keeping the position.
    ///
    /// While Stopped this starts the loaded track instead, so a lone pause
    /// control never dead-ends before anything has played. Fails with
    /// `NoTrackLoaded` only when there is nothing to start.
    pub fn pause(&mut self) -> Result<()> {
        match self.state {
            PlaybackState::Playing => {
                self.engine.pause();
                self.state = PlaybackState::Paused;
                Ok(())
            }
            PlaybackState::Paused => Ok(()),
            PlaybackState::Stopped => self.play(),
        }
    }

    /// The single play/pause control.
    ///
    /// Playing pauses, Paused resumes, and Stopped loads `active` (unless it
    /// is already loaded) and plays it.
    pub fn toggle(&mut self, active: &Track) -> Result<()> {
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused => self.play(),
            PlaybackState::Stopped => {
                let is_loaded = self
                    .loaded
                    .as_ref()
                    .map(|t| t.path == active.path)
                    .unwrap_or(false);
                if !is_loaded {
                    self.load_track(active)?;
                }
                self.play()
            }
        }
    }

    /// Stop output and rewind; the track stays loaded.
    pub fn stop(&mut self) {
        self.engine.stop();
        self.state = PlaybackState::Stopped;
        self.position = Duration::ZERO;
        self.completed = false;
    }

    /// Move the position by `secs` (either direction), clamped to the track.
    pub fn seek_by(&mut self, secs: i64) -> Result<()> {
        if self.state == PlaybackState::Stopped || self.completed {
            return Ok(());
        }
        let Some(duration) = self.loaded.as_ref().map(|t| t.duration) else {
            return Ok(());
        };

        let step = Duration::from_secs(secs.unsigned_abs());
        let target = if secs >= 0 {
            self.position.saturating_add(step).min(duration)
        } else {
            self.position.saturating_sub(step)
        };

        self.engine.seek(target)?;
        self.position = target;
        Ok(())
    }

    /// Advance the position by `elapsed` (or to the engine's own position when
    /// it reports one).
    ///
    /// Returns `Some(TrackCompleted)` exactly once per loaded track: when the
    /// position comes within the guard window of the end, or the engine stops
    /// producing audio on its own. After that the position no longer moves.
    pub fn tick(&mut self, elapsed: Duration) -> Option<TrackCompleted> {
        if self.state != PlaybackState::Playing || self.completed {
            return None;
        }
        let duration = self.loaded.as_ref()?.duration;

        let drained = !self.engine.is_playing();
        let next = self
            .engine
            .position()
            .unwrap_or_else(|| self.position.saturating_add(elapsed));
        self.position = next.min(duration);

        if drained || self.position.saturating_add(self.guard) >= duration {
            self.completed = true;
            return Some(TrackCompleted);
        }
        None
    }
}

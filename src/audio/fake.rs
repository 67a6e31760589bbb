//! In-memory engine for session and app tests.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{PlayerError, Result};

use super::engine::AudioEngine;

#[derive(Debug, Default)]
pub struct FakeEngine {
    pub loaded: Option<PathBuf>,
    pub playing: bool,
    /// Simulates the decoder running dry before the metadata duration.
    pub drained: bool,
    /// Position the engine claims; `None` makes the session count ticks itself.
    pub reported_position: Option<Duration>,
    pub failing: HashSet<PathBuf>,
    pub loads: Vec<PathBuf>,
    pub seeks: Vec<Duration>,
}

impl FakeEngine {
    /// An engine that refuses to load any of `paths`.
    pub fn failing_on<P: AsRef<Path>>(paths: &[P]) -> Self {
        Self {
            failing: paths.iter().map(|p| p.as_ref().to_path_buf()).collect(),
            ..Self::default()
        }
    }
}

impl AudioEngine for FakeEngine {
    fn load(&mut self, path: &Path) -> Result<()> {
        self.playing = false;
        self.drained = false;
        self.loads.push(path.to_path_buf());
        if self.failing.contains(path) {
            self.loaded = None;
            return Err(PlayerError::track_load(path, "corrupt frame header"));
        }
        self.loaded = Some(path.to_path_buf());
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        if self.loaded.is_none() {
            return Err(PlayerError::NoTrackLoaded);
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn resume(&mut self) {
        self.playing = self.loaded.is_some();
    }

    fn stop(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing && !self.drained
    }

    fn position(&self) -> Option<Duration> {
        self.reported_position
    }

    fn seek(&mut self, to: Duration) -> Result<()> {
        if self.loaded.is_none() {
            return Err(PlayerError::NoTrackLoaded);
        }
        self.seeks.push(to);
        Ok(())
    }
}

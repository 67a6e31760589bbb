use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::debug;

use crate::error::{PlayerError, Result};

use super::engine::AudioEngine;
use super::sink::create_sink_at;

/// [`AudioEngine`] backed by the default rodio output device.
pub struct RodioPlayer {
    stream: OutputStream,
    current: Option<PathBuf>,
    sink: Option<Sink>,
    /// Where in the file the current sink started; `Sink::get_pos` counts from there.
    offset: Duration,
}

impl RodioPlayer {
    pub fn new() -> Result<Self> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| PlayerError::AudioOutput(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped, which would land on the TUI.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            current: None,
            sink: None,
            offset: Duration::ZERO,
        })
    }

    fn replace_sink(&mut self, path: &Path, start_at: Duration) -> Result<()> {
        let sink = create_sink_at(&self.stream, path, start_at)?;
        if let Some(old) = self.sink.replace(sink) {
            old.stop();
        }
        self.offset = start_at;
        Ok(())
    }
}

impl AudioEngine for RodioPlayer {
    fn load(&mut self, path: &Path) -> Result<()> {
        self.stop();
        self.current = None;
        self.replace_sink(path, Duration::ZERO)?;
        self.current = Some(path.to_path_buf());
        debug!(path = %path.display(), "loaded");
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        // A stop() drops the sink; rebuild it so play restarts from the top.
        if self.sink.is_none() {
            let path = self.current.clone().ok_or(PlayerError::NoTrackLoaded)?;
            self.replace_sink(&path, Duration::ZERO)?;
        }
        if let Some(sink) = &self.sink {
            sink.play();
        }
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn resume(&mut self) {
        if let Some(sink) = &self.sink {
            sink.play();
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.offset = Duration::ZERO;
    }

    fn is_playing(&self) -> bool {
        self.sink
            .as_ref()
            .map(|s| !s.is_paused() && !s.empty())
            .unwrap_or(false)
    }

    fn position(&self) -> Option<Duration> {
        self.sink.as_ref().map(|s| self.offset + s.get_pos())
    }

    fn seek(&mut self, to: Duration) -> Result<()> {
        let path = self.current.clone().ok_or(PlayerError::NoTrackLoaded)?;
        let resume = self.sink.as_ref().map(|s| !s.is_paused()).unwrap_or(false);

        // Scrubbing: rebuild the sink and skip into the file.
        self.replace_sink(&path, to)?;
        if resume {
            self.resume();
        }
        Ok(())
    }
}

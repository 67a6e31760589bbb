use std::path::Path;
use std::time::Duration;

use crate::error::Result;

/// Transport operations of an audio output.
///
/// One file is loaded at a time. Loading leaves it paused at the start;
/// `play` starts it (from the top after a `stop`), `pause`/`resume` hold and
/// continue it.
pub trait AudioEngine {
    /// Open `path` for playback, replacing whatever was loaded.
    fn load(&mut self, path: &Path) -> Result<()>;
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self);
    fn resume(&mut self);
    fn stop(&mut self);
    /// True while audio is actually being produced.
    fn is_playing(&self) -> bool;
    /// Playback position of the loaded file, or `None` when nothing is queued.
    fn position(&self) -> Option<Duration>;
    /// Jump to `to` within the loaded file, keeping the paused/playing state.
    fn seek(&mut self, to: Duration) -> Result<()>;
}

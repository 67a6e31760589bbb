use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/rola/config.toml` or `~/.config/rola/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ROLA__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub playback: PlaybackSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Folder scanned for `.mp3` files when no directory is given on the command line.
    pub dir: PathBuf,
    /// Whether to include hidden files (dotfiles).
    pub include_hidden: bool,
    /// Whether symlinked files are followed.
    pub follow_links: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("Playlist#1"),
            include_hidden: true,
            follow_links: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Whether shuffle starts enabled.
    pub shuffle: bool,
    /// Start playing the first track right away instead of waiting for play.
    pub autoplay: bool,
    /// Interval between progress ticks (milliseconds).
    pub tick_ms: u64,
    /// How close to the end a track counts as finished (milliseconds).
    pub guard_window_ms: u64,
}

impl PlaybackSettings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn guard_window(&self) -> Duration {
        Duration::from_millis(self.guard_window_ms)
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            shuffle: false,
            autoplay: false,
            tick_ms: 1000,
            guard_window_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { scrub_seconds: 5 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Whether the cursor starts in "follow playback" mode.
    pub follow_playback: bool,
    /// The text rendered inside the top header box.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            follow_playback: true,
            header_text: "WELCOME BACK".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Log file; defaults to `$XDG_STATE_HOME/rola/rola.log`.
    pub file: Option<PathBuf>,
    /// Filter directive used when `ROLA_LOG` is unset, e.g. `info` or `rola=debug`.
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}

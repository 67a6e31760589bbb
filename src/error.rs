//! Error types shared by the playlist, session and scanner.
//!
//! The runtime edge wraps these in `anyhow`; everything below it returns
//! [`PlayerError`] so callers can react to the specific kind.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayerError {
    /// No playable tracks were found (or none remain).
    #[error("no songs in the playlist")]
    EmptyPlaylist,

    /// A selection outside the playlist bounds. Only reachable through a caller bug.
    #[error("index {index} out of range for playlist of {len} tracks")]
    IndexOutOfRange { index: usize, len: usize },

    /// Reading metadata or opening/decoding one file failed.
    #[error("failed to load {}: {reason}", path.display())]
    TrackLoad { path: PathBuf, reason: String },

    /// A transport call arrived before any track was loaded.
    #[error("no track loaded")]
    NoTrackLoaded,

    /// The audio output device could not be opened.
    #[error("audio output unavailable: {0}")]
    AudioOutput(String),
}

impl PlayerError {
    pub fn track_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::TrackLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlayerError>;

use std::path::Path;
use std::time::Duration;

use lofty::file::AudioFile;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::error::PlayerError;

use super::model::Track;

/// Only plain `.mp3` files are playlist entries; `.MP3` is not.
const PLAYLIST_EXTENSION: &str = "mp3";

fn is_playlist_file(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(PLAYLIST_EXTENSION)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Read the playing time of `path` from its audio properties.
pub fn read_duration(path: &Path) -> crate::error::Result<Duration> {
    let tagged = lofty::read_from_path(path).map_err(|e| PlayerError::track_load(path, e))?;
    let duration = tagged.properties().duration();
    if duration.is_zero() {
        return Err(PlayerError::track_load(path, "duration is zero or unknown"));
    }
    Ok(duration)
}

/// Scan `dir` for playlist files, reading durations with lofty.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    scan_with(dir, settings, read_duration)
}

/// Scan `dir` using `probe` to obtain each file's duration.
///
/// Files whose probe fails are skipped with a warning. The result is ordered
/// by file name.
pub fn scan_with<F>(dir: &Path, settings: &LibrarySettings, mut probe: F) -> Vec<Track>
where
    F: FnMut(&Path) -> crate::error::Result<Duration>,
{
    let mut tracks: Vec<Track> = Vec::new();

    // Depth 0 is `dir` itself, depth 1 its direct children.
    let walker = WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "failed to read playlist entry");
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() || !is_playlist_file(path) {
            continue;
        }
        if !settings.include_hidden && is_hidden(path) {
            debug!(path = %path.display(), "skipping hidden file");
            continue;
        }

        match probe(path) {
            Ok(duration) => tracks.push(Track::new(path, duration)),
            Err(e) => warn!(error = %e, "skipping unreadable track"),
        }
    }

    info!(dir = %dir.display(), count = tracks.len(), "playlist scanned");
    tracks
}

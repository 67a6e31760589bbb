use std::path::{Path, PathBuf};
use std::time::Duration;

/// One playable file. `path` is the identity; two tracks may share a title.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub path: PathBuf,
    pub title: String,
    pub duration: Duration,
}

impl Track {
    /// Build a track titled after the file name without its extension.
    pub fn new(path: impl AsRef<Path>, duration: Duration) -> Self {
        let path = path.as_ref();
        Self {
            path: path.to_path_buf(),
            title: title_from_path(path),
            duration,
        }
    }
}

fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "UNKNOWN".to_string())
}

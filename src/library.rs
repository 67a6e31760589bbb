//! Playlist folder scanning.
//!
//! `scan` lists one directory (no recursion) and turns every `.mp3` file
//! whose duration can be read into a [`Track`].

mod model;
mod scan;

pub use model::Track;
pub use scan::scan;

//! The ordered playlist, its shuffle toggle and the active track.

mod store;

pub use store::PlaylistStore;

//! Application module: the state object the runtime and UI work on.
//!
//! `App` lives in `app::model` and ties the playlist store, the playback
//! session and the list cursor together.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;

//! Audio engine seam.
//!
//! [`AudioEngine`] is the transport the playback session drives; the rodio
//! implementation lives in `player`.

mod engine;
mod player;
mod sink;

#[cfg(test)]
pub mod fake;

pub use engine::AudioEngine;
pub use player::RodioPlayer;

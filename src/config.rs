//! Settings: library folder, playback timing, key and UI options, logging.
//!
//! Read once at startup from `config.toml` and `ROLA__*` environment variables.

mod load;
mod schema;

pub use load::default_log_path;
pub use schema::*;

//! Transport state for the loaded track and the completion tick.

mod model;

pub use model::*;

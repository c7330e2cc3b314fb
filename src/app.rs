//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the loaded journal
//! collections, the track list, selection and playback state, plus the
//! compose-popup draft.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;

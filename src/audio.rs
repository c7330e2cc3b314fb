//! Audio subsystem: a dedicated playback thread driven by commands, with a
//! shared snapshot handle the UI and MPRIS read.

mod player;
mod sink;
mod thread;
mod types;

pub use player::AudioPlayer;
pub use types::{AudioCmd, PlaybackHandle, PlaybackInfo};

#[cfg(test)]
mod tests;

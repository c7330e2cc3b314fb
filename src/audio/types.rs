//! Audio-related small types and handles.
//!
//! This module defines the command enum delivered to the audio thread and
//! the shared playback snapshot the UI reads.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::session::clamp_seek;

#[derive(Debug)]
pub enum AudioCmd {
    /// Bind and play the track at the given index.
    Play(usize),
    /// Stop playback and release the sink.
    Stop,
    /// Toggle pause/resume.
    TogglePause,
    /// Skip to the next track (wraps).
    Next,
    /// Previous track, or restart the current one past the threshold.
    Prev,
    /// Scrub by the specified number of seconds (positive or negative).
    SeekBy(i32),
    /// Set the playback volume in `[0, 1]` (clamped).
    SetVolume(f32),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Runtime playback information shared with the UI.
#[derive(Debug, Clone)]
pub struct PlaybackInfo {
    /// Currently bound track index (if any).
    pub index: Option<usize>,
    /// Elapsed playback time for the current track.
    pub elapsed: Duration,
    /// Total duration of the current track, when known.
    pub duration: Option<Duration>,
    /// Whether playback is currently intended to be active. This mirrors
    /// intent; after a failed play attempt it can disagree with the device.
    pub playing: bool,
    /// Current volume in `[0, 1]`.
    pub volume: f32,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            index: None,
            elapsed: Duration::ZERO,
            duration: None,
            playing: false,
            volume: 0.5,
        }
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;

/// Absolute seek target for a relative scrub from `current`, clamped into
/// `[0, duration]`.
pub(super) fn seek_target(
    current: Duration,
    delta_secs: i32,
    duration: Option<Duration>,
) -> Duration {
    clamp_seek(current.as_secs() as i64 + delta_secs as i64, duration)
}

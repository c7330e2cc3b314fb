//! Playback session state for the inline audio player.
//!
//! A `PlaybackSession` exists only while the track list is non-empty and
//! holds the transport state the audio thread mutates: current index,
//! play/pause intent and volume. Track identity is positional; next and
//! previous wrap modulo the list length. The session never touches the
//! audio resource itself, which keeps the transport rules testable without
//! an output device.

use std::time::Duration;

/// `previous()` restarts the current track instead of skipping back once
/// playback has passed this position.
pub const PREV_RESTART_THRESHOLD: Duration = Duration::from_secs(4);

/// Outcome of a `previous()` request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PrevAction {
    /// Rebind the current track from position zero.
    Restart,
    /// Move to the given (already wrapped) index.
    SkipBack(usize),
}

#[derive(Debug, Clone)]
pub struct PlaybackSession {
    len: usize,
    current: usize,
    playing: bool,
    volume: f32,
}

impl PlaybackSession {
    /// Create a session over `len` tracks. An empty track list has no
    /// session at all; the caller renders the empty-state instead.
    pub fn new(len: usize, initial_volume: f32) -> Option<Self> {
        if len == 0 {
            return None;
        }
        Some(Self {
            len,
            current: 0,
            playing: false,
            volume: clamp_volume(initial_volume),
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Jump directly to a track (UI selection). Out-of-range indices wrap,
    /// keeping the index-valid invariant.
    pub fn select(&mut self, index: usize) -> usize {
        self.current = index % self.len;
        self.playing = true;
        self.current
    }

    /// Flip play/pause intent, returning the new intent.
    pub fn toggle(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// Advance to the next track. With a single track there is nothing to
    /// advance to and the control is a no-op.
    pub fn next(&mut self) -> Option<usize> {
        if self.len <= 1 {
            return None;
        }
        Some(self.advance())
    }

    /// Previous-track control. Below the restart threshold this skips back
    /// one track (wrapping); at or past it the current track restarts, which
    /// avoids an accidental skip when the listener meant to replay.
    pub fn previous(&mut self, position: Duration) -> Option<PrevAction> {
        if self.len <= 1 {
            return None;
        }
        self.playing = true;
        if position < PREV_RESTART_THRESHOLD {
            self.current = (self.current + self.len - 1) % self.len;
            Some(PrevAction::SkipBack(self.current))
        } else {
            Some(PrevAction::Restart)
        }
    }

    /// Natural end-of-track: behaves as `next()` without the single-track
    /// gate, so a lone track replays.
    pub fn track_ended(&mut self) -> usize {
        self.advance()
    }

    /// Clamp a new volume into `[0, 1]` and store it.
    pub fn set_volume(&mut self, volume: f32) -> f32 {
        self.volume = clamp_volume(volume);
        self.volume
    }

    fn advance(&mut self) -> usize {
        self.current = (self.current + 1) % self.len;
        self.playing = true;
        self.current
    }
}

fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        return 0.0;
    }
    volume.clamp(0.0, 1.0)
}

/// Clamp an absolute seek target into `[0, duration]`. The upper bound only
/// applies when the track duration is known.
pub fn clamp_seek(target_secs: i64, duration: Option<Duration>) -> Duration {
    let target = Duration::from_secs(target_secs.max(0) as u64);
    match duration {
        Some(d) => target.min(d),
        None => target,
    }
}

#[cfg(test)]
mod tests;

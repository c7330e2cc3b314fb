//! Utilities for creating `rodio` sinks from `Track` values.
//!
//! Opening or decoding a track can fail (missing file, unsupported codec);
//! the caller logs the error and carries on, leaving transport intent as it
//! was. The returned `Sink` is paused and positioned at `start_at`.

use std::fs::File;
use std::io::BufReader;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::library::Track;

/// Create a paused `Sink` for `track` that starts playback at `start_at`
/// with the given volume.
pub(super) fn create_sink_at(
    handle: &OutputStream,
    track: &Track,
    start_at: Duration,
    volume: f32,
) -> Result<Sink, String> {
    let file = File::open(&track.path)
        .map_err(|e| format!("failed to open {}: {e}", track.path.display()))?;

    let source = Decoder::new(BufReader::new(file))
        .map_err(|e| format!("failed to decode {}: {e}", track.path.display()))?
        // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
        .skip_duration(start_at);

    let sink = Sink::connect_new(handle.mixer());
    sink.set_volume(volume);
    sink.append(source);
    sink.pause();
    Ok(sink)
}

use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::config::AudioSettings;
use crate::library::Track;
use crate::session::{PlaybackSession, PrevAction};

use super::sink::create_sink_at;
use super::types::{AudioCmd, PlaybackHandle, seek_target};

pub(super) fn spawn_audio_thread(
    tracks: Vec<Track>,
    rx: Receiver<AudioCmd>,
    playback_info: PlaybackHandle,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        // Empty track list: there is no playback session at all. Keep the
        // channel alive so senders never error, but every transport command
        // is a no-op.
        let Some(session) = PlaybackSession::new(tracks.len(), audio_settings.initial_volume)
        else {
            while let Ok(cmd) = rx.recv() {
                if matches!(cmd, AudioCmd::Quit { .. }) {
                    break;
                }
            }
            return;
        };

        let stream =
            OutputStreamBuilder::open_default_stream().expect("ERR: No audio output device");
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        let mut stream = stream;
        stream.log_on_drop(false);

        // Ticker thread advancing the shared elapsed clock while playing.
        let info_for_ticker = playback_info.clone();
        thread::spawn(move || {
            loop {
                thread::sleep(Duration::from_millis(500));
                let Ok(mut info) = info_for_ticker.lock() else {
                    break;
                };
                if info.playing {
                    info.elapsed += Duration::from_millis(500);
                }
            }
        });

        let mut engine = Engine {
            stream,
            tracks,
            settings: audio_settings,
            session,
            sink: None,
            started_at: None,
            accumulated: Duration::ZERO,
            info: playback_info,
        };

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(cmd) => match cmd {
                    AudioCmd::Play(i) => {
                        let i = engine.session.select(i);
                        engine.bind(i);
                    }
                    AudioCmd::Stop => engine.stop(),
                    AudioCmd::TogglePause => engine.toggle_pause(),
                    AudioCmd::Next => {
                        if let Some(i) = engine.session.next() {
                            engine.bind(i);
                        }
                    }
                    AudioCmd::Prev => {
                        let position = engine.elapsed();
                        match engine.session.previous(position) {
                            Some(PrevAction::Restart) => {
                                let i = engine.session.current_index();
                                engine.bind(i);
                            }
                            Some(PrevAction::SkipBack(i)) => engine.bind(i),
                            None => {}
                        }
                    }
                    AudioCmd::SeekBy(secs) => engine.seek_by(secs),
                    AudioCmd::SetVolume(v) => engine.set_volume(v),
                    AudioCmd::Quit { fade_out_ms } => {
                        engine.fade_out(fade_out_ms);
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // Natural end-of-track behaves as next(), without the
                    // single-track gate, so a lone track replays.
                    if engine.track_finished() {
                        let i = engine.session.track_ended();
                        engine.bind(i);
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

/// Owns the single audio resource plus the session state the commands
/// mutate. Every method runs to completion on the audio thread before the
/// next command is taken, so a bind always fully replaces the sink before a
/// later seek or volume change applies.
struct Engine {
    stream: OutputStream,
    tracks: Vec<Track>,
    settings: AudioSettings,
    session: PlaybackSession,
    sink: Option<Sink>,
    // Wall-clock position bookkeeping: accumulated elapsed while paused plus
    // the running stretch since the last resume.
    started_at: Option<Instant>,
    accumulated: Duration,
    info: PlaybackHandle,
}

impl Engine {
    fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }

    fn track_finished(&self) -> bool {
        match &self.sink {
            Some(s) => self.session.is_playing() && s.empty(),
            None => false,
        }
    }

    /// Bind the sink to `tracks[i]` from position zero and start it if the
    /// session intends to play. A failed open/decode is logged and leaves
    /// the play intent as-is; there is no bound resource afterwards.
    fn bind(&mut self, i: usize) {
        let track = &self.tracks[i];

        let new_sink = match create_sink_at(&self.stream, track, Duration::ZERO, self.session.volume())
        {
            Ok(s) => Some(s),
            Err(e) => {
                eprintln!("keepsake: {e}");
                None
            }
        };

        match (self.sink.take(), new_sink) {
            (Some(old), Some(new)) => {
                if self.session.is_playing() {
                    self.crossfade(&old, &new);
                } else {
                    old.stop();
                }
                if self.session.is_playing() {
                    new.play();
                }
                self.sink = Some(new);
            }
            (old, new) => {
                if let Some(old) = old {
                    old.stop();
                }
                if let Some(new) = &new {
                    if self.session.is_playing() {
                        new.play();
                    }
                }
                self.sink = new;
            }
        }

        // Position resets on every bind, bound resource or not.
        self.accumulated = Duration::ZERO;
        self.started_at = if self.session.is_playing() && self.sink.is_some() {
            Some(Instant::now())
        } else {
            None
        };

        if let Ok(mut info) = self.info.lock() {
            info.index = Some(i);
            info.elapsed = Duration::ZERO;
            info.duration = track.duration;
            info.playing = self.session.is_playing();
            info.volume = self.session.volume();
        }
    }

    /// Short blocking volume ramp between the outgoing and incoming sinks.
    /// Audio keeps flowing in rodio's mixer thread while we sleep.
    fn crossfade(&self, old: &Sink, new: &Sink) {
        let crossfade_ms = self.settings.crossfade_ms;
        if crossfade_ms == 0 {
            old.stop();
            return;
        }
        let steps = self.settings.crossfade_steps.max(1);
        let target = self.session.volume();

        new.set_volume(0.0);
        new.play();
        for step in 1..=steps {
            let t = (step as f32) / (steps as f32);
            old.set_volume(target * (1.0 - t));
            new.set_volume(target * t);
            thread::sleep(Duration::from_millis((crossfade_ms / steps).max(1)));
        }
        old.stop();
    }

    fn toggle_pause(&mut self) {
        let now_playing = self.session.toggle();

        let Some(sink) = &self.sink else {
            // Nothing bound yet: a fresh toggle binds the current track.
            if now_playing {
                let i = self.session.current_index();
                self.bind(i);
            } else if let Ok(mut info) = self.info.lock() {
                info.playing = false;
            }
            return;
        };

        if now_playing {
            sink.play();
            self.started_at = Some(Instant::now());
        } else {
            sink.pause();
            if let Some(st) = self.started_at.take() {
                self.accumulated += st.elapsed();
            }
        }

        if let Ok(mut info) = self.info.lock() {
            info.playing = now_playing;
        }
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.session.set_playing(false);
        self.started_at = None;
        self.accumulated = Duration::ZERO;
        if let Ok(mut info) = self.info.lock() {
            info.index = None;
            info.elapsed = Duration::ZERO;
            info.duration = None;
            info.playing = false;
        }
    }

    /// Scrubbing: rebuild the sink and skip into the file. The target is
    /// clamped into `[0, duration]` before anything is touched.
    fn seek_by(&mut self, delta_secs: i32) {
        if self.sink.is_none() {
            return;
        }
        let i = self.session.current_index();
        let track = &self.tracks[i];
        let target = seek_target(self.elapsed(), delta_secs, track.duration);

        // Build the replacement first so a failed decode keeps the old sink.
        let new_sink = match create_sink_at(&self.stream, track, target, self.session.volume()) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("keepsake: seek failed: {e}");
                return;
            }
        };

        if let Some(old) = self.sink.take() {
            old.stop();
        }
        if self.session.is_playing() {
            new_sink.play();
            self.started_at = Some(Instant::now());
        } else {
            self.started_at = None;
        }
        self.sink = Some(new_sink);
        self.accumulated = target;

        if let Ok(mut info) = self.info.lock() {
            info.elapsed = target;
        }
    }

    fn set_volume(&mut self, volume: f32) {
        let v = self.session.set_volume(volume);
        if let Some(sink) = &self.sink {
            sink.set_volume(v);
        }
        if let Ok(mut info) = self.info.lock() {
            info.volume = v;
        }
    }

    fn fade_out(&mut self, fade_out_ms: u64) {
        if let Some(sink) = &self.sink {
            if fade_out_ms == 0 {
                sink.set_volume(0.0);
            } else {
                let steps: u64 = 20;
                let step_ms = (fade_out_ms / steps).max(1);
                let from = self.session.volume();
                for step in 1..=steps {
                    let t = step as f32 / steps as f32;
                    sink.set_volume(from * (1.0 - t));
                    thread::sleep(Duration::from_millis(step_ms));
                }
                sink.set_volume(0.0);
            }
            sink.stop();
        }
        if let Ok(mut info) = self.info.lock() {
            info.playing = false;
        }
    }
}

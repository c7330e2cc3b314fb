use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, PlaybackState};
use crate::audio::{AudioCmd, AudioPlayer};
use crate::config;
use crate::counter::Anchor;
use crate::journal::{JournalStore, Photo};
use crate::mpris::ControlCmd;
use crate::mpris::MprisHandle;
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Last-known playing index as emitted to MPRIS.
    pub last_mpris_index: Option<usize>,
    /// Last-known playback state as emitted to MPRIS.
    pub last_mpris_playback: PlaybackState,
    /// When the photo carousel last advanced on its own.
    pub last_photo_advance: Instant,
}

impl EventLoopState {
    /// Construct a new `EventLoopState` seeded from `app`.
    pub fn new(app: &App) -> Self {
        Self {
            pending_gg: false,
            last_mpris_index: None,
            last_mpris_playback: app.playback,
            last_photo_advance: Instant::now(),
        }
    }
}

/// Main terminal event loop: handles input, UI drawing, sync with the audio
/// thread and MPRIS. Returns `Ok(())` when shutdown is requested.
#[allow(clippy::too_many_arguments)]
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    anchor: &Anchor,
    app: &mut App,
    audio_player: &AudioPlayer,
    journal: &JournalStore,
    mpris: &MprisHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Sync playback state from the audio thread. Clone the Arc handle to
        // avoid borrowing `app` immutably across mutations.
        let mut playback_index_snapshot: Option<usize> = None;
        if let Some(handle) = app.playback_handle.as_ref().cloned() {
            if let Ok(info) = handle.lock() {
                playback_index_snapshot = info.index;
                app.playback = match (info.index, info.playing) {
                    (None, _) => PlaybackState::Stopped,
                    (Some(_), true) => PlaybackState::Playing,
                    (Some(_), false) => PlaybackState::Paused,
                };
            }
        }

        // Keep MPRIS in sync even when playback changes come from media keys
        // or auto-advance.
        if playback_index_snapshot != state.last_mpris_index
            || app.playback != state.last_mpris_playback
        {
            update_mpris(mpris, app);
            state.last_mpris_index = playback_index_snapshot;
            state.last_mpris_playback = app.playback;
        }

        // Auto-advance the photo carousel. An interval of zero disables it.
        let interval = settings.ui.carousel_interval_secs;
        if interval > 0
            && !app.photos.is_empty()
            && state.last_photo_advance.elapsed() >= Duration::from_secs(interval)
        {
            app.advance_photo();
            state.last_photo_advance = Instant::now();
        }

        let elapsed = anchor.elapsed_now();
        terminal.draw(|f| ui::draw(f, app, &elapsed, &settings.ui, &settings.controls))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, settings, app, audio_player, mpris)? {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, audio_player, journal, control_tx, state)? {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn handle_control_cmd(
    cmd: ControlCmd,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
    mpris: &MprisHandle,
) -> Result<bool, Box<dyn std::error::Error>> {
    match cmd {
        ControlCmd::Quit => {
            audio_player.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
            return Ok(true);
        }
        ControlCmd::Play => match app.playback {
            PlaybackState::Paused => {
                let _ = audio_player.send(AudioCmd::TogglePause);
                app.playback = PlaybackState::Playing;
                update_mpris(mpris, app);
            }
            PlaybackState::Stopped | PlaybackState::Playing => {
                if app.has_tracks() {
                    let _ = audio_player.send(AudioCmd::Play(0));
                    app.playback = PlaybackState::Playing;
                    update_mpris(mpris, app);
                }
            }
        },
        ControlCmd::Pause => {
            if app.playback == PlaybackState::Playing {
                let _ = audio_player.send(AudioCmd::TogglePause);
                app.playback = PlaybackState::Paused;
                update_mpris(mpris, app);
            }
        }
        ControlCmd::PlayPause => {
            match app.playback {
                PlaybackState::Stopped => {
                    if app.has_tracks() {
                        let _ = audio_player.send(AudioCmd::Play(0));
                        app.playback = PlaybackState::Playing;
                    }
                }
                PlaybackState::Playing => {
                    let _ = audio_player.send(AudioCmd::TogglePause);
                    app.playback = PlaybackState::Paused;
                }
                PlaybackState::Paused => {
                    let _ = audio_player.send(AudioCmd::TogglePause);
                    app.playback = PlaybackState::Playing;
                }
            }
            update_mpris(mpris, app);
        }
        ControlCmd::Stop => {
            let _ = audio_player.send(AudioCmd::Stop);
            app.playback = PlaybackState::Stopped;
            update_mpris(mpris, app);
        }
        ControlCmd::Next => {
            if app.has_tracks() {
                let _ = audio_player.send(AudioCmd::Next);
                app.playback = PlaybackState::Playing;
                update_mpris(mpris, app);
            }
        }
        ControlCmd::Prev => {
            if app.has_tracks() {
                let _ = audio_player.send(AudioCmd::Prev);
                app.playback = PlaybackState::Playing;
                update_mpris(mpris, app);
            }
        }
    }

    Ok(false)
}

/// Handle one key press while the compose popup is open.
fn handle_compose_key(
    key: KeyEvent,
    app: &mut App,
    journal: &JournalStore,
) -> Result<(), Box<dyn std::error::Error>> {
    match key.code {
        KeyCode::Esc => {
            app.cancel_compose();
        }
        KeyCode::Tab | KeyCode::Down => {
            if let Some(draft) = app.compose.as_mut() {
                draft.next_field();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(draft) = app.compose.as_mut() {
                draft.prev_field();
            }
        }
        KeyCode::Backspace => {
            if let Some(draft) = app.compose.as_mut() {
                draft.backspace();
            }
        }
        KeyCode::Enter => {
            let Some(draft) = app.compose.clone() else {
                return Ok(());
            };
            if let Err(msg) = draft.validate() {
                app.set_notice(msg);
                return Ok(());
            }

            let post = draft.to_post(JournalStore::now_ms());
            match journal.append_post(&post) {
                Ok(()) => {
                    app.compose = None;
                    app.set_posts(journal.load_posts_or_empty());
                    app.last_post();
                    app.set_notice("Story saved.");
                }
                Err(e) => {
                    app.set_notice(format!("Could not save story: {e}"));
                }
            }
        }
        KeyCode::Char(c) => {
            if !c.is_control() {
                if let Some(draft) = app.compose.as_mut() {
                    draft.push_char(c);
                }
            }
        }
        _ => {}
    }

    Ok(())
}

/// Handle one key press while the add-photo popup is open.
fn handle_photo_key(
    key: KeyEvent,
    app: &mut App,
    journal: &JournalStore,
) -> Result<(), Box<dyn std::error::Error>> {
    match key.code {
        KeyCode::Esc => {
            app.cancel_photo_compose();
        }
        KeyCode::Backspace => {
            if let Some(draft) = app.photo_draft.as_mut() {
                draft.pop();
            }
        }
        KeyCode::Enter => {
            let Some(draft) = app.photo_draft.clone() else {
                return Ok(());
            };
            let path = draft.trim();
            if path.is_empty() {
                app.set_notice("a photo path is required");
                return Ok(());
            }

            let photo = Photo {
                image: PathBuf::from(path),
                created_at: JournalStore::now_ms(),
            };
            match journal.append_photo(&photo) {
                Ok(()) => {
                    app.photo_draft = None;
                    app.set_photos(journal.load_photos_or_empty());
                    app.show_last_photo();
                    app.set_notice("Photo added.");
                }
                Err(e) => {
                    app.set_notice(format!("Could not save photo: {e}"));
                }
            }
        }
        KeyCode::Char(c) => {
            if !c.is_control() {
                if let Some(draft) = app.photo_draft.as_mut() {
                    draft.push(c);
                }
            }
        }
        _ => {}
    }

    Ok(())
}

fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
    journal: &JournalStore,
    control_tx: &mpsc::Sender<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<bool, Box<dyn std::error::Error>> {
    if app.is_composing() {
        state.pending_gg = false;
        handle_compose_key(key, app, journal)?;
        return Ok(false);
    }
    if app.is_adding_photo() {
        state.pending_gg = false;
        handle_photo_key(key, app, journal)?;
        return Ok(false);
    }

    match key.code {
        KeyCode::Char('q') => {
            state.pending_gg = false;
            audio_player.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
            return Ok(true);
        }
        KeyCode::Char('n') => {
            state.pending_gg = false;
            app.enter_compose();
        }
        KeyCode::Char('N') => {
            state.pending_gg = false;
            app.enter_photo_compose();
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.first_post();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            app.last_post();
        }
        KeyCode::Char('j') => {
            state.pending_gg = false;
            app.next_post();
        }
        KeyCode::Char('k') => {
            state.pending_gg = false;
            app.prev_post();
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::PlayPause);
        }
        KeyCode::Char('l') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::Next);
        }
        KeyCode::Char('h') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::Prev);
        }
        KeyCode::Char('L') => {
            state.pending_gg = false;
            let secs = settings.controls.scrub_seconds.min(i32::MAX as u64) as i32;
            let _ = audio_player.send(AudioCmd::SeekBy(secs));
        }
        KeyCode::Char('H') => {
            state.pending_gg = false;
            let secs = settings.controls.scrub_seconds.min(i32::MAX as u64) as i32;
            let _ = audio_player.send(AudioCmd::SeekBy(-secs));
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            state.pending_gg = false;
            if let Some(v) = current_volume(app) {
                let step = settings.controls.volume_step_percent as f32 / 100.0;
                let _ = audio_player.send(AudioCmd::SetVolume(v + step));
            }
        }
        KeyCode::Char('-') => {
            state.pending_gg = false;
            if let Some(v) = current_volume(app) {
                let step = settings.controls.volume_step_percent as f32 / 100.0;
                let _ = audio_player.send(AudioCmd::SetVolume(v - step));
            }
        }
        KeyCode::Char('.') => {
            state.pending_gg = false;
            app.advance_photo();
            state.last_photo_advance = Instant::now();
        }
        KeyCode::Char(',') => {
            state.pending_gg = false;
            app.rewind_photo();
            state.last_photo_advance = Instant::now();
        }
        KeyCode::Char(_) => {
            // g pending should clear on any other printable char
            state.pending_gg = false;
        }
        _ => {}
    }

    Ok(false)
}

fn current_volume(app: &App) -> Option<f32> {
    app.playback_handle
        .as_ref()
        .and_then(|h| h.lock().ok().map(|info| info.volume))
}

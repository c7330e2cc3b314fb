use crate::app::App;
use crate::mpris::MprisHandle;

/// Push the current now-playing index, track metadata and playback state to
/// the MPRIS surface.
pub fn update_mpris(mpris: &MprisHandle, app: &App) {
    let index = app
        .playback_handle
        .as_ref()
        .and_then(|h| h.lock().ok())
        .and_then(|info| info.index);

    mpris.set_track_metadata(index, index.and_then(|i| app.tracks.get(i)));
    mpris.set_playback(app.playback);
}

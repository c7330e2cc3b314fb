use std::path::Path;
use std::time::Duration;

use lofty::prelude::*;
use lofty::read_from_path;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::display::display_from_fields;
use super::model::Track;

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

struct FileMeta {
    title: Option<String>,
    artist: Option<String>,
    album: Option<String>,
    duration: Option<Duration>,
    has_artwork: bool,
}

/// Pull tags out of an audio file. Unreadable or untagged files are fine;
/// every field simply stays empty.
fn read_meta(path: &Path) -> FileMeta {
    let mut meta = FileMeta {
        title: None,
        artist: None,
        album: None,
        duration: None,
        has_artwork: false,
    };

    let Ok(tagged) = read_from_path(path) else {
        return meta;
    };
    meta.duration = Some(tagged.properties().duration());

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        let get = |key: &ItemKey| {
            tag.get_string(key)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        meta.title = get(&ItemKey::TrackTitle);
        meta.artist = get(&ItemKey::TrackArtist);
        meta.album = get(&ItemKey::AlbumTitle);
        meta.has_artwork = !tag.pictures().is_empty();
    }

    meta
}

/// Scan `dir` into the ordered track list, sorted by display string. This is
/// the only place tracks come from; the player treats the result as
/// immutable for its whole session.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let mut tracks: Vec<Track> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file()
            || (!settings.include_hidden && is_hidden(path))
            || !is_audio_file(path, settings)
        {
            continue;
        }

        let meta = read_meta(path);
        let title = meta.title.unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("UNKNOWN")
                .to_string()
        });

        let display = display_from_fields(
            path,
            &title,
            meta.artist.as_deref(),
            meta.album.as_deref(),
            &settings.display_fields,
            &settings.display_separator,
        );

        tracks.push(Track {
            path: path.to_path_buf(),
            title,
            artist: meta.artist,
            album: meta.album,
            duration: meta.duration,
            has_artwork: meta.has_artwork,
            display,
        });
    }

    tracks.sort_by(|a, b| a.display.to_lowercase().cmp(&b.display.to_lowercase()));
    tracks
}

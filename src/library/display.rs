use std::path::Path;

use crate::config::TrackDisplayField;

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// Compose a track's display string from the configured `fields`, joined by
/// `sep`. Empty parts are dropped; when nothing survives, the title wins.
pub fn display_from_fields(
    path: &Path,
    title: &str,
    artist: Option<&str>,
    album: Option<&str>,
    fields: &[TrackDisplayField],
    sep: &str,
) -> String {
    let mut parts: Vec<String> = Vec::new();

    for field in fields {
        match field {
            TrackDisplayField::Display => {
                // "display" inside the field list means "artist - title".
                if let Some(a) = non_empty(artist) {
                    parts.push(a.to_string());
                }
                if let Some(t) = non_empty(Some(title)) {
                    parts.push(t.to_string());
                }
            }
            TrackDisplayField::Title => {
                if let Some(t) = non_empty(Some(title)) {
                    parts.push(t.to_string());
                }
            }
            TrackDisplayField::Artist => {
                if let Some(a) = non_empty(artist) {
                    parts.push(a.to_string());
                }
            }
            TrackDisplayField::Album => {
                if let Some(a) = non_empty(album) {
                    parts.push(a.to_string());
                }
            }
            TrackDisplayField::Filename => {
                if let Some(stem) = non_empty(path.file_stem().and_then(|s| s.to_str())) {
                    parts.push(stem.to_string());
                }
            }
            TrackDisplayField::Path => parts.push(path.display().to_string()),
        }
    }

    if parts.is_empty() {
        title.to_string()
    } else {
        parts.join(sep)
    }
}

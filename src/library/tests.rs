use super::display::display_from_fields;
use crate::config::TrackDisplayField;
use std::path::Path;

#[test]
fn display_from_fields_formats_artist_title() {
    let p = Path::new("/tmp/Song.mp3");
    let fields = [TrackDisplayField::Artist, TrackDisplayField::Title];

    assert_eq!(
        display_from_fields(p, "Song", Some("Artist"), None, &fields, " - "),
        "Artist - Song"
    );
    assert_eq!(
        display_from_fields(p, "Song", Some("  Artist  "), None, &fields, " - "),
        "Artist - Song"
    );
    assert_eq!(
        display_from_fields(p, "Song", None, None, &fields, " - "),
        "Song"
    );
}

#[test]
fn display_from_fields_falls_back_to_title_when_all_parts_empty() {
    let p = Path::new("/tmp/Song.mp3");
    assert_eq!(
        display_from_fields(p, "Song", None, None, &[TrackDisplayField::Album], " - "),
        "Song"
    );
}

#[test]
fn display_field_uses_filename_stem_and_path() {
    let p = Path::new("/music/archive/Song.mp3");
    assert_eq!(
        display_from_fields(p, "t", None, None, &[TrackDisplayField::Filename], " / "),
        "Song"
    );
    assert_eq!(
        display_from_fields(p, "t", None, None, &[TrackDisplayField::Path], " / "),
        "/music/archive/Song.mp3"
    );
}

use std::path::PathBuf;
use std::time::Duration;

/// One playable audio item. Identity is positional within the scanned,
/// ordered track list; a `Track` never mutates after the scan.
#[derive(Clone)]
pub struct Track {
    pub path: PathBuf,
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub duration: Option<Duration>,
    /// Whether the file carries embedded cover art.
    pub has_artwork: bool,
    /// Precomposed display string per the library settings.
    pub display: String,
}

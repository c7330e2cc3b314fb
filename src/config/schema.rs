use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/keepsake/config.toml` or
/// `~/.config/keepsake/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `KEEPSAKE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub anchor: AnchorSettings,
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub controls: ControlsSettings,
    pub library: LibrarySettings,
    pub journal: JournalSettings,
}

/// The fixed instant the elapsed-time clock counts from: a civil date and
/// time observed at a fixed UTC offset.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnchorSettings {
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM:SS` (seconds optional).
    pub time: String,
    /// Minutes east of UTC the civil time is observed at (Brasília = -180).
    pub utc_offset_minutes: i32,
}

impl Default for AnchorSettings {
    fn default() -> Self {
        Self {
            date: "2024-05-06".to_string(),
            time: "20:30:00".to_string(),
            utc_offset_minutes: -180,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Crossfade duration when switching tracks (milliseconds).
    /// Set to 0 to disable crossfade.
    pub crossfade_ms: u64,
    /// Number of steps used to fade volumes (higher = smoother, more CPU).
    pub crossfade_steps: u64,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
    /// Starting volume, in `[0, 1]`.
    pub initial_volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            crossfade_ms: 250,
            crossfade_steps: 10,
            quit_fade_out_ms: 500,
            initial_volume: 0.5,
        }
    }
}

/// Labels under the four clock boxes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClockLabels {
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl Default for ClockLabels {
    fn default() -> Self {
        Self {
            days: "days".to_string(),
            hours: "hours".to_string(),
            minutes: "minutes".to_string(),
            seconds: "seconds".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,

    /// Page title (the line under the clock).
    pub title: String,

    /// Page subtitle (the dedication line).
    pub subtitle: String,

    /// Labels rendered under the clock digits.
    pub clock_labels: ClockLabels,

    /// Seconds between automatic photo-carousel advances. 0 disables the
    /// automatic advance; `,` and `.` still cycle manually.
    pub carousel_interval_secs: u64,

    /// Which track fields to show in the now-playing line, and in what order.
    ///
    /// Example: ["artist", "title", "album"]
    pub now_playing_track_fields: Vec<TrackDisplayField>,

    /// Separator used to join `now_playing_track_fields`.
    pub now_playing_track_separator: String,

    /// Which time fields to show for the now-playing line, and in what order.
    ///
    /// Example: ["elapsed", "total", "remaining"]
    pub now_playing_time_fields: Vec<TimeField>,

    /// Separator used to join `now_playing_time_fields`.
    pub now_playing_time_separator: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ every second counted ~ ".to_string(),
            title: "Our keepsake".to_string(),
            subtitle: "From the sixth of May, for ever and always.".to_string(),
            clock_labels: ClockLabels::default(),
            carousel_interval_secs: 8,
            now_playing_track_fields: vec![TrackDisplayField::Display],
            now_playing_track_separator: " - ".to_string(),
            now_playing_time_fields: vec![TimeField::Elapsed, TimeField::Total],
            now_playing_time_separator: " / ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
    /// Volume change applied by `+` / `-`, in percent.
    pub volume_step_percent: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            scrub_seconds: 5,
            volume_step_percent: 5,
        }
    }
}

#[derive(Debug, Copy, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TimeField {
    Elapsed,
    Total,
    Remaining,
}

#[derive(Debug, Copy, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TrackDisplayField {
    /// Use the composed display string (artist - title by default).
    Display,
    Title,
    Artist,
    Album,
    Filename,
    Path,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,

    /// Which fields to use to build `Track.display` and its ordering.
    ///
    /// Example: ["artist", "title"] -> "Artist - Title"
    pub display_fields: Vec<TrackDisplayField>,
    /// Separator used to join `display_fields`.
    pub display_separator: String,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
            display_fields: vec![TrackDisplayField::Artist, TrackDisplayField::Title],
            display_separator: " - ".to_string(),
        }
    }
}

/// Where the journal store keeps its `posts.toml` / `photos.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JournalSettings {
    /// Overrides the XDG data directory when set.
    pub data_dir: Option<PathBuf>,
}

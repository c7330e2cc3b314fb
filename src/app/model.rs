//! Application model types: `App`, `PlaybackState` and the compose draft.

use std::path::PathBuf;

use crate::audio::PlaybackHandle;
use crate::counter::parse_date;
use crate::journal::{Photo, Post};
use crate::library::Track;

/// The playback state of the application.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Which input line of the compose popup currently receives keystrokes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ComposeField {
    Title,
    Date,
    Description,
    Photo,
}

impl ComposeField {
    pub const ALL: [ComposeField; 4] = [
        ComposeField::Title,
        ComposeField::Date,
        ComposeField::Description,
        ComposeField::Photo,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ComposeField::Title => "Title",
            ComposeField::Date => "Date (YYYY-MM-DD)",
            ComposeField::Description => "Description",
            ComposeField::Photo => "Photo path (optional)",
        }
    }
}

/// In-progress "new story" entry. Title, date and description are required;
/// the photo path is optional.
#[derive(Debug, Clone, Default)]
pub struct ComposeDraft {
    pub title: String,
    pub date: String,
    pub description: String,
    pub photo: String,
    field: usize,
}

impl ComposeDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self) -> ComposeField {
        ComposeField::ALL[self.field]
    }

    pub fn next_field(&mut self) {
        self.field = (self.field + 1) % ComposeField::ALL.len();
    }

    pub fn prev_field(&mut self) {
        self.field = (self.field + ComposeField::ALL.len() - 1) % ComposeField::ALL.len();
    }

    fn active_mut(&mut self) -> &mut String {
        match self.field() {
            ComposeField::Title => &mut self.title,
            ComposeField::Date => &mut self.date,
            ComposeField::Description => &mut self.description,
            ComposeField::Photo => &mut self.photo,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.active_mut().push(c);
    }

    pub fn backspace(&mut self) {
        self.active_mut().pop();
    }

    /// Required-field and date-shape validation before saving.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty()
            || self.date.trim().is_empty()
            || self.description.trim().is_empty()
        {
            return Err("title, date and description are required".to_string());
        }
        if parse_date(self.date.trim()).is_none() {
            return Err(format!("{:?} is not a valid YYYY-MM-DD date", self.date));
        }
        Ok(())
    }

    /// Turn a validated draft into a post record.
    pub fn to_post(&self, created_at: i64) -> Post {
        let photo = self.photo.trim();
        Post {
            title: self.title.trim().to_string(),
            date: self.date.trim().to_string(),
            description: self.description.trim().to_string(),
            photo: if photo.is_empty() {
                None
            } else {
                Some(PathBuf::from(photo))
            },
            created_at,
        }
    }
}

/// The main application model.
pub struct App {
    pub tracks: Vec<Track>,
    pub posts: Vec<Post>,
    pub photos: Vec<Photo>,

    /// Cursor within the post list.
    pub selected_post: usize,
    /// Which carousel photo is currently shown.
    pub photo_index: usize,

    pub playback: PlaybackState,
    pub playback_handle: Option<PlaybackHandle>,

    /// Present while the compose popup is open.
    pub compose: Option<ComposeDraft>,
    /// Present while the add-photo popup is open; holds the path typed so far.
    pub photo_draft: Option<String>,

    pub music_dir: Option<String>,
    /// One-line status note (last save error, confirmation, ...).
    pub notice: Option<String>,
}

impl App {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            posts: Vec::new(),
            photos: Vec::new(),
            selected_post: 0,
            photo_index: 0,
            playback: PlaybackState::Stopped,
            playback_handle: None,
            compose: None,
            photo_draft: None,
            music_dir: None,
            notice: None,
        }
    }

    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    /// Attach a `PlaybackHandle` used to observe playback progress.
    pub fn set_playback_handle(&mut self, h: PlaybackHandle) {
        self.playback_handle = Some(h);
    }

    pub fn set_music_dir(&mut self, dir: String) {
        self.music_dir = Some(dir);
    }

    /// Replace the full post collection, keeping the cursor in range.
    pub fn set_posts(&mut self, posts: Vec<Post>) {
        self.posts = posts;
        if self.selected_post >= self.posts.len() {
            self.selected_post = self.posts.len().saturating_sub(1);
        }
    }

    /// Replace the full photo collection, keeping the carousel in range.
    pub fn set_photos(&mut self, photos: Vec<Photo>) {
        self.photos = photos;
        if self.photo_index >= self.photos.len() {
            self.photo_index = 0;
        }
    }

    pub fn next_post(&mut self) {
        if self.selected_post + 1 < self.posts.len() {
            self.selected_post += 1;
        }
    }

    pub fn prev_post(&mut self) {
        self.selected_post = self.selected_post.saturating_sub(1);
    }

    pub fn first_post(&mut self) {
        self.selected_post = 0;
    }

    pub fn last_post(&mut self) {
        self.selected_post = self.posts.len().saturating_sub(1);
    }

    /// Carousel step forward, wrapping.
    pub fn advance_photo(&mut self) {
        if !self.photos.is_empty() {
            self.photo_index = (self.photo_index + 1) % self.photos.len();
        }
    }

    /// Carousel step backward, wrapping.
    pub fn rewind_photo(&mut self) {
        if !self.photos.is_empty() {
            self.photo_index = (self.photo_index + self.photos.len() - 1) % self.photos.len();
        }
    }

    pub fn current_photo(&self) -> Option<&Photo> {
        self.photos.get(self.photo_index)
    }

    pub fn is_composing(&self) -> bool {
        self.compose.is_some()
    }

    pub fn enter_compose(&mut self) {
        self.compose = Some(ComposeDraft::new());
        self.notice = None;
    }

    pub fn cancel_compose(&mut self) {
        self.compose = None;
    }

    pub fn is_adding_photo(&self) -> bool {
        self.photo_draft.is_some()
    }

    pub fn enter_photo_compose(&mut self) {
        self.photo_draft = Some(String::new());
        self.notice = None;
    }

    pub fn cancel_photo_compose(&mut self) {
        self.photo_draft = None;
    }

    /// Point the carousel at the most recently added photo.
    pub fn show_last_photo(&mut self) {
        self.photo_index = self.photos.len().saturating_sub(1);
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }
}

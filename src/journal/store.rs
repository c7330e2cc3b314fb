use std::env;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::config::JournalSettings;

use super::model::{Photo, Post};

#[derive(Debug, Default, Serialize, Deserialize)]
struct PostsFile {
    #[serde(default)]
    posts: Vec<Post>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PhotosFile {
    #[serde(default)]
    photos: Vec<Photo>,
}

/// TOML-file-backed store for the two journal collections. Each collection
/// lives in one document; record order is file order.
pub struct JournalStore {
    dir: PathBuf,
}

impl JournalStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Resolve the data directory: explicit setting, then
    /// `$XDG_DATA_HOME/keepsake`, then `~/.local/share/keepsake`, then the
    /// working directory as a last resort.
    pub fn resolve_data_dir(settings: &JournalSettings) -> PathBuf {
        if let Some(dir) = &settings.data_dir {
            return dir.clone();
        }
        if let Some(xdg) = env::var_os("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("keepsake");
        }
        if let Some(home) = env::var_os("HOME") {
            return PathBuf::from(home).join(".local").join("share").join("keepsake");
        }
        PathBuf::from(".")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn posts_path(&self) -> PathBuf {
        self.dir.join("posts.toml")
    }

    fn photos_path(&self) -> PathBuf {
        self.dir.join("photos.toml")
    }

    /// Load the whole `posts` collection in file order. A missing file is an
    /// empty collection, not an error.
    pub fn load_posts(&self) -> Result<Vec<Post>, Box<dyn Error>> {
        let path = self.posts_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&path)?;
        let file: PostsFile = toml::from_str(&raw)?;
        Ok(file.posts)
    }

    /// Load posts, logging and defaulting to empty on any failure.
    pub fn load_posts_or_empty(&self) -> Vec<Post> {
        match self.load_posts() {
            Ok(posts) => posts,
            Err(e) => {
                eprintln!("keepsake: failed to load posts: {e}");
                Vec::new()
            }
        }
    }

    /// Append one post: read the whole document, push, rewrite. The caller
    /// reloads its full state afterwards rather than patching incrementally.
    pub fn append_post(&self, post: &Post) -> Result<(), Box<dyn Error>> {
        let mut file = PostsFile {
            posts: self.load_posts()?,
        };
        file.posts.push(post.clone());
        self.write_document(&self.posts_path(), &toml::to_string_pretty(&file)?)
    }

    /// Load the whole `photos` collection in file order.
    pub fn load_photos(&self) -> Result<Vec<Photo>, Box<dyn Error>> {
        let path = self.photos_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&path)?;
        let file: PhotosFile = toml::from_str(&raw)?;
        Ok(file.photos)
    }

    /// Load photos, logging and defaulting to empty on any failure.
    pub fn load_photos_or_empty(&self) -> Vec<Photo> {
        match self.load_photos() {
            Ok(photos) => photos,
            Err(e) => {
                eprintln!("keepsake: failed to load photos: {e}");
                Vec::new()
            }
        }
    }

    /// Append one photo record; same rewrite discipline as `append_post`.
    pub fn append_photo(&self, photo: &Photo) -> Result<(), Box<dyn Error>> {
        let mut file = PhotosFile {
            photos: self.load_photos()?,
        };
        file.photos.push(photo.clone());
        self.write_document(&self.photos_path(), &toml::to_string_pretty(&file)?)
    }

    fn write_document(&self, path: &Path, contents: &str) -> Result<(), Box<dyn Error>> {
        fs::create_dir_all(&self.dir)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Current wall-clock time in unix milliseconds, for `created_at`.
    pub fn now_ms() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}

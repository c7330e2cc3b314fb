use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One memory post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    /// `YYYY-MM-DD`, as entered in the compose popup.
    pub date: String,
    pub description: String,
    /// Optional photo attached to the post.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<PathBuf>,
    /// Unix milliseconds at append time.
    pub created_at: i64,
}

/// One carousel photo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub image: PathBuf,
    pub created_at: i64,
}

/// Render a stored `YYYY-MM-DD` date as `DD/MM/YYYY` for display. Anything
/// that is not three dash-separated fields passes through untouched.
pub fn format_post_date(date: &str) -> String {
    let parts: Vec<&str> = date.split('-').collect();
    match parts.as_slice() {
        [year, month, day] => format!("{day}/{month}/{year}"),
        _ => date.to_string(),
    }
}

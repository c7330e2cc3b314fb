use super::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn post(title: &str, created_at: i64) -> Post {
    Post {
        title: title.to_string(),
        date: "2024-05-06".to_string(),
        description: format!("{title} description"),
        photo: None,
        created_at,
    }
}

#[test]
fn missing_files_load_as_empty_collections() {
    let dir = tempdir().unwrap();
    let store = JournalStore::new(dir.path().join("does-not-exist-yet"));
    assert!(store.load_posts().unwrap().is_empty());
    assert!(store.load_photos().unwrap().is_empty());
}

#[test]
fn append_post_roundtrips_and_preserves_order() {
    let dir = tempdir().unwrap();
    let store = JournalStore::new(dir.path().to_path_buf());

    store.append_post(&post("first", 1)).unwrap();
    store.append_post(&post("second", 2)).unwrap();
    let mut third = post("third", 3);
    third.photo = Some(PathBuf::from("/photos/us.jpg"));
    store.append_post(&third).unwrap();

    let posts = store.load_posts().unwrap();
    let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
    assert_eq!(posts[0].photo, None);
    assert_eq!(posts[2].photo.as_deref(), Some(std::path::Path::new("/photos/us.jpg")));
    assert_eq!(posts[2].created_at, 3);
}

#[test]
fn append_photo_roundtrips() {
    let dir = tempdir().unwrap();
    let store = JournalStore::new(dir.path().to_path_buf());

    store
        .append_photo(&Photo {
            image: PathBuf::from("/photos/one.jpg"),
            created_at: 10,
        })
        .unwrap();
    store
        .append_photo(&Photo {
            image: PathBuf::from("/photos/two.jpg"),
            created_at: 20,
        })
        .unwrap();

    let photos = store.load_photos().unwrap();
    assert_eq!(photos.len(), 2);
    assert_eq!(photos[0].image, PathBuf::from("/photos/one.jpg"));
    assert_eq!(photos[1].created_at, 20);
}

#[test]
fn corrupt_document_defaults_to_empty_with_or_empty_variant() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("posts.toml"), "this is { not toml").unwrap();

    let store = JournalStore::new(dir.path().to_path_buf());
    assert!(store.load_posts().is_err());
    assert!(store.load_posts_or_empty().is_empty());
}

#[test]
fn resolve_data_dir_prefers_explicit_setting() {
    let settings = crate::config::JournalSettings {
        data_dir: Some(PathBuf::from("/tmp/keepsake-store")),
    };
    assert_eq!(
        JournalStore::resolve_data_dir(&settings),
        PathBuf::from("/tmp/keepsake-store")
    );
}

#[test]
fn format_post_date_renders_day_first() {
    assert_eq!(format_post_date("2024-05-06"), "06/05/2024");
    assert_eq!(format_post_date("unknown"), "unknown");
    assert_eq!(format_post_date(""), "");
}

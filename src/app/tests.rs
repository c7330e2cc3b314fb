use super::*;
use crate::journal::{Photo, Post};
use std::path::PathBuf;

fn post(title: &str) -> Post {
    Post {
        title: title.to_string(),
        date: "2024-05-06".to_string(),
        description: "desc".to_string(),
        photo: None,
        created_at: 0,
    }
}

fn photo(name: &str) -> Photo {
    Photo {
        image: PathBuf::from(name),
        created_at: 0,
    }
}

#[test]
fn post_cursor_stays_in_range() {
    let mut app = App::new(Vec::new());
    app.set_posts(vec![post("a"), post("b"), post("c")]);

    app.next_post();
    app.next_post();
    app.next_post();
    assert_eq!(app.selected_post, 2);

    app.prev_post();
    app.prev_post();
    app.prev_post();
    assert_eq!(app.selected_post, 0);

    app.last_post();
    assert_eq!(app.selected_post, 2);
    app.first_post();
    assert_eq!(app.selected_post, 0);
}

#[test]
fn replacing_posts_clamps_the_cursor() {
    let mut app = App::new(Vec::new());
    app.set_posts(vec![post("a"), post("b"), post("c")]);
    app.last_post();

    app.set_posts(vec![post("a")]);
    assert_eq!(app.selected_post, 0);

    app.set_posts(Vec::new());
    assert_eq!(app.selected_post, 0);
}

#[test]
fn photo_carousel_wraps_both_directions() {
    let mut app = App::new(Vec::new());
    app.set_photos(vec![photo("one.jpg"), photo("two.jpg"), photo("three.jpg")]);

    app.advance_photo();
    app.advance_photo();
    app.advance_photo();
    assert_eq!(app.photo_index, 0);

    app.rewind_photo();
    assert_eq!(app.photo_index, 2);
    assert_eq!(
        app.current_photo().unwrap().image,
        PathBuf::from("three.jpg")
    );
}

#[test]
fn photo_carousel_is_a_noop_when_empty() {
    let mut app = App::new(Vec::new());
    app.advance_photo();
    app.rewind_photo();
    assert_eq!(app.photo_index, 0);
    assert!(app.current_photo().is_none());
}

#[test]
fn compose_draft_edits_the_active_field() {
    let mut draft = ComposeDraft::new();
    assert_eq!(draft.field(), ComposeField::Title);

    for c in "Our day".chars() {
        draft.push_char(c);
    }
    draft.backspace();
    assert_eq!(draft.title, "Our da");

    draft.next_field();
    assert_eq!(draft.field(), ComposeField::Date);
    for c in "2024-05-06".chars() {
        draft.push_char(c);
    }
    assert_eq!(draft.date, "2024-05-06");

    draft.prev_field();
    assert_eq!(draft.field(), ComposeField::Title);

    // Field cycling wraps in both directions.
    draft.prev_field();
    assert_eq!(draft.field(), ComposeField::Photo);
    draft.next_field();
    assert_eq!(draft.field(), ComposeField::Title);
}

#[test]
fn compose_draft_requires_title_date_and_description() {
    let mut draft = ComposeDraft::new();
    assert!(draft.validate().is_err());

    draft.title = "t".to_string();
    draft.date = "2024-05-06".to_string();
    draft.description = "d".to_string();
    assert!(draft.validate().is_ok());

    draft.date = "06/05/2024".to_string();
    assert!(draft.validate().is_err());
}

#[test]
fn compose_draft_converts_to_a_post_record() {
    let mut draft = ComposeDraft::new();
    draft.title = "  A walk  ".to_string();
    draft.date = "2024-06-01".to_string();
    draft.description = " rain ".to_string();

    let p = draft.to_post(42);
    assert_eq!(p.title, "A walk");
    assert_eq!(p.description, "rain");
    assert_eq!(p.photo, None);
    assert_eq!(p.created_at, 42);

    draft.photo = " /photos/walk.jpg ".to_string();
    assert_eq!(
        draft.to_post(0).photo,
        Some(PathBuf::from("/photos/walk.jpg"))
    );
}

#[test]
fn photo_compose_opens_and_cancels() {
    let mut app = App::new(Vec::new());
    assert!(!app.is_adding_photo());

    app.enter_photo_compose();
    assert!(app.is_adding_photo());
    assert_eq!(app.photo_draft.as_deref(), Some(""));

    app.cancel_photo_compose();
    assert!(!app.is_adding_photo());
}

#[test]
fn show_last_photo_points_at_the_newest_entry() {
    let mut app = App::new(Vec::new());
    app.show_last_photo();
    assert_eq!(app.photo_index, 0);

    app.set_photos(vec![photo("a.jpg"), photo("b.jpg")]);
    app.show_last_photo();
    assert_eq!(app.photo_index, 1);
}

#[test]
fn entering_compose_clears_the_notice() {
    let mut app = App::new(Vec::new());
    app.set_notice("saved");
    assert!(app.notice.is_some());

    app.enter_compose();
    assert!(app.is_composing());
    assert!(app.notice.is_none());

    app.cancel_compose();
    assert!(!app.is_composing());
}

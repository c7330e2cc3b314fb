//! UI rendering helpers for the terminal keepsake page.
//!
//! Layout, top to bottom: header (title + dedication), the elapsed-time
//! clock row, the now-playing/photo status box, the scrolling post list and
//! the controls footer. The compose popup overlays the post list.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::{App, ComposeDraft, ComposeField};
use crate::config::{ControlsSettings, TimeField, TrackDisplayField, UiSettings};
use crate::counter::Elapsed;
use crate::journal::format_post_date;

/// Render the controls help text.
fn controls_text(controls: &ControlsSettings) -> String {
    [
        "[j/k] stories".to_string(),
        "[gg/G] top/bottom".to_string(),
        "[space/p] play/pause".to_string(),
        "[h/l] prev/next song".to_string(),
        format!("[H/L] scrub -/+{}s", controls.scrub_seconds),
        format!("[+/-] volume {}%", controls.volume_step_percent),
        "[,/.] photos".to_string(),
        "[n] new story".to_string(),
        "[N] new photo".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Build the "now playing" track text according to `ui` settings.
fn now_playing_track_text(app: &App, track_index: usize, ui: &UiSettings) -> String {
    let track = &app.tracks[track_index];
    let mut parts: Vec<String> = Vec::new();

    for f in &ui.now_playing_track_fields {
        match f {
            TrackDisplayField::Display => {
                if !track.display.trim().is_empty() {
                    parts.push(track.display.clone());
                }
            }
            TrackDisplayField::Title => {
                if !track.title.trim().is_empty() {
                    parts.push(track.title.clone());
                }
            }
            TrackDisplayField::Artist => {
                if let Some(a) = track
                    .artist
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                {
                    parts.push(a.to_string());
                }
            }
            TrackDisplayField::Album => {
                if let Some(a) = track
                    .album
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                {
                    parts.push(a.to_string());
                }
            }
            TrackDisplayField::Filename => {
                if let Some(stem) = track.path.file_stem().and_then(|s| s.to_str()) {
                    if !stem.trim().is_empty() {
                        parts.push(stem.to_string());
                    }
                }
            }
            TrackDisplayField::Path => {
                parts.push(track.path.display().to_string());
            }
        }
    }

    if parts.is_empty() {
        track.display.clone()
    } else {
        parts.join(&ui.now_playing_track_separator)
    }
}

/// Build the now-playing time text (elapsed/total/remaining) per `UiSettings`.
fn now_playing_time_text(
    elapsed: Duration,
    total: Option<Duration>,
    ui: &UiSettings,
) -> Option<String> {
    if ui.now_playing_time_fields.is_empty() {
        return None;
    }

    let mut parts: Vec<String> = Vec::new();
    for f in &ui.now_playing_time_fields {
        match f {
            TimeField::Elapsed => parts.push(format_mmss(elapsed)),
            TimeField::Total => {
                if let Some(t) = total {
                    parts.push(format_mmss(t));
                }
            }
            TimeField::Remaining => {
                if let Some(t) = total {
                    let rem = t.saturating_sub(elapsed);
                    parts.push(format!("-{}", format_mmss(rem)));
                }
            }
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(&ui.now_playing_time_separator))
    }
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the four clock boxes (days/hours/minutes/seconds).
fn draw_clock(frame: &mut Frame, area: Rect, elapsed: &Elapsed, ui: &UiSettings) {
    let boxes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
        ])
        .split(area);

    let labels = &ui.clock_labels;
    let cells: [(u64, &str); 4] = [
        (elapsed.days, labels.days.as_str()),
        (elapsed.hours, labels.hours.as_str()),
        (elapsed.minutes, labels.minutes.as_str()),
        (elapsed.seconds, labels.seconds.as_str()),
    ];

    for (i, (value, label)) in cells.iter().enumerate() {
        let cell = Paragraph::new(format!("{value}\n{label}"))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(cell, boxes[i]);
    }
}

/// Render the compose popup over the post list.
fn draw_compose(frame: &mut Frame, area: Rect, draft: &ComposeDraft) {
    let popup_area = centered_rect_sized(64, 8, area);
    frame.render_widget(Clear, popup_area);

    let mut lines: Vec<String> = Vec::new();
    for field in ComposeField::ALL {
        let marker = if draft.field() == field { "> " } else { "  " };
        let value = match field {
            ComposeField::Title => &draft.title,
            ComposeField::Date => &draft.date,
            ComposeField::Description => &draft.description,
            ComposeField::Photo => &draft.photo,
        };
        lines.push(format!("{marker}{}: {value}", field.label()));
    }

    let popup = Paragraph::new(lines.join("\n"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" new story (Tab next field, Enter saves, Esc cancels) "),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(popup, popup_area);
}

/// Render the add-photo popup over the post list.
fn draw_photo_compose(frame: &mut Frame, area: Rect, draft: &str) {
    let popup_area = centered_rect_sized(64, 4, area);
    frame.render_widget(Clear, popup_area);

    let popup = Paragraph::new(format!("> Photo path: {draft}"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" new photo (Enter saves, Esc cancels) "),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(popup, popup_area);
}

/// Render the entire page into `frame` using `app` state and settings.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    elapsed: &Elapsed,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header: title + dedication.
    let header = Paragraph::new(format!("{}\n{}", ui_settings.title, ui_settings.subtitle))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(ui_settings.header_text.as_str())
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    draw_clock(frame, chunks[1], elapsed, ui_settings);

    // Status box: now playing, volume, photo carousel, notices.
    let status = {
        let mut parts: Vec<String> = Vec::new();

        if app.tracks.is_empty() {
            parts.push("No music available.".to_string());
        } else if let Some(ref h) = app.playback_handle {
            if let Ok(info) = h.lock() {
                let state = if info.playing { "Playing" } else { "Paused" };
                if let Some(idx) = info.index {
                    let song = now_playing_track_text(app, idx, ui_settings);
                    let time = now_playing_time_text(info.elapsed, info.duration, ui_settings);
                    if let Some(time) = time {
                        parts.push(format!("Song: {} [{}]", song, time));
                    } else {
                        parts.push(format!("Song: {}", song));
                    }
                    parts.push(state.to_string());
                } else {
                    parts.push("Stopped".to_string());
                }
                parts.push(format!("Vol: {:.0}%", info.volume * 100.0));
            }
        }

        if app.photos.is_empty() {
            parts.push("No photos yet.".to_string());
        } else if let Some(photo) = app.current_photo() {
            let name = photo
                .image
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("?");
            parts.push(format!(
                "Photo: {} ({}/{})",
                name,
                app.photo_index + 1,
                app.photos.len()
            ));
        }

        if let Some(notice) = &app.notice {
            parts.push(notice.clone());
        }

        if let Some(dir) = &app.music_dir {
            parts.push(format!("Dir: {}", dir));
        }

        parts.join(" • ")
    };

    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[2]);

    // Post list. Every item renders as two rows (title line + description),
    // so the visible window is half the area height.
    {
        let area = chunks[3];
        if app.posts.is_empty() {
            let empty = Paragraph::new("No stories added yet.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(" our stories "));
            frame.render_widget(empty, area);
        } else {
            let total = app.posts.len();
            let rows = area.height.saturating_sub(2) as usize;
            let window = (rows / 2).max(1);
            let sel = app.selected_post.min(total - 1);

            let (start, end, selected_in_window) = if total <= window {
                (0, total, sel)
            } else {
                let half = window / 2;
                let mut start = sel.saturating_sub(half);
                if start + window > total {
                    start = total - window;
                }
                (start, start + window, sel - start)
            };

            let items: Vec<ListItem> = app.posts[start..end]
                .iter()
                .map(|post| {
                    let photo_marker = if post.photo.is_some() { " [photo]" } else { "" };
                    ListItem::new(format!(
                        "♥ {} — {}{}\n   {}",
                        post.title,
                        format_post_date(&post.date),
                        photo_marker,
                        post.description
                    ))
                })
                .collect();

            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL).title(" our stories "))
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ");
            let mut state = ratatui::widgets::ListState::default();
            state.select(Some(selected_in_window));
            frame.render_stateful_widget(list, area, &mut state);
        }

        if let Some(draft) = &app.compose {
            draw_compose(frame, area, draft);
        } else if let Some(draft) = &app.photo_draft {
            draw_photo_compose(frame, area, draft);
        }
    }

    let footer = Paragraph::new(controls_text(controls_settings))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[4]);
}

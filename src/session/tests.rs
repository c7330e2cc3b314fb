use super::*;

fn session(len: usize) -> PlaybackSession {
    PlaybackSession::new(len, 0.5).unwrap()
}

#[test]
fn empty_track_list_has_no_session() {
    assert!(PlaybackSession::new(0, 0.5).is_none());
}

#[test]
fn next_wraps_modulo_length() {
    // [A, B, C] from index 0: 1, 2, 0.
    let mut s = session(3);
    assert_eq!(s.next(), Some(1));
    assert_eq!(s.next(), Some(2));
    assert_eq!(s.next(), Some(0));
}

#[test]
fn next_n_times_returns_to_start() {
    for n in 2..=6 {
        let mut s = session(n);
        s.select(1);
        for _ in 0..n {
            s.next();
        }
        assert_eq!(s.current_index(), 1, "length {n}");
    }
}

#[test]
fn next_is_a_noop_for_a_single_track() {
    let mut s = session(1);
    assert_eq!(s.next(), None);
    assert_eq!(s.current_index(), 0);
}

#[test]
fn previous_early_in_track_skips_back_with_wrap() {
    let mut s = session(3);
    assert_eq!(
        s.previous(Duration::from_secs(2)),
        Some(PrevAction::SkipBack(2))
    );
    assert_eq!(s.current_index(), 2);
    assert!(s.is_playing());
}

#[test]
fn previous_past_threshold_restarts_current_track() {
    // [A, B] at index 1, position 10s: restart, index unchanged.
    let mut s = session(2);
    s.select(1);
    s.set_playing(false);
    assert_eq!(s.previous(Duration::from_secs(10)), Some(PrevAction::Restart));
    assert_eq!(s.current_index(), 1);
    assert!(s.is_playing());
}

#[test]
fn previous_threshold_boundary_is_exclusive_below_four_seconds() {
    let mut s = session(3);
    s.select(1);
    assert_eq!(
        s.previous(Duration::from_millis(3_999)),
        Some(PrevAction::SkipBack(0))
    );

    let mut s = session(3);
    s.select(1);
    assert_eq!(s.previous(PREV_RESTART_THRESHOLD), Some(PrevAction::Restart));
}

#[test]
fn previous_is_a_noop_for_a_single_track() {
    let mut s = session(1);
    assert_eq!(s.previous(Duration::ZERO), None);
}

#[test]
fn track_ended_advances_and_replays_a_lone_track() {
    let mut s = session(2);
    assert_eq!(s.track_ended(), 1);
    assert_eq!(s.track_ended(), 0);

    let mut lone = session(1);
    assert_eq!(lone.track_ended(), 0);
    assert!(lone.is_playing());
}

#[test]
fn toggle_flips_intent() {
    let mut s = session(2);
    assert!(!s.is_playing());
    assert!(s.toggle());
    assert!(!s.toggle());
}

#[test]
fn volume_clamps_into_unit_range() {
    let mut s = session(2);
    assert_eq!(s.set_volume(0.7), 0.7);
    assert_eq!(s.set_volume(1.8), 1.0);
    assert_eq!(s.set_volume(-0.3), 0.0);
    assert_eq!(s.set_volume(f32::NAN), 0.0);

    // Construction clamps too.
    let s = PlaybackSession::new(2, 7.0).unwrap();
    assert_eq!(s.volume(), 1.0);
}

#[test]
fn seek_clamps_into_track_duration() {
    let dur = Some(Duration::from_secs(180));
    assert_eq!(clamp_seek(30, dur), Duration::from_secs(30));
    assert_eq!(clamp_seek(-5, dur), Duration::ZERO);
    assert_eq!(clamp_seek(9_999, dur), Duration::from_secs(180));
    // Unknown duration: only the lower bound applies.
    assert_eq!(clamp_seek(9_999, None), Duration::from_secs(9_999));
}

#[test]
fn select_wraps_out_of_range_indices() {
    let mut s = session(3);
    assert_eq!(s.select(7), 1);
    assert!(s.is_playing());
}

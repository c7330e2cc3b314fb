use std::time::Duration;

use super::types::{PlaybackInfo, seek_target};

#[test]
fn seek_target_applies_delta_and_clamps() {
    let dur = Some(Duration::from_secs(200));

    assert_eq!(
        seek_target(Duration::from_secs(50), 5, dur),
        Duration::from_secs(55)
    );
    assert_eq!(
        seek_target(Duration::from_secs(50), -5, dur),
        Duration::from_secs(45)
    );
    // Past the start clamps to zero.
    assert_eq!(seek_target(Duration::from_secs(2), -10, dur), Duration::ZERO);
    // Past the end clamps to the duration.
    assert_eq!(
        seek_target(Duration::from_secs(190), 60, dur),
        Duration::from_secs(200)
    );
    // Unknown duration only clamps the lower bound.
    assert_eq!(
        seek_target(Duration::from_secs(190), 60, None),
        Duration::from_secs(250)
    );
}

#[test]
fn playback_info_defaults_to_unbound_and_half_volume() {
    let info = PlaybackInfo::default();
    assert_eq!(info.index, None);
    assert_eq!(info.elapsed, Duration::ZERO);
    assert_eq!(info.duration, None);
    assert!(!info.playing);
    assert_eq!(info.volume, 0.5);
}

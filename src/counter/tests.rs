use super::*;

// 2024-05-06T23:30:00Z
const REFERENCE_ANCHOR_MS: i64 = 1_715_038_200_000;

fn reference_anchor() -> Anchor {
    // 20:30 local at UTC-3 == 23:30 UTC.
    Anchor::from_civil(2024, 5, 6, 20, 30, 0, -180)
}

#[test]
fn reference_anchor_converts_to_expected_utc_instant() {
    assert_eq!(reference_anchor().utc_ms(), REFERENCE_ANCHOR_MS);
}

#[test]
fn civil_conversion_matches_known_epochs() {
    assert_eq!(days_from_civil(1970, 1, 1), 0);
    assert_eq!(days_from_civil(1970, 1, 2), 1);
    assert_eq!(days_from_civil(1969, 12, 31), -1);
    // 2000-03-01, the day after a 400-year leap day.
    assert_eq!(days_from_civil(2000, 2, 29), 11_016);
    assert_eq!(days_from_civil(2000, 3, 1), 11_017);
}

#[test]
fn one_day_and_five_seconds_after_reference_anchor() {
    // Sampled at 2024-05-07T23:30:05Z.
    let now = REFERENCE_ANCHOR_MS + 86_400_000 + 5_000;
    assert_eq!(
        reference_anchor().elapsed_at(now),
        Elapsed {
            days: 1,
            hours: 0,
            minutes: 0,
            seconds: 5
        }
    );
}

#[test]
fn anchor_in_the_future_yields_all_zeros() {
    let anchor = reference_anchor();
    assert_eq!(anchor.elapsed_at(REFERENCE_ANCHOR_MS - 1), Elapsed::ZERO);
    assert_eq!(anchor.elapsed_at(0), Elapsed::ZERO);
}

#[test]
fn breakdown_reconstructs_to_whole_elapsed_seconds() {
    let anchor = reference_anchor();
    // A spread of offsets: sub-second, minute/hour/day boundaries, large gaps.
    for offset_ms in [
        0i64,
        1,
        999,
        1_000,
        59_999,
        60_000,
        3_599_999,
        3_600_000,
        86_399_999,
        86_400_000,
        123_456_789,
        40 * 86_400_000 + 3 * 3_600_000 + 21 * 60_000 + 7_000,
    ] {
        let now = REFERENCE_ANCHOR_MS + offset_ms;
        let e = anchor.elapsed_at(now);
        assert_eq!(
            e.total_seconds() as i64,
            offset_ms / 1000,
            "offset {offset_ms}ms"
        );
        assert!(e.hours < 24 && e.minutes < 60 && e.seconds < 60);
    }
}

#[test]
fn positive_offset_shifts_anchor_earlier_in_utc() {
    // 20:30 at UTC+3 == 17:30 UTC.
    let east = Anchor::from_civil(2024, 5, 6, 20, 30, 0, 180);
    assert_eq!(east.utc_ms(), REFERENCE_ANCHOR_MS - 6 * 3_600_000);
}

#[test]
fn parse_date_accepts_valid_and_rejects_invalid() {
    assert_eq!(parse_date("2024-05-06"), Some((2024, 5, 6)));
    assert_eq!(parse_date("2024-02-29"), Some((2024, 2, 29)));
    assert_eq!(parse_date("2023-02-29"), None);
    assert_eq!(parse_date("2024-13-01"), None);
    assert_eq!(parse_date("2024-00-10"), None);
    assert_eq!(parse_date("2024-04-31"), None);
    assert_eq!(parse_date("2024-05"), None);
    assert_eq!(parse_date("2024-05-06-01"), None);
    assert_eq!(parse_date("not a date"), None);
}

#[test]
fn parse_time_accepts_valid_and_rejects_invalid() {
    assert_eq!(parse_time("20:30:00"), Some((20, 30, 0)));
    assert_eq!(parse_time("20:30"), Some((20, 30, 0)));
    assert_eq!(parse_time("00:00:00"), Some((0, 0, 0)));
    assert_eq!(parse_time("24:00:00"), None);
    assert_eq!(parse_time("12:60:00"), None);
    assert_eq!(parse_time("12:00:60"), None);
    assert_eq!(parse_time("12"), None);
}

#[test]
fn from_settings_uses_configured_civil_fields() {
    let settings = crate::config::AnchorSettings::default();
    let anchor = Anchor::from_settings(&settings).unwrap();
    assert_eq!(anchor, reference_anchor());

    let bad = crate::config::AnchorSettings {
        date: "yesterday".to_string(),
        ..crate::config::AnchorSettings::default()
    };
    assert!(Anchor::from_settings(&bad).is_err());
}

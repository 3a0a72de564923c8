// tests/predict_rollover.rs
//
// Rollover behavior of next-occurrence prediction across a spread of
// reference instants.

use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike, Utc};
use game_event_alerter::{select_earliest, TimeSpec};

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

#[test]
fn unrestricted_specs_always_resolve_strictly_future_same_or_next_day() {
    let spec = TimeSpec {
        time_of_day_secs: 14 * 3600 + 30 * 60,
        allowed_weekdays: None,
    };
    let base = utc(2024, 2, 28, 0, 0, 0); // leap-year February
    for offset_secs in [0i64, 1, 52_199, 52_200, 52_201, 86_399] {
        let reference = base + Duration::seconds(offset_secs);
        let next = spec.resolve_next(reference).unwrap();
        assert!(next > reference, "must be strictly future at {reference}");
        assert!(
            next - reference <= Duration::days(1),
            "same or next day at {reference}"
        );
        assert_eq!(next.num_seconds_from_midnight(), 14 * 3600 + 30 * 60);
    }
}

#[test]
fn weekday_restricted_specs_only_land_on_allowed_days() {
    // Wednesdays and Saturdays, 03:00 UTC.
    let spec = TimeSpec {
        time_of_day_secs: 3 * 3600,
        allowed_weekdays: Some([3u8, 6].into_iter().collect()),
    };
    for day in 1..=14u32 {
        let reference = utc(2024, 1, day, 12, 0, 0);
        let next = spec.resolve_next(reference).unwrap();
        assert!(next > reference);
        let wd = next.weekday().num_days_from_sunday() as u8;
        assert!(wd == 3 || wd == 6, "landed on weekday {wd}");
    }
}

#[test]
fn occurrence_at_reference_rolls_a_full_week_under_single_day_restriction() {
    // Mondays at 14:00; 2024-01-01 is a Monday and the reference sits
    // exactly on the slot, so next is one week out.
    let spec = TimeSpec {
        time_of_day_secs: 14 * 3600,
        allowed_weekdays: Some([1u8].into_iter().collect()),
    };
    let next = spec.resolve_next(utc(2024, 1, 1, 14, 0, 0)).unwrap();
    assert_eq!(next, utc(2024, 1, 8, 14, 0, 0));
}

#[test]
fn earliest_slot_wins_across_mixed_specs() {
    let reference = utc(2024, 1, 1, 22, 0, 0); // Monday evening
    let specs = vec![
        // Daily 23:30 — later today.
        TimeSpec {
            time_of_day_secs: 23 * 3600 + 30 * 60,
            allowed_weekdays: None,
        },
        // Tuesdays 06:00 — tomorrow morning.
        TimeSpec {
            time_of_day_secs: 6 * 3600,
            allowed_weekdays: Some([2u8].into_iter().collect()),
        },
    ];
    assert_eq!(
        select_earliest(&specs, reference),
        Some(utc(2024, 1, 1, 23, 30, 0))
    );

    // Past tonight's slot, the Tuesday slot becomes earliest.
    let reference = utc(2024, 1, 1, 23, 30, 0);
    assert_eq!(
        select_earliest(&specs, reference),
        Some(utc(2024, 1, 2, 6, 0, 0))
    );
}

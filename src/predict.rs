// src/predict.rs
//
// Next-occurrence prediction for recurring daily event slots. A `TimeSpec`
// is one "HH:MM:SS every day" slot, optionally restricted to a set of UTC
// weekdays; the resolver finds the next instant strictly after a reference
// instant that satisfies it.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, Duration, Utc};
use once_cell::sync::OnceCell;
use regex::Regex;

use crate::feed::types::TimeEntry;

/// Parse a strict `HH:MM:SS` string into seconds since midnight.
/// Returns `None` for anything that is not exactly two digits per field
/// or that would fall outside `[0, 86400)`.
pub fn parse_hms(s: &str) -> Option<u32> {
    static RE_HMS: OnceCell<Regex> = OnceCell::new();
    let re = RE_HMS.get_or_init(|| Regex::new(r"^(\d{2}):(\d{2}):(\d{2})$").unwrap());
    let caps = re.captures(s)?;
    let h: u32 = caps[1].parse().ok()?;
    let m: u32 = caps[2].parse().ok()?;
    let sec: u32 = caps[3].parse().ok()?;
    if h >= 24 || m >= 60 || sec >= 60 {
        return None;
    }
    Some(h * 3600 + m * 60 + sec)
}

/// Map a feed weekday name ("MONDAY", case-insensitive) to 0..=6, 0 = Sunday.
pub fn weekday_from_name(name: &str) -> Option<u8> {
    match name.to_ascii_uppercase().as_str() {
        "SUNDAY" => Some(0),
        "MONDAY" => Some(1),
        "TUESDAY" => Some(2),
        "WEDNESDAY" => Some(3),
        "THURSDAY" => Some(4),
        "FRIDAY" => Some(5),
        "SATURDAY" => Some(6),
        _ => None,
    }
}

/// One recurring daily slot. Rebuilt from the feed snapshot every tick;
/// never stored across ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSpec {
    pub time_of_day_secs: u32,
    /// `None` means every day. A present-but-empty set is unsatisfiable
    /// and resolves to no occurrence.
    pub allowed_weekdays: Option<BTreeSet<u8>>,
}

impl TimeSpec {
    /// Build a spec from a raw feed entry. `None` when the time string
    /// does not parse; unknown weekday names are dropped from the set.
    pub fn from_entry(entry: &TimeEntry) -> Option<Self> {
        let time_of_day_secs = parse_hms(&entry.time)?;
        let allowed_weekdays = entry
            .days
            .as_ref()
            .map(|days| days.iter().filter_map(|d| weekday_from_name(d)).collect());
        Some(Self {
            time_of_day_secs,
            allowed_weekdays,
        })
    }

    /// Next instant satisfying this spec, strictly after `reference`.
    ///
    /// An occurrence exactly equal to `reference` is not "next": it rolls
    /// over to the following valid day. `None` when no allowed weekday can
    /// be reached within 8 day-advances (empty or bogus weekday set).
    pub fn resolve_next(&self, reference: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let midnight = reference.date_naive().and_hms_opt(0, 0, 0)?.and_utc();
        let mut candidate = midnight + Duration::seconds(i64::from(self.time_of_day_secs));
        candidate = self.advance_to_allowed(candidate)?;
        if candidate <= reference {
            candidate = self.advance_to_allowed(candidate + Duration::days(1))?;
        }
        Some(candidate)
    }

    fn advance_to_allowed(&self, mut candidate: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let Some(allowed) = &self.allowed_weekdays else {
            return Some(candidate);
        };
        for _ in 0..8 {
            let wd = candidate.weekday().num_days_from_sunday() as u8;
            if allowed.contains(&wd) {
                return Some(candidate);
            }
            candidate += Duration::days(1);
        }
        None
    }
}

/// Earliest upcoming occurrence across all of an event's time slots.
/// `None` when no slot resolves (event is skipped for this tick).
pub fn select_earliest(specs: &[TimeSpec], reference: DateTime<Utc>) -> Option<DateTime<Utc>> {
    specs.iter().filter_map(|s| s.resolve_next(reference)).min()
}

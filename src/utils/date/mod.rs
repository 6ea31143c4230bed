// Date utility functions
// Timestamp parsing and week arithmetic shared by the layout services

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};

use crate::models::settings::{TimezonePolicy, WeekAnchor};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a shift timestamp into the wall-clock time chosen by `policy`.
///
/// Offset timestamps (RFC 3339) follow the policy. Naive timestamps carry no
/// offset and are taken as already being wall-clock time. Returns `None`
/// rather than an error so callers can skip the record.
pub fn parse_wall_clock(raw: &str, policy: TimezonePolicy) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(policy.wall_clock(&stamp));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

/// Number of calendar days in an inclusive range, at least one
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days().max(0) + 1
}

/// Latest date from which a full seven-day week still fits in the calendar
pub fn last_full_week_start() -> NaiveDate {
    NaiveDate::MAX
        .checked_sub_signed(Duration::days(6))
        .unwrap_or(NaiveDate::MAX)
}

/// Most recent `first_day` on or before `date`, or `date` itself when that
/// day would fall before the start of the calendar
pub fn week_start(date: NaiveDate, first_day: Weekday) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday();
    let first = first_day.num_days_from_sunday();
    let days_to_subtract = (weekday as i64 - first as i64 + 7) % 7;
    date.checked_sub_signed(Duration::days(days_to_subtract))
        .unwrap_or(date)
}

/// Seven consecutive dates starting at `start`; fewer only when `start` is
/// after [`last_full_week_start`]
pub fn week_days(start: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take(7).collect()
}

/// Start dates of each week covering `start..=end`.
///
/// Ranges of a week or less always produce one week beginning on `start`.
pub fn week_starts(start: NaiveDate, end: NaiveDate, anchor: WeekAnchor) -> Vec<NaiveDate> {
    let end = end.max(start);
    if inclusive_days(start, end) <= 7 {
        return vec![start];
    }

    let first = match anchor {
        WeekAnchor::RangeStart => start,
        WeekAnchor::Weekday(day) => week_start(start, day),
    };

    let mut starts = Vec::new();
    let mut current = Some(first);
    while let Some(week) = current.filter(|week| *week <= end) {
        starts.push(week);
        current = week.checked_add_signed(Duration::days(7));
    }
    starts
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// "6 AM", "12 PM", "6 PM" style label for a whole hour
pub fn hour_label(hour: u32) -> String {
    let hour = hour % 24;
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{} {}", display, suffix)
}

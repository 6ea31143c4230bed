//! Buckets shifts into per-day day and night lists.

use chrono::{NaiveDate, Timelike};

use crate::models::settings::{NightWindow, TimezonePolicy};
use crate::models::shift::Shift;
use crate::utils::date::parse_wall_clock;

use super::identity::{CaregiverIdentity, IdentityResolver};

/// A shift with every display attribute resolved
#[derive(Debug, Clone, PartialEq)]
pub struct GridShift<'a> {
    pub shift: &'a Shift,
    pub date: NaiveDate,
    pub start_hour: u32,
    pub caregiver: CaregiverIdentity,
    pub time_range: String,
    pub is_night: bool,
}

impl GridShift<'_> {
    pub fn id(&self) -> &str {
        &self.shift.id
    }

    pub fn title(&self) -> &str {
        &self.shift.title
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket<'a> {
    pub date: NaiveDate,
    pub day_shifts: Vec<GridShift<'a>>,
    pub night_shifts: Vec<GridShift<'a>>,
}

impl DayBucket<'_> {
    pub fn len(&self) -> usize {
        self.day_shifts.len() + self.night_shifts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shifts ready for layout plus the number left out
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedShifts<'a> {
    pub shifts: Vec<GridShift<'a>>,
    pub skipped: usize,
}

/// Build a `GridShift`, or `None` when a timestamp cannot be read
pub fn grid_shift<'a>(
    shift: &'a Shift,
    resolver: &IdentityResolver<'_>,
    policy: TimezonePolicy,
    window: NightWindow,
) -> Option<GridShift<'a>> {
    let start = parse_wall_clock(&shift.start, policy)?;
    let end = parse_wall_clock(&shift.end, policy)?;
    let start_hour = start.hour();

    Some(GridShift {
        shift,
        date: start.date(),
        start_hour,
        caregiver: resolver.resolve(shift.caregiver_id.as_deref()),
        time_range: format!("{} - {}", start.format("%H:%M"), end.format("%H:%M")),
        is_night: window.is_night(start_hour),
    })
}

/// Resolve every shift once, in input order
pub fn prepare_shifts<'a>(
    shifts: &'a [Shift],
    resolver: &IdentityResolver<'_>,
    policy: TimezonePolicy,
    window: NightWindow,
) -> PreparedShifts<'a> {
    let mut prepared = Vec::with_capacity(shifts.len());
    let mut skipped = 0;
    for shift in shifts {
        match grid_shift(shift, resolver, policy, window) {
            Some(grid) => prepared.push(grid),
            None => {
                skipped += 1;
                log::debug!(
                    "Skipping shift {} with unreadable time range {:?} - {:?}",
                    shift.id,
                    shift.start,
                    shift.end
                );
            }
        }
    }
    PreparedShifts {
        shifts: prepared,
        skipped,
    }
}

/// Split the shifts starting on `date` into day and night lists
pub fn bucket_for_day<'a>(date: NaiveDate, shifts: &[GridShift<'a>]) -> DayBucket<'a> {
    let (night_shifts, day_shifts) = shifts
        .iter()
        .filter(|s| s.date == date)
        .cloned()
        .partition(|s| s.is_night);
    DayBucket {
        date,
        day_shifts,
        night_shifts,
    }
}

/// Classify one day straight from raw shifts
pub fn classify_day<'a>(
    date: NaiveDate,
    shifts: &'a [Shift],
    resolver: &IdentityResolver<'_>,
    policy: TimezonePolicy,
    window: NightWindow,
) -> DayBucket<'a> {
    let prepared = prepare_shifts(shifts, resolver, policy, window);
    bucket_for_day(date, &prepared.shifts)
}

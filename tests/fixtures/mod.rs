// Test fixtures - reusable test data
// Provides consistent schedules across all test files
#![allow(dead_code)]

use chrono::{Duration, NaiveDate};

use care_schedule::models::shift::{CareTeamMember, ScheduleRequest, Shift};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Sunday, Oct 4 2026
    pub fn oct_4_2026() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 4).unwrap()
    }

    /// Friday, Oct 2 2026
    pub fn oct_2_2026() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 2).unwrap()
    }

    /// Feb 29, 2028 (leap year)
    pub fn leap_day_2028() -> NaiveDate {
        NaiveDate::from_ymd_opt(2028, 2, 29).unwrap()
    }

    /// Last day of an inclusive range of `days` days
    pub fn range_end(start: NaiveDate, days: i64) -> NaiveDate {
        start + Duration::days(days - 1)
    }

    /// Timestamp string in the naive `YYYY-MM-DDTHH:MM:SS` form
    pub fn stamp(date: NaiveDate, hour: u32, minute: u32) -> String {
        format!("{}T{:02}:{:02}:00", date.format("%Y-%m-%d"), hour, minute)
    }
}

/// Sample care team
pub mod team {
    use super::*;

    pub const ALICE: &str = "cg-alice";
    pub const BASHIR: &str = "cg-bashir";
    pub const CHIDI: &str = "cg-chidi";

    pub fn members() -> Vec<CareTeamMember> {
        vec![
            CareTeamMember::new(ALICE, "Alice Moreno"),
            CareTeamMember::new(BASHIR, "Bashir Haddad"),
            CareTeamMember::new(CHIDI, "Chidi Okafor"),
        ]
    }
}

/// Sample shifts
pub mod shifts {
    use super::*;

    /// Shift starting on `date` at `hour` for `hours` hours
    pub fn at(id: &str, date: NaiveDate, hour: u32, hours: i64, caregiver: Option<&str>) -> Shift {
        let start = date.and_hms_opt(hour, 0, 0).unwrap();
        let end = start + Duration::hours(hours);
        let shift = Shift::new(
            id,
            format!("Care visit {}", id),
            start.format("%Y-%m-%dT%H:%M:%S").to_string(),
            end.format("%Y-%m-%dT%H:%M:%S").to_string(),
        );
        match caregiver {
            Some(caregiver_id) => shift.with_caregiver(caregiver_id),
            None => shift,
        }
    }

    /// A busy fortnight: one day shift and one night shift per day, rotating carers
    pub fn busy_fortnight(start: NaiveDate) -> Vec<Shift> {
        let carers = [team::ALICE, team::BASHIR, team::CHIDI];
        (0..14)
            .flat_map(|offset| {
                let date = start + Duration::days(offset);
                let day_carer = carers[offset as usize % carers.len()];
                let night_carer = carers[(offset as usize + 1) % carers.len()];
                vec![
                    at(&format!("d{}", offset), date, 8, 8, Some(day_carer)),
                    at(&format!("n{}", offset), date, 20, 10, Some(night_carer)),
                ]
            })
            .collect()
    }
}

/// A titled request over `days` days starting on `start`
pub fn request(start: NaiveDate, days: i64, shifts: Vec<Shift>) -> ScheduleRequest {
    ScheduleRequest::new(start, dates::range_end(start, days))
        .with_title("Margaret's care plan")
        .with_shifts(shifts)
        .with_team(team::members())
}

// Property-based tests for the layout engine
// Checks invariants that must hold for any caregiver id, shift mix or date range

#[path = "../fixtures/mod.rs"]
mod fixtures;

use care_schedule::models::layout::Rect;
use care_schedule::models::settings::{LayoutSettings, NightWindow, TextMetrics, TimezonePolicy};
use care_schedule::models::shift::{CareTeamMember, ScheduleRequest};
use care_schedule::services::layout::cell::{max_visible, pack_cell};
use care_schedule::services::layout::classifier::{bucket_for_day, prepare_shifts};
use care_schedule::services::layout::identity::{caregiver_color, PALETTE_V1};
use care_schedule::services::layout::{IdentityResolver, ScheduleLayoutService};
use chrono::{Duration, NaiveDate};
use fixtures::{dates, shifts};
use proptest::prelude::*;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

proptest! {
    /// Property: a caregiver's color depends only on the identifier
    #[test]
    fn prop_color_is_stable_across_registries(
        id in "[a-z][a-z0-9-]{0,15}",
        other_names in proptest::collection::vec("[A-Z][a-z]{2,8}", 0..4),
    ) {
        let color = caregiver_color(Some(&id));
        prop_assert!(PALETTE_V1.contains(&color));
        prop_assert_eq!(caregiver_color(Some(&id)), color);

        let empty: Vec<CareTeamMember> = Vec::new();
        let mut registered = vec![CareTeamMember::new(id.clone(), "Registered Carer")];
        registered.extend(
            other_names
                .iter()
                .enumerate()
                .map(|(i, name)| CareTeamMember::new(format!("other-{}", i), name.clone())),
        );

        let unknown = IdentityResolver::new(&empty).resolve(Some(&id));
        let known = IdentityResolver::new(&registered).resolve(Some(&id));
        prop_assert_eq!(unknown.color, color);
        prop_assert_eq!(known.color, color);
    }

    /// Property: every shift of a day lands in exactly one band of that day
    #[test]
    fn prop_day_night_partition_is_complete(
        specs in proptest::collection::vec((0i64..7, 0u32..24), 0..40),
    ) {
        let start = dates::oct_4_2026();
        let raw: Vec<_> = specs
            .iter()
            .enumerate()
            .map(|(i, (offset, hour))| {
                shifts::at(&format!("s{}", i), start + Duration::days(*offset), *hour, 2, None)
            })
            .collect();
        let members: Vec<CareTeamMember> = Vec::new();
        let resolver = IdentityResolver::new(&members);
        let window = NightWindow::default();
        let prepared = prepare_shifts(&raw, &resolver, TimezonePolicy::AsWritten, window);
        prop_assert_eq!(prepared.skipped, 0);

        for offset in 0..7 {
            let date = start + Duration::days(offset);
            let bucket = bucket_for_day(date, &prepared.shifts);
            let mut ids: Vec<&str> = bucket
                .day_shifts
                .iter()
                .chain(bucket.night_shifts.iter())
                .map(|s| s.id())
                .collect();
            ids.sort_unstable();

            let mut expected: Vec<String> = specs
                .iter()
                .enumerate()
                .filter(|(_, (o, _))| *o == offset)
                .map(|(i, _)| format!("s{}", i))
                .collect();
            expected.sort_unstable();
            prop_assert_eq!(ids, expected);

            prop_assert!(bucket.day_shifts.iter().all(|s| !window.is_night(s.start_hour)));
            prop_assert!(bucket.night_shifts.iter().all(|s| window.is_night(s.start_hour)));
        }
    }

    /// Property: a cell shows min(n, capacity) cards and counts the rest as hidden
    #[test]
    fn prop_overflow_accounts_for_every_shift(
        count in 0usize..12,
        height in 30.0f32..200.0,
    ) {
        let start = dates::oct_4_2026();
        let raw: Vec<_> = (0..count)
            .map(|i| shifts::at(&format!("s{}", i), start, 9, 1, Some("cg-x")))
            .collect();
        let members: Vec<CareTeamMember> = Vec::new();
        let resolver = IdentityResolver::new(&members);
        let prepared = prepare_shifts(
            &raw,
            &resolver,
            TimezonePolicy::AsWritten,
            NightWindow::default(),
        );

        let cell = Rect::new(0.0, 0.0, 110.0, height);
        let packed = pack_cell(&prepared.shifts, cell, false, TextMetrics::CharacterCount);
        let capacity = max_visible(height);

        prop_assert_eq!(packed.visible_shift_ids.len(), count.min(capacity));
        prop_assert_eq!(packed.hidden, count - count.min(capacity));
        let bodies = packed.instructions.iter().filter(|i| i.is_card_body()).count();
        prop_assert_eq!(bodies, count.min(capacity));
        if packed.hidden == 0 {
            prop_assert!(!packed.overflow_drawn);
        }
    }

    /// Property: a 10-day range always yields two week grids on two pages
    #[test]
    fn prop_ten_days_make_two_grids(offset in 0i64..3650) {
        let start = base_date() + Duration::days(offset);
        let request = ScheduleRequest::new(start, dates::range_end(start, 10));
        let document = ScheduleLayoutService::layout(&request, &LayoutSettings::default());

        prop_assert_eq!(document.pages.len(), 2);
        prop_assert_eq!(document.pages[0].week.days[0], start);
        prop_assert_eq!(document.pages[1].week.days[0], start + Duration::days(7));
        prop_assert_eq!(document.pages[1].week.cells.len(), 14);
    }

    /// Property: empty input never produces cards but always produces pages
    #[test]
    fn prop_empty_input_is_safe(offset in 0i64..3650, days in 1i64..60) {
        let start = base_date() + Duration::days(offset);
        let request = ScheduleRequest::new(start, dates::range_end(start, days));
        let document = ScheduleLayoutService::layout(&request, &LayoutSettings::default());

        prop_assert_eq!(document.pages.len() as i64, (days + 6) / 7);
        prop_assert_eq!(document.card_count(), 0);
    }
}

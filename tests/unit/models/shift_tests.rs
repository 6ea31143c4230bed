// Unit tests for the shift and schedule request models
// Covers caregiver assignment, title fallback and boundary validation

use care_schedule::models::shift::{
    CareTeamMember, ScheduleInputError, ScheduleRequest, Shift, UNTITLED_PLAN,
};
use chrono::NaiveDate;
use test_case::test_case;

fn oct(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
}

fn visit(id: &str) -> Shift {
    Shift::new(id, "Visit", "2026-10-05T09:00:00", "2026-10-05T10:00:00")
}

#[test_case(None, None ; "no caregiver")]
#[test_case(Some(""), None ; "empty caregiver")]
#[test_case(Some("  "), None ; "blank caregiver")]
#[test_case(Some("cg-1"), Some("cg-1") ; "plain id")]
#[test_case(Some(" cg-1 "), Some("cg-1") ; "padded id")]
fn test_assigned_caregiver(raw: Option<&str>, expected: Option<&str>) {
    let shift = match raw {
        Some(id) => visit("s").with_caregiver(id),
        None => visit("s"),
    };
    assert_eq!(shift.assigned_caregiver(), expected);
}

#[test_case("", UNTITLED_PLAN ; "empty title")]
#[test_case("   ", UNTITLED_PLAN ; "whitespace title")]
#[test_case("Nana's week", "Nana's week" ; "plain title")]
#[test_case("  Nana  ", "  Nana  " ; "padded title kept verbatim")]
fn test_display_title(title: &str, expected: &str) {
    let request = ScheduleRequest::new(oct(4), oct(10)).with_title(title);
    assert_eq!(request.display_title(), expected);
}

#[test]
fn test_validate_accepts_well_formed_request() {
    let request = ScheduleRequest::new(oct(4), oct(10))
        .with_shifts(vec![visit("a"), visit("b").with_caregiver("cg-1")])
        .with_team(vec![CareTeamMember::new("cg-1", "Rosa Diaz")]);
    assert_eq!(request.validate(), Ok(()));
}

#[test]
fn test_validate_accepts_unreadable_timestamps() {
    let request = ScheduleRequest::new(oct(4), oct(10))
        .with_shifts(vec![Shift::new("a", "Visit", "not a time", "")]);
    assert_eq!(request.validate(), Ok(()));
}

#[test]
fn test_validate_rejects_blank_shift_id() {
    let request =
        ScheduleRequest::new(oct(4), oct(10)).with_shifts(vec![visit("a"), visit(" ")]);
    assert_eq!(request.validate(), Err(ScheduleInputError::EmptyShiftId(1)));
}

#[test]
fn test_validate_rejects_blank_member_id() {
    let request = ScheduleRequest::new(oct(4), oct(10))
        .with_team(vec![CareTeamMember::new("", "Nobody")]);
    assert_eq!(request.validate(), Err(ScheduleInputError::EmptyCaregiverId(0)));
}

#[test]
fn test_shift_deserializes_with_defaults() {
    let shift: Shift = serde_json::from_str(
        r#"{"id": "s1", "start": "2026-10-05T09:00:00", "end": "2026-10-05T10:00:00"}"#,
    )
    .unwrap();
    assert_eq!(shift.title, "");
    assert_eq!(shift.caregiver_id, None);
    assert_eq!(shift.location, None);
}

#[test]
fn test_location_builder() {
    let shift = visit("s").with_location("Kitchen");
    assert_eq!(shift.location.as_deref(), Some("Kitchen"));
}

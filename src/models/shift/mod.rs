// Shift module
// Care shift and care team input records handed to the layout engine

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fallback title used when a request carries an empty plan title
pub const UNTITLED_PLAN: &str = "Untitled Care Plan";

/// A scheduled care interval.
///
/// Timestamps are kept exactly as supplied by the data layer. They are parsed
/// during layout so that a malformed value only drops that one shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub caregiver_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: Option<String>,
}

impl Shift {
    /// Create an unassigned shift
    ///
    /// # Examples
    /// ```
    /// use care_schedule::models::shift::Shift;
    ///
    /// let shift = Shift::new("s1", "Morning care", "2026-10-05T08:00:00", "2026-10-05T12:00:00")
    ///     .with_caregiver("cg-1");
    /// assert_eq!(shift.caregiver_id.as_deref(), Some("cg-1"));
    /// ```
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            start: start.into(),
            end: end.into(),
            caregiver_id: None,
            title: title.into(),
            location: None,
        }
    }

    /// Assign the shift to a caregiver
    pub fn with_caregiver(mut self, caregiver_id: impl Into<String>) -> Self {
        self.caregiver_id = Some(caregiver_id.into());
        self
    }

    /// Set the shift location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Caregiver identifier with empty values treated as unassigned
    pub fn assigned_caregiver(&self) -> Option<&str> {
        self.caregiver_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// A member of the care team registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareTeamMember {
    pub caregiver_id: String,
    pub name: String,
}

impl CareTeamMember {
    pub fn new(caregiver_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            caregiver_id: caregiver_id.into(),
            name: name.into(),
        }
    }
}

/// Everything needed to lay out one schedule document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    #[serde(default)]
    pub plan_title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub shifts: Vec<Shift>,
    #[serde(default)]
    pub team_members: Vec<CareTeamMember>,
    /// Injected "generated on" stamp. Layout never reads the clock itself.
    #[serde(default)]
    pub generated_at: Option<NaiveDateTime>,
}

/// Rejections raised at the boundary before a request reaches layout
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleInputError {
    #[error("shift at position {0} has an empty id")]
    EmptyShiftId(usize),
    #[error("team member at position {0} has an empty caregiver id")]
    EmptyCaregiverId(usize),
}

impl ScheduleRequest {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            plan_title: String::new(),
            start_date,
            end_date,
            shifts: Vec::new(),
            team_members: Vec::new(),
            generated_at: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.plan_title = title.into();
        self
    }

    pub fn with_shifts(mut self, shifts: Vec<Shift>) -> Self {
        self.shifts = shifts;
        self
    }

    pub fn with_team(mut self, team_members: Vec<CareTeamMember>) -> Self {
        self.team_members = team_members;
        self
    }

    pub fn with_generated_at(mut self, generated_at: NaiveDateTime) -> Self {
        self.generated_at = Some(generated_at);
        self
    }

    /// Plan title as rendered: verbatim, or the fallback when blank
    pub fn display_title(&self) -> &str {
        if self.plan_title.trim().is_empty() {
            UNTITLED_PLAN
        } else {
            &self.plan_title
        }
    }

    /// Check the record shapes the engine relies on.
    ///
    /// Timestamps are not checked here; layout skips shifts it cannot read.
    pub fn validate(&self) -> Result<(), ScheduleInputError> {
        if let Some(index) = self.shifts.iter().position(|s| s.id.trim().is_empty()) {
            return Err(ScheduleInputError::EmptyShiftId(index));
        }
        if let Some(index) = self
            .team_members
            .iter()
            .position(|m| m.caregiver_id.trim().is_empty())
        {
            return Err(ScheduleInputError::EmptyCaregiverId(index));
        }
        Ok(())
    }
}

// Settings module
// Layout configuration loaded from TOML, with defaults for every field

use chrono::{DateTime, FixedOffset, NaiveDateTime, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Page dimensions in PDF points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub const A4_LANDSCAPE: PageSize = PageSize {
        width: 841.89,
        height: 595.28,
    };
    pub const LETTER_LANDSCAPE: PageSize = PageSize {
        width: 792.0,
        height: 612.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4_LANDSCAPE
    }
}

/// How ranges longer than a week are cut into weeks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum WeekAnchor {
    /// Consecutive 7-day spans beginning on the first requested day
    #[default]
    RangeStart,
    /// Calendar weeks beginning on a fixed weekday
    Weekday(Weekday),
}

impl TryFrom<String> for WeekAnchor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("range-start") {
            return Ok(Self::RangeStart);
        }
        trimmed
            .parse::<Weekday>()
            .map(Self::Weekday)
            .map_err(|_| format!("unknown week anchor '{}'", value))
    }
}

impl From<WeekAnchor> for String {
    fn from(anchor: WeekAnchor) -> Self {
        match anchor {
            WeekAnchor::RangeStart => "range-start".to_string(),
            WeekAnchor::Weekday(day) => day.to_string(),
        }
    }
}

/// Which wall clock decides a shift's calendar day and night classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum TimezonePolicy {
    /// Read the wall-clock time exactly as written in each timestamp
    #[default]
    AsWritten,
    /// Convert offset timestamps into a fixed business timezone
    Named(Tz),
}

impl TimezonePolicy {
    /// Wall-clock time of an offset timestamp under this policy
    pub fn wall_clock(&self, timestamp: &DateTime<FixedOffset>) -> NaiveDateTime {
        match self {
            Self::AsWritten => timestamp.naive_local(),
            Self::Named(tz) => timestamp.with_timezone(tz).naive_local(),
        }
    }
}

impl TryFrom<String> for TimezonePolicy {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("as-written") {
            return Ok(Self::AsWritten);
        }
        trimmed
            .parse::<Tz>()
            .map(Self::Named)
            .map_err(|e| format!("unknown timezone '{}': {}", value, e))
    }
}

impl From<TimezonePolicy> for String {
    fn from(policy: TimezonePolicy) -> Self {
        match policy {
            TimezonePolicy::AsWritten => "as-written".to_string(),
            TimezonePolicy::Named(tz) => tz.name().to_string(),
        }
    }
}

/// Text width measurement used for truncation and alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TextMetrics {
    /// Advance widths of the builtin Helvetica faces
    #[default]
    Helvetica,
    /// No measurement; only character-count caps apply
    CharacterCount,
}

/// Start-hour window that counts as a night shift
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NightWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl NightWindow {
    /// Hours are reduced modulo 24
    pub fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start_hour: start_hour % 24,
            end_hour: end_hour % 24,
        }
    }

    /// A start hour is night when it is at or after the evening boundary or
    /// before the morning boundary.
    pub fn is_night(&self, hour: u32) -> bool {
        hour >= self.start_hour || hour < self.end_hour
    }
}

impl Default for NightWindow {
    fn default() -> Self {
        Self::new(18, 6)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub week_anchor: WeekAnchor,
    pub timezone: TimezonePolicy,
    pub night_start_hour: u32,
    pub night_end_hour: u32,
    pub text_metrics: TextMetrics,
    /// Kept last so it serializes as a trailing TOML table
    pub page_size: PageSize,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            week_anchor: WeekAnchor::default(),
            timezone: TimezonePolicy::default(),
            night_start_hour: 18,
            night_end_hour: 6,
            text_metrics: TextMetrics::default(),
            page_size: PageSize::default(),
        }
    }
}

impl LayoutSettings {
    pub fn night_window(&self) -> NightWindow {
        NightWindow::new(self.night_start_hour, self.night_end_hour)
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), String> {
        if self.night_start_hour > 23 {
            return Err("Night start hour must be between 0 and 23".to_string());
        }
        if self.night_end_hour > 23 {
            return Err("Night end hour must be between 0 and 23".to_string());
        }
        if self.night_end_hour > self.night_start_hour {
            return Err("Night end hour must not be later than night start hour".to_string());
        }
        let PageSize { width, height } = self.page_size;
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err("Page size must be positive".to_string());
        }
        Ok(())
    }
}

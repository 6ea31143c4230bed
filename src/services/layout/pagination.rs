//! Splits the requested range into weeks and composes one page per week.

use chrono::NaiveDate;

use crate::models::layout::{
    DrawInstruction, FontWeight, Page, Point, Rgb, ScheduleDocument, TextAlign, WeekSummary,
};
use crate::models::settings::LayoutSettings;
use crate::models::shift::ScheduleRequest;
use crate::utils::date::{last_full_week_start, week_days, week_starts};

use super::classifier::{prepare_shifts, GridShift};
use super::geometry::PageGeometry;
use super::identity::IdentityResolver;
use super::text::fit_text;
use super::week_grid::{build_week_grid, GridContext};

const TITLE_SIZE: f32 = 18.0;
const SUBTITLE_SIZE: f32 = 10.0;
const SUMMARY_SIZE: f32 = 8.0;
const FOOTER_SIZE: f32 = 7.0;
const NOTE_TITLE_SIZE: f32 = 8.0;
const NOTE_SIZE: f32 = 7.0;
/// Space the "About this schedule" note needs below the grid
pub const ABOUT_NOTE_HEIGHT: f32 = 28.0;

const TITLE_COLOR: Rgb = Rgb::new(17, 24, 39);
const MUTED_TEXT: Rgb = Rgb::new(107, 114, 128);
const RULE_COLOR: Rgb = Rgb::new(229, 231, 235);

pub const ABOUT_TITLE: &str = "About this schedule";
const NO_SHIFTS_SUMMARY: &str = "No shifts scheduled in this period";

/// Shift count for one caregiver across the whole requested range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaregiverTally {
    pub name: String,
    pub shifts: usize,
}

/// Per-caregiver totals in order of first appearance
pub fn caregiver_summary(
    shifts: &[GridShift<'_>],
    range: (NaiveDate, NaiveDate),
) -> Vec<CaregiverTally> {
    let mut keys: Vec<Option<&str>> = Vec::new();
    let mut tallies: Vec<CaregiverTally> = Vec::new();
    for shift in shifts
        .iter()
        .filter(|s| s.date >= range.0 && s.date <= range.1)
    {
        let key = shift.shift.assigned_caregiver();
        match keys.iter().position(|k| *k == key) {
            Some(index) => tallies[index].shifts += 1,
            None => {
                keys.push(key);
                tallies.push(CaregiverTally {
                    name: shift.caregiver.name.clone(),
                    shifts: 1,
                });
            }
        }
    }
    tallies
}

pub fn summary_line(tallies: &[CaregiverTally]) -> String {
    if tallies.is_empty() {
        return NO_SHIFTS_SUMMARY.to_string();
    }
    let parts: Vec<String> = tallies
        .iter()
        .map(|t| format!("{} ({})", t.name, t.shifts))
        .collect();
    format!("Shift totals: {}", parts.join(", "))
}

fn range_subtitle(start: NaiveDate, end: NaiveDate) -> String {
    if start == end {
        start.format("%A, %B %-d, %Y").to_string()
    } else {
        format!(
            "{} - {}",
            start.format("%B %-d, %Y"),
            end.format("%B %-d, %Y")
        )
    }
}

/// Pull a range back so every week it covers still has seven calendar days
fn clamp_to_full_weeks(start: NaiveDate, end: NaiveDate) -> (NaiveDate, NaiveDate) {
    let limit = last_full_week_start();
    if end <= limit {
        return (start, end);
    }
    log::warn!(
        "Range {} to {} runs past the end of the calendar; stopping at the week from {}",
        start,
        end,
        limit
    );
    (start.min(limit), limit)
}

/// Service that turns a schedule request into printable pages
pub struct ScheduleLayoutService;

impl ScheduleLayoutService {
    /// Lay out the whole document.
    ///
    /// Never fails: unreadable shifts are skipped and counted, a reversed
    /// range collapses to its start day, and empty input yields one page with
    /// an empty grid.
    pub fn layout(request: &ScheduleRequest, settings: &LayoutSettings) -> ScheduleDocument {
        let start = request.start_date;
        let end = if request.end_date < start {
            log::warn!(
                "End date {} precedes start date {}; rendering {} only",
                request.end_date,
                start,
                start
            );
            start
        } else {
            request.end_date
        };
        let (start, end) = clamp_to_full_weeks(start, end);
        let title = request.display_title().to_string();

        let resolver = IdentityResolver::new(&request.team_members);
        let prepared = prepare_shifts(
            &request.shifts,
            &resolver,
            settings.timezone,
            settings.night_window(),
        );
        let summary = summary_line(&caregiver_summary(&prepared.shifts, (start, end)));

        let weeks = week_starts(start, end, settings.week_anchor);
        let page_count = weeks.len();
        let geometry = PageGeometry::compute(
            settings.page_size.width,
            settings.page_size.height,
            page_count > 1,
        );
        let context = GridContext {
            geometry: &geometry,
            range: (start, end),
            night_window: settings.night_window(),
            metrics: settings.text_metrics,
        };

        log::info!(
            "Laying out '{}' from {} to {}: {} shifts, {} page(s)",
            title,
            start,
            end,
            prepared.shifts.len(),
            page_count
        );

        let pages = weeks
            .iter()
            .enumerate()
            .map(|(index, &week_start)| {
                let page = PageComposer {
                    title: &title,
                    subtitle: range_subtitle(start, end),
                    summary: &summary,
                    generated_at: request.generated_at.map(|stamp| {
                        format!("Generated on {}", stamp.format("%B %-d, %Y at %H:%M"))
                    }),
                    geometry: &geometry,
                    settings,
                    number: index + 1,
                    page_count,
                };
                page.compose(week_start, &prepared.shifts, &context)
            })
            .collect();

        if prepared.skipped > 0 {
            log::debug!("{} shift(s) skipped for unreadable timestamps", prepared.skipped);
        }

        ScheduleDocument {
            title,
            pages,
            skipped_shifts: prepared.skipped,
        }
    }
}

struct PageComposer<'p> {
    title: &'p str,
    subtitle: String,
    summary: &'p str,
    generated_at: Option<String>,
    geometry: &'p PageGeometry,
    settings: &'p LayoutSettings,
    number: usize,
    page_count: usize,
}

impl PageComposer<'_> {
    fn compose(
        self,
        week_start: NaiveDate,
        shifts: &[GridShift<'_>],
        context: &GridContext<'_>,
    ) -> Page {
        let geometry = self.geometry;
        let mut instructions = self.header();

        let days = week_days(week_start);
        let grid = build_week_grid(&days, shifts, context, geometry.header_height);
        log::debug!(
            "Page {}: week of {} with {} card(s)",
            self.number,
            week_start,
            grid.cells.iter().map(|c| c.visible_shift_ids.len()).sum::<usize>()
        );
        instructions.extend(grid.instructions);

        if self.number == self.page_count {
            if grid.next_cursor_y + ABOUT_NOTE_HEIGHT <= geometry.footer_top() {
                instructions.extend(self.about_note(grid.next_cursor_y));
            } else {
                log::debug!("About note does not fit on page {}; omitted", self.number);
            }
        }

        instructions.extend(self.footer());

        Page {
            number: self.number,
            width: geometry.page_width,
            height: geometry.page_height,
            instructions,
            week: WeekSummary {
                days,
                cells: grid.cells,
            },
        }
    }

    fn header(&self) -> Vec<DrawInstruction> {
        let geometry = self.geometry;
        let left = geometry.margin;
        let right = geometry.page_width - geometry.margin;
        let top = geometry.margin;
        let metrics = self.settings.text_metrics;
        let mut header = Vec::with_capacity(5);

        let title = fit_text(
            self.title,
            usize::MAX,
            geometry.content_width(),
            TITLE_SIZE,
            FontWeight::Bold,
            metrics,
        );
        if !title.is_empty() {
            header.push(DrawInstruction::text(
                title,
                Point::new(left, top + 16.0),
                TITLE_SIZE,
                TITLE_COLOR,
                TextAlign::Left,
                FontWeight::Bold,
            ));
        }
        header.push(DrawInstruction::text(
            self.subtitle.clone(),
            Point::new(left, top + 30.0),
            SUBTITLE_SIZE,
            MUTED_TEXT,
            TextAlign::Left,
            FontWeight::Regular,
        ));
        let summary = fit_text(
            self.summary,
            usize::MAX,
            geometry.content_width(),
            SUMMARY_SIZE,
            FontWeight::Regular,
            metrics,
        );
        if !summary.is_empty() {
            header.push(DrawInstruction::text(
                summary,
                Point::new(left, top + 43.0),
                SUMMARY_SIZE,
                MUTED_TEXT,
                TextAlign::Left,
                FontWeight::Regular,
            ));
        }
        let rule_y = geometry.header_height - 6.0;
        header.push(DrawInstruction::Line {
            from: Point::new(left, rule_y),
            to: Point::new(right, rule_y),
            color: RULE_COLOR,
            line_width: 0.75,
        });
        header
    }

    fn about_note(&self, cursor_y: f32) -> Vec<DrawInstruction> {
        let left = self.geometry.margin;
        let window = self.settings.night_window();
        let description = format!(
            "Shifts are placed on the day they start. Starts from {:02}:00 to {:02}:59 \
             are day shifts, all others are night shifts. Card colors identify caregivers; \
             gray cards are unassigned.",
            window.end_hour,
            (window.start_hour + 23) % 24
        );
        let description = fit_text(
            &description,
            usize::MAX,
            self.geometry.content_width(),
            NOTE_SIZE,
            FontWeight::Regular,
            self.settings.text_metrics,
        );
        vec![
            DrawInstruction::text(
                ABOUT_TITLE,
                Point::new(left, cursor_y + 14.0),
                NOTE_TITLE_SIZE,
                TITLE_COLOR,
                TextAlign::Left,
                FontWeight::Bold,
            ),
            DrawInstruction::text(
                description,
                Point::new(left, cursor_y + 24.0),
                NOTE_SIZE,
                MUTED_TEXT,
                TextAlign::Left,
                FontWeight::Regular,
            ),
        ]
    }

    fn footer(&self) -> Vec<DrawInstruction> {
        let geometry = self.geometry;
        let baseline = geometry.page_height - geometry.margin;
        let mut footer = Vec::with_capacity(2);
        if let Some(stamp) = &self.generated_at {
            footer.push(DrawInstruction::text(
                stamp.clone(),
                Point::new(geometry.margin, baseline),
                FOOTER_SIZE,
                MUTED_TEXT,
                TextAlign::Left,
                FontWeight::Regular,
            ));
        }
        if self.page_count > 1 {
            footer.push(DrawInstruction::text(
                format!("Page {} of {}", self.number, self.page_count),
                Point::new(geometry.page_width - geometry.margin, baseline),
                FOOTER_SIZE,
                MUTED_TEXT,
                TextAlign::Right,
                FontWeight::Regular,
            ));
        }
        footer
    }
}

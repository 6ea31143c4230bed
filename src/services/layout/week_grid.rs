//! Lays out one week: day header row, two labelled bands and 14 cells.

use chrono::{Datelike, NaiveDate};

use crate::models::layout::{
    Band, CellSummary, DrawInstruction, FontWeight, Point, Rect, Rgb, TextAlign,
};
use crate::models::settings::{NightWindow, TextMetrics};
use crate::utils::date::{hour_label, is_weekend};

use super::cell::pack_cell;
use super::classifier::{bucket_for_day, DayBucket, GridShift};
use super::geometry::{PageGeometry, BAND_LABEL_HEIGHT, DAY_HEADER_HEIGHT};

const HEADER_BACKGROUND: Rgb = Rgb::new(243, 244, 246);
const DAY_NAME_COLOR: Rgb = Rgb::new(75, 85, 99);
const DAY_NUMBER_COLOR: Rgb = Rgb::new(17, 24, 39);
const DAY_BAND_BACKGROUND: Rgb = Rgb::new(254, 243, 199);
const DAY_BAND_TEXT: Rgb = Rgb::new(146, 64, 14);
const NIGHT_BAND_BACKGROUND: Rgb = Rgb::new(224, 231, 255);
const NIGHT_BAND_TEXT: Rgb = Rgb::new(55, 48, 163);
const GRID_LINE: Rgb = Rgb::new(209, 213, 219);
const GRID_LINE_WIDTH: f32 = 0.5;

/// Everything the grid builder produced for one week
#[derive(Debug, Clone, PartialEq)]
pub struct WeekGrid {
    pub instructions: Vec<DrawInstruction>,
    pub cells: Vec<CellSummary>,
    /// First y coordinate below the grid
    pub next_cursor_y: f32,
}

/// Inputs shared by every week of one document
#[derive(Debug, Clone, Copy)]
pub struct GridContext<'g> {
    pub geometry: &'g PageGeometry,
    /// Inclusive requested range; days outside it render empty
    pub range: (NaiveDate, NaiveDate),
    pub night_window: NightWindow,
    pub metrics: TextMetrics,
}

pub fn band_label(band: Band, window: NightWindow) -> String {
    match band {
        Band::Day => format!(
            "Day Shift ({} - {})",
            hour_label(window.end_hour),
            hour_label(window.start_hour)
        ),
        Band::Night => format!(
            "Night Shift ({} - {})",
            hour_label(window.start_hour),
            hour_label(window.end_hour)
        ),
    }
}

pub fn build_week_grid(
    days: &[NaiveDate],
    shifts: &[GridShift<'_>],
    context: &GridContext<'_>,
    top_y: f32,
) -> WeekGrid {
    let geometry = context.geometry;
    let left = geometry.margin;
    let column = geometry.column_width;
    let width = geometry.content_width();
    let (range_start, range_end) = context.range;

    let buckets: Vec<DayBucket<'_>> = days
        .iter()
        .map(|&date| {
            if date < range_start || date > range_end {
                bucket_for_day(date, &[])
            } else {
                bucket_for_day(date, shifts)
            }
        })
        .collect();

    let mut instructions = Vec::new();
    let mut cells = Vec::with_capacity(days.len() * 2);

    instructions.push(DrawInstruction::FillRect {
        rect: Rect::new(left, top_y, width, DAY_HEADER_HEIGHT),
        color: HEADER_BACKGROUND,
    });
    for (index, date) in days.iter().enumerate() {
        let center_x = left + (index as f32 + 0.5) * column;
        instructions.push(DrawInstruction::text(
            date.format("%a").to_string(),
            Point::new(center_x, top_y + 10.0),
            8.0,
            DAY_NAME_COLOR,
            TextAlign::Center,
            FontWeight::Bold,
        ));
        instructions.push(DrawInstruction::text(
            date.day().to_string(),
            Point::new(center_x, top_y + 21.0),
            11.0,
            DAY_NUMBER_COLOR,
            TextAlign::Center,
            FontWeight::Bold,
        ));
    }

    let mut y = top_y + DAY_HEADER_HEIGHT;
    let mut band_tops = Vec::with_capacity(2);
    for band in [Band::Day, Band::Night] {
        band_tops.push(y);
        let (background, text_color) = match band {
            Band::Day => (DAY_BAND_BACKGROUND, DAY_BAND_TEXT),
            Band::Night => (NIGHT_BAND_BACKGROUND, NIGHT_BAND_TEXT),
        };
        instructions.push(DrawInstruction::FillRect {
            rect: Rect::new(left, y, width, BAND_LABEL_HEIGHT),
            color: background,
        });
        instructions.push(DrawInstruction::text(
            band_label(band, context.night_window),
            Point::new(left + 4.0, y + 10.0),
            7.5,
            text_color,
            TextAlign::Left,
            FontWeight::Bold,
        ));
        y += BAND_LABEL_HEIGHT;

        for (index, bucket) in buckets.iter().enumerate() {
            let rect = Rect::new(left + index as f32 * column, y, column, geometry.cell_height);
            let shifts = match band {
                Band::Day => &bucket.day_shifts,
                Band::Night => &bucket.night_shifts,
            };
            let packed = pack_cell(shifts, rect, is_weekend(bucket.date), context.metrics);
            instructions.extend(packed.instructions);
            cells.push(CellSummary {
                date: bucket.date,
                band,
                rect,
                visible_shift_ids: packed.visible_shift_ids,
                hidden: packed.hidden,
                overflow_drawn: packed.overflow_drawn,
            });
        }
        y += geometry.cell_height;
    }
    let bottom = y;

    for index in 1..days.len() {
        let x = left + index as f32 * column;
        instructions.push(DrawInstruction::Line {
            from: Point::new(x, top_y),
            to: Point::new(x, bottom),
            color: GRID_LINE,
            line_width: GRID_LINE_WIDTH,
        });
    }
    for band_top in band_tops {
        instructions.push(DrawInstruction::Line {
            from: Point::new(left, band_top),
            to: Point::new(left + width, band_top),
            color: GRID_LINE,
            line_width: GRID_LINE_WIDTH,
        });
    }
    instructions.push(DrawInstruction::StrokeRect {
        rect: Rect::new(left, top_y, width, bottom - top_y),
        color: GRID_LINE,
        line_width: GRID_LINE_WIDTH,
    });

    WeekGrid {
        instructions,
        cells,
        next_cursor_y: bottom,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::{PageSize, TimezonePolicy};
    use crate::models::shift::{CareTeamMember, Shift};
    use crate::services::layout::classifier::prepare_shifts;
    use crate::services::layout::identity::IdentityResolver;
    use crate::utils::date::week_days;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn geometry() -> PageGeometry {
        let size = PageSize::A4_LANDSCAPE;
        PageGeometry::compute(size.width, size.height, false)
    }

    #[test]
    fn test_band_labels_follow_night_window() {
        let window = NightWindow::default();
        assert_eq!(band_label(Band::Day, window), "Day Shift (6 AM - 6 PM)");
        assert_eq!(band_label(Band::Night, window), "Night Shift (6 PM - 6 AM)");
        let custom = NightWindow::new(20, 7);
        assert_eq!(band_label(Band::Day, custom), "Day Shift (7 AM - 8 PM)");
    }

    #[test]
    fn test_grid_has_fourteen_cells_and_returns_cursor() {
        let geometry = geometry();
        let days = week_days(date(4));
        let context = GridContext {
            geometry: &geometry,
            range: (date(4), date(10)),
            night_window: NightWindow::default(),
            metrics: TextMetrics::Helvetica,
        };
        let grid = build_week_grid(&days, &[], &context, 100.0);

        assert_eq!(grid.cells.len(), 14);
        assert!(grid.cells.iter().all(CellSummary::is_empty));
        assert_eq!(grid.next_cursor_y, 100.0 + geometry.grid_height());
        let placeholders = grid
            .instructions
            .iter()
            .filter(|i| i.as_text() == Some("-"))
            .count();
        assert_eq!(placeholders, 14);
    }

    #[test]
    fn test_days_outside_range_render_empty() {
        let geometry = geometry();
        let shifts = vec![
            Shift::new("in", "Visit", "2026-10-05T09:00:00", "2026-10-05T10:00:00"),
            Shift::new("out", "Visit", "2026-10-09T09:00:00", "2026-10-09T10:00:00"),
        ];
        let members: Vec<CareTeamMember> = Vec::new();
        let resolver = IdentityResolver::new(&members);
        let prepared = prepare_shifts(
            &shifts,
            &resolver,
            TimezonePolicy::AsWritten,
            NightWindow::default(),
        );
        let context = GridContext {
            geometry: &geometry,
            range: (date(4), date(6)),
            night_window: NightWindow::default(),
            metrics: TextMetrics::Helvetica,
        };
        let grid = build_week_grid(&week_days(date(4)), &prepared.shifts, &context, 90.0);

        let day5 = grid.cells.iter().find(|c| c.date == date(5) && c.band == Band::Day).unwrap();
        assert_eq!(day5.visible_shift_ids, vec!["in"]);
        let day9 = grid.cells.iter().find(|c| c.date == date(9) && c.band == Band::Day).unwrap();
        assert!(day9.is_empty());
    }

    #[test]
    fn test_cells_tile_the_content_width() {
        let geometry = geometry();
        let context = GridContext {
            geometry: &geometry,
            range: (date(4), date(10)),
            night_window: NightWindow::default(),
            metrics: TextMetrics::Helvetica,
        };
        let grid = build_week_grid(&week_days(date(4)), &[], &context, 90.0);
        let last = grid.cells.iter().rev().find(|c| c.band == Band::Night).unwrap();
        assert!(last.rect.right() <= geometry.page_width - geometry.margin + 0.01);
    }
}

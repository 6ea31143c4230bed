//! Page geometry derived from page size.

use serde::{Deserialize, Serialize};

/// Height of the row carrying day names and numbers
pub const DAY_HEADER_HEIGHT: f32 = 25.0;
/// Height of the "Day Shift" / "Night Shift" label strip above each band
pub const BAND_LABEL_HEIGHT: f32 = 14.0;
/// Extra footer space for the "Page X of Y" line
pub const PAGE_NUMBER_STRIP: f32 = 12.0;

const MARGIN_RATIO: f32 = 0.03;
const MARGIN_RANGE: (f32, f32) = (15.0, 25.0);
const HEADER_RATIO: f32 = 0.15;
const HEADER_RANGE: (f32, f32) = (70.0, 90.0);
const FOOTER_RATIO: f32 = 0.08;
const FOOTER_RANGE: (f32, f32) = (30.0, 50.0);
const MAX_CELL_HEIGHT: f32 = 70.0;
const MIN_CELL_HEIGHT: f32 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub header_height: f32,
    pub footer_height: f32,
    pub column_width: f32,
    pub cell_height: f32,
}

impl PageGeometry {
    /// Derive margins, reservations and grid dimensions for one render.
    ///
    /// Never fails: non-finite or negative sizes are treated as zero and every
    /// dimension is clamped, so tiny pages get a cramped but usable grid.
    pub fn compute(page_width: f32, page_height: f32, multi_page: bool) -> Self {
        let width = sanitize(page_width);
        let height = sanitize(page_height);

        let margin = (width * MARGIN_RATIO).clamp(MARGIN_RANGE.0, MARGIN_RANGE.1);
        let header_height = (height * HEADER_RATIO).clamp(HEADER_RANGE.0, HEADER_RANGE.1);
        let strip = if multi_page { PAGE_NUMBER_STRIP } else { 0.0 };
        let footer_height =
            (height * FOOTER_RATIO + strip).clamp(FOOTER_RANGE.0, FOOTER_RANGE.1);

        let column_width = ((width - 2.0 * margin) / 7.0).max(0.0);

        let fixed = DAY_HEADER_HEIGHT + 2.0 * BAND_LABEL_HEIGHT;
        let available = height - header_height - footer_height;
        let cell_height = ((available - fixed) / 2.0)
            .min(MAX_CELL_HEIGHT)
            .max(MIN_CELL_HEIGHT);

        Self {
            page_width: width,
            page_height: height,
            margin,
            header_height,
            footer_height,
            column_width,
            cell_height,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.column_width * 7.0
    }

    /// Total height of the week grid including header row and band labels
    pub fn grid_height(&self) -> f32 {
        DAY_HEADER_HEIGHT + 2.0 * (BAND_LABEL_HEIGHT + self.cell_height)
    }

    /// Y coordinate where the footer reservation begins
    pub fn footer_top(&self) -> f32 {
        self.page_height - self.footer_height
    }
}

fn sanitize(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

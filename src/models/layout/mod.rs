// Layout module
// Abstract drawing instructions and the page structures that carry them

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

mod color;

pub use color::Rgb;

/// A position in page space. Origin is the top-left corner, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Shrink on every side, never producing a negative size
    pub fn inset(&self, amount: f32) -> Rect {
        Rect::new(
            self.x + amount,
            self.y + amount,
            (self.width - 2.0 * amount).max(0.0),
            (self.height - 2.0 * amount).max(0.0),
        )
    }

    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right() + f32::EPSILON
            && other.bottom() <= self.bottom() + f32::EPSILON
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// One backend-neutral drawing call.
///
/// Text `origin` is the baseline point; `align` says whether it is the left
/// edge, centre or right edge of the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawInstruction {
    FillRect {
        rect: Rect,
        color: Rgb,
    },
    StrokeRect {
        rect: Rect,
        color: Rgb,
        line_width: f32,
    },
    RoundedRect {
        rect: Rect,
        radius: f32,
        fill: Option<Rgb>,
        stroke: Option<Rgb>,
        line_width: f32,
    },
    Circle {
        center: Point,
        radius: f32,
        fill: Rgb,
    },
    Line {
        from: Point,
        to: Point,
        color: Rgb,
        line_width: f32,
    },
    Text {
        text: String,
        origin: Point,
        size: f32,
        color: Rgb,
        align: TextAlign,
        weight: FontWeight,
    },
}

impl DrawInstruction {
    pub fn text(
        text: impl Into<String>,
        origin: Point,
        size: f32,
        color: Rgb,
        align: TextAlign,
        weight: FontWeight,
    ) -> Self {
        Self::Text {
            text: text.into(),
            origin,
            size,
            color,
            align,
            weight,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    /// True for the filled rounded rect that forms the body of a shift card
    pub fn is_card_body(&self) -> bool {
        matches!(self, Self::RoundedRect { fill: Some(_), .. })
    }
}

/// Which half of a day column a cell belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    Day,
    Night,
}

/// What ended up inside one grid cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellSummary {
    pub date: NaiveDate,
    pub band: Band,
    pub rect: Rect,
    pub visible_shift_ids: Vec<String>,
    pub hidden: usize,
    pub overflow_drawn: bool,
}

impl CellSummary {
    pub fn is_empty(&self) -> bool {
        self.visible_shift_ids.is_empty() && self.hidden == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSummary {
    pub days: Vec<NaiveDate>,
    pub cells: Vec<CellSummary>,
}

impl WeekSummary {
    pub fn cell(&self, date: NaiveDate, band: Band) -> Option<&CellSummary> {
        self.cells.iter().find(|c| c.date == date && c.band == band)
    }

    pub fn card_count(&self) -> usize {
        self.cells.iter().map(|c| c.visible_shift_ids.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number
    pub number: usize,
    pub width: f32,
    pub height: f32,
    pub instructions: Vec<DrawInstruction>,
    pub week: WeekSummary,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.instructions.iter().filter_map(DrawInstruction::as_text)
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t == needle)
    }
}

/// Result of one layout call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDocument {
    pub title: String,
    pub pages: Vec<Page>,
    /// Shifts left out because their timestamps could not be read
    pub skipped_shifts: usize,
}

impl ScheduleDocument {
    pub fn card_count(&self) -> usize {
        self.pages.iter().map(|p| p.week.card_count()).sum()
    }
}

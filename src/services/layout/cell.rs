//! Packs the shifts of one (day, band) cell into cards.

use crate::models::layout::{DrawInstruction, FontWeight, Point, Rect, Rgb, TextAlign};
use crate::models::settings::TextMetrics;

use super::classifier::GridShift;
use super::text::fit_text;

pub const CELL_PADDING: f32 = 4.0;
pub const CARD_HEIGHT: f32 = 20.0;
pub const CARD_SPACING: f32 = 2.0;
pub const OVERFLOW_LINE_HEIGHT: f32 = 7.0;
pub const MAX_TITLE_CHARS: usize = 25;
pub const MAX_NAME_CHARS: usize = 15;

const CARD_RADIUS: f32 = 2.5;
const CARD_BORDER_DARKEN: u8 = 30;
const BADGE_RADIUS: f32 = 4.5;
const BADGE_INSET: f32 = 3.0;
const TEXT_GAP: f32 = 3.0;
const TITLE_SIZE: f32 = 5.5;
const DETAIL_SIZE: f32 = 4.5;
const INITIALS_SIZE: f32 = 4.0;
const OVERFLOW_SIZE: f32 = 5.5;
const PLACEHOLDER_SIZE: f32 = 10.0;

pub const WEEKDAY_BACKGROUND: Rgb = Rgb::WHITE;
pub const WEEKEND_BACKGROUND: Rgb = Rgb::new(243, 244, 246);
const PLACEHOLDER_COLOR: Rgb = Rgb::new(209, 213, 219);
const OVERFLOW_COLOR: Rgb = Rgb::new(107, 114, 128);
pub const PLACEHOLDER_GLYPH: &str = "-";

/// Instructions for one cell plus what made it in
#[derive(Debug, Clone, PartialEq)]
pub struct PackedCell {
    pub instructions: Vec<DrawInstruction>,
    pub visible_shift_ids: Vec<String>,
    pub hidden: usize,
    pub overflow_drawn: bool,
}

/// Number of cards that fit in a cell of the given height
pub fn max_visible(cell_height: f32) -> usize {
    let inner = (cell_height - 2.0 * CELL_PADDING).max(0.0);
    (inner / (CARD_HEIGHT + CARD_SPACING)).floor() as usize
}

pub fn overflow_label(hidden: usize) -> String {
    format!("+{} more", hidden)
}

pub fn pack_cell(
    shifts: &[GridShift<'_>],
    cell: Rect,
    weekend: bool,
    metrics: TextMetrics,
) -> PackedCell {
    let background = if weekend {
        WEEKEND_BACKGROUND
    } else {
        WEEKDAY_BACKGROUND
    };
    let mut instructions = vec![DrawInstruction::FillRect {
        rect: cell,
        color: background,
    }];

    if shifts.is_empty() {
        let center = cell.center();
        instructions.push(DrawInstruction::text(
            PLACEHOLDER_GLYPH,
            Point::new(center.x, center.y + PLACEHOLDER_SIZE * 0.3),
            PLACEHOLDER_SIZE,
            PLACEHOLDER_COLOR,
            TextAlign::Center,
            FontWeight::Regular,
        ));
        return PackedCell {
            instructions,
            visible_shift_ids: Vec::new(),
            hidden: 0,
            overflow_drawn: false,
        };
    }

    let inner = cell.inset(CELL_PADDING);
    let capacity = max_visible(cell.height);
    let visible = capacity.min(shifts.len());
    let step = CARD_HEIGHT + CARD_SPACING;

    let mut visible_shift_ids = Vec::with_capacity(visible);
    for (index, shift) in shifts.iter().take(visible).enumerate() {
        let card = Rect::new(inner.x, inner.y + index as f32 * step, inner.width, CARD_HEIGHT);
        draw_card(&mut instructions, shift, card, metrics);
        visible_shift_ids.push(shift.id().to_string());
    }

    let hidden = shifts.len() - visible;
    let mut overflow_drawn = false;
    if hidden > 0 {
        let top = inner.y + visible as f32 * step;
        if top + OVERFLOW_LINE_HEIGHT <= cell.bottom() {
            instructions.push(DrawInstruction::text(
                overflow_label(hidden),
                Point::new(inner.x + 2.0, top + OVERFLOW_SIZE),
                OVERFLOW_SIZE,
                OVERFLOW_COLOR,
                TextAlign::Left,
                FontWeight::Bold,
            ));
            overflow_drawn = true;
        } else {
            log::debug!(
                "No room for overflow line in cell at ({:.1}, {:.1}); {} shifts not shown",
                cell.x,
                cell.y,
                hidden
            );
        }
    }

    PackedCell {
        instructions,
        visible_shift_ids,
        hidden,
        overflow_drawn,
    }
}

fn draw_card(
    instructions: &mut Vec<DrawInstruction>,
    shift: &GridShift<'_>,
    card: Rect,
    metrics: TextMetrics,
) {
    let color = shift.caregiver.color;
    let text_color = color.readable_text();
    let muted = if text_color == Rgb::WHITE {
        color.lighten(0.7)
    } else {
        color.darken_by(90)
    };

    instructions.push(DrawInstruction::RoundedRect {
        rect: card,
        radius: CARD_RADIUS,
        fill: Some(color),
        stroke: None,
        line_width: 0.0,
    });
    instructions.push(DrawInstruction::RoundedRect {
        rect: card,
        radius: CARD_RADIUS,
        fill: None,
        stroke: Some(color.darken_by(CARD_BORDER_DARKEN)),
        line_width: 0.5,
    });

    let badge_center = Point::new(
        card.x + BADGE_INSET + BADGE_RADIUS,
        card.y + BADGE_INSET + BADGE_RADIUS,
    );
    instructions.push(DrawInstruction::Circle {
        center: badge_center,
        radius: BADGE_RADIUS,
        fill: Rgb::WHITE,
    });
    instructions.push(DrawInstruction::text(
        shift.caregiver.initials.clone(),
        Point::new(badge_center.x, badge_center.y + INITIALS_SIZE * 0.35),
        INITIALS_SIZE,
        color,
        TextAlign::Center,
        FontWeight::Bold,
    ));

    let text_x = card.x + BADGE_INSET + 2.0 * BADGE_RADIUS + TEXT_GAP;
    let text_width = (card.right() - TEXT_GAP - text_x).max(0.0);

    let lines = [
        (shift.title(), MAX_TITLE_CHARS, 6.5, TITLE_SIZE, text_color, FontWeight::Bold),
        (shift.time_range.as_str(), usize::MAX, 12.0, DETAIL_SIZE, muted, FontWeight::Regular),
        (
            shift.caregiver.name.as_str(),
            MAX_NAME_CHARS,
            17.5,
            DETAIL_SIZE,
            muted,
            FontWeight::Regular,
        ),
    ];
    for (text, max_chars, baseline, size, line_color, weight) in lines {
        let fitted = fit_text(text, max_chars, text_width, size, weight, metrics);
        if fitted.is_empty() {
            continue;
        }
        instructions.push(DrawInstruction::text(
            fitted,
            Point::new(text_x, card.y + baseline),
            size,
            line_color,
            TextAlign::Left,
            weight,
        ));
    }
}

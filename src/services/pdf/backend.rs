//! Backend-neutral dispatch of draw instructions.

use crate::models::layout::{
    DrawInstruction, FontWeight, Point, Rect, Rgb, ScheduleDocument, TextAlign,
};

/// Drawing surface that can receive laid-out pages.
///
/// Coordinates are points with a top-left origin, exactly as produced by the
/// layout engine; implementations convert to their own space.
#[cfg_attr(test, mockall::automock)]
pub trait DrawBackend {
    fn begin_page(&mut self, number: usize, width: f32, height: f32);
    fn fill_rect(&mut self, rect: Rect, color: Rgb);
    fn stroke_rect(&mut self, rect: Rect, color: Rgb, line_width: f32);
    fn rounded_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        fill: Option<Rgb>,
        stroke: Option<Rgb>,
        line_width: f32,
    );
    fn circle(&mut self, center: Point, radius: f32, fill: Rgb);
    fn line(&mut self, from: Point, to: Point, color: Rgb, line_width: f32);
    fn text(
        &mut self,
        text: &str,
        origin: Point,
        size: f32,
        color: Rgb,
        align: TextAlign,
        weight: FontWeight,
    );
}

/// Replay every page of `document` onto `backend`, in order
pub fn emit_document(document: &ScheduleDocument, backend: &mut dyn DrawBackend) {
    for page in &document.pages {
        backend.begin_page(page.number, page.width, page.height);
        for instruction in &page.instructions {
            emit_instruction(instruction, backend);
        }
    }
}

fn emit_instruction(instruction: &DrawInstruction, backend: &mut dyn DrawBackend) {
    match instruction {
        DrawInstruction::FillRect { rect, color } => backend.fill_rect(*rect, *color),
        DrawInstruction::StrokeRect {
            rect,
            color,
            line_width,
        } => backend.stroke_rect(*rect, *color, *line_width),
        DrawInstruction::RoundedRect {
            rect,
            radius,
            fill,
            stroke,
            line_width,
        } => backend.rounded_rect(*rect, *radius, *fill, *stroke, *line_width),
        DrawInstruction::Circle {
            center,
            radius,
            fill,
        } => backend.circle(*center, *radius, *fill),
        DrawInstruction::Line {
            from,
            to,
            color,
            line_width,
        } => backend.line(*from, *to, *color, *line_width),
        DrawInstruction::Text {
            text,
            origin,
            size,
            color,
            align,
            weight,
        } => backend.text(text, *origin, *size, *color, *align, *weight),
    }
}

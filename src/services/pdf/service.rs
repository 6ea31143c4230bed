//! PDF export service implementation

use anyhow::{Context, Result};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerIndex, PdfLayerReference, PdfPageIndex, Point as PdfPoint, Polygon,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::models::layout::{FontWeight, Point, Rect, Rgb, ScheduleDocument, TextAlign};
use crate::models::settings::{PageSize, TextMetrics};

use super::backend::{emit_document, DrawBackend};

const MM_PER_PT: f32 = 25.4 / 72.0;
/// Control-point distance for a quarter circle drawn as a cubic Bezier
const KAPPA: f32 = 0.552_284_8;
const LAYER_NAME: &str = "Layer 1";

fn mm(pt: f32) -> Mm {
    Mm(pt * MM_PER_PT)
}

fn pdf_color(color: Rgb) -> Color {
    let (r, g, b) = color.to_unit();
    Color::Rgb(printpdf::Rgb::new(r, g, b, None))
}

/// Draws laid-out pages into a printpdf document
pub struct PrintPdfBackend {
    doc: PdfDocumentReference,
    font: IndirectFontRef,
    font_bold: IndirectFontRef,
    metrics: TextMetrics,
    first_page: Option<(PdfPageIndex, PdfLayerIndex)>,
    layer: Option<PdfLayerReference>,
    page_height: f32,
}

impl PrintPdfBackend {
    /// Create a document whose first page has `first_page` dimensions
    pub fn new(title: &str, first_page: PageSize, metrics: TextMetrics) -> Result<Self> {
        let (doc, page1, layer1) = PdfDocument::new(
            title,
            mm(first_page.width),
            mm(first_page.height),
            LAYER_NAME,
        );

        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .context("Failed to add font")?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .context("Failed to add bold font")?;

        Ok(Self {
            doc,
            font,
            font_bold,
            metrics,
            first_page: Some((page1, layer1)),
            layer: None,
            page_height: first_page.height,
        })
    }

    /// Write the finished document to `path`
    pub fn save(self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create PDF file {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        self.doc.save(&mut writer).context("Failed to save PDF")?;
        Ok(())
    }

    /// Serialize the finished document in memory
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        self.doc.save_to_bytes().context("Failed to serialize PDF")
    }

    /// Convert a top-left origin point into the PDF's bottom-left space
    fn point(&self, x: f32, y: f32) -> PdfPoint {
        PdfPoint::new(mm(x), mm(self.page_height - y))
    }

    fn rect_points(&self, rect: Rect) -> Vec<(PdfPoint, bool)> {
        vec![
            (self.point(rect.x, rect.y), false),
            (self.point(rect.right(), rect.y), false),
            (self.point(rect.right(), rect.bottom()), false),
            (self.point(rect.x, rect.bottom()), false),
        ]
    }

    /// Outline of a rounded rectangle. A point flagged `true` followed by
    /// another flagged point starts a cubic segment through the next two.
    fn rounded_points(&self, rect: Rect, radius: f32) -> Vec<(PdfPoint, bool)> {
        let r = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
        if r == 0.0 {
            return self.rect_points(rect);
        }
        let k = r * KAPPA;
        let (left, top, right, bottom) = (rect.x, rect.y, rect.right(), rect.bottom());

        let mut points = Vec::with_capacity(17);
        let mut corner = |edge_start: (f32, f32),
                          edge_end: (f32, f32),
                          c1: (f32, f32),
                          c2: (f32, f32)| {
            points.push((self.point(edge_start.0, edge_start.1), false));
            points.push((self.point(edge_end.0, edge_end.1), true));
            points.push((self.point(c1.0, c1.1), true));
            points.push((self.point(c2.0, c2.1), false));
        };
        corner(
            (left + r, top),
            (right - r, top),
            (right - r + k, top),
            (right, top + r - k),
        );
        corner(
            (right, top + r),
            (right, bottom - r),
            (right, bottom - r + k),
            (right - r + k, bottom),
        );
        corner(
            (right - r, bottom),
            (left + r, bottom),
            (left + r - k, bottom),
            (left, bottom - r + k),
        );
        corner(
            (left, bottom - r),
            (left, top + r),
            (left, top + r - k),
            (left + r - k, top),
        );
        points.push((self.point(left + r, top), false));
        points
    }

    fn circle_points(&self, center: Point, radius: f32) -> Vec<(PdfPoint, bool)> {
        let (cx, cy, r) = (center.x, center.y, radius);
        let k = r * KAPPA;
        vec![
            (self.point(cx + r, cy), true),
            (self.point(cx + r, cy + k), true),
            (self.point(cx + k, cy + r), false),
            (self.point(cx, cy + r), true),
            (self.point(cx - k, cy + r), true),
            (self.point(cx - r, cy + k), false),
            (self.point(cx - r, cy), true),
            (self.point(cx - r, cy - k), true),
            (self.point(cx - k, cy - r), false),
            (self.point(cx, cy - r), true),
            (self.point(cx + k, cy - r), true),
            (self.point(cx + r, cy - k), false),
            (self.point(cx + r, cy), false),
        ]
    }

    fn add_shape(&self, points: Vec<(PdfPoint, bool)>, mode: PaintMode) {
        if let Some(layer) = &self.layer {
            layer.add_polygon(Polygon {
                rings: vec![points],
                mode,
                winding_order: WindingOrder::NonZero,
            });
        }
    }

    fn set_stroke(&self, color: Rgb, line_width: f32) {
        if let Some(layer) = &self.layer {
            layer.set_outline_color(pdf_color(color));
            layer.set_outline_thickness(line_width);
        }
    }

    fn set_fill(&self, color: Rgb) {
        if let Some(layer) = &self.layer {
            layer.set_fill_color(pdf_color(color));
        }
    }
}

impl DrawBackend for PrintPdfBackend {
    fn begin_page(&mut self, number: usize, width: f32, height: f32) {
        let (page, layer) = match self.first_page.take() {
            Some(first) => first,
            None => self.doc.add_page(mm(width), mm(height), LAYER_NAME),
        };
        log::debug!("Drawing PDF page {} ({} x {} pt)", number, width, height);
        self.layer = Some(self.doc.get_page(page).get_layer(layer));
        self.page_height = height;
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.set_fill(color);
        self.add_shape(self.rect_points(rect), PaintMode::Fill);
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgb, line_width: f32) {
        self.set_stroke(color, line_width);
        self.add_shape(self.rect_points(rect), PaintMode::Stroke);
    }

    fn rounded_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        fill: Option<Rgb>,
        stroke: Option<Rgb>,
        line_width: f32,
    ) {
        if let Some(color) = fill {
            self.set_fill(color);
            self.add_shape(self.rounded_points(rect, radius), PaintMode::Fill);
        }
        if let Some(color) = stroke {
            self.set_stroke(color, line_width);
            self.add_shape(self.rounded_points(rect, radius), PaintMode::Stroke);
        }
    }

    fn circle(&mut self, center: Point, radius: f32, fill: Rgb) {
        self.set_fill(fill);
        self.add_shape(self.circle_points(center, radius), PaintMode::Fill);
    }

    fn line(&mut self, from: Point, to: Point, color: Rgb, line_width: f32) {
        self.set_stroke(color, line_width);
        if let Some(layer) = &self.layer {
            layer.add_line(Line {
                points: vec![
                    (self.point(from.x, from.y), false),
                    (self.point(to.x, to.y), false),
                ],
                is_closed: false,
            });
        }
    }

    fn text(
        &mut self,
        text: &str,
        origin: Point,
        size: f32,
        color: Rgb,
        align: TextAlign,
        weight: FontWeight,
    ) {
        let Some(layer) = &self.layer else {
            return;
        };
        let font = match weight {
            FontWeight::Regular => &self.font,
            FontWeight::Bold => &self.font_bold,
        };
        let width = self.metrics.width_or_estimate(text, size, weight);
        let x = match align {
            TextAlign::Left => origin.x,
            TextAlign::Center => origin.x - width / 2.0,
            TextAlign::Right => origin.x - width,
        };

        layer.begin_text_section();
        layer.set_font(font, size);
        layer.set_fill_color(pdf_color(color));
        layer.set_text_cursor(mm(x), mm(self.page_height - origin.y));
        layer.write_text(text, font);
        layer.end_text_section();
    }
}

/// Service for exporting laid-out schedules to PDF
pub struct PdfExportService;

impl PdfExportService {
    /// Export every page of `document` to `path`
    pub fn export_schedule(
        document: &ScheduleDocument,
        path: &Path,
        metrics: TextMetrics,
    ) -> Result<()> {
        let backend = Self::render(document, metrics)?;
        backend.save(path)?;
        log::info!(
            "Exported {} page(s) of '{}' to {}",
            document.pages.len(),
            document.title,
            path.display()
        );
        Ok(())
    }

    /// Render `document` to PDF bytes without touching the filesystem
    pub fn export_to_bytes(document: &ScheduleDocument, metrics: TextMetrics) -> Result<Vec<u8>> {
        Self::render(document, metrics)?.into_bytes()
    }

    fn render(document: &ScheduleDocument, metrics: TextMetrics) -> Result<PrintPdfBackend> {
        let first_page = document
            .pages
            .first()
            .map(|page| PageSize::new(page.width, page.height))
            .unwrap_or_default();
        let mut backend = PrintPdfBackend::new(&document.title, first_page, metrics)?;
        emit_document(document, &mut backend);
        Ok(backend)
    }
}

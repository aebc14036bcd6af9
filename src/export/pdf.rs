//! Paginated A4 rendering of a shaped report. The font is supplied by an
//! injected provider; any failure to obtain or parse it aborts the whole
//! export with no partial output.

use std::{
    fs,
    path::{Path, PathBuf},
};

use printpdf::{
    Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerIndex,
    PdfLayerReference, PdfPageIndex, Point, Rgb,
};

use crate::errors::FluidError;

use super::report_data::{PdfReportData, PdfRow};

const PAGE_WIDTH: f64 = 210.0;
const PAGE_HEIGHT: f64 = 297.0;
const MARGIN: f64 = 14.0;
// Vertical offsets are tracked in millimeters from the top edge, like the
// layouts this mirrors; page geometry is converted at draw time.
const CONTENT_TOP: f64 = 20.0;
const PAGE_BREAK_AT: f64 = 270.0;
const FOOTER_AT: f64 = 290.0;
const ROW_HEIGHT: f64 = 6.0;

// Glyph width factor for the rough centering/right-alignment estimate.
const PT_TO_MM: f64 = 0.3528;
const GLYPH_WIDTH_EM: f64 = 0.5;

const COLOR_TEXT: (f64, f64, f64) = (0.1, 0.1, 0.1);
const COLOR_MUTED: (f64, f64, f64) = (0.4, 0.4, 0.4);
const COLOR_RULE: (f64, f64, f64) = (0.78, 0.78, 0.78);
const COLOR_IN: (f64, f64, f64) = (0.0, 0.59, 0.0);
const COLOR_OUT: (f64, f64, f64) = (0.78, 0.2, 0.2);

// Detail table column x offsets, from the left edge.
const COL_TIME: f64 = MARGIN;
const COL_TYPE: f64 = 39.0;
const COL_ITEM: f64 = 59.0;
const COL_AMOUNT_RIGHT: f64 = 124.0;
const COL_NOTE: f64 = 129.0;

/// Supplies the TTF bytes embedded into exported documents.
pub trait FontProvider {
    fn font_bytes(&self) -> Result<Vec<u8>, FluidError>;
}

/// Loads the export font from a file on disk.
pub struct FileFontProvider {
    path: PathBuf,
}

impl FileFontProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FontProvider for FileFontProvider {
    fn font_bytes(&self) -> Result<Vec<u8>, FluidError> {
        fs::read(&self.path).map_err(|err| {
            FluidError::ExportError(format!(
                "font `{}` unavailable: {}",
                self.path.display(),
                err
            ))
        })
    }
}

pub struct PdfExporter<F: FontProvider> {
    fonts: F,
}

impl<F: FontProvider> PdfExporter<F> {
    pub fn new(fonts: F) -> Self {
        Self { fonts }
    }

    /// Renders the report into PDF bytes.
    pub fn render(&self, data: &PdfReportData) -> Result<Vec<u8>, FluidError> {
        let font_bytes = self.fonts.font_bytes()?;
        let (doc, page, layer) =
            PdfDocument::new("Fluid Balance Report", Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), "content");
        let font = doc
            .add_external_font(font_bytes.as_slice())
            .map_err(|err| FluidError::ExportError(format!("font rejected: {}", err)))?;

        let mut canvas = Canvas::new(&doc, page, layer, font);
        canvas.title_block(data);
        canvas.summary_table(data);
        for day in &data.days {
            canvas.day_section(&day.date, &day.summary, &day.records);
        }
        canvas.footers();

        doc.save_to_bytes()
            .map_err(|err| FluidError::ExportError(err.to_string()))
    }

    /// Renders the report and writes it to `path`.
    pub fn save(&self, data: &PdfReportData, path: &Path) -> Result<(), FluidError> {
        let bytes = self.render(data)?;
        fs::write(path, bytes)?;
        Ok(())
    }
}

struct Canvas<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    pages: Vec<(PdfPageIndex, PdfLayerIndex)>,
    font: IndirectFontRef,
    from_top: f64,
}

impl<'a> Canvas<'a> {
    fn new(
        doc: &'a PdfDocumentReference,
        page: PdfPageIndex,
        layer: PdfLayerIndex,
        font: IndirectFontRef,
    ) -> Self {
        Self {
            doc,
            layer: doc.get_page(page).get_layer(layer),
            pages: vec![(page, layer)],
            font,
            from_top: CONTENT_TOP,
        }
    }

    fn title_block(&mut self, data: &PdfReportData) {
        let title = "Fluid Balance Report";
        self.set_color(COLOR_TEXT);
        self.text(title, 22.0, centered_x(title, 22.0));
        self.from_top += 10.0;

        let range = format!(
            "Range: {} - {} ({})",
            data.start_date, data.end_date, data.period
        );
        self.set_color(COLOR_MUTED);
        self.text(&range, 10.0, centered_x(&range, 10.0));
        self.from_top += 10.0;
    }

    fn summary_table(&mut self, data: &PdfReportData) {
        let headers = ["Total In", "Total Out", "Net Balance", "Avg / Day"];
        let sign = if data.net_balance > 0.0 { "+" } else { "" };
        let values = [
            format!("+{} mL", data.total_in),
            format!("-{} mL", data.total_out),
            format!("{}{} mL", sign, data.net_balance),
            format!("{} mL/day", data.avg_balance),
        ];
        let col_width = (PAGE_WIDTH - 2.0 * MARGIN) / headers.len() as f64;

        self.rule(MARGIN, PAGE_WIDTH - MARGIN);
        self.from_top += ROW_HEIGHT;
        self.set_color(COLOR_TEXT);
        for (index, header) in headers.iter().enumerate() {
            self.text(header, 11.0, Mm((MARGIN + 2.0 + index as f64 * col_width) as f32));
        }
        self.from_top += 2.0;
        self.rule(MARGIN, PAGE_WIDTH - MARGIN);
        self.from_top += ROW_HEIGHT;
        for (index, value) in values.iter().enumerate() {
            self.text(value, 11.0, Mm((MARGIN + 2.0 + index as f64 * col_width) as f32));
        }
        self.from_top += 2.0;
        self.rule(MARGIN, PAGE_WIDTH - MARGIN);
        self.from_top += 15.0;
    }

    fn day_section(&mut self, date: &str, summary: &str, rows: &[PdfRow]) {
        if self.from_top > PAGE_BREAK_AT {
            self.break_page();
        }

        self.set_color(COLOR_TEXT);
        self.text(date, 12.0, Mm(MARGIN as f32));
        self.set_color(COLOR_MUTED);
        self.text(summary, 10.0, right_aligned_x(summary, 10.0));
        self.from_top += ROW_HEIGHT;

        let headers = ["Time", "Type", "Item", "Amount (mL)", "Note"];
        let header_x = [COL_TIME, COL_TYPE, COL_ITEM, COL_AMOUNT_RIGHT - 20.0, COL_NOTE];
        self.set_color(COLOR_TEXT);
        for (header, x) in headers.iter().zip(header_x) {
            self.text(header, 10.0, Mm(x as f32));
        }
        self.from_top += 2.0;
        self.rule(MARGIN, PAGE_WIDTH - MARGIN);
        self.from_top += ROW_HEIGHT;

        for row in rows {
            if self.from_top > PAGE_BREAK_AT {
                self.break_page();
            }
            let [time, direction, item, amount, note] = row;
            self.set_color(COLOR_TEXT);
            self.text(time, 10.0, Mm(COL_TIME as f32));
            self.set_color(if direction == "OUT" { COLOR_OUT } else { COLOR_IN });
            self.text(direction, 10.0, Mm(COL_TYPE as f32));
            self.set_color(COLOR_TEXT);
            self.text(item, 10.0, Mm(COL_ITEM as f32));
            let amount_x = Mm((COL_AMOUNT_RIGHT - text_width(amount, 10.0)).max(COL_ITEM + 20.0) as f32);
            self.text(amount, 10.0, amount_x);
            self.set_color(COLOR_MUTED);
            self.text(note, 10.0, Mm(COL_NOTE as f32));
            self.from_top += ROW_HEIGHT;
        }
        self.from_top += 10.0;
    }

    fn footers(&mut self) {
        let total = self.pages.len();
        for (index, (page, layer)) in self.pages.clone().into_iter().enumerate() {
            let label = format!("Page {} of {}", index + 1, total);
            let layer = self.doc.get_page(page).get_layer(layer);
            layer.set_fill_color(rgb(COLOR_MUTED));
            layer.use_text(
                &label,
                8.0,
                centered_x(&label, 8.0),
                Mm((PAGE_HEIGHT - FOOTER_AT) as f32),
                &self.font,
            );
        }
    }

    fn break_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), "content");
        self.pages.push((page, layer));
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.from_top = CONTENT_TOP;
    }

    fn text(&self, text: &str, size: f64, x: Mm) {
        self.layer
            .use_text(text, size as f32, x, Mm((PAGE_HEIGHT - self.from_top) as f32), &self.font);
    }

    fn set_color(&self, color: (f64, f64, f64)) {
        self.layer.set_fill_color(rgb(color));
    }

    fn rule(&self, x1: f64, x2: f64) {
        let y = Mm((PAGE_HEIGHT - self.from_top - 1.5) as f32);
        self.layer.set_outline_color(rgb(COLOR_RULE));
        self.layer.set_outline_thickness(0.3);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(x1 as f32), y), false),
                (Point::new(Mm(x2 as f32), y), false),
            ],
            is_closed: false,
        });
    }
}

fn rgb((r, g, b): (f64, f64, f64)) -> Color {
    Color::Rgb(Rgb::new(r as f32, g as f32, b as f32, None))
}

fn text_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * GLYPH_WIDTH_EM * PT_TO_MM
}

fn centered_x(text: &str, size: f64) -> Mm {
    Mm(((PAGE_WIDTH - text_width(text, size)) / 2.0).max(MARGIN) as f32)
}

fn right_aligned_x(text: &str, size: f64) -> Mm {
    Mm((PAGE_WIDTH - MARGIN - text_width(text, size)).max(MARGIN) as f32)
}

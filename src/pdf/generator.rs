use std::fs;
use std::path::Path;

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Polygon,
};

use super::builder::{DrawOp, FontStyle, Page, RectStyle, Rgb, TextStyle};
use crate::core::{is_winansi, run_width, text_runs, unicode_font, DocumentError, DocumentResult};

// Segments used to approximate each rounded corner.
const CORNER_SEGMENTS: usize = 6;

/// Writes a [`Page`] as a single-page PDF using the base-14 Helvetica faces,
/// embedding the Unicode face when some text falls outside WinAnsi.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfGenerator;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
    bold_italic: IndirectFontRef,
    unicode: Option<IndirectFontRef>,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference, page: &Page) -> DocumentResult<Self> {
        let load = |font: BuiltinFont| {
            doc.add_builtin_font(font)
                .map_err(|e| DocumentError::Pdf(e.to_string()))
        };
        Ok(Fonts {
            regular: load(BuiltinFont::Helvetica)?,
            bold: load(BuiltinFont::HelveticaBold)?,
            italic: load(BuiltinFont::HelveticaOblique)?,
            bold_italic: load(BuiltinFont::HelveticaBoldOblique)?,
            unicode: load_unicode(doc, page)?,
        })
    }

    fn get(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Normal => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Italic => &self.italic,
            FontStyle::BoldItalic => &self.bold_italic,
        }
    }
}

fn load_unicode(doc: &PdfDocumentReference, page: &Page) -> DocumentResult<Option<IndirectFontRef>> {
    let needed: Vec<char> = page
        .texts()
        .flat_map(|t| t.content.chars())
        .filter(|c| !is_winansi(*c))
        .collect();
    if needed.is_empty() {
        return Ok(None);
    }

    let Some(font) = unicode_font() else {
        tracing::warn!(chars = needed.len(), "no unicode font available, non-latin text left out");
        return Ok(None);
    };
    let missing: String = needed.iter().filter(|c| !font.covers(**c)).collect();
    if !missing.is_empty() {
        tracing::warn!(font = font.name(), missing = %missing, "font has no glyphs for some characters");
    }

    doc.add_external_font(font.bytes())
        .map(Some)
        .map_err(|e| DocumentError::Pdf(format!("embedding {}: {}", font.name(), e)))
}

impl PdfGenerator {
    pub fn new() -> Self {
        PdfGenerator
    }

    pub fn render_bytes(&self, page: &Page) -> DocumentResult<Vec<u8>> {
        if page.is_empty() {
            return Err(DocumentError::Validation("page has nothing to draw".to_string()));
        }

        let (doc, page_index, layer_index) = PdfDocument::new(
            page.title(),
            Mm(page.width()),
            Mm(page.height()),
            "Receipt",
        );
        let layer = doc.get_page(page_index).get_layer(layer_index);
        let fonts = Fonts::load(&doc, page)?;

        for op in page.ops() {
            draw_op(&layer, &fonts, page.height(), op);
        }

        doc.save_to_bytes()
            .map_err(|e| DocumentError::Pdf(e.to_string()))
    }

    pub fn render(&self, page: &Page, output_path: &Path) -> DocumentResult<usize> {
        let bytes = self.render_bytes(page)?;
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(output_path, &bytes)?;
        Ok(bytes.len())
    }
}

fn pdf_color(color: Rgb) -> Color {
    let (r, g, b) = color.to_unit();
    Color::Rgb(printpdf::Rgb::new(r, g, b, None))
}

// Page coordinates are top-left based; PDF user space is bottom-left.
fn point(x: f32, y: f32, page_height: f32) -> Point {
    Point::new(Mm(x), Mm(page_height - y))
}

fn draw_op(layer: &PdfLayerReference, fonts: &Fonts, page_height: f32, op: &DrawOp) {
    match op {
        DrawOp::Text { content, x, y, style } => draw_text(layer, fonts, page_height, content, *x, *y, style),
        DrawOp::Line { x1, y1, x2, y2, color, width } => {
            layer.set_outline_color(pdf_color(*color));
            layer.set_outline_thickness(*width);
            layer.add_line(Line {
                points: vec![
                    (point(*x1, *y1, page_height), false),
                    (point(*x2, *y2, page_height), false),
                ],
                is_closed: false,
            });
        }
        DrawOp::Rect { x, y, width, height, style } => {
            draw_rect(layer, page_height, *x, *y, *width, *height, style)
        }
    }
}

fn draw_text(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    page_height: f32,
    content: &str,
    x: f32,
    y: f32,
    style: &TextStyle,
) {
    let bold = style.font.is_bold();
    let mut left = style.left_x(content, x);
    layer.set_fill_color(pdf_color(style.color));
    for run in text_runs(content) {
        let font = if run.builtin { Some(fonts.get(style.font)) } else { fonts.unicode.as_ref() };
        if let Some(font) = font {
            layer.use_text(run.text, style.size, Mm(left), Mm(page_height - y), font);
        }
        left += run_width(&run, style.size, bold);
    }
}

fn draw_rect(
    layer: &PdfLayerReference,
    page_height: f32,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    style: &RectStyle,
) {
    let mode = match (style.fill, style.stroke) {
        (Some(_), Some(_)) => PaintMode::FillStroke,
        (Some(_), None) => PaintMode::Fill,
        (None, Some(_)) => PaintMode::Stroke,
        (None, None) => return,
    };
    if let Some(fill) = style.fill {
        layer.set_fill_color(pdf_color(fill));
    }
    if let Some(stroke) = style.stroke {
        layer.set_outline_color(pdf_color(stroke));
        layer.set_outline_thickness(style.line_width);
    }

    let ring = rect_outline(x, y, width, height, style.radius)
        .into_iter()
        .map(|(px, py)| (point(px, py, page_height), false))
        .collect();

    layer.add_polygon(Polygon {
        rings: vec![ring],
        mode,
        winding_order: WindingOrder::NonZero,
    });
}

/// Clockwise outline of a (possibly rounded) rectangle in page coordinates.
fn rect_outline(x: f32, y: f32, width: f32, height: f32, radius: f32) -> Vec<(f32, f32)> {
    let r = radius.clamp(0.0, width.min(height) / 2.0);
    if r <= 0.0 {
        return vec![(x, y), (x + width, y), (x + width, y + height), (x, y + height)];
    }

    // Corner centres with the start angle of each quarter arc, in screen
    // orientation (y grows downwards).
    let corners = [
        (x + width - r, y + r, -90.0_f32),
        (x + width - r, y + height - r, 0.0),
        (x + r, y + height - r, 90.0),
        (x + r, y + r, 180.0),
    ];

    let mut points = Vec::with_capacity(corners.len() * (CORNER_SEGMENTS + 1));
    for (cx, cy, start) in corners {
        for step in 0..=CORNER_SEGMENTS {
            let angle = (start + 90.0 * step as f32 / CORNER_SEGMENTS as f32).to_radians();
            points.push((cx + r * angle.cos(), cy + r * angle.sin()));
        }
    }
    points
}

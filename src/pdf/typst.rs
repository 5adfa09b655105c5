use super::builder::{DrawOp, Page, RectStyle, Rgb, TextStyle};
use crate::core::{Orientation, PageSize, PdfConfig, MM_PER_PT};

/// Typst source for `page`, every primitive placed absolutely. Compiles with
/// `typst compile` to the same layout the PDF backend draws.
pub fn to_typst(page: &Page, config: &PdfConfig) -> String {
    let mut typst = format!(
        "#set document(title: \"{}\")\n{}\n",
        escape_string(page.title()),
        header(page, config)
    );

    for op in page.ops() {
        typst.push_str(&match op {
            DrawOp::Text { content, x, y, style } => place_text(content, *x, *y, style),
            DrawOp::Line { x1, y1, x2, y2, color, width } => format!(
                "#place(top + left, line(start: ({:.2}mm, {:.2}mm), end: ({:.2}mm, {:.2}mm), stroke: {}pt + {}))",
                x1, y1, x2, y2, width, rgb(*color)
            ),
            DrawOp::Rect { x, y, width, height, style } => place_rect(*x, *y, *width, *height, style),
        });
        typst.push('\n');
    }

    typst
}

fn header(page: &Page, config: &PdfConfig) -> String {
    // The page carries its own size; the config only contributes the font.
    let sized = PdfConfig {
        page_size: PageSize::Custom { width: page.width(), height: page.height() },
        orientation: Orientation::Portrait,
        font_family: config.font_family.clone(),
    };
    sized.to_typst_header()
}

fn place_text(content: &str, x: f32, y: f32, style: &TextStyle) -> String {
    // `place` anchors the top of the text box; our y is the baseline.
    let ascent = style.size * 0.72 * MM_PER_PT;
    let weight = if style.font.is_bold() { "bold" } else { "regular" };
    let slant = if style.font.is_italic() { "italic" } else { "normal" };
    format!(
        "#place(top + left, dx: {:.2}mm, dy: {:.2}mm, text(size: {}pt, weight: \"{}\", style: \"{}\", fill: {})[{}])",
        style.left_x(content, x),
        y - ascent,
        style.size,
        weight,
        slant,
        rgb(style.color),
        escape_typst(content)
    )
}

fn place_rect(x: f32, y: f32, width: f32, height: f32, style: &RectStyle) -> String {
    let mut rect = format!("rect(width: {:.2}mm, height: {:.2}mm", width, height);
    if let Some(fill) = style.fill {
        rect.push_str(&format!(", fill: {}", rgb(fill)));
    }
    match style.stroke {
        Some(stroke) => rect.push_str(&format!(", stroke: {}pt + {}", style.line_width, rgb(stroke))),
        None => rect.push_str(", stroke: none"),
    }
    if style.radius > 0.0 {
        rect.push_str(&format!(", radius: {:.2}mm", style.radius));
    }
    rect.push(')');
    format!("#place(top + left, dx: {:.2}mm, dy: {:.2}mm, {})", x, y, rect)
}

fn rgb(color: Rgb) -> String {
    format!("rgb({}, {}, {})", color.0, color.1, color.2)
}

/// Escapes markup characters inside a Typst content block.
pub fn escape_typst(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '#' | '$' | '@' | '*' | '_' | '[' | ']' | '<' | '>' | '`' | '~') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn escape_string(value: &str) -> String {
    value.replace('\\', r"\\").replace('"', r#"\""#)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_typst("#A1B2 $5 *x*"), r"\#A1B2 \$5 \*x\*");
        assert_eq!(escape_typst("Rs. 5001/-"), "Rs. 5001/-");
    }

    #[test]
    fn emits_one_placement_per_primitive() {
        let mut page = Page::new(210.0, 297.0).with_title("Receipt \"A\"");
        page.add_rect(5.0, 5.0, 200.0, 287.0, RectStyle::outline(Rgb::BLACK))
            .add_line(10.0, 50.0, 200.0, 50.0, Rgb::GRAY, 0.4)
            .add_text("#ABC", 15.0, 55.0, TextStyle::new(11.0).bold());

        let typst = to_typst(&page, &PdfConfig::default());
        assert_eq!(typst.matches("#place(").count(), 3);
        assert!(typst.contains("width: 210mm"));
        assert!(typst.contains(r#"title: "Receipt \"A\"""#));
        assert!(typst.contains(r"[\#ABC]"));
        assert!(typst.contains("weight: \"bold\""));
        assert!(!typst.contains("stroke: none"));
    }
}

//! Single-page drawing surface.
//!
//! Layouts place absolutely-positioned primitives on a [`Page`]; the page is
//! later handed to a backend (PDF or Typst). Coordinates are millimetres with
//! the origin at the top-left corner, text `y` is the baseline, font sizes
//! and stroke widths are points.

use crate::core::{text_width, PdfConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const INK: Rgb = Rgb(33, 33, 33);
    pub const DARK_GRAY: Rgb = Rgb(80, 80, 80);
    pub const GRAY: Rgb = Rgb(120, 120, 120);
    pub const RED: Rgb = Rgb(220, 38, 38);
    pub const GREEN: Rgb = Rgb(22, 163, 74);

    /// Channels scaled to 0.0..=1.0.
    pub fn to_unit(self) -> (f32, f32, f32) {
        (self.0 as f32 / 255.0, self.1 as f32 / 255.0, self.2 as f32 / 255.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    pub fn is_bold(self) -> bool {
        matches!(self, FontStyle::Bold | FontStyle::BoldItalic)
    }

    pub fn is_italic(self) -> bool {
        matches!(self, FontStyle::Italic | FontStyle::BoldItalic)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub font: FontStyle,
    pub color: Rgb,
    pub align: TextAlign,
}

impl TextStyle {
    pub fn new(size: f32) -> Self {
        TextStyle {
            size,
            font: FontStyle::Normal,
            color: Rgb::INK,
            align: TextAlign::Left,
        }
    }

    pub fn bold(mut self) -> Self {
        self.font = if self.font.is_italic() { FontStyle::BoldItalic } else { FontStyle::Bold };
        self
    }

    pub fn italic(mut self) -> Self {
        self.font = if self.font.is_bold() { FontStyle::BoldItalic } else { FontStyle::Italic };
        self
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn centered(mut self) -> Self {
        self.align = TextAlign::Center;
        self
    }

    pub fn right(mut self) -> Self {
        self.align = TextAlign::Right;
        self
    }

    pub fn width_of(&self, text: &str) -> f32 {
        text_width(text, self.size, self.font.is_bold())
    }

    /// Left edge of `text` anchored at `x` under this alignment.
    pub fn left_x(&self, text: &str, x: f32) -> f32 {
        match self.align {
            TextAlign::Left => x,
            TextAlign::Center => x - self.width_of(text) / 2.0,
            TextAlign::Right => x - self.width_of(text),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectStyle {
    pub fill: Option<Rgb>,
    pub stroke: Option<Rgb>,
    pub line_width: f32,
    pub radius: f32,
}

impl RectStyle {
    pub fn outline(color: Rgb) -> Self {
        RectStyle { fill: None, stroke: Some(color), line_width: 0.5, radius: 0.0 }
    }

    pub fn filled(color: Rgb) -> Self {
        RectStyle { fill: Some(color), stroke: None, line_width: 0.5, radius: 0.0 }
    }

    pub fn with_stroke(mut self, color: Rgb) -> Self {
        self.stroke = Some(color);
        self
    }

    pub fn line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    pub fn rounded(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        content: String,
        x: f32,
        y: f32,
        style: TextStyle,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Rgb,
        width: f32,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        style: RectStyle,
    },
}

/// A text primitive as seen by inspection helpers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedText<'a> {
    pub content: &'a str,
    pub x: f32,
    pub y: f32,
    pub style: &'a TextStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    width: f32,
    height: f32,
    title: String,
    ops: Vec<DrawOp>,
}

impl Page {
    pub fn new(width: f32, height: f32) -> Self {
        Page {
            width,
            height,
            title: String::from("Receipt"),
            ops: Vec::new(),
        }
    }

    pub fn from_config(config: &PdfConfig) -> Self {
        let (width, height) = config.page_dimensions();
        Page::new(width, height)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn add_text(&mut self, content: impl Into<String>, x: f32, y: f32, style: TextStyle) -> &mut Self {
        let content = content.into();
        if !content.is_empty() {
            self.ops.push(DrawOp::Text { content, x, y, style });
        }
        self
    }

    pub fn add_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Rgb, width: f32) -> &mut Self {
        self.ops.push(DrawOp::Line { x1, y1, x2, y2, color, width });
        self
    }

    /// Horizontal rule, the usual "fill in here" line on a form.
    pub fn add_rule(&mut self, x1: f32, x2: f32, y: f32, color: Rgb) -> &mut Self {
        self.add_line(x1, y, x2, y, color, 0.4)
    }

    pub fn add_rect(&mut self, x: f32, y: f32, width: f32, height: f32, style: RectStyle) -> &mut Self {
        self.ops.push(DrawOp::Rect { x, y, width, height, style });
        self
    }

    pub fn texts(&self) -> impl Iterator<Item = PlacedText<'_>> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { content, x, y, style } => Some(PlacedText {
                content: content.as_str(),
                x: *x,
                y: *y,
                style,
            }),
            _ => None,
        })
    }

    pub fn find_text(&self, content: &str) -> Option<PlacedText<'_>> {
        self.texts().find(|t| t.content == content)
    }

    pub fn contains_text(&self, content: &str) -> bool {
        self.find_text(content).is_some()
    }
}

/// Shortens `text` with a trailing ellipsis until it fits `max_width`.
pub fn fit_text(text: &str, style: &TextStyle, max_width: f32) -> String {
    if style.width_of(text) <= max_width {
        return text.to_string();
    }
    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate: String = chars.iter().collect::<String>().trim_end().to_string() + "...";
        if style.width_of(&candidate) <= max_width {
            return candidate;
        }
    }
    String::new()
}

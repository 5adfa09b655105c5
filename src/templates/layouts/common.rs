//! Drawing shared by both layouts: border, header band and signature block.

use crate::pdf::{fit_text, Page, RectStyle, Rgb, TextStyle};
use crate::templates::theme::Theme;

pub const HEADER_TOP: f32 = 10.0;
pub const HEADER_BOTTOM: f32 = 45.0;
pub const TITLE_Y: f32 = 25.0;
pub const SUBTITLE_Y: f32 = 35.0;
pub const TITLE_SIZE: f32 = 22.0;
pub const SUBTITLE_SIZE: f32 = 12.0;
pub const SIGNATURE_LABEL: &str = "Authorized Signature";

const OUTER_BORDER_INSET: f32 = 5.0;
const INNER_BORDER_INSET: f32 = 7.0;
const LOGO_SIZE: f32 = 20.0;
const LOGO_X: f32 = 15.0;

/// Double decorative border inset 5 and 7 from every edge.
pub fn draw_page_border(page: &mut Page, theme: &Theme) {
    let (w, h) = (page.width(), page.height());
    page.add_rect(
        OUTER_BORDER_INSET,
        OUTER_BORDER_INSET,
        w - 2.0 * OUTER_BORDER_INSET,
        h - 2.0 * OUTER_BORDER_INSET,
        RectStyle::outline(theme.primary).line_width(1.5),
    )
    .add_rect(
        INNER_BORDER_INSET,
        INNER_BORDER_INSET,
        w - 2.0 * INNER_BORDER_INSET,
        h - 2.0 * INNER_BORDER_INSET,
        RectStyle::outline(theme.primary).line_width(0.5),
    );
}

/// Filled header band with the centred title and optional subtitle. With
/// `show_logo`, a monogram badge sits at the left of the band.
pub fn draw_header(page: &mut Page, theme: &Theme, title: &str, subtitle: Option<&str>, show_logo: bool) {
    let w = page.width();
    page.add_rect(
        HEADER_TOP,
        HEADER_TOP,
        w - 2.0 * HEADER_TOP,
        HEADER_BOTTOM - HEADER_TOP,
        RectStyle::filled(theme.light).with_stroke(theme.primary),
    );

    let logo_space = if show_logo && draw_monogram(page, theme, title) {
        LOGO_X + LOGO_SIZE
    } else {
        0.0
    };

    // Keep the title centred on the page but clear of the badge.
    let max_width = w - 2.0 * (HEADER_TOP + 5.0 + logo_space);
    let title_style = fitting_style(title, TITLE_SIZE, max_width, |s| {
        TextStyle::new(s).bold().color(theme.primary).centered()
    });
    page.add_text(title, w / 2.0, TITLE_Y, title_style);

    if let Some(subtitle) = subtitle {
        let style = TextStyle::new(SUBTITLE_SIZE).color(Rgb::DARK_GRAY).centered();
        page.add_text(fit_text(subtitle, &style, max_width), w / 2.0, SUBTITLE_Y, style);
    }
}

fn draw_monogram(page: &mut Page, theme: &Theme, title: &str) -> bool {
    let Some(initial) = title.chars().find(|c| c.is_alphanumeric()) else {
        return false;
    };
    let top = HEADER_TOP + (HEADER_BOTTOM - HEADER_TOP - LOGO_SIZE) / 2.0;
    page.add_rect(LOGO_X, top, LOGO_SIZE, LOGO_SIZE, RectStyle::filled(theme.primary).rounded(2.0))
        .add_text(
            initial.to_uppercase().to_string(),
            LOGO_X + LOGO_SIZE / 2.0,
            top + LOGO_SIZE / 2.0 + 2.5,
            TextStyle::new(20.0).bold().color(Rgb::WHITE).centered(),
        );
    true
}

/// Steps the font size down (not below 60%) until `text` fits.
fn fitting_style(text: &str, size: f32, max_width: f32, make: impl Fn(f32) -> TextStyle) -> TextStyle {
    let min_size = size * 0.6;
    let mut current = size;
    while current > min_size && make(current).width_of(text) > max_width {
        current -= 1.0;
    }
    make(current.max(min_size))
}

/// Ruled signature line with its label centred underneath.
pub fn draw_signature(page: &mut Page, line_y: f32) {
    let w = page.width();
    let (x1, x2) = (w - 80.0, w - 20.0);
    page.add_line(x1, line_y, x2, line_y, Rgb::INK, 0.5)
        .add_text(
            SIGNATURE_LABEL,
            (x1 + x2) / 2.0,
            line_y + 6.0,
            TextStyle::new(10.0).color(Rgb::DARK_GRAY).centered(),
        );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::DrawOp;
    use crate::templates::theme::ThemeId;

    #[test]
    fn border_is_two_nested_rects_in_primary() {
        let theme = ThemeId::Blue.theme();
        let mut page = Page::new(210.0, 297.0);
        draw_page_border(&mut page, &theme);
        let rects: Vec<_> = page
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rect { x, y, width, height, style } => Some((*x, *y, *width, *height, style.stroke)),
                _ => None,
            })
            .collect();
        assert_eq!(
            rects,
            vec![
                (5.0, 5.0, 200.0, 287.0, Some(theme.primary)),
                (7.0, 7.0, 196.0, 283.0, Some(theme.primary)),
            ]
        );
    }

    #[test]
    fn header_band_spans_to_y45() {
        let theme = ThemeId::Saffron.theme();
        let mut page = Page::new(210.0, 297.0);
        draw_header(&mut page, &theme, "Festival Receipt", None, false);
        match &page.ops()[0] {
            DrawOp::Rect { x, y, width, height, style } => {
                assert_eq!((*x, *y, *width, *height), (10.0, 10.0, 190.0, 35.0));
                assert_eq!(style.fill, Some(theme.light));
                assert_eq!(style.stroke, Some(theme.primary));
            }
            other => panic!("expected header rect, got {:?}", other),
        }
        let title = page.find_text("Festival Receipt").unwrap();
        assert_eq!((title.x, title.y), (105.0, TITLE_Y));
        assert_eq!(title.style.size, TITLE_SIZE);
        assert_eq!(title.style.color, theme.primary);
    }

    #[test]
    fn subtitle_is_optional() {
        let theme = ThemeId::Saffron.theme();
        let mut page = Page::new(210.0, 297.0);
        draw_header(&mut page, &theme, "T", Some("Ganesh Chaturthi 2024"), false);
        let subtitle = page.find_text("Ganesh Chaturthi 2024").unwrap();
        assert_eq!(subtitle.y, SUBTITLE_Y);
        assert_eq!(subtitle.style.color, Rgb::DARK_GRAY);
    }

    #[test]
    fn logo_badge_uses_title_initial() {
        let theme = ThemeId::Green.theme();
        let mut page = Page::new(210.0, 297.0);
        draw_header(&mut page, &theme, "sri sai seva", None, true);
        let badge = page.find_text("S").unwrap();
        assert_eq!(badge.style.color, Rgb::WHITE);
    }

    #[test]
    fn long_titles_shrink_to_fit() {
        let theme = ThemeId::Saffron.theme();
        let mut page = Page::new(148.0, 210.0);
        let title = "Sri Sri Sri Vinayaka Navaratri Utsava Committee";
        draw_header(&mut page, &theme, title, None, true);
        let placed = page.find_text(title).unwrap();
        assert!(placed.style.size < TITLE_SIZE);
    }
}

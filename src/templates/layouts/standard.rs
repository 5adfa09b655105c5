use super::common::{draw_header, draw_page_border, draw_signature};
use crate::models::{Layout, PaymentStatus};
use crate::pdf::{fit_text, Page, RectStyle, Rgb, TextStyle};
use crate::templates::helpers::{amount_in_words, format_amount, receipt_date, receipt_number, rupees, towards_line};
use crate::templates::template_trait::{ReceiptTemplate, RenderContext};

const META_Y: f32 = 55.0;
const STATUS_Y: f32 = 62.0;
const EDGE_X: f32 = 15.0;
const BODY_X: f32 = 20.0;
const BODY_TOP: f32 = 80.0;
const AMOUNT_BOX_MIN_WIDTH: f32 = 70.0;
const AMOUNT_BOX_HEIGHT: f32 = 20.0;

/// "Received with thanks" receipt: header, donor and amount lines flowing
/// down the page, a boxed amount, then a fixed footer.
pub struct StandardLayout;

impl StandardLayout {
    pub fn new() -> Self {
        Self
    }

    fn draw_meta(&self, page: &mut Page, ctx: &RenderContext<'_>) {
        let style = TextStyle::new(11.0).color(Rgb::DARK_GRAY);
        if ctx.config.show_receipt_no && !ctx.donation.id.trim().is_empty() {
            page.add_text(
                format!("Receipt No: {}", receipt_number(&ctx.donation.id)),
                EDGE_X,
                META_Y,
                style.bold(),
            );
        }
        if ctx.config.show_date {
            page.add_text(
                format!("Date: {}", receipt_date(ctx.donation)),
                page.width() - EDGE_X,
                META_Y,
                style.right(),
            );
        }
    }

    /// Side annotation at a fixed position; never moves the body flow.
    fn draw_status(&self, page: &mut Page, ctx: &RenderContext<'_>) {
        let (text, color) = match ctx.state.status(ctx.donation.amount) {
            Some(PaymentStatus::Pending { due }) => {
                (format!("PAYMENT PENDING: Rs. {}/-", format_amount(due)), Rgb::RED)
            }
            Some(PaymentStatus::PaidInFull) => ("PAID IN FULL".to_string(), Rgb::GREEN),
            None => return,
        };
        page.add_text(
            text,
            page.width() - EDGE_X,
            STATUS_Y,
            TextStyle::new(11.0).bold().color(color).right(),
        );
    }

    fn draw_body(&self, page: &mut Page, ctx: &RenderContext<'_>) {
        let theme = ctx.theme();
        let donation = ctx.donation;
        let max_width = page.width() - 2.0 * BODY_X;
        let mut y = BODY_TOP;

        page.add_text(
            "Received with thanks from:",
            BODY_X,
            y,
            TextStyle::new(12.0).italic().color(Rgb::GRAY),
        );

        y += 12.0;
        let name_style = TextStyle::new(24.0).bold().color(theme.primary);
        page.add_text(fit_text(donation.display_name(), &name_style, max_width), BODY_X, y, name_style);

        y += 14.0;
        page.add_text(
            format!("The Sum of Rupees: {}/-", format_amount(donation.amount)),
            BODY_X,
            y,
            TextStyle::new(14.0),
        );

        y += 7.0;
        page.add_text(
            format!("({})", amount_in_words(donation.amount)),
            BODY_X,
            y,
            TextStyle::new(10.0).italic().color(Rgb::GRAY),
        );

        y += 11.0;
        let towards_style = TextStyle::new(14.0);
        page.add_text(fit_text(&towards_line(donation), &towards_style, max_width), BODY_X, y, towards_style);

        y += 10.0;
        let amount = rupees(donation.amount);
        let amount_style = TextStyle::new(20.0).bold().color(theme.primary).centered();
        let box_width = (amount_style.width_of(&amount) + 20.0).max(AMOUNT_BOX_MIN_WIDTH);
        page.add_rect(
            BODY_X,
            y,
            box_width,
            AMOUNT_BOX_HEIGHT,
            RectStyle::filled(theme.light).with_stroke(theme.primary).line_width(1.0).rounded(3.0),
        )
        .add_text(amount, BODY_X + box_width / 2.0, y + 13.5, amount_style);
    }

    fn draw_footer(&self, page: &mut Page, ctx: &RenderContext<'_>) {
        let (w, h) = (page.width(), page.height());
        draw_signature(page, h - 55.0);
        let style = TextStyle::new(11.0).italic().color(Rgb::DARK_GRAY).centered();
        page.add_text(fit_text(&ctx.config.footer_text, &style, w - 30.0), w / 2.0, h - 25.0, style);
    }
}

impl Default for StandardLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptTemplate for StandardLayout {
    fn render(&self, ctx: &RenderContext<'_>) -> Page {
        let title = ctx.config.title_or(self.default_title());
        let mut page = Page::from_config(ctx.pdf).with_title(format!("{} - {}", title, ctx.donation.display_name()));

        draw_page_border(&mut page, ctx.theme());
        draw_header(&mut page, ctx.theme(), title, ctx.config.sub_title.as_deref(), ctx.config.show_logo);
        self.draw_meta(&mut page, ctx);
        self.draw_status(&mut page, ctx);
        self.draw_body(&mut page, ctx);
        self.draw_footer(&mut page, ctx);

        page
    }

    fn layout(&self) -> Layout {
        Layout::Standard
    }

    fn default_title(&self) -> &str {
        "Festival Receipt"
    }

    fn description(&self) -> &str {
        "Standard receipt with boxed amount"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PdfConfig;
    use crate::models::{Donation, ReceiptConfig};

    fn render(donation: &Donation, config: &ReceiptConfig) -> Page {
        let resolved = config.resolve();
        let pdf = PdfConfig::default();
        StandardLayout::new().render(&RenderContext::new(donation, &resolved, &pdf))
    }

    fn cash(amount: f64, received: Option<f64>) -> Donation {
        Donation {
            id: "a1b2c3d4e5f6".to_string(),
            name_english: Some("Lakshmi Devi".to_string()),
            amount,
            received_amount: received,
            donation_mode: Some("cash".to_string()),
            created_at: Some("2024-09-07T10:00:00+05:30".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn prints_meta_line() {
        let page = render(&cash(501.0, Some(501.0)), &ReceiptConfig::default());
        let number = page.find_text("Receipt No: #A1B2C3D4").unwrap();
        assert_eq!((number.x, number.y), (EDGE_X, META_Y));
        let date = page.find_text("Date: 07/09/2024").unwrap();
        assert_eq!(date.x, 210.0 - EDGE_X);
        assert_eq!(date.style.align, crate::pdf::TextAlign::Right);
    }

    #[test]
    fn meta_line_respects_flags() {
        let config = ReceiptConfig {
            show_date: Some(false),
            show_receipt_no: Some(false),
            ..Default::default()
        };
        let page = render(&cash(501.0, None), &config);
        assert!(!page.texts().any(|t| t.content.starts_with("Date:")));
        assert!(!page.texts().any(|t| t.content.starts_with("Receipt No:")));
    }

    #[test]
    fn status_annotation_does_not_shift_body() {
        let pending = render(&cash(10000.0, Some(4000.0)), &ReceiptConfig::default());
        let zero = render(&cash(0.0, None), &ReceiptConfig::default());

        let status = pending.find_text("PAYMENT PENDING: Rs. 6000/-").unwrap();
        assert_eq!(status.style.color, Rgb::RED);
        assert!(!zero.texts().any(|t| t.content.contains("PAID") || t.content.contains("PENDING")));

        let label_y = |page: &Page| page.find_text("Received with thanks from:").unwrap().y;
        assert_eq!(label_y(&pending), label_y(&zero));
    }

    #[test]
    fn paid_in_full_is_green() {
        let page = render(&cash(5001.0, Some(5001.0)), &ReceiptConfig::default());
        assert_eq!(page.find_text("PAID IN FULL").unwrap().style.color, Rgb::GREEN);
    }

    #[test]
    fn goods_have_no_status() {
        let donation = Donation {
            amount: 1500.0,
            donation_mode: Some("goods".to_string()),
            kind: Some("Rice 25kg".to_string()),
            ..Default::default()
        };
        let page = render(&donation, &ReceiptConfig::default());
        assert!(!page.texts().any(|t| t.content.contains("PAID") || t.content.contains("PENDING")));
        assert!(page.contains_text("Rs. 1500/-"));
    }

    #[test]
    fn body_lines_in_order() {
        let donation = Donation {
            category: crate::models::DonationCategory::Sponsorship,
            kind: Some("Idol".to_string()),
            ..cash(5001.0, Some(5001.0))
        };
        let page = render(&donation, &ReceiptConfig::default());
        let ys: Vec<f32> = [
            "Received with thanks from:",
            "Lakshmi Devi",
            "The Sum of Rupees: 5001/-",
            "(Rupees Five Thousand One Only)",
            "Towards: Sponsorship - Idol",
            "Rs. 5001/-",
        ]
        .iter()
        .map(|text| page.find_text(text).unwrap_or_else(|| panic!("missing {text}")).y)
        .collect();
        assert!(ys.windows(2).all(|pair| pair[0] < pair[1]), "{:?}", ys);
    }

    #[test]
    fn figures_and_words_agree_after_rounding() {
        let page = render(&cash(2500.999, Some(0.0)), &ReceiptConfig::default());
        assert!(page.contains_text("The Sum of Rupees: 2501/-"));
        assert!(page.contains_text("(Rupees Two Thousand Five Hundred One Only)"));
        assert!(page.contains_text("Rs. 2501/-"));
        assert!(page.contains_text("PAYMENT PENDING: Rs. 2501/-"));
    }

    #[test]
    fn footer_is_pinned_to_page_bottom() {
        let config = ReceiptConfig {
            footer_text: Some("Jai Ganesh!".to_string()),
            ..Default::default()
        };
        let page = render(&cash(100.0, None), &config);
        assert_eq!(page.find_text("Jai Ganesh!").unwrap().y, 297.0 - 25.0);
        assert_eq!(page.find_text("Authorized Signature").unwrap().y, 297.0 - 49.0);
    }
}

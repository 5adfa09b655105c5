use super::common::{draw_header, draw_page_border, draw_signature};
use crate::models::{DonationMode, Layout};
use crate::pdf::{fit_text, Page, RectStyle, Rgb, TextStyle};
use crate::templates::helpers::{receipt_date, receipt_number, rupees_indian, towards_line};
use crate::templates::template_trait::{ReceiptTemplate, RenderContext};
use crate::templates::theme::Theme;

pub const LEDGER_ROWS: [(DonationMode, &str); 3] = [
    (DonationMode::Goods, "Goods"),
    (DonationMode::Service, "Services"),
    (DonationMode::Cash, "Cash"),
];

const EDGE_X: f32 = 15.0;
const META_Y: f32 = 58.0;
const RECEIVED_OF_Y: f32 = 72.0;
pub const TABLE_TOP: f32 = 84.0;
pub const HEADER_ROW_HEIGHT: f32 = 10.0;
pub const ROW_HEIGHT: f32 = 12.0;
const LABEL_COLUMN: f32 = 40.0;
const AMOUNT_COLUMN: f32 = 40.0;
const CELL_PAD: f32 = 3.0;
const BREAKDOWN_GAP: f32 = 8.0;
const BREAKDOWN_LINE: f32 = 8.0;

/// Column edges of the ledger grid for a given page width.
#[derive(Debug, Clone, Copy)]
pub struct Columns {
    pub left: f32,
    pub description: f32,
    pub amount: f32,
    pub right: f32,
}

impl Columns {
    pub fn for_width(page_width: f32) -> Self {
        let left = EDGE_X;
        let right = page_width - EDGE_X;
        Columns {
            left,
            description: left + LABEL_COLUMN,
            amount: right - AMOUNT_COLUMN,
            right,
        }
    }

    pub fn label_x(&self) -> f32 {
        self.left + CELL_PAD
    }

    pub fn description_x(&self) -> f32 {
        self.description + CELL_PAD
    }

    pub fn amount_x(&self) -> f32 {
        self.right - CELL_PAD
    }
}

/// Formal receipt with a Goods / Services / Cash ledger, a total row and,
/// for cash, a received / balance breakdown.
pub struct TableLayout;

impl TableLayout {
    pub fn new() -> Self {
        Self
    }

    /// Ruled "form field": label, line, and the value sitting on the line.
    fn draw_field(&self, page: &mut Page, label: &str, x: f32, line_to: f32, y: f32, value: &str, value_style: TextStyle) {
        let label_style = TextStyle::new(11.0).bold().color(Rgb::INK);
        let line_from = x + label_style.width_of(label) + 2.0;
        page.add_text(label, x, y, label_style)
            .add_rule(line_from, line_to, y + 1.5, Rgb::GRAY);
        let value = fit_text(value, &value_style, line_to - line_from - 4.0);
        page.add_text(value, line_from + 2.0, y, value_style);
    }

    fn draw_meta(&self, page: &mut Page, ctx: &RenderContext<'_>) {
        let w = page.width();
        let value_style = TextStyle::new(11.0).color(Rgb::INK);
        if ctx.config.show_receipt_no && !ctx.donation.id.trim().is_empty() {
            self.draw_field(
                page,
                "No.",
                EDGE_X,
                w / 2.0 - 20.0,
                META_Y,
                &receipt_number(&ctx.donation.id),
                value_style.bold().color(ctx.theme().primary),
            );
        }
        if ctx.config.show_date {
            self.draw_field(page, "Date:", w - 75.0, w - EDGE_X, META_Y, &receipt_date(ctx.donation), value_style);
        }
    }

    fn draw_received_of(&self, page: &mut Page, ctx: &RenderContext<'_>) {
        let w = page.width();
        let name_style = TextStyle::new(14.0).bold().color(ctx.theme().primary);
        self.draw_field(
            page,
            "Received of:",
            EDGE_X,
            w - EDGE_X,
            RECEIVED_OF_Y,
            ctx.donation.display_name(),
            name_style,
        );
    }

    fn draw_cell(&self, page: &mut Page, x1: f32, x2: f32, top: f32, height: f32, style: RectStyle) {
        page.add_rect(x1, top, x2 - x1, height, style);
    }

    fn draw_row_cells(&self, page: &mut Page, cols: &Columns, top: f32, height: f32, theme: &Theme, amount_fill: Option<Rgb>) {
        let outline = RectStyle::outline(theme.primary).line_width(0.4);
        self.draw_cell(page, cols.left, cols.description, top, height, outline);
        self.draw_cell(page, cols.description, cols.amount, top, height, outline);
        let amount_style = match amount_fill {
            Some(fill) => RectStyle::filled(fill).with_stroke(theme.primary).line_width(0.4),
            None => outline,
        };
        self.draw_cell(page, cols.amount, cols.right, top, height, amount_style);
    }

    fn draw_column_header(&self, page: &mut Page, cols: &Columns, theme: &Theme) {
        let top = TABLE_TOP;
        let fill = RectStyle::filled(theme.light).with_stroke(theme.primary).line_width(0.4);
        self.draw_cell(page, cols.left, cols.description, top, HEADER_ROW_HEIGHT, fill);
        self.draw_cell(page, cols.description, cols.amount, top, HEADER_ROW_HEIGHT, fill);
        self.draw_cell(page, cols.amount, cols.right, top, HEADER_ROW_HEIGHT, fill);

        let style = TextStyle::new(10.0).bold().color(theme.primary);
        let baseline = top + 6.5;
        page.add_text("Mode", cols.label_x(), baseline, style)
            .add_text("Particulars", cols.description_x(), baseline, style)
            .add_text("Amount", cols.amount_x(), baseline, style.right());
    }

    /// Draws the three ledger rows; only the row matching the donation mode
    /// carries a description and amount. Returns the bottom edge.
    fn draw_ledger(&self, page: &mut Page, cols: &Columns, ctx: &RenderContext<'_>) -> f32 {
        let theme = ctx.theme();
        let donation = ctx.donation;
        let label_style = TextStyle::new(11.0).bold().color(Rgb::INK);
        let text_style = TextStyle::new(11.0).color(Rgb::INK);
        let mut top = TABLE_TOP + HEADER_ROW_HEIGHT;

        for (mode, label) in LEDGER_ROWS {
            self.draw_row_cells(page, cols, top, ROW_HEIGHT, theme, None);
            let baseline = top + 7.5;
            page.add_text(label, cols.label_x(), baseline, label_style);

            if mode == ctx.state.mode {
                let description = match mode {
                    DonationMode::Cash => towards_line(donation),
                    DonationMode::Goods | DonationMode::Service => donation.kind().unwrap_or_default().to_string(),
                };
                let max_width = cols.amount - cols.description - 2.0 * CELL_PAD;
                page.add_text(fit_text(&description, &text_style, max_width), cols.description_x(), baseline, text_style);
                if donation.amount > 0.0 {
                    page.add_text(rupees_indian(donation.amount), cols.amount_x(), baseline, text_style.right());
                }
            }

            top += ROW_HEIGHT;
        }

        top
    }

    fn draw_total(&self, page: &mut Page, cols: &Columns, top: f32, ctx: &RenderContext<'_>) -> f32 {
        let theme = ctx.theme();
        self.draw_row_cells(page, cols, top, ROW_HEIGHT, theme, Some(theme.light));

        let baseline = top + 7.5;
        page.add_text(
            "Total",
            cols.amount - CELL_PAD,
            baseline,
            TextStyle::new(12.0).bold().color(Rgb::INK).right(),
        );
        let total = if ctx.donation.amount > 0.0 {
            rupees_indian(ctx.donation.amount)
        } else {
            "-".to_string()
        };
        page.add_text(total, cols.amount_x(), baseline, TextStyle::new(12.0).bold().color(theme.primary).right());

        top + ROW_HEIGHT
    }

    /// Received / balance lines under the total, cash donations only.
    fn draw_breakdown(&self, page: &mut Page, cols: &Columns, top: f32, ctx: &RenderContext<'_>) {
        let Some(cash) = ctx.state.cash else {
            return;
        };
        if ctx.donation.amount <= 0.0 {
            return;
        }

        let label_x = cols.amount - CELL_PAD;
        let mut y = top + BREAKDOWN_GAP;
        let style = TextStyle::new(11.0).color(Rgb::INK).right();
        page.add_text("Received:", label_x, y, style)
            .add_text(rupees_indian(cash.received_amount), cols.amount_x(), y, style);

        if cash.due_amount > 0.0 {
            y += BREAKDOWN_LINE;
            let due = style.color(Rgb::RED);
            page.add_text("Balance Due:", label_x, y, due)
                .add_text(rupees_indian(cash.due_amount), cols.amount_x(), y, due.bold());
        }
    }

    fn draw_footer(&self, page: &mut Page, ctx: &RenderContext<'_>) {
        let (w, h) = (page.width(), page.height());
        let style = TextStyle::new(11.0).italic().color(Rgb::DARK_GRAY).centered();
        page.add_text(fit_text(&ctx.config.footer_text, &style, w - 30.0), w / 2.0, h - 50.0, style);
        draw_signature(page, h - 30.0);
    }
}

impl Default for TableLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptTemplate for TableLayout {
    fn render(&self, ctx: &RenderContext<'_>) -> Page {
        let title = ctx.config.title_or(self.default_title());
        let mut page = Page::from_config(ctx.pdf).with_title(format!("{} - {}", title, ctx.donation.display_name()));
        let cols = Columns::for_width(page.width());

        draw_page_border(&mut page, ctx.theme());
        draw_header(&mut page, ctx.theme(), title, ctx.config.sub_title.as_deref(), ctx.config.show_logo);
        self.draw_meta(&mut page, ctx);
        self.draw_received_of(&mut page, ctx);
        self.draw_column_header(&mut page, &cols, ctx.theme());
        let ledger_bottom = self.draw_ledger(&mut page, &cols, ctx);
        let total_bottom = self.draw_total(&mut page, &cols, ledger_bottom, ctx);
        self.draw_breakdown(&mut page, &cols, total_bottom, ctx);
        self.draw_footer(&mut page, ctx);

        page
    }

    fn layout(&self) -> Layout {
        Layout::Table
    }

    fn default_title(&self) -> &str {
        "Charitable Donation Receipt"
    }

    fn description(&self) -> &str {
        "Formal ledger receipt with goods, services and cash rows"
    }
}

//! PDF drawing for the invoice document.
//!
//! Coordinates in this file are points with a top-left origin (the layout
//! the document was designed in); [`PdfCanvas`] translates to printpdf's
//! bottom-left millimetre space at the call boundary.

use super::layout::{
    InvoicePlan, LayoutCursor, BILLING_HEADER_HEIGHT, BILLING_ROW_HEIGHT, MARGIN,
    MEMBER_ROW_HEIGHT, PAGE_HEIGHT, PAGE_WIDTH, TABLE_HEADER_HEIGHT, TOTAL_ROW_HEIGHT,
};
use super::{format_currency, InvoiceData, InvoiceRenderError};
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference,
    Point, Rect, Rgb,
};
use std::io::BufWriter;

const RIGHT_EDGE: f32 = PAGE_WIDTH - MARGIN;

// Palette
const BRAND_GREEN: (u8, u8, u8) = (22, 163, 74);
const WATERMARK_TINT: (u8, u8, u8) = (226, 245, 232);
const DARK_BAND: (u8, u8, u8) = (31, 41, 55);
const PANEL_FILL: (u8, u8, u8) = (243, 244, 246);
const PANEL_TINT: (u8, u8, u8) = (236, 250, 241);
const PANEL_BORDER: (u8, u8, u8) = (209, 213, 219);
const ROW_SHADE: (u8, u8, u8) = (243, 244, 246);
const INK: (u8, u8, u8) = (17, 24, 39);
const MUTED: (u8, u8, u8) = (107, 114, 128);
const WHITE: (u8, u8, u8) = (255, 255, 255);

/// Render a complete single-page invoice as PDF bytes.
pub fn render_invoice(data: &InvoiceData) -> Result<Vec<u8>, InvoiceRenderError> {
    let (doc, page, layer) = PdfDocument::new(
        format!("Invoice {}", data.invoice_number),
        Mm(210.0),
        Mm(297.0),
        "Invoice",
    );

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| InvoiceRenderError::Font(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| InvoiceRenderError::Font(e.to_string()))?;

    let canvas = PdfCanvas {
        layer: doc.get_page(page).get_layer(layer),
        regular,
        bold,
    };

    let plan = InvoicePlan::for_invoice(data);

    // Watermark goes down first so every band draws over it
    draw_watermark(&canvas);
    draw_header(&canvas);
    draw_meta_box(&canvas, data);
    draw_parties(&canvas, data);
    draw_event_panel(&canvas, data);
    draw_members_table(&canvas, data, &plan);
    draw_billing_summary(&canvas, data, &plan);
    draw_footer(&canvas, &plan);

    let mut bytes: Vec<u8> = Vec::new();
    {
        let mut writer = BufWriter::new(&mut bytes);
        doc.save(&mut writer)
            .map_err(|e| InvoiceRenderError::Write(e.to_string()))?;
    }
    Ok(bytes)
}

fn draw_watermark(canvas: &PdfCanvas) {
    canvas.text("PAID", 120.0, 150.0, 520.0, true, WATERMARK_TINT);
}

fn draw_header(canvas: &PdfCanvas) {
    canvas.text("FusionX", 26.0, MARGIN, 58.0, true, BRAND_GREEN);
    canvas.text(
        "GLITZFUSION Academy  |  Live Events",
        9.0,
        MARGIN,
        72.0,
        false,
        MUTED,
    );
    canvas.hline(MARGIN, RIGHT_EDGE, 86.0, BRAND_GREEN, 2.0);
}

fn draw_meta_box(canvas: &PdfCanvas, data: &InvoiceData) {
    canvas.panel(385.0, 40.0, RIGHT_EDGE - 385.0, 48.0, PANEL_FILL, PANEL_BORDER);
    canvas.text("INVOICE", 11.0, 395.0, 56.0, true, INK);
    canvas.text(&data.invoice_number, 8.5, 395.0, 69.0, false, INK);
    canvas.text(
        &format!("Date: {}", data.invoice_date),
        8.5,
        395.0,
        81.0,
        false,
        MUTED,
    );
}

fn draw_parties(canvas: &PdfCanvas, data: &InvoiceData) {
    // Bill-To panel
    canvas.panel(MARGIN, 110.0, 240.0, 82.0, WHITE, PANEL_BORDER);
    canvas.text("BILL TO", 10.0, 50.0, 128.0, true, BRAND_GREEN);
    canvas.text(&data.customer_name, 10.0, 50.0, 146.0, true, INK);
    canvas.text(&data.customer_email, 9.0, 50.0, 161.0, false, INK);
    canvas.text(&data.customer_phone, 9.0, 50.0, 176.0, false, INK);

    // Payment panel
    canvas.panel(315.0, 110.0, RIGHT_EDGE - 315.0, 82.0, WHITE, PANEL_BORDER);
    canvas.text("PAYMENT DETAILS", 10.0, 325.0, 128.0, true, BRAND_GREEN);
    canvas.text(
        &format!("Payment ID: {}", data.payment_id),
        9.0,
        325.0,
        146.0,
        false,
        INK,
    );
    canvas.text(
        &format!("Method: {}", data.payment_method),
        9.0,
        325.0,
        161.0,
        false,
        INK,
    );
    canvas.text(
        &format!("Paid on: {}", data.payment_date),
        9.0,
        325.0,
        176.0,
        false,
        INK,
    );
}

fn draw_event_panel(canvas: &PdfCanvas, data: &InvoiceData) {
    canvas.panel(MARGIN, 205.0, RIGHT_EDGE - MARGIN, 62.0, PANEL_TINT, BRAND_GREEN);
    canvas.text("EVENT DETAILS", 10.0, 50.0, 222.0, true, BRAND_GREEN);

    // Left column: title (wrapped to the column) and schedule
    let title_lines = wrap_text(&data.event_title, 10.0, true, 250.0);
    let mut cursor = LayoutCursor::new(240.0);
    for line in title_lines.iter().take(2) {
        canvas.text(line, 10.0, 50.0, cursor.y(), true, INK);
        cursor.advance(12.0);
    }
    canvas.text(
        &format!("{} at {}", data.event_date, data.event_time),
        9.0,
        50.0,
        cursor.y().max(256.0),
        false,
        INK,
    );

    // Right column: booking code and venue
    canvas.text("Booking Code", 8.0, 340.0, 228.0, false, MUTED);
    canvas.text(&data.booking_code, 13.0, 340.0, 244.0, true, BRAND_GREEN);
    if let Some(venue) = &data.venue {
        canvas.text(venue, 9.0, 340.0, 259.0, false, INK);
    }
}

// Members table column x positions
const COL_INDEX: f32 = 50.0;
const COL_NAME: f32 = 80.0;
const COL_EMAIL: f32 = 250.0;
const COL_PHONE: f32 = 440.0;

fn draw_members_table(canvas: &PdfCanvas, data: &InvoiceData, plan: &InvoicePlan) {
    let table_y = plan.members_table_y;
    canvas.fill_rect(MARGIN, table_y, RIGHT_EDGE - MARGIN, TABLE_HEADER_HEIGHT, DARK_BAND);

    let header_baseline = table_y + 15.0;
    canvas.text("#", 9.0, COL_INDEX, header_baseline, true, WHITE);
    canvas.text("Name", 9.0, COL_NAME, header_baseline, true, WHITE);
    canvas.text("Email", 9.0, COL_EMAIL, header_baseline, true, WHITE);
    canvas.text("Phone", 9.0, COL_PHONE, header_baseline, true, WHITE);

    for (i, member) in data.members.iter().enumerate() {
        let row_top = table_y + TABLE_HEADER_HEIGHT + i as f32 * MEMBER_ROW_HEIGHT;
        if i % 2 == 1 {
            canvas.fill_rect(MARGIN, row_top, RIGHT_EDGE - MARGIN, MEMBER_ROW_HEIGHT, ROW_SHADE);
        }
        let baseline = row_top + 14.0;
        canvas.text(&format!("{}", i + 1), 9.0, COL_INDEX, baseline, false, INK);
        canvas.text(&member.name, 9.0, COL_NAME, baseline, false, INK);
        canvas.text(&member.email, 9.0, COL_EMAIL, baseline, false, INK);
        canvas.text(&member.phone, 9.0, COL_PHONE, baseline, false, INK);
    }
}

fn draw_billing_summary(canvas: &PdfCanvas, data: &InvoiceData, plan: &InvoicePlan) {
    let billing_y = plan.billing_y;
    canvas.fill_rect(MARGIN, billing_y, RIGHT_EDGE - MARGIN, BILLING_HEADER_HEIGHT, DARK_BAND);
    let header_baseline = billing_y + 15.0;
    canvas.text("Description", 9.0, 50.0, header_baseline, true, WHITE);
    canvas.text_right("Amount", 9.0, RIGHT_EDGE - 10.0, header_baseline, true, WHITE);

    // Base booking line with the event title as a sub-caption
    let mut cursor = LayoutCursor::new(billing_y + BILLING_HEADER_HEIGHT);
    let base_baseline = cursor.y() + 13.0;
    let member_count = data.members.len();
    let base_label = if member_count == 1 {
        "Event Booking (1 member)".to_string()
    } else {
        format!("Event Booking ({} members)", member_count)
    };
    canvas.text(&base_label, 10.0, 50.0, base_baseline, false, INK);
    let caption = wrap_text(&data.event_title, 8.0, false, 300.0);
    if let Some(first_line) = caption.first() {
        canvas.text(first_line, 8.0, 50.0, base_baseline + 11.0, false, MUTED);
    }
    canvas.text_right(
        &format_currency(data.subtotal),
        10.0,
        RIGHT_EDGE - 10.0,
        base_baseline,
        false,
        INK,
    );
    cursor.advance(super::layout::BASE_ROW_HEIGHT);

    if let Some(taxes) = data.drawn_taxes() {
        let baseline = cursor.y() + 13.0;
        canvas.text("Taxes", 10.0, 50.0, baseline, false, INK);
        canvas.text_right(
            &format_currency(taxes),
            10.0,
            RIGHT_EDGE - 10.0,
            baseline,
            false,
            INK,
        );
        cursor.advance(BILLING_ROW_HEIGHT);
    }

    if let Some(discount) = data.drawn_discount() {
        let baseline = cursor.y() + 13.0;
        canvas.text("Discount", 10.0, 50.0, baseline, false, INK);
        canvas.text_right(
            &format!("- {}", format_currency(discount)),
            10.0,
            RIGHT_EDGE - 10.0,
            baseline,
            false,
            INK,
        );
        cursor.advance(BILLING_ROW_HEIGHT);
    }

    // Emphasized total band
    let total_top = cursor.y();
    canvas.fill_rect(MARGIN, total_top, RIGHT_EDGE - MARGIN, TOTAL_ROW_HEIGHT, DARK_BAND);
    let total_baseline = total_top + 17.0;
    canvas.text("Total", 11.0, 50.0, total_baseline, true, WHITE);
    canvas.text_right(
        &format_currency(data.total_amount),
        12.0,
        RIGHT_EDGE - 10.0,
        total_baseline,
        true,
        BRAND_GREEN,
    );
}

fn draw_footer(canvas: &PdfCanvas, plan: &InvoicePlan) {
    let spacing = if plan.compact_footer { 12.0 } else { 16.0 };
    let mut cursor = LayoutCursor::new(plan.footer_y);

    canvas.text(
        "Thank you for booking with FusionX!",
        10.0,
        MARGIN,
        cursor.y(),
        true,
        INK,
    );
    cursor.advance(spacing);
    canvas.text(
        "Questions? support@glitzfusion.in  |  www.glitzfusion.in",
        8.5,
        MARGIN,
        cursor.y(),
        false,
        MUTED,
    );
    cursor.advance(spacing);
    canvas.text(
        "This is a computer-generated invoice and does not require a signature.",
        8.0,
        MARGIN,
        cursor.y(),
        false,
        MUTED,
    );
}

/// Thin wrapper over a printpdf layer working in top-origin points.
struct PdfCanvas {
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl PdfCanvas {
    fn text(&self, s: &str, size: f32, x: f32, baseline_y: f32, bold: bool, color: (u8, u8, u8)) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.set_fill_color(rgb(color));
        self.layer
            .use_text(s, size, mm(x), mm(PAGE_HEIGHT - baseline_y), font);
    }

    /// Right-align text so its end sits at `right_x`.
    fn text_right(
        &self,
        s: &str,
        size: f32,
        right_x: f32,
        baseline_y: f32,
        bold: bool,
        color: (u8, u8, u8),
    ) {
        let x = right_x - text_width(s, size, bold);
        self.text(s, size, x, baseline_y, bold, color);
    }

    fn fill_rect(&self, x: f32, y_top: f32, w: f32, h: f32, color: (u8, u8, u8)) {
        self.layer.set_fill_color(rgb(color));
        self.layer.add_rect(
            Rect::new(
                mm(x),
                mm(PAGE_HEIGHT - (y_top + h)),
                mm(x + w),
                mm(PAGE_HEIGHT - y_top),
            )
            .with_mode(PaintMode::Fill),
        );
    }

    /// Filled and stroked panel box.
    fn panel(
        &self,
        x: f32,
        y_top: f32,
        w: f32,
        h: f32,
        fill: (u8, u8, u8),
        border: (u8, u8, u8),
    ) {
        self.layer.set_fill_color(rgb(fill));
        self.layer.set_outline_color(rgb(border));
        self.layer.set_outline_thickness(0.8);
        self.layer.add_rect(
            Rect::new(
                mm(x),
                mm(PAGE_HEIGHT - (y_top + h)),
                mm(x + w),
                mm(PAGE_HEIGHT - y_top),
            )
            .with_mode(PaintMode::FillStroke),
        );
    }

    fn hline(&self, x1: f32, x2: f32, y: f32, color: (u8, u8, u8), thickness: f32) {
        self.layer.set_outline_color(rgb(color));
        self.layer.set_outline_thickness(thickness);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(mm(x1), mm(PAGE_HEIGHT - y)), false),
                (Point::new(mm(x2), mm(PAGE_HEIGHT - y)), false),
            ],
            is_closed: false,
        });
    }
}

fn mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(Rgb::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        None,
    ))
}

/// Helvetica advance widths for ASCII 0x20..=0x7E, in 1/1000 em (AFM
/// values). printpdf exposes no metrics for built-in fonts, so alignment
/// and wrapping measure against this table; non-ASCII falls back to the
/// average glyph width.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

const FALLBACK_WIDTH: u16 = 556;
const BOLD_WIDTH_FACTOR: f32 = 1.05;

fn char_width(c: char) -> u16 {
    let code = c as usize;
    if (0x20..=0x7e).contains(&code) {
        HELVETICA_WIDTHS[code - 0x20]
    } else {
        FALLBACK_WIDTH
    }
}

/// Measured width of `text` at `size` points.
pub(crate) fn text_width(text: &str, size: f32, bold: bool) -> f32 {
    let units: u32 = text.chars().map(|c| char_width(c) as u32).sum();
    let width = units as f32 / 1000.0 * size;
    if bold {
        width * BOLD_WIDTH_FACTOR
    } else {
        width
    }
}

/// Greedy word wrap honoring a maximum line width in points.
///
/// A single word longer than `max_width` gets its own line rather than
/// being split mid-word.
pub(crate) fn wrap_text(text: &str, size: f32, bold: bool, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width(&candidate, size, bold) <= max_width || current.is_empty() {
            current = candidate;
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::super::tests::sample_invoice;
    use super::*;

    #[test]
    fn test_render_produces_pdf_bytes() {
        let bytes = render_invoice(&sample_invoice(1)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_grows_with_members() {
        // Both must render; the layout plan (tested separately) shifts down.
        assert!(render_invoice(&sample_invoice(1)).is_ok());
        assert!(render_invoice(&sample_invoice(5)).is_ok());
    }

    #[test]
    fn test_render_with_tax_and_discount_rows() {
        let mut data = sample_invoice(3);
        data.taxes = Some(450);
        data.discount = Some(200);
        data.total_amount = data.subtotal + 450 - 200;
        assert!(render_invoice(&data).is_ok());
    }

    #[test]
    fn test_text_width_scales_with_size() {
        let narrow = text_width("Invoice", 8.0, false);
        let wide = text_width("Invoice", 16.0, false);
        assert!((wide - narrow * 2.0).abs() < f32::EPSILON * 100.0);
        assert!(text_width("Invoice", 10.0, true) > text_width("Invoice", 10.0, false));
    }

    #[test]
    fn test_wrap_respects_max_width() {
        let lines = wrap_text("Annual Fusion Night Gala and Showcase", 10.0, false, 120.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, 10.0, false) <= 120.0);
        }
    }

    #[test]
    fn test_wrap_keeps_overlong_word_whole() {
        let lines = wrap_text("Extraordinarily-long-single-token", 10.0, false, 40.0);
        assert_eq!(lines.len(), 1);
    }
}

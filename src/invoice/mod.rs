//! Invoice PDF generation.
//!
//! Produces a single-page A4 financial document from an [`InvoiceData`]
//! value: header band, invoice meta box, bill-to and payment panels, event
//! panel, a members table that grows with the booking, a billing summary
//! with optional tax/discount rows, and a dynamically positioned footer.
//!
//! Layout is absolute-coordinate placement driven by a small cursor/plan
//! abstraction in [`layout`]; the visual contract (positions, bands,
//! shading) is fixed, while vertical offsets below the members table shift
//! with member count.

mod layout;
mod pdf;

pub use layout::{InvoicePlan, PAGE_HEIGHT, PAGE_WIDTH};
pub use pdf::render_invoice;

use crate::booking::{BookingData, Member, PaymentInfo};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Invoice rendering errors. Fatal to the one document only; the
/// dispatcher catches these and sends without the attachment.
#[derive(Debug, thiserror::Error)]
pub enum InvoiceRenderError {
    #[error("failed to prepare invoice font: {0}")]
    Font(String),

    #[error("failed to compose invoice page: {0}")]
    Page(String),

    #[error("failed to write invoice document: {0}")]
    Write(String),
}

/// Everything the renderer needs for one invoice.
///
/// Constructed once per payment-confirmation send; immutable; the renderer
/// trusts the caller's financial math (`total_amount` vs subtotal/taxes/
/// discount is not re-derived).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceData {
    pub invoice_number: String,
    pub invoice_date: String,
    pub payment_id: String,
    pub payment_method: String,
    pub payment_date: String,
    pub booking_code: String,
    pub event_title: String,
    pub event_date: String,
    pub event_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    /// Whole rupees.
    pub subtotal: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<i64>,
    pub total_amount: i64,
    pub members: Vec<Member>,
}

impl InvoiceData {
    /// Assemble invoice data the way the payment-confirmation flow does:
    /// customer identity from the primary member, amounts from the payment
    /// record, invoice number/date from the current date.
    #[must_use]
    pub fn from_booking(booking: &BookingData, payment: &PaymentInfo) -> Self {
        let primary = booking.primary_member();
        Self {
            invoice_number: generate_invoice_number(&booking.booking_code, &payment.payment_id),
            invoice_date: format_invoice_date(Local::now().date_naive()),
            payment_id: payment.payment_id.clone(),
            payment_method: payment.payment_method.clone(),
            payment_date: payment.payment_date.clone(),
            booking_code: booking.booking_code.clone(),
            event_title: booking.event_title.clone(),
            event_date: booking.date.clone(),
            event_time: booking.time.clone(),
            venue: Some(booking.venue.clone()).filter(|v| !v.is_empty()),
            customer_name: primary.map(|m| m.name.clone()).unwrap_or_default(),
            customer_email: primary.map(|m| m.email.clone()).unwrap_or_default(),
            customer_phone: primary.map(|m| m.phone.clone()).unwrap_or_default(),
            subtotal: payment.amount,
            taxes: None,
            discount: None,
            total_amount: payment.amount,
            members: booking.members.clone(),
        }
    }

    /// Tax amount that should actually be drawn (present and positive).
    #[must_use]
    pub(crate) fn drawn_taxes(&self) -> Option<i64> {
        self.taxes.filter(|t| *t > 0)
    }

    /// Discount amount that should actually be drawn (present and positive).
    #[must_use]
    pub(crate) fn drawn_discount(&self) -> Option<i64> {
        self.discount.filter(|d| *d > 0)
    }
}

/// Deterministic invoice number:
/// `FX-{YYYY}-{MM}-{DD}-{bookingCode}-{last 4 of paymentId, uppercased}`.
///
/// Uses the current date at generation time, not the payment date — the
/// invoice-issued date may legitimately differ from the payment date.
#[must_use]
pub fn generate_invoice_number(booking_code: &str, payment_id: &str) -> String {
    generate_invoice_number_on(booking_code, payment_id, Local::now().date_naive())
}

/// Date-injectable form of [`generate_invoice_number`], used by tests.
#[must_use]
pub fn generate_invoice_number_on(
    booking_code: &str,
    payment_id: &str,
    date: NaiveDate,
) -> String {
    let chars: Vec<char> = payment_id.chars().collect();
    let start = chars.len().saturating_sub(4);
    let suffix: String = chars[start..].iter().collect::<String>().to_uppercase();
    format!(
        "FX-{}-{}-{}",
        date.format("%Y-%m-%d"),
        booking_code,
        suffix
    )
}

/// Long-form invoice date, e.g. "15 January 2024".
///
/// Fixed to Indian English conventions regardless of deployment locale;
/// a hardcoded business decision.
#[must_use]
pub fn format_invoice_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

/// Render a whole-rupee amount as `Rs. {grouped}`.
///
/// Grouping follows the Indian numbering system (last three digits, then
/// groups of two): `Rs. 1,00,000`. No decimal places anywhere in this
/// subsystem.
#[must_use]
pub fn format_currency(amount: i64) -> String {
    format!("Rs. {}", group_digits(amount))
}

fn group_digits(amount: i64) -> String {
    let negative = amount < 0;
    let digits: Vec<char> = amount.unsigned_abs().to_string().chars().collect();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 2 + 1);
    if negative {
        grouped.push('-');
    }
    for (i, c) in digits.iter().enumerate() {
        let remaining = digits.len() - i;
        // Indian system: a comma before the last three digits, then
        // before every second digit above that
        let boundary = remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0);
        if i > 0 && boundary {
            grouped.push(',');
        }
        grouped.push(*c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_number_format() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(
            generate_invoice_number_on("FX001", "pay_test123456", date),
            "FX-2026-03-07-FX001-3456"
        );
    }

    #[test]
    fn test_invoice_number_uppercases_alphabetic_suffix() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(
            generate_invoice_number_on("FX001", "pay_abcXYZ", date),
            "FX-2026-03-07-FX001-CXYZ"
        );
    }

    #[test]
    fn test_invoice_number_short_payment_id() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(
            generate_invoice_number_on("FX001", "ab", date),
            "FX-2026-03-07-FX001-AB"
        );
    }

    #[test]
    fn test_invoice_date_long_form() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(format_invoice_date(date), "15 January 2024");
        let single_digit = NaiveDate::from_ymd_opt(2024, 9, 5).unwrap();
        assert_eq!(format_invoice_date(single_digit), "5 September 2024");
    }

    #[test]
    fn test_currency_grouping() {
        assert_eq!(format_currency(0), "Rs. 0");
        assert_eq!(format_currency(999), "Rs. 999");
        assert_eq!(format_currency(2500), "Rs. 2,500");
        assert_eq!(format_currency(100000), "Rs. 1,00,000");
        assert_eq!(format_currency(12345678), "Rs. 1,23,45,678");
    }

    #[test]
    fn test_drawn_rows_skip_zero_amounts() {
        let mut data = sample_invoice(1);
        data.taxes = Some(0);
        data.discount = None;
        assert!(data.drawn_taxes().is_none());
        assert!(data.drawn_discount().is_none());

        data.taxes = Some(450);
        data.discount = Some(100);
        assert_eq!(data.drawn_taxes(), Some(450));
        assert_eq!(data.drawn_discount(), Some(100));
    }

    pub(crate) fn sample_invoice(members: usize) -> InvoiceData {
        InvoiceData {
            invoice_number: "FX-2026-03-07-FX001-3456".to_string(),
            invoice_date: "7 March 2026".to_string(),
            payment_id: "pay_test123456".to_string(),
            payment_method: "UPI".to_string(),
            payment_date: "7 March 2026".to_string(),
            booking_code: "FX001".to_string(),
            event_title: "Fusion Night 2026".to_string(),
            event_date: "15 March 2026".to_string(),
            event_time: "7:00 PM".to_string(),
            venue: Some("GLITZFUSION Arena".to_string()),
            customer_name: "Asha Rao".to_string(),
            customer_email: "asha@test.com".to_string(),
            customer_phone: "9000000001".to_string(),
            subtotal: 2500,
            taxes: None,
            discount: None,
            total_amount: 2500,
            members: (0..members)
                .map(|i| {
                    Member::new(
                        format!("Member {i}"),
                        format!("m{i}@test.com"),
                        "9000000000",
                    )
                })
                .collect(),
        }
    }
}

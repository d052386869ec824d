//! HTML bodies and plain-text fallbacks for every outgoing email.
//!
//! Copy and styling follow the FusionX brand; every builder returns the
//! pair `(html, text)` so a send can never go out HTML-only.

use crate::booking::{BookingData, PaymentInfo};
use crate::config::BrandConfig;
use crate::invoice::format_currency;

const BRAND_GREEN: &str = "#16a34a";
const DARK: &str = "#1f2937";
const MUTED: &str = "#6b7280";

fn shell(brand: &BrandConfig, title: &str, body: String) -> String {
    format!(
        r#"<div style="font-family:Arial,Helvetica,sans-serif;max-width:600px;margin:0 auto;color:{DARK};">
  <div style="background:{BRAND_GREEN};padding:24px;text-align:center;">
    <h1 style="color:#ffffff;margin:0;font-size:24px;">{brand_name}</h1>
    <p style="color:#dcfce7;margin:4px 0 0;font-size:12px;">{academy}</p>
  </div>
  <div style="padding:24px;">
    <h2 style="margin-top:0;font-size:18px;">{title}</h2>
    {body}
  </div>
  <div style="background:#f3f4f6;padding:16px;text-align:center;font-size:11px;color:{MUTED};">
    <p style="margin:0;">Questions? Write to {support} &bull; {website}</p>
  </div>
</div>"#,
        brand_name = brand.brand_name,
        academy = brand.academy_name,
        title = title,
        body = body,
        support = brand.support_email,
        website = brand.website,
    )
}

fn event_summary_html(booking: &BookingData) -> String {
    format!(
        r#"<table style="width:100%;border-collapse:collapse;font-size:13px;">
      <tr><td style="padding:4px 0;color:{MUTED};">Event</td><td style="padding:4px 0;"><strong>{event}</strong></td></tr>
      <tr><td style="padding:4px 0;color:{MUTED};">Date</td><td style="padding:4px 0;">{date} at {time}</td></tr>
      <tr><td style="padding:4px 0;color:{MUTED};">Venue</td><td style="padding:4px 0;">{venue}</td></tr>
      <tr><td style="padding:4px 0;color:{MUTED};">Booking Code</td><td style="padding:4px 0;"><strong style="color:{BRAND_GREEN};">{code}</strong></td></tr>
      <tr><td style="padding:4px 0;color:{MUTED};">Members</td><td style="padding:4px 0;">{members}</td></tr>
      <tr><td style="padding:4px 0;color:{MUTED};">Total</td><td style="padding:4px 0;">{total}</td></tr>
    </table>"#,
        event = booking.event_title,
        date = booking.date,
        time = booking.time,
        venue = booking.venue,
        code = booking.booking_code,
        members = booking.member_count(),
        total = format_currency(booking.total_amount),
    )
}

fn event_summary_text(booking: &BookingData) -> String {
    format!(
        "Event: {}\nDate: {} at {}\nVenue: {}\nBooking Code: {}\nMembers: {}\nTotal: {}",
        booking.event_title,
        booking.date,
        booking.time,
        booking.venue,
        booking.booking_code,
        booking.member_count(),
        format_currency(booking.total_amount),
    )
}

/// Booking confirmation, optionally with an inline ticket image.
pub(crate) fn booking_confirmation(
    brand: &BrandConfig,
    booking: &BookingData,
    recipient_name: &str,
    inline_ticket_cid: Option<&str>,
) -> (String, String) {
    let ticket_html = match inline_ticket_cid {
        Some(cid) => format!(
            r#"<p style="margin:16px 0 8px;">Your ticket:</p>
    <img src="cid:{cid}" alt="Your FusionX ticket" style="max-width:100%;border:1px solid #e5e7eb;"/>"#,
        ),
        None => {
            r#"<p style="margin:16px 0;">Your ticket will be available at the venue with your booking code.</p>"#
                .to_string()
        }
    };

    let body = format!(
        r#"<p>Hi {name},</p>
    <p>Your booking is confirmed. We can't wait to see you!</p>
    {summary}
    {ticket}"#,
        name = recipient_name,
        summary = event_summary_html(booking),
        ticket = ticket_html,
    );

    let html = shell(brand, "Booking Confirmed", body);
    let text = format!(
        "Hi {},\n\nYour booking is confirmed.\n\n{}\n\nQuestions? Write to {}",
        recipient_name,
        event_summary_text(booking),
        brand.support_email,
    );
    (html, text)
}

/// Payment confirmation with invoice details, optionally an inline ticket.
pub(crate) fn payment_confirmation(
    brand: &BrandConfig,
    booking: &BookingData,
    payment: &PaymentInfo,
    recipient_name: &str,
    invoice_number: &str,
    invoice_attached: bool,
    inline_ticket_cid: Option<&str>,
) -> (String, String) {
    let invoice_html = if invoice_attached {
        format!(
            r#"<p style="margin:16px 0;">Invoice <strong>{invoice_number}</strong> is attached as a PDF.</p>"#,
        )
    } else {
        format!(
            r#"<p style="margin:16px 0;">Invoice <strong>{invoice_number}</strong> will be sent separately.</p>"#,
        )
    };

    let ticket_html = match inline_ticket_cid {
        Some(cid) => format!(
            r#"<img src="cid:{cid}" alt="Your FusionX ticket" style="max-width:100%;border:1px solid #e5e7eb;"/>"#,
        ),
        None => String::new(),
    };

    let body = format!(
        r#"<p>Hi {name},</p>
    <p>We've received your payment of <strong>{amount}</strong> via {method} (payment ID {payment_id}).</p>
    {summary}
    {invoice}
    {ticket}"#,
        name = recipient_name,
        amount = format_currency(payment.amount),
        method = payment.payment_method,
        payment_id = payment.payment_id,
        summary = event_summary_html(booking),
        invoice = invoice_html,
        ticket = ticket_html,
    );

    let html = shell(brand, "Payment Received", body);
    let text = format!(
        "Hi {},\n\nWe've received your payment of {} via {} (payment ID {}).\nInvoice: {}\n\n{}\n\nQuestions? Write to {}",
        recipient_name,
        format_currency(payment.amount),
        payment.payment_method,
        payment.payment_id,
        invoice_number,
        event_summary_text(booking),
        brand.support_email,
    );
    (html, text)
}

/// Payment confirmation listing every member's ticket code; tickets are
/// attached as files.
pub(crate) fn payment_confirmation_all_tickets(
    brand: &BrandConfig,
    booking: &BookingData,
    payment: &PaymentInfo,
    recipient_name: &str,
    invoice_number: &str,
    invoice_attached: bool,
    member_codes: &[(String, String)],
) -> (String, String) {
    let rows: String = member_codes
        .iter()
        .map(|(name, code)| {
            format!(
                r#"<tr><td style="padding:4px 8px;border:1px solid #e5e7eb;">{name}</td><td style="padding:4px 8px;border:1px solid #e5e7eb;font-family:monospace;color:{BRAND_GREEN};">{code}</td></tr>"#,
            )
        })
        .collect();

    let invoice_line = if invoice_attached {
        format!("Invoice <strong>{invoice_number}</strong> is attached as a PDF.")
    } else {
        format!("Invoice <strong>{invoice_number}</strong> will be sent separately.")
    };

    let body = format!(
        r#"<p>Hi {name},</p>
    <p>We've received your payment of <strong>{amount}</strong>. {invoice_line}</p>
    {summary}
    <p style="margin:16px 0 8px;">Every ticket is attached to this email. Member codes:</p>
    <table style="border-collapse:collapse;font-size:13px;">
      <tr><th style="padding:4px 8px;border:1px solid #e5e7eb;text-align:left;">Member</th><th style="padding:4px 8px;border:1px solid #e5e7eb;text-align:left;">Code</th></tr>
      {rows}
    </table>"#,
        name = recipient_name,
        amount = format_currency(payment.amount),
        invoice_line = invoice_line,
        summary = event_summary_html(booking),
        rows = rows,
    );

    let html = shell(brand, "Payment Received - Tickets Enclosed", body);

    let code_lines: String = member_codes
        .iter()
        .map(|(name, code)| format!("  {name}: {code}\n"))
        .collect();
    let text = format!(
        "Hi {},\n\nWe've received your payment of {}.\nInvoice: {}\n\n{}\n\nMember codes:\n{}\nAll tickets are attached to this email.",
        recipient_name,
        format_currency(payment.amount),
        invoice_number,
        event_summary_text(booking),
        code_lines,
    );
    (html, text)
}

/// One-time password email. Expiry enforcement lives with the caller; the
/// 5-minute copy is part of the product contract.
pub(crate) fn otp(brand: &BrandConfig, otp_code: &str) -> (String, String) {
    let body = format!(
        r#"<p>Use this code to verify your email address:</p>
    <p style="font-size:32px;letter-spacing:8px;font-weight:bold;color:{BRAND_GREEN};text-align:center;margin:24px 0;">{otp_code}</p>
    <p style="color:{MUTED};font-size:12px;">This code is valid for 5 minutes. If you didn't request it, you can ignore this email.</p>"#,
    );
    let html = shell(brand, "Your Verification Code", body);
    let text = format!(
        "Your {} verification code is: {}\n\nThis code is valid for 5 minutes. If you didn't request it, you can ignore this email.",
        brand.brand_name, otp_code,
    );
    (html, text)
}

/// Post-check-in courtesy email.
pub(crate) fn welcome(brand: &BrandConfig, name: &str, event_title: &str) -> (String, String) {
    let body = format!(
        r#"<p>Hi {name},</p>
    <p>Welcome to <strong>{event_title}</strong> - you're checked in!</p>
    <p>Enjoy the show, and thank you for being part of the {academy} family.</p>"#,
        name = name,
        event_title = event_title,
        academy = brand.academy_name,
    );
    let html = shell(brand, "Welcome!", body);
    let text = format!(
        "Hi {},\n\nWelcome to {} - you're checked in!\nEnjoy the show, and thank you for being part of the {} family.",
        name, event_title, brand.academy_name,
    );
    (html, text)
}

/// Admissions pipeline status notification.
pub(crate) fn admission_status(
    brand: &BrandConfig,
    applicant_name: &str,
    course: &str,
    status_heading: &str,
    status_line: &str,
) -> (String, String) {
    let body = format!(
        r#"<p>Hi {applicant_name},</p>
    <p>{status_line}</p>
    <p style="margin:16px 0;">Course: <strong>{course}</strong></p>"#,
    );
    let html = shell(brand, status_heading, body);
    let text = format!(
        "Hi {},\n\n{}\nCourse: {}\n\nQuestions? Write to {}",
        applicant_name, status_line, course, brand.support_email,
    );
    (html, text)
}

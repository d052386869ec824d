//! Transactional email dispatch.
//!
//! The [`Dispatcher`] assembles booking/payment/OTP/welcome emails,
//! generates their ticket and invoice attachments, and hands finished
//! messages to a [`Mailer`]. Every operation returns a structured outcome
//! instead of propagating errors: email is a best-effort notification
//! layer, and a failed attachment or send must never fail the booking
//! that triggered it.
//!
//! Degradation policy per artifact:
//! - unconfigured SMTP → `{ success: false, error: "SMTP not configured" }`
//! - ticket render/fetch failure → email still sent, without that ticket
//! - invoice render failure → email still sent, without the PDF
//! - transport failure → `{ success: false, error: <message> }`, no retry
//!   (retry policy belongs to the caller)

mod templates;

use crate::booking::{BookingData, PaymentInfo};
use crate::config::{BrandConfig, SmtpConfig};
use crate::email::SmtpMailer;
use crate::error::{FusionError, Result};
use crate::invoice::{render_invoice, InvoiceData};
use crate::ticket::{fetch_template, render_ticket, TicketData};
use crate::traits::mailer::{Email, EmailAttachment, Mailer};
use serde::Serialize;
use std::sync::{Arc, OnceLock};

/// Result of a simple send operation (OTP, welcome, admission status).
#[derive(Debug, Clone, Serialize)]
pub struct SendOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SendOutcome {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Result of a booking-confirmation send.
#[derive(Debug, Clone, Serialize)]
pub struct BookingEmailOutcome {
    pub success: bool,
    /// Tickets successfully rendered and attached (0 or 1 here).
    pub tickets_generated: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of a payment-confirmation send.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentEmailOutcome {
    pub success: bool,
    pub invoice_generated: bool,
    /// Tickets successfully rendered and attached.
    pub tickets_generated: u32,
    /// Deterministic invoice number, present whenever the booking was
    /// valid enough to derive one (even if the PDF itself failed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PaymentEmailOutcome {
    fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            invoice_generated: false,
            tickets_generated: 0,
            invoice_number: None,
            error: Some(error.into()),
        }
    }
}

/// Admissions pipeline states that trigger an applicant email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionStatus {
    Received,
    Approved,
    Rejected,
}

impl AdmissionStatus {
    fn heading(&self) -> &'static str {
        match self {
            Self::Received => "Application Received",
            Self::Approved => "Application Approved",
            Self::Rejected => "Application Update",
        }
    }

    fn line(&self) -> &'static str {
        match self {
            Self::Received => {
                "We've received your application. Our team will review it and get back to you shortly."
            }
            Self::Approved => {
                "Congratulations! Your application has been approved. We'll contact you with the next steps."
            }
            Self::Rejected => {
                "Thank you for applying. Unfortunately we can't offer you a seat this time - we'd love to see you apply again next term."
            }
        }
    }
}

/// Content-id used for inline ticket images in HTML bodies.
const TICKET_CID: &str = "ticket";

/// Composes and sends transactional emails with generated attachments.
///
/// The mail transport is injected (tests) or lazily constructed from the
/// SMTP config on first use and cached for the dispatcher's lifetime
/// (production) — the transport pools connections internally, so one
/// instance serves all sequential sends.
///
/// # Example
///
/// ```rust,ignore
/// use fusionx::{BrandConfig, Dispatcher};
///
/// let dispatcher = Dispatcher::from_env();
/// let outcome = dispatcher
///     .send_booking_confirmation("asha@example.com", &booking, None)
///     .await;
/// if !outcome.success {
///     tracing::warn!(error = ?outcome.error, "booking email not delivered");
/// }
/// ```
pub struct Dispatcher {
    smtp: Option<SmtpConfig>,
    brand: BrandConfig,
    mailer: OnceLock<Arc<dyn Mailer>>,
}

impl Dispatcher {
    /// Create a dispatcher that builds an [`SmtpMailer`] from `smtp` on
    /// first send. With `None`, every send reports `SMTP not configured`.
    #[must_use]
    pub fn new(smtp: Option<SmtpConfig>, brand: BrandConfig) -> Self {
        Self {
            smtp,
            brand,
            mailer: OnceLock::new(),
        }
    }

    /// Build from `SMTP_*` / `FUSIONX_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(SmtpConfig::from_env(), BrandConfig::from_env())
    }

    /// Create a dispatcher with an injected mail backend (test double or
    /// alternative provider).
    #[must_use]
    pub fn with_mailer(mailer: Arc<dyn Mailer>, brand: BrandConfig) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(mailer);
        Self {
            smtp: None,
            brand,
            mailer: cell,
        }
    }

    fn mailer(&self) -> Result<Arc<dyn Mailer>> {
        if let Some(mailer) = self.mailer.get() {
            return Ok(mailer.clone());
        }
        let config = self
            .smtp
            .as_ref()
            .ok_or_else(|| FusionError::config("SMTP not configured"))?;
        let mailer: Arc<dyn Mailer> = Arc::new(SmtpMailer::new(config.clone())?);
        Ok(self.mailer.get_or_init(|| mailer).clone())
    }

    fn from_address(&self) -> String {
        self.smtp
            .as_ref()
            .and_then(|s| s.from.clone())
            .unwrap_or_else(|| self.brand.from_address.clone())
    }

    /// Booking confirmation with one inline ticket for the recipient (or
    /// the primary member when the recipient is not on the booking).
    pub async fn send_booking_confirmation(
        &self,
        to: &str,
        booking: &BookingData,
        ticket_template_url: Option<&str>,
    ) -> BookingEmailOutcome {
        if let Err(msg) = booking.validate() {
            return BookingEmailOutcome {
                success: false,
                tickets_generated: 0,
                error: Some(msg),
            };
        }
        let mailer = match self.mailer() {
            Ok(mailer) => mailer,
            Err(e) => {
                return BookingEmailOutcome {
                    success: false,
                    tickets_generated: 0,
                    error: Some(outcome_error(e)),
                }
            }
        };

        let index = booking.member_index_by_email(to).unwrap_or(0);
        let ticket_data = TicketData::for_member(booking, index);
        let ticket = self
            .render_ticket_bytes(&ticket_data, ticket_template_url)
            .await;
        let tickets_generated = u32::from(ticket.is_some());

        let recipient_name = booking
            .members
            .get(index)
            .map(|m| m.name.as_str())
            .unwrap_or("Guest");
        let (html, text) = templates::booking_confirmation(
            &self.brand,
            booking,
            recipient_name,
            ticket.is_some().then_some(TICKET_CID),
        );

        let subject = format!(
            "Booking Confirmed - {} ({})",
            booking.event_title, booking.booking_code
        );
        let mut email = Email::new(self.from_address(), to, subject)
            .html(html)
            .text(text);
        if let Some(bytes) = ticket {
            email = email.attach(EmailAttachment::inline(
                format!("ticket-{}.png", ticket_data.member_code),
                bytes,
                "image/png",
                TICKET_CID,
            ));
        }

        match mailer.send(&email).await {
            Ok(()) => {
                tracing::info!(
                    booking_code = %booking.booking_code,
                    tickets = tickets_generated,
                    "booking confirmation sent"
                );
                BookingEmailOutcome {
                    success: true,
                    tickets_generated,
                    error: None,
                }
            }
            Err(e) => BookingEmailOutcome {
                success: false,
                tickets_generated,
                error: Some(outcome_error(e)),
            },
        }
    }

    /// Payment confirmation for the paying recipient: invoice PDF attached
    /// plus one inline ticket. Either artifact may be missing if its
    /// generation failed; the email still goes out.
    pub async fn send_payment_confirmation(
        &self,
        to: &str,
        booking: &BookingData,
        payment: &PaymentInfo,
        ticket_template_url: Option<&str>,
    ) -> PaymentEmailOutcome {
        if let Err(msg) = booking.validate() {
            return PaymentEmailOutcome::failed(msg);
        }
        let mailer = match self.mailer() {
            Ok(mailer) => mailer,
            Err(e) => return PaymentEmailOutcome::failed(outcome_error(e)),
        };

        let invoice_data = InvoiceData::from_booking(booking, payment);
        let invoice_number = invoice_data.invoice_number.clone();
        let invoice_pdf = self.render_invoice_bytes(&invoice_data);

        let index = booking.member_index_by_email(to).unwrap_or(0);
        let ticket_data = TicketData::for_member(booking, index);
        let ticket = self
            .render_ticket_bytes(&ticket_data, ticket_template_url)
            .await;

        let recipient_name = booking
            .members
            .get(index)
            .map(|m| m.name.as_str())
            .unwrap_or("Guest");
        let (html, text) = templates::payment_confirmation(
            &self.brand,
            booking,
            payment,
            recipient_name,
            &invoice_number,
            invoice_pdf.is_some(),
            ticket.is_some().then_some(TICKET_CID),
        );

        let subject = format!("Payment Received - Invoice {}", invoice_number);
        let mut email = Email::new(self.from_address(), to, subject)
            .html(html)
            .text(text);

        // Attachment order contract: invoice PDF first, then tickets
        let invoice_generated = invoice_pdf.is_some();
        if let Some(bytes) = invoice_pdf {
            email = email.attach(EmailAttachment::file(
                format!("{}.pdf", invoice_number),
                bytes,
                "application/pdf",
            ));
        }
        let tickets_generated = u32::from(ticket.is_some());
        if let Some(bytes) = ticket {
            email = email.attach(EmailAttachment::inline(
                format!("ticket-{}.png", ticket_data.member_code),
                bytes,
                "image/png",
                TICKET_CID,
            ));
        }

        match mailer.send(&email).await {
            Ok(()) => {
                tracing::info!(
                    booking_code = %booking.booking_code,
                    invoice = %invoice_number,
                    invoice_generated,
                    tickets = tickets_generated,
                    "payment confirmation sent"
                );
                PaymentEmailOutcome {
                    success: true,
                    invoice_generated,
                    tickets_generated,
                    invoice_number: Some(invoice_number),
                    error: None,
                }
            }
            Err(e) => PaymentEmailOutcome {
                success: false,
                invoice_generated,
                tickets_generated,
                invoice_number: Some(invoice_number),
                error: Some(outcome_error(e)),
            },
        }
    }

    /// Payment confirmation carrying every member's ticket as a file
    /// attachment, with all member codes listed in the body.
    pub async fn send_payment_confirmation_with_all_tickets(
        &self,
        to: &str,
        booking: &BookingData,
        payment: &PaymentInfo,
        ticket_template_url: Option<&str>,
    ) -> PaymentEmailOutcome {
        if let Err(msg) = booking.validate() {
            return PaymentEmailOutcome::failed(msg);
        }
        let mailer = match self.mailer() {
            Ok(mailer) => mailer,
            Err(e) => return PaymentEmailOutcome::failed(outcome_error(e)),
        };

        let invoice_data = InvoiceData::from_booking(booking, payment);
        let invoice_number = invoice_data.invoice_number.clone();
        let invoice_pdf = self.render_invoice_bytes(&invoice_data);

        // One template fetch shared by every member's render
        let template = match ticket_template_url {
            Some(url) => match fetch_template(url).await {
                Ok(bytes) => Some(bytes),
                Err(e) => {
                    tracing::warn!(error = %e, "template fetch failed, rendering default tickets");
                    None
                }
            },
            None => None,
        };

        let mut member_codes = Vec::with_capacity(booking.members.len());
        let mut tickets = Vec::new();
        for index in 0..booking.members.len() {
            let data = TicketData::for_member(booking, index);
            member_codes.push((data.member_name.clone(), data.member_code.clone()));
            match render_ticket(&data, template.as_deref()) {
                Ok(bytes) => tickets.push((index, data.member_code.clone(), bytes)),
                Err(e) => {
                    tracing::warn!(
                        member_index = index,
                        error = %e,
                        "ticket render failed, continuing without it"
                    );
                }
            }
        }
        let tickets_generated = tickets.len() as u32;

        let index = booking.member_index_by_email(to).unwrap_or(0);
        let recipient_name = booking
            .members
            .get(index)
            .map(|m| m.name.as_str())
            .unwrap_or("Guest");
        let (html, text) = templates::payment_confirmation_all_tickets(
            &self.brand,
            booking,
            payment,
            recipient_name,
            &invoice_number,
            invoice_pdf.is_some(),
            &member_codes,
        );

        let subject = format!("Your Tickets & Invoice - {}", booking.event_title);
        let mut email = Email::new(self.from_address(), to, subject)
            .html(html)
            .text(text);

        let invoice_generated = invoice_pdf.is_some();
        if let Some(bytes) = invoice_pdf {
            email = email.attach(EmailAttachment::file(
                format!("{}.pdf", invoice_number),
                bytes,
                "application/pdf",
            ));
        }
        for (index, code, bytes) in tickets {
            email = email.attach(EmailAttachment::file(
                format!("ticket-{}-{}.png", index + 1, code),
                bytes,
                "image/png",
            ));
        }

        match mailer.send(&email).await {
            Ok(()) => {
                tracing::info!(
                    booking_code = %booking.booking_code,
                    invoice = %invoice_number,
                    invoice_generated,
                    tickets = tickets_generated,
                    "payment confirmation with all tickets sent"
                );
                PaymentEmailOutcome {
                    success: true,
                    invoice_generated,
                    tickets_generated,
                    invoice_number: Some(invoice_number),
                    error: None,
                }
            }
            Err(e) => PaymentEmailOutcome {
                success: false,
                invoice_generated,
                tickets_generated,
                invoice_number: Some(invoice_number),
                error: Some(outcome_error(e)),
            },
        }
    }

    /// One-time password email. No attachments.
    pub async fn send_otp(&self, to: &str, otp_code: &str) -> SendOutcome {
        let mailer = match self.mailer() {
            Ok(mailer) => mailer,
            Err(e) => return SendOutcome::failed(outcome_error(e)),
        };

        let (html, text) = templates::otp(&self.brand, otp_code);
        let subject = format!("{} Verification Code", self.brand.brand_name);
        let email = Email::new(self.from_address(), to, subject)
            .html(html)
            .text(text);

        match mailer.send(&email).await {
            Ok(()) => SendOutcome::ok(),
            Err(e) => SendOutcome::failed(outcome_error(e)),
        }
    }

    /// Post-check-in courtesy email. No attachments.
    pub async fn send_welcome(&self, to: &str, name: &str, event_title: &str) -> SendOutcome {
        let mailer = match self.mailer() {
            Ok(mailer) => mailer,
            Err(e) => return SendOutcome::failed(outcome_error(e)),
        };

        let (html, text) = templates::welcome(&self.brand, name, event_title);
        let subject = format!("Welcome to {}", event_title);
        let email = Email::new(self.from_address(), to, subject)
            .html(html)
            .text(text);

        match mailer.send(&email).await {
            Ok(()) => SendOutcome::ok(),
            Err(e) => SendOutcome::failed(outcome_error(e)),
        }
    }

    /// Admissions pipeline status notification. No attachments.
    pub async fn send_admission_status(
        &self,
        to: &str,
        applicant_name: &str,
        course: &str,
        status: AdmissionStatus,
    ) -> SendOutcome {
        let mailer = match self.mailer() {
            Ok(mailer) => mailer,
            Err(e) => return SendOutcome::failed(outcome_error(e)),
        };

        let (html, text) = templates::admission_status(
            &self.brand,
            applicant_name,
            course,
            status.heading(),
            status.line(),
        );
        let email = Email::new(self.from_address(), to, status.heading())
            .html(html)
            .text(text);

        match mailer.send(&email).await {
            Ok(()) => SendOutcome::ok(),
            Err(e) => SendOutcome::failed(outcome_error(e)),
        }
    }

    /// Render one ticket, fetching the template if a URL was supplied.
    /// Failures degrade to `None` with a warning; the email goes out
    /// without the image.
    async fn render_ticket_bytes(
        &self,
        data: &TicketData,
        template_url: Option<&str>,
    ) -> Option<Vec<u8>> {
        let template = match template_url {
            Some(url) => match fetch_template(url).await {
                Ok(bytes) => Some(bytes),
                Err(e) => {
                    tracing::warn!(error = %e, "template fetch failed, sending without ticket");
                    return None;
                }
            },
            None => None,
        };

        match render_ticket(data, template.as_deref()) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::warn!(error = %e, "ticket render failed, sending without ticket");
                None
            }
        }
    }

    /// Render the invoice PDF, degrading to `None` with a warning.
    fn render_invoice_bytes(&self, data: &InvoiceData) -> Option<Vec<u8>> {
        match render_invoice(data) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::warn!(
                    invoice = %data.invoice_number,
                    error = %e,
                    "invoice render failed, sending without attachment"
                );
                None
            }
        }
    }
}

/// Outcome error strings keep the bare message for configuration errors
/// ("SMTP not configured") so callers can match on them.
fn outcome_error(err: FusionError) -> String {
    match err {
        FusionError::Config(msg) => msg,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_dispatcher_reports_plain_message() {
        let dispatcher = Dispatcher::new(None, BrandConfig::default());
        let err = dispatcher.mailer().err().unwrap();
        assert_eq!(outcome_error(err), "SMTP not configured");
    }

    #[test]
    fn test_from_address_prefers_smtp_override() {
        let smtp = SmtpConfig::new("smtp.test.com", "user", "pass").from("events@test.com");
        let dispatcher = Dispatcher::new(Some(smtp), BrandConfig::default());
        assert_eq!(dispatcher.from_address(), "events@test.com");

        let bare = Dispatcher::new(None, BrandConfig::default());
        assert_eq!(bare.from_address(), BrandConfig::default().from_address);
    }
}

//! Tests for the notification dispatcher

use std::sync::Arc;

use fusionx::testing::{sample_booking, sample_payment, MemoryMailer};
use fusionx::{AdmissionStatus, BrandConfig, Dispatcher};

fn dispatcher_with(mailer: Arc<MemoryMailer>) -> Dispatcher {
    Dispatcher::with_mailer(mailer, BrandConfig::default())
}

#[tokio::test]
async fn test_unconfigured_smtp_reports_structured_failure() {
    let dispatcher = Dispatcher::new(None, BrandConfig::default());
    let booking = sample_booking(1);
    let payment = sample_payment(1500);

    let outcome = dispatcher
        .send_booking_confirmation("member1@example.com", &booking, None)
        .await;
    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("SMTP not configured"));

    let outcome = dispatcher
        .send_payment_confirmation("member1@example.com", &booking, &payment, None)
        .await;
    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("SMTP not configured"));

    let outcome = dispatcher.send_otp("member1@example.com", "482913").await;
    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("SMTP not configured"));
}

#[tokio::test]
async fn test_booking_confirmation_embeds_inline_ticket() {
    let mailer = Arc::new(MemoryMailer::new());
    let dispatcher = dispatcher_with(mailer.clone());
    let booking = sample_booking(2);

    let outcome = dispatcher
        .send_booking_confirmation("member2@example.com", &booking, None)
        .await;

    assert!(outcome.success);
    assert_eq!(outcome.tickets_generated, 1);

    let email = mailer.last().unwrap();
    assert_eq!(email.to, vec!["member2@example.com"]);
    assert!(email.html.as_deref().unwrap().contains("cid:ticket"));
    assert!(email.text.is_some());
    assert_eq!(email.attachments.len(), 1);
    assert!(email.attachments[0].is_inline());
    assert_eq!(email.attachments[0].content_type, "image/png");
}

#[tokio::test]
async fn test_payment_confirmation_attaches_invoice_then_ticket() {
    let mailer = Arc::new(MemoryMailer::new());
    let dispatcher = dispatcher_with(mailer.clone());
    let booking = sample_booking(1);
    let payment = sample_payment(1500);

    let outcome = dispatcher
        .send_payment_confirmation("member1@example.com", &booking, &payment, None)
        .await;

    assert!(outcome.success);
    assert!(outcome.invoice_generated);
    assert_eq!(outcome.tickets_generated, 1);
    let invoice_number = outcome.invoice_number.unwrap();
    assert!(invoice_number.starts_with("FX-"));
    assert!(invoice_number.ends_with("-FX001-3456"));

    let email = mailer.last().unwrap();
    assert_eq!(email.attachments.len(), 2);
    assert_eq!(email.attachments[0].content_type, "application/pdf");
    assert!(email.attachments[0].content.starts_with(b"%PDF"));
    assert_eq!(email.attachments[1].content_type, "image/png");
}

#[tokio::test]
async fn test_template_fetch_failure_still_sends_email() {
    let mailer = Arc::new(MemoryMailer::new());
    let dispatcher = dispatcher_with(mailer.clone());
    let booking = sample_booking(1);
    let payment = sample_payment(1500);

    // Nothing listens on port 1; the fetch fails fast
    let outcome = dispatcher
        .send_payment_confirmation(
            "member1@example.com",
            &booking,
            &payment,
            Some("http://127.0.0.1:1/template.png"),
        )
        .await;

    assert!(outcome.success);
    assert!(outcome.invoice_generated);
    assert_eq!(outcome.tickets_generated, 0);
    assert_eq!(mailer.sent_count(), 1);

    // Invoice is still attached; no inline ticket
    let email = mailer.last().unwrap();
    assert_eq!(email.attachments.len(), 1);
    assert_eq!(email.attachments[0].content_type, "application/pdf");
}

#[tokio::test]
async fn test_all_tickets_email_attaches_one_ticket_per_member() {
    let mailer = Arc::new(MemoryMailer::new());
    let dispatcher = dispatcher_with(mailer.clone());
    let booking = sample_booking(3);
    let payment = sample_payment(4500);

    let outcome = dispatcher
        .send_payment_confirmation_with_all_tickets(
            "member1@example.com",
            &booking,
            &payment,
            None,
        )
        .await;

    assert!(outcome.success);
    assert!(outcome.invoice_generated);
    assert_eq!(outcome.tickets_generated, 3);

    let email = mailer.last().unwrap();
    // Invoice first, then tickets in member order
    assert_eq!(email.attachments.len(), 4);
    assert_eq!(email.attachments[0].content_type, "application/pdf");
    for (i, attachment) in email.attachments[1..].iter().enumerate() {
        assert_eq!(attachment.content_type, "image/png");
        assert!(!attachment.is_inline());
        assert!(attachment.filename.starts_with(&format!("ticket-{}-", i + 1)));
    }

    // The body lists the booking code and a code per member
    let html = email.html.as_deref().unwrap();
    assert!(html.contains("FX001"));
    let text = email.text.as_deref().unwrap();
    for member in &booking.members {
        assert!(text.contains(&member.name));
    }
}

#[tokio::test]
async fn test_transport_failure_is_reported_not_thrown() {
    let mailer = Arc::new(MemoryMailer::failing("SMTP connection lost"));
    let dispatcher = dispatcher_with(mailer.clone());
    let booking = sample_booking(1);

    let outcome = dispatcher
        .send_booking_confirmation("member1@example.com", &booking, None)
        .await;

    assert!(!outcome.success);
    assert!(outcome.error.unwrap().contains("SMTP connection lost"));
    assert_eq!(mailer.sent_count(), 0);
}

#[tokio::test]
async fn test_otp_email_carries_code_and_expiry_copy() {
    let mailer = Arc::new(MemoryMailer::new());
    let dispatcher = dispatcher_with(mailer.clone());

    let outcome = dispatcher.send_otp("someone@example.com", "482913").await;
    assert!(outcome.success);

    let email = mailer.last().unwrap();
    assert!(email.html.as_deref().unwrap().contains("482913"));
    assert!(email.text.as_deref().unwrap().contains("5 minutes"));
    assert!(email.attachments.is_empty());
}

#[tokio::test]
async fn test_welcome_and_admission_emails_send() {
    let mailer = Arc::new(MemoryMailer::new());
    let dispatcher = dispatcher_with(mailer.clone());

    let outcome = dispatcher
        .send_welcome("someone@example.com", "Asha", "Fusion Night 2026")
        .await;
    assert!(outcome.success);

    let outcome = dispatcher
        .send_admission_status(
            "someone@example.com",
            "Asha",
            "Contemporary Dance - Level 2",
            AdmissionStatus::Approved,
        )
        .await;
    assert!(outcome.success);

    assert_eq!(mailer.sent_count(), 2);
    let email = mailer.last().unwrap();
    assert_eq!(email.subject, "Application Approved");
    assert!(email.html.as_deref().unwrap().contains("Contemporary Dance"));
}

#[tokio::test]
async fn test_outcomes_serialize_for_api_responses() {
    let dispatcher = Dispatcher::new(None, BrandConfig::default());
    let outcome = dispatcher
        .send_payment_confirmation(
            "member1@example.com",
            &sample_booking(1),
            &sample_payment(1500),
            None,
        )
        .await;

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "SMTP not configured");
    assert_eq!(json["invoice_generated"], false);
}

#[tokio::test]
async fn test_invalid_booking_is_rejected_before_send() {
    let mailer = Arc::new(MemoryMailer::new());
    let dispatcher = dispatcher_with(mailer.clone());
    let mut booking = sample_booking(1);
    booking.members.clear();

    let outcome = dispatcher
        .send_booking_confirmation("member1@example.com", &booking, None)
        .await;

    assert!(!outcome.success);
    assert_eq!(mailer.sent_count(), 0);
}

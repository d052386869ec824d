//! SMTP mailer using lettre
//!
//! Sends emails via SMTP with multipart bodies and binary attachments.

use crate::config::SmtpConfig;
use crate::error::{FusionError, Result};
use crate::traits::mailer::{Email, Mailer};
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::time::Duration;

/// SMTP mailer using lettre
///
/// The transport holds an internal connection pool and is safe to reuse
/// across sequential sends, so one `SmtpMailer` is constructed per
/// dispatcher and shared for its lifetime.
///
/// # Example
///
/// ```rust,ignore
/// use fusionx::{SmtpConfig, SmtpMailer, Email, Mailer};
///
/// let config = SmtpConfig::new("smtp.gmail.com", "user@gmail.com", "app-password")
///     .from("no-reply@glitzfusion.in");
/// let mailer = SmtpMailer::new(config)?;
///
/// let email = Email::new("no-reply@glitzfusion.in", "user@example.com", "Hello")
///     .text("Hello!")
///     .html("<h1>Hello!</h1>");
///
/// mailer.send(&email).await?;
/// ```
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    config: SmtpConfig,
}

impl SmtpMailer {
    /// Create a new SMTP mailer with the given configuration.
    ///
    /// Implicit TLS is used when `config.secure` is set (or was inferred
    /// from port 465), STARTTLS otherwise. The configured timeout applies
    /// to connect and greeting.
    pub fn new(config: SmtpConfig) -> Result<Self> {
        let builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .map_err(|e| FusionError::mail(format!("Failed to create SMTP transport: {}", e)))?;

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        Ok(Self { transport, config })
    }

    fn build_message(&self, email: &Email) -> Result<Message> {
        let from_str = if email.from.is_empty() {
            self.config.from.as_deref().ok_or_else(|| {
                FusionError::mail("No 'from' address specified and no default configured")
            })?
        } else {
            &email.from
        };

        let from: Mailbox = from_str
            .parse()
            .map_err(|e| FusionError::mail(format!("Invalid 'from' address: {}", e)))?;

        let mut builder = Message::builder().from(from).subject(&email.subject);

        for to in &email.to {
            let mailbox: Mailbox = to
                .parse()
                .map_err(|e| FusionError::mail(format!("Invalid 'to' address '{}': {}", to, e)))?;
            builder = builder.to(mailbox);
        }

        if let Some(ref reply_to) = email.reply_to {
            let mailbox: Mailbox = reply_to
                .parse()
                .map_err(|e| FusionError::mail(format!("Invalid 'reply_to' address: {}", e)))?;
            builder = builder.reply_to(mailbox);
        }

        builder
            .multipart(build_body(email)?)
            .map_err(|e| FusionError::mail(format!("Failed to build email: {}", e)))
    }
}

/// Assemble the MIME tree for a message.
///
/// Shape: `mixed(related(alternative(text, html), inline parts...), file
/// parts...)`, collapsing levels that have no parts. Attachment order on
/// the wire follows `email.attachments` order within each class.
fn build_body(email: &Email) -> Result<MultiPart> {
    let alternative = match (&email.text, &email.html) {
        (Some(text), Some(html)) => MultiPart::alternative_plain_html(text.clone(), html.clone()),
        (Some(text), None) => MultiPart::alternative().singlepart(
            SinglePart::builder()
                .header(ContentType::TEXT_PLAIN)
                .body(text.clone()),
        ),
        (None, Some(html)) => MultiPart::alternative().singlepart(
            SinglePart::builder()
                .header(ContentType::TEXT_HTML)
                .body(html.clone()),
        ),
        (None, None) => {
            return Err(FusionError::mail(
                "Email must have either text or HTML body",
            ));
        }
    };

    let inline: Vec<_> = email.attachments.iter().filter(|a| a.is_inline()).collect();
    let files: Vec<_> = email
        .attachments
        .iter()
        .filter(|a| !a.is_inline())
        .collect();

    let body = if inline.is_empty() {
        alternative
    } else {
        let mut related = MultiPart::related().multipart(alternative);
        for attachment in inline {
            related = related.singlepart(attachment_part(attachment)?);
        }
        related
    };

    if files.is_empty() {
        return Ok(body);
    }

    let mut mixed = MultiPart::mixed().multipart(body);
    for attachment in files {
        mixed = mixed.singlepart(attachment_part(attachment)?);
    }
    Ok(mixed)
}

fn attachment_part(attachment: &crate::traits::mailer::EmailAttachment) -> Result<SinglePart> {
    let content_type = ContentType::parse(&attachment.content_type).map_err(|e| {
        FusionError::mail(format!(
            "Invalid attachment content type '{}': {}",
            attachment.content_type, e
        ))
    })?;

    let part = match &attachment.cid {
        Some(cid) => Attachment::new_inline(cid.clone()),
        None => Attachment::new(attachment.filename.clone()),
    };
    Ok(part.body(attachment.content.clone(), content_type))
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &Email) -> Result<()> {
        email.validate()?;

        let message = self.build_message(email)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| FusionError::mail(format!("Failed to send email: {}", e)))?;

        Ok(())
    }

    fn is_healthy(&self) -> bool {
        // The pooled transport reconnects on demand; nothing cheap to probe.
        true
    }
}

// AsyncSmtpTransport doesn't impl Debug
impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("host", &self.config.host)
            .field("port", &self.config.port)
            .field("secure", &self.config.secure)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::mailer::EmailAttachment;

    fn email_with_attachments() -> Email {
        Email::new("from@test.com", "to@test.com", "Subject")
            .text("plain")
            .html("<p>rich</p>")
            .attach(EmailAttachment::file(
                "invoice.pdf",
                vec![0x25, 0x50, 0x44, 0x46],
                "application/pdf",
            ))
            .attach(EmailAttachment::inline(
                "ticket.png",
                vec![0x89, 0x50],
                "image/png",
                "ticket",
            ))
    }

    #[test]
    fn test_build_body_with_mixed_attachments() {
        let email = email_with_attachments();
        assert!(build_body(&email).is_ok());
    }

    #[test]
    fn test_build_body_rejects_empty_email() {
        let email = Email::new("from@test.com", "to@test.com", "Subject");
        assert!(build_body(&email).is_err());
    }

    #[test]
    fn test_invalid_content_type_rejected() {
        let attachment = EmailAttachment::file("x.bin", vec![], "not a mime type");
        assert!(attachment_part(&attachment).is_err());
    }

    #[tokio::test]
    async fn test_message_builds_with_attachments() {
        let config = SmtpConfig::new("smtp.test.com", "user", "pass");
        let mailer = SmtpMailer::new(config).unwrap();
        let message = mailer.build_message(&email_with_attachments());
        assert!(message.is_ok());
    }
}

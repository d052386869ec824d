//! Mailer trait for sending emails
//!
//! This trait abstracts the outbound mail backend, allowing the dispatcher
//! to run against real SMTP in production and recording doubles in tests.

use crate::error::{FusionError, Result};
use async_trait::async_trait;

/// A binary attachment on an outgoing email.
///
/// When `cid` is set the part is embedded inline and referenced from the
/// HTML body as `cid:{cid}`; otherwise it is attached as a downloadable
/// file.
#[derive(Debug, Clone)]
pub struct EmailAttachment {
    pub filename: String,
    pub content: Vec<u8>,
    pub content_type: String,
    pub cid: Option<String>,
}

impl EmailAttachment {
    /// A regular file attachment.
    pub fn file(
        filename: impl Into<String>,
        content: Vec<u8>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content,
            content_type: content_type.into(),
            cid: None,
        }
    }

    /// An inline attachment referenced from the HTML body via `cid:`.
    pub fn inline(
        filename: impl Into<String>,
        content: Vec<u8>,
        content_type: impl Into<String>,
        cid: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content,
            content_type: content_type.into(),
            cid: Some(cid.into()),
        }
    }

    #[must_use]
    pub fn is_inline(&self) -> bool {
        self.cid.is_some()
    }
}

/// An email message to be sent
#[derive(Debug, Clone)]
pub struct Email {
    /// Sender email address (e.g., "FusionX <no-reply@glitzfusion.in>")
    pub from: String,
    /// Recipient email addresses
    pub to: Vec<String>,
    /// Email subject line
    pub subject: String,
    /// Plain text body
    pub text: Option<String>,
    /// HTML body
    pub html: Option<String>,
    /// Reply-to address (optional)
    pub reply_to: Option<String>,
    /// Attachments, in the order they should appear on the message
    pub attachments: Vec<EmailAttachment>,
}

impl Email {
    /// Create a new email with the required fields
    pub fn new(from: impl Into<String>, to: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: vec![to.into()],
            subject: subject.into(),
            text: None,
            html: None,
            reply_to: None,
            attachments: Vec::new(),
        }
    }

    /// Add a recipient
    #[must_use]
    pub fn to(mut self, recipient: impl Into<String>) -> Self {
        self.to.push(recipient.into());
        self
    }

    /// Set the plain text body
    #[must_use]
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.text = Some(body.into());
        self
    }

    /// Set the HTML body
    #[must_use]
    pub fn html(mut self, body: impl Into<String>) -> Self {
        self.html = Some(body.into());
        self
    }

    /// Set the reply-to address
    #[must_use]
    pub fn reply_to(mut self, address: impl Into<String>) -> Self {
        self.reply_to = Some(address.into());
        self
    }

    /// Append an attachment. Order is preserved on the wire.
    #[must_use]
    pub fn attach(mut self, attachment: EmailAttachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Validate the email has required fields
    pub fn validate(&self) -> Result<()> {
        if self.from.is_empty() {
            return Err(FusionError::mail("Email 'from' is required"));
        }
        if self.to.is_empty() {
            return Err(FusionError::mail("Email 'to' is required"));
        }
        if self.subject.is_empty() {
            return Err(FusionError::mail("Email 'subject' is required"));
        }
        if self.text.is_none() && self.html.is_none() {
            return Err(FusionError::mail(
                "Email must have either 'text' or 'html' body",
            ));
        }
        Ok(())
    }
}

/// Mailer trait for sending emails
///
/// Implement this trait to provide a custom backend.
///
/// # Example
///
/// ```rust,ignore
/// use fusionx::{Email, Mailer};
/// use fusionx::error::Result;
/// use async_trait::async_trait;
///
/// struct MyMailer;
///
/// #[async_trait]
/// impl Mailer for MyMailer {
///     async fn send(&self, email: &Email) -> Result<()> {
///         // Hand off to your provider of choice
///         Ok(())
///     }
///
///     fn is_healthy(&self) -> bool {
///         true
///     }
/// }
/// ```
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send an email
    ///
    /// Returns `Ok(())` if the email was accepted by the backend.
    async fn send(&self, email: &Email) -> Result<()>;

    /// Check if the mailer backend is healthy/connected
    fn is_healthy(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_builder() {
        let email = Email::new("from@test.com", "to@test.com", "Subject")
            .text("plain")
            .html("<p>rich</p>")
            .reply_to("reply@test.com");

        assert_eq!(email.to, vec!["to@test.com"]);
        assert_eq!(email.text.as_deref(), Some("plain"));
        assert_eq!(email.reply_to.as_deref(), Some("reply@test.com"));
        assert!(email.validate().is_ok());
    }

    #[test]
    fn test_validation_requires_body() {
        let email = Email::new("from@test.com", "to@test.com", "Subject");
        assert!(email.validate().is_err());
    }

    #[test]
    fn test_attachment_ordering_preserved() {
        let email = Email::new("from@test.com", "to@test.com", "Subject")
            .text("body")
            .attach(EmailAttachment::file("invoice.pdf", vec![1], "application/pdf"))
            .attach(EmailAttachment::file("ticket-1.png", vec![2], "image/png"));

        assert_eq!(email.attachments[0].filename, "invoice.pdf");
        assert_eq!(email.attachments[1].filename, "ticket-1.png");
    }

    #[test]
    fn test_inline_attachment_has_cid() {
        let inline = EmailAttachment::inline("ticket.png", vec![0], "image/png", "ticket");
        assert!(inline.is_inline());
        assert_eq!(inline.cid.as_deref(), Some("ticket"));
        assert!(!EmailAttachment::file("a.pdf", vec![], "application/pdf").is_inline());
    }
}

//! Outbound email backends.
//!
//! Two implementations of the [`Mailer`](crate::traits::mailer::Mailer)
//! trait:
//! - [`SmtpMailer`] — production transport via lettre
//! - [`ConsoleMailer`] — prints redacted summaries to stdout for development
//!
//! A recording double for tests lives in
//! [`testing::MemoryMailer`](crate::testing::MemoryMailer).

mod console;
mod smtp;

pub use console::ConsoleMailer;
pub use smtp::SmtpMailer;

// Re-export message types from traits for convenience
pub use crate::traits::mailer::{Email, EmailAttachment};

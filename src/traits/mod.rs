//! Trait seams for pluggable backends.

pub mod mailer;

pub use mailer::{Email, EmailAttachment, Mailer};

//! Test fixtures and doubles.
//!
//! Helpers for exercising the engine without an SMTP server: fake data
//! generators, ready-made booking/payment fixtures, and a recording
//! [`MemoryMailer`].

mod fixtures;
mod mailer;

pub use fixtures::{fake, sample_booking, sample_payment};
pub use mailer::MemoryMailer;

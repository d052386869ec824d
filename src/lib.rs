//! FusionX - booking artifacts and notifications for GLITZFUSION events
//!
//! This crate implements the event subsystem behind FusionX bookings:
//!
//! - **Pricing**: demand-driven tier price evaluation with capacity
//!   thresholds
//! - **Tickets**: per-attendee PNG credentials, composited onto uploaded
//!   templates or a built-in design
//! - **Invoices**: single-page A4 PDF documents with dynamic vertical
//!   layout
//! - **Notifications**: transactional emails (booking, payment, OTP,
//!   welcome, admissions) with inline and file attachments over SMTP
//!
//! Email delivery is best-effort by design: artifact generation and
//! transport failures degrade to structured outcomes so the booking flow
//! that triggered a send never fails because of it.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fusionx::{Dispatcher, testing::sample_booking};
//!
//! #[tokio::main]
//! async fn main() {
//!     fusionx::init_tracing();
//!
//!     let dispatcher = Dispatcher::from_env();
//!     let booking = sample_booking(2);
//!
//!     let outcome = dispatcher
//!         .send_booking_confirmation("member1@example.com", &booking, None)
//!         .await;
//!     println!("sent: {}", outcome.success);
//! }
//! ```

pub mod booking;
mod config;
mod error;
pub mod email;
pub mod invoice;
pub mod notify;
pub mod pricing;
pub mod testing;
pub mod ticket;
pub mod traits;

// Re-exports for public API
pub use booking::{random_member_code, BookingData, Member, PaymentInfo};
pub use config::{BrandConfig, SmtpConfig};
pub use email::{ConsoleMailer, SmtpMailer};
pub use error::{FusionError, Result};
pub use invoice::{
    format_currency, format_invoice_date, generate_invoice_number, render_invoice, InvoiceData,
    InvoicePlan, InvoiceRenderError,
};
pub use notify::{
    AdmissionStatus, BookingEmailOutcome, Dispatcher, PaymentEmailOutcome, SendOutcome,
};
pub use pricing::{
    evaluate_tier_price, DynamicPricingConfig, PricingError, PricingTier, TierCategory,
};
pub use ticket::{
    fetch_template, render_default_ticket, render_ticket, render_ticket_on_template, TicketData,
    TicketRenderError,
};
pub use traits::mailer::{Email, EmailAttachment, Mailer};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging with sensible defaults
///
/// This should be called early in your application, typically in main().
///
/// # Environment Variables
///
/// - `RUST_LOG`: Set log level (e.g., "info", "debug", "fusionx=debug")
/// - `FUSIONX_LOG_JSON`: Set to "true" for JSON formatted logs
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json_logs = std::env::var("FUSIONX_LOG_JSON")
        .map(|v| v.parse::<bool>().unwrap_or(false))
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

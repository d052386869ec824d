use crate::invoice::InvoiceRenderError;
use crate::pricing::PricingError;
use crate::ticket::TicketRenderError;

/// The main error type for the FusionX engine
#[derive(Debug, thiserror::Error)]
pub enum FusionError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Mail error: {0}")]
    Mail(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    TicketRender(#[from] TicketRenderError),

    #[error(transparent)]
    InvoiceRender(#[from] InvoiceRenderError),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl FusionError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn mail(msg: impl Into<String>) -> Self {
        Self::Mail(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether this error means the mail path is unconfigured rather than broken.
    ///
    /// The dispatcher reports unconfigured SMTP as a structured outcome instead
    /// of a hard failure, so request handlers can degrade gracefully.
    pub fn is_unconfigured(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Convenience result type used throughout the crate
pub type Result<T> = std::result::Result<T, FusionError>;

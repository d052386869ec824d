//! Recording mailer double for tests.

use crate::error::{FusionError, Result};
use crate::traits::mailer::{Email, Mailer};
use async_trait::async_trait;
use std::sync::Mutex;

/// A mailer that records every sent email in memory.
///
/// Arm it with [`failing`](MemoryMailer::failing) to simulate transport
/// failures.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use fusionx::{BrandConfig, Dispatcher};
/// use fusionx::testing::MemoryMailer;
///
/// let mailer = Arc::new(MemoryMailer::new());
/// let dispatcher = Dispatcher::with_mailer(mailer.clone(), BrandConfig::default());
/// // ... drive the dispatcher, then assert:
/// assert_eq!(mailer.sent_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryMailer {
    sent: Mutex<Vec<Email>>,
    fail_with: Option<String>,
}

impl MemoryMailer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer whose every send fails with the given transport message.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_with: Some(message.into()),
        }
    }

    /// Snapshot of everything sent so far.
    #[must_use]
    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().expect("mailer lock poisoned").clone()
    }

    #[must_use]
    pub fn sent_count(&self) -> usize {
        self.sent.lock().expect("mailer lock poisoned").len()
    }

    /// The most recently sent email, if any.
    #[must_use]
    pub fn last(&self) -> Option<Email> {
        self.sent.lock().expect("mailer lock poisoned").last().cloned()
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, email: &Email) -> Result<()> {
        email.validate()?;
        if let Some(message) = &self.fail_with {
            return Err(FusionError::mail(message.clone()));
        }
        self.sent
            .lock()
            .expect("mailer lock poisoned")
            .push(email.clone());
        Ok(())
    }

    fn is_healthy(&self) -> bool {
        self.fail_with.is_none()
    }
}

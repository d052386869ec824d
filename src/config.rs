//! Engine configuration.
//!
//! Two independent pieces: [`SmtpConfig`] for the outbound mail transport
//! and [`BrandConfig`] for sender identity and copy used in email bodies.
//! Both are injected at process start; nothing here reads the environment
//! after construction.

use serde::{Deserialize, Serialize};

/// SMTP transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    /// SMTP server hostname
    pub host: String,
    /// SMTP server port (default: 587 for STARTTLS)
    pub port: u16,
    /// Username for authentication
    pub username: String,
    /// Password for authentication
    pub password: String,
    /// Default "from" address override
    pub from: Option<String>,
    /// Implicit TLS instead of STARTTLS. Inferred from port 465 when not
    /// set explicitly.
    pub secure: bool,
    /// Connect/greeting timeout in seconds
    pub timeout_secs: u64,
}

impl SmtpConfig {
    /// Create a new SMTP configuration with the server hostname and credentials
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: 587,
            username: username.into(),
            password: password.into(),
            from: None,
            secure: false,
            timeout_secs: 30,
        }
    }

    /// Set the port. Port 465 switches to implicit TLS unless `secure`
    /// was set explicitly first.
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        if port == 465 {
            self.secure = true;
        }
        self
    }

    /// Set the default "from" address
    #[must_use]
    pub fn from(mut self, address: impl Into<String>) -> Self {
        self.from = Some(address.into());
        self
    }

    /// Force implicit TLS on or off
    #[must_use]
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Set the connect/greeting timeout
    #[must_use]
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Build a config from environment variables, or `None` when the mail
    /// path is unconfigured.
    ///
    /// Reads:
    /// - `SMTP_HOST` (required)
    /// - `SMTP_USERNAME` / `SMTP_PASSWORD` (required; sends are disabled without them)
    /// - `SMTP_PORT` (optional, default: 587)
    /// - `SMTP_SECURE` (optional; defaults to true when port is 465)
    /// - `SMTP_FROM` (optional)
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let host = non_empty_env("SMTP_HOST")?;
        let username = non_empty_env("SMTP_USERNAME")?;
        let password = non_empty_env("SMTP_PASSWORD")?;

        let port = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(587);

        let secure = std::env::var("SMTP_SECURE")
            .ok()
            .map(|v| v == "true" || v == "1")
            .unwrap_or(port == 465);

        Some(Self {
            host,
            port,
            username,
            password,
            from: std::env::var("SMTP_FROM").ok().filter(|v| !v.is_empty()),
            secure,
            timeout_secs: 30,
        })
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Sender identity and brand copy used across transactional emails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandConfig {
    /// Default sender, used when the SMTP config has no `from` override
    pub from_address: String,
    /// Academy name used in footers and the welcome email
    pub academy_name: String,
    /// Event sub-brand used in subjects and headers
    pub brand_name: String,
    /// Support contact printed in email and invoice footers
    pub support_email: String,
    /// Public website printed in footers
    pub website: String,
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            from_address: "FusionX Events <no-reply@glitzfusion.in>".to_string(),
            academy_name: "GLITZFUSION Academy".to_string(),
            brand_name: "FusionX".to_string(),
            support_email: "support@glitzfusion.in".to_string(),
            website: "www.glitzfusion.in".to_string(),
        }
    }
}

impl BrandConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `FUSIONX_FROM_ADDRESS`, `FUSIONX_SUPPORT_EMAIL`
    /// and `FUSIONX_WEBSITE` when present.
    #[must_use]
    pub fn from_env() -> Self {
        let mut brand = Self::default();
        if let Some(from) = non_empty_env("FUSIONX_FROM_ADDRESS") {
            brand.from_address = from;
        }
        if let Some(support) = non_empty_env("FUSIONX_SUPPORT_EMAIL") {
            brand.support_email = support;
        }
        if let Some(website) = non_empty_env("FUSIONX_WEBSITE") {
            brand.website = website;
        }
        brand
    }

    #[must_use]
    pub fn with_from_address(mut self, address: impl Into<String>) -> Self {
        self.from_address = address.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smtp_config_defaults() {
        let config = SmtpConfig::new("smtp.test.com", "user", "pass");
        assert_eq!(config.port, 587);
        assert!(!config.secure);
        assert!(config.from.is_none());
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_port_465_implies_implicit_tls() {
        let config = SmtpConfig::new("smtp.test.com", "user", "pass").port(465);
        assert!(config.secure);
    }

    #[test]
    fn test_explicit_secure_flag() {
        let config = SmtpConfig::new("smtp.test.com", "user", "pass")
            .port(2525)
            .secure(true);
        assert!(config.secure);
    }

    #[test]
    fn test_brand_defaults() {
        let brand = BrandConfig::default();
        assert_eq!(brand.brand_name, "FusionX");
        assert!(brand.from_address.contains('@'));
    }
}

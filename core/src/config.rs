//! Connection settings for the SOAR instance.
//!
//! Built once at startup and handed to [`crate::SoarClient`]; nothing reads
//! the environment after that.

use std::fmt;
use std::time::Duration;

use reqwest::Url;

use crate::error::ConfigError;

/// Per-request timeout applied to every outbound call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Immutable connection configuration.
#[derive(Clone)]
pub struct Config {
    base_url: Option<String>,
    token: Option<String>,
    /// Skip TLS certificate verification (self-signed SOAR deployments).
    pub insecure: bool,
    pub timeout: Duration,
}

impl Config {
    /// Creates a configuration. Empty strings count as "not set" and a
    /// trailing `/` on the base URL is dropped.
    pub fn new(base_url: Option<String>, token: Option<String>) -> Self {
        let base_url = base_url
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty());
        let token = token.filter(|t| !t.trim().is_empty());

        Self {
            base_url,
            token,
            insecure: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// True when both the base URL and the token are present.
    pub fn is_configured(&self) -> bool {
        self.base_url.is_some() && self.token.is_some()
    }

    /// Names of the environment variables that are still unset.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.base_url.is_none() {
            missing.push("SPLUNK_SOAR_URL");
        }
        if self.token.is_none() {
            missing.push("SPLUNK_SOAR_TOKEN");
        }
        missing
    }

    /// Checks the parts of the configuration that would make serving pointless.
    ///
    /// An absent URL or token is tolerated here (it surfaces per call); a
    /// URL that is present but unusable is not.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(raw) = &self.base_url {
            let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
                url: raw.clone(),
                reason: e.to_string(),
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidUrl {
                    url: raw.clone(),
                    reason: format!("unsupported scheme '{}'", url.scheme()),
                });
            }
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }
}

// The token never shows up in logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("insecure", &self.insecure)
            .field("timeout", &self.timeout)
            .finish()
    }
}

//! Error types for the SOAR bridge.

use soar_tools::ArgumentError;
use thiserror::Error;

/// Startup misconfiguration. Serving should not begin when one of these occurs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid SOAR URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request timeout must be greater than zero")]
    InvalidTimeout,

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Failures of a single outbound REST call. None of them are retried.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("SPLUNK_SOAR_URL and SPLUNK_SOAR_TOKEN must be set")]
    NotConfigured,

    /// Non-2xx answer from SOAR.
    #[error("API Error {status}: {body}")]
    Api { status: u16, body: String },

    /// Network, DNS, TLS or timeout failure before a response arrived.
    #[error("Connection Error: {0}")]
    Connection(String),

    #[error("Invalid JSON response: {0}")]
    Decode(String),
}

/// Everything that can go wrong between receiving a tool call and producing its text.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("failed to render response: {0}")]
    Render(#[from] serde_json::Error),
}

impl DispatchError {
    /// Whether the caller sent bad input, as opposed to SOAR or the network failing.
    pub fn is_client_input(&self) -> bool {
        matches!(self, DispatchError::Argument(_))
    }
}

/// Errors from the stdio transport.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("read error: {0}")]
    Read(#[source] std::io::Error),

    #[error("write error: {0}")]
    Write(#[source] std::io::Error),

    #[error("failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
}

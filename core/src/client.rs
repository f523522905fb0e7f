//! Authenticated REST client for Splunk SOAR.

use std::error::Error as _;

use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::{debug, warn};

use soar_tools::{Method, RestCall};

use crate::config::Config;
use crate::error::{ClientError, ConfigError};

/// Header SOAR reads the API token from.
pub const AUTH_HEADER: &str = "ph-auth-token";

/// Issues one HTTP request per [`RestCall`] against `<base_url>/rest`.
///
/// Cheap to share: the inner `reqwest::Client` pools connections and the
/// settings never change after construction.
#[derive(Debug, Clone)]
pub struct SoarClient {
    http: reqwest::Client,
    config: Config,
}

impl SoarClient {
    /// Builds the client from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the base URL is malformed or the
    /// underlying HTTP client cannot be constructed.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        if config.insecure {
            warn!("TLS certificate verification is disabled for SOAR requests");
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.insecure)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Full URL a call resolves to, if a base URL is configured.
    pub fn url_for(&self, call: &RestCall) -> Option<String> {
        self.config
            .base_url()
            .map(|base| format!("{base}/rest{}", call.path))
    }

    /// Sends the call and decodes the JSON response body unchanged.
    ///
    /// # Errors
    ///
    /// * [`ClientError::NotConfigured`] if the URL or token is missing
    /// * [`ClientError::Api`] on any non-2xx status, with the response text
    /// * [`ClientError::Connection`] when no response was received
    /// * [`ClientError::Decode`] when a 2xx body is not JSON
    pub async fn send(&self, call: &RestCall) -> Result<Value, ClientError> {
        let (Some(url), Some(token)) = (self.url_for(call), self.config.token()) else {
            return Err(ClientError::NotConfigured);
        };

        let method = match call.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };

        let mut request = self
            .http
            .request(method, &url)
            .header(AUTH_HEADER, token)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = &call.body {
            request = request.json(body);
        }

        debug!(method = %call.method, path = %call.path, "calling SOAR");

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Connection(connection_reason(&e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {e}>"));
            warn!(status = status.as_u16(), path = %call.path, "SOAR returned an error");
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::Connection(connection_reason(&e)))?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

/// Flattens a reqwest error and its causes into one line.
///
/// reqwest's own message only says the request failed; the useful part
/// (refused, DNS, certificate) sits further down the source chain.
fn connection_reason(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        return "request timed out".to_string();
    }

    let mut reason = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !reason.contains(&text) {
            reason.push_str(": ");
            reason.push_str(&text);
        }
        source = cause.source();
    }
    reason
}

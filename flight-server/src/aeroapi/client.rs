//! AeroAPI HTTP client.
//!
//! Thin page-level client for the FlightAware AeroAPI. Handles
//! authentication, the request timeout, and status-code mapping;
//! pagination lives in [`super::fetch`].

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use tracing::{info, warn};

use super::error::AeroError;
use super::fetch::PageSource;

/// Default base URL for AeroAPI.
const DEFAULT_BASE_URL: &str = "https://aeroapi.flightaware.com/aeroapi";

/// Default per-request timeout. A hung upstream connection otherwise
/// stalls the tool call for as long as the agent is willing to wait.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the AeroAPI client.
#[derive(Debug, Clone)]
pub struct AeroConfig {
    /// API key for x-apikey header authentication
    pub api_key: String,
    /// Base URL for the API (defaults to production AeroAPI)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl AeroConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the FlightAware AeroAPI.
///
/// Fetches one page of a JSON response at a time. The API key is
/// attached to every request as an `x-apikey` default header.
#[derive(Debug, Clone)]
pub struct AeroClient {
    http: reqwest::Client,
    base_url: String,
}

impl AeroClient {
    /// Create a new AeroAPI client.
    pub fn new(config: AeroConfig) -> Result<Self, AeroError> {
        let mut headers = HeaderMap::new();

        // AeroAPI authenticates with an x-apikey header
        let api_key = HeaderValue::from_str(&config.api_key).map_err(|_| AeroError::Upstream {
            status: 0,
            message: "Invalid API key format".to_string(),
        })?;
        headers.insert(HeaderName::from_static("x-apikey"), api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// The API base URL, used to absolutize continuation links.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl PageSource for AeroClient {
    async fn fetch_page(
        &self,
        url: &str,
        params: Option<&[(String, String)]>,
    ) -> Result<Value, AeroError> {
        let mut request = self.http.get(url);
        if let Some(params) = params {
            request = request.query(params);
        }

        info!(%url, "requesting AeroAPI page");
        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            warn!(%url, "AeroAPI rejected the API key");
            return Err(AeroError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!(%url, "AeroAPI rate limit hit");
            return Err(AeroError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%url, status = status.as_u16(), "AeroAPI returned error status");
            return Err(AeroError::Upstream {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| AeroError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = AeroConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_timeout(60);

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = AeroConfig::new("test-key");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn client_creation() {
        let client = AeroClient::new(AeroConfig::new("test-key"));
        assert!(client.is_ok());
    }

    #[test]
    fn client_rejects_unprintable_key() {
        let client = AeroClient::new(AeroConfig::new("bad\nkey"));
        assert!(client.is_err());
    }
}

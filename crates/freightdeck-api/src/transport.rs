// ── Shared transport configuration ──
//
// Builds the single reqwest::Client the gateway uses: fixed base URL,
// 10-second exchange timeout, JSON default content type. The base URL
// comes from FREIGHTDECK_API_URL when set, localhost:8000 otherwise.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use url::Url;

use crate::error::Error;

/// Environment variable selecting the backend base URL.
pub const BASE_URL_ENV: &str = "FREIGHTDECK_API_URL";

/// Fallback base URL for local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Per-exchange timeout. A timeout surfaces as an ordinary transport
/// failure and takes the same degradation path as any other outage.
pub const EXCHANGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport configuration for the gateway's HTTP client.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl GatewayConfig {
    /// Read the base URL from the environment, falling back to the
    /// local-development default.
    pub fn from_env() -> Result<Self, Error> {
        let raw = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        Self::with_base_url(&raw)
    }

    pub fn with_base_url(raw: &str) -> Result<Self, Error> {
        let base_url = normalize_base_url(raw)?;
        Ok(Self {
            base_url,
            timeout: EXCHANGE_TIMEOUT,
        })
    }

    /// Build the shared `reqwest::Client`.
    ///
    /// JSON is the default content type; the upload path overrides it
    /// per-request with a multipart body.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(headers)
            .user_agent(concat!("freightdeck/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(client)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            // The literal is a valid URL, so this cannot fail.
            #[allow(clippy::unwrap_used)]
            base_url: Url::parse(DEFAULT_BASE_URL).unwrap(),
            timeout: EXCHANGE_TIMEOUT,
        }
    }
}

/// Ensure the base URL ends with a single trailing slash so that
/// `Url::join` treats the last path segment as a directory.
fn normalize_base_url(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw)?;
    let path = url.path().trim_end_matches('/').to_owned();
    url.set_path(&format!("{path}/"));
    Ok(url)
}

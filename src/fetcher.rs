use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::warn;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = "PlanetNews/1.0 (Feed Aggregator)";

/// Errors from retrieving one feed.
///
/// `NotFound` is kept separate from the other HTTP statuses because the
/// aggregator treats a 404 source as permanently gone (a prune
/// candidate), while everything else is a transient failure.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Feed endpoint returned HTTP 404
    #[error("feed not found (404)")]
    NotFound,
    /// Any other non-2xx HTTP response
    #[error("HTTP error: status {0}")]
    Status(u16),
    /// Request exceeded the 30-second timeout
    #[error("request timed out")]
    Timeout,
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// Feed content could not be parsed as RSS or Atom
    #[error("parse error: {0}")]
    Parse(String),
}

/// Retrieves raw feed content over HTTP.
///
/// Holds two clients: the normal verifying one, and a
/// certificate-verification-disabled one used for exactly one retry when
/// a feed's TLS chain fails verification. Some long-running feeds sit
/// behind defective certificate chains.
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
    insecure_client: Client,
}

impl Fetcher {
    pub fn new() -> Self {
        Self::with_timeout(FETCH_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        let insecure_client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            insecure_client,
        }
    }

    /// Fetch the body of one feed, following redirects.
    ///
    /// On a TLS certificate verification failure the request is retried
    /// once with verification disabled; any further failure is returned
    /// as-is.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) if is_certificate_error(&e) => {
                warn!(
                    url = url,
                    "TLS certificate verification failed, retrying without verification"
                );
                self.insecure_client
                    .get(url)
                    .send()
                    .await
                    .map_err(classify_transport_error)?
            }
            Err(e) => return Err(classify_transport_error(e)),
        };

        match response.status() {
            StatusCode::NOT_FOUND => Err(FetchError::NotFound),
            status if !status.is_success() => Err(FetchError::Status(status.as_u16())),
            _ => response.text().await.map_err(classify_transport_error),
        }
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}

fn classify_transport_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Network(e)
    }
}

/// Walk the error's source chain looking for a certificate verification
/// failure. reqwest does not expose the TLS error kind directly; rustls
/// reports these as "invalid peer certificate" variants.
fn is_certificate_error(e: &reqwest::Error) -> bool {
    let mut source = Some(e as &(dyn std::error::Error + 'static));
    while let Some(err) = source {
        let msg = err.to_string().to_lowercase();
        if msg.contains("certificate") {
            return true;
        }
        source = err.source();
    }
    false
}

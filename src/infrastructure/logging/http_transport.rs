//! HTTP log transport posting JSON events to a remote collector.

use async_trait::async_trait;
use std::time::Duration;
use tracing::info;
use url::Url;

use super::transport::{LogTransport, TransportError, TransportResult};
use crate::domain::log_event::LogEvent;

/// Path appended to the collector base URL.
pub const LOGS_PATH: &str = "/api/logs";

/// Collector client sending `POST <base>/api/logs` with the event as JSON.
pub struct HttpLogTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpLogTransport {
    /// Builds a transport for the collector at `base_url`.
    ///
    /// `request_timeout` bounds each request at the client level; the shipper
    /// applies the same bound around every attempt.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidEndpoint`] if `base_url` is not an
    /// absolute http(s) URL, or [`TransportError::Request`] if the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str, request_timeout: Duration) -> TransportResult<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| TransportError::InvalidEndpoint(format!("{base_url}: {e}")))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(TransportError::InvalidEndpoint(format!(
                "{base_url}: scheme must be http or https"
            )));
        }

        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), LOGS_PATH);

        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;

        info!("Log collector endpoint: {}", endpoint);

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LogTransport for HttpLogTransport {
    async fn send(&self, event: &LogEvent) -> TransportResult<()> {
        let response = self.client.post(&self.endpoint).json(event).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        Ok(())
    }
}

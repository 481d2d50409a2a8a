//! Log transport trait and error types.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::log_event::LogEvent;

/// Errors that can occur during a single delivery attempt.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("collector request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("collector responded with status {0}")]
    Status(u16),

    #[error("collector did not answer within {0:?}")]
    Timeout(Duration),

    #[error("invalid collector URL: {0}")]
    InvalidEndpoint(String),
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// One-shot delivery of a log event to a collector.
///
/// Implementations perform a single attempt; retries, timeouts and drop
/// reporting belong to [`crate::infrastructure::logging::LogShipper`].
///
/// # Implementations
///
/// - [`crate::infrastructure::logging::HttpLogTransport`] - JSON POST to `<base>/api/logs`
/// - [`crate::infrastructure::logging::NullLogTransport`] - Accepts everything, sends nothing
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LogTransport: Send + Sync {
    /// Sends one event. Any non-2xx answer is an error.
    async fn send(&self, event: &LogEvent) -> TransportResult<()>;
}

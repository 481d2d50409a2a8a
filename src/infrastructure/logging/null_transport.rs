//! No-op log transport for tests or disabled shipping.

use async_trait::async_trait;
use tracing::debug;

use super::transport::{LogTransport, TransportResult};
use crate::domain::log_event::LogEvent;

/// A transport that accepts every event without sending it anywhere.
///
/// Used when `LOG_SHIPPING=false` and in tests that don't observe logging.
pub struct NullLogTransport;

impl NullLogTransport {
    pub fn new() -> Self {
        debug!("Using NullLogTransport (log shipping disabled)");
        Self
    }
}

impl Default for NullLogTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LogTransport for NullLogTransport {
    async fn send(&self, _event: &LogEvent) -> TransportResult<()> {
        Ok(())
    }
}

//! Remote log shipping.
//!
//! [`LogShipper`] owns the delivery contract (per-attempt timeout, linear
//! backoff, bounded attempts, local drop reporting) and delegates single
//! attempts to a [`LogTransport`]:
//! - [`HttpLogTransport`] - JSON POST to the configured collector
//! - [`NullLogTransport`] - No-op implementation for tests/disabled shipping

mod http_transport;
mod null_transport;
mod shipper;
mod transport;

pub use http_transport::{HttpLogTransport, LOGS_PATH};
pub use null_transport::NullLogTransport;
pub use shipper::{DeliveryOutcome, LinearBackoff, LogShipper, RetryPolicy};
pub use transport::{LogTransport, TransportError, TransportResult};

//! Retrying, fire-and-forget log shipper.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_retry::Retry;
use tracing::{debug, error, warn};

use super::null_transport::NullLogTransport;
use super::transport::{LogTransport, TransportError};
use crate::domain::log_event::{LogEvent, LogLevel};

/// Delivery limits for a single log event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, the first one included.
    pub max_attempts: u32,
    /// Wait before retry `n` is `base_delay * n`.
    pub base_delay: Duration,
    /// Upper bound on each attempt.
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            attempt_timeout: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Delays between consecutive attempts.
    pub fn backoff(&self) -> LinearBackoff {
        LinearBackoff::new(self.base_delay, self.max_attempts.saturating_sub(1))
    }

    /// Longest time a single event can spend in delivery:
    /// `attempts * timeout + sum(delays)`.
    pub fn worst_case(&self) -> Duration {
        self.attempt_timeout * self.max_attempts.max(1) + self.backoff().sum::<Duration>()
    }
}

/// Linearly increasing delays: `base * 1, base * 2, ...`, `retries` of them.
#[derive(Debug, Clone)]
pub struct LinearBackoff {
    base: Duration,
    step: u32,
    retries: u32,
}

impl LinearBackoff {
    pub fn new(base: Duration, retries: u32) -> Self {
        Self {
            base,
            step: 1,
            retries,
        }
    }
}

impl Iterator for LinearBackoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        if self.step > self.retries {
            return None;
        }

        let delay = self.base * self.step;
        self.step += 1;
        Some(delay)
    }
}

/// Final result of delivering one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered { attempts: u32 },
    /// Every attempt failed; the event was reported locally and discarded.
    Dropped { attempts: u32 },
}

struct ShipperInner {
    transport: Arc<dyn LogTransport>,
    policy: RetryPolicy,
    dropped: AtomicU64,
}

/// Ships structured log events to a remote collector.
///
/// Each [`LogShipper::log`] call is independent: it spawns a background task
/// that tries up to `max_attempts` times, each bounded by `attempt_timeout`,
/// waiting `base_delay * attempt` between tries. No queueing or batching.
/// When all attempts fail the event is dropped and reported through
/// `tracing`, never back to the collector.
///
/// Cloning is cheap; clones share the transport and the drop counter.
#[derive(Clone)]
pub struct LogShipper {
    inner: Arc<ShipperInner>,
}

impl LogShipper {
    pub fn new(transport: Arc<dyn LogTransport>, policy: RetryPolicy) -> Self {
        Self {
            inner: Arc::new(ShipperInner {
                transport,
                policy,
                dropped: AtomicU64::new(0),
            }),
        }
    }

    /// A shipper that discards every event.
    pub fn disabled() -> Self {
        Self::new(Arc::new(NullLogTransport::new()), RetryPolicy::default())
    }

    /// Number of events dropped after exhausting their retries.
    pub fn dropped_events(&self) -> u64 {
        self.inner.dropped.load(Ordering::Relaxed)
    }

    /// Builds an event stamped now and delivers it in a background task.
    ///
    /// Callers may drop the returned handle; delivery continues detached.
    /// Must be called from within a Tokio runtime.
    pub fn log(
        &self,
        stack: &str,
        level: LogLevel,
        package: &str,
        message: impl Into<String>,
    ) -> JoinHandle<DeliveryOutcome> {
        let event = LogEvent::new(stack, level, package, message);
        debug!(
            level = %event.level,
            package = %event.package,
            "{}",
            event.message
        );

        let shipper = self.clone();
        tokio::spawn(async move { shipper.deliver(event).await })
    }

    pub fn debug(
        &self,
        stack: &str,
        package: &str,
        message: impl Into<String>,
    ) -> JoinHandle<DeliveryOutcome> {
        self.log(stack, LogLevel::Debug, package, message)
    }

    pub fn info(
        &self,
        stack: &str,
        package: &str,
        message: impl Into<String>,
    ) -> JoinHandle<DeliveryOutcome> {
        self.log(stack, LogLevel::Info, package, message)
    }

    pub fn warn(
        &self,
        stack: &str,
        package: &str,
        message: impl Into<String>,
    ) -> JoinHandle<DeliveryOutcome> {
        self.log(stack, LogLevel::Warn, package, message)
    }

    pub fn error(
        &self,
        stack: &str,
        package: &str,
        message: impl Into<String>,
    ) -> JoinHandle<DeliveryOutcome> {
        self.log(stack, LogLevel::Error, package, message)
    }

    pub fn fatal(
        &self,
        stack: &str,
        package: &str,
        message: impl Into<String>,
    ) -> JoinHandle<DeliveryOutcome> {
        self.log(stack, LogLevel::Fatal, package, message)
    }

    /// Runs the full retry sequence for one event and reports the outcome.
    pub async fn deliver(&self, event: LogEvent) -> DeliveryOutcome {
        let policy = self.inner.policy;
        let transport = &self.inner.transport;
        let attempts = AtomicU32::new(0);
        let attempts_ref = &attempts;
        let event_ref = &event;

        let result = Retry::spawn(policy.backoff(), move || async move {
            let attempt = attempts_ref.fetch_add(1, Ordering::Relaxed) + 1;

            let sent = match tokio::time::timeout(policy.attempt_timeout, transport.send(event_ref))
                .await
            {
                Ok(sent) => sent,
                Err(_) => Err(TransportError::Timeout(policy.attempt_timeout)),
            };

            if let Err(e) = &sent {
                warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    error = %e,
                    "Log attempt failed"
                );
            }

            sent
        })
        .await;

        let attempts_made = attempts.load(Ordering::Relaxed);

        match result {
            Ok(()) => {
                metrics::counter!("log_events_delivered_total").increment(1);
                DeliveryOutcome::Delivered {
                    attempts: attempts_made,
                }
            }
            Err(e) => {
                self.inner.dropped.fetch_add(1, Ordering::Relaxed);
                metrics::counter!("log_events_dropped_total").increment(1);
                error!(
                    attempts = attempts_made,
                    stack = %event.stack,
                    level = %event.level,
                    package = %event.package,
                    message = %event.message,
                    error = %e,
                    "Failed to send log after all retry attempts, event dropped"
                );
                DeliveryOutcome::Dropped {
                    attempts: attempts_made,
                }
            }
        }
    }
}

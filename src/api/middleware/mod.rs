//! HTTP middleware for request processing.
//!
//! Provides request identification, panic recovery, and observability
//! middleware.

pub mod panic;
pub mod request_id;
pub mod tracing;

//! Domain layer containing business entities and contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Registry trait definitions
//! - [`access_log`] - Ordered per-shortcode access history
//! - [`log_event`] - Structured events for the remote log collector
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers.

pub mod access_log;
pub mod entities;
pub mod log_event;
pub mod repositories;

//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`logging`] - Remote log shipping (HTTP collector and no-op transports)
//! - [`persistence`] - In-memory link registry

pub mod logging;
pub mod persistence;

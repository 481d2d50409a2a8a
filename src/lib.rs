//! # Shortlink
//!
//! An in-memory URL shortening service built with Axum.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Link and access entities, the access log,
//!   log events and the registry trait
//! - **Application Layer** ([`application`]) - Link creation, inspection and redirect
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory registry and remote log shipping
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Random or custom short codes with per-link expiry
//! - Access counting with a bounded recent-access history
//! - Fire-and-forget log shipping with linear-backoff retries
//!
//! ## Quick Start
//!
//! ```bash
//! export PORT=3001
//! export LOG_COLLECTOR_URL="http://localhost:3000"  # Optional
//!
//! cargo run
//!
//! # In another terminal
//! cargo run --bin smoke
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{LinkService, NewLinkRequest, Validity};
    pub use crate::domain::entities::{AccessRecord, LinkDetails, LinkRecord};
    pub use crate::error::AppError;
    pub use crate::infrastructure::logging::{LogShipper, RetryPolicy};
    pub use crate::infrastructure::persistence::InMemoryLinkRepository;
    pub use crate::state::AppState;
}

//! DTO for the health check endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::utils::time::iso_millis;

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    #[serde(serialize_with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
    /// Registered links, expired ones included.
    pub total_urls: usize,
}

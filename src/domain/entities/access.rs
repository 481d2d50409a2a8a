//! Access entity representing a single successful redirect.

use chrono::{DateTime, Utc};

use crate::utils::geo::placeholder_location;

/// An access event recorded when a short link redirects.
///
/// Client metadata is opaque and optional; `location` is a placeholder label,
/// not the result of a geolocation lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessRecord {
    pub timestamp: DateTime<Utc>,
    pub client_agent: Option<String>,
    pub client_address: Option<String>,
    pub location: String,
}

impl AccessRecord {
    /// Creates an access record stamped with the current time and a
    /// placeholder location.
    pub fn new(client_agent: Option<String>, client_address: Option<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            client_agent,
            client_address,
            location: placeholder_location().to_string(),
        }
    }
}

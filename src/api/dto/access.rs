//! DTO for a single access history entry.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::AccessRecord;
use crate::utils::time::iso_millis;

/// Access entry as reported by the statistics endpoint.
///
/// Absent client metadata is omitted from the JSON object.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessInfo {
    #[serde(serialize_with = "iso_millis")]
    pub timestamp: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,

    pub location: String,
}

impl From<AccessRecord> for AccessInfo {
    fn from(access: AccessRecord) -> Self {
        Self {
            timestamp: access.timestamp,
            user_agent: access.client_agent,
            ip: access.client_address,
            location: access.location,
        }
    }
}

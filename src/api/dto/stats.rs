//! DTOs for the link statistics endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::access::AccessInfo;
use crate::domain::entities::LinkDetails;
use crate::utils::time::iso_millis;

/// Statistics for one live short link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub shortcode: String,
    pub original_url: String,
    #[serde(serialize_with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "iso_millis")]
    pub expires_at: DateTime<Utc>,
    pub access_count: u64,
    /// Most recent accesses, oldest first.
    pub access_history: Vec<AccessInfo>,
}

impl From<LinkDetails> for StatsResponse {
    fn from(details: LinkDetails) -> Self {
        let LinkDetails {
            link,
            recent_accesses,
        } = details;

        Self {
            shortcode: link.code,
            original_url: link.original_url,
            created_at: link.created_at,
            expires_at: link.expires_at,
            access_count: link.access_count,
            access_history: recent_accesses.into_iter().map(AccessInfo::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AccessRecord, LinkRecord};
    use chrono::{TimeDelta, TimeZone};
    use serde_json::json;

    #[test]
    fn test_stats_serialization() {
        let created = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut link = LinkRecord::new(
            "abc123".to_string(),
            "https://example.com".to_string(),
            created,
            TimeDelta::minutes(30),
        )
        .unwrap();
        link.access_count = 2;

        let with_meta = AccessRecord {
            timestamp: created + TimeDelta::seconds(5),
            client_agent: Some("curl/8.0".to_string()),
            client_address: Some("10.0.0.1".to_string()),
            location: "India".to_string(),
        };
        let without_meta = AccessRecord {
            timestamp: created + TimeDelta::seconds(6),
            client_agent: None,
            client_address: None,
            location: "USA".to_string(),
        };

        let response = StatsResponse::from(LinkDetails {
            link,
            recent_accesses: vec![with_meta, without_meta],
        });

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "shortcode": "abc123",
                "originalUrl": "https://example.com",
                "createdAt": "2025-01-01T00:00:00.000Z",
                "expiresAt": "2025-01-01T00:30:00.000Z",
                "accessCount": 2,
                "accessHistory": [
                    {
                        "timestamp": "2025-01-01T00:00:05.000Z",
                        "userAgent": "curl/8.0",
                        "ip": "10.0.0.1",
                        "location": "India"
                    },
                    {
                        "timestamp": "2025-01-01T00:00:06.000Z",
                        "location": "USA"
                    }
                ]
            })
        );
    }
}

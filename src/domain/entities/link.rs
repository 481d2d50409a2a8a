//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, TimeDelta, Utc};

use super::access::AccessRecord;

/// A shortened URL with its lifetime and access counter.
///
/// `created_at` and `expires_at` are fixed at creation; only `access_count`
/// changes afterwards, and only through the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRecord {
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub access_count: u64,
}

impl LinkRecord {
    /// Creates a record valid for `validity` from `created_at`.
    ///
    /// Returns `None` if `validity` is not strictly positive or the expiry
    /// would overflow the timestamp range.
    pub fn new(
        code: String,
        original_url: String,
        created_at: DateTime<Utc>,
        validity: TimeDelta,
    ) -> Option<Self> {
        if validity <= TimeDelta::zero() {
            return None;
        }

        let expires_at = created_at.checked_add_signed(validity)?;

        Some(Self {
            code,
            original_url,
            created_at,
            expires_at,
            access_count: 0,
        })
    }

    /// Returns true if `now` is past the expiry time.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Returns true if the link has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// A link together with the trailing window of its access history.
#[derive(Debug, Clone)]
pub struct LinkDetails {
    pub link: LinkRecord,
    /// Most recent accesses, oldest first.
    pub recent_accesses: Vec<AccessRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(validity: TimeDelta) -> Option<LinkRecord> {
        LinkRecord::new(
            "abc123".to_string(),
            "https://example.com".to_string(),
            Utc::now(),
            validity,
        )
    }

    #[test]
    fn test_link_creation() {
        let now = Utc::now();
        let link = LinkRecord::new(
            "abc123".to_string(),
            "https://example.com".to_string(),
            now,
            TimeDelta::minutes(30),
        )
        .unwrap();

        assert_eq!(link.code, "abc123");
        assert_eq!(link.original_url, "https://example.com");
        assert_eq!(link.created_at, now);
        assert_eq!(link.expires_at, now + TimeDelta::minutes(30));
        assert_eq!(link.access_count, 0);
        assert!(!link.is_expired());
    }

    #[test]
    fn test_non_positive_validity_rejected() {
        assert!(record(TimeDelta::zero()).is_none());
        assert!(record(TimeDelta::minutes(-1)).is_none());
    }

    #[test]
    fn test_overflowing_validity_rejected() {
        assert!(record(TimeDelta::MAX).is_none());
    }

    #[test]
    fn test_expiry_boundary() {
        let link = record(TimeDelta::minutes(1)).unwrap();

        assert!(!link.is_expired_at(link.expires_at));
        assert!(link.is_expired_at(link.expires_at + TimeDelta::milliseconds(1)));
        assert!(!link.is_expired_at(link.created_at));
    }
}

//! Timestamp formatting shared by API responses and log events.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

/// Formats a timestamp as RFC 3339 UTC with millisecond precision,
/// e.g. `2025-01-01T12:00:00.000Z`.
pub fn to_iso_millis(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serde helper: `#[serde(serialize_with = "iso_millis")]`.
pub fn iso_millis<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&to_iso_millis(ts))
}

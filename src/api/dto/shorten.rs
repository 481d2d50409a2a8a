//! DTOs for the link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::application::services::{NewLinkRequest, Validity};
use crate::utils::time::iso_millis;

/// Request body of `POST /shorturls`.
///
/// `validity` is kept as raw JSON so that a non-numeric value is reported as
/// a validation error in the same order as other field checks, instead of
/// failing body deserialization. An explicit `null` is kept as
/// `Some(Value::Null)`; only an absent field means "use the default".
#[derive(Debug, Default, Deserialize)]
pub struct ShortenRequest {
    pub url: Option<String>,

    /// Minutes until expiry (fractions allowed). Defaults to 30 when absent.
    #[serde(default, deserialize_with = "present")]
    pub validity: Option<Value>,

    /// Optional custom short code, 3-10 alphanumeric characters.
    pub shortcode: Option<String>,
}

/// Deserializes a field that is present in the body, `null` included.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl From<ShortenRequest> for NewLinkRequest {
    fn from(request: ShortenRequest) -> Self {
        let validity = request.validity.map(|value| match value.as_f64() {
            Some(minutes) => Validity::Minutes(minutes),
            None => Validity::Malformed(value.to_string()),
        });

        NewLinkRequest {
            url: request.url,
            validity,
            custom_code: request.shortcode,
        }
    }
}

/// Response of a successful shortening.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_link: String,
    #[serde(serialize_with = "iso_millis")]
    pub expiry: DateTime<Utc>,
}

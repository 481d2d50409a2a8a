//! Target URL validation.
//!
//! The service stores the caller's URL as given; validation only confirms it
//! parses as an absolute URL.

use url::Url;

/// Errors that can occur while validating a target URL.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL is required")]
    Missing,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(#[from] url::ParseError),
}

/// Parses `raw` as an absolute URL.
///
/// Any scheme is accepted. Relative references (`/path`, `example.com`) fail
/// because they have no scheme.
///
/// # Errors
///
/// Returns [`UrlValidationError::Missing`] for blank input and
/// [`UrlValidationError::InvalidFormat`] when parsing fails.
pub fn validate_url(raw: &str) -> Result<Url, UrlValidationError> {
    if raw.trim().is_empty() {
        return Err(UrlValidationError::Missing);
    }

    Ok(Url::parse(raw)?)
}

/// Serializes a stored URL into an ASCII-only form usable as a `Location`
/// header (punycode host, percent-encoded path).
pub fn to_location(raw: &str) -> Result<String, UrlValidationError> {
    Ok(validate_url(raw)?.to_string())
}

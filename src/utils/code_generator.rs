//! Shortcode generation and validation utilities.
//!
//! Generated codes are drawn from the same alphabet that custom codes are
//! validated against, so every live shortcode satisfies [`is_valid_format`].

use crate::error::AppError;
use rand::{Rng, distr::Alphanumeric};
use regex::Regex;
use std::sync::LazyLock;

/// Length of generated shortcodes.
pub const CODE_LENGTH: usize = 6;

/// Length of request identifiers attached by the request id middleware.
pub const REQUEST_ID_LENGTH: usize = 8;

/// Format rule for shortcodes: 3-10 ASCII letters or digits.
static SHORTCODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{3,10}$").expect("shortcode regex is valid"));

/// Codes that collide with a top-level route and can never be redirected to:
/// `GET /shorturls` is answered by the creation route.
const RESERVED_CODES: &[&str] = &["shorturls"];

/// Generates a random alphanumeric shortcode of [`CODE_LENGTH`] characters.
///
/// Uniqueness is not checked here; the caller re-invokes on collision.
pub fn generate_code() -> String {
    random_alphanumeric(CODE_LENGTH)
}

/// Generates an identifier used to correlate log events of one request.
pub fn generate_request_id() -> String {
    random_alphanumeric(REQUEST_ID_LENGTH)
}

fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Returns `true` iff `code` matches `^[A-Za-z0-9]{3,10}$`.
///
/// Pure format check, uniqueness is the registry's concern.
pub fn is_valid_format(code: &str) -> bool {
    SHORTCODE_REGEX.is_match(code)
}

/// Validates a caller-supplied shortcode.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the code fails the format rule or is
/// a reserved route segment.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if !is_valid_format(code) {
        return Err(AppError::bad_request(
            "Custom shortcode must be 3-10 alphanumeric characters",
        ));
    }

    if RESERVED_CODES.contains(&code) {
        return Err(AppError::bad_request("This shortcode is reserved"));
    }

    Ok(())
}

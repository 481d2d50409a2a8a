//! Handler for link creation.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, Uri},
};

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::domain::log_event::STACK;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_addr::extract_host;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /shorturls`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/very/long/path",
///   "validity": 60,
///   "shortcode": "promo1"
/// }
/// ```
///
/// `validity` (minutes, default 30) and `shortcode` are optional.
///
/// # Response
///
/// **201 Created**
///
/// ```json
/// {
///   "shortLink": "http://localhost:3001/promo1",
///   "expiry": "2025-01-01T01:00:00.000Z"
/// }
/// ```
///
/// The short link base is the configured `BASE_URL`, or `http://` plus the
/// request's `Host` header.
///
/// # Errors
///
/// - **400 Bad Request**: malformed body, missing or invalid URL, invalid
///   validity or malformed custom shortcode
/// - **409 Conflict**: custom shortcode already in use
/// - **500 Internal Server Error**: no free shortcode could be generated
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        state.logger.error(
            STACK,
            "handler",
            format!("Malformed request body: {}", rejection.body_text()),
        );
        AppError::from(rejection)
    })?;

    let base = match &state.base_url {
        Some(base_url) => base_url.clone(),
        None => {
            let host = extract_host(&headers).or_else(|e| {
                uri.authority()
                    .map(|authority| authority.to_string())
                    .ok_or(e)
            })?;
            format!("http://{host}")
        }
    };

    let link = state.link_service.create_short_link(payload.into()).await?;

    let response = ShortenResponse {
        short_link: state.link_service.get_short_url(&base, &link.code),
        expiry: link.expires_at,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

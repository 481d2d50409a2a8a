//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;

use crate::domain::log_event::STACK;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_addr::{client_address, user_agent};
use crate::utils::url_validator::to_location;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{shortcode}`
///
/// # Request Flow
///
/// 1. Resolve client metadata (`User-Agent`, client address)
/// 2. Look up the link; unknown and expired codes are rejected
/// 3. Record the access and bump the counter atomically
/// 4. Return 302 Found with the original URL in `Location`
///
/// # Errors
///
/// - **404 Not Found**: unknown shortcode
/// - **410 Gone**: the link has expired
pub async fn redirect_handler(
    Path(shortcode): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Response, AppError> {
    let agent = user_agent(&headers);
    let ip = client_address(&headers, addr, state.behind_proxy);

    let target = state
        .link_service
        .resolve_redirect(&shortcode, agent, Some(ip))
        .await?;

    let location = to_location(&target).map_err(|e| {
        state.logger.fatal(
            STACK,
            "redirect",
            format!("Stored URL for {shortcode} cannot be used as Location: {e}"),
        );
        AppError::internal("Internal server error")
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

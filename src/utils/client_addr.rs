//! Client and host information extracted from HTTP request headers.

use crate::AppError;
use axum::http::{HeaderMap, header};
use std::net::SocketAddr;

/// Returns the `Host` header as sent by the client, port included.
///
/// Used to build short links when no public base URL is configured.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the header is missing or not valid
/// UTF-8.
pub fn extract_host(headers: &HeaderMap) -> Result<String, AppError> {
    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header"))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header"))?
        .trim();

    if host.is_empty() {
        return Err(AppError::bad_request("Missing Host header"));
    }

    Ok(host.to_string())
}

/// Resolves the client address for access analytics.
///
/// When `behind_proxy` is set, the first `X-Forwarded-For` entry wins,
/// then `X-Real-IP`. Otherwise (or if neither header is usable) the peer
/// socket address is used.
pub fn client_address(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> String {
    if behind_proxy {
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        let real_ip = headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        if let Some(ip) = forwarded.or(real_ip) {
            return ip.to_string();
        }
    }

    peer.ip().to_string()
}

/// Returns the `User-Agent` header, if present and valid UTF-8.
pub fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

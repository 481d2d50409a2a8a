//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorturls`             - Create a short link
//! - `GET  /shorturls/{shortcode}` - Link statistics
//! - `GET  /api/health`            - Health check
//! - `GET  /{shortcode}`           - Short link redirect
//! - anything else                 - 404 `Route not found`
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Request id** - `x-request-id` header and a shipped request event
//! - **Panic recovery** - 500 response plus a shipped `fatal` event
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{fallback_handler, health_handler, redirect_handler};
use crate::api::middleware::{panic, request_id, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// Serve it with connect info (`into_make_service_with_connect_info`); the
/// redirect handler reads the peer address.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .merge(api::routes::shorturl_routes())
        .route("/api/health", get(health_handler))
        .route("/{shortcode}", get(redirect_handler))
        .fallback(fallback_handler)
        .layer(panic::layer(state.logger.clone()))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            request_id::layer,
        ))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

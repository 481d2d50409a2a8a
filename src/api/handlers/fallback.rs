//! Handler for requests that match no route.

use axum::{
    extract::State,
    http::{Method, Uri},
};

use crate::domain::log_event::STACK;
use crate::error::AppError;
use crate::state::AppState;

/// Answers 404 for unmatched routes and ships a warning.
pub async fn fallback_handler(State(state): State<AppState>, method: Method, uri: Uri) -> AppError {
    state.logger.warn(
        STACK,
        "route",
        format!("Route not found: {} {}", method, uri.path()),
    );

    AppError::not_found("Route not found")
}

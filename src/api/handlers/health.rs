//! Handler for health check endpoint.

use axum::{Json, extract::State};
use chrono::Utc;

use crate::api::dto::health::HealthResponse;
use crate::domain::log_event::STACK;
use crate::error::AppError;
use crate::state::AppState;

/// Returns service liveness and the number of registered links.
///
/// # Endpoint
///
/// `GET /api/health`
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "timestamp": "2025-01-01T00:00:00.000Z",
///   "totalUrls": 42
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    state
        .logger
        .info(STACK, "handler", "Health check requested");

    let total_urls = state.link_service.total_links().await?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        total_urls,
    }))
}

//! Handler for link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns metadata and recent access history for a live short link.
///
/// # Endpoint
///
/// `GET /shorturls/{shortcode}`
///
/// Reading statistics does not count as an access.
///
/// # Errors
///
/// - **404 Not Found**: unknown shortcode
/// - **410 Gone**: the link has expired
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(shortcode): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let details = state.link_service.get_link_details(&shortcode).await?;

    Ok(Json(details.into()))
}

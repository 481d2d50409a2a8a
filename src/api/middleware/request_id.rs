//! Request identification middleware.

use axum::{
    extract::{Request, State},
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

use crate::domain::log_event::STACK;
use crate::state::AppState;
use crate::utils::code_generator::generate_request_id;

/// Response header carrying the request id.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Tags every request with a short random id.
///
/// The id is shipped with a `Request <id> received: <METHOD> <path>` event
/// and echoed back in the `x-request-id` response header so that client
/// reports can be matched with collector entries.
///
/// # Usage
///
/// ```rust,ignore
/// router.layer(middleware::from_fn_with_state(state.clone(), request_id::layer))
/// ```
pub async fn layer(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let id = generate_request_id();

    state.logger.info(
        STACK,
        "middleware",
        format!(
            "Request {id} received: {} {}",
            request.method(),
            request.uri().path()
        ),
    );

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(X_REQUEST_ID, value);
    }

    response
}

//! Panic recovery middleware.

use axum::{
    body::Body,
    http::Response,
    response::IntoResponse,
};
use std::any::Any;
use tower_http::catch_panic::{CatchPanicLayer, ResponseForPanic};

use crate::domain::log_event::STACK;
use crate::error::AppError;
use crate::infrastructure::logging::LogShipper;

/// Turns a handler panic into a 500 `internal_error` response and ships it at
/// `fatal` level.
#[derive(Clone)]
pub struct ShipPanic {
    logger: LogShipper,
}

impl ResponseForPanic for ShipPanic {
    type ResponseBody = Body;

    fn response_for_panic(&mut self, err: Box<dyn Any + Send + 'static>) -> Response<Body> {
        let detail = if let Some(s) = err.downcast_ref::<String>() {
            s.as_str()
        } else if let Some(s) = err.downcast_ref::<&str>() {
            s
        } else {
            "unknown panic"
        };

        tracing::error!("Handler panicked: {}", detail);
        self.logger
            .fatal(STACK, "handler", format!("Unhandled error: {detail}"));

        AppError::internal("Internal server error").into_response()
    }
}

pub fn layer(logger: LogShipper) -> CatchPanicLayer<ShipPanic> {
    CatchPanicLayer::custom(ShipPanic { logger })
}

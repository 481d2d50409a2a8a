//! HTTP server initialization and runtime setup.
//!
//! Handles log transport selection, service wiring, and the Axum server
//! lifecycle.

use crate::application::services::LinkService;
use crate::config::Config;
use crate::domain::log_event::STACK;
use crate::infrastructure::logging::{HttpLogTransport, LogShipper, LogTransport, NullLogTransport};
use crate::infrastructure::persistence::InMemoryLinkRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Builds the shared state for `config`: log shipper, empty registry and
/// link service.
///
/// An unusable collector URL downgrades to [`NullLogTransport`] instead of
/// failing startup.
pub fn build_state(config: &Config) -> AppState {
    let policy = config.retry_policy();

    let transport: Arc<dyn LogTransport> = if config.log_shipping_enabled {
        match HttpLogTransport::new(&config.log_collector_url, policy.attempt_timeout) {
            Ok(transport) => {
                tracing::info!("Log shipping enabled");
                Arc::new(transport)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to set up log collector client: {}. Using NullLogTransport.",
                    e
                );
                Arc::new(NullLogTransport::new())
            }
        }
    } else {
        tracing::info!("Log shipping disabled (NullLogTransport)");
        Arc::new(NullLogTransport::new())
    };

    let logger = LogShipper::new(transport, policy);
    let link_repository = Arc::new(InMemoryLinkRepository::new());
    let link_service = Arc::new(LinkService::new(link_repository, logger));

    AppState::new(link_service, config.base_url.clone(), config.behind_proxy)
}

/// Runs the HTTP server with the given configuration until Ctrl-C.
///
/// # Errors
///
/// Returns an error if:
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config);
    let logger = state.logger.clone();

    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    let addr = listener.local_addr()?;
    tracing::info!("Listening on http://{addr}");

    logger.info(
        STACK,
        "server",
        format!("URL Shortener service started on port {}", addr.port()),
    );

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutdown signal received");
}

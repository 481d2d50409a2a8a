//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::infrastructure::logging::LogShipper;
use crate::infrastructure::persistence::InMemoryLinkRepository;

/// State shared by every request.
///
/// The registry is owned by the link service; each `AppState` built from a
/// fresh repository is fully isolated from any other.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<InMemoryLinkRepository>>,
    pub logger: LogShipper,
    /// Public base for short links; `None` derives it from the `Host` header.
    pub base_url: Option<String>,
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService<InMemoryLinkRepository>>,
        base_url: Option<String>,
        behind_proxy: bool,
    ) -> Self {
        let logger = link_service.logger().clone();

        Self {
            link_service,
            logger,
            base_url,
            behind_proxy,
        }
    }
}

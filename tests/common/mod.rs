#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use chrono::{TimeDelta, Utc};
use shortlink::application::services::LinkService;
use shortlink::domain::entities::LinkRecord;
use shortlink::domain::log_event::{LogEvent, LogLevel};
use shortlink::domain::repositories::LinkRepository;
use shortlink::infrastructure::logging::{
    LogShipper, LogTransport, RetryPolicy, TransportResult,
};
use shortlink::infrastructure::persistence::InMemoryLinkRepository;
use shortlink::state::AppState;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::Layer;

pub const TEST_BASE_URL: &str = "http://sho.rt";

/// Transport that keeps every delivered event in memory.
#[derive(Default)]
pub struct RecordingTransport {
    events: Mutex<Vec<LogEvent>>,
}

impl RecordingTransport {
    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Waits until an event matching `predicate` is delivered.
    pub async fn wait_for(&self, predicate: impl Fn(&LogEvent) -> bool) -> LogEvent {
        for _ in 0..200 {
            if let Some(event) = self.events().into_iter().find(|e| predicate(e)) {
                return event;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("expected log event was not delivered: {:?}", self.events());
    }
}

#[async_trait]
impl LogTransport for RecordingTransport {
    async fn send(&self, event: &LogEvent) -> TransportResult<()> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

pub struct TestContext {
    pub state: AppState,
    pub repository: Arc<InMemoryLinkRepository>,
    pub transport: Arc<RecordingTransport>,
}

/// Fresh state with an empty registry and a recording log transport.
pub fn create_test_context(base_url: Option<&str>) -> TestContext {
    let transport = Arc::new(RecordingTransport::default());
    let logger = LogShipper::new(transport.clone(), RetryPolicy::default());
    let repository = Arc::new(InMemoryLinkRepository::new());
    let link_service = Arc::new(LinkService::new(repository.clone(), logger));

    TestContext {
        state: AppState::new(link_service, base_url.map(str::to_string), false),
        repository,
        transport,
    }
}

pub fn create_test_state() -> AppState {
    create_test_context(Some(TEST_BASE_URL)).state
}

pub async fn create_test_link(repository: &InMemoryLinkRepository, code: &str, url: &str) {
    let link = LinkRecord::new(
        code.to_string(),
        url.to_string(),
        Utc::now(),
        TimeDelta::minutes(30),
    )
    .unwrap();
    repository.insert(link).await.unwrap();
}

pub async fn create_expired_link(repository: &InMemoryLinkRepository, code: &str, url: &str) {
    let link = LinkRecord::new(
        code.to_string(),
        url.to_string(),
        Utc::now() - TimeDelta::hours(2),
        TimeDelta::hours(1),
    )
    .unwrap();
    repository.insert(link).await.unwrap();
}

pub fn is_level(event: &LogEvent, level: LogLevel, package: &str) -> bool {
    event.level == level && event.package == package
}

pub fn peer_addr() -> SocketAddr {
    "127.0.0.1:12345".parse().unwrap()
}

/// Injects a fixed peer address, standing in for `into_make_service_with_connect_info`.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        req.extensions_mut().insert(ConnectInfo(peer_addr()));
        self.inner.call(req)
    }
}

mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use serde_json::Value;
use shortlink::api::handlers::redirect_handler;
use shortlink::domain::log_event::LogLevel;
use shortlink::domain::repositories::LinkRepository;
use shortlink::state::AppState;

fn server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/{shortcode}", get(redirect_handler))
        .layer(common::MockConnectInfoLayer)
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_redirect_success() {
    let ctx = common::create_test_context(Some(common::TEST_BASE_URL));
    common::create_test_link(&ctx.repository, "go1234", "https://example.com/target").await;
    let server = server(ctx.state);

    let response = server.get("/go1234").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_records_access() {
    let ctx = common::create_test_context(Some(common::TEST_BASE_URL));
    common::create_test_link(&ctx.repository, "count1", "https://example.com").await;
    let repository = ctx.repository.clone();
    let server = server(ctx.state);

    server
        .get("/count1")
        .add_header("User-Agent", "TestBot/1.0")
        .await;

    let details = repository.get_with_history("count1", 10).await.unwrap();
    assert_eq!(details.link.access_count, 1);
    assert_eq!(details.recent_accesses.len(), 1);

    let access = &details.recent_accesses[0];
    assert_eq!(access.client_agent.as_deref(), Some("TestBot/1.0"));
    assert_eq!(access.client_address.as_deref(), Some("127.0.0.1"));
}

#[tokio::test]
async fn test_redirect_behind_proxy_uses_forwarded_for() {
    let mut ctx = common::create_test_context(Some(common::TEST_BASE_URL));
    ctx.state.behind_proxy = true;
    common::create_test_link(&ctx.repository, "proxy1", "https://example.com").await;
    let repository = ctx.repository.clone();
    let server = server(ctx.state);

    server
        .get("/proxy1")
        .add_header("X-Forwarded-For", "203.0.113.7, 10.0.0.1")
        .await;

    let details = repository.get_with_history("proxy1", 10).await.unwrap();
    assert_eq!(
        details.recent_accesses[0].client_address.as_deref(),
        Some("203.0.113.7")
    );
}

#[tokio::test]
async fn test_redirect_ignores_forwarded_for_by_default() {
    let ctx = common::create_test_context(Some(common::TEST_BASE_URL));
    common::create_test_link(&ctx.repository, "direct", "https://example.com").await;
    let repository = ctx.repository.clone();
    let server = server(ctx.state);

    server
        .get("/direct")
        .add_header("X-Forwarded-For", "203.0.113.7")
        .await;

    let details = repository.get_with_history("direct", 10).await.unwrap();
    assert_eq!(
        details.recent_accesses[0].client_address.as_deref(),
        Some("127.0.0.1")
    );
}

#[tokio::test]
async fn test_redirect_not_found() {
    let ctx = common::create_test_context(Some(common::TEST_BASE_URL));
    let transport = ctx.transport.clone();
    let server = server(ctx.state);

    let response = server.get("/nothere").await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["error"]["code"], "not_found");

    let event = transport
        .wait_for(|e| common::is_level(e, LogLevel::Warn, "handler"))
        .await;
    assert_eq!(
        event.message,
        "Redirect attempted for non-existent shortcode: nothere"
    );
}

#[tokio::test]
async fn test_redirect_expired_records_nothing() {
    let ctx = common::create_test_context(Some(common::TEST_BASE_URL));
    common::create_expired_link(&ctx.repository, "gone12", "https://example.com").await;
    let repository = ctx.repository.clone();
    let server = server(ctx.state);

    let response = server.get("/gone12").await;

    assert_eq!(response.status_code(), 410);
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "Shortened URL has expired"
    );

    let link = repository.get("gone12").await.unwrap();
    assert_eq!(link.access_count, 0);
}

#[tokio::test]
async fn test_redirect_after_short_validity_elapses() {
    let ctx = common::create_test_context(Some(common::TEST_BASE_URL));
    let service = ctx.state.link_service.clone();
    let server = server(ctx.state);

    // 0.001 minutes = 60 ms
    let link = service
        .create_short_link(shortlink::prelude::NewLinkRequest {
            url: Some("https://example.com".to_string()),
            validity: Some(shortlink::prelude::Validity::Minutes(0.001)),
            custom_code: Some("brief1".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(link.code, "brief1");

    tokio::time::sleep(std::time::Duration::from_millis(150)).await;

    let response = server.get("/brief1").await;
    assert_eq!(response.status_code(), 410);
}

#[tokio::test]
async fn test_redirect_location_is_ascii() {
    let ctx = common::create_test_context(Some(common::TEST_BASE_URL));
    common::create_test_link(&ctx.repository, "intl12", "https://例え.jp/パス?q=ü").await;
    let server = server(ctx.state);

    let response = server.get("/intl12").await;

    assert_eq!(response.status_code(), 302);

    let location = response.header("location");
    let location = location.to_str().unwrap();
    assert!(location.is_ascii());
    assert!(location.starts_with("https://xn--"));
}

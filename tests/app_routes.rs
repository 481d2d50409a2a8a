mod common;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use serde_json::{Value, json};
use shortlink::domain::log_event::LogLevel;
use shortlink::routes::app_router;
use shortlink::state::AppState;
use tower::ServiceExt;

async fn send(state: &AppState, mut request: Request<Body>) -> Response {
    request
        .extensions_mut()
        .insert(ConnectInfo(common::peer_addr()));

    app_router(state.clone()).oneshot(request).await.unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_full_flow() {
    let ctx = common::create_test_context(Some(common::TEST_BASE_URL));

    let create = Request::builder()
        .method("POST")
        .uri("/shorturls")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "url": "https://www.rust-lang.org/learn", "validity": 5 }).to_string(),
        ))
        .unwrap();

    let response = send(&ctx.state, create).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let short_link = body_json(response).await["shortLink"]
        .as_str()
        .unwrap()
        .to_string();
    let code = short_link.rsplit('/').next().unwrap().to_string();

    let response = send(&ctx.state, get(&format!("/{code}"))).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://www.rust-lang.org/learn"
    );

    let response = send(&ctx.state, get(&format!("/shorturls/{code}"))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let stats = body_json(response).await;
    assert_eq!(stats["accessCount"], 1);
    assert_eq!(stats["accessHistory"][0]["ip"], "127.0.0.1");

    let health = body_json(send(&ctx.state, get("/api/health")).await).await;
    assert_eq!(health["totalUrls"], 1);
}

#[tokio::test]
async fn test_api_is_a_usable_custom_code() {
    let ctx = common::create_test_context(Some(common::TEST_BASE_URL));

    let create = Request::builder()
        .method("POST")
        .uri("/shorturls")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "url": "https://example.com/api", "shortcode": "api" }).to_string(),
        ))
        .unwrap();

    let response = send(&ctx.state, create).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["shortLink"], "http://sho.rt/api");

    let response = send(&ctx.state, get("/api")).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "https://example.com/api");

    let response = send(&ctx.state, get("/api/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_trailing_slash_is_normalized() {
    let ctx = common::create_test_context(Some(common::TEST_BASE_URL));

    let response = send(&ctx.state, get("/api/health/")).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route() {
    let ctx = common::create_test_context(Some(common::TEST_BASE_URL));

    let response = send(&ctx.state, get("/some/unknown/path")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["error"]["message"], "Route not found");

    let event = ctx
        .transport
        .wait_for(|e| common::is_level(e, LogLevel::Warn, "route"))
        .await;
    assert_eq!(event.message, "Route not found: GET /some/unknown/path");
}

#[tokio::test]
async fn test_request_id_header_and_event() {
    let ctx = common::create_test_context(Some(common::TEST_BASE_URL));

    let response = send(&ctx.state, get("/api/health")).await;

    let id = response.headers()["x-request-id"]
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(id.len(), 8);
    assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));

    let event = ctx
        .transport
        .wait_for(|e| common::is_level(e, LogLevel::Info, "middleware"))
        .await;
    assert_eq!(event.message, format!("Request {id} received: GET /api/health"));
}

#[tokio::test]
async fn test_error_responses_carry_request_id() {
    let ctx = common::create_test_context(Some(common::TEST_BASE_URL));

    let response = send(&ctx.state, get("/nothere")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().contains_key("x-request-id"));
}

//! HTTP-level tests for the proxy endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router.
//! A throwaway axum server bound to an ephemeral port stands in for the
//! upstream problem API, so the relay behaviour (verbatim bodies, status
//! propagation) is exercised for real without touching the network.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use axum::routing::get;
use http_body_util::BodyExt;
use tower::ServiceExt;

use leettrack::proxy;
use leettrack::remote::RemoteClient;

const DAILY_BODY: &str =
    r#"{"id":"1","frontend_id":"1","title":"Two Sum","title_slug":"two-sum","difficulty":"Easy"}"#;
const SEARCH_BODY: &str = r#"[{"id":"1","frontend_id":"1","title":"Two Sum","title_slug":"two-sum","url":""}]"#;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Start a stub upstream API on an ephemeral port and return its base URL.
async fn spawn_upstream() -> String {
    let app = Router::new()
        .route(
            "/daily",
            get(|| async { ([(header::CONTENT_TYPE, "application/json")], DAILY_BODY) }),
        )
        .route(
            "/search",
            get(|| async { ([(header::CONTENT_TYPE, "application/json")], SEARCH_BODY) }),
        )
        .route(
            "/problem/{slug}",
            get(|| async { (StatusCode::BAD_GATEWAY, "upstream exploded") }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn send(app: Router, uri: &str) -> Response<axum::body::Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_bytes(response: Response<axum::body::Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

async fn body_json(response: Response<axum::body::Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

// ---------------------------------------------------------------------------
// Test: /api/search without a query is rejected before contacting upstream
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_without_query_is_bad_request() {
    // Point at a port nothing listens on: a 400 must not need the upstream.
    let app = proxy::router(RemoteClient::new("http://127.0.0.1:1"));
    let response = send(app, "/api/search").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(json["error"].is_string(), "400 body should carry an error message");
}

#[tokio::test]
async fn search_with_empty_query_is_bad_request() {
    let app = proxy::router(RemoteClient::new("http://127.0.0.1:1"));
    let response = send(app, "/api/search?query=").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: successful upstream bodies are relayed verbatim
// ---------------------------------------------------------------------------

#[tokio::test]
async fn daily_relays_upstream_body_verbatim() {
    let base = spawn_upstream().await;
    let app = proxy::router(RemoteClient::new(base));

    let response = send(app, "/api/daily").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE].to_str().unwrap(),
        "application/json"
    );

    let body = body_bytes(response).await;
    assert_eq!(body, DAILY_BODY.as_bytes(), "body must be the exact upstream JSON");
}

#[tokio::test]
async fn search_forwards_query_and_relays_results() {
    let base = spawn_upstream().await;
    let app = proxy::router(RemoteClient::new(base));

    let response = send(app, "/api/search?query=two%20sum").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_bytes(response).await;
    assert_eq!(body, SEARCH_BODY.as_bytes());
}

// ---------------------------------------------------------------------------
// Test: upstream failures map to the same status with an error body
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upstream_error_propagates_status_with_error_body() {
    let base = spawn_upstream().await;
    let app = proxy::router(RemoteClient::new(base));

    let response = send(app, "/api/problem/two-sum").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json = body_json(response).await;
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn unreachable_upstream_is_internal_error() {
    let app = proxy::router(RemoteClient::new("http://127.0.0.1:1"));
    let response = send(app, "/api/random").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert!(json["error"].is_string());
}

// ---------------------------------------------------------------------------
// Test: health endpoint
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_ok() {
    let app = proxy::router(RemoteClient::new("http://127.0.0.1:1"));
    let response = send(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

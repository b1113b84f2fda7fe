use std::collections::HashMap;
use std::net::SocketAddr;

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde::Serialize;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::remote::{RemoteClient, Upstream};

/// Install the tracing subscriber for server mode. The TUI never calls
/// this — it owns the terminal and reports through the status bar instead.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leettrack=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the proxy router. Exposed separately from [`serve`] so tests can
/// drive it without binding a socket.
pub fn router(client: RemoteClient) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/daily", get(daily))
        .route("/api/problem/{slug}", get(problem))
        .route("/api/random", get(random))
        .route("/api/search", get(search))
        .layer(TraceLayer::new_for_http())
        .with_state(client)
}

/// Bind and serve until the process is stopped.
pub async fn serve(client: RemoteClient, addr: SocketAddr) -> std::io::Result<()> {
    tracing::info!("proxy listening on {addr}, forwarding to {}", client.base_url());
    let app = router(client);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> axum::Json<HealthResponse> {
    axum::Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn daily(State(client): State<RemoteClient>) -> Response {
    relay(client.forward("/daily").await, "Failed to fetch daily challenge")
}

async fn random(State(client): State<RemoteClient>) -> Response {
    relay(client.forward("/random").await, "Failed to fetch random problem")
}

async fn problem(State(client): State<RemoteClient>, Path(slug): Path<String>) -> Response {
    let path = format!("/problem/{}", crate::remote::urlencode(&slug));
    relay(client.forward(&path).await, "Failed to fetch problem")
}

async fn search(
    State(client): State<RemoteClient>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let query = params.get("query").map(String::as_str).unwrap_or("");
    if query.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({ "error": "query parameter required" })),
        )
            .into_response();
    }

    let path = format!("/search?query={}", crate::remote::urlencode(query));
    relay(client.forward(&path).await, "Search failed")
}

/// Relay an upstream result: verbatim JSON body on success, `{error}` with
/// the propagated status on upstream failure, 500 on transport failure.
fn relay(result: Result<Upstream, reqwest::Error>, message: &str) -> Response {
    match result {
        Ok(upstream) if upstream.status.is_success() => (
            upstream.status,
            [(header::CONTENT_TYPE, "application/json")],
            upstream.body,
        )
            .into_response(),
        Ok(upstream) => {
            tracing::warn!(status = %upstream.status, "upstream returned an error");
            (upstream.status, axum::Json(json!({ "error": message }))).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "error proxying request");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(json!({ "error": message })),
            )
                .into_response()
        }
    }
}

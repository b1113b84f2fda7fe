//! Behavioural tests for the remote lookup client against a stub API.
//!
//! The client's failure policy is "empty or None, never an error to the
//! caller" — these tests pin that down for the status, transport and parse
//! failure cases.

use axum::Router;
use axum::http::{StatusCode, header};
use axum::routing::get;

use leettrack::remote::RemoteClient;

async fn spawn_upstream() -> String {
    let app = Router::new()
        .route(
            "/search",
            get(|| async {
                (
                    [(header::CONTENT_TYPE, "application/json")],
                    r#"[{"id":"1","frontend_id":"1","title":"Two Sum","title_slug":"two-sum","url":""},
                        {"id":"15","frontend_id":"15","title":"3Sum","title_slug":"3sum","url":""}]"#,
                )
            }),
        )
        .route(
            "/problem/{slug}",
            get(|| async {
                (
                    [(header::CONTENT_TYPE, "application/json")],
                    r#"{"id":"1","frontend_id":"1","title":"Two Sum","title_slug":"two-sum",
                        "difficulty":"Easy","likes":10,"dislikes":1,
                        "topicTags":[{"name":"Array"}],"hints":["use a map"]}"#,
                )
            }),
        )
        .route("/daily", get(|| async { (StatusCode::NOT_FOUND, "nope") }))
        .route(
            "/random",
            get(|| async { ([(header::CONTENT_TYPE, "application/json")], "not json at all") }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn search_parses_results() {
    let client = RemoteClient::new(spawn_upstream().await);
    let results = client.search("sum").await;
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].title, "Two Sum");
    assert_eq!(results[1].title_slug, "3sum");
}

#[tokio::test]
async fn problem_returns_detail() {
    let client = RemoteClient::new(spawn_upstream().await);
    let detail = client.problem("two-sum").await.expect("detail expected");
    assert_eq!(detail.title, "Two Sum");
    assert_eq!(detail.hints, vec!["use a map"]);

    let record = detail.into_record();
    assert_eq!(record.tags, vec!["Array"]);
    assert_eq!(record.remote.unwrap().likes, 10);
}

#[tokio::test]
async fn non_success_status_yields_none_or_empty() {
    let client = RemoteClient::new(spawn_upstream().await);
    assert!(client.daily().await.is_none());
}

#[tokio::test]
async fn parse_failure_yields_none() {
    let client = RemoteClient::new(spawn_upstream().await);
    assert!(client.random().await.is_none());
}

#[tokio::test]
async fn unreachable_host_yields_empty_results() {
    let client = RemoteClient::new("http://127.0.0.1:1");
    assert!(client.search("two sum").await.is_empty());
    assert!(client.problem("two-sum").await.is_none());
}

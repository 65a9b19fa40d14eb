//! Integration tests for the HTTP surface
//!
//! Drives the axum router directly with oneshot requests, backed by
//! wiremock standing in for the shelf site.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use spineview::config::Config;
use spineview::progress::ProgressTracker;
use spineview::server::{router, AppState};
use spineview::shelf::build_http_client;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SHELF_PATH: &str = "/review/list/1";

fn test_state() -> AppState {
    let config = Config::default();
    AppState {
        client: build_http_client(&config.scrape.user_agent).unwrap(),
        config: Arc::new(config),
        progress: ProgressTracker::new(),
    }
}

fn book_row(id: u32, title: &str, author: &str) -> String {
    format!(
        r#"<tr id="review_{id}">
            <td class="field title"><div class="value"><a href="/book/{id}">{title}</a></div></td>
            <td class="field author"><div class="value"><a href="/author/{id}">{author}</a></div></td>
        </tr>"#
    )
}

fn shelf_page(total: u64, rows: &str) -> String {
    format!(
        r#"<html><body>
        <div id="shelfHeader"><span class="greyText">(showing 1-20 of {} books)</span></div>
        <table>{}</table></body></html>"#,
        total, rows
    )
}

async fn mount_page(server: &MockServer, page: u32, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(SHELF_PATH))
        .and(query_param("page", page.to_string().as_str()))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn get(state: AppState, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_get_books_requires_url_parameter() {
    let (status, body) = get(test_state(), "/get_books").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing URL parameter");
}

#[tokio::test]
async fn test_get_books_full_success() {
    let server = MockServer::start().await;
    let rows = format!(
        "{}{}",
        book_row(1, "Book 1", "Author 1"),
        book_row(2, "Book 2", "Author 2"),
    );
    mount_page(
        &server,
        1,
        ResponseTemplate::new(200).set_body_string(shelf_page(2, &rows)),
    )
    .await;
    mount_page(
        &server,
        2,
        ResponseTemplate::new(200).set_body_string(shelf_page(2, "")),
    )
    .await;

    let state = test_state();
    let shelf = format!("{}{}?shelf=read", server.uri(), SHELF_PATH);
    let uri = format!("/get_books?url={}", urlencode(&shelf));
    let (status, body) = get(state.clone(), &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_found"], 2);
    assert_eq!(body["books"].as_array().unwrap().len(), 2);
    assert_eq!(body["books"][0]["title"], "Book 1");
    assert_eq!(body["books"][0]["spine_color"], "#808080");
    assert!(body.get("error").is_none());

    // The snapshot left behind reports the finished run.
    let (status, progress) = get(state, "/progress").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(progress["complete"], true);
    assert_eq!(progress["processed"], 2);
    assert_eq!(progress["total"], 2);
    assert_eq!(progress["progress"], 100);
}

#[tokio::test]
async fn test_get_books_partial_success_is_200_with_error() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        ResponseTemplate::new(200).set_body_string(shelf_page(10, &book_row(1, "Book 1", "Author 1"))),
    )
    .await;
    mount_page(&server, 2, ResponseTemplate::new(500)).await;

    let shelf = format!("{}{}?shelf=read", server.uri(), SHELF_PATH);
    let (status, body) = get(test_state(), &format!("/get_books?url={}", urlencode(&shelf))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], "Warn: Failed page 2.");
    assert_eq!(body["books"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_get_books_empty_shelf_is_404() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        ResponseTemplate::new(200).set_body_string("<html><body></body></html>"),
    )
    .await;

    let shelf = format!("{}{}?shelf=read", server.uri(), SHELF_PATH);
    let (status, body) = get(test_state(), &format!("/get_books?url={}", urlencode(&shelf))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No books found.");
    assert_eq!(body["books"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_get_books_fatal_first_page_is_500() {
    let server = MockServer::start().await;
    mount_page(&server, 1, ResponseTemplate::new(500)).await;

    let shelf = format!("{}{}?shelf=read", server.uri(), SHELF_PATH);
    let (status, body) = get(test_state(), &format!("/get_books?url={}", urlencode(&shelf))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("500"));
    assert_eq!(body["books"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_landing_page_resets_progress() {
    let state = test_state();
    state.progress.set_total(10);
    state.progress.record_book();
    state.progress.fail("stale run");

    let response = router(state.clone())
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let snap = state.progress.snapshot();
    assert_eq!(snap.processed, 0);
    assert_eq!(snap.total, 0);
    assert!(!snap.complete);
    assert!(snap.error.is_none());
}

#[tokio::test]
async fn test_progress_endpoint_shape() {
    let state = test_state();
    state.progress.set_total(4);
    state.progress.record_book();

    let (status, body) = get(state, "/progress").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["progress"], 25);
    assert_eq!(body["processed"], 1);
    assert_eq!(body["total"], 4);
    assert_eq!(body["complete"], false);
    assert!(body.get("error").is_none());
}

/// Percent-encodes a URL for use as a query parameter value
fn urlencode(raw: &str) -> String {
    let mut encoded = String::new();
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

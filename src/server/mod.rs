//! HTTP surface for the interactive bookshelf
//!
//! Three routes back the bundled front-end:
//! - `GET /` serves the 3D bookshelf page and resets progress
//! - `GET /get_books` runs one extraction within the request
//! - `GET /progress` returns the live progress snapshot as JSON
//!
//! The progress tracker is shared across requests; the extraction running
//! inside one `/get_books` request is its single writer while `/progress`
//! polls read concurrently. Overlapping `/get_books` requests are not
//! supported and would corrupt each other's reporting.

use crate::config::Config;
use crate::progress::ProgressTracker;
use crate::shelf::{self, build_http_client, NO_BOOKS_MESSAGE};
use crate::SpineError;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, Json};
use axum::routing::get;
use axum::Router;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;

/// The interactive bookshelf page, embedded at compile time
const BOOKSHELF_PAGE: &str = include_str!("../../assets/bookshelf.html");

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub client: Client,
    pub config: Arc<Config>,
    pub progress: ProgressTracker,
}

/// Runs the bookshelf server until the process is stopped
pub async fn serve(config: Config) -> Result<(), SpineError> {
    let addr: SocketAddr = config
        .server
        .bind_address
        .parse()
        .map_err(|_| SpineError::Server(format!("invalid bind address {}", config.server.bind_address)))?;

    let client = build_http_client(&config.scrape.user_agent)?;
    let state = AppState {
        client,
        config: Arc::new(config),
        progress: ProgressTracker::new(),
    };

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/get_books", get(get_books))
        .route("/progress", get(get_progress))
        .with_state(state)
}

/// Serves the bookshelf page and resets any prior run's progress
async fn index(State(state): State<AppState>) -> Html<&'static str> {
    state.progress.reset();
    Html(BOOKSHELF_PAGE)
}

#[derive(Debug, Deserialize)]
struct BooksQuery {
    url: Option<String>,
}

/// Runs one shelf extraction and returns the records as JSON
///
/// Status mapping: 200 for success and for partial results, 400 for a
/// missing `url` parameter, 404 when the shelf yielded zero records, 500
/// only when the very first page fetch failed.
async fn get_books(
    State(state): State<AppState>,
    Query(query): Query<BooksQuery>,
) -> (StatusCode, Json<Value>) {
    let url = query
        .url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty());
    let Some(url) = url else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing URL parameter" })),
        );
    };

    match shelf::extract(&state.client, &state.config.scrape, url, &state.progress).await {
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": err.to_string(), "books": [] })),
        ),
        Ok(extraction) => match extraction.warning {
            Some(warning) if extraction.books.is_empty() && warning == NO_BOOKS_MESSAGE => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": warning, "books": [] })),
            ),
            Some(warning) => (
                StatusCode::OK,
                Json(json!({ "books": extraction.books, "error": warning })),
            ),
            None => (
                StatusCode::OK,
                Json(json!({
                    "books": extraction.books,
                    "total_found": extraction.books.len(),
                })),
            ),
        },
    }
}

/// Returns the progress snapshot of the current (or last) extraction run
async fn get_progress(State(state): State<AppState>) -> Json<crate::progress::ProgressSnapshot> {
    Json(state.progress.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bookshelf_page_embeds_endpoints() {
        assert!(BOOKSHELF_PAGE.contains("/get_books"));
        assert!(BOOKSHELF_PAGE.contains("/progress"));
    }
}

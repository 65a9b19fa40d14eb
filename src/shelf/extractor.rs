//! The paginated shelf extraction loop
//!
//! Drives fetching, row parsing, and cover color sampling for one shelf,
//! publishing progress after every accepted record. Extraction is
//! single-threaded and blocking per network call; the only concurrency is
//! pollers reading the shared [`ProgressTracker`] from outside.

use crate::color::{sample_edge_color, DEFAULT_SPINE_COLOR};
use crate::config::ScrapeConfig;
use crate::progress::ProgressTracker;
use crate::shelf::fetcher::fetch_page;
use crate::shelf::parser;
use crate::SpineError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Marker error recorded when a run terminates with zero records
pub const NO_BOOKS_MESSAGE: &str = "No books found.";

/// One book from the shelf, ready for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub title: String,

    pub author: String,

    /// Empty when the shelf does not expose a publisher column
    #[serde(default)]
    pub publisher: String,

    /// Full-size cover URL, with the thumbnail size token stripped
    #[serde(rename = "image", skip_serializing_if = "Option::is_none", default)]
    pub cover_image_url: Option<String>,

    /// Mean left-edge color of the cover, `#808080` when undeterminable
    pub spine_color: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rating: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub review: Option<String>,
}

/// Outcome of a non-fatal extraction run
///
/// `warning` is set for partial results (a later page failed) and for the
/// zero-result case; callers distinguish those from the fatal arm, which
/// surfaces as an `Err` with no records at all.
#[derive(Debug, Clone)]
pub struct ShelfExtraction {
    pub books: Vec<BookRecord>,
    pub warning: Option<String>,
}

/// Extracts every book record from a paginated shelf listing
///
/// Progress is reset at the start of the run and continuously updated; when
/// this function returns, `progress` reports the run as complete. A fatal
/// setup failure (the very first page fetch) returns `Err` and discards any
/// partial progress; every later failure degrades to a warning on an `Ok`
/// result instead.
///
/// # Arguments
///
/// * `client` - HTTP client from [`crate::shelf::build_http_client`]
/// * `config` - Scrape timeouts and sampling parameters
/// * `shelf_url` - The shelf listing URL, paginated via its `page` parameter
/// * `progress` - Shared tracker polled by concurrent readers
pub async fn extract(
    client: &Client,
    config: &ScrapeConfig,
    shelf_url: &str,
    progress: &ProgressTracker,
) -> Result<ShelfExtraction, SpineError> {
    progress.reset();

    match run(client, config, shelf_url, progress).await {
        Ok(extraction) => {
            progress.finish();
            tracing::info!("Extraction finished: {} books", extraction.books.len());
            Ok(extraction)
        }
        Err(err) => {
            tracing::error!("Extraction failed: {}", err);
            progress.fail(err.to_string());
            Err(err)
        }
    }
}

async fn run(
    client: &Client,
    config: &ScrapeConfig,
    shelf_url: &str,
    progress: &ProgressTracker,
) -> Result<ShelfExtraction, SpineError> {
    let base = Url::parse(shelf_url)?;

    // Page 1 doubles as the source of the total count; its failure is the
    // one fatal condition of the whole run.
    let first_page = page_url(&base, 1);
    let mut body = fetch_page(
        client,
        &first_page,
        Duration::from_secs(config.first_page_timeout_secs),
    )
    .await?;

    let total = parser::parse_total_count(&body);
    progress.set_total(total);
    tracing::debug!("Shelf header advertises {} books", total);

    let mut books = Vec::new();
    let mut warning = None;
    let mut page: u32 = 1;

    loop {
        if page > 1 {
            let url = page_url(&base, page);
            match fetch_page(client, &url, Duration::from_secs(config.page_timeout_secs)).await {
                Ok(next_body) => body = next_body,
                Err(err) => {
                    tracing::warn!("Fetch of page {} failed: {}", page, err);
                    let message = format!("Warn: Failed page {}.", page);
                    progress.warn(&message);
                    warning = Some(message);
                    break;
                }
            }
        }

        let rows = parser::shelf_rows(&body);
        if rows.is_empty() {
            // End of shelf.
            break;
        }
        tracing::info!("Scraping page {}: {} rows", page, rows.len());

        for row in rows {
            let spine_color = match &row.cover_image_url {
                Some(cover_url) => {
                    sample_edge_color(
                        client,
                        cover_url,
                        config.edge_width_percent,
                        Duration::from_secs(config.image_timeout_secs),
                    )
                    .await
                }
                None => DEFAULT_SPINE_COLOR.to_string(),
            };

            books.push(BookRecord {
                title: row.title,
                author: row.author,
                publisher: row.publisher,
                cover_image_url: row.cover_image_url,
                spine_color,
                rating: row.rating,
                review: row.review,
            });
            progress.record_book();
        }

        page += 1;
    }

    if books.is_empty() && warning.is_none() {
        progress.warn(NO_BOOKS_MESSAGE);
        warning = Some(NO_BOOKS_MESSAGE.to_string());
    }

    Ok(ShelfExtraction { books, warning })
}

/// Appends the 1-indexed `page` query parameter to the shelf URL
fn page_url(base: &Url, page: u32) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("page", &page.to_string());
    url
}

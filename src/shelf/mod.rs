//! Shelf extraction module
//!
//! This module contains the scraping core:
//! - HTTP fetching of shelf pages with bounded timeouts
//! - Structural row and field parsing of the listing markup
//! - The paginated extraction loop with live progress reporting

mod extractor;
mod fetcher;
pub mod parser;

pub use extractor::{extract, BookRecord, ShelfExtraction, NO_BOOKS_MESSAGE};
pub use fetcher::{build_http_client, fetch_page};

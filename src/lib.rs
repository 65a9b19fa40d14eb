//! Spineview: a bookshelf scraper and renderer
//!
//! This crate scrapes a user's public book-shelf listing from a cataloguing
//! site, derives a spine color for each cover image, and renders the
//! collection as a static page or an interactive 3D bookshelf.

pub mod color;
pub mod config;
pub mod output;
pub mod progress;
pub mod server;
pub mod shelf;

use thiserror::Error;

/// Main error type for Spineview operations
#[derive(Debug, Error)]
pub enum SpineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Invalid shelf URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Spineview operations
pub type Result<T> = std::result::Result<T, SpineError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use progress::{ProgressSnapshot, ProgressTracker};
pub use shelf::{extract, BookRecord, ShelfExtraction};

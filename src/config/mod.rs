//! Configuration module for Spineview
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every field carries a default, so the binary also runs with no
//! config file at all.
//!
//! # Example
//!
//! ```no_run
//! use spineview::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("spineview.toml")).unwrap();
//! println!("Serving on: {}", config.server.bind_address);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, ScrapeConfig, ServerConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};

// Re-export validation
pub use validation::validate;

//! Output module for rendering extracted shelves
//!
//! This module handles:
//! - Generating the standalone reading-journey HTML page
//! - Formatting site rating strings for display

mod html;

pub use html::{format_rating, render_reading_page, write_reading_page};

//! Static reading-journey page generation
//!
//! Renders an extracted shelf as a standalone HTML page: one card per book
//! with cover thumbnail, title, author, formatted rating, and review text.

use crate::shelf::BookRecord;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Renders the reading-journey page and writes it to `output_path`
///
/// # Arguments
///
/// * `books` - The extracted shelf records
/// * `output_path` - Path where the HTML file should be written
pub fn write_reading_page(books: &[BookRecord], output_path: &Path) -> std::io::Result<()> {
    let html = render_reading_page(books);

    let mut file = File::create(output_path)?;
    file.write_all(html.as_bytes())?;

    Ok(())
}

/// Formats a shelf as a standalone HTML page
pub fn render_reading_page(books: &[BookRecord]) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    html.push_str("    <title>My Reading Journey</title>\n");
    html.push_str("    <style>\n");
    html.push_str(PAGE_STYLE);
    html.push_str("    </style>\n</head>\n<body>\n");
    html.push_str("    <div class=\"content\">\n");
    html.push_str("        <h1>&#128218; My Reading Journey</h1>\n");
    html.push_str(&format!(
        "        <div class=\"stats\"><strong>{}</strong> books read</div>\n",
        books.len()
    ));

    for book in books {
        html.push_str("        <div class=\"book\">\n");
        if let Some(cover) = &book.cover_image_url {
            html.push_str(&format!(
                "            <img src=\"{}\" alt=\"Cover\">\n",
                escape_html(cover)
            ));
        }
        html.push_str(&format!(
            "            <h2>{}</h2>\n",
            escape_html(&book.title)
        ));
        html.push_str(&format!(
            "            <p><em>by {}</em></p>\n",
            escape_html(&book.author)
        ));
        html.push_str(&format!(
            "            <p class=\"rating\">{}</p>\n",
            escape_html(&format_rating(book.rating.as_deref()))
        ));
        if let Some(review) = &book.review {
            html.push_str(&format!("            <p>{}</p>\n", escape_html(review)));
        }
        html.push_str("            <div style=\"clear: both;\"></div>\n");
        html.push_str("        </div>\n");
    }

    html.push_str(&format!(
        "        <div class=\"generated\">Generated {}</div>\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M")
    ));
    html.push_str("    </div>\n</body>\n</html>\n");

    html
}

/// Formats a site rating string for display
///
/// Star counts pass through ("4 of 5 stars" -> "4/5"); the site's phrase
/// ratings map to their star values; anything else renders as not rated.
pub fn format_rating(rating: Option<&str>) -> String {
    let Some(rating) = rating else {
        return "N/R".to_string();
    };

    match rating.trim() {
        "it was amazing" => "\u{2b50} 5/5".to_string(),
        "really liked it" => "\u{2b50} 4/5".to_string(),
        "liked it" => "\u{2b50} 3/5".to_string(),
        "it was ok" => "\u{2b50} 2/5".to_string(),
        "did not like it" => "\u{2b50} 1/5".to_string(),
        other if other.contains("stars") => match other.split_whitespace().next() {
            Some(stars) => format!("\u{2b50} {}/5", stars),
            None => "N/R".to_string(),
        },
        _ => "N/R".to_string(),
    }
}

/// Escapes text for safe interpolation into HTML
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const PAGE_STYLE: &str = "\
        body { font-family: system-ui, -apple-system, sans-serif; background-color: #f8f9fa; margin: 0; padding: 0; min-height: 100vh; }
        .content { max-width: 800px; margin: 0 auto; padding: 40px 20px; background: rgba(255, 255, 255, 0.9); border-radius: 12px; box-shadow: 0 8px 32px rgba(0,0,0,0.1); }
        .book { background: white; padding: 20px; margin-bottom: 20px; border-radius: 8px; box-shadow: 0 2px 8px rgba(0,0,0,0.05); }
        .book img { height: 120px; margin-right: 20px; border-radius: 4px; float: left; }
        .stats { font-size: 1.2em; margin-bottom: 30px; color: #1a1f36; }
        .generated { margin-top: 40px; font-size: 0.8em; color: #888; }
        h1 { margin: 0 0 30px 0; color: #1a1f36; font-size: 2.5em; }
        h2 { margin: 0; color: #1a1f36; font-size: 1.2em; }
        .rating { color: #6772e5; font-weight: 500; }
";

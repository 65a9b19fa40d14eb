//! Structural parsing of shelf listing pages
//!
//! A shelf page is a table of review rows (`tr[id^="review_"]`) whose fields
//! live in cells classed by field name, each wrapping a `.value` element.
//! Every field lookup is independently null-safe so a markup change in one
//! field cannot break extraction of the others. All functions here are
//! synchronous and return owned data; no parser state outlives the call.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// One shelf row with its fields extracted, prior to color sampling
///
/// Rows missing a title or author are rejected during extraction and never
/// reach this type; every other field degrades to empty/absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub cover_image_url: Option<String>,
    pub rating: Option<String>,
    pub review: Option<String>,
}

/// Parses all accepted book rows out of a shelf page
///
/// Returns an empty vector when the page has no review rows, which the
/// extraction loop treats as the end of the shelf.
pub fn shelf_rows(html: &str) -> Vec<ParsedRow> {
    let document = Html::parse_document(html);
    let Ok(row_selector) = Selector::parse(r#"tr[id^="review_"]"#) else {
        return Vec::new();
    };

    document
        .select(&row_selector)
        .filter_map(|row| extract_row(&row))
        .collect()
}

/// Parses the total-book count from the shelf header
///
/// Tries the header's count text first, then the selected-shelf tab, and
/// defaults to 1 so a progress percentage never divides by zero.
pub fn parse_total_count(html: &str) -> u64 {
    let document = Html::parse_document(html);
    header_count(&document)
        .or_else(|| selected_shelf_count(&document))
        .filter(|count| *count > 0)
        .unwrap_or(1)
}

/// Rewrites a thumbnail cover URL to request the full-size variant
///
/// Thumbnail URLs embed a size-limiting token (`._SX98_.`, `._SY475_.`)
/// between the basename and the extension; collapsing it to `.` yields the
/// unconstrained image.
pub fn upscale_cover_url(url: &str) -> String {
    match Regex::new(r"\._S[XY]?\d+_?\.") {
        Ok(re) => re.replace_all(url, ".").into_owned(),
        Err(_) => url.to_string(),
    }
}

/// Extracts a single row, rejecting it if title or author is missing
fn extract_row(row: &ElementRef) -> Option<ParsedRow> {
    let title = select_text(row, "td.field.title .value a")?;
    let author = select_text(row, "td.field.author .value a")?;

    let publisher = select_text(row, "td.field.publisher .value").unwrap_or_default();
    let cover_image_url = select_attr(row, "td.field.cover img", "src")
        .map(|src| upscale_cover_url(&src))
        .filter(|src| !src.is_empty());
    let rating = extract_rating(row);
    let review = select_text(row, "td.field.review .value span.greyText");

    Some(ParsedRow {
        title,
        author,
        publisher,
        cover_image_url,
        rating,
        review,
    })
}

/// Extracts the human-readable rating for a row
///
/// The stars element carries the rating text in its `title` attribute; some
/// renderings only encode it as a `p<percent>` class, in which case the
/// percentage maps back to a star count (20% per star).
fn extract_rating(row: &ElementRef) -> Option<String> {
    let selector = Selector::parse("td.field.rating .value span.staticStars").ok()?;
    let element = row.select(&selector).next()?;

    if let Some(title) = element.value().attr("title") {
        let title = title.trim();
        if !title.is_empty() {
            return Some(title.to_string());
        }
    }

    element.value().classes().find_map(|class| {
        let percent: u32 = class.strip_prefix('p')?.parse().ok()?;
        Some(format!("{} of 5 stars", percent / 20))
    })
}

/// Returns the trimmed text of the first element matching `selector` within
/// `row`, or None if the selector misses or the text is empty
fn select_text(row: &ElementRef, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    row.select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Returns an attribute of the first element matching `selector` within `row`
fn select_attr(row: &ElementRef, selector: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    row.select(&selector)
        .next()
        .and_then(|element| element.value().attr(attr))
        .map(|value| value.to_string())
}

fn header_count(document: &Html) -> Option<u64> {
    let selector = Selector::parse("#shelfHeader .greyText").ok()?;
    let text = document
        .select(&selector)
        .next()?
        .text()
        .collect::<String>();
    let re = Regex::new(r"of (\d+) books").ok()?;
    re.captures(&text)?.get(1)?.as_str().parse().ok()
}

fn selected_shelf_count(document: &Html) -> Option<u64> {
    let selector = Selector::parse(".selectedShelf").ok()?;
    let text = document
        .select(&selector)
        .next()?
        .text()
        .collect::<String>();
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

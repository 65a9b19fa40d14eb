//! Cover edge color sampling
//!
//! The left edge of a cover image approximates the book's spine-adjacent
//! region, so its mean color makes a plausible spine color for rendering.
//! Sampling is strictly best-effort: any download, decode, or dimension
//! problem falls back to neutral gray and is never surfaced to the caller.

use image::RgbImage;
use reqwest::Client;
use std::time::Duration;

/// Neutral gray used whenever a spine color cannot be determined
pub const DEFAULT_SPINE_COLOR: &str = "#808080";

/// Downloads a cover image and returns its mean left-edge color
///
/// Returns [`DEFAULT_SPINE_COLOR`] on any failure; this function never
/// errors out of an extraction run.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `image_url` - URL of the cover image
/// * `edge_width_percent` - Width of the sampled strip, as a percentage of
///   the image width
/// * `timeout` - Per-request download timeout
pub async fn sample_edge_color(
    client: &Client,
    image_url: &str,
    edge_width_percent: u32,
    timeout: Duration,
) -> String {
    match fetch_edge_color(client, image_url, edge_width_percent, timeout).await {
        Some(color) => color,
        None => {
            tracing::debug!("Could not sample cover {}, using default", image_url);
            DEFAULT_SPINE_COLOR.to_string()
        }
    }
}

async fn fetch_edge_color(
    client: &Client,
    image_url: &str,
    edge_width_percent: u32,
    timeout: Duration,
) -> Option<String> {
    let response = client
        .get(image_url)
        .timeout(timeout)
        .send()
        .await
        .ok()?
        .error_for_status()
        .ok()?;

    let bytes = response.bytes().await.ok()?;
    let img = image::load_from_memory(&bytes).ok()?;

    // to_rgb8 normalizes the color mode; grayscale sources come out with
    // the single channel replicated across all three.
    edge_color_of(&img.to_rgb8(), edge_width_percent)
}

/// Computes the mean color of a left-edge strip of `img`
///
/// The strip width is `round(width * edge_width_percent / 100)`, clamped to
/// at least one pixel and at most the full image width. Channel means are
/// floored to integers. Returns `None` for degenerate dimensions
/// (width <= 1 or height == 0).
pub fn edge_color_of(img: &RgbImage, edge_width_percent: u32) -> Option<String> {
    let (width, height) = (img.width(), img.height());
    if width <= 1 || height == 0 {
        return None;
    }

    let edge_width =
        ((width as f64 * edge_width_percent as f64 / 100.0).round() as u32).clamp(1, width);

    let mut sums = [0u64; 3];
    for y in 0..height {
        for x in 0..edge_width {
            let pixel = img.get_pixel(x, y);
            for (sum, channel) in sums.iter_mut().zip(pixel.0) {
                *sum += u64::from(channel);
            }
        }
    }

    let count = u64::from(edge_width) * u64::from(height);
    let mean = sums.map(|sum| (sum / count) as u8);
    Some(rgb_hex(mean[0], mean[1], mean[2]))
}

/// Formats a color as a 6-digit lowercase hex string
fn rgb_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb(color))
    }

    #[test]
    fn test_solid_image_mean_is_its_color() {
        let img = solid(100, 150, [10, 128, 250]);
        assert_eq!(edge_color_of(&img, 10), Some("#0a80fa".to_string()));
    }

    #[test]
    fn test_edge_strip_ignores_right_side() {
        // Left 10% red, rest white; a 10% strip must come out pure red.
        let mut img = solid(100, 10, [255, 255, 255]);
        for y in 0..10 {
            for x in 0..10 {
                img.put_pixel(x, y, Rgb([255, 0, 0]));
            }
        }
        assert_eq!(edge_color_of(&img, 10), Some("#ff0000".to_string()));
    }

    #[test]
    fn test_mean_is_floored() {
        // Two columns in the strip: (0,0,0) and (255,255,255) -> mean 127.5,
        // floored to 127.
        let mut img = solid(20, 1, [0, 0, 0]);
        img.put_pixel(1, 0, Rgb([255, 255, 255]));
        assert_eq!(edge_color_of(&img, 10), Some("#7f7f7f".to_string()));
    }

    #[test]
    fn test_strip_width_clamped_to_one_pixel() {
        // round(3 * 10 / 100) = 0, clamped up to 1: only column 0 counts.
        let mut img = solid(3, 2, [0, 255, 0]);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(0, 1, Rgb([255, 0, 0]));
        assert_eq!(edge_color_of(&img, 10), Some("#ff0000".to_string()));
    }

    #[test]
    fn test_full_width_strip() {
        let img = solid(4, 4, [1, 2, 3]);
        assert_eq!(edge_color_of(&img, 100), Some("#010203".to_string()));
    }

    #[test]
    fn test_degenerate_width_rejected() {
        let img = solid(1, 50, [255, 0, 0]);
        assert_eq!(edge_color_of(&img, 10), None);
    }

    #[test]
    fn test_degenerate_height_rejected() {
        let img = RgbImage::new(10, 0);
        assert_eq!(edge_color_of(&img, 10), None);
    }

    #[test]
    fn test_hex_is_lowercase_and_padded() {
        assert_eq!(rgb_hex(0xAB, 0x05, 0x00), "#ab0500");
        assert_eq!(rgb_hex(0, 0, 0), "#000000");
        assert_eq!(rgb_hex(255, 255, 255), "#ffffff");
    }
}

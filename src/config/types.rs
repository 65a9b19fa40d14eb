use serde::Deserialize;

/// Main configuration structure for Spineview
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub scrape: ScrapeConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address and port the bookshelf server binds to
    #[serde(rename = "bind-address", default = "default_bind_address")]
    pub bind_address: String,
}

/// Shelf scraping configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeConfig {
    /// User agent sent with every request; browser-like by default to
    /// reduce blocking by the shelf site
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Timeout for the initial shelf page fetch (seconds)
    #[serde(rename = "first-page-timeout-secs", default = "default_first_page_timeout")]
    pub first_page_timeout_secs: u64,

    /// Timeout for every later shelf page fetch (seconds)
    #[serde(rename = "page-timeout-secs", default = "default_page_timeout")]
    pub page_timeout_secs: u64,

    /// Timeout for cover image downloads (seconds)
    #[serde(rename = "image-timeout-secs", default = "default_image_timeout")]
    pub image_timeout_secs: u64,

    /// Width of the sampled cover strip, as a percentage of image width
    #[serde(rename = "edge-width-percent", default = "default_edge_width_percent")]
    pub edge_width_percent: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            first_page_timeout_secs: default_first_page_timeout(),
            page_timeout_secs: default_page_timeout(),
            image_timeout_secs: default_image_timeout(),
            edge_width_percent: default_edge_width_percent(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

fn default_first_page_timeout() -> u64 {
    15
}

fn default_page_timeout() -> u64 {
    10
}

fn default_image_timeout() -> u64 {
    10
}

fn default_edge_width_percent() -> u32 {
    10
}

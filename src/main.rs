//! Spineview main entry point
//!
//! This is the command-line interface for the Spineview bookshelf scraper.

use clap::{Parser, Subcommand};
use spineview::config::{load_config_with_hash, Config};
use spineview::output::write_reading_page;
use spineview::progress::ProgressTracker;
use spineview::shelf::{build_http_client, extract};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Spineview: a bookshelf scraper and renderer
///
/// Spineview scrapes a public book-shelf listing, samples a spine color
/// from each cover image, and renders the collection as a static page or
/// an interactive 3D bookshelf served over HTTP.
#[derive(Parser, Debug)]
#[command(name = "spineview")]
#[command(version = "1.0.0")]
#[command(about = "A bookshelf scraper and renderer", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the interactive bookshelf server
    Serve,

    /// Extract a shelf and print the records as JSON
    Scrape {
        /// The shelf listing URL
        url: String,
    },

    /// Extract a shelf and write a static reading-journey page
    Export {
        /// The shelf listing URL
        url: String,

        /// Output path for the generated HTML
        #[arg(short, long, default_value = "index.html")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load configuration, falling back to defaults when no file is given
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    match cli.command {
        Command::Serve => handle_serve(config).await?,
        Command::Scrape { url } => handle_scrape(config, &url).await?,
        Command::Export { url, output } => handle_export(config, &url, &output).await?,
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("spineview=info,warn"),
            1 => EnvFilter::new("spineview=debug,info"),
            2 => EnvFilter::new("spineview=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the serve mode: runs the HTTP server until stopped
async fn handle_serve(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting bookshelf server on {}", config.server.bind_address);

    match spineview::server::serve(config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("Server failed: {}", e);
            Err(e.into())
        }
    }
}

/// Handles the scrape mode: one extraction, records printed as JSON
async fn handle_scrape(config: Config, url: &str) -> anyhow::Result<()> {
    let client = build_http_client(&config.scrape.user_agent)?;
    let progress = ProgressTracker::new();

    let extraction = extract(&client, &config.scrape, url, &progress).await?;

    if let Some(warning) = &extraction.warning {
        tracing::warn!("{}", warning);
    }

    let payload = serde_json::json!({
        "books": extraction.books,
        "error": extraction.warning,
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);

    Ok(())
}

/// Handles the export mode: one extraction, rendered to a static page
async fn handle_export(
    config: Config,
    url: &str,
    output: &std::path::Path,
) -> anyhow::Result<()> {
    let client = build_http_client(&config.scrape.user_agent)?;
    let progress = ProgressTracker::new();

    let extraction = extract(&client, &config.scrape, url, &progress).await?;

    if let Some(warning) = &extraction.warning {
        tracing::warn!("{}", warning);
    }

    write_reading_page(&extraction.books, output)?;

    println!(
        "\u{2713} Exported {} books to: {}",
        extraction.books.len(),
        output.display()
    );

    Ok(())
}

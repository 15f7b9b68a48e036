//! motif-scrape - Bandcamp album scraper
//!
//! Writes a catalog YAML stream (album header followed by one record per
//! track) for the wiki editors to complete by hand.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use motif_scrape::BandcampScraper;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "motif-scrape")]
#[command(about = "Scrape a Bandcamp album page into catalog YAML")]
#[command(version)]
struct Args {
    /// Album page URL (https://<artist>.bandcamp.com/album/<name>)
    url: String,

    /// Output file
    #[arg(short, long, default_value = "metadata.yaml")]
    output: PathBuf,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(args.log_level.as_str())),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("motif-scrape {}", env!("CARGO_PKG_VERSION"));

    let scraper = BandcampScraper::new().context("Failed to create HTTP client")?;
    let document = scraper
        .scrape_album(&args.url)
        .await
        .with_context(|| format!("Failed to scrape {}", args.url))?;

    document
        .write_to(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!(
        tracks = document.tracks.len(),
        "Wrote {}",
        args.output.display()
    );

    Ok(())
}

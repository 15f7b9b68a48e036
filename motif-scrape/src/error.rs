//! Error types for motif-scrape

use thiserror::Error;

/// Album page scraping errors
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Request could not be sent or the body could not be read
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// Page is missing an element the scraper relies on
    #[error("Missing element '{selector}' on {url}")]
    MissingElement { selector: String, url: String },

    /// A CSS selector failed to parse
    #[error("Invalid selector '{0}'")]
    Selector(String),

    /// URL is not an album page
    #[error("Not an album URL: {0}")]
    NotAnAlbumUrl(String),

    /// YAML encoding error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for scraping operations
pub type ScrapeResult<T> = Result<T, ScrapeError>;

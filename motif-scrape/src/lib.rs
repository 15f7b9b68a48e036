//! # Motif Scrape
//!
//! Bootstraps catalog YAML for one album from its Bandcamp page.

pub mod client;
pub mod error;
pub mod extract;
pub mod page;
pub mod record;

pub use client::BandcampScraper;
pub use error::{ScrapeError, ScrapeResult};
pub use record::AlbumDocument;

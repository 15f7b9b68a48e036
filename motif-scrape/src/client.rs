//! Bandcamp page fetcher
//!
//! Pages are fetched one at a time with a small delay between requests.

use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use motif_common::time::today;

use crate::error::{ScrapeError, ScrapeResult};
use crate::page::{parse_album_page, parse_track_page, TrackPage};
use crate::record::{AlbumDocument, AlbumHeaderRecord, TrackRecord};

const USER_AGENT: &str = concat!("motif-scrape/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;
const MIN_REQUEST_INTERVAL_MS: u64 = 500;

/// Enforces a minimum gap between consecutive requests
struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval,
        }
    }

    async fn wait(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                debug!("Rate limiting: waiting {:?}", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }
}

/// Scrapes an album page and its track pages into catalog records
pub struct BandcampScraper {
    http_client: reqwest::Client,
    rate_limiter: RateLimiter,
}

impl BandcampScraper {
    pub fn new() -> ScrapeResult<Self> {
        Self::with_interval(Duration::from_millis(MIN_REQUEST_INTERVAL_MS))
    }

    pub fn with_interval(min_interval: Duration) -> ScrapeResult<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http_client,
            rate_limiter: RateLimiter::new(min_interval),
        })
    }

    /// GET a page body, failing on non-success status
    pub async fn fetch(&self, url: &str) -> ScrapeResult<String> {
        self.rate_limiter.wait().await;
        debug!(url = %url, "Fetching page");

        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }

    async fn scrape_track(&self, url: &str) -> ScrapeResult<TrackPage> {
        let html = self.fetch(url).await?;
        parse_track_page(&html, url)
    }

    /// Build the catalog document for the album at `album_url`.
    ///
    /// A failing album page is fatal; failing track pages are skipped.
    pub async fn scrape_album(&self, album_url: &str) -> ScrapeResult<AlbumDocument> {
        let html = self.fetch(album_url).await?;
        let album = parse_album_page(&html, album_url)?;
        info!(
            title = %album.title,
            tracks = album.track_urls.len(),
            "Scraped album page"
        );

        let header = AlbumHeaderRecord::new(&album, album_url, today());

        let mut tracks = Vec::with_capacity(album.track_urls.len());
        for url in &album.track_urls {
            match self.scrape_track(url).await {
                Ok(track) => {
                    debug!(track = %track.name, artist = %track.artist, "Scraped track");
                    tracks.push(TrackRecord::new(&track, url));
                }
                Err(e) => warn!(url = %url, error = %e, "Skipping track"),
            }
        }

        info!(
            scraped = tracks.len(),
            skipped = album.track_urls.len() - tracks.len(),
            "Finished album"
        );

        Ok(AlbumDocument { header, tracks })
    }
}

//! Album and track page parsing
//!
//! Pure functions over fetched HTML so they can be tested without network.

use scraper::{ElementRef, Html, Selector};

use crate::error::{ScrapeError, ScrapeResult};
use crate::extract::{extract_substring, ART_CREDIT_DELIMITERS, CREDIT_DELIMITERS};

const ALBUM_TITLE: &str = "#name-section .trackTitle";
const ALBUM_ABOUT: &str = ".tralbumData.tralbum-about";
const TRACK_ROW_TITLE: &str = ".title";
const LINK: &str = "a";
const TRACK_TITLE: &str = ".trackTitle";
const TRACK_CREDITS: &str = ".tralbumData.tralbum-credits";
const TRACK_DURATION: &str = ".time.secondaryText";

/// Fields scraped from an album page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumPage {
    pub title: String,
    /// Whitespace-separated tokens of the cover art credit
    pub cover_artists: Vec<String>,
    /// Absolute track page URLs in page order
    pub track_urls: Vec<String>,
}

/// Fields scraped from a track page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackPage {
    pub name: String,
    pub artist: String,
    pub duration: Option<String>,
}

fn selector(css: &str) -> ScrapeResult<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector(format!("{}: {:?}", css, e)))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn first_text(document: &Html, css: &str) -> ScrapeResult<Option<String>> {
    let sel = selector(css)?;
    Ok(document.select(&sel).next().map(element_text))
}

fn required_text(document: &Html, css: &str, url: &str) -> ScrapeResult<String> {
    first_text(document, css)?.ok_or_else(|| ScrapeError::MissingElement {
        selector: css.to_string(),
        url: url.to_string(),
    })
}

/// Site root of an album URL: everything before `/album/`
pub fn base_url(album_url: &str) -> ScrapeResult<&str> {
    album_url
        .split_once("/album/")
        .map(|(base, _)| base)
        .ok_or_else(|| ScrapeError::NotAnAlbumUrl(album_url.to_string()))
}

/// Parse an album page fetched from `url`
pub fn parse_album_page(html: &str, url: &str) -> ScrapeResult<AlbumPage> {
    let base = base_url(url)?;
    let document = Html::parse_document(html);

    let title = required_text(&document, ALBUM_TITLE, url)?;
    let about = first_text(&document, ALBUM_ABOUT)?.unwrap_or_default();

    let mut credit = extract_substring(&about, "art by", &ART_CREDIT_DELIMITERS);
    if credit.is_empty() {
        credit = extract_substring(&about, "cover by", &ART_CREDIT_DELIMITERS);
    }
    let cover_artists = credit.split_whitespace().map(str::to_string).collect();

    let row_sel = selector(TRACK_ROW_TITLE)?;
    let link_sel = selector(LINK)?;
    let track_urls = document
        .select(&row_sel)
        .filter_map(|row| row.select(&link_sel).next())
        .filter_map(|link| link.value().attr("href"))
        .filter(|href| href.contains("/track/"))
        .map(|href| format!("{}{}", base, href))
        .collect();

    Ok(AlbumPage {
        title,
        cover_artists,
        track_urls,
    })
}

/// Parse a track page fetched from `url`.
///
/// `"Artist - Name"` titles carry their own artist; otherwise the artist
/// comes from the "music by" credit.
pub fn parse_track_page(html: &str, url: &str) -> ScrapeResult<TrackPage> {
    let document = Html::parse_document(html);
    let title = required_text(&document, TRACK_TITLE, url)?;

    let (artist, name) = match title.split_once(" - ") {
        Some((artist, name)) => (artist.to_string(), name.to_string()),
        None => {
            let credits = required_text(&document, TRACK_CREDITS, url)?;
            let artist = extract_substring(&credits, "music by", &CREDIT_DELIMITERS);
            (artist, title.clone())
        }
    };

    let duration = first_text(&document, TRACK_DURATION)?.filter(|d| !d.is_empty());

    Ok(TrackPage {
        name,
        artist,
        duration,
    })
}

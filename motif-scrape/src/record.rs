//! Catalog YAML records emitted by the scraper

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use motif_common::time::format_day;

use crate::error::ScrapeResult;
use crate::page::{AlbumPage, TrackPage};

/// Placeholder the wiki editors fill in by hand
const PLACEHOLDER: &str = "-";
const DEFAULT_COLOR: &str = "#ffffff";
const DOCUMENT_SEPARATOR: &str = "---\n";

#[derive(Debug, Clone, Serialize)]
pub struct AlbumHeaderRecord {
    #[serde(rename = "Album")]
    pub album: String,
    #[serde(rename = "Date Added")]
    pub date_added: String,
    #[serde(rename = "URLs")]
    pub urls: Vec<String>,
    #[serde(rename = "Cover Artists")]
    pub cover_artists: Vec<String>,
    #[serde(rename = "Color")]
    pub color: String,
    #[serde(rename = "Groups")]
    pub groups: Vec<String>,
}

impl AlbumHeaderRecord {
    pub fn new(page: &AlbumPage, url: &str, date_added: NaiveDate) -> Self {
        Self {
            album: page.title.clone(),
            date_added: format_day(date_added),
            urls: vec![url.to_string(), PLACEHOLDER.to_string()],
            cover_artists: page.cover_artists.clone(),
            color: DEFAULT_COLOR.to_string(),
            groups: vec![PLACEHOLDER.to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackRecord {
    #[serde(rename = "Track")]
    pub track: String,
    #[serde(rename = "Artists")]
    pub artists: Vec<String>,
    #[serde(rename = "URLs")]
    pub urls: Vec<String>,
    #[serde(rename = "Duration", skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl TrackRecord {
    pub fn new(page: &TrackPage, url: &str) -> Self {
        Self {
            track: page.name.clone(),
            artists: vec![page.artist.clone()],
            urls: vec![url.to_string(), PLACEHOLDER.to_string()],
            duration: page.duration.clone(),
        }
    }
}

/// Header plus tracks for one album file
#[derive(Debug, Clone)]
pub struct AlbumDocument {
    pub header: AlbumHeaderRecord,
    pub tracks: Vec<TrackRecord>,
}

impl AlbumDocument {
    /// Render as a multi-document YAML stream, each document followed by `---`
    pub fn to_yaml(&self) -> ScrapeResult<String> {
        let mut out = serde_yaml::to_string(&self.header)?;
        out.push_str(DOCUMENT_SEPARATOR);
        for track in &self.tracks {
            out.push_str(&serde_yaml::to_string(track)?);
            out.push_str(DOCUMENT_SEPARATOR);
        }
        Ok(out)
    }

    pub fn write_to(&self, path: &Path) -> ScrapeResult<()> {
        let yaml = self.to_yaml()?;
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(yaml.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motif_common::models::CatalogRecord;
    use serde::Deserialize;

    fn document() -> AlbumDocument {
        let album = AlbumPage {
            title: "Strife!".to_string(),
            cover_artists: vec!["Lexxy".to_string()],
            track_urls: vec![],
        };
        let track = TrackPage {
            name: "Stormspirit".to_string(),
            artist: "Toby Fox".to_string(),
            duration: Some("3:12".to_string()),
        };
        AlbumDocument {
            header: AlbumHeaderRecord::new(
                &album,
                "https://homestuck.bandcamp.com/album/strife",
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            ),
            tracks: vec![TrackRecord::new(
                &track,
                "https://homestuck.bandcamp.com/track/stormspirit",
            )],
        }
    }

    #[test]
    fn test_stream_reads_back_as_catalog_records() {
        let yaml = document().to_yaml().unwrap();
        assert!(yaml.ends_with("---\n"));
        assert!(yaml.contains("Date Added: 2024-01-02"));

        let records: Vec<CatalogRecord> = serde_yaml::Deserializer::from_str(&yaml)
            .filter_map(|doc| Option::<CatalogRecord>::deserialize(doc).unwrap())
            .collect();
        assert_eq!(records.len(), 2);
        assert!(records[0].is_album_header());
        assert_eq!(records[0].album.as_deref(), Some("Strife!"));
        assert_eq!(records[1].track.as_deref(), Some("Stormspirit"));
        assert_eq!(records[1].artist_list(), vec!["Toby Fox".to_string()]);
    }

    #[test]
    fn test_track_without_duration_omits_key() {
        let page = TrackPage {
            name: "Ruins".to_string(),
            artist: "Toby Fox".to_string(),
            duration: None,
        };
        let yaml = serde_yaml::to_string(&TrackRecord::new(&page, "u")).unwrap();
        assert!(!yaml.contains("Duration"));
        let record: CatalogRecord = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(record.url_list(), ["u".to_string(), "-".to_string()]);
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metadata.yaml");
        document().write_to(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, document().to_yaml().unwrap());
    }
}

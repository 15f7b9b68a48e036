//! Catalog loader
//!
//! Reads the per-album YAML files (one multi-document stream per album: an
//! album header plus track records, possibly with null placeholders) and
//! decides which albums are playable.

use motif_common::config::GameConfig;
use motif_common::models::CatalogRecord;
use motif_common::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Catalog file extension
const ALBUM_EXTENSION: &str = "yaml";

/// One parsed album file
#[derive(Debug, Clone)]
pub struct AlbumFile {
    /// File stem, also the album's wiki directory
    pub stem: String,
    pub path: PathBuf,
    /// First record carrying `Album`
    pub header: CatalogRecord,
    /// Every other non-null record, in file order
    pub tracks: Vec<CatalogRecord>,
}

impl AlbumFile {
    /// Parse an album file's document stream
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| Error::InvalidInput(format!("No file name: {}", path.display())))?;

        let mut header = None;
        let mut tracks = Vec::new();
        for document in serde_yaml::Deserializer::from_str(content) {
            let record = Option::<CatalogRecord>::deserialize(document).map_err(|source| {
                Error::Yaml {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
            let Some(record) = record else {
                continue;
            };
            if header.is_none() && record.is_album_header() {
                header = Some(record);
            } else {
                tracks.push(record);
            }
        }

        let header = header.ok_or_else(|| Error::MissingAlbumHeader(path.to_path_buf()))?;
        Ok(Self {
            stem,
            path: path.to_path_buf(),
            header,
            tracks,
        })
    }

    /// Read and parse an album file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(path, &content)
    }

    /// Display title of the album
    pub fn title(&self) -> &str {
        self.header.album.as_deref().unwrap_or_default()
    }

    /// Group memberships of the album
    pub fn groups(&self) -> &[String] {
        self.header.group_list()
    }

    /// Tracks eligible for indexing: not aliases, with a name and URLs
    pub fn candidate_tracks(&self) -> impl Iterator<Item = &CatalogRecord> {
        self.tracks
            .iter()
            .filter(|track| !track.is_alias() && track.is_candidate())
    }

    /// Whether a track falls back to the album cover for artwork
    pub fn uses_album_cover(&self, track: &CatalogRecord) -> bool {
        self.header.lacks_track_art() || track.lacks_cover_art()
    }
}

/// Every album file in a catalog directory
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub albums: Vec<AlbumFile>,
}

impl Catalog {
    /// Load every `*.yaml` file directly inside `album_dir`, in file-name order
    pub fn load(album_dir: &Path) -> Result<Self> {
        if !album_dir.is_dir() {
            return Err(Error::InvalidInput(format!(
                "Catalog directory not found: {}",
                album_dir.display()
            )));
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(album_dir).min_depth(1).max_depth(1) {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    if entry.file_type().is_file()
                        && path.extension().and_then(|e| e.to_str()) == Some(ALBUM_EXTENSION)
                    {
                        paths.push(path.to_path_buf());
                    }
                }
                Err(e) => {
                    warn!("Error accessing catalog entry: {}", e);
                }
            }
        }
        paths.sort();

        info!("Loading {} albums from {}", paths.len(), album_dir.display());
        let albums = paths
            .iter()
            .map(|path| AlbumFile::load(path))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { albums })
    }
}

/// Why an album is not playable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlbumVerdict {
    Included,
    ExcludedByName,
    NotInIncludedGroup,
    InExcludedGroup,
}

/// Album inclusion rules
#[derive(Debug, Clone)]
pub struct AlbumFilter {
    included_groups: Vec<String>,
    excluded_groups: Vec<String>,
    excluded_albums: Vec<String>,
}

impl AlbumFilter {
    pub fn new(game: &GameConfig) -> Self {
        Self {
            included_groups: game.all_included_groups(),
            excluded_groups: game.excluded_groups.clone(),
            excluded_albums: game.excluded_albums.clone(),
        }
    }

    /// Decide whether an album contributes playable songs
    pub fn verdict(&self, album: &AlbumFile) -> AlbumVerdict {
        if self.excluded_albums.contains(&album.stem) {
            return AlbumVerdict::ExcludedByName;
        }
        let groups = album.groups();
        if !groups.iter().any(|g| self.included_groups.contains(g)) {
            return AlbumVerdict::NotInIncludedGroup;
        }
        if groups.iter().any(|g| self.excluded_groups.contains(g)) {
            return AlbumVerdict::InExcludedGroup;
        }
        AlbumVerdict::Included
    }

    /// Playable albums of a catalog, in catalog order
    pub fn included<'a>(&'a self, catalog: &'a Catalog) -> impl Iterator<Item = &'a AlbumFile> {
        catalog.albums.iter().filter(move |album| {
            let verdict = self.verdict(album);
            if verdict != AlbumVerdict::Included {
                debug!("Skipping {}: {:?}", album.stem, verdict);
            }
            verdict == AlbumVerdict::Included
        })
    }
}

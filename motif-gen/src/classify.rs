//! Track classifier
//!
//! Official/fandom status per track and artist identifier resolution.
//! Reference identifiers are resolved against the slug index, see
//! [`crate::index::SlugIndex::resolve_reference`].

use motif_common::config::{GameConfig, OfficialException};
use motif_common::models::CatalogRecord;
use motif_common::slug::{artist_slug, normalize_wiki_string};

use crate::catalog::AlbumFile;

/// Official/fandom classification rules
#[derive(Debug, Clone)]
pub struct TrackClassifier {
    counted_reference_groups: Vec<String>,
    fandom_group: String,
    official_exceptions: Vec<OfficialException>,
}

impl TrackClassifier {
    pub fn new(game: &GameConfig) -> Self {
        Self {
            counted_reference_groups: game.counted_reference_groups.clone(),
            fandom_group: game.fandom_group.clone(),
            official_exceptions: game.official_exceptions.clone(),
        }
    }

    /// Slug of a track without namespace: its `Directory`, else derived from its name
    pub fn bare_slug(track: &CatalogRecord) -> String {
        match (&track.directory, &track.track) {
            (Some(directory), _) => directory.clone(),
            (None, Some(name)) => normalize_wiki_string(name),
            (None, None) => String::new(),
        }
    }

    /// Official when the album is in a counted group, or the track is a
    /// listed official exception (matched by slug and any artist credit)
    pub fn is_official(&self, album: &AlbumFile, track: &CatalogRecord) -> bool {
        let album_official = album
            .groups()
            .iter()
            .any(|g| self.counted_reference_groups.contains(g));
        if album_official {
            return true;
        }

        let slug = Self::bare_slug(track);
        self.official_exceptions.iter().any(|exception| {
            exception.slug == slug
                && track
                    .artist_list()
                    .iter()
                    .any(|credit| *credit == exception.artist)
        })
    }

    /// Fandom when not official and the album is tagged with the fandom group
    pub fn is_fandom(&self, album: &AlbumFile, is_official: bool) -> bool {
        !is_official && album.groups().contains(&self.fandom_group)
    }

    /// Resolve a track's artist credits, falling back to the album's credits
    pub fn resolve_artists(album: &AlbumFile, track: &CatalogRecord) -> Vec<String> {
        let credits = match &track.artists {
            Some(artists) => artists.as_slice(),
            None => album.header.artist_list(),
        };
        credits.iter().map(|credit| artist_slug(credit)).collect()
    }
}

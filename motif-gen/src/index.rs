//! Global slug index
//!
//! Maps every `track:` identifier in the whole catalog (playable albums or
//! not, since any track may be a leitmotif target) to its Track Summary.

use motif_common::models::TrackSummary;
use motif_common::slug::{track_slug, TRACK_PREFIX};
use std::collections::{BTreeMap, HashMap};
use tracing::info;

use crate::catalog::Catalog;
use crate::classify::TrackClassifier;

/// `track:` identifier → Track Summary
#[derive(Debug, Clone, Default)]
pub struct SlugIndex {
    entries: BTreeMap<String, TrackSummary>,
    /// Display name → key of the first track carrying that name
    by_name: HashMap<String, String>,
}

impl SlugIndex {
    /// Build the index over every album in the catalog.
    ///
    /// Auto-derived slugs are first-writer-wins. A track with an explicit
    /// `Directory` always inserts, overwriting any earlier entry.
    pub fn build(catalog: &Catalog, classifier: &TrackClassifier, wiki_base_url: &str) -> Self {
        let mut index = SlugIndex::default();

        for album in &catalog.albums {
            for track in album.candidate_tracks() {
                let Some(name) = track.track.as_deref() else {
                    continue;
                };
                let bare = TrackClassifier::bare_slug(track);
                let is_official = classifier.is_official(album, track);
                let image_url = if album.uses_album_cover(track) {
                    format!("{}/thumb/album-art/{}/cover.small.jpg", wiki_base_url, album.stem)
                } else {
                    format!("{}/thumb/album-art/{}/{}.small.jpg", wiki_base_url, album.stem, bare)
                };
                let summary = TrackSummary {
                    name: name.to_string(),
                    album_name: album.title().to_string(),
                    is_official,
                    is_fandom: classifier.is_fandom(album, is_official),
                    image_url,
                };
                let key = format!("{}{}", TRACK_PREFIX, bare);

                index.insert(key, summary, track.directory.is_some());
            }
        }

        info!("Slugged {} tracks", index.len());
        index
    }

    fn insert(&mut self, key: String, summary: TrackSummary, overwrite: bool) {
        if !overwrite && self.entries.contains_key(&key) {
            return;
        }
        self.by_name
            .entry(summary.name.clone())
            .or_insert_with(|| key.clone());
        self.entries.insert(key, summary);
    }

    pub fn get(&self, key: &str) -> Option<&TrackSummary> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &TrackSummary)> {
        self.entries.iter()
    }

    /// Resolve a `Referenced Tracks` / `Sampled Tracks` entry to an identifier.
    ///
    /// An entry that is already an identifier or an index key is kept
    /// verbatim. Otherwise the slug derived from the name wins whenever it is
    /// indexed. Only when it is not does a display name known to the index
    /// reuse that entry's key, which reaches explicit `Directory` identifiers.
    /// Anything else gets the derived slug.
    pub fn resolve_reference(&self, reference: &str) -> String {
        if reference.starts_with(TRACK_PREFIX) || self.entries.contains_key(reference) {
            return reference.to_string();
        }
        let derived = track_slug(reference);
        if self.entries.contains_key(&derived) {
            return derived;
        }
        match self.by_name.get(reference) {
            Some(key) => key.clone(),
            None => derived,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AlbumFile;
    use motif_common::config::GameConfig;
    use std::path::Path;

    fn catalog(files: &[(&str, &str)]) -> Catalog {
        Catalog {
            albums: files
                .iter()
                .map(|(name, content)| AlbumFile::parse(Path::new(name), content).unwrap())
                .collect(),
        }
    }

    fn build(files: &[(&str, &str)]) -> SlugIndex {
        let game = GameConfig::default();
        SlugIndex::build(
            &catalog(files),
            &TrackClassifier::new(&game),
            &game.wiki_base_url,
        )
    }

    #[test]
    fn test_first_auto_slug_wins() {
        let index = build(&[
            (
                "a.yaml",
                "Album: First\nGroups: [Fandom]\n---\nTrack: Doctor\nURLs: [x]\n",
            ),
            (
                "b.yaml",
                "Album: Second\nGroups: [Official Discography]\n---\nTrack: Doctor\nURLs: [y]\n",
            ),
        ]);
        let summary = index.get("track:doctor").unwrap();
        assert_eq!(summary.album_name, "First");
        assert!(summary.is_fandom);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_explicit_directory_overwrites() {
        let index = build(&[
            (
                "a.yaml",
                "Album: First\nGroups: [Fandom]\n---\nTrack: Doctor\nURLs: [x]\n",
            ),
            (
                "b.yaml",
                "Album: Second\nGroups: [Official Discography]\n---\nTrack: Doctor (Original)\nDirectory: doctor\nURLs: [y]\n",
            ),
        ]);
        let summary = index.get("track:doctor").unwrap();
        assert_eq!(summary.album_name, "Second");
        assert_eq!(summary.name, "Doctor (Original)");
        assert!(summary.is_official);
    }

    #[test]
    fn test_excluded_albums_still_indexed() {
        let index = build(&[(
            "sburb.yaml",
            "Album: Sburb\nGroups: [Desynced]\n---\nTrack: Sburb Theme\nURLs: []\n",
        )]);
        assert!(index.contains("track:sburb-theme"));
    }

    #[test]
    fn test_image_url_cover_fallback() {
        let index = build(&[(
            "vol-5.yaml",
            "Album: Vol 5\nGroups: [Fandom]\nHas Track Art: false\n---\nTrack: Doctor\nURLs: [x]\n",
        )]);
        assert_eq!(
            index.get("track:doctor").unwrap().image_url,
            "https://hsmusic.wiki/thumb/album-art/vol-5/cover.small.jpg"
        );

        let index = build(&[(
            "vol-6.yaml",
            "Album: Vol 6\nGroups: [Fandom]\n---\nTrack: Black\nURLs: [x]\n",
        )]);
        assert_eq!(
            index.get("track:black").unwrap().image_url,
            "https://hsmusic.wiki/thumb/album-art/vol-6/black.small.jpg"
        );
    }

    #[test]
    fn test_resolve_reference_variants() {
        let index = build(&[(
            "a.yaml",
            "Album: A\nGroups: [Fandom]\n---\nTrack: Showtime (Original Mix)\nDirectory: showtime\nURLs: [x]\n",
        )]);

        // Display name reuses the explicit identifier
        assert_eq!(index.resolve_reference("Showtime (Original Mix)"), "track:showtime");
        // Identifiers pass through
        assert_eq!(index.resolve_reference("track:showtime"), "track:showtime");
        assert_eq!(index.resolve_reference("track:unknown-thing"), "track:unknown-thing");
        // Unknown display names are derived fresh
        assert_eq!(index.resolve_reference("Beat of Black & White"), "track:beat-of-black-and-white");
    }

    #[test]
    fn test_derived_slug_beats_earlier_directory_with_same_name() {
        let index = build(&[
            (
                "a-fan.yaml",
                "Album: Fan\nGroups: [Fandom]\n---\nTrack: Doctor\nDirectory: doctor-fan-cover\nURLs: [x]\n",
            ),
            (
                "z-official.yaml",
                "Album: Official\nGroups: [Official Discography]\n---\nTrack: Doctor\nURLs: [y]\n",
            ),
        ]);
        assert!(index.contains("track:doctor"));
        assert!(index.contains("track:doctor-fan-cover"));
        assert_eq!(index.resolve_reference("Doctor"), "track:doctor");
        assert!(index.get("track:doctor").unwrap().is_official);
    }
}

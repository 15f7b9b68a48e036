//! Playable song builder
//!
//! Walks the playable albums, classifies each candidate track, resolves its
//! artists and references, tallies reference citations and emits one
//! Playable Song per distinct (artists, name) pair that has a playback URL.

use motif_common::config::GameConfig;
use motif_common::models::{PlayableSong, UrlType};
use motif_common::slug::TRACK_PREFIX;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info, warn};

use crate::catalog::{AlbumFilter, Catalog};
use crate::classify::TrackClassifier;
use crate::counter::{ReferenceCounter, ReferenceTally};
use crate::index::SlugIndex;

/// Output of the song building stage
#[derive(Debug, Clone)]
pub struct SongCollection {
    /// Candidate songs, shuffled with the configured seed
    pub songs: Vec<PlayableSong>,
    /// Citation counts across every playable album
    pub counter: ReferenceCounter,
    /// Officially classified `track:` identifiers
    pub official: BTreeSet<String>,
    /// Albums that passed the album filter
    pub albums_included: usize,
}

/// Builds the candidate song pool
pub struct SongBuilder<'a> {
    game: &'a GameConfig,
    index: &'a SlugIndex,
    classifier: TrackClassifier,
    filter: AlbumFilter,
}

impl<'a> SongBuilder<'a> {
    pub fn new(game: &'a GameConfig, index: &'a SlugIndex) -> Self {
        Self {
            game,
            index,
            classifier: TrackClassifier::new(game),
            filter: AlbumFilter::new(game),
        }
    }

    /// Build songs, tally references and shuffle the result
    pub fn build(&self, catalog: &Catalog) -> SongCollection {
        let mut songs = Vec::new();
        let mut seen: HashSet<(Vec<String>, String)> = HashSet::new();
        let mut tally = ReferenceTally::new();
        let mut official: BTreeSet<String> = self
            .game
            .extra_official_references
            .iter()
            .cloned()
            .collect();
        let mut albums_included = 0;

        for album in self.filter.included(catalog) {
            albums_included += 1;
            debug!("Loaded {} tracks from {}", album.tracks.len(), album.stem);

            for track in album.candidate_tracks() {
                let Some(name) = track.track.as_deref() else {
                    continue;
                };
                let slug = TrackClassifier::bare_slug(track);
                let is_official = self.classifier.is_official(album, track);
                if is_official {
                    official.insert(format!("{}{}", TRACK_PREFIX, slug));
                }
                let is_fandom = self.classifier.is_fandom(album, is_official);
                let artist = TrackClassifier::resolve_artists(album, track);

                let mut leitmotifs = Vec::with_capacity(track.referenced_tracks.len());
                for reference in &track.referenced_tracks {
                    let resolved = self.index.resolve_reference(reference);
                    tally.cite(&resolved);
                    leitmotifs.push(resolved);
                }

                let mut samples = Vec::with_capacity(track.sampled_tracks.len());
                for sample in &track.sampled_tracks {
                    let resolved = self.index.resolve_reference(sample);
                    if self.game.count_samples_as_leitmotifs {
                        tally.cite(&resolved);
                        if !leitmotifs.contains(&resolved) {
                            leitmotifs.push(resolved.clone());
                        }
                    }
                    samples.push(resolved);
                }

                let Some((url, url_type)) = UrlType::select(track.url_list()) else {
                    warn!("Skipping {} because it has no playable URL", name);
                    continue;
                };
                if self.game.excluded_songs.contains(&slug) {
                    debug!("Skipping {} because it is excluded", name);
                    continue;
                }
                if !seen.insert((artist.clone(), name.to_string())) {
                    warn!("Skipping {} because it is a duplicate", name);
                    continue;
                }

                let wiki_url = format!("{}/track/{}", self.game.wiki_base_url, slug);
                let image_url = if album.uses_album_cover(track) {
                    format!(
                        "{}/media/album-art/{}/cover.small.jpg",
                        self.game.wiki_base_url, album.stem
                    )
                } else {
                    format!(
                        "{}/media/album-art/{}/{}.small.jpg",
                        self.game.wiki_base_url, album.stem, slug
                    )
                };

                debug!("Added {} with a {} link", name, url_type);
                songs.push(PlayableSong {
                    n_leitmotifs: leitmotifs.len(),
                    slug,
                    name: name.to_string(),
                    artist,
                    album_name: album.title().to_string(),
                    leitmotifs,
                    samples,
                    wiki_url,
                    image_url,
                    is_official,
                    is_fandom,
                    url,
                    url_type,
                    day: None,
                });
            }
        }

        info!("{} songs added", songs.len());

        let mut rng = StdRng::seed_from_u64(self.game.shuffle_seed);
        songs.shuffle(&mut rng);

        SongCollection {
            songs,
            counter: tally.finish(),
            official,
            albums_included,
        }
    }
}

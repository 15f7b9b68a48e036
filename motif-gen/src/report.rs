//! Run report
//!
//! Summary statistics of one generation run, logged once at the end.

use motif_common::models::{GuessCandidate, PlayableSong, UrlType};
use std::collections::BTreeMap;
use tracing::info;

use crate::counter::ReferenceCounter;

/// How many of the most cited references the report lists
const TOP_REFERENCES: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub albums_total: usize,
    pub albums_included: usize,
    pub indexed_tracks: usize,
    pub songs_built: usize,
    pub carried_forward: usize,
    pub newly_scheduled: usize,
    pub guesses: usize,
    pub songs_by_album: BTreeMap<String, usize>,
    pub official_songs: usize,
    pub fandom_songs: usize,
    pub youtube_links: usize,
    pub soundcloud_links: usize,
    pub rarity_distribution: BTreeMap<u8, usize>,
    pub top_references: Vec<(String, usize)>,
}

impl RunReport {
    /// Fill the distribution fields from the final artifacts
    pub fn tally(
        &mut self,
        schedule: &[PlayableSong],
        guesses: &[GuessCandidate],
        counter: &ReferenceCounter,
    ) {
        self.guesses = guesses.len();
        for song in schedule {
            *self.songs_by_album.entry(song.album_name.clone()).or_insert(0) += 1;
            if song.is_official {
                self.official_songs += 1;
            }
            if song.is_fandom {
                self.fandom_songs += 1;
            }
            match song.url_type {
                UrlType::Youtube => self.youtube_links += 1,
                UrlType::Soundcloud => self.soundcloud_links += 1,
            }
        }
        for guess in guesses {
            *self.rarity_distribution.entry(guess.rarity.get()).or_insert(0) += 1;
        }
        self.top_references = counter
            .most_common(TOP_REFERENCES)
            .into_iter()
            .map(|(slug, count)| (slug.to_string(), count))
            .collect();
    }

    pub fn log(&self) {
        info!(
            "Albums: {} loaded, {} playable; {} tracks indexed",
            self.albums_total, self.albums_included, self.indexed_tracks
        );
        info!(
            "Songs: {} candidates, {} carried forward, {} newly scheduled",
            self.songs_built, self.carried_forward, self.newly_scheduled
        );
        info!(
            "Schedule: {} official, {} fandom",
            self.official_songs, self.fandom_songs
        );
        info!(
            "Found {} youtube links and {} soundcloud links",
            self.youtube_links, self.soundcloud_links
        );
        for (album, count) in &self.songs_by_album {
            info!(album = %album, songs = count, "Album representation");
        }
        info!("Guesses: {} total", self.guesses);
        for (rarity, count) in &self.rarity_distribution {
            info!(rarity = rarity, guesses = count, "Rarity distribution");
        }
        for (slug, count) in &self.top_references {
            info!(reference = %slug, citations = count, "Most cited");
        }
    }
}

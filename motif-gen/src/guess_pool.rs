//! Guess pool builder
//!
//! Every indexed track that was cited at least once becomes a valid guess,
//! with a rarity tier derived from its citation count.

use motif_common::config::Thresholds;
use motif_common::models::{GuessCandidate, Rarity};
use tracing::info;

use crate::counter::ReferenceCounter;
use crate::index::SlugIndex;

/// Rarity tier for a cited identifier.
///
/// A single citation is tier 1. Otherwise tier 5/4/3 for the common/uncommon/
/// rare thresholds and 2 below them. Unofficial identifiers drop one tier,
/// never below 1.
pub fn rarity_for(count: usize, is_official: bool, thresholds: &Thresholds) -> Rarity {
    let tier = if count == 1 {
        1
    } else if count >= thresholds.common {
        5
    } else if count >= thresholds.uncommon {
        4
    } else if count >= thresholds.rare {
        3
    } else {
        2
    };
    let penalty = if is_official { 0 } else { 1 };
    Rarity::clamped(tier - penalty)
}

/// Build the guess pool sorted by rarity (descending) then name
pub fn build_guess_pool(
    index: &SlugIndex,
    counter: &ReferenceCounter,
    thresholds: &Thresholds,
) -> Vec<GuessCandidate> {
    let mut guesses: Vec<GuessCandidate> = index
        .iter()
        .filter_map(|(slug, summary)| {
            let count = counter.count(slug)?;
            Some(GuessCandidate {
                summary: summary.clone(),
                slug: slug.clone(),
                rarity: rarity_for(count, summary.is_official, thresholds),
            })
        })
        .collect();

    guesses.sort_by(|a, b| {
        b.rarity
            .cmp(&a.rarity)
            .then_with(|| a.summary.name.cmp(&b.summary.name))
            .then_with(|| a.slug.cmp(&b.slug))
    });

    info!("Found {} guesses", guesses.len());
    guesses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AlbumFile, Catalog};
    use crate::classify::TrackClassifier;
    use crate::counter::ReferenceTally;
    use motif_common::config::GameConfig;
    use std::path::Path;

    #[test]
    fn test_rarity_tiers_official() {
        let t = Thresholds::default();
        assert_eq!(rarity_for(1, true, &t).get(), 1);
        assert_eq!(rarity_for(2, true, &t).get(), 2);
        assert_eq!(rarity_for(4, true, &t).get(), 3);
        assert_eq!(rarity_for(10, true, &t).get(), 4);
        assert_eq!(rarity_for(20, true, &t).get(), 5);
        assert_eq!(rarity_for(500, true, &t).get(), 5);
    }

    #[test]
    fn test_rarity_unofficial_penalty_and_floor() {
        let t = Thresholds::default();
        assert_eq!(rarity_for(1, false, &t).get(), 1);
        assert_eq!(rarity_for(2, false, &t).get(), 1);
        assert_eq!(rarity_for(4, false, &t).get(), 2);
        assert_eq!(rarity_for(20, false, &t).get(), 4);
    }

    #[test]
    fn test_rarity_never_below_one() {
        let t = Thresholds::default();
        for count in 1..50 {
            for official in [true, false] {
                let r = rarity_for(count, official, &t).get();
                assert!((1..=5).contains(&r));
            }
        }
    }

    #[test]
    fn test_guess_pool_sorted_and_filtered() {
        let game = GameConfig::default();
        let catalog = Catalog {
            albums: vec![
                AlbumFile::parse(
                    Path::new("official.yaml"),
                    "Album: Official\nGroups: [Official Discography]\n---\nTrack: Doctor\nURLs: []\n---\nTrack: Black\nURLs: []\n---\nTrack: Amen\nURLs: []\n",
                )
                .unwrap(),
                AlbumFile::parse(
                    Path::new("fan.yaml"),
                    "Album: Fan\nGroups: [Fandom]\n---\nTrack: Uncited\nURLs: []\n---\nTrack: Fan Favorite\nURLs: []\n",
                )
                .unwrap(),
            ],
        };
        let index = SlugIndex::build(&catalog, &TrackClassifier::new(&game), &game.wiki_base_url);

        let mut tally = ReferenceTally::new();
        for _ in 0..25 {
            tally.cite("track:doctor");
            tally.cite("track:black");
        }
        for _ in 0..25 {
            tally.cite("track:fan-favorite");
        }
        tally.cite("track:amen");
        // Cited but not indexed: never a guess
        tally.cite("track:ghost");
        let counter = tally.finish();

        let pool = build_guess_pool(&index, &counter, &game.thresholds);
        let order: Vec<_> = pool
            .iter()
            .map(|g| (g.summary.name.as_str(), g.rarity.get()))
            .collect();
        assert_eq!(
            order,
            vec![("Black", 5), ("Doctor", 5), ("Fan Favorite", 4), ("Amen", 1)]
        );
        assert_eq!(pool[0].slug, "track:black");
    }
}

//! Eligibility filter
//!
//! Decides which candidate songs make fun daily puzzles and appends them to
//! the previously committed schedule, one calendar day each.
//!
//! **Algorithm:**
//! 1. Partition cited identifiers into common/uncommon/rare tiers
//! 2. Official-guessable = officially classified and at least rare
//! 3. Skip songs already in the committed schedule
//! 4. Drop denylisted motifs, check leitmotif bounds, then require two
//!    official-guessable references, or one plus two unofficial guessable ones
//! 5. Assign consecutive days after the committed schedule's last day
//! 6. Schedule = committed ++ newly filtered

use chrono::NaiveDate;
use motif_common::config::Thresholds;
use motif_common::models::PlayableSong;
use motif_common::slug::TRACK_PREFIX;
use motif_common::time::next_day;
use motif_common::Result;
use std::collections::{BTreeSet, HashSet};
use tracing::info;

use crate::counter::ReferenceCounter;
use crate::rollover::CommittedSchedule;

/// Cited identifiers partitioned by citation count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceTiers {
    pub common: BTreeSet<String>,
    pub uncommon: BTreeSet<String>,
    pub rare: BTreeSet<String>,
}

impl ReferenceTiers {
    /// Identifiers below the rare threshold land in no tier
    pub fn partition(counter: &ReferenceCounter, thresholds: &Thresholds) -> Self {
        let mut tiers = ReferenceTiers::default();
        for (reference, count) in counter.iter() {
            if count >= thresholds.common {
                tiers.common.insert(reference.to_string());
            } else if count >= thresholds.uncommon {
                tiers.uncommon.insert(reference.to_string());
            } else if count >= thresholds.rare {
                tiers.rare.insert(reference.to_string());
            }
        }
        tiers
    }
}

/// The "fun gameplay" rule
#[derive(Debug, Clone)]
pub struct EligibilityRule {
    official_guessable: BTreeSet<String>,
    unofficial_guessable: BTreeSet<String>,
    discarded: HashSet<String>,
    min_leitmotifs: usize,
    max_leitmotifs: usize,
}

impl EligibilityRule {
    /// Build the rule from the tally and the officially classified identifiers.
    ///
    /// `discarded_motifs` are bare slugs; they are matched as `track:` identifiers.
    pub fn new(
        counter: &ReferenceCounter,
        official: &BTreeSet<String>,
        thresholds: &Thresholds,
        discarded_motifs: &[String],
    ) -> Self {
        let tiers = ReferenceTiers::partition(counter, thresholds);
        // Every tier starts at the rare threshold
        let guessable: BTreeSet<String> = counter
            .at_least(thresholds.rare)
            .iter()
            .map(|(reference, _)| reference.to_string())
            .collect();
        let official_guessable: BTreeSet<String> =
            guessable.intersection(official).cloned().collect();
        let unofficial_guessable = guessable.difference(&official_guessable).cloned().collect();

        info!(
            "Filtering leitmotifs with thresholds {}, {}, {}: {} common, {} uncommon, {} rare, {} official",
            thresholds.common,
            thresholds.uncommon,
            thresholds.rare,
            tiers.common.len(),
            tiers.uncommon.len(),
            tiers.rare.len(),
            official_guessable.len()
        );

        Self {
            official_guessable,
            unofficial_guessable,
            discarded: discarded_motifs
                .iter()
                .map(|m| format!("{}{}", TRACK_PREFIX, m))
                .collect(),
            min_leitmotifs: thresholds.min_leitmotifs,
            max_leitmotifs: thresholds.max_leitmotifs,
        }
    }

    pub fn official_guessable(&self) -> &BTreeSet<String> {
        &self.official_guessable
    }

    /// Apply the rule to one song
    pub fn is_eligible(&self, song: &PlayableSong) -> bool {
        let references: HashSet<&str> = song
            .leitmotifs
            .iter()
            .map(String::as_str)
            .filter(|r| !self.discarded.contains(*r))
            .collect();

        if references.len() < self.min_leitmotifs || references.len() > self.max_leitmotifs {
            return false;
        }

        let n_official = references
            .iter()
            .filter(|r| self.official_guessable.contains(**r))
            .count();
        let n_unofficial = references
            .iter()
            .filter(|r| self.unofficial_guessable.contains(**r))
            .count();

        n_official >= 2 || (n_official >= 1 && n_unofficial >= 2)
    }
}

/// Filter new songs and assign consecutive days starting at `first_day`
pub fn filter_new_songs(
    songs: &[PlayableSong],
    committed: &CommittedSchedule,
    rule: &EligibilityRule,
    first_day: NaiveDate,
) -> Result<Vec<PlayableSong>> {
    let committed_slugs = committed.slugs();
    let mut day = first_day;
    let mut filtered = Vec::new();

    for song in songs {
        if committed_slugs.contains(song.slug.as_str()) || !rule.is_eligible(song) {
            continue;
        }
        let mut scheduled = song.clone();
        scheduled.day = Some(day);
        filtered.push(scheduled);
        day = next_day(day)?;
    }

    info!("Filtered {} songs", filtered.len());
    Ok(filtered)
}

/// Full schedule: the committed prefix followed by newly eligible songs.
///
/// New days start the day after the committed schedule's last day, or at
/// `start_date` when nothing is committed.
pub fn build_schedule(
    songs: &[PlayableSong],
    committed: &CommittedSchedule,
    rule: &EligibilityRule,
    start_date: NaiveDate,
) -> Result<Vec<PlayableSong>> {
    let first_day = match committed.last_day() {
        Some(last) => next_day(last)?,
        None => start_date,
    };
    let fresh = filter_new_songs(songs, committed, rule, first_day)?;

    let mut schedule = committed.songs().to_vec();
    schedule.extend(fresh);
    Ok(schedule)
}

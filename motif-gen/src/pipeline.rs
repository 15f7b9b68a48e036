//! Staged generation pipeline
//!
//! Catalog → slug index → song collection (classification + reference
//! tally) → schedule (eligibility + rollover) → guess pool. Each stage
//! consumes the typed output of the previous one.

use motif_common::config::GameConfig;
use motif_common::models::{GuessCandidate, PlayableSong};
use motif_common::Result;
use std::path::Path;

use crate::catalog::Catalog;
use crate::classify::TrackClassifier;
use crate::counter::ReferenceCounter;
use crate::eligibility::{build_schedule, EligibilityRule};
use crate::guess_pool::build_guess_pool;
use crate::index::SlugIndex;
use crate::persist::write_json_atomic;
use crate::report::RunReport;
use crate::rollover::{CommittedSchedule, OutputPaths};
use crate::songs::{SongBuilder, SongCollection};

/// Both game artifacts plus the run summary
#[derive(Debug, Clone)]
pub struct GameData {
    /// Output 1: one song per calendar day
    pub schedule: Vec<PlayableSong>,
    /// Output 2: valid guesses ranked by rarity
    pub guesses: Vec<GuessCandidate>,
    pub report: RunReport,
}

impl GameData {
    /// Write the guess pool, then the schedule
    pub fn store(&self, paths: &OutputPaths) -> Result<()> {
        write_json_atomic(&paths.motifs, &self.guesses)?;
        write_json_atomic(&paths.songs, &self.schedule)?;
        Ok(())
    }
}

/// Generation pipeline bound to one validated configuration
pub struct Pipeline<'a> {
    game: &'a GameConfig,
}

impl<'a> Pipeline<'a> {
    pub fn new(game: &'a GameConfig) -> Result<Self> {
        game.validate()?;
        Ok(Self { game })
    }

    /// Stage 1: global slug index over every album
    pub fn index(&self, catalog: &Catalog) -> SlugIndex {
        SlugIndex::build(
            catalog,
            &TrackClassifier::new(self.game),
            &self.game.wiki_base_url,
        )
    }

    /// Stage 2: candidate songs, reference tally and official set
    pub fn collect(&self, catalog: &Catalog, index: &SlugIndex) -> SongCollection {
        SongBuilder::new(self.game, index).build(catalog)
    }

    /// Stage 3: committed prefix plus newly eligible songs
    pub fn schedule(
        &self,
        collection: &SongCollection,
        committed: &CommittedSchedule,
    ) -> Result<Vec<PlayableSong>> {
        let rule = EligibilityRule::new(
            &collection.counter,
            &collection.official,
            &self.game.thresholds,
            &self.game.discarded_motifs,
        );
        build_schedule(&collection.songs, committed, &rule, self.game.start_date)
    }

    /// Stage 4: guess pool
    pub fn guesses(&self, index: &SlugIndex, counter: &ReferenceCounter) -> Vec<GuessCandidate> {
        build_guess_pool(index, counter, &self.game.thresholds)
    }

    /// Run every stage over a loaded catalog
    pub fn run(&self, catalog: &Catalog, committed: &CommittedSchedule) -> Result<GameData> {
        let index = self.index(catalog);
        let collection = self.collect(catalog, &index);
        let schedule = self.schedule(&collection, committed)?;
        let guesses = self.guesses(&index, &collection.counter);

        let mut report = RunReport {
            albums_total: catalog.albums.len(),
            albums_included: collection.albums_included,
            indexed_tracks: index.len(),
            songs_built: collection.songs.len(),
            carried_forward: committed.len(),
            newly_scheduled: schedule.len() - committed.len(),
            ..RunReport::default()
        };
        report.tally(&schedule, &guesses, &collection.counter);

        Ok(GameData {
            schedule,
            guesses,
            report,
        })
    }

    /// Load the catalog directory and run every stage
    pub fn run_dir(&self, album_dir: &Path, committed: &CommittedSchedule) -> Result<GameData> {
        let catalog = Catalog::load(album_dir)?;
        self.run(&catalog, committed)
    }
}

//! Snapshot and rollover management
//!
//! The previous run's schedule is read back in full and its first
//! `original_date..start_date` days are carried forward untouched, so the
//! start date can move forward between runs without re-shuffling days that
//! are already published. The previous output is rotated to a single backup
//! generation before a new one is written.

use chrono::NaiveDate;
use motif_common::models::PlayableSong;
use motif_common::time::next_day;
use motif_common::{Error, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Schedule output file name
pub const SONGS_FILE: &str = "game_songs.json";
/// Guess pool output file name
pub const MOTIFS_FILE: &str = "game_motifs.json";
/// Single-generation backup of the schedule
pub const SONGS_BACKUP_FILE: &str = "game_songs_old.json";

/// Locations of the generated artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub songs: PathBuf,
    pub motifs: PathBuf,
    pub backup: PathBuf,
}

impl OutputPaths {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            songs: output_dir.join(SONGS_FILE),
            motifs: output_dir.join(MOTIFS_FILE),
            backup: output_dir.join(SONGS_BACKUP_FILE),
        }
    }

    /// Move the current schedule to the backup name, replacing any older
    /// backup. Returns false when there was no schedule to rotate.
    pub fn rotate_backup(&self) -> Result<bool> {
        if !self.songs.exists() {
            return Ok(false);
        }
        if self.backup.exists() {
            std::fs::remove_file(&self.backup)?;
        }
        std::fs::rename(&self.songs, &self.backup)?;
        info!(
            "Backed up {} to {}",
            self.songs.display(),
            self.backup.display()
        );
        Ok(true)
    }
}

/// Read a previously written schedule, if present
pub fn load_snapshot(path: &Path) -> Result<Option<Vec<PlayableSong>>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    let songs = serde_json::from_str(&content).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(songs))
}

/// Immutable prefix of the schedule carried over from a previous run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommittedSchedule {
    songs: Vec<PlayableSong>,
}

impl CommittedSchedule {
    /// Wrap already-published songs, checking every entry has a day and
    /// that days advance by exactly one
    pub fn new(songs: Vec<PlayableSong>) -> Result<Self> {
        let mut previous: Option<NaiveDate> = None;
        for (position, song) in songs.iter().enumerate() {
            let day = song.day.ok_or_else(|| {
                Error::InvalidSnapshot(format!(
                    "entry {} ({}) has no day",
                    position, song.slug
                ))
            })?;
            if let Some(previous) = previous {
                if day != next_day(previous)? {
                    return Err(Error::InvalidSnapshot(format!(
                        "entry {} ({}) is scheduled on {} but follows {}",
                        position, song.slug, day, previous
                    )));
                }
            }
            previous = Some(day);
        }
        Ok(Self { songs })
    }

    /// Keep the first `carried_days` entries of a snapshot.
    ///
    /// A snapshot shorter than `carried_days` is carried in full.
    pub fn carry_forward(snapshot: Vec<PlayableSong>, carried_days: usize) -> Result<Self> {
        if snapshot.len() < carried_days {
            warn!(
                "Snapshot holds {} days, fewer than the {} to carry forward",
                snapshot.len(),
                carried_days
            );
        }
        let mut songs = snapshot;
        songs.truncate(carried_days);
        let committed = Self::new(songs)?;
        info!("Carrying forward {} published days", committed.len());
        Ok(committed)
    }

    pub fn songs(&self) -> &[PlayableSong] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Last day already used
    pub fn last_day(&self) -> Option<NaiveDate> {
        self.songs.last().and_then(|s| s.day)
    }

    /// Slugs of already-published songs
    pub fn slugs(&self) -> HashSet<&str> {
        self.songs.iter().map(|s| s.slug.as_str()).collect()
    }
}

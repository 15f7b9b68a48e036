//! motif-gen library interface
//!
//! Turns the wiki's per-album YAML catalog into the two JSON artifacts of
//! the daily leitmotif game: the song schedule and the guess pool.

pub mod catalog;
pub mod classify;
pub mod counter;
pub mod eligibility;
pub mod guess_pool;
pub mod index;
pub mod persist;
pub mod pipeline;
pub mod report;
pub mod rollover;
pub mod songs;

pub use crate::pipeline::{GameData, Pipeline};
pub use crate::rollover::{CommittedSchedule, OutputPaths};

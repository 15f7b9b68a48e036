//! # Motif Common Library
//!
//! Shared code for the motif tools including:
//! - Error type and result alias
//! - Configuration loading (TOML + environment + compiled defaults)
//! - Wiki slug normalization
//! - Catalog record and game data models
//! - Calendar day helpers

pub mod config;
pub mod error;
pub mod models;
pub mod slug;
pub mod time;

pub use error::{Error, Result};
pub use slug::normalize_wiki_string;

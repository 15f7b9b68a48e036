//! Common error types for motif

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for motif operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the motif crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catalog file could not be parsed as a YAML document stream
    #[error("YAML error in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A JSON artifact could not be read or written
    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Catalog file contains no record with an `Album` field
    #[error("Missing album header in {0}")]
    MissingAlbumHeader(PathBuf),

    /// Previously published schedule cannot be carried forward
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

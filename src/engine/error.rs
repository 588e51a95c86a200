//! Engine-level errors

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by an [`IndexEngine`](super::IndexEngine).
///
/// The `Display` text is what the command line prints after
/// `<program>: error:`.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("index store error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("no index found at {0} (run `init` first)")]
    NotInitialized(PathBuf),

    #[error("no compilation database found at {0}")]
    MissingCompilationDatabase(PathBuf),

    #[error("invalid compilation database {path}: {source}")]
    InvalidCompilationDatabase {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration {path}: {source}")]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("indexing stopped at {path}: {reason}")]
    Stopped { path: PathBuf, reason: String },

    #[error("indexing rolled back after failure at {path}: {reason}")]
    RolledBack { path: PathBuf, reason: String },

    /// Free-form failure from an engine that has no richer error to report
    #[error("{0}")]
    Failed(String),
}

impl EngineError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        EngineError::Io {
            path: path.into(),
            source,
        }
    }
}

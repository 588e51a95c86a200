//! Core type definitions for yacbi
//!
//! Defines the values passed between the command line and the engine:
//! - LogLevel: diagnostic verbosity selected by `-v` / `-d`
//! - FailurePolicy: how an index update reacts to a failing file
//! - FileRecord / IndexStats: what the default engine stores and reports

use serde::{Deserialize, Serialize};

/// Diagnostic verbosity, ordered from quietest to noisiest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    #[default]
    Error,
    Info,
    Debug,
}

impl LogLevel {
    /// Map the verbosity flags to a level. `debug` wins over `verbose`.
    pub fn resolve(verbose: bool, debug: bool) -> Self {
        if debug {
            LogLevel::Debug
        } else if verbose {
            LogLevel::Info
        } else {
            LogLevel::Error
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
        }
    }
}

/// Failure handling for an index update.
///
/// Rollback always implies stopping, so the only reachable states are
/// continue, stop and stop-with-rollback. The fields are private and the
/// policy can only be built through [`FailurePolicy::resolve`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FailurePolicy {
    stop_on_error: bool,
    rollback_on_error: bool,
}

impl FailurePolicy {
    /// Normalize the raw `--stop-on-error` / `--rollback-on-error` flags.
    pub fn resolve(stop_on_error_flag: bool, rollback_on_error_flag: bool) -> Self {
        if rollback_on_error_flag {
            Self {
                stop_on_error: true,
                rollback_on_error: true,
            }
        } else if stop_on_error_flag {
            Self {
                stop_on_error: true,
                rollback_on_error: false,
            }
        } else {
            Self::default()
        }
    }

    pub fn stop_on_error(&self) -> bool {
        self.stop_on_error
    }

    pub fn rollback_on_error(&self) -> bool {
        self.rollback_on_error
    }

    pub fn as_str(&self) -> &'static str {
        match (self.stop_on_error, self.rollback_on_error) {
            (_, true) => "rollback",
            (true, false) => "stop",
            (false, false) => "continue",
        }
    }
}

/// A translation unit tracked by the index store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: i64,
    pub path: String,
    pub working_dir: String,
    /// Unix seconds of the run that last indexed this file
    pub last_update: i64,
}

/// Statistics from an index update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub added: u64,
    pub updated: u64,
    pub removed: u64,
    pub unchanged: u64,
    pub failed: u64,
}

//! yacbi: Yet another compilation-database indexer
//!
//! Command-line front end that keeps a per-project index in sync with the
//! project's `compile_commands.json`.
//!
//! ## Commands
//!
//! - `yacbi init` - Create (or recreate) the index store for a project
//! - `yacbi index` - Update an existing index
//!
//! ## Failure handling
//!
//! `index` accepts `--stop-on-error` or `--rollback-on-error`. Without either
//! flag a failing file is logged and skipped. Rollback implies stopping.

pub mod cli;
pub mod compdb;
pub mod config;
pub mod db;
pub mod engine;
pub mod types;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, warn};

use compdb::{CompilationDatabase, CompileCommand};
use db::Database;
use engine::EngineError;
use types::{FailurePolicy, FileRecord, IndexStats};

/// A source file that could not be indexed
#[derive(Debug)]
struct FileFailure {
    path: PathBuf,
    reason: String,
}

/// Bring the index in line with the compilation database.
///
/// Every change happens inside one transaction. A failing file is handled
/// according to `policy`; store errors always roll the transaction back.
pub fn index_project(
    db: &mut Database,
    compdb: &CompilationDatabase,
    policy: FailurePolicy,
) -> Result<IndexStats, EngineError> {
    let now = unix_now();
    let mut stats = IndexStats::default();

    db.begin_transaction()?;

    match apply_changes(db, compdb, policy, now, &mut stats) {
        Ok(None) => db.commit()?,
        Ok(Some(failure)) if policy.rollback_on_error() => {
            rollback(db);
            return Err(EngineError::RolledBack {
                path: failure.path,
                reason: failure.reason,
            });
        }
        Ok(Some(failure)) => {
            db.commit()?;
            return Err(EngineError::Stopped {
                path: failure.path,
                reason: failure.reason,
            });
        }
        Err(err) => {
            rollback(db);
            return Err(err);
        }
    }

    debug!(
        "Indexed {} new and {} updated files, removed {}, {} unchanged",
        stats.added, stats.updated, stats.removed, stats.unchanged
    );
    if stats.failed > 0 {
        warn!("{} files could not be indexed", stats.failed);
    }

    Ok(stats)
}

/// Apply removals, additions and updates. Returns the failure that halted
/// the run when the policy says to stop.
fn apply_changes(
    db: &Database,
    compdb: &CompilationDatabase,
    policy: FailurePolicy,
    now: i64,
    stats: &mut IndexStats,
) -> Result<Option<FileFailure>, EngineError> {
    let tracked: HashMap<String, FileRecord> = db
        .list_files()?
        .into_iter()
        .map(|file| (file.path.clone(), file))
        .collect();

    for path in tracked.keys() {
        if !compdb.contains(Path::new(path)) {
            debug!("Removing {}", path);
            db.delete_file(path)?;
            stats.removed += 1;
        }
    }

    for command in compdb.commands() {
        let path = command.filename.display().to_string();
        let existing = tracked.get(&path);

        if let Some(record) = existing {
            // Missing files fall through and are reported by check_source
            if matches!(modified_at(&command.filename), Some(mtime) if mtime < record.last_update) {
                debug!("Skipping unchanged file: {}", path);
                stats.unchanged += 1;
                continue;
            }
        }

        if let Err(failure) = check_source(&command.filename) {
            stats.failed += 1;
            if policy.stop_on_error() {
                return Ok(Some(failure));
            }
            warn!("Skipping {}: {}", failure.path.display(), failure.reason);
            continue;
        }

        debug!("Indexing: {}", path);
        store_file(db, command, now)?;

        if existing.is_some() {
            stats.updated += 1;
        } else {
            stats.added += 1;
        }
    }

    Ok(None)
}

fn store_file(db: &Database, command: &CompileCommand, now: i64) -> Result<(), EngineError> {
    let file_id = db.upsert_file(
        &command.filename.display().to_string(),
        &command.directory.display().to_string(),
        now,
    )?;
    db.replace_compile_args(file_id, &command.args.all_args)?;
    Ok(())
}

/// A source is indexable when it is a readable regular file
fn check_source(path: &Path) -> Result<(), FileFailure> {
    let fail = |reason: String| FileFailure {
        path: path.to_path_buf(),
        reason,
    };

    let metadata = fs::metadata(path).map_err(|e| fail(e.to_string()))?;
    if !metadata.is_file() {
        return Err(fail("not a regular file".to_string()));
    }
    fs::File::open(path).map_err(|e| fail(e.to_string()))?;
    Ok(())
}

fn rollback(db: &mut Database) {
    if let Err(err) = db.rollback() {
        warn!("Failed to roll back index changes: {}", err);
    }
}

fn modified_at(path: &Path) -> Option<i64> {
    fs::metadata(path)
        .ok()
        .and_then(|m| m.modified().ok())
        .and_then(|t| t.duration_since(SystemTime::UNIX_EPOCH).ok())
        .map(|d| d.as_secs() as i64)
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

//! Indexing engine contract and the default SQLite-backed engine
//!
//! The command line only talks to [`IndexEngine`]. [`SqliteEngine`] keeps a
//! per-project store under `<root>/.yacbi/index.db` in sync with the
//! project's `compile_commands.json`.

mod error;

pub use error::EngineError;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::compdb::CompilationDatabase;
use crate::config::ProjectConfig;
use crate::db::Database;
use crate::index_project;
use crate::types::{FailurePolicy, IndexStats};

const DB_DIR: &str = ".yacbi";
const DB_FILE: &str = "index.db";

/// Operations the command line needs from an indexing engine
pub trait IndexEngine {
    /// Create the index store for a project, replacing any existing one
    fn initialize_project(&self, root: &Path) -> Result<(), EngineError>;

    /// Bring an existing index up to date
    fn index(
        &self,
        root: &Path,
        stop_on_error: bool,
        rollback_on_error: bool,
    ) -> Result<IndexStats, EngineError>;
}

/// Get the database path for a project root
pub fn database_path(root: &Path) -> PathBuf {
    root.join(DB_DIR).join(DB_FILE)
}

/// Default engine storing the index in SQLite
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteEngine;

impl IndexEngine for SqliteEngine {
    fn initialize_project(&self, root: &Path) -> Result<(), EngineError> {
        let dir = root.join(DB_DIR);
        fs::create_dir_all(&dir).map_err(|e| EngineError::io(&dir, e))?;

        let db_path = database_path(root);
        match fs::remove_file(&db_path) {
            Ok(()) => debug!("Removed existing index at {}", db_path.display()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(EngineError::io(db_path, err)),
        }

        Database::open(&db_path)?;
        info!("Initialized index at {}", db_path.display());
        Ok(())
    }

    fn index(
        &self,
        root: &Path,
        stop_on_error: bool,
        rollback_on_error: bool,
    ) -> Result<IndexStats, EngineError> {
        let policy = FailurePolicy::resolve(stop_on_error, rollback_on_error);
        let db_path = database_path(root);
        if !db_path.is_file() {
            return Err(EngineError::NotInitialized(db_path));
        }

        let config = ProjectConfig::load(root)?;
        let compdb = CompilationDatabase::load(root, &config)?;
        let mut db = Database::open(&db_path)?;

        info!(
            "Updating index at {} (on error: {})",
            root.display(),
            policy.as_str()
        );
        index_project(&mut db, &compdb, policy)
    }
}

//! Database module for yacbi
//!
//! Handles SQLite storage for the project index:
//! - Schema creation
//! - File tracking
//! - Compile argument storage
//! - Transactions

mod schema;

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::types::FileRecord;

/// Database handle for the project index
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create a database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> rusqlite::Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Create an in-memory database (for testing)
    pub fn in_memory() -> rusqlite::Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize the database schema
    fn initialize(&self) -> rusqlite::Result<()> {
        self.conn.execute_batch(schema::SCHEMA)
    }

    // =========================================================================
    // File Operations
    // =========================================================================

    /// Insert or update a file record, returning its ID
    pub fn upsert_file(&self, path: &str, working_dir: &str, last_update: i64) -> rusqlite::Result<i64> {
        self.conn.execute(
            r#"
            INSERT INTO files (path, working_dir, last_update)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(path) DO UPDATE SET
                working_dir = excluded.working_dir,
                last_update = excluded.last_update
            "#,
            params![path, working_dir, last_update],
        )?;
        self.conn
            .query_row("SELECT id FROM files WHERE path = ?1", params![path], |row| {
                row.get(0)
            })
    }

    /// Get a file record by path
    pub fn get_file(&self, path: &str) -> rusqlite::Result<Option<FileRecord>> {
        self.conn
            .query_row(
                "SELECT id, path, working_dir, last_update FROM files WHERE path = ?1",
                params![path],
                Self::row_to_file,
            )
            .optional()
    }

    /// All tracked files, ordered by path
    pub fn list_files(&self) -> rusqlite::Result<Vec<FileRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, path, working_dir, last_update FROM files ORDER BY path")?;
        let rows = stmt.query_map([], Self::row_to_file)?;

        let mut files = Vec::new();
        for row in rows {
            files.push(row?);
        }
        Ok(files)
    }

    /// Delete a file; its compile args go with it
    pub fn delete_file(&self, path: &str) -> rusqlite::Result<()> {
        self.conn
            .execute("DELETE FROM files WHERE path = ?1", params![path])?;
        Ok(())
    }

    pub fn file_count(&self) -> rusqlite::Result<u64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM files", [], |row| row.get(0))
    }

    fn row_to_file(row: &rusqlite::Row) -> rusqlite::Result<FileRecord> {
        Ok(FileRecord {
            id: row.get(0)?,
            path: row.get(1)?,
            working_dir: row.get(2)?,
            last_update: row.get(3)?,
        })
    }

    // =========================================================================
    // Compile Arguments
    // =========================================================================

    /// Replace the stored compile arguments of a file
    pub fn replace_compile_args(&self, file_id: i64, args: &[String]) -> rusqlite::Result<()> {
        self.conn
            .execute("DELETE FROM compile_args WHERE file_id = ?1", params![file_id])?;

        let mut stmt = self
            .conn
            .prepare("INSERT INTO compile_args (file_id, arg) VALUES (?1, ?2)")?;
        for arg in args {
            stmt.execute(params![file_id, arg])?;
        }
        Ok(())
    }

    /// Compile arguments of a file in insertion order
    pub fn compile_args(&self, file_id: i64) -> rusqlite::Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT arg FROM compile_args WHERE file_id = ?1 ORDER BY id")?;
        let rows = stmt.query_map(params![file_id], |row| row.get(0))?;

        let mut args = Vec::new();
        for row in rows {
            args.push(row?);
        }
        Ok(args)
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    /// Begin a transaction
    pub fn begin_transaction(&mut self) -> rusqlite::Result<()> {
        self.conn.execute("BEGIN TRANSACTION", [])?;
        Ok(())
    }

    /// Commit a transaction
    pub fn commit(&mut self) -> rusqlite::Result<()> {
        self.conn.execute("COMMIT", [])?;
        Ok(())
    }

    /// Rollback a transaction
    pub fn rollback(&mut self) -> rusqlite::Result<()> {
        self.conn.execute("ROLLBACK", [])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_and_get_file() {
        let db = Database::in_memory().unwrap();
        let id = db.upsert_file("/p/a.c", "/p", 10).unwrap();

        let file = db.get_file("/p/a.c").unwrap().unwrap();
        assert_eq!(file.id, id);
        assert_eq!(file.working_dir, "/p");
        assert_eq!(file.last_update, 10);
        assert!(db.get_file("/p/missing.c").unwrap().is_none());
    }

    #[test]
    fn test_upsert_keeps_id() {
        let db = Database::in_memory().unwrap();
        let first = db.upsert_file("/p/a.c", "/p", 10).unwrap();
        let second = db.upsert_file("/p/a.c", "/p/build", 20).unwrap();

        assert_eq!(first, second);
        let file = db.get_file("/p/a.c").unwrap().unwrap();
        assert_eq!(file.working_dir, "/p/build");
        assert_eq!(file.last_update, 20);
        assert_eq!(db.file_count().unwrap(), 1);
    }

    #[test]
    fn test_compile_args_replaced_in_order() {
        let db = Database::in_memory().unwrap();
        let id = db.upsert_file("/p/a.c", "/p", 0).unwrap();

        db.replace_compile_args(id, &["-DA".to_string(), "-I/p/inc".to_string()])
            .unwrap();
        db.replace_compile_args(id, &["-std=c11".to_string(), "-DB".to_string()])
            .unwrap();

        assert_eq!(db.compile_args(id).unwrap(), vec!["-std=c11", "-DB"]);
    }

    #[test]
    fn test_delete_file_cascades_args() {
        let db = Database::in_memory().unwrap();
        let id = db.upsert_file("/p/a.c", "/p", 0).unwrap();
        db.replace_compile_args(id, &["-DA".to_string()]).unwrap();

        db.delete_file("/p/a.c").unwrap();

        assert!(db.get_file("/p/a.c").unwrap().is_none());
        assert!(db.compile_args(id).unwrap().is_empty());
    }

    #[test]
    fn test_rollback_discards_changes() {
        let mut db = Database::in_memory().unwrap();
        db.upsert_file("/p/keep.c", "/p", 0).unwrap();

        db.begin_transaction().unwrap();
        db.upsert_file("/p/drop.c", "/p", 0).unwrap();
        db.rollback().unwrap();

        let paths: Vec<String> = db.list_files().unwrap().into_iter().map(|f| f.path).collect();
        assert_eq!(paths, vec!["/p/keep.c"]);
    }
}

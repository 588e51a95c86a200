//! Database schema definition

pub const SCHEMA: &str = r#"
PRAGMA foreign_keys = ON;

-- Files table: translation units taken from the compilation database
CREATE TABLE IF NOT EXISTS files (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    path TEXT NOT NULL UNIQUE,
    working_dir TEXT NOT NULL,
    last_update INTEGER NOT NULL
);

-- Normalized compile arguments, in command-line order
CREATE TABLE IF NOT EXISTS compile_args (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    file_id INTEGER NOT NULL,
    arg TEXT NOT NULL,
    FOREIGN KEY (file_id) REFERENCES files(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_compile_args_file ON compile_args(file_id);
"#;

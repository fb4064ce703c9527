//! Hit store: schema, open, transactional batch persistence, job status.

mod connection;
mod store;

pub use connection::{open_db, open_db_in_memory};
pub use store::{HitStore, SqliteStore, validate_hit};

/// WAL tuning pragmas (synchronous, autocheckpoint, size limit). Use after PRAGMA journal_mode = WAL.
pub(crate) const WAL_PRAGMAS: &str = r#"
        PRAGMA synchronous = NORMAL;
        PRAGMA wal_autocheckpoint = 10000;
        PRAGMA journal_size_limit = 67108864;
        "#;

/// Insert statement for hits table.
pub(crate) const INSERT_HIT_SQL: &str = "INSERT INTO hits \
     (growing_id, name, score, ensemble_scores, file_string, file_type) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

/// Upsert of a job's status row.
pub(crate) const UPSERT_STATUS_SQL: &str = "INSERT INTO growings (id, status) VALUES (?1, ?2) \
     ON CONFLICT(id) DO UPDATE SET status = excluded.status";

/// Schema for growings and hits tables.
pub(crate) const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS growings (
    id INTEGER PRIMARY KEY,
    fragment_set TEXT,
    status TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS hits (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    growing_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    score REAL NOT NULL,
    ensemble_scores TEXT NOT NULL,
    file_string TEXT NOT NULL,
    file_type TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_hits_growing ON hits(growing_id);
"#;

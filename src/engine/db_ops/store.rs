//! Transactional hit persistence and job status bookkeeping.

use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Statement};
use std::collections::BTreeMap;

use crate::error::{GrowError, Result};
use crate::utils::config::HIT_NAME_MAX_CHARS;
use crate::{GrowingJob, JobStatus, ParsedHit};

use super::{INSERT_HIT_SQL, UPSERT_STATUS_SQL};

/// Where the ingestion loop writes. One `persist` call is one result file and must be atomic.
pub trait HitStore {
    /// Persist `hits` for job `job_id` as one unit: either all become visible or none do.
    /// Returns the number of hits written.
    fn persist(&mut self, job_id: i64, hits: &[ParsedHit]) -> Result<usize>;

    fn set_status(&mut self, job_id: i64, status: JobStatus) -> Result<()>;
}

/// Reject hits the store must never hold. Runs inside the batch transaction.
pub fn validate_hit(hit: &ParsedHit) -> Result<()> {
    let invalid = |reason: &str| GrowError::InvalidHit {
        name: hit.name.clone(),
        reason: reason.to_string(),
    };
    if hit.name.chars().count() > HIT_NAME_MAX_CHARS {
        return Err(invalid("name longer than 254 characters"));
    }
    if !hit.score.is_finite() {
        return Err(invalid("score is not finite"));
    }
    if hit.ensemble_scores.values().any(|v| !v.is_finite()) {
        return Err(invalid("ensemble score is not finite"));
    }
    Ok(())
}

/// Execute one hit insert (used by persist).
fn execute_insert_hit(stmt: &mut Statement<'_>, job_id: i64, hit: &ParsedHit) -> Result<()> {
    let ensemble_scores = serde_json::to_string(&hit.ensemble_scores)?;
    stmt.execute((
        job_id,
        hit.name.as_str(),
        hit.score,
        ensemble_scores.as_str(),
        hit.file_string.as_str(),
        hit.file_type.as_str(),
    ))?;
    Ok(())
}

/// SQLite-backed [`HitStore`].
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Create or refresh the job row with its current status.
    pub fn register_job(&mut self, job: &GrowingJob) -> Result<()> {
        self.conn.execute(
            "INSERT INTO growings (id, fragment_set, status) VALUES (?1, ?2, ?3) \
             ON CONFLICT(id) DO UPDATE SET fragment_set = excluded.fragment_set, \
             status = excluded.status",
            (job.id, job.fragment_set.as_str(), job.status.as_str()),
        )?;
        Ok(())
    }

    pub fn job_status(&self, job_id: i64) -> Result<Option<JobStatus>> {
        let status: Option<String> = self
            .conn
            .query_row(
                "SELECT status FROM growings WHERE id = ?1",
                [job_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(status.as_deref().and_then(JobStatus::parse))
    }

    pub fn hit_count(&self, job_id: i64) -> Result<usize> {
        let n: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM hits WHERE growing_id = ?1",
            [job_id],
            |row| row.get(0),
        )?;
        Ok(n.max(0) as usize)
    }

    /// All hits of a job in insertion order.
    pub fn load_hits(&self, job_id: i64) -> Result<Vec<ParsedHit>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, score, ensemble_scores, file_string, file_type \
             FROM hits WHERE growing_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map([job_id], |row| {
            let raw_scores: String = row.get(2)?;
            let ensemble_scores: BTreeMap<String, f64> = serde_json::from_str(&raw_scores)
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;
            Ok(ParsedHit {
                name: row.get(0)?,
                score: row.get(1)?,
                ensemble_scores,
                file_string: row.get(3)?,
                file_type: row.get(4)?,
            })
        })?;
        let mut hits = Vec::new();
        for row in rows {
            hits.push(row?);
        }
        Ok(hits)
    }
}

impl HitStore for SqliteStore {
    /// Insert the batch in a single transaction. Any failure drops the transaction, which rolls back.
    fn persist(&mut self, job_id: i64, hits: &[ParsedHit]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut stmt = tx.prepare(INSERT_HIT_SQL)?;
        for hit in hits {
            validate_hit(hit)?;
            execute_insert_hit(&mut stmt, job_id, hit)?;
        }
        drop(stmt);
        tx.commit()?;
        Ok(hits.len())
    }

    fn set_status(&mut self, job_id: i64, status: JobStatus) -> Result<()> {
        self.conn.execute(UPSERT_STATUS_SQL, (job_id, status.as_str()))?;
        Ok(())
    }
}

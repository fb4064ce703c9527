//! Public types for growing jobs, parsed hits and run configuration.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::utils::config::{GrowDefaults, RESULT_EXTENSION};

/// Lifecycle of a growing job. `Success` and `Failure` are terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JobStatus {
    #[default]
    Pending,
    Running,
    Success,
    Failure,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "PENDING",
            JobStatus::Running => "RUNNING",
            JobStatus::Success => "SUCCESS",
            JobStatus::Failure => "FAILURE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(JobStatus::Pending),
            "RUNNING" => Some(JobStatus::Running),
            "SUCCESS" => Some(JobStatus::Success),
            "FAILURE" => Some(JobStatus::Failure),
            _ => None,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One target structure of the ensemble.
///
/// The upper-cased `name` is the SDF property key carrying this member's score;
/// the stored score mapping is keyed by `name` as given.
#[derive(Clone, Debug)]
pub struct EnsembleMember {
    pub name: String,
    pub path: PathBuf,
}

/// Run context for one growing: inputs the binary needs plus the job status.
#[derive(Clone, Debug)]
pub struct GrowingJob {
    pub id: i64,
    /// Seed (core) structure file, SDF.
    pub core: PathBuf,
    /// Search-point query payload; written as `{"query": ...}` when present.
    pub search_points: Option<serde_json::Value>,
    /// Target structures. Never empty.
    pub ensemble: Vec<EnsembleMember>,
    /// Fragment database the binary searches.
    pub fragment_set: String,
    pub status: JobStatus,
}

/// One parsed result record, ready to persist.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedHit {
    pub name: String,
    pub score: f64,
    /// Member name → score. Empty for single-member ensembles.
    pub ensemble_scores: BTreeMap<String, f64>,
    /// Record text as read, delimiter included.
    pub file_string: String,
    pub file_type: String,
}

/// Credentials of the fragment database, handed to the growing binary.
#[derive(Clone, Default)]
pub struct StoreCredentials {
    pub username: String,
    pub host: String,
    pub port: u16,
    /// Passed through the child's environment, never on the command line.
    pub password: Option<String>,
}

impl fmt::Debug for StoreCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreCredentials")
            .field("username", &self.username)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Everything the supervisor and ingestion loop read that is not part of the job.
#[derive(Clone, Debug)]
pub struct GrowConfig {
    pub binary: PathBuf,
    pub chunk_size: usize,
    pub write_mode: u8,
    pub database_type: u8,
    pub credentials: StoreCredentials,
    pub poll_interval: Duration,
    /// Extension (without dot) of result files the binary writes.
    pub result_extension: String,
}

impl Default for GrowConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from(GrowDefaults::BINARY),
            chunk_size: GrowDefaults::CHUNK_SIZE,
            write_mode: GrowDefaults::WRITE_MODE,
            database_type: GrowDefaults::DATABASE_TYPE,
            credentials: StoreCredentials {
                username: GrowDefaults::DB_USER.to_string(),
                host: GrowDefaults::DB_HOST.to_string(),
                port: GrowDefaults::DB_PORT,
                password: None,
            },
            poll_interval: Duration::from_millis(GrowDefaults::POLL_INTERVAL_MS),
            result_extension: RESULT_EXTENSION.to_string(),
        }
    }
}

/// What a finished run produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GrowSummary {
    pub files_ingested: usize,
    pub hits_ingested: usize,
}

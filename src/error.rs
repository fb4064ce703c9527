//! Error types for growing runs and hit ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used by the fastgrow library API.
pub type Result<T> = std::result::Result<T, GrowError>;

#[derive(Error, Debug)]
pub enum GrowError {
    /// The growing binary could not be located or launched.
    #[error("failed to launch {}: {source}", binary.display())]
    Spawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The growing binary exited nonzero or was killed by a signal.
    #[error("growing process exited with code {code}{}", stderr_tail(stderr))]
    Execution {
        code: i32,
        args: Vec<String>,
        stdout: String,
        stderr: String,
    },

    #[error("property <{key}> has value {value:?} which is not a valid number")]
    PropertyCast { key: String, value: String },

    #[error("record {record:?} has no <{key}> property")]
    MissingProperty { key: String, record: String },

    #[error("invalid hit {name:?}: {reason}")]
    InvalidHit { name: String, reason: String },

    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("growing cancelled")]
    Cancelled,
}

/// Last stderr line, appended to execution errors so the log line says something useful.
fn stderr_tail(stderr: &str) -> String {
    match stderr.lines().rev().find(|l| !l.trim().is_empty()) {
        Some(line) => format!(": {}", line.trim()),
        None => String::new(),
    }
}

//! fastgrow: supervise a fragment-growing run and ingest its SDF hits while it is still writing them

pub mod engine;
pub mod error;
pub mod pipeline;
pub mod sdf;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

pub use error::{GrowError, Result};

use engine::db_ops::HitStore;

/// Single entry point: run `job` with `config`, storing hits in `store` as result files appear.
///
/// Prepares a temporary workspace, launches the growing binary, polls its results directory
/// every `config.poll_interval`, and persists each new result file in one transaction. After the
/// process exits one more pass picks up late files; then the exit code decides the outcome.
///
/// On return `job.status` is `Success` or `Failure`, matching what was written to `store`.
/// Errors are returned unchanged so the caller can decide on retries:
///
/// ```ignore
/// let conn = fastgrow::engine::open_db(Path::new("hits.db"))?;
/// let mut store = fastgrow::engine::SqliteStore::new(conn);
/// let summary = fastgrow::grow(&mut job, &mut store, &GrowConfig::default())?;
/// ```
pub fn grow<S: HitStore>(job: &mut GrowingJob, store: &mut S, config: &GrowConfig) -> Result<GrowSummary> {
    log::debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        config
    );
    pipeline::run_growing(job, store, config, pipeline::RunHooks::default())
}

use log::{debug, info};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use crate::engine::db_ops::HitStore;
use crate::engine::supervisor::{LaunchSpec, start};
use crate::error::Result;
use crate::utils::workspace::prepare_workspace;
use crate::{GrowConfig, GrowSummary, GrowingJob};

use super::ingest::{IngestionLoop, mark_failed};

/// Optional hooks for [`run_growing`].
#[derive(Default)]
pub struct RunHooks<'a> {
    /// When set and flipped to true, the run stops and the child is terminated.
    pub cancel_check: Option<Arc<AtomicBool>>,
    /// Called with the hit count of every committed file.
    pub on_hits: Option<Box<dyn Fn(usize) + 'a>>,
}

/// Main orchestrator: prepare the workspace, launch the growing binary, and ingest its hits
/// until it exits. `job.status` ends as SUCCESS or FAILURE and the same status is in `store`.
/// Workspace or launch failures also mark the job FAILURE before returning.
pub fn run_growing<S: HitStore>(
    job: &mut GrowingJob,
    store: &mut S,
    config: &GrowConfig,
    hooks: RunHooks<'_>,
) -> Result<GrowSummary> {
    let workspace = match prepare_workspace(job) {
        Ok(ws) => ws,
        Err(e) => {
            log::error!("Could not prepare workspace for growing {}: {}", job.id, e);
            mark_failed(store, job);
            return Err(e);
        }
    };
    let spec = LaunchSpec::for_growing(job, &workspace, config);
    info!("{}", spec.command_line());
    let mut process = match start(spec) {
        Ok(p) => p,
        Err(e) => {
            log::error!("{}", e);
            mark_failed(store, job);
            return Err(e);
        }
    };

    let mut ingestion = IngestionLoop::new(store, &workspace.results_dir, config);
    if let Some(flag) = hooks.cancel_check {
        ingestion = ingestion.with_cancel_check(flag);
    }
    if let Some(cb) = hooks.on_hits {
        ingestion = ingestion.with_progress(cb);
    }
    let result = ingestion.run(job, &mut process);
    debug!("Removing workspace {}", workspace.root().display());
    result
}

//! Ingestion loop: poll the results directory while the growing process runs, persist each new
//! file as one batch, drain once after exit, then classify the outcome.

use log::{debug, error, info};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::engine::db_ops::HitStore;
use crate::engine::supervisor::GrowProcess;
use crate::error::{GrowError, Result};
use crate::sdf::parse_hits;
use crate::{GrowConfig, GrowSummary, GrowingJob, JobStatus};

use super::poller::ResultDirectoryPoller;
use super::seen::SeenSet;

/// Per-run ingestion state. The seen set lives and dies with one loop.
pub struct IngestionLoop<'a, S: HitStore> {
    store: &'a mut S,
    poller: ResultDirectoryPoller,
    poll_interval: Duration,
    seen: SeenSet,
    summary: GrowSummary,
    cancel_check: Option<Arc<AtomicBool>>,
    on_hits: Option<Box<dyn Fn(usize) + 'a>>,
}

impl<'a, S: HitStore> IngestionLoop<'a, S> {
    pub fn new(store: &'a mut S, results_dir: &Path, config: &GrowConfig) -> Self {
        Self {
            store,
            poller: ResultDirectoryPoller::new(results_dir, config.result_extension.as_str()),
            poll_interval: config.poll_interval,
            seen: SeenSet::new(),
            summary: GrowSummary::default(),
            cancel_check: None,
            on_hits: None,
        }
    }

    /// Checked once per cycle; when set the child is terminated and the run fails with
    /// [`GrowError::Cancelled`].
    pub fn with_cancel_check(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel_check = Some(flag);
        self
    }

    /// Called with the number of hits after every committed file.
    pub fn with_progress(mut self, on_hits: Box<dyn Fn(usize) + 'a>) -> Self {
        self.on_hits = Some(on_hits);
        self
    }

    pub fn seen(&self) -> &SeenSet {
        &self.seen
    }

    pub fn summary(&self) -> &GrowSummary {
        &self.summary
    }

    fn cancelled(&self) -> bool {
        self.cancel_check
            .as_ref()
            .is_some_and(|c| c.load(Ordering::Relaxed))
    }

    /// Parse and persist one file. `None` when it has no records yet (left unseen for a later
    /// pass). The file is marked seen only after its batch commits.
    fn ingest_file(&mut self, job: &GrowingJob, path: &Path) -> Result<Option<usize>> {
        let text = std::fs::read_to_string(path)?;
        let hits = parse_hits(&text, &job.ensemble)?;
        if hits.is_empty() {
            debug!("{}: no records yet", path.display());
            return Ok(None);
        }
        let written = self.store.persist(job.id, &hits)?;
        self.seen.mark(path.to_path_buf());
        Ok(Some(written))
    }

    /// One full pass: every new file in discovery order. Returns hits written in this pass.
    pub fn ingest_pass(&mut self, job: &GrowingJob) -> Result<usize> {
        let mut written = 0;
        for path in self.poller.scan(&self.seen)? {
            let result = self
                .ingest_file(job, &path)
                .inspect_err(|e| debug!("Ingest of {} failed: {}", path.display(), e))?;
            if let Some(n) = result {
                info!(
                    "Ingested {} hits from {}",
                    n,
                    path.file_name().unwrap_or_default().to_string_lossy()
                );
                self.summary.files_ingested += 1;
                self.summary.hits_ingested += n;
                written += n;
                if let Some(ref cb) = self.on_hits {
                    cb(n);
                }
            }
        }
        Ok(written)
    }

    /// Poll + ingest until the process exits, drain once, then check the exit code.
    fn supervise<P: GrowProcess + ?Sized>(
        &mut self,
        job: &GrowingJob,
        process: &mut P,
    ) -> Result<GrowSummary> {
        loop {
            if self.cancelled() {
                info!("Growing {} cancelled; stopping process", job.id);
                return Err(GrowError::Cancelled);
            }
            self.ingest_pass(job)?;
            std::thread::sleep(self.poll_interval);
            if process.poll()?.is_some() {
                break;
            }
        }
        // files written between the last pass and exit
        let drained = self.ingest_pass(job)?;
        debug!("Drain pass wrote {} hits", drained);

        let code = process.wait()?;
        if code != 0 {
            let output = process.captured_output();
            return Err(GrowError::Execution {
                code,
                args: process.args().to_vec(),
                stdout: output.stdout,
                stderr: output.stderr,
            });
        }
        Ok(self.summary.clone())
    }

    /// Drive `job` from RUNNING to SUCCESS or FAILURE against an already started process.
    /// On failure the process is terminated if still running, FAILURE is recorded, and the
    /// error that failed the run is returned. Hits of files committed before the failure stay.
    pub fn run<P: GrowProcess + ?Sized>(
        &mut self,
        job: &mut GrowingJob,
        process: &mut P,
    ) -> Result<GrowSummary> {
        let outcome = self
            .store
            .set_status(job.id, JobStatus::Running)
            .and_then(|_| {
                job.status = JobStatus::Running;
                self.supervise(job, process)
            })
            .and_then(|summary| {
                self.store.set_status(job.id, JobStatus::Success)?;
                Ok(summary)
            });
        match outcome {
            Ok(summary) => {
                job.status = JobStatus::Success;
                info!(
                    "Growing {} finished: {} hits from {} files",
                    job.id, summary.hits_ingested, summary.files_ingested
                );
                Ok(summary)
            }
            Err(e) => {
                error!("Growing {} failed: {}", job.id, e);
                if let Err(te) = process.terminate() {
                    log::warn!("Could not stop growing process: {}", te);
                }
                mark_failed(&mut *self.store, job);
                Err(e)
            }
        }
    }
}

/// Record FAILURE on the job and in the store. A store error here is logged, not returned, so
/// the caller still sees the error that failed the run.
pub fn mark_failed<S: HitStore + ?Sized>(store: &mut S, job: &mut GrowingJob) {
    job.status = JobStatus::Failure;
    if let Err(e) = store.set_status(job.id, JobStatus::Failure) {
        log::warn!("Could not record FAILURE for growing {}: {}", job.id, e);
    }
}

//! Temporary run workspace: core file, ensemble directory, search points and results directory.

use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::GrowingJob;
use crate::error::Result;

use super::config::{PackagePaths, WorkspaceNames};

/// Files handed to the growing binary. The directory is removed when this is dropped.
pub struct RunWorkspace {
    dir: TempDir,
    pub core: PathBuf,
    pub ensemble_dir: PathBuf,
    pub results_dir: PathBuf,
    pub search_points: Option<PathBuf>,
}

impl RunWorkspace {
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Path passed as `--results`. Result chunks land next to it in `results_dir`.
    pub fn results_file(&self) -> PathBuf {
        self.results_dir.join(WorkspaceNames::RESULTS_FILE)
    }

    pub fn stdout_log(&self) -> PathBuf {
        self.root().join(PackagePaths::get().stdout_log())
    }

    pub fn stderr_log(&self) -> PathBuf {
        self.root().join(PackagePaths::get().stderr_log())
    }

    /// Keep the directory on disk after this is dropped. Returns its path; removing it is up to
    /// the caller.
    pub fn keep(self) -> PathBuf {
        self.dir.keep()
    }
}

/// Write the search-point query file the binary expects: `{"query": <payload>}`.
pub fn write_search_points(path: &Path, payload: &serde_json::Value) -> Result<()> {
    let doc = json!({ "query": payload });
    fs::write(path, serde_json::to_vec(&doc)?)?;
    Ok(())
}

/// Create the workspace for `job` under the system temp directory.
pub fn prepare_workspace(job: &GrowingJob) -> Result<RunWorkspace> {
    let prefix = format!("{}-{}-", PackagePaths::get().pkg_name(), job.id);
    let dir = tempfile::Builder::new().prefix(&prefix).tempdir()?;
    let root = dir.path();

    let core = root.join(WorkspaceNames::CORE_FILE);
    fs::copy(&job.core, &core)?;

    let ensemble_dir = root.join(WorkspaceNames::ENSEMBLE_DIR);
    fs::create_dir(&ensemble_dir)?;
    for member in &job.ensemble {
        let target = ensemble_dir.join(format!(
            "{}.{}",
            member.name,
            WorkspaceNames::ENSEMBLE_EXTENSION
        ));
        fs::copy(&member.path, &target)?;
    }

    let results_dir = root.join(WorkspaceNames::RESULTS_DIR);
    fs::create_dir(&results_dir)?;

    let search_points = match &job.search_points {
        Some(payload) => {
            let p = root.join(WorkspaceNames::SEARCH_POINTS_FILE);
            write_search_points(&p, payload)?;
            Some(p)
        }
        None => None,
    };

    log::debug!("Workspace prepared at {}", root.display());
    Ok(RunWorkspace {
        dir,
        core,
        ensemble_dir,
        results_dir,
        search_points,
    })
}

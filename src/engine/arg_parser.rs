use clap::Parser;
use std::path::PathBuf;

use crate::utils::config::PackagePaths;

/// Run a fragment growing and ingest its hits while it runs.
#[derive(Clone, Parser)]
#[command(name = "fastgrow")]
#[command(about = "Run the growing binary for a job file and store its hits as they are written.")]
pub struct Cli {
    /// Job description (TOML): id, core, fragment_set, optional search_points, [[ensemble]].
    #[arg(value_name = "JOB")]
    pub job: PathBuf,

    /// Hit store (SQLite). Default: `fastgrow_hits.db` next to JOB.
    #[arg(long, short)]
    pub db: Option<PathBuf>,

    /// Growing binary. Overrides `binary` in `.fastgrow.toml`.
    #[arg(long, short)]
    pub binary: Option<PathBuf>,

    /// Hits per result file written by the binary.
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Results directory poll interval in milliseconds.
    #[arg(long, short = 'p')]
    pub poll_interval_ms: Option<u64>,

    /// Fragment database user.
    #[arg(long)]
    pub db_user: Option<String>,

    /// Fragment database host.
    #[arg(long)]
    pub db_host: Option<String>,

    /// Fragment database port.
    #[arg(long)]
    pub db_port: Option<u16>,

    /// Prompt for the fragment database password when FASTGROW_DB_PASSWORD / .env do not set it.
    #[arg(long)]
    pub ask_password: bool,

    /// Prepare the workspace and print the command line; do not launch the binary.
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose output (debug logs and a hit counter).
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    /// Directory of the job file; settings, `.env` and the default store live there.
    pub fn job_dir(&self) -> PathBuf {
        self.job
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Get the store path, defaulting to the package db filename next to the job file.
    pub fn db_path(&self) -> PathBuf {
        self.db
            .clone()
            .unwrap_or_else(|| self.job_dir().join(PackagePaths::get().db_filename()))
    }
}

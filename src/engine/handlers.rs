//! CLI command handler: run a growing job by default; --dry-run prints the command line only.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::engine::arg_parser::Cli;
use crate::engine::db_ops::{SqliteStore, open_db};
use crate::engine::progress::{create_counter, hits_callback, refresh_bar};
use crate::engine::supervisor::LaunchSpec;
use crate::error::GrowError;
use crate::pipeline::{RunHooks, run_growing};
use crate::utils::{
    Colors, apply_file_to_config, get_db_password, load_grow_toml, load_job, prepare_workspace,
    setup_logging,
};
use crate::GrowConfig;

/// Defaults → `.fastgrow.toml` in the job directory → CLI flags → password lookup.
fn setup_config(cli: &Cli) -> Result<GrowConfig> {
    let dir = cli.job_dir();
    let mut config = GrowConfig::default();
    if let Some(file) = load_grow_toml(&dir) {
        apply_file_to_config(&file, &mut config);
    }
    if let Some(ref binary) = cli.binary {
        config.binary = binary.clone();
    }
    if let Some(n) = cli.chunk_size {
        config.chunk_size = n;
    }
    if let Some(ms) = cli.poll_interval_ms {
        config.poll_interval = Duration::from_millis(ms);
    }
    if let Some(ref user) = cli.db_user {
        config.credentials.username = user.clone();
    }
    if let Some(ref host) = cli.db_host {
        config.credentials.host = host.clone();
    }
    if let Some(port) = cli.db_port {
        config.credentials.port = port;
    }
    config.credentials.password = get_db_password(&dir, cli.ask_password)?;
    Ok(config)
}

/// Run the job (default) or print its command line when --dry-run.
pub fn handle_run(cli: &Cli) -> Result<()> {
    setup_logging(cli.verbose);
    let config = setup_config(cli)?;
    debug!("{} CONFIG:{:#?}", env!("CARGO_PKG_NAME").to_uppercase(), config);
    let mut job = load_job(&cli.job)?;

    if cli.dry_run {
        warn!("DRY RUN: THE GROWING BINARY WILL NOT BE STARTED.");
        let workspace = prepare_workspace(&job).context("prepare workspace")?;
        let command_line = LaunchSpec::for_growing(&job, &workspace, &config).command_line();
        let kept = workspace.keep();
        warn!("Workspace kept at {} (remove it when done)", kept.display());
        println!("{}", command_line);
        return Ok(());
    }

    let db_path = cli.db_path();
    let conn = open_db(&db_path)
        .with_context(|| format!("open hit store {}", db_path.display()))?;
    let mut store = SqliteStore::new(conn);
    store.register_job(&job).context("register job")?;

    let cancel_requested = Arc::new(AtomicBool::new(false));
    let cancel_requested_handler = Arc::clone(&cancel_requested);
    ctrlc::set_handler(move || {
        cancel_requested_handler.store(true, Ordering::Relaxed);
    })
    .context("set Ctrl+C handler")?;

    let bar = cli.verbose.then(|| {
        let b = create_counter("Growing");
        refresh_bar(&b);
        b
    });
    let hooks = RunHooks {
        cancel_check: Some(cancel_requested),
        on_hits: bar.as_ref().map(hits_callback),
    };

    match run_growing(&mut job, &mut store, &config, hooks) {
        Ok(summary) => {
            info!(
                "Growing {} {}: {} hits stored in {}",
                job.id,
                Colors::status(job.status),
                summary.hits_ingested,
                db_path.display()
            );
            Ok(())
        }
        Err(e) => {
            if let GrowError::Execution { stdout, stderr, .. } = &e {
                debug!("growing stdout:\n{}", stdout);
                debug!("growing stderr:\n{}", stderr);
            }
            info!(
                "Growing {} {}: {} hits stored before the failure",
                job.id,
                Colors::status(job.status),
                store.hit_count(job.id).unwrap_or(0)
            );
            Err(e.into())
        }
    }
}

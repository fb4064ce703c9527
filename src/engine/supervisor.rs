//! Growing process supervision: argument contract, launch, liveness, exit classification.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use crate::error::{GrowError, Result};
use crate::utils::config::CHILD_PASSWORD_ENV_KEY;
use crate::utils::workspace::RunWorkspace;
use crate::{GrowConfig, GrowingJob};

/// How long a terminated child gets to exit before it is killed outright.
const TERMINATE_GRACE: Duration = Duration::from_secs(2);
const TERMINATE_POLL: Duration = Duration::from_millis(50);

/// Child stdout/stderr as captured during the run.
#[derive(Clone, Debug, Default)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
}

/// A running (or finished) growing computation, as seen by the ingestion loop.
///
/// Exit codes follow the usual convention: 0 is success, positive is a failure reported by the
/// process, negative is the signal that killed it.
pub trait GrowProcess {
    /// Non-blocking: `None` while the process is still running.
    fn poll(&mut self) -> Result<Option<i32>>;

    /// Block until the process has exited.
    fn wait(&mut self) -> Result<i32>;

    /// Arguments the process was started with (for error reports).
    fn args(&self) -> &[String];

    fn captured_output(&self) -> CapturedOutput;

    /// Stop the process if it is still running. No-op once it has exited.
    fn terminate(&mut self) -> Result<()>;
}

/// Arguments for the growing binary, in the order it documents them.
pub fn grow_args(job: &GrowingJob, workspace: &RunWorkspace, config: &GrowConfig) -> Vec<String> {
    let creds = &config.credentials;
    let mut args = vec![
        "--ligand".to_string(),
        workspace.core.display().to_string(),
        "--results".to_string(),
        workspace.results_file().display().to_string(),
        "--database".to_string(),
        job.fragment_set.clone(),
        "--chunksize".to_string(),
        config.chunk_size.to_string(),
        "--writemode".to_string(),
        config.write_mode.to_string(),
        "--databasetype".to_string(),
        config.database_type.to_string(),
        "--username".to_string(),
        creds.username.clone(),
        "--port".to_string(),
        creds.port.to_string(),
        "--host".to_string(),
        creds.host.clone(),
        "--ensemble".to_string(),
        workspace.ensemble_dir.display().to_string(),
    ];
    if let Some(ref search_points) = workspace.search_points {
        args.push("--interactions".to_string());
        args.push(search_points.display().to_string());
    }
    args
}

/// Everything needed to launch the binary.
pub struct LaunchSpec<'a> {
    pub binary: &'a Path,
    pub args: Vec<String>,
    pub envs: Vec<(String, String)>,
    pub stdout_log: PathBuf,
    pub stderr_log: PathBuf,
}

impl<'a> LaunchSpec<'a> {
    /// Launch settings for a growing run inside `workspace`. The password (if any) goes into the
    /// child's environment.
    pub fn for_growing(job: &GrowingJob, workspace: &RunWorkspace, config: &'a GrowConfig) -> Self {
        let envs = config
            .credentials
            .password
            .iter()
            .map(|p| (CHILD_PASSWORD_ENV_KEY.to_string(), p.clone()))
            .collect();
        Self {
            binary: &config.binary,
            args: grow_args(job, workspace, config),
            envs,
            stdout_log: workspace.stdout_log(),
            stderr_log: workspace.stderr_log(),
        }
    }

    /// Command line for logs. Contains no secrets: the password only lives in `envs`.
    pub fn command_line(&self) -> String {
        let mut parts = vec![self.binary.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Map an exit status to a code: the process's own code, or the negated signal number.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(sig) = status.signal() {
            return -sig;
        }
    }
    -1
}

/// Launch the binary. Stdout/stderr go to the log files named in `spec`; on unix the child leads its
/// own process group so [`GrowProcess::terminate`] reaches anything it spawns.
pub fn start(spec: LaunchSpec<'_>) -> Result<ProcessHandle> {
    let stdout = File::create(&spec.stdout_log)?;
    let stderr = File::create(&spec.stderr_log)?;
    let mut cmd = Command::new(spec.binary);
    cmd.args(&spec.args)
        .envs(spec.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .stdin(Stdio::null())
        .stdout(stdout)
        .stderr(stderr);
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }
    let child = cmd.spawn().map_err(|source| GrowError::Spawn {
        binary: spec.binary.to_path_buf(),
        source,
    })?;
    log::debug!("Started growing process pid {}", child.id());
    Ok(ProcessHandle {
        child,
        args: spec.args,
        stdout_log: spec.stdout_log,
        stderr_log: spec.stderr_log,
        exit: None,
    })
}

/// [`GrowProcess`] over a real child process.
pub struct ProcessHandle {
    child: Child,
    args: Vec<String>,
    stdout_log: PathBuf,
    stderr_log: PathBuf,
    exit: Option<i32>,
}

impl ProcessHandle {
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    #[cfg(unix)]
    fn signal_group(&self, sig: libc::c_int) {
        let pgid = self.child.id() as libc::pid_t;
        // negative pid addresses the whole process group
        unsafe {
            libc::kill(-pgid, sig);
        }
    }

    #[cfg_attr(not(unix), allow(dead_code))]
    fn wait_with_grace(&mut self, grace: Duration) -> Result<Option<i32>> {
        let deadline = Instant::now() + grace;
        while Instant::now() < deadline {
            if let Some(code) = self.poll()? {
                return Ok(Some(code));
            }
            std::thread::sleep(TERMINATE_POLL);
        }
        Ok(None)
    }
}

impl GrowProcess for ProcessHandle {
    fn poll(&mut self) -> Result<Option<i32>> {
        if self.exit.is_none()
            && let Some(status) = self.child.try_wait()?
        {
            self.exit = Some(exit_code(status));
        }
        Ok(self.exit)
    }

    fn wait(&mut self) -> Result<i32> {
        if let Some(code) = self.exit {
            return Ok(code);
        }
        let code = exit_code(self.child.wait()?);
        self.exit = Some(code);
        Ok(code)
    }

    fn args(&self) -> &[String] {
        &self.args
    }

    fn captured_output(&self) -> CapturedOutput {
        let read = |p: &Path| {
            std::fs::read(p)
                .map(|b| String::from_utf8_lossy(&b).into_owned())
                .unwrap_or_default()
        };
        CapturedOutput {
            stdout: read(&self.stdout_log),
            stderr: read(&self.stderr_log),
        }
    }

    fn terminate(&mut self) -> Result<()> {
        if self.poll()?.is_some() {
            return Ok(());
        }
        log::warn!("Terminating growing process {}", self.child.id());
        #[cfg(unix)]
        {
            self.signal_group(libc::SIGTERM);
            if self.wait_with_grace(TERMINATE_GRACE)?.is_some() {
                return Ok(());
            }
            self.signal_group(libc::SIGKILL);
        }
        #[cfg(not(unix))]
        {
            let _ = self.child.kill();
        }
        self.wait()?;
        Ok(())
    }
}

impl Drop for ProcessHandle {
    fn drop(&mut self) {
        if matches!(self.poll(), Ok(None)) {
            let _ = self.terminate();
        }
    }
}

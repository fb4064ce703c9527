//! Load a growing job description (TOML). Relative paths resolve against the job file's directory.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::{EnsembleMember, GrowingJob, JobStatus};

#[derive(Debug, Deserialize)]
struct JobToml {
    id: i64,
    core: PathBuf,
    fragment_set: String,
    search_points: Option<PathBuf>,
    #[serde(default)]
    ensemble: Vec<MemberToml>,
}

#[derive(Debug, Deserialize)]
struct MemberToml {
    name: String,
    path: PathBuf,
}

fn resolve(dir: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        dir.join(p)
    }
}

/// Parse job TOML text; `dir` is the base for relative paths.
pub fn parse_job(s: &str, dir: &Path) -> Result<GrowingJob> {
    let raw: JobToml = toml::from_str(s).context("parse job file")?;
    if raw.ensemble.is_empty() {
        bail!("job {} has no ensemble members", raw.id);
    }
    let search_points = match raw.search_points {
        Some(p) => {
            let p = resolve(dir, &p);
            let text = std::fs::read_to_string(&p)
                .with_context(|| format!("read search points {}", p.display()))?;
            let value: serde_json::Value = serde_json::from_str(&text)
                .with_context(|| format!("parse search points {}", p.display()))?;
            Some(value)
        }
        None => None,
    };
    Ok(GrowingJob {
        id: raw.id,
        core: resolve(dir, &raw.core),
        search_points,
        ensemble: raw
            .ensemble
            .into_iter()
            .map(|m| EnsembleMember {
                name: m.name,
                path: resolve(dir, &m.path),
            })
            .collect(),
        fragment_set: raw.fragment_set,
        status: JobStatus::Pending,
    })
}

/// Read and parse the job file at `path`.
pub fn load_job(path: &Path) -> Result<GrowingJob> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read job file {}", path.display()))?;
    let dir = path.parent().unwrap_or(Path::new("."));
    parse_job(&s, dir)
}

//! Result directory scan: result files present now that are not in the seen set.

use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::Result;

use super::seen::SeenSet;

/// True if `path` has extension `ext` (no dot).
fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(ext)
}

/// List result files directly in `dir` with extension `ext` that are not in `seen`, sorted by
/// file name. Does not touch `seen`: the caller marks a file once its hits are committed, so two
/// scans without ingestion in between return the same list. A missing directory has no files.
pub fn scan(dir: &Path, seen: &SeenSet, ext: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut new_files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() || !has_extension(entry.path(), ext) {
            continue;
        }
        if seen.contains(entry.path()) {
            continue;
        }
        new_files.push(entry.into_path());
    }
    log::debug!(
        "Scan of {}: {} new, {} seen",
        dir.display(),
        new_files.len(),
        seen.len()
    );
    Ok(new_files)
}

/// A results directory bound to its file extension.
#[derive(Clone, Debug)]
pub struct ResultDirectoryPoller {
    dir: PathBuf,
    extension: String,
}

impl ResultDirectoryPoller {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn scan(&self, seen: &SeenSet) -> Result<Vec<PathBuf>> {
        scan(&self.dir, seen, &self.extension)
    }
}

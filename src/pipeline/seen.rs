use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Result files already ingested during one run. Append-only.
#[derive(Debug, Default)]
pub struct SeenSet {
    files: HashSet<PathBuf>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    /// Record `path` as fully ingested. Returns false if it was already marked.
    pub fn mark(&mut self, path: PathBuf) -> bool {
        self.files.insert(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

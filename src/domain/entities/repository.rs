use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A version-control working tree as reported by a repository lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Repository {
    /// Absolute directory at the top of the working tree
    root: PathBuf,
}

impl Repository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory, used both as the batching key and as the working
    /// directory of the batch's process.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

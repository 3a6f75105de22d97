use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::resource_path::ResourcePath;

/// Paths sharing one repository root, dispatched to a single process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Batch {
    pub repo_root: PathBuf,
    pub paths: Vec<ResourcePath>,
}

/// Repository root → ordered paths. Batches are created on first insertion,
/// so none is ever empty, and they enumerate in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Batches {
    batches: Vec<Batch>,
    #[serde(skip)]
    index: HashMap<PathBuf, usize>,
}

impl Batches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `path` to the batch of `repo_root`, creating it if needed.
    pub fn push(&mut self, repo_root: &Path, path: ResourcePath) {
        match self.index.get(repo_root) {
            Some(&slot) => self.batches[slot].paths.push(path),
            None => {
                self.index.insert(repo_root.to_path_buf(), self.batches.len());
                self.batches.push(Batch {
                    repo_root: repo_root.to_path_buf(),
                    paths: vec![path],
                });
            }
        }
    }

    pub fn get(&self, repo_root: &Path) -> Option<&Batch> {
        self.index.get(repo_root).map(|&slot| &self.batches[slot])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Batch> {
        self.batches.iter()
    }

    /// Number of batches, i.e. distinct repository roots.
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Number of paths across all batches, duplicates included.
    pub fn path_count(&self) -> usize {
        self.batches.iter().map(|batch| batch.paths.len()).sum()
    }
}

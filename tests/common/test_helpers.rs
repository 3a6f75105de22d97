//! Test helper functions and utilities
//!
//! Real repositories on disk, created through libgit2.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding any number of git repositories and loose
/// files.
pub struct GitFixture {
    _temp_dir: TempDir,
    root: PathBuf,
}

impl GitFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        // Discovery reports canonical paths (e.g. /private/var on macOS)
        let root = temp_dir
            .path()
            .canonicalize()
            .expect("Failed to canonicalize temp dir");
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Initializes a repository with a working tree at `name`.
    pub fn repository(&self, name: &str) -> PathBuf {
        let path = self.root.join(name);
        git2::Repository::init(&path).expect("Failed to init repository");
        path
    }

    /// Initializes a bare repository at `name`.
    pub fn bare_repository(&self, name: &str) -> PathBuf {
        let path = self.root.join(name);
        git2::Repository::init_bare(&path).expect("Failed to init bare repository");
        path
    }

    /// Writes `relative` (creating parent directories) and returns its path.
    pub fn file(&self, relative: &str) -> PathBuf {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&path, relative).expect("Failed to write file");
        path
    }

    /// Writes `repobatch.yaml` at the fixture root.
    pub fn config(&self, content: &str) -> PathBuf {
        let path = self.root.join("repobatch.yaml");
        std::fs::write(&path, content).expect("Failed to write config");
        path
    }
}

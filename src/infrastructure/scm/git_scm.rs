use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

use super::scm_interface::{ExecutableLocator, RepositoryLookup};
use crate::common::error::BatchError;
use crate::common::result::BatchResult;
use crate::domain::entities::repository::Repository;
use crate::domain::value_objects::resource_path::ResourcePath;

const GIT_EXECUTABLE: &str = if cfg!(windows) { "git.exe" } else { "git" };

/// Repository lookup backed by libgit2 discovery.
#[derive(Debug, Default, Clone)]
pub struct GitRepositoryLookup;

impl GitRepositoryLookup {
    pub fn new() -> Self {
        Self
    }

    fn discover(location: &Path) -> BatchResult<Option<PathBuf>> {
        let Some(start) = nearest_directory(location) else {
            return Ok(None);
        };

        let repository = git2::Repository::discover(start).map_err(|e| {
            BatchError::git_error_with_source(
                format!("No repository found from {}", start.display()),
                e,
            )
        })?;
        // Bare repositories have no working tree to batch into.
        Ok(repository
            .workdir()
            .map(|workdir| workdir.components().collect::<PathBuf>()))
    }
}

impl RepositoryLookup for GitRepositoryLookup {
    fn repository_for(&self, path: &ResourcePath) -> Option<Repository> {
        if !path.is_local() {
            return None;
        }

        match Self::discover(path.location()) {
            Ok(Some(root)) => Some(Repository::new(root)),
            Ok(None) => {
                debug!("No working tree for {}", path);
                None
            }
            Err(e) => {
                debug!("{}: {}", path, e);
                None
            }
        }
    }
}

/// `location` itself when it is a directory, else its closest existing
/// ancestor directory.
fn nearest_directory(location: &Path) -> Option<&Path> {
    location.ancestors().find(|candidate| candidate.is_dir())
}

/// Locates git: an explicitly configured path, or a search of `PATH`.
#[derive(Debug, Default, Clone)]
pub struct GitExecutableLocator {
    configured: Option<PathBuf>,
}

impl GitExecutableLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_executable(executable: impl Into<PathBuf>) -> Self {
        Self {
            configured: Some(executable.into()),
        }
    }

    fn search_path() -> Option<PathBuf> {
        let path_var = std::env::var_os("PATH")?;
        std::env::split_paths(&path_var)
            .map(|dir| dir.join(GIT_EXECUTABLE))
            .find(|candidate| candidate.is_file())
    }
}

impl ExecutableLocator for GitExecutableLocator {
    fn locate(&self) -> BatchResult<PathBuf> {
        match &self.configured {
            Some(executable) if executable.is_file() => Ok(executable.clone()),
            Some(executable) => Err(BatchError::executable_not_found(
                executable.display().to_string(),
            )),
            None => Self::search_path()
                .ok_or_else(|| BatchError::executable_not_found(GIT_EXECUTABLE)),
        }
    }
}

/// A usable git integration: an executable to run plus a repository lookup.
#[derive(Debug, Clone)]
pub struct GitIntegration {
    executable: PathBuf,
    repositories: Arc<GitRepositoryLookup>,
}

impl GitIntegration {
    /// `None` when no git executable can be found.
    pub fn detect(locator: &dyn ExecutableLocator) -> Option<Self> {
        match locator.locate() {
            Ok(executable) => {
                debug!("Using git at {}", executable.display());
                Some(Self {
                    executable,
                    repositories: Arc::new(GitRepositoryLookup::new()),
                })
            }
            Err(e) => {
                warn!("Git integration unavailable: {}", e);
                None
            }
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn repository_lookup(&self) -> Arc<dyn RepositoryLookup> {
        self.repositories.clone()
    }
}

use std::path::PathBuf;

use crate::common::result::BatchResult;
use crate::domain::entities::{repository::Repository, workspace::WorkspaceFolder};
use crate::domain::value_objects::resource_path::ResourcePath;

/// Finds the version-control repository owning a path.
#[cfg_attr(test, mockall::automock)]
pub trait RepositoryLookup: Send + Sync {
    /// The repository whose working tree contains `path`, if any.
    fn repository_for(&self, path: &ResourcePath) -> Option<Repository>;
}

/// Finds the workspace folder containing a path.
#[cfg_attr(test, mockall::automock)]
pub trait WorkspaceLookup: Send + Sync {
    /// The folder containing `path`, if any.
    fn workspace_folder_for(&self, path: &ResourcePath) -> Option<WorkspaceFolder>;
}

/// Supplies the absolute path of the version-control executable.
pub trait ExecutableLocator: Send + Sync {
    fn locate(&self) -> BatchResult<PathBuf>;
}

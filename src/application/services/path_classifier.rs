use std::path::PathBuf;
use tracing::trace;

use crate::domain::entities::run_report::RejectionReason;
use crate::domain::value_objects::resource_path::ResourcePath;
use crate::infrastructure::scm::scm_interface::{RepositoryLookup, WorkspaceLookup};

/// Where a path goes: into the batch of a repository root, or a rejection
/// bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Accepted { repo_root: PathBuf },
    Rejected(RejectionReason),
}

/// Decides the batch of each path.
///
/// Checks run in a fixed order and stop at the first hit: no repository, then
/// no workspace folder, then a workspace folder off the local file system.
pub struct PathClassifier<'a> {
    repositories: &'a dyn RepositoryLookup,
    workspaces: &'a dyn WorkspaceLookup,
    split_out_of_workspace: bool,
}

impl<'a> PathClassifier<'a> {
    pub fn new(repositories: &'a dyn RepositoryLookup, workspaces: &'a dyn WorkspaceLookup) -> Self {
        Self {
            repositories,
            workspaces,
            split_out_of_workspace: false,
        }
    }

    /// When set, paths outside every workspace folder are reported as
    /// [`RejectionReason::OutOfWorkspace`] rather than
    /// [`RejectionReason::MissingRepository`].
    pub fn with_split_out_of_workspace(mut self, split: bool) -> Self {
        self.split_out_of_workspace = split;
        self
    }

    pub fn classify(&self, path: &ResourcePath) -> Classification {
        let Some(repository) = self.repositories.repository_for(path) else {
            trace!("{}: no repository", path);
            return Classification::Rejected(RejectionReason::MissingRepository);
        };

        let Some(folder) = self.workspaces.workspace_folder_for(path) else {
            trace!("{}: no workspace folder", path);
            return Classification::Rejected(if self.split_out_of_workspace {
                RejectionReason::OutOfWorkspace
            } else {
                RejectionReason::MissingRepository
            });
        };

        if !folder.is_local() {
            trace!("{}: workspace folder '{}' is not local", path, folder.name);
            return Classification::Rejected(RejectionReason::NonLocalScheme);
        }

        Classification::Accepted {
            repo_root: repository.root().to_path_buf(),
        }
    }
}

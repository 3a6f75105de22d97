/// SCM (Source Control Management) collaborators
///
/// This module provides the lookups the batching core depends on and their
/// git implementations.

pub mod git_scm;
pub mod scm_interface;

pub use git_scm::{GitExecutableLocator, GitIntegration, GitRepositoryLookup};
pub use scm_interface::{ExecutableLocator, RepositoryLookup, WorkspaceLookup};

/// Infrastructure layer modules
///
/// This layer provides concrete implementations for external system interactions:
/// - SCM lookups (repository discovery, git executable location)
/// - File system operations (config files, workspace folders)
/// - Process execution (shell runner, outcome settlement)
pub mod filesystem;
pub mod process;
pub mod scm;

// Re-export commonly used types
pub use filesystem::{config_store::ConfigStore, workspace_folders::ConfiguredWorkspaceFolders};
pub use process::{Environment, ProcessRunner, ShellProcessRunner};
pub use scm::{
    git_scm::{GitExecutableLocator, GitIntegration, GitRepositoryLookup},
    scm_interface::{ExecutableLocator, RepositoryLookup, WorkspaceLookup},
};

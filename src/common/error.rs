use std::path::PathBuf;
use thiserror::Error;

use crate::domain::entities::run_report::ProcessHandle;

#[derive(Error, Debug)]
pub enum BatchError {
    /// The process could not be started at all. Carries the identity of the
    /// attempted process so the orchestrator can report it as a failed batch.
    #[error("Failed to spawn '{}' in {}: {source}", .process.command_line, .process.working_dir.display())]
    SpawnFailure {
        process: ProcessHandle,
        #[source]
        source: std::io::Error,
    },

    #[error("Collaborator unavailable: {collaborator}")]
    CollaboratorUnavailable { collaborator: String },

    #[error("Executable not found: {executable}")]
    ExecutableNotFound { executable: String },

    #[error("Git operation failed: {message}")]
    GitError {
        message: String,
        #[source]
        source: Option<git2::Error>,
    },

    #[error("File system operation failed: {message}")]
    FileSystemError {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Invalid path '{path}': {message}")]
    InvalidPath { path: String, message: String },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl BatchError {
    pub fn spawn_failure(process: ProcessHandle, source: std::io::Error) -> Self {
        Self::SpawnFailure { process, source }
    }

    pub fn collaborator_unavailable(collaborator: impl Into<String>) -> Self {
        Self::CollaboratorUnavailable {
            collaborator: collaborator.into(),
        }
    }

    pub fn executable_not_found(executable: impl Into<String>) -> Self {
        Self::ExecutableNotFound {
            executable: executable.into(),
        }
    }

    pub fn git_error_with_source(message: impl Into<String>, source: git2::Error) -> Self {
        Self::GitError {
            message: message.into(),
            source: Some(source),
        }
    }

    pub fn filesystem_error_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystemError {
            message: message.into(),
            path,
            source: Some(source),
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
            source: None,
        }
    }

    pub fn config_error_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn invalid_path(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
            source: None,
        }
    }

    pub fn internal_error_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::InternalError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<validator::ValidationErrors> for BatchError {
    fn from(error: validator::ValidationErrors) -> Self {
        Self::config_error_with_source("Configuration validation failed", error)
    }
}

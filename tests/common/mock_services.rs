//! Mock services for testing
//!
//! In-memory lookups and a recording process runner, so the batched run can be
//! driven without git or a shell.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use repobatch::common::result::BatchResult;
use repobatch::domain::entities::{
    repository::Repository,
    run_report::{ProcessHandle, ProcessOutcome},
    workspace::WorkspaceFolder,
};
use repobatch::domain::value_objects::{
    command_template::CommandTemplate, resource_path::ResourcePath,
};
use repobatch::infrastructure::{Environment, ProcessRunner, RepositoryLookup, WorkspaceLookup};
use repobatch::BatchError;

/// Repository roots known up front; a path belongs to the longest root that
/// contains it.
pub struct StaticRepositories {
    roots: Vec<PathBuf>,
}

impl StaticRepositories {
    pub fn new(roots: &[&str]) -> Self {
        Self {
            roots: roots.iter().map(PathBuf::from).collect(),
        }
    }
}

impl RepositoryLookup for StaticRepositories {
    fn repository_for(&self, path: &ResourcePath) -> Option<Repository> {
        self.roots
            .iter()
            .filter(|root| path.location().starts_with(root))
            .max_by_key(|root| root.components().count())
            .map(Repository::new)
    }
}

/// A single workspace folder containing everything.
pub struct SingleWorkspace {
    folder: WorkspaceFolder,
}

impl SingleWorkspace {
    pub fn local(root: &str) -> Self {
        Self {
            folder: WorkspaceFolder::new("workspace", ResourcePath::local(root)),
        }
    }

    pub fn remote(scheme: &str, root: &str) -> Self {
        Self {
            folder: WorkspaceFolder::new("remote", ResourcePath::remote(scheme, None, root)),
        }
    }
}

impl WorkspaceLookup for SingleWorkspace {
    fn workspace_folder_for(&self, _path: &ResourcePath) -> Option<WorkspaceFolder> {
        Some(self.folder.clone())
    }
}

/// Workspace folders matched by location prefix only, whatever their scheme;
/// the longest prefix wins.
pub struct PrefixWorkspaces {
    folders: Vec<(PathBuf, WorkspaceFolder)>,
}

impl PrefixWorkspaces {
    pub fn new() -> Self {
        Self {
            folders: Vec::new(),
        }
    }

    pub fn with(mut self, prefix: &str, folder: WorkspaceFolder) -> Self {
        self.folders.push((PathBuf::from(prefix), folder));
        self
    }
}

impl WorkspaceLookup for PrefixWorkspaces {
    fn workspace_folder_for(&self, path: &ResourcePath) -> Option<WorkspaceFolder> {
        self.folders
            .iter()
            .filter(|(prefix, _)| path.location().starts_with(prefix))
            .max_by_key(|(prefix, _)| prefix.components().count())
            .map(|(_, folder)| folder.clone())
    }
}

/// How the recording runner answers for a repository root.
#[derive(Debug, Clone)]
pub enum Scripted {
    Exit(i32),
    SpawnFailure(&'static str),
    Fatal(&'static str),
}

/// Records every invocation and answers from a script (exit 0 by default).
pub struct RecordingRunner {
    script: HashMap<PathBuf, Scripted>,
    invocations: Mutex<Vec<Invocation>>,
}

#[derive(Debug, Clone)]
pub struct Invocation {
    pub repo_root: PathBuf,
    pub command_line: String,
    pub paths: Vec<ResourcePath>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self {
            script: HashMap::new(),
            invocations: Mutex::new(Vec::new()),
        }
    }

    pub fn with(mut self, repo_root: &str, answer: Scripted) -> Self {
        self.script.insert(PathBuf::from(repo_root), answer);
        self
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessRunner for RecordingRunner {
    async fn run(
        &self,
        template: &CommandTemplate,
        repo_root: &Path,
        paths: &[ResourcePath],
        _env: &Environment,
    ) -> BatchResult<ProcessOutcome> {
        let command_line = template.render(paths);
        self.invocations.lock().unwrap().push(Invocation {
            repo_root: repo_root.to_path_buf(),
            command_line: command_line.clone(),
            paths: paths.to_vec(),
        });

        let handle = ProcessHandle::new(command_line, repo_root.to_path_buf());
        match self.script.get(repo_root).cloned().unwrap_or(Scripted::Exit(0)) {
            Scripted::Exit(code) => Ok(ProcessOutcome::new(handle.with_pid(Some(42)), paths.to_vec())
                .with_exit(Some(code), 5)),
            Scripted::SpawnFailure(message) => Err(BatchError::spawn_failure(
                handle,
                std::io::Error::new(std::io::ErrorKind::NotFound, message),
            )),
            Scripted::Fatal(message) => Err(BatchError::internal_error(message)),
        }
    }
}

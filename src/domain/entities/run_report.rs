use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::domain::value_objects::resource_path::ResourcePath;

/// Identity of one subprocess invocation. `pid` is `None` when the process
/// never started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessHandle {
    pub pid: Option<u32>,
    pub command_line: String,
    pub working_dir: PathBuf,
}

impl ProcessHandle {
    pub fn new(command_line: impl Into<String>, working_dir: PathBuf) -> Self {
        Self {
            pid: None,
            command_line: command_line.into(),
            working_dir,
        }
    }

    pub fn with_pid(mut self, pid: Option<u32>) -> Self {
        self.pid = pid;
        self
    }
}

/// Settled state of a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStatus {
    Succeeded,
    Failed,
}

/// Result of one batch's subprocess.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessOutcome {
    pub process: ProcessHandle,

    /// Paths passed to the process, in command line order
    pub paths: Vec<ResourcePath>,

    /// Exit code; `None` if the process errored, was killed by a signal or
    /// never started
    pub exit_code: Option<i32>,

    pub stdout: String,
    pub stderr: String,

    /// Set when the process errored instead of exiting
    pub error_message: Option<String>,

    pub execution_time_ms: u64,
}

impl ProcessOutcome {
    pub fn new(process: ProcessHandle, paths: Vec<ResourcePath>) -> Self {
        Self {
            process,
            paths,
            exit_code: None,
            stdout: String::new(),
            stderr: String::new(),
            error_message: None,
            execution_time_ms: 0,
        }
    }

    /// The process exited (or closed its streams) with `exit_code`.
    pub fn with_exit(mut self, exit_code: Option<i32>, execution_time_ms: u64) -> Self {
        self.exit_code = exit_code;
        self.execution_time_ms = execution_time_ms;
        self
    }

    pub fn with_output(mut self, stdout: String, stderr: String) -> Self {
        self.stdout = stdout;
        self.stderr = stderr;
        self
    }

    pub fn with_error(mut self, error: impl Into<String>, execution_time_ms: u64) -> Self {
        self.error_message = Some(error.into());
        self.execution_time_ms = execution_time_ms;
        self
    }

    pub fn status(&self) -> ProcessStatus {
        if self.exit_code == Some(0) && self.error_message.is_none() {
            ProcessStatus::Succeeded
        } else {
            ProcessStatus::Failed
        }
    }

    pub fn is_success(&self) -> bool {
        self.status() == ProcessStatus::Succeeded
    }
}

/// Why a path was not placed in any batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// No owning repository (and, unless split, no containing workspace folder)
    MissingRepository,
    /// No containing workspace folder
    OutOfWorkspace,
    /// The workspace folder is not on the local file system
    NonLocalScheme,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::MissingRepository => write!(f, "missing repository"),
            RejectionReason::OutOfWorkspace => write!(f, "outside workspace"),
            RejectionReason::NonLocalScheme => write!(f, "not on the local file system"),
        }
    }
}

/// A path together with the reason it was not batched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub path: ResourcePath,
    pub reason: RejectionReason,
}

/// Aggregate result of one batched run.
///
/// Every input path ends up either in one rejection bucket or in the paths of
/// exactly one outcome in `succeeded` / `failed`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    /// Informational; filled by the caller through [`RunReport::record_affected`]
    pub affected: Vec<ResourcePath>,
    pub missing_repository: Vec<ResourcePath>,
    pub out_of_workspace: Vec<ResourcePath>,
    pub non_local_scheme: Vec<ResourcePath>,
    pub succeeded: Vec<ProcessOutcome>,
    pub failed: Vec<ProcessOutcome>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_rejection(&mut self, rejection: Rejection) {
        let bucket = match rejection.reason {
            RejectionReason::MissingRepository => &mut self.missing_repository,
            RejectionReason::OutOfWorkspace => &mut self.out_of_workspace,
            RejectionReason::NonLocalScheme => &mut self.non_local_scheme,
        };
        bucket.push(rejection.path);
    }

    /// Files an outcome by its exit status.
    pub fn add_outcome(&mut self, outcome: ProcessOutcome) {
        match outcome.status() {
            ProcessStatus::Succeeded => self.succeeded.push(outcome),
            ProcessStatus::Failed => self.failed.push(outcome),
        }
    }

    /// Fills `affected` with the paths of every succeeded process.
    pub fn record_affected(&mut self) {
        self.affected = self
            .succeeded
            .iter()
            .flat_map(|outcome| outcome.paths.iter().cloned())
            .collect();
    }

    /// No batch failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn rejected_count(&self) -> usize {
        self.missing_repository.len() + self.out_of_workspace.len() + self.non_local_scheme.len()
    }

    /// Paths that reached a process, successful or not.
    pub fn batched_path_count(&self) -> usize {
        self.succeeded
            .iter()
            .chain(self.failed.iter())
            .map(|outcome| outcome.paths.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(exit_code: Option<i32>, paths: &[&str]) -> ProcessOutcome {
        ProcessOutcome::new(
            ProcessHandle::new("\"git\" add", PathBuf::from("/repo")).with_pid(Some(42)),
            paths.iter().map(|p| ResourcePath::local(*p)).collect(),
        )
        .with_exit(exit_code, 10)
    }

    #[test]
    fn test_outcome_status_follows_exit_code() {
        assert!(outcome(Some(0), &[]).is_success());
        assert_eq!(outcome(Some(1), &[]).status(), ProcessStatus::Failed);
        assert_eq!(outcome(None, &[]).status(), ProcessStatus::Failed);
    }

    #[test]
    fn test_errored_outcome_is_failed_even_with_zero_code() {
        let errored = outcome(Some(0), &[]).with_error("stream broke", 5);
        assert_eq!(errored.status(), ProcessStatus::Failed);
    }

    #[test]
    fn test_report_buckets() {
        let mut report = RunReport::new();
        report.add_rejection(Rejection {
            path: ResourcePath::local("/tmp/e"),
            reason: RejectionReason::MissingRepository,
        });
        report.add_rejection(Rejection {
            path: ResourcePath::remote("sftp", None, "/d"),
            reason: RejectionReason::NonLocalScheme,
        });
        report.add_outcome(outcome(Some(0), &["/repo/a", "/repo/b"]));
        report.add_outcome(outcome(Some(128), &["/other/c"]));

        assert_eq!(report.rejected_count(), 2);
        assert_eq!(report.succeeded.len(), 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.batched_path_count(), 3);
        assert!(!report.is_success());

        report.record_affected();
        assert_eq!(
            report.affected,
            vec![ResourcePath::local("/repo/a"), ResourcePath::local("/repo/b")]
        );
    }

    #[test]
    fn test_report_serializes_to_json() {
        let mut report = RunReport::new();
        report.add_outcome(outcome(Some(0), &["/repo/a"]));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["succeeded"][0]["process"]["pid"], 42);
        assert_eq!(json["succeeded"][0]["exit_code"], 0);
    }
}

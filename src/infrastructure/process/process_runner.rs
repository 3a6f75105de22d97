use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, trace, warn};

use super::settlement::SettleOnce;
use crate::common::error::BatchError;
use crate::common::result::BatchResult;
use crate::domain::entities::run_report::{ProcessHandle, ProcessOutcome};
use crate::domain::value_objects::command_template::CommandTemplate;
use crate::domain::value_objects::resource_path::ResourcePath;

/// Environment handed to every spawned process.
pub type Environment = Vec<(OsString, OsString)>;

/// The calling process's full environment.
pub fn current_environment() -> Environment {
    std::env::vars_os().collect()
}

/// Runs one batch's command.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Runs `template` over `paths` inside `repo_root`.
    ///
    /// A non-zero exit is an `Ok` outcome; only a process that could not be
    /// started yields [`BatchError::SpawnFailure`].
    async fn run(
        &self,
        template: &CommandTemplate,
        repo_root: &Path,
        paths: &[ResourcePath],
        env: &Environment,
    ) -> BatchResult<ProcessOutcome>;
}

/// Low-level notifications about a running process. `Exit` and `Close` both
/// report the same exit code for the same process; whichever is first settles
/// the outcome and the other is ignored.
#[derive(Debug)]
enum ProcessEvent {
    /// Waiting on the process or reading its streams failed
    Error(String),
    /// The process terminated
    Exit(Option<i32>),
    /// The process terminated and its output streams are drained
    Close(Option<i32>),
}

/// Runs command lines through the platform shell with piped output.
#[derive(Debug, Default, Clone)]
pub struct ShellProcessRunner;

impl ShellProcessRunner {
    pub fn new() -> Self {
        Self
    }

    fn shell_command(command_line: &str) -> Command {
        #[cfg(windows)]
        {
            let mut command = Command::new("cmd");
            command.raw_arg("/C").raw_arg(command_line);
            command
        }
        #[cfg(not(windows))]
        {
            let mut command = Command::new("/bin/sh");
            command.arg("-c").arg(command_line);
            command
        }
    }

    #[cfg(windows)]
    fn hide_console_window(command: &mut Command) {
        command.creation_flags(winapi::um::winbase::CREATE_NO_WINDOW);
    }

    #[cfg(not(windows))]
    fn hide_console_window(_command: &mut Command) {}
}

#[async_trait]
impl ProcessRunner for ShellProcessRunner {
    async fn run(
        &self,
        template: &CommandTemplate,
        repo_root: &Path,
        paths: &[ResourcePath],
        env: &Environment,
    ) -> BatchResult<ProcessOutcome> {
        let command_line = template.render(paths);
        let handle = ProcessHandle::new(command_line.clone(), repo_root.to_path_buf());

        let mut command = Self::shell_command(&command_line);
        command
            .current_dir(repo_root)
            .env_clear()
            .envs(env.iter().map(|(key, value)| (key, value)))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        Self::hide_console_window(&mut command);

        debug!("Running '{}' in {}", command_line, repo_root.display());
        let start_time = Instant::now();

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(source) => {
                warn!("Failed to spawn '{}': {}", command_line, source);
                return Err(BatchError::spawn_failure(handle, source));
            }
        };
        let handle = handle.with_pid(child.id());

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let (settlement, settled) = SettleOnce::new();
        let settlement = Arc::new(settlement);

        let exit_watch = {
            let settlement = Arc::clone(&settlement);
            tokio::spawn(async move {
                match child.wait().await {
                    Ok(status) => {
                        settle(&settlement, ProcessEvent::Exit(status.code()));
                        Some(status.code())
                    }
                    Err(e) => {
                        settle(&settlement, ProcessEvent::Error(e.to_string()));
                        None
                    }
                }
            })
        };

        let close_watch = {
            let settlement = Arc::clone(&settlement);
            tokio::spawn(async move {
                let (stdout, stderr) = tokio::join!(read_stream(stdout), read_stream(stderr));
                let stdout = stdout.unwrap_or_else(|e| {
                    settle(&settlement, ProcessEvent::Error(format!("stdout: {}", e)));
                    String::new()
                });
                let stderr = stderr.unwrap_or_else(|e| {
                    settle(&settlement, ProcessEvent::Error(format!("stderr: {}", e)));
                    String::new()
                });

                if let Ok(Some(exit_code)) = exit_watch.await {
                    settle(&settlement, ProcessEvent::Close(exit_code));
                }
                (stdout, stderr)
            })
        };

        let event = settled
            .await
            .map_err(|_| BatchError::internal_error("Process watchers ended without an outcome"))?;
        let (stdout, stderr) = close_watch
            .await
            .map_err(|e| BatchError::internal_error_with_source("Output collection failed", e))?;

        let execution_time = start_time.elapsed().as_millis() as u64;
        let outcome = ProcessOutcome::new(handle, paths.to_vec()).with_output(stdout, stderr);
        let outcome = match event {
            ProcessEvent::Error(message) => outcome.with_error(message, execution_time),
            ProcessEvent::Exit(exit_code) | ProcessEvent::Close(exit_code) => {
                outcome.with_exit(exit_code, execution_time)
            }
        };

        debug!(
            "'{}' settled as {:?} (exit code {:?}) in {} ms",
            command_line,
            outcome.status(),
            outcome.exit_code,
            execution_time
        );
        Ok(outcome)
    }
}

fn settle(settlement: &SettleOnce<ProcessEvent>, event: ProcessEvent) {
    trace!("Process event: {:?}", event);
    if !settlement.settle(event) {
        trace!("Outcome already settled, event ignored");
    }
}

async fn read_stream<R: AsyncRead + Unpin>(stream: Option<R>) -> std::io::Result<String> {
    let mut buffer = Vec::new();
    if let Some(mut stream) = stream {
        stream.read_to_end(&mut buffer).await?;
    }
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

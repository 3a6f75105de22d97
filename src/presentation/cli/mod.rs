pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::env;
use std::path::{Path, PathBuf};
use std::process::exit;

use crate::domain::entities::workspace::WorkspaceFolder;
use crate::domain::entities::workspace_config::WorkspaceConfig;
use crate::domain::value_objects::command_template::quote_argument;
use crate::domain::value_objects::resource_path::ResourcePath;
use crate::infrastructure::filesystem::config_store::ConfigStore;

use commands::batch_run::BatchRunCommand;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", built ",
    env!("BUILD_DATE"),
    ")"
);

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    Text,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

/// repobatch - run git over files grouped by their repository
#[derive(Parser)]
#[command(name = "repobatch")]
#[command(about = "Run git commands over files, one process per repository")]
#[command(version, long_version = LONG_VERSION)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Working directory (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<String>,

    /// Config file (defaults to repobatch.yaml in the working directory)
    #[arg(long, global = true, env = "REPOBATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Workspace folder, path or URI (repeatable; defaults to the working directory)
    #[arg(short, long = "workspace", global = true)]
    pub workspaces: Vec<String>,

    /// Git executable (defaults to a PATH search)
    #[arg(long, global = true, env = "REPOBATCH_GIT")]
    pub git: Option<PathBuf>,

    /// Report files outside every workspace folder separately from files
    /// without a repository
    #[arg(long, global = true)]
    pub split_out_of_workspace: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Only show how files would be batched
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Stage files
    Add {
        /// Files to stage
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Unstage files
    Unstage {
        /// Files to unstage
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Commit files, one commit per repository
    Commit {
        /// Commit message
        #[arg(short, long)]
        message: String,

        /// Files to commit
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Run an arbitrary git command over files: `run checkout -q -- a.txt`
    ///
    /// Files follow the last `--`; everything before it goes to git, each
    /// argument quoted for the shell.
    Run {
        #[arg(
            required = true,
            trailing_var_arg = true,
            allow_hyphen_values = true,
            value_name = "GIT_ARGS -- FILES"
        )]
        args: Vec<String>,
    },
}

impl Commands {
    /// Git arguments preceding the files.
    pub fn git_args(&self) -> Vec<String> {
        match self {
            Commands::Add { .. } => vec!["add".into(), "--".into()],
            Commands::Unstage { .. } => {
                vec!["reset".into(), "-q".into(), "HEAD".into(), "--".into()]
            }
            Commands::Commit { message, .. } => vec![
                "commit".into(),
                "-m".into(),
                quote_argument(message),
                "--".into(),
            ],
            Commands::Run { args } => split_run_args(args)
                .0
                .iter()
                .map(|arg| quote_argument(arg))
                .collect(),
        }
    }

    pub fn paths(&self) -> &[String] {
        match self {
            Commands::Add { paths }
            | Commands::Unstage { paths }
            | Commands::Commit { paths, .. } => paths,
            Commands::Run { args } => split_run_args(args).1,
        }
    }
}

/// Splits at the last `--`. Without one there are no files.
fn split_run_args(args: &[String]) -> (&[String], &[String]) {
    match args.iter().rposition(|arg| arg == "--") {
        Some(separator) => (&args[..separator], &args[separator + 1..]),
        None => (args, &[]),
    }
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl CliApp {
    pub fn new() -> Self {
        Self { cli: Cli::parse() }
    }

    pub fn from_cli(cli: Cli) -> Self {
        Self { cli }
    }

    pub fn verbose(&self) -> bool {
        self.cli.verbose
    }

    pub async fn run(self) -> anyhow::Result<()> {
        if self.cli.no_color {
            colored::control::set_override(false);
        }

        // Change directory if specified
        if let Some(ref dir) = self.cli.directory {
            env::set_current_dir(dir)?;
        }

        match self.handle_command().await {
            Ok(true) => Ok(()),
            Ok(false) => exit(1),
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                exit(1);
            }
        }
    }

    /// Returns whether every batch succeeded.
    async fn handle_command(&self) -> Result<bool> {
        if self.cli.command.paths().is_empty() {
            anyhow::bail!("No files given; list them after `--`");
        }

        let current_dir = env::current_dir()?;
        let (config, config_dir) = self.load_config(&current_dir).await?;

        let paths = self
            .cli
            .command
            .paths()
            .iter()
            .map(|path| ResourcePath::parse(path, &current_dir))
            .collect::<Result<Vec<_>, _>>()?;

        let command = BatchRunCommand {
            git_args: self.cli.command.git_args(),
            paths,
            workspace_folders: self.workspace_folders(&config, &config_dir, &current_dir)?,
            git_executable: self.cli.git.clone().or_else(|| {
                config
                    .git
                    .executable
                    .as_ref()
                    .map(|executable| config_dir.join(executable))
            }),
            split_out_of_workspace: self.cli.split_out_of_workspace
                || config.classification.split_out_of_workspace,
            output: self.cli.output,
            dry_run: self.cli.dry_run,
            verbose: self.cli.verbose,
        };

        command.execute().await
    }

    /// Config from `--config`, else `repobatch.yaml` in the working
    /// directory, else defaults. Also returns the directory relative paths in
    /// the config are resolved against.
    async fn load_config(&self, current_dir: &Path) -> Result<(WorkspaceConfig, PathBuf)> {
        let path = match &self.cli.config {
            Some(path) => Some(current_dir.join(path)),
            None => ConfigStore::find(current_dir),
        };

        match path {
            Some(path) => {
                let config = ConfigStore::load(&path).await?;
                let config_dir = path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| current_dir.to_path_buf());
                Ok((config, config_dir))
            }
            None => Ok((WorkspaceConfig::default(), current_dir.to_path_buf())),
        }
    }

    /// `--workspace` folders plus configured folders; the working directory
    /// when there are none.
    fn workspace_folders(
        &self,
        config: &WorkspaceConfig,
        config_dir: &Path,
        current_dir: &Path,
    ) -> Result<Vec<WorkspaceFolder>> {
        let mut folders = self
            .cli
            .workspaces
            .iter()
            .map(|raw| {
                let uri = ResourcePath::parse(raw, current_dir)?;
                Ok(WorkspaceFolder::new(folder_name(&uri), uri))
            })
            .collect::<Result<Vec<_>>>()?;
        folders.extend(config.workspace_folders(config_dir)?);

        if folders.is_empty() {
            let uri = ResourcePath::local(current_dir);
            folders.push(WorkspaceFolder::new(folder_name(&uri), uri));
        }
        Ok(folders)
    }
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}

fn folder_name(uri: &ResourcePath) -> String {
    uri.location()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| uri.to_string())
}

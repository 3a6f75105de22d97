use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use super::super::OutputFormat;
use crate::application::use_cases::run_batched::{BatchPlan, RunBatchedConfig, RunBatchedUseCase};
use crate::domain::entities::run_report::{ProcessOutcome, RunReport};
use crate::domain::entities::workspace::WorkspaceFolder;
use crate::domain::value_objects::command_template::CommandTemplate;
use crate::domain::value_objects::resource_path::ResourcePath;
use crate::infrastructure::process::{current_environment, ShellProcessRunner};
use crate::infrastructure::{
    ConfiguredWorkspaceFolders, GitExecutableLocator, GitIntegration, GitRepositoryLookup,
    RepositoryLookup, WorkspaceLookup,
};

/// Handler shared by every git subcommand: batch the paths by repository and
/// run git once per batch.
pub struct BatchRunCommand {
    pub git_args: Vec<String>,
    pub paths: Vec<ResourcePath>,
    pub workspace_folders: Vec<WorkspaceFolder>,
    pub git_executable: Option<PathBuf>,
    pub split_out_of_workspace: bool,
    pub output: OutputFormat,
    pub dry_run: bool,
    pub verbose: bool,
}

impl BatchRunCommand {
    /// Returns whether every batch succeeded.
    pub async fn execute(&self) -> Result<bool> {
        let workspaces: Arc<dyn WorkspaceLookup> = Arc::new(ConfiguredWorkspaceFolders::new(
            self.workspace_folders.clone(),
        ));
        let config =
            RunBatchedConfig::new().with_split_out_of_workspace(self.split_out_of_workspace);

        if self.dry_run {
            let repositories: Arc<dyn RepositoryLookup> = Arc::new(GitRepositoryLookup::new());
            let use_case = RunBatchedUseCase::new(
                Some(repositories),
                workspaces,
                Arc::new(ShellProcessRunner::new()),
            )
            .with_config(config);

            let plan = use_case.plan(&self.paths)?;
            self.print(&plan, |plan| self.print_plan(plan))?;
            return Ok(true);
        }

        let locator = match &self.git_executable {
            Some(executable) => GitExecutableLocator::with_executable(executable),
            None => GitExecutableLocator::new(),
        };
        let git = GitIntegration::detect(&locator);

        // Without an integration the use case fails before looking at the
        // executable.
        let executable = git
            .as_ref()
            .map(|git| git.executable().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("git"));
        let template = CommandTemplate::new(executable, self.git_args.clone());

        let use_case = RunBatchedUseCase::new(
            git.as_ref().map(GitIntegration::repository_lookup),
            workspaces,
            Arc::new(ShellProcessRunner::new()),
        )
        .with_config(config);

        let mut report = use_case
            .execute(&template, &self.paths, &current_environment())
            .await?;
        report.record_affected();

        self.print(&report, |report| self.print_report(report))?;
        Ok(report.is_success())
    }

    fn print<T: Serialize>(&self, value: &T, text: impl FnOnce(&T)) -> Result<()> {
        match self.output {
            OutputFormat::Text => text(value),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(value)?),
        }
        Ok(())
    }

    fn print_plan(&self, plan: &BatchPlan) {
        for batch in plan.batches.iter() {
            println!(
                "{} {}",
                batch.repo_root.display().to_string().bold(),
                format!("({} file(s))", batch.paths.len()).dimmed()
            );
            for path in &batch.paths {
                println!("  {}", path);
            }
        }
        for rejection in &plan.rejections {
            println!("{} {} ({})", "-".yellow(), rejection.path, rejection.reason);
        }
    }

    fn print_report(&self, report: &RunReport) {
        for outcome in &report.succeeded {
            self.print_outcome("✓".green(), outcome);
        }
        for outcome in &report.failed {
            self.print_outcome("✗".red(), outcome);
        }

        for (label, paths) in [
            ("missing repository", &report.missing_repository),
            ("outside workspace", &report.out_of_workspace),
            ("not local", &report.non_local_scheme),
        ] {
            for path in paths {
                println!("{} {} ({})", "-".yellow(), path, label);
            }
        }

        println!();
        println!("{}", summary_line(report).bold());
        if !report.failed.is_empty() {
            println!(
                "{}",
                format!("{} repository batch(es) failed", report.failed.len()).red()
            );
        }
    }

    fn print_outcome(&self, marker: colored::ColoredString, outcome: &ProcessOutcome) {
        print!(
            "{} {}: {} file(s)",
            marker,
            outcome.process.working_dir.display().to_string().bold(),
            outcome.paths.len()
        );
        if let Some(ref message) = outcome.error_message {
            print!(" {}", message.red());
        } else if let Some(exit_code) = outcome.exit_code.filter(|code| *code != 0) {
            print!(" {}", format!("(exit code {})", exit_code).red());
        }
        println!();

        if self.verbose {
            println!("  {}", outcome.process.command_line.dimmed());
        }
        let output = if outcome.is_success() {
            self.verbose.then_some(&outcome.stdout)
        } else {
            Some(&outcome.stderr)
        };
        for line in output.into_iter().flat_map(|output| output.lines()) {
            println!("  {}", line);
        }
    }
}

/// "3 file(s) affected in 2 repository(ies), 1 file(s) not batched"
pub fn summary_line(report: &RunReport) -> String {
    let mut line = format!(
        "{} file(s) affected in {} repository(ies)",
        report.affected.len(),
        report.succeeded.len()
    );
    let rejected = report.rejected_count();
    if rejected > 0 {
        line.push_str(&format!(", {} file(s) not batched", rejected));
    }
    line
}

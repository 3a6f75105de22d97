use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

use crate::application::services::batcher;
use crate::application::services::path_classifier::{Classification, PathClassifier};
use crate::common::error::BatchError;
use crate::common::result::{BatchResult, OptionExt};
use crate::domain::entities::batch::Batches;
use crate::domain::entities::run_report::{ProcessOutcome, Rejection, RunReport};
use crate::domain::value_objects::command_template::CommandTemplate;
use crate::domain::value_objects::resource_path::ResourcePath;
use crate::infrastructure::process::{Environment, ProcessRunner};
use crate::infrastructure::scm::scm_interface::{RepositoryLookup, WorkspaceLookup};

/// Batched run settings
#[derive(Debug, Clone, Default)]
pub struct RunBatchedConfig {
    /// Report paths outside every workspace folder separately
    pub split_out_of_workspace: bool,
}

impl RunBatchedConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_split_out_of_workspace(mut self, split: bool) -> Self {
        self.split_out_of_workspace = split;
        self
    }
}

/// Classified and batched input, before anything is spawned.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchPlan {
    pub batches: Batches,
    pub rejections: Vec<Rejection>,
}

/// Runs a command once per repository over the given paths.
pub struct RunBatchedUseCase {
    repositories: Option<Arc<dyn RepositoryLookup>>,
    workspaces: Arc<dyn WorkspaceLookup>,
    runner: Arc<dyn ProcessRunner>,
    config: RunBatchedConfig,
}

impl RunBatchedUseCase {
    /// `repositories` is `None` when no version-control integration exists;
    /// every operation then fails up front.
    pub fn new(
        repositories: Option<Arc<dyn RepositoryLookup>>,
        workspaces: Arc<dyn WorkspaceLookup>,
        runner: Arc<dyn ProcessRunner>,
    ) -> Self {
        Self {
            repositories,
            workspaces,
            runner,
            config: RunBatchedConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RunBatchedConfig) -> Self {
        self.config = config;
        self
    }

    /// Classifies every path and groups the accepted ones by repository root.
    pub fn plan(&self, paths: &[ResourcePath]) -> BatchResult<BatchPlan> {
        let repositories = self
            .repositories
            .as_deref()
            .ok_or_unavailable("repository lookup")?;

        let classifier = PathClassifier::new(repositories, self.workspaces.as_ref())
            .with_split_out_of_workspace(self.config.split_out_of_workspace);

        let mut accepted = Vec::new();
        let mut rejections = Vec::new();
        for path in paths {
            match classifier.classify(path) {
                Classification::Accepted { repo_root } => accepted.push((path.clone(), repo_root)),
                Classification::Rejected(reason) => rejections.push(Rejection {
                    path: path.clone(),
                    reason,
                }),
            }
        }

        let batches = batcher::batch(accepted);
        info!(
            "Planned {} batch(es) for {} path(s), {} rejected",
            batches.len(),
            batches.path_count(),
            rejections.len()
        );

        Ok(BatchPlan {
            batches,
            rejections,
        })
    }

    /// Runs `template` once per repository root, all batches concurrently, and
    /// waits for every one of them.
    ///
    /// Batches whose process could not be spawned are reported as failed.
    /// Any other runner error is returned once all batches have settled.
    pub async fn execute(
        &self,
        template: &CommandTemplate,
        paths: &[ResourcePath],
        env: &Environment,
    ) -> BatchResult<RunReport> {
        let plan = self.plan(paths)?;
        let start_time = Instant::now();

        let mut report = RunReport::new();
        for rejection in plan.rejections {
            report.add_rejection(rejection);
        }

        let runs = plan
            .batches
            .iter()
            .map(|batch| self.runner.run(template, &batch.repo_root, &batch.paths, env));
        let results = join_all(runs).await;

        let mut fatal: Option<BatchError> = None;
        for (batch, result) in plan.batches.iter().zip(results) {
            match result {
                Ok(outcome) => report.add_outcome(outcome),
                Err(BatchError::SpawnFailure { process, source }) => {
                    warn!(
                        "Batch in {} could not start: {}",
                        batch.repo_root.display(),
                        source
                    );
                    report.add_outcome(
                        ProcessOutcome::new(process, batch.paths.clone())
                            .with_error(source.to_string(), 0),
                    );
                }
                Err(e) => {
                    error!("Batch in {} failed: {}", batch.repo_root.display(), e);
                    fatal.get_or_insert(e);
                }
            }
        }

        if let Some(e) = fatal {
            return Err(e);
        }

        info!(
            "{} batch(es) succeeded, {} failed in {} ms",
            report.succeeded.len(),
            report.failed.len(),
            start_time.elapsed().as_millis()
        );
        Ok(report)
    }
}

//! # repobatch - batched git over arbitrary files
//!
//! `repobatch` takes a list of files, works out which git repository owns each
//! one, and runs a git command once per repository with that repository's
//! files appended. Every batch runs concurrently; the result is a report of
//! which batches succeeded, which failed and which files never reached a
//! repository.
//!
//! ## Quick Start
//!
//! ```bash
//! repobatch add src/main.rs ../other-repo/README.md
//! repobatch commit -m "Update docs" docs/a.md ../other-repo/b.md
//! repobatch run checkout -- src/main.rs
//! repobatch --dry-run --output json add *.rs
//! ```
//!
//! ## Architecture
//!
//! - [`domain`]: paths, batches, outcomes and the run report
//! - [`application`]: path classification, batching and the batched run use case
//! - [`infrastructure`]: git discovery, workspace folders, config files and process execution
//! - [`presentation`]: CLI interface
//! - [`common`]: error type and result helpers
//!
//! ## Using the Library
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use repobatch::application::use_cases::run_batched::RunBatchedUseCase;
//! use repobatch::domain::entities::workspace::WorkspaceFolder;
//! use repobatch::domain::value_objects::command_template::CommandTemplate;
//! use repobatch::domain::value_objects::resource_path::ResourcePath;
//! use repobatch::infrastructure::process::current_environment;
//! use repobatch::infrastructure::{
//!     ConfiguredWorkspaceFolders, GitExecutableLocator, GitIntegration, ShellProcessRunner,
//! };
//!
//! # async fn example() -> repobatch::Result<()> {
//! let git = GitIntegration::detect(&GitExecutableLocator::new());
//! let workspaces = ConfiguredWorkspaceFolders::new(vec![WorkspaceFolder::new(
//!     "work",
//!     ResourcePath::local("/work"),
//! )]);
//!
//! let use_case = RunBatchedUseCase::new(
//!     git.as_ref().map(GitIntegration::repository_lookup),
//!     Arc::new(workspaces),
//!     Arc::new(ShellProcessRunner::new()),
//! );
//! let template = CommandTemplate::new("git", vec!["add".into(), "--".into()]);
//! let report = use_case
//!     .execute(
//!         &template,
//!         &[ResourcePath::local("/work/app/src/main.rs")],
//!         &current_environment(),
//!     )
//!     .await?;
//!
//! println!("{} batch(es) failed", report.failed.len());
//! # Ok(())
//! # }
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::BatchError;
pub use crate::common::result::BatchResult as Result;

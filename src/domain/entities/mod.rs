pub mod batch;
pub mod repository;
pub mod run_report;
pub mod workspace;
pub mod workspace_config;

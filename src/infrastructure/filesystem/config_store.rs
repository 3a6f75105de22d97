use std::path::{Path, PathBuf};
use tokio::fs as async_fs;
use tracing::debug;
use validator::Validate;

use crate::common::error::BatchError;
use crate::common::result::{BatchResult, ResultExt};
use crate::domain::entities::workspace_config::WorkspaceConfig;

/// File names checked, in order, when no config path is given.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["repobatch.yaml", ".repobatch.yaml"];

/// Reads `repobatch.yaml` files.
pub struct ConfigStore;

impl ConfigStore {
    /// First config file present in `dir`.
    pub fn find(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    }

    /// Reads, parses and validates a config file.
    pub async fn load(path: &Path) -> BatchResult<WorkspaceConfig> {
        if !path.exists() {
            return Err(BatchError::config_error(format!(
                "Config file not found at path: {}",
                path.display()
            )));
        }

        let content = async_fs::read_to_string(path)
            .await
            .with_filesystem_error("Failed to read config file", Some(path.to_path_buf()))?;

        debug!("Loaded config from {}", path.display());
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> BatchResult<WorkspaceConfig> {
        let config: WorkspaceConfig =
            serde_yaml::from_str(content).with_config_error("Invalid config YAML")?;
        config.validate()?;
        Ok(config)
    }
}

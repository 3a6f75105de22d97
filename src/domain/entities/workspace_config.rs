use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

use super::workspace::WorkspaceFolder;
use crate::common::result::BatchResult;
use crate::domain::value_objects::resource_path::ResourcePath;

/// Git settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GitSettings {
    /// Explicit git executable; `PATH` is searched when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executable: Option<PathBuf>,
}

/// One configured workspace folder
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FolderEntry {
    #[validate(length(min = 1))]
    pub name: String,

    /// Plain path (relative to the config file) or URI
    #[validate(length(min = 1))]
    pub uri: String,
}

/// Workspace folder settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct WorkspaceSettings {
    #[serde(default)]
    #[validate(nested)]
    pub folders: Vec<FolderEntry>,
}

/// Classification switches
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassificationSettings {
    /// Report paths outside every workspace folder as out-of-workspace
    /// instead of merging them into missing-repository
    #[serde(default)]
    pub split_out_of_workspace: bool,
}

/// Contents of `repobatch.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct WorkspaceConfig {
    #[serde(default)]
    pub git: GitSettings,

    #[serde(default)]
    #[validate(nested)]
    pub workspace: WorkspaceSettings,

    #[serde(default)]
    pub classification: ClassificationSettings,
}

impl WorkspaceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a folder entry
    pub fn with_folder(mut self, name: impl Into<String>, uri: impl Into<String>) -> Self {
        self.workspace.folders.push(FolderEntry {
            name: name.into(),
            uri: uri.into(),
        });
        self
    }

    /// Resolves folder entries; relative paths are taken from `base`.
    pub fn workspace_folders(&self, base: &Path) -> BatchResult<Vec<WorkspaceFolder>> {
        self.workspace
            .folders
            .iter()
            .map(|entry| {
                let uri = ResourcePath::parse(&entry.uri, base)?;
                Ok(WorkspaceFolder::new(entry.name.clone(), uri))
            })
            .collect()
    }
}

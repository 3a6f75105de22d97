use serde::{Deserialize, Serialize};

use crate::domain::value_objects::resource_path::ResourcePath;

/// A top-level folder opened for editing, independent of version control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceFolder {
    /// Display name
    pub name: String,

    /// Folder location; its scheme decides whether files below it are local
    pub uri: ResourcePath,
}

impl WorkspaceFolder {
    pub fn new(name: impl Into<String>, uri: ResourcePath) -> Self {
        Self {
            name: name.into(),
            uri,
        }
    }

    /// Whether `path` lies inside this folder.
    pub fn contains(&self, path: &ResourcePath) -> bool {
        self.uri.contains(path)
    }

    pub fn is_local(&self) -> bool {
        self.uri.is_local()
    }
}

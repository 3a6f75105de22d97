use crate::domain::entities::workspace::WorkspaceFolder;
use crate::domain::value_objects::resource_path::ResourcePath;
use crate::infrastructure::scm::scm_interface::WorkspaceLookup;

/// Workspace lookup over a fixed list of folders. Nested folders resolve to
/// the innermost one.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredWorkspaceFolders {
    folders: Vec<WorkspaceFolder>,
}

impl ConfiguredWorkspaceFolders {
    pub fn new(folders: Vec<WorkspaceFolder>) -> Self {
        Self { folders }
    }
}

impl WorkspaceLookup for ConfiguredWorkspaceFolders {
    fn workspace_folder_for(&self, path: &ResourcePath) -> Option<WorkspaceFolder> {
        self.folders
            .iter()
            .filter(|folder| folder.contains(path))
            .max_by_key(|folder| folder.uri.location().components().count())
            .cloned()
    }
}

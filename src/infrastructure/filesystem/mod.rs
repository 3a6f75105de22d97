pub mod config_store;
pub mod workspace_folders;

pub use config_store::ConfigStore;
pub use workspace_folders::ConfiguredWorkspaceFolders;
